//! `SeaORM` Entity for the business_units table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub base_currency: String,
    /// Designated Receivable control account; NULL while accounting is not
    /// enabled for this unit.
    pub receivable_account_id: Option<Uuid>,
    /// Designated Payable control account; NULL while accounting is not
    /// enabled for this unit.
    pub payable_account_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ReceivableAccountId",
        to = "super::accounts::Column::Id"
    )]
    ReceivableAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::PayableAccountId",
        to = "super::accounts::Column::Id"
    )]
    PayableAccount,
}

impl ActiveModelBehavior for ActiveModel {}
