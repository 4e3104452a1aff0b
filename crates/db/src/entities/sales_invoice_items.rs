//! `SeaORM` Entity for the sales_invoice_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_invoice_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sales_invoice_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    /// The revenue account credited when the invoice is posted.
    pub revenue_account_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_invoices::Entity",
        from = "Column::SalesInvoiceId",
        to = "super::sales_invoices::Column::Id"
    )]
    SalesInvoices,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::RevenueAccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::sales_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
