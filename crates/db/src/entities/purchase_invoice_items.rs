//! `SeaORM` Entity for the purchase_invoice_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_invoice_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub purchase_invoice_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    /// The expense account debited when the invoice is posted.
    pub expense_account_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_invoices::Entity",
        from = "Column::PurchaseInvoiceId",
        to = "super::purchase_invoices::Column::Id"
    )]
    PurchaseInvoices,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ExpenseAccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::purchase_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
