//! `SeaORM` Entity for the purchase_invoices table (A/P source documents).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_unit_id: Uuid,
    pub invoice_number: String,
    pub supplier_name: String,
    pub invoice_date: Date,
    pub total: Decimal,
    pub status: InvoiceStatus,
    /// Back-reference to the journal entry this invoice was posted as.
    /// Written best-effort after posting.
    pub journal_entry_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business_units::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_units::Column::Id"
    )]
    BusinessUnits,
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
    #[sea_orm(has_many = "super::purchase_invoice_items::Entity")]
    PurchaseInvoiceItems,
}

impl Related<super::purchase_invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseInvoiceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
