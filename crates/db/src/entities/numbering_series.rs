//! `SeaORM` Entity for the numbering_series table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DocumentKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "numbering_series")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_unit_id: Uuid,
    pub document_kind: DocumentKind,
    pub prefix: String,
    /// The next number to hand out. Read and incremented under a row lock.
    pub next_number: i64,
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
}

impl Related<super::business_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUnits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
