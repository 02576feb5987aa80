//! `SeaORM` Entity for quarterly report headers
//!
//! A report is identified by its quarter range; the four identity columns
//! carry a composite unique index so find-or-create cannot produce
//! duplicates. Snapshots hang off a report 1:1 and are cascade-deleted
//! with it.

use crate::stats::quarter::Quarter;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub created_at: DateTime,
    pub quarter_from: Quarter,
    pub year_from: i32,
    pub quarter_to: Quarter,
    pub year_to: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::job_snapshot::Entity")]
    JobSnapshot,
    #[sea_orm(has_one = "super::order_snapshot::Entity")]
    OrderSnapshot,
    #[sea_orm(has_one = "super::user_snapshot::Entity")]
    UserSnapshot,
}

impl Related<super::job_snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobSnapshot.def()
    }
}

impl Related<super::order_snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderSnapshot.def()
    }
}

impl Related<super::user_snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSnapshot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
