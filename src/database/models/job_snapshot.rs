//! `SeaORM` Entity for per-report job statistics
//!
//! One row per report, overwritten wholesale on recomputation. The three
//! state counts need not sum to `total_jobs`: state is a point-in-time
//! label while selection is by date containment.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "job_snapshot")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    #[sea_orm(unique)]
    pub report_id: i32,
    pub total_jobs: i64,
    pub avg_completion_time_regular: f64,
    pub avg_completion_time_wafer_run: f64,
    pub jobs_created: i64,
    pub jobs_active: i64,
    pub jobs_completed: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::ReportId",
        to = "super::report::Column::Id",
        on_delete = "Cascade"
    )]
    Report,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
