//! `SeaORM` Entity for jobs run at service providers

use crate::database::models::{job_kind::JobKind, job_state::JobState};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub state: JobState,
    pub kind: JobKind,
    pub starting_date: Date,
    pub end_date: Date,
    /// Days spent completing the job.
    pub completion_time: f64,
    /// Flat price of the job, independent of order quantity.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub service_provider_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_provider::Entity",
        from = "Column::ServiceProviderId",
        to = "super::service_provider::Column::Id",
        on_delete = "Cascade"
    )]
    ServiceProvider,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::service_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceProvider.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
