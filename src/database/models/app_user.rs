//! `SeaORM` Entity for platform accounts

use crate::database::models::user_role::UserRole;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub role: UserRole,
    pub registered_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::account_manager::Entity")]
    AccountManager,
    #[sea_orm(has_one = "super::customer::Entity")]
    Customer,
}

impl Related<super::account_manager::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountManager.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
