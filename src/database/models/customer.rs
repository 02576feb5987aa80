//! `SeaORM` Entity for customer profiles, 1:1 with an account

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    /// Account manager looking after this customer; detached on manager removal.
    pub assigned_account_manager_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::UserId",
        to = "super::app_user::Column::Id",
        on_delete = "Cascade"
    )]
    AppUser,
    #[sea_orm(
        belongs_to = "super::account_manager::Entity",
        from = "Column::AssignedAccountManagerId",
        to = "super::account_manager::Column::UserId",
        on_delete = "SetNull"
    )]
    AccountManager,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUser.def()
    }
}

impl Related<super::account_manager::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountManager.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
