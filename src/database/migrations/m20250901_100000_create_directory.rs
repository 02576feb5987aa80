use sea_orm::{ActiveEnum, DbBackend, Schema};
use sea_orm_migration::{
    prelude::*,
    schema::{integer, string, text, timestamp, uuid},
};
use sea_orm::sea_query::extension::postgres::Type;

use crate::database::models::user_role::UserRole;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(schema.create_enum_from_active_enum::<UserRole>())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceProvider::Table)
                    .if_not_exists()
                    .col(
                        uuid(ServiceProvider::Id)
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(string(ServiceProvider::Name).not_null())
                    .col(text(ServiceProvider::Description).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUser::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(AppUser::Username).not_null().unique_key())
                    .col(
                        ColumnDef::new(AppUser::Role)
                            .custom(UserRole::name())
                            .not_null(),
                    )
                    .col(
                        timestamp(AppUser::RegisteredAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountManager::Table)
                    .if_not_exists()
                    .col(integer(AccountManager::UserId).primary_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-account_manager-user_id")
                            .from(AccountManager::Table, AccountManager::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(integer(Customer::UserId).primary_key())
                    .col(
                        ColumnDef::new(Customer::AssignedAccountManagerId)
                            .integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer-user_id")
                            .from(Customer::Table, Customer::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer-assigned_account_manager_id")
                            .from(Customer::Table, Customer::AssignedAccountManagerId)
                            .to(AccountManager::Table, AccountManager::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountManager::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceProvider::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::name()).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceProvider {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum AppUser {
    Table,
    Id,
    Username,
    Role,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum AccountManager {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    UserId,
    AssignedAccountManagerId,
}
