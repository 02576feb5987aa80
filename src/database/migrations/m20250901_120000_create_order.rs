use sea_orm_migration::{
    prelude::*,
    schema::{integer, timestamp, uuid},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerOrder::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(integer(CustomerOrder::CustomerId).not_null())
                    .col(
                        ColumnDef::new(CustomerOrder::AccountManagerId)
                            .integer()
                            .null(),
                    )
                    .col(uuid(CustomerOrder::JobId).not_null())
                    .col(integer(CustomerOrder::Quantity).not_null().default(1))
                    .col(
                        timestamp(CustomerOrder::CreatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_order-customer_id")
                            .from(CustomerOrder::Table, CustomerOrder::CustomerId)
                            .to(Customer::Table, Customer::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_order-account_manager_id")
                            .from(CustomerOrder::Table, CustomerOrder::AccountManagerId)
                            .to(AccountManager::Table, AccountManager::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_order-job_id")
                            .from(CustomerOrder::Table, CustomerOrder::JobId)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The order aggregator filters by creation timestamp.
        manager
            .create_index(
                Index::create()
                    .name("idx-customer_order-created_at")
                    .table(CustomerOrder::Table)
                    .col(CustomerOrder::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerOrder {
    Table,
    Id,
    CustomerId,
    AccountManagerId,
    JobId,
    Quantity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum AccountManager {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
}
