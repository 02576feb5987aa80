use sea_orm::sea_query::extension::postgres::Type;
use sea_orm::{ActiveEnum, DbBackend, Schema};
use sea_orm_migration::{
    prelude::*,
    schema::{date, decimal_len, double, string, uuid},
};

use crate::database::models::job_kind::JobKind;
use crate::database::models::job_state::JobState;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(schema.create_enum_from_active_enum::<JobState>())
            .await?;

        manager
            .create_type(schema.create_enum_from_active_enum::<JobKind>())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(
                        uuid(Job::Id)
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(string(Job::Name).not_null())
                    .col(
                        ColumnDef::new(Job::State)
                            .custom(JobState::name())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Job::Kind)
                            .custom(JobKind::name())
                            .not_null(),
                    )
                    .col(date(Job::StartingDate).not_null())
                    .col(date(Job::EndDate).not_null())
                    .col(double(Job::CompletionTime).not_null().default(0.0))
                    .col(decimal_len(Job::Price, 10, 2).not_null())
                    .col(uuid(Job::ServiceProviderId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job-service_provider_id")
                            .from(Job::Table, Job::ServiceProviderId)
                            .to(ServiceProvider::Table, ServiceProvider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The aggregator filters on both date columns.
        manager
            .create_index(
                Index::create()
                    .name("idx-job-starting_date")
                    .table(Job::Table)
                    .col(Job::StartingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-job-end_date")
                    .table(Job::Table)
                    .col(Job::EndDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(JobKind::name()).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(JobState::name()).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    Name,
    State,
    Kind,
    StartingDate,
    EndDate,
    CompletionTime,
    Price,
    ServiceProviderId,
}

#[derive(DeriveIden)]
enum ServiceProvider {
    Table,
    Id,
}
