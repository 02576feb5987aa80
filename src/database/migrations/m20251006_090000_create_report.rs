use sea_orm::sea_query::extension::postgres::Type;
use sea_orm::{ActiveEnum, DbBackend, Schema};
use sea_orm_migration::{
    prelude::*,
    schema::{big_integer, decimal_len, double, integer, string, timestamp},
};

use crate::stats::quarter::Quarter;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(schema.create_enum_from_active_enum::<Quarter>())
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Report::Title).not_null())
                    .col(
                        timestamp(Report::CreatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Report::QuarterFrom)
                            .custom(Quarter::name())
                            .not_null(),
                    )
                    .col(integer(Report::YearFrom).not_null())
                    .col(
                        ColumnDef::new(Report::QuarterTo)
                            .custom(Quarter::name())
                            .not_null(),
                    )
                    .col(integer(Report::YearTo).not_null())
                    .to_owned(),
            )
            .await?;

        // One report per distinct range; find-or-create relies on this.
        manager
            .create_index(
                Index::create()
                    .name("idx-report-range")
                    .table(Report::Table)
                    .col(Report::QuarterFrom)
                    .col(Report::YearFrom)
                    .col(Report::QuarterTo)
                    .col(Report::YearTo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobSnapshot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobSnapshot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(integer(JobSnapshot::ReportId).not_null().unique_key())
                    .col(big_integer(JobSnapshot::TotalJobs).not_null())
                    .col(double(JobSnapshot::AvgCompletionTimeRegular).not_null())
                    .col(double(JobSnapshot::AvgCompletionTimeWaferRun).not_null())
                    .col(big_integer(JobSnapshot::JobsCreated).not_null())
                    .col(big_integer(JobSnapshot::JobsActive).not_null())
                    .col(big_integer(JobSnapshot::JobsCompleted).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_snapshot-report_id")
                            .from(JobSnapshot::Table, JobSnapshot::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderSnapshot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderSnapshot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(integer(OrderSnapshot::ReportId).not_null().unique_key())
                    .col(big_integer(OrderSnapshot::TotalOrders).not_null())
                    .col(decimal_len(OrderSnapshot::TotalRevenue, 10, 2).not_null())
                    .col(decimal_len(OrderSnapshot::AverageOrderValue, 10, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_snapshot-report_id")
                            .from(OrderSnapshot::Table, OrderSnapshot::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSnapshot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSnapshot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(integer(UserSnapshot::ReportId).not_null().unique_key())
                    .col(big_integer(UserSnapshot::TotalUsers).not_null())
                    .col(big_integer(UserSnapshot::NewUsers).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_snapshot-report_id")
                            .from(UserSnapshot::Table, UserSnapshot::ReportId)
                            .to(Report::Table, Report::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSnapshot::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderSnapshot::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobSnapshot::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Quarter::name()).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Report {
    Table,
    Id,
    Title,
    CreatedAt,
    QuarterFrom,
    YearFrom,
    QuarterTo,
    YearTo,
}

#[derive(DeriveIden)]
enum JobSnapshot {
    Table,
    Id,
    ReportId,
    TotalJobs,
    AvgCompletionTimeRegular,
    AvgCompletionTimeWaferRun,
    JobsCreated,
    JobsActive,
    JobsCompleted,
}

#[derive(DeriveIden)]
enum OrderSnapshot {
    Table,
    Id,
    ReportId,
    TotalOrders,
    TotalRevenue,
    AverageOrderValue,
}

#[derive(DeriveIden)]
enum UserSnapshot {
    Table,
    Id,
    ReportId,
    TotalUsers,
    NewUsers,
}
