//! Quarterly statistics aggregation.
//!
//! Computes derived metrics (job throughput, order revenue, user growth)
//! over a quarter-to-quarter range and persists them as snapshots tied to
//! a report resolved by that range. Aggregators keep no state between
//! calls; re-running one for a range rederives everything from the raw
//! rows and overwrites the previous snapshot.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde::Serialize;
use thiserror::Error;

use crate::database::models::{job_snapshot, order_snapshot, user_snapshot};
use crate::stats::quarter::ReportRange;

pub mod jobs;
pub mod orders;
pub mod quarter;
pub mod report;
pub mod users;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid quarter label '{0}', expected one of Q1, Q2, Q3 or Q4")]
    InvalidQuarter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// A report together with the three snapshots computed for it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub report: crate::database::models::report::Model,
    pub jobs: job_snapshot::Model,
    pub orders: order_snapshot::Model,
    pub users: user_snapshot::Model,
}

/// Runs all three aggregators for the range against a single resolved
/// report, inside one transaction.
///
/// The transaction makes the three-way upsert atomic: a failing aggregator
/// rolls back the whole run, so a report can never end up with a partial
/// snapshot set. Concurrent recomputations of the same range serialize at
/// the store; the last committed one wins, which is fine because snapshots
/// are pure recomputations.
pub async fn generate_report(
    db: &DatabaseConnection,
    range: &ReportRange,
) -> Result<GeneratedReport, StatsError> {
    let txn = db.begin().await?;

    let report = report::resolve_report(&txn, range).await?;
    let jobs = jobs::recompute(&txn, report.id, range).await?;
    let orders = orders::recompute(&txn, report.id, range).await?;
    let users = users::recompute(&txn, report.id, range).await?;

    txn.commit().await?;

    Ok(GeneratedReport {
        report,
        jobs,
        orders,
        users,
    })
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;
    use crate::database::models::{
        job_kind::JobKind, job_state::JobState, report, user_role::UserRole,
    };
    use crate::stats::quarter::Quarter;
    use crate::tests::setup_test::{
        date, insert_job, insert_order, insert_service_provider, insert_user, seed_directory,
        test_db,
    };

    #[tokio::test]
    async fn generates_all_three_snapshots_for_one_report() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;
        let (customer, manager) = seed_directory(&db).await;

        let job = insert_job(
            &db,
            &provider,
            JobState::Completed,
            JobKind::Regular,
            date(2024, 1, 10),
            date(2024, 2, 10),
            5.0,
            100,
        )
        .await;
        insert_order(
            &db,
            &customer,
            Some(&manager),
            &job,
            1,
            date(2024, 2, 15).and_hms_opt(10, 0, 0).unwrap(),
        )
        .await;
        insert_user(
            &db,
            "alice",
            UserRole::Customer,
            date(2024, 1, 20).and_hms_opt(9, 0, 0).unwrap(),
        )
        .await;

        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024);
        let generated = generate_report(&db, &range).await.unwrap();

        assert_eq!(generated.jobs.report_id, generated.report.id);
        assert_eq!(generated.orders.report_id, generated.report.id);
        assert_eq!(generated.users.report_id, generated.report.id);
        assert_eq!(generated.jobs.total_jobs, 1);
        assert_eq!(generated.orders.total_orders, 1);
        // seed_directory registers its accounts outside the range.
        assert_eq!(generated.users.new_users, 1);
    }

    #[tokio::test]
    async fn repeated_generation_reuses_the_report() {
        let db = test_db().await;
        let range = ReportRange::new(Quarter::Q2, 2024, Quarter::Q3, 2024);

        let first = generate_report(&db, &range).await.unwrap();
        let second = generate_report(&db, &range).await.unwrap();

        assert_eq!(first.report.id, second.report.id);
        assert_eq!(report::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(job_snapshot::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(order_snapshot::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(user_snapshot::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_generation_for_one_range_converges_on_one_row_set() {
        let db = test_db().await;
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024);

        // The same-range recomputation race: both runs must agree on the
        // report and leave exactly one snapshot row per table.
        let (first, second) =
            tokio::join!(generate_report(&db, &range), generate_report(&db, &range));
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!(first.report.id, second.report.id);
        assert_eq!(report::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(job_snapshot::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(order_snapshot::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(user_snapshot::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn backwards_range_yields_zeroed_snapshots() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;
        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2024, 1, 10),
            date(2024, 2, 10),
            5.0,
            100,
        )
        .await;

        let range = ReportRange::new(Quarter::Q4, 2024, Quarter::Q1, 2024);
        let generated = generate_report(&db, &range).await.unwrap();

        assert_eq!(generated.jobs.total_jobs, 0);
        assert_eq!(generated.orders.total_orders, 0);
        assert_eq!(generated.users.new_users, 0);
    }
}
