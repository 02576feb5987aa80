//! Job aggregator: throughput and completion-time metrics per range.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::database::models::{job, job_kind::JobKind, job_snapshot, job_state::JobState};
use crate::stats::{quarter::ReportRange, report::resolve_report, StatsError};

/// Computes job statistics for the range, resolves (or creates) the
/// report for it and upserts the report's job snapshot.
pub async fn calculate_job_stats<C: ConnectionTrait>(
    conn: &C,
    range: &ReportRange,
) -> Result<job_snapshot::Model, StatsError> {
    let report = resolve_report(conn, range).await?;
    recompute(conn, report.id, range).await
}

/// Recomputes and upserts the job snapshot for an already-resolved report.
///
/// Selects jobs fully contained in the range: starting on/after the range
/// start AND ending on/before the range end. Merely overlapping jobs are
/// excluded.
#[allow(clippy::cast_possible_wrap)]
pub(crate) async fn recompute<C: ConnectionTrait>(
    conn: &C,
    report_id: i32,
    range: &ReportRange,
) -> Result<job_snapshot::Model, StatsError> {
    let (start, end) = range.date_bounds();

    let jobs = job::Entity::find()
        .filter(job::Column::StartingDate.gte(start))
        .filter(job::Column::EndDate.lte(end))
        .all(conn)
        .await?;

    let mut jobs_created = 0_i64;
    let mut jobs_active = 0_i64;
    let mut jobs_completed = 0_i64;
    for job in &jobs {
        match job.state {
            JobState::Created => jobs_created += 1,
            JobState::Active => jobs_active += 1,
            JobState::Completed => jobs_completed += 1,
        }
    }

    let snapshot = job_snapshot::ActiveModel {
        report_id: Set(report_id),
        total_jobs: Set(jobs.len() as i64),
        avg_completion_time_regular: Set(mean_completion_time(&jobs, JobKind::Regular)),
        avg_completion_time_wafer_run: Set(mean_completion_time(&jobs, JobKind::WaferRun)),
        jobs_created: Set(jobs_created),
        jobs_active: Set(jobs_active),
        jobs_completed: Set(jobs_completed),
        ..Default::default()
    };

    let snapshot = job_snapshot::Entity::insert(snapshot)
        .on_conflict(
            OnConflict::column(job_snapshot::Column::ReportId)
                .update_columns([
                    job_snapshot::Column::TotalJobs,
                    job_snapshot::Column::AvgCompletionTimeRegular,
                    job_snapshot::Column::AvgCompletionTimeWaferRun,
                    job_snapshot::Column::JobsCreated,
                    job_snapshot::Column::JobsActive,
                    job_snapshot::Column::JobsCompleted,
                ])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;

    Ok(snapshot)
}

/// Mean completion time over the jobs of one kind, 0.0 when none match.
#[allow(clippy::cast_precision_loss)]
fn mean_completion_time(jobs: &[job::Model], kind: JobKind) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_usize;
    for job in jobs.iter().filter(|job| job.kind == kind) {
        sum += job.completion_time;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::stats::quarter::Quarter;
    use crate::tests::setup_test::{date, insert_job, insert_service_provider, test_db};

    fn q1_2024() -> ReportRange {
        ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024)
    }

    #[tokio::test]
    async fn aggregates_counts_and_per_kind_means() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;
        let start = date(2024, 1, 10);
        let end = date(2024, 2, 10);

        insert_job(&db, &provider, JobState::Created, JobKind::Regular, start, end, 5.0, 100).await;
        insert_job(&db, &provider, JobState::Active, JobKind::WaferRun, start, end, 10.0, 200)
            .await;
        insert_job(&db, &provider, JobState::Completed, JobKind::Regular, start, end, 7.0, 150)
            .await;

        let snapshot = calculate_job_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(snapshot.total_jobs, 3);
        assert_eq!(snapshot.jobs_created, 1);
        assert_eq!(snapshot.jobs_active, 1);
        assert_eq!(snapshot.jobs_completed, 1);
        assert!((snapshot.avg_completion_time_regular - 6.0).abs() < f64::EPSILON);
        assert!((snapshot.avg_completion_time_wafer_run - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn requires_full_containment_on_both_edges() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;

        // Starts before the range.
        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2023, 12, 20),
            date(2024, 1, 15),
            5.0,
            100,
        )
        .await;
        // Ends after the range.
        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2024, 3, 1),
            date(2024, 4, 2),
            5.0,
            100,
        )
        .await;
        // Exactly on both boundaries, inclusive.
        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2024, 1, 1),
            date(2024, 3, 31),
            5.0,
            100,
        )
        .await;

        let snapshot = calculate_job_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(snapshot.total_jobs, 1);
    }

    #[tokio::test]
    async fn empty_range_degrades_to_zeroed_metrics() {
        let db = test_db().await;

        let snapshot = calculate_job_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(snapshot.total_jobs, 0);
        assert_eq!(snapshot.jobs_created, 0);
        assert_eq!(snapshot.avg_completion_time_regular, 0.0);
        assert_eq!(snapshot.avg_completion_time_wafer_run, 0.0);
    }

    #[tokio::test]
    async fn recomputation_upserts_a_single_row() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;
        insert_job(
            &db,
            &provider,
            JobState::Completed,
            JobKind::Regular,
            date(2024, 1, 5),
            date(2024, 2, 5),
            4.0,
            100,
        )
        .await;

        let first = calculate_job_stats(&db, &q1_2024()).await.unwrap();
        let second = calculate_job_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(first.report_id, second.report_id);
        assert_eq!(first.total_jobs, second.total_jobs);
        assert_eq!(job_snapshot::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn recomputation_reflects_changed_raw_data() {
        let db = test_db().await;
        let provider = insert_service_provider(&db).await;
        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2024, 1, 5),
            date(2024, 2, 5),
            4.0,
            100,
        )
        .await;

        let before = calculate_job_stats(&db, &q1_2024()).await.unwrap();
        assert_eq!(before.total_jobs, 1);

        insert_job(
            &db,
            &provider,
            JobState::Active,
            JobKind::Regular,
            date(2024, 2, 1),
            date(2024, 3, 1),
            6.0,
            100,
        )
        .await;

        let after = calculate_job_stats(&db, &q1_2024()).await.unwrap();
        assert_eq!(after.total_jobs, 2);
        assert!((after.avg_completion_time_regular - 5.0).abs() < f64::EPSILON);
    }
}
