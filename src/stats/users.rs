//! User aggregator: registration growth metrics per range.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::database::models::{app_user, user_snapshot};
use crate::stats::{quarter::ReportRange, report::resolve_report, StatsError};

/// Computes user statistics for the range, resolves (or creates) the
/// report for it and upserts the report's user snapshot.
pub async fn calculate_user_stats<C: ConnectionTrait>(
    conn: &C,
    range: &ReportRange,
) -> Result<user_snapshot::Model, StatsError> {
    let report = resolve_report(conn, range).await?;
    recompute(conn, report.id, range).await
}

/// Recomputes and upserts the user snapshot for an already-resolved
/// report.
///
/// `total_users` is cumulative as of the range end; the start bound is
/// intentionally ignored for it. `new_users` counts registrations within
/// the range only.
#[allow(clippy::cast_possible_wrap)]
pub(crate) async fn recompute<C: ConnectionTrait>(
    conn: &C,
    report_id: i32,
    range: &ReportRange,
) -> Result<user_snapshot::Model, StatsError> {
    let (start, end) = range.datetime_bounds();

    let total_users = app_user::Entity::find()
        .filter(app_user::Column::RegisteredAt.lt(end))
        .count(conn)
        .await?;

    let new_users = app_user::Entity::find()
        .filter(app_user::Column::RegisteredAt.gte(start))
        .filter(app_user::Column::RegisteredAt.lt(end))
        .count(conn)
        .await?;

    let snapshot = user_snapshot::ActiveModel {
        report_id: Set(report_id),
        total_users: Set(total_users as i64),
        new_users: Set(new_users as i64),
        ..Default::default()
    };

    let snapshot = user_snapshot::Entity::insert(snapshot)
        .on_conflict(
            OnConflict::column(user_snapshot::Column::ReportId)
                .update_columns([
                    user_snapshot::Column::TotalUsers,
                    user_snapshot::Column::NewUsers,
                ])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::database::models::user_role::UserRole;
    use crate::stats::quarter::Quarter;
    use crate::tests::setup_test::{date, insert_user, test_db};

    fn q1_2024() -> ReportRange {
        ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024)
    }

    #[tokio::test]
    async fn counts_in_range_registrations_in_both_metrics() {
        let db = test_db().await;
        insert_user(&db, "alice", UserRole::Customer, date(2024, 1, 15).and_hms_opt(9, 0, 0).unwrap())
            .await;
        insert_user(&db, "bob", UserRole::Customer, date(2024, 2, 20).and_hms_opt(9, 0, 0).unwrap())
            .await;

        let snapshot = calculate_user_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(snapshot.total_users, 2);
        assert_eq!(snapshot.new_users, 2);
    }

    #[tokio::test]
    async fn total_is_cumulative_while_new_is_windowed() {
        let db = test_db().await;
        // Registered long before the range: counts toward total only.
        insert_user(&db, "old", UserRole::AccountManager, date(2020, 6, 1).and_hms_opt(8, 0, 0).unwrap())
            .await;
        insert_user(&db, "fresh", UserRole::Customer, date(2024, 3, 31).and_hms_opt(23, 0, 0).unwrap())
            .await;
        // Registered after the range: counts toward neither.
        insert_user(&db, "future", UserRole::Customer, date(2024, 4, 1).and_hms_opt(0, 0, 0).unwrap())
            .await;

        let snapshot = calculate_user_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(snapshot.total_users, 2);
        assert_eq!(snapshot.new_users, 1);
    }

    #[tokio::test]
    async fn recomputation_upserts_a_single_row() {
        let db = test_db().await;
        insert_user(&db, "alice", UserRole::Customer, date(2024, 1, 15).and_hms_opt(9, 0, 0).unwrap())
            .await;

        calculate_user_stats(&db, &q1_2024()).await.unwrap();
        insert_user(&db, "bob", UserRole::Customer, date(2024, 2, 1).and_hms_opt(9, 0, 0).unwrap())
            .await;
        let refreshed = calculate_user_stats(&db, &q1_2024()).await.unwrap();

        assert_eq!(refreshed.new_users, 2);
        assert_eq!(user_snapshot::Entity::find().count(&db).await.unwrap(), 1);
    }
}
