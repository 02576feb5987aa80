//! Report identity: find-or-create by quarter range.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::database::models::report;
use crate::stats::{quarter::ReportRange, StatsError};

/// Returns the report whose identity columns match `range` exactly,
/// creating it with a generated title if none exists yet.
///
/// Idempotent: repeated calls with the same range return the same row.
/// The first insert wins the title and creation timestamp; later callers
/// only ever look it up.
pub async fn resolve_report<C: ConnectionTrait>(
    conn: &C,
    range: &ReportRange,
) -> Result<report::Model, StatsError> {
    let existing = report::Entity::find()
        .filter(report::Column::QuarterFrom.eq(range.quarter_from))
        .filter(report::Column::YearFrom.eq(range.year_from))
        .filter(report::Column::QuarterTo.eq(range.quarter_to))
        .filter(report::Column::YearTo.eq(range.year_to))
        .one(conn)
        .await?;

    if let Some(report) = existing {
        return Ok(report);
    }

    let report = report::ActiveModel {
        title: Set(range.title()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        quarter_from: Set(range.quarter_from),
        year_from: Set(range.year_from),
        quarter_to: Set(range.quarter_to),
        year_to: Set(range.year_to),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;
    use crate::stats::quarter::Quarter;
    use crate::tests::setup_test::test_db;

    #[tokio::test]
    async fn creates_a_report_with_generated_title() {
        let db = test_db().await;
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q2, 2024);

        let report = resolve_report(&db, &range).await.unwrap();

        assert_eq!(report.title, "Report 2024Q1 - 2024Q2");
        assert_eq!(report.quarter_from, Quarter::Q1);
        assert_eq!(report.year_to, 2024);
    }

    #[tokio::test]
    async fn repeated_resolution_returns_the_same_row() {
        let db = test_db().await;
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024);

        let first = resolve_report(&db, &range).await.unwrap();
        let second = resolve_report(&db, &range).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(report::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn distinct_ranges_resolve_to_distinct_reports() {
        let db = test_db().await;

        let a = resolve_report(&db, &ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024))
            .await
            .unwrap();
        let b = resolve_report(&db, &ReportRange::new(Quarter::Q1, 2024, Quarter::Q2, 2024))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(report::Entity::find().count(&db).await.unwrap(), 2);
    }
}
