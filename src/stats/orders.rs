//! Order aggregator: volume and revenue metrics per range.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::database::models::{job, order, order_snapshot};
use crate::stats::{quarter::ReportRange, report::resolve_report, StatsError};

/// Computes order statistics for the range, resolves (or creates) the
/// report for it and upserts the report's order snapshot.
pub async fn calculate_order_stats<C: ConnectionTrait>(
    conn: &C,
    range: &ReportRange,
) -> Result<order_snapshot::Model, StatsError> {
    let report = resolve_report(conn, range).await?;
    recompute(conn, report.id, range).await
}

/// Recomputes and upserts the order snapshot for an already-resolved
/// report.
///
/// Revenue sums each selected order's linked job price once; `quantity`
/// does not scale it.
#[allow(clippy::cast_possible_wrap)]
pub(crate) async fn recompute<C: ConnectionTrait>(
    conn: &C,
    report_id: i32,
    range: &ReportRange,
) -> Result<order_snapshot::Model, StatsError> {
    let (start, end) = range.datetime_bounds();

    let orders = order::Entity::find()
        .filter(order::Column::CreatedAt.gte(start))
        .filter(order::Column::CreatedAt.lt(end))
        .find_also_related(job::Entity)
        .all(conn)
        .await?;

    let total_orders = orders.len() as i64;
    let total_revenue: Decimal = orders
        .iter()
        .filter_map(|(_, job)| job.as_ref())
        .map(|job| job.price)
        .sum();
    let average_order_value = if total_orders > 0 {
        total_revenue / Decimal::from(total_orders)
    } else {
        Decimal::ZERO
    };

    let snapshot = order_snapshot::ActiveModel {
        report_id: Set(report_id),
        total_orders: Set(total_orders),
        total_revenue: Set(total_revenue),
        average_order_value: Set(average_order_value),
        ..Default::default()
    };

    let snapshot = order_snapshot::Entity::insert(snapshot)
        .on_conflict(
            OnConflict::column(order_snapshot::Column::ReportId)
                .update_columns([
                    order_snapshot::Column::TotalOrders,
                    order_snapshot::Column::TotalRevenue,
                    order_snapshot::Column::AverageOrderValue,
                ])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await?;

    Ok(snapshot)
}
