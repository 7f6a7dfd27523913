use std::cmp::Ordering;

use uuid::Uuid;

use crate::goals;
use crate::models::{
    Employee, Goal, PerformanceRecord, Period, RankedEntry, SaleRecord, SortKey,
};
use crate::performance;

/// Builds the full leaderboard: scores every employee over the period,
/// sorts by the requested key, and assigns contiguous positions 1..N.
/// The sort is stable, so equal keys keep the employee input order.
pub fn assemble_ranking(
    employees: &[Employee],
    sales: &[SaleRecord],
    goals: &[Goal],
    period: Period,
    sort_key: SortKey,
) -> Vec<RankedEntry> {
    let applicable = goals::applicable_goals(goals, period);
    let in_period: Vec<&SaleRecord> = sales
        .iter()
        .filter(|sale| period.contains(sale.sold_on))
        .collect();

    let mut entries: Vec<RankedEntry> = employees
        .iter()
        .map(|employee| {
            let own_sales: Vec<SaleRecord> = in_period
                .iter()
                .filter(|sale| sale.employee_id == employee.id)
                .map(|sale| (*sale).clone())
                .collect();

            RankedEntry {
                position: 0,
                employee: employee.clone(),
                performance: performance::compute_performance(&own_sales, &applicable),
            }
        })
        .collect();

    sort_entries(&mut entries, sort_key);

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index + 1;
    }

    entries
}

fn sort_entries(entries: &mut [RankedEntry], sort_key: SortKey) {
    match sort_key {
        SortKey::OverallScore => entries.sort_by(|a, b| {
            descending(a.performance.overall_score, b.performance.overall_score)
        }),
        SortKey::QuantitySold => entries
            .sort_by(|a, b| b.performance.quantity_sold.cmp(&a.performance.quantity_sold)),
        SortKey::TotalValueSold => entries.sort_by(|a, b| {
            descending(a.performance.total_value_sold, b.performance.total_value_sold)
        }),
        SortKey::AttainmentAverage => entries.sort_by(|a, b| {
            descending(
                a.performance.attainment_average,
                b.performance.attainment_average,
            )
        }),
        SortKey::Name => entries.sort_by(|a, b| a.employee.name.cmp(&b.employee.name)),
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Scores a single employee over the period. `None` means the id is unknown.
pub fn employee_performance(
    employees: &[Employee],
    sales: &[SaleRecord],
    goals: &[Goal],
    employee_id: Uuid,
    period: Period,
) -> Option<PerformanceRecord> {
    employees.iter().find(|e| e.id == employee_id)?;

    let applicable = goals::applicable_goals(goals, period);
    let own_sales: Vec<SaleRecord> = sales
        .iter()
        .filter(|sale| sale.employee_id == employee_id && period.contains(sale.sold_on))
        .cloned()
        .collect();

    Some(performance::compute_performance(&own_sales, &applicable))
}

pub fn meeting_all_targets(ranking: &[RankedEntry]) -> Vec<RankedEntry> {
    ranking
        .iter()
        .filter(|entry| entry.performance.all_targets_met)
        .cloned()
        .collect()
}

pub fn missing_targets(ranking: &[RankedEntry]) -> Vec<RankedEntry> {
    ranking
        .iter()
        .filter(|entry| !entry.performance.all_targets_met)
        .cloned()
        .collect()
}
