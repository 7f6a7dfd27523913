use crate::models::{Goal, IndicatorKind, PerformanceRecord, SaleRecord};

/// Computes one employee's attainment from their in-period sales and the
/// applicable goals. Targets for the same indicator kind are summed, never
/// averaged. Empty sales or goals produce a zeroed record with
/// `all_targets_met` false, not an error.
pub fn compute_performance(sales: &[SaleRecord], goals: &[Goal]) -> PerformanceRecord {
    let quantity_sold = sales.len() as u32;
    let total_value_sold: f64 = sales.iter().map(|sale| sale.amount).sum();

    let quantity_target: f64 = goals
        .iter()
        .filter(|goal| goal.kind == IndicatorKind::Count)
        .map(|goal| goal.target_value)
        .sum();
    let value_target: f64 = goals
        .iter()
        .filter(|goal| goal.kind == IndicatorKind::Revenue)
        .map(|goal| goal.target_value)
        .sum();

    let quantity_percent = if quantity_target > 0.0 {
        f64::from(quantity_sold) / quantity_target * 100.0
    } else {
        0.0
    };
    let value_percent = if value_target > 0.0 {
        total_value_sold / value_target * 100.0
    } else {
        0.0
    };

    PerformanceRecord {
        quantity_sold,
        total_value_sold,
        quantity_target,
        value_target,
        quantity_percent,
        value_percent,
        overall_score: round2(quantity_percent.max(value_percent)),
        attainment_average: round2((quantity_percent + value_percent) / 2.0),
        all_targets_met: quantity_percent >= 100.0 && value_percent >= 100.0,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
