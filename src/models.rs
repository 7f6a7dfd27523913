use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Count,
    Revenue,
}

/// Goal snapshot with its indicator already joined on.
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub id: Uuid,
    pub indicator_id: Uuid,
    pub indicator_name: String,
    pub kind: IndicatorKind,
    pub target_value: f64,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub amount: f64,
    pub sold_on: NaiveDate,
    pub description: String,
}

/// Reporting window. Both bounds are inclusive; `None` means unbounded
/// on that side. Callers must ensure `start <= end` before use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Period {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start)
            && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRecord {
    pub quantity_sold: u32,
    pub total_value_sold: f64,
    pub quantity_target: f64,
    pub value_target: f64,
    pub quantity_percent: f64,
    pub value_percent: f64,
    pub overall_score: f64,
    pub attainment_average: f64,
    pub all_targets_met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub position: usize,
    pub employee: Employee,
    pub performance: PerformanceRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    OverallScore,
    QuantitySold,
    TotalValueSold,
    AttainmentAverage,
    Name,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSummary {
    pub total_employees: usize,
    pub total_quantity_sold: u64,
    pub total_sales_value: f64,
    pub average_sales_per_employee: f64,
    pub average_attainment: f64,
    pub employees_meeting_all_targets: usize,
    pub employees_missing_targets: usize,
    pub percent_meeting_targets: f64,
    pub best_overall_score: f64,
    pub worst_overall_score: f64,
    pub has_data: bool,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}
