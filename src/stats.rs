use crate::models::{Period, RankedEntry, StatisticsSummary};

/// Population-level figures over an assembled ranking. An empty ranking
/// yields zeros with `has_data = false` rather than a division error.
pub fn summarize(ranking: &[RankedEntry], period: Period) -> StatisticsSummary {
    let total_employees = ranking.len();

    if total_employees == 0 {
        return StatisticsSummary {
            total_employees: 0,
            total_quantity_sold: 0,
            total_sales_value: 0.0,
            average_sales_per_employee: 0.0,
            average_attainment: 0.0,
            employees_meeting_all_targets: 0,
            employees_missing_targets: 0,
            percent_meeting_targets: 0.0,
            best_overall_score: 0.0,
            worst_overall_score: 0.0,
            has_data: false,
            period_start: period.start,
            period_end: period.end,
        };
    }

    let population = total_employees as f64;
    let total_quantity_sold: u64 = ranking
        .iter()
        .map(|entry| u64::from(entry.performance.quantity_sold))
        .sum();
    let total_sales_value: f64 = ranking
        .iter()
        .map(|entry| entry.performance.total_value_sold)
        .sum();
    let average_attainment = ranking
        .iter()
        .map(|entry| entry.performance.attainment_average)
        .sum::<f64>()
        / population;
    let meeting = ranking
        .iter()
        .filter(|entry| entry.performance.all_targets_met)
        .count();
    let best_overall_score = ranking
        .iter()
        .map(|entry| entry.performance.overall_score)
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_overall_score = ranking
        .iter()
        .map(|entry| entry.performance.overall_score)
        .fold(f64::INFINITY, f64::min);

    StatisticsSummary {
        total_employees,
        total_quantity_sold,
        total_sales_value,
        average_sales_per_employee: total_sales_value / population,
        average_attainment,
        employees_meeting_all_targets: meeting,
        employees_missing_targets: total_employees - meeting,
        percent_meeting_targets: meeting as f64 / population * 100.0,
        best_overall_score,
        worst_overall_score,
        has_data: true,
        period_start: period.start,
        period_end: period.end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, PerformanceRecord};
    use chrono::NaiveDate;
    use uuid::Uuid;

    const EPSILON: f64 = 0.0001;

    fn entry(
        position: usize,
        total_value_sold: f64,
        attainment_average: f64,
        overall_score: f64,
        all_targets_met: bool,
    ) -> RankedEntry {
        RankedEntry {
            position,
            employee: Employee {
                id: Uuid::new_v4(),
                name: format!("Employee {position}"),
            },
            performance: PerformanceRecord {
                quantity_sold: 2,
                total_value_sold,
                quantity_target: 4.0,
                value_target: 1000.0,
                quantity_percent: 50.0,
                value_percent: overall_score,
                overall_score,
                attainment_average,
                all_targets_met,
            },
        }
    }

    #[test]
    fn empty_ranking_yields_no_data() {
        let summary = summarize(&[], Period::default());
        assert_eq!(summary.total_employees, 0);
        assert_eq!(summary.total_sales_value, 0.0);
        assert_eq!(summary.average_sales_per_employee, 0.0);
        assert_eq!(summary.average_attainment, 0.0);
        assert_eq!(summary.percent_meeting_targets, 0.0);
        assert_eq!(summary.best_overall_score, 0.0);
        assert_eq!(summary.worst_overall_score, 0.0);
        assert!(!summary.has_data);
    }

    #[test]
    fn sums_and_averages_over_the_population() {
        let ranking = vec![
            entry(1, 1500.0, 120.0, 150.0, true),
            entry(2, 500.0, 60.0, 50.0, false),
        ];

        let summary = summarize(&ranking, Period::default());

        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_quantity_sold, 4);
        assert!((summary.total_sales_value - 2000.0).abs() < EPSILON);
        assert!((summary.average_sales_per_employee - 1000.0).abs() < EPSILON);
        assert!((summary.average_attainment - 90.0).abs() < EPSILON);
        assert_eq!(summary.employees_meeting_all_targets, 1);
        assert_eq!(summary.employees_missing_targets, 1);
        assert!((summary.percent_meeting_targets - 50.0).abs() < EPSILON);
        assert!((summary.best_overall_score - 150.0).abs() < EPSILON);
        assert!((summary.worst_overall_score - 50.0).abs() < EPSILON);
        assert!(summary.has_data);
    }

    #[test]
    fn echoes_the_requested_period() {
        let period = Period {
            start: NaiveDate::from_ymd_opt(2026, 7, 1),
            end: NaiveDate::from_ymd_opt(2026, 7, 31),
        };
        let summary = summarize(&[entry(1, 100.0, 10.0, 10.0, false)], period);
        assert_eq!(summary.period_start, period.start);
        assert_eq!(summary.period_end, period.end);
        assert_eq!(summary.percent_meeting_targets, 0.0);
    }
}
