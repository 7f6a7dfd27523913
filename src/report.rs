use std::fmt::Write;

use crate::goals;
use crate::models::{Employee, Goal, Period, SaleRecord, SortKey};
use crate::ranking;
use crate::stats;

pub fn period_label(period: Period) -> String {
    match (period.start, period.end) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        (Some(start), None) => format!("from {start}"),
        (None, Some(end)) => format!("through {end}"),
        (None, None) => "all time".to_string(),
    }
}

pub fn build_report(
    period: Period,
    employees: &[Employee],
    sales: &[SaleRecord],
    goals: &[Goal],
) -> String {
    let leaderboard =
        ranking::assemble_ranking(employees, sales, goals, period, SortKey::OverallScore);
    let summary = stats::summarize(&leaderboard, period);

    let mut output = String::new();

    let _ = writeln!(output, "# Sales Leaderboard Report");
    let _ = writeln!(output, "Period: {}", period_label(period));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Leaderboard");

    if leaderboard.is_empty() {
        let _ = writeln!(output, "No employees on record.");
    } else {
        for entry in leaderboard.iter().take(10) {
            let _ = writeln!(
                output,
                "{}. {} score {:.2} across {} sales totaling {:.2} (attainment avg {:.2})",
                entry.position,
                entry.employee.name,
                entry.performance.overall_score,
                entry.performance.quantity_sold,
                entry.performance.total_value_sold,
                entry.performance.attainment_average
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Statistics");

    if !summary.has_data {
        let _ = writeln!(output, "No data for this period.");
    } else {
        let _ = writeln!(output, "- Employees: {}", summary.total_employees);
        let _ = writeln!(
            output,
            "- Sales: {} totaling {:.2}",
            summary.total_quantity_sold, summary.total_sales_value
        );
        let _ = writeln!(
            output,
            "- Average sales value per employee: {:.2}",
            summary.average_sales_per_employee
        );
        let _ = writeln!(
            output,
            "- Average attainment: {:.2}%",
            summary.average_attainment
        );
        let _ = writeln!(
            output,
            "- Best overall score {:.2}, worst {:.2}",
            summary.best_overall_score, summary.worst_overall_score
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Goal Attainment");

    if !goals::has_active_goals(goals, period) {
        let _ = writeln!(output, "No active goals overlap this period.");
    } else {
        for goal in goals::applicable_goals(goals, period).iter() {
            let _ = writeln!(
                output,
                "- {} target {:.2}",
                goal.indicator_name, goal.target_value
            );
        }

        let met = ranking::meeting_all_targets(&leaderboard);
        if met.is_empty() {
            let _ = writeln!(output, "No employee met every applicable target.");
        } else {
            let _ = writeln!(
                output,
                "{} of {} employees ({:.2}%) met every applicable target:",
                summary.employees_meeting_all_targets,
                summary.total_employees,
                summary.percent_meeting_targets
            );
            for entry in met.iter() {
                let _ = writeln!(output, "- {}", entry.employee.name);
            }
            for entry in ranking::missing_targets(&leaderboard).iter() {
                let _ = writeln!(output, "- {} (targets missed)", entry.employee.name);
            }
        }
    }

    let mut recent_sales: Vec<&SaleRecord> = sales
        .iter()
        .filter(|sale| period.contains(sale.sold_on))
        .collect();
    recent_sales.sort_by(|a, b| b.sold_on.cmp(&a.sold_on));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Sales");

    if recent_sales.is_empty() {
        let _ = writeln!(output, "No sales recorded for this period.");
    } else {
        for sale in recent_sales.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} sold {:.2} on {}: {}",
                sale.employee_name, sale.amount, sale.sold_on, sale.description
            );
        }
    }

    output
}
