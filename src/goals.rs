use crate::models::{Goal, Period};

/// Filters to the goals whose active window overlaps the period.
/// Overlap, not containment: a goal only needs to intersect the window.
pub fn applicable_goals(goals: &[Goal], period: Period) -> Vec<Goal> {
    goals
        .iter()
        .filter(|goal| is_applicable(goal, period))
        .cloned()
        .collect()
}

pub fn is_applicable(goal: &Goal, period: Period) -> bool {
    if !goal.active {
        return false;
    }

    let starts_in_time = period.end.map_or(true, |end| goal.starts_on <= end);
    let still_open = match (goal.ends_on, period.start) {
        (Some(ends_on), Some(start)) => ends_on >= start,
        _ => true,
    };

    starts_in_time && still_open
}

pub fn has_active_goals(goals: &[Goal], period: Period) -> bool {
    goals.iter().any(|goal| is_applicable(goal, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndicatorKind;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn goal(starts_on: NaiveDate, ends_on: Option<NaiveDate>, active: bool) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            indicator_id: Uuid::new_v4(),
            indicator_name: "Monthly Revenue".to_string(),
            kind: IndicatorKind::Revenue,
            target_value: 1000.0,
            starts_on,
            ends_on,
            active,
        }
    }

    fn period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Period {
        Period { start, end }
    }

    #[test]
    fn partial_overlap_is_applicable() {
        let g = goal(date(2024, 1, 15), Some(date(2024, 1, 31)), true);
        let p = period(Some(date(2024, 1, 1)), Some(date(2024, 1, 20)));
        assert!(is_applicable(&g, p));
    }

    #[test]
    fn inactive_goal_is_never_applicable() {
        let g = goal(date(2024, 1, 1), None, false);
        assert!(!is_applicable(&g, period(None, None)));
    }

    #[test]
    fn goal_starting_after_period_end_is_excluded() {
        let g = goal(date(2024, 2, 1), None, true);
        let p = period(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(!is_applicable(&g, p));
    }

    #[test]
    fn goal_ending_before_period_start_is_excluded() {
        let g = goal(date(2023, 1, 1), Some(date(2023, 12, 31)), true);
        let p = period(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(!is_applicable(&g, p));
    }

    #[test]
    fn open_ended_goal_overlaps_any_later_period() {
        let g = goal(date(2023, 1, 1), None, true);
        let p = period(Some(date(2026, 1, 1)), Some(date(2026, 12, 31)));
        assert!(is_applicable(&g, p));
    }

    #[test]
    fn boundary_dates_are_inclusive() {
        let g = goal(date(2024, 1, 10), Some(date(2024, 1, 20)), true);
        assert!(is_applicable(
            &g,
            period(Some(date(2024, 1, 20)), Some(date(2024, 1, 25)))
        ));
        assert!(is_applicable(
            &g,
            period(Some(date(2024, 1, 5)), Some(date(2024, 1, 10)))
        ));
    }

    #[test]
    fn unbounded_period_admits_every_active_goal() {
        let goals = vec![
            goal(date(2024, 1, 1), Some(date(2024, 6, 30)), true),
            goal(date(2025, 1, 1), None, true),
            goal(date(2025, 1, 1), None, false),
        ];
        let applicable = applicable_goals(&goals, period(None, None));
        assert_eq!(applicable.len(), 2);
    }

    #[test]
    fn has_active_goals_respects_window() {
        let goals = vec![goal(date(2024, 1, 1), Some(date(2024, 1, 31)), true)];
        assert!(has_active_goals(
            &goals,
            period(Some(date(2024, 1, 20)), Some(date(2024, 2, 10)))
        ));
        assert!(!has_active_goals(
            &goals,
            period(Some(date(2024, 3, 1)), Some(date(2024, 3, 31)))
        ));
    }
}
