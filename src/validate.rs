use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::models::Period;

/// Checks period ordering before the engine runs; the engine itself
/// assumes `start <= end` and does not re-validate.
pub fn validate_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Period> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            bail!("period start {start} is after period end {end}");
        }
    }
    Ok(Period { start, end })
}

pub fn validate_employee_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("employee name must not be empty");
    }
    if name.len() > 100 {
        bail!("employee name must not exceed 100 characters");
    }
    Ok(())
}

pub fn validate_sale(amount: f64, sold_on: NaiveDate, today: NaiveDate) -> Result<()> {
    if amount <= 0.0 {
        bail!("sale amount must be greater than zero");
    }
    if sold_on > today {
        bail!("sale date {sold_on} is in the future");
    }
    Ok(())
}

pub fn validate_goal(
    target_value: f64,
    starts_on: NaiveDate,
    ends_on: Option<NaiveDate>,
) -> Result<()> {
    if target_value <= 0.0 {
        bail!("goal target must be greater than zero");
    }
    if let Some(ends_on) = ends_on {
        if ends_on <= starts_on {
            bail!("goal end date {ends_on} must be after its start date {starts_on}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn inverted_period_is_rejected() {
        let result = validate_period(Some(date(2026, 7, 31)), Some(date(2026, 7, 1)));
        assert!(result.is_err());
    }

    #[test]
    fn open_and_ordered_periods_pass() {
        assert!(validate_period(None, None).is_ok());
        assert!(validate_period(Some(date(2026, 7, 1)), None).is_ok());
        assert!(validate_period(None, Some(date(2026, 7, 31))).is_ok());
        let period =
            validate_period(Some(date(2026, 7, 1)), Some(date(2026, 7, 31))).unwrap();
        assert_eq!(period.start, Some(date(2026, 7, 1)));
    }

    #[test]
    fn single_day_period_is_valid() {
        assert!(validate_period(Some(date(2026, 7, 1)), Some(date(2026, 7, 1))).is_ok());
    }

    #[test]
    fn blank_employee_name_is_rejected() {
        assert!(validate_employee_name("   ").is_err());
        assert!(validate_employee_name("Ana Souza").is_ok());
    }

    #[test]
    fn sale_must_be_positive_and_not_in_the_future() {
        let today = date(2026, 8, 7);
        assert!(validate_sale(0.0, date(2026, 8, 1), today).is_err());
        assert!(validate_sale(-5.0, date(2026, 8, 1), today).is_err());
        assert!(validate_sale(10.0, date(2026, 8, 8), today).is_err());
        assert!(validate_sale(10.0, today, today).is_ok());
    }

    #[test]
    fn goal_window_must_be_ordered() {
        assert!(validate_goal(100.0, date(2026, 7, 1), Some(date(2026, 7, 1))).is_err());
        assert!(validate_goal(100.0, date(2026, 7, 1), Some(date(2026, 6, 1))).is_err());
        assert!(validate_goal(0.0, date(2026, 7, 1), None).is_err());
        assert!(validate_goal(100.0, date(2026, 7, 1), Some(date(2026, 7, 31))).is_ok());
        assert!(validate_goal(100.0, date(2026, 7, 1), None).is_ok());
    }
}
