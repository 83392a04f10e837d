//! Spending, ownership and value-of-money calculations.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::error::{CalcError, positive};

/// Average length of a year in days.
const DAYS_PER_YEAR: f64 = 365.25;

crate::fi_library! {
    /// Calculate the annual cost of owning an item, spreading its
    /// depreciation (purchase price minus resale value) over the time it
    /// was owned.
    ///
    /// ### Args:
    /// - **start_date**: purchase date, formatted YYYY-MM-DD.
    /// - **end_date**: date the ownership period ends, formatted YYYY-MM-DD.
    /// - **original_cost**: the purchase price.
    /// - **resale_value**: what the item sells for, or is worth, at the
    ///   end date.
    ///
    /// ### Returns:
    /// The cost of ownership per year.
    pub fn annual_cost(
        start_date: NaiveDate,
        end_date: NaiveDate,
        original_cost: f64,
        resale_value: f64 = 0.0,
    ) -> Result<f64, CalcError> {
        let days = (end_date - start_date).num_days();
        if days <= 0 {
            return Err(CalcError::out_of_range(format!(
                "end_date ({end_date}) must be after start_date ({start_date})"
            )));
        }
        let years = days as f64 / DAYS_PER_YEAR;
        Ok((original_cost - resale_value) / years)
    }

    /// Calculate average spending per day over a period.
    ///
    /// ### Args:
    /// - **total_spent**: total spending over the period.
    /// - **num_of_days**: length of the period in days.
    ///
    /// ### Returns:
    /// The average daily spend.
    pub fn average_daily_spend(total_spent: f64, num_of_days: i64) -> Result<f64, CalcError> {
        let days = positive("num_of_days", num_of_days as f64)?;
        Ok(total_spent / days)
    }

    /// Calculate the cost of each use of an item.
    ///
    /// ### Args:
    /// - **total_cost**: everything paid for the item.
    /// - **uses**: how many times the item was used.
    ///
    /// ### Returns:
    /// The cost per use.
    pub fn cost_per_use(total_cost: f64, uses: i64) -> Result<f64, CalcError> {
        let uses = positive("uses", uses as f64)?;
        Ok(total_cost / uses)
    }

    /// Add up a month of spending across named categories.
    ///
    /// ### Args:
    /// - **expenses**: spending per category, such as
    ///   `{"rent": 1200, "food": 450}`.
    ///
    /// ### Returns:
    /// Total spending for the month.
    pub fn monthly_spending_total(expenses: BTreeMap<String, f64>) -> Result<f64, CalcError> {
        Ok(expenses.values().sum())
    }

    /// Calculate the pay-over-tuition (POT) score of a degree: expected
    /// starting salary divided by total tuition. Higher is better.
    ///
    /// ### Args:
    /// - **total_tuition**: total cost of the degree.
    /// - **starting_salary**: expected first-year salary after graduating.
    ///
    /// ### Returns:
    /// The POT score.
    pub fn pot_score(total_tuition: f64, starting_salary: f64) -> Result<f64, CalcError> {
        let tuition = positive("total_tuition", total_tuition)?;
        Ok(starting_salary / tuition)
    }

    /// Calculate the cash value of credit card or loyalty points.
    ///
    /// ### Args:
    /// - **points**: number of points to redeem.
    /// - **cents_per_point**: redemption value of one point, in cents.
    ///
    /// ### Returns:
    /// The value of the points in dollars.
    pub fn redeem_points(points: i64, cents_per_point: f64 = 1.0) -> Result<f64, CalcError> {
        if points < 0 {
            return Err(CalcError::out_of_range(format!(
                "points must not be negative, got {points}"
            )));
        }
        Ok(points as f64 * cents_per_point / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_annual_cost() {
        let cost = annual_cost(date("2020-01-01"), date("2024-01-01"), 20_000.0, 8_000.0).unwrap();
        assert!((cost - 3_000.0).abs() < 1.0);
        assert!(annual_cost(date("2024-01-01"), date("2020-01-01"), 1.0, 0.0).is_err());
    }

    #[test]
    fn test_average_daily_spend_and_cost_per_use() {
        assert_eq!(average_daily_spend(300.0, 30).unwrap(), 10.0);
        assert!(average_daily_spend(300.0, 0).is_err());
        assert_eq!(cost_per_use(100.0, 4).unwrap(), 25.0);
    }

    #[test]
    fn test_monthly_spending_total() {
        let expenses = BTreeMap::from([("rent".to_string(), 1200.0), ("food".to_string(), 450.5)]);
        assert_eq!(monthly_spending_total(expenses).unwrap(), 1650.5);
    }

    #[test]
    fn test_pot_score_and_points() {
        assert_eq!(pot_score(100_000.0, 50_000.0).unwrap(), 0.5);
        assert_eq!(redeem_points(50_000, 1.5).unwrap(), 750.0);
        assert!(redeem_points(-1, 1.0).is_err());
    }
}
