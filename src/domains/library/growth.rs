//! Compound growth calculations.

use super::error::{CalcError, age, positive};

crate::fi_library! {
    /// Calculate the future value of money invested today, compounding
    /// growth a fixed number of times per year.
    ///
    /// ### Args:
    /// - **present_value**: the amount invested today.
    /// - **annual_rate**: the yearly rate of return as a percentage
    ///   (7 means 7%).
    /// - **periods_per_year**: how many times per year growth compounds.
    /// - **years**: how many years the money grows.
    ///
    /// ### Returns:
    /// The value of the investment after the given number of years.
    pub fn future_value(
        present_value: f64,
        annual_rate: f64,
        periods_per_year: i64 = 1,
        years: f64 = 1.0,
    ) -> Result<f64, CalcError> {
        let periods = positive("periods_per_year", periods_per_year as f64)?;
        let rate_per_period = annual_rate / 100.0 / periods;
        Ok(present_value * (1.0 + rate_per_period).powf(periods * years))
    }

    /// Estimate how many years it takes for money to double at a given
    /// rate of return.
    ///
    /// ### Args:
    /// - **interest_rate**: the yearly rate of return as a percentage.
    /// - **accurate**: use the exact logarithmic formula instead of the
    ///   rule-of-72 approximation.
    ///
    /// ### Returns:
    /// The number of years needed to double the money.
    pub fn rule_of_72(interest_rate: f64, accurate: bool = false) -> Result<f64, CalcError> {
        let rate = positive("interest_rate", interest_rate)?;
        if accurate {
            Ok(2f64.ln() / (1.0 + rate / 100.0).ln())
        } else {
            Ok(72.0 / rate)
        }
    }

    /// Calculate how much must be invested today so that, without any
    /// further contributions, it grows to the FI number by retirement age.
    ///
    /// ### Args:
    /// - **target_fi_num**: the portfolio size needed to be financially
    ///   independent.
    /// - **eval_age**: the age at which the amount is evaluated.
    /// - **retirement_age**: the age at which the target must be reached.
    /// - **annual_rate**: the yearly rate of return as a percentage.
    ///
    /// ### Returns:
    /// The amount needed today to coast to FI.
    pub fn coast_fi(
        target_fi_num: f64,
        eval_age: i64,
        retirement_age: i64 = 65,
        annual_rate: f64 = 7.0,
    ) -> Result<f64, CalcError> {
        let eval_age = age("eval_age", eval_age)?;
        let retirement_age = age("retirement_age", retirement_age)?;
        let years = retirement_age - eval_age;
        if years < 0 {
            return Err(CalcError::out_of_range(format!(
                "retirement_age ({retirement_age}) is before eval_age ({eval_age})"
            )));
        }
        Ok(target_fi_num / (1.0 + annual_rate / 100.0).powi(years as i32))
    }
}
