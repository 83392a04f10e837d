//! Financial independence targets and progress.

use super::error::{CalcError, MAX_AGE, age, positive};

crate::fi_library! {
    /// Calculate the FI number: the portfolio size whose safe withdrawals
    /// cover planned yearly expenses.
    ///
    /// ### Args:
    /// - **planned_yearly_expenses**: expected spending per year in
    ///   retirement.
    /// - **withdrawal_rate**: the safe withdrawal rate as a percentage.
    ///
    /// ### Returns:
    /// The portfolio size needed to be financially independent.
    pub fn fi_number(planned_yearly_expenses: f64, withdrawal_rate: f64 = 4.0) -> Result<f64, CalcError> {
        let rate = positive("withdrawal_rate", withdrawal_rate)?;
        Ok(planned_yearly_expenses / (rate / 100.0))
    }

    /// Calculate progress toward financial independence as a percentage of
    /// the FI number.
    ///
    /// ### Args:
    /// - **net_worth**: current invested assets minus liabilities.
    /// - **planned_yearly_expenses**: expected spending per year in
    ///   retirement.
    /// - **withdrawal_rate**: the safe withdrawal rate as a percentage.
    ///
    /// ### Returns:
    /// The FI ratio as a percentage.
    pub fn fi_ratio(
        net_worth: f64,
        planned_yearly_expenses: f64,
        withdrawal_rate: f64 = 4.0,
    ) -> Result<f64, CalcError> {
        let target = positive(
            "fi_number",
            fi_number(planned_yearly_expenses, withdrawal_rate)?,
        )?;
        Ok(net_worth / target * 100.0)
    }

    /// Project the age at which savings reach the FI number, adding annual
    /// savings and growth once per year.
    ///
    /// ### Args:
    /// - **eval_age**: current age.
    /// - **current_savings**: invested assets today.
    /// - **annual_savings**: amount added to investments every year.
    /// - **target_fi_num**: the portfolio size needed to be financially
    ///   independent.
    /// - **annual_rate**: the yearly rate of return as a percentage.
    ///
    /// ### Returns:
    /// The age at which financial independence is reached.
    pub fn fi_age(
        eval_age: i64,
        current_savings: f64,
        annual_savings: f64,
        target_fi_num: f64,
        annual_rate: f64 = 7.0,
    ) -> Result<i64, CalcError> {
        let eval_age = age("eval_age", eval_age)?;
        let growth = 1.0 + annual_rate / 100.0;
        let mut balance = current_savings;
        for age in eval_age..=MAX_AGE {
            if balance >= target_fi_num {
                return Ok(age);
            }
            balance = balance * growth + annual_savings;
        }
        Err(CalcError::out_of_range(format!(
            "target of {target_fi_num} is not reached by age {MAX_AGE}"
        )))
    }

    /// Calculate what it costs to buy one day of financial freedom: the
    /// invested amount whose safe withdrawals cover one day of spending.
    ///
    /// ### Args:
    /// - **annual_spend**: spending per year.
    /// - **safe_withdrawal_rate**: the safe withdrawal rate as a percentage.
    ///
    /// ### Returns:
    /// The investment needed to fund one day of expenses forever.
    pub fn buy_a_day_of_freedom(
        annual_spend: f64,
        safe_withdrawal_rate: f64 = 4.0,
    ) -> Result<f64, CalcError> {
        let rate = positive("safe_withdrawal_rate", safe_withdrawal_rate)?;
        Ok(annual_spend / 365.0 / (rate / 100.0))
    }
}
