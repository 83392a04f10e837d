//! Income and savings calculations.

use std::fmt;

use super::error::{CalcError, positive};

crate::literal_type! {
    /// Numeric representation of a monetary result.
    pub enum NumType {
        Float => "float",
        Decimal => "decimal",
    }
}

/// A monetary result rendered according to its [`NumType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub amount: f64,
    pub numtype: NumType,
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numtype {
            NumType::Float => write!(f, "{}", self.amount),
            NumType::Decimal => write!(f, "{:.2}", self.amount),
        }
    }
}

crate::fi_library! {
    /// Calculate take-home pay: gross pay plus employer match, minus every
    /// tax and fee withheld from the paycheck.
    ///
    /// ### Args:
    /// - **gross_pay**: pay before taxes and deductions.
    /// - **employer_match**: retirement contributions added by the employer.
    /// - **taxes_and_fees**: every tax, fee and deduction withheld.
    /// - **numtype**: `float` for a plain number, `decimal` for a value
    ///   rounded to cents.
    ///
    /// ### Returns:
    /// The take-home pay.
    pub fn take_home_pay(
        gross_pay: f64,
        employer_match: f64,
        taxes_and_fees: Vec<f64>,
        numtype: NumType = NumType::Float,
    ) -> Result<Figure, CalcError> {
        let withheld: f64 = taxes_and_fees.iter().sum();
        Ok(Figure {
            amount: gross_pay + employer_match - withheld,
            numtype,
        })
    }

    /// Calculate the share of take-home pay that is saved rather than spent.
    ///
    /// ### Args:
    /// - **take_home_pay**: income after taxes and deductions.
    /// - **spending**: total spending over the same period.
    ///
    /// ### Returns:
    /// The savings rate as a percentage.
    pub fn savings_rate(take_home_pay: f64, spending: f64) -> Result<f64, CalcError> {
        let income = positive("take_home_pay", take_home_pay)?;
        Ok((income - spending) / income * 100.0)
    }

    /// Convert an annual salary into an hourly wage.
    ///
    /// ### Args:
    /// - **annual_salary**: yearly pay before taxes.
    /// - **hours_per_week**: hours worked in a typical week.
    /// - **weeks_per_year**: weeks worked in a year.
    ///
    /// ### Returns:
    /// The equivalent hourly wage.
    pub fn hourly_wage(
        annual_salary: f64,
        hours_per_week: f64 = 40.0,
        weeks_per_year: f64 = 52.0,
    ) -> Result<f64, CalcError> {
        let hours = positive("hours_per_week", hours_per_week)?
            * positive("weeks_per_year", weeks_per_year)?;
        Ok(annual_salary / hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_home_pay() {
        let pay = take_home_pay(8528.0, 652.0, vec![712.0, 100.0, 50.0], NumType::Float).unwrap();
        assert_eq!(pay.amount, 8318.0);
        assert_eq!(pay.to_string(), "8318");
    }

    #[test]
    fn test_take_home_pay_decimal_rendering() {
        let pay = take_home_pay(1000.0, 0.0, vec![333.333], NumType::Decimal).unwrap();
        assert_eq!(pay.to_string(), "666.67");
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(5000.0, 3000.0).unwrap(), 40.0);
        assert!(savings_rate(0.0, 100.0).is_err());
    }

    #[test]
    fn test_hourly_wage() {
        assert_eq!(hourly_wage(83_200.0, 40.0, 52.0).unwrap(), 40.0);
        assert!(hourly_wage(83_200.0, 0.0, 52.0).is_err());
    }
}
