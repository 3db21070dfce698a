//! Prices

use rusty_money::{Money, MoneyError};
use thiserror::Error;

use crate::{
    cart::{CartError, CartLine},
    money::Amount,
};

/// Errors that can occur while calculating the items total.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoItems,

    /// A line total could not be computed.
    #[error(transparent)]
    Line(#[from] CartError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `sum(unit_price * quantity)` over a list of cart lines.
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No lines were provided, so currency could not be determined.
/// - [`TotalPriceError::Line`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn items_total(lines: &[CartLine]) -> Result<Amount, TotalPriceError> {
    let first = lines.first().ok_or(TotalPriceError::NoItems)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| -> Result<Amount, TotalPriceError> { Ok(acc.add(line.line_total()?)?) },
    )?;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::cart::test_support::line;

    use super::*;

    #[test]
    fn items_total_sums_line_totals() -> TestResult {
        let lines = [line("a", 1000, 2), line("b", 250, 3)];

        assert_eq!(items_total(&lines)?, Money::from_major(2750, iso::INR));

        Ok(())
    }

    #[test]
    fn items_total_empty() {
        assert!(matches!(items_total(&[]), Err(TotalPriceError::NoItems)));
    }
}
