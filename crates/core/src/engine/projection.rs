use crate::error::{EngineError, EngineResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Project the final value of `principal` invested at `annual_rate` for `term_months`.
///
/// Growth is `(1 + rate) ^ (months / 12)` on a fractional-year exponent, not
/// monthly compounding. A missing or non-positive rate preserves the principal.
/// The result is rounded half-up at the cent.
pub fn project(principal: Decimal, annual_rate: Option<f64>, term_months: i32) -> EngineResult<Decimal> {
    let rate = match annual_rate {
        Some(rate) if rate > 0.0 => rate,
        _ => return Ok(round_cents(principal)),
    };

    let years = f64::from(term_months) / 12.0;
    let growth = (1.0 + rate).powf(years);
    let growth = Decimal::from_f64(growth).ok_or_else(|| {
        EngineError::InvalidParameter(format!(
            "growth factor out of range (rate={rate}, term_months={term_months})"
        ))
    })?;

    let final_value = principal.checked_mul(growth).ok_or_else(|| {
        EngineError::InvalidParameter(format!(
            "projected value overflows (principal={principal}, growth={growth})"
        ))
    })?;

    Ok(round_cents(final_value))
}

fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn compounds_on_fractional_years() {
        assert_eq!(project(dec!(1000), Some(0.12), 12).unwrap(), dec!(1120.00));
        assert_eq!(project(dec!(1000), Some(0.08), 24).unwrap(), dec!(1166.40));
        assert_eq!(project(dec!(1000), Some(0.10), 6).unwrap(), dec!(1048.81));
    }

    #[test]
    fn non_positive_rate_preserves_principal() {
        for rate in [None, Some(0.0), Some(-0.05), Some(-1.5)] {
            for term in [1, 12, 360] {
                assert_eq!(project(dec!(2500.555), rate, term).unwrap(), dec!(2500.56));
                assert_eq!(project(dec!(100), rate, term).unwrap(), dec!(100.00));
            }
        }
    }

    #[test]
    fn rounds_half_up_at_the_cent() {
        assert_eq!(round_cents(dec!(10.005)), dec!(10.01));
        assert_eq!(round_cents(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn result_always_has_two_decimal_places() {
        let value = project(dec!(1000), Some(0.12), 12).unwrap();
        assert_eq!(value.scale(), 2);
        assert_eq!(value.to_string(), "1120.00");
    }

    #[test]
    fn long_terms_stay_finite() {
        let value = project(dec!(1000000), Some(0.15), 360).unwrap();
        assert!(value > dec!(1000000));
    }
}
