use crate::domain::simulation::{SimulationRequest, ValidatedRequest};
use crate::engine::weights::limits;
use crate::error::{EngineError, EngineResult};
use rust_decimal::Decimal;

/// Check a simulation request, failing on the first violated bound.
///
/// Order is fixed: principal, then term, then product type.
pub fn validate(request: &SimulationRequest) -> EngineResult<ValidatedRequest> {
    let principal = request
        .principal
        .ok_or_else(|| invalid("principal is required"))?;
    if principal <= Decimal::ZERO {
        return Err(invalid(format!("principal must be positive (got {principal})")));
    }
    if principal < limits::MIN_PRINCIPAL {
        return Err(invalid(format!(
            "principal must be at least {} (got {principal})",
            limits::MIN_PRINCIPAL
        )));
    }
    if principal > limits::MAX_PRINCIPAL {
        return Err(invalid(format!(
            "principal must be at most {} (got {principal})",
            limits::MAX_PRINCIPAL
        )));
    }

    let term_months = request
        .term_months
        .ok_or_else(|| invalid("term_months is required"))?;
    if term_months <= 0 {
        return Err(invalid(format!(
            "term_months must be positive (got {term_months})"
        )));
    }
    if term_months > limits::MAX_TERM_MONTHS {
        return Err(invalid(format!(
            "term_months must be at most {} (got {term_months})",
            limits::MAX_TERM_MONTHS
        )));
    }

    let product_type = request
        .product_type
        .as_deref()
        .ok_or_else(|| invalid("product_type is required"))?
        .trim();
    if product_type.is_empty() {
        return Err(invalid("product_type must not be blank"));
    }

    Ok(ValidatedRequest {
        client_id: request.client_id,
        principal,
        term_months,
        product_type: product_type.to_string(),
    })
}

fn invalid(reason: impl Into<String>) -> EngineError {
    EngineError::InvalidParameter(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(principal: Option<Decimal>, term: Option<i32>, product_type: Option<&str>) -> SimulationRequest {
        SimulationRequest {
            client_id: 1,
            principal,
            term_months: term,
            product_type: product_type.map(str::to_string),
        }
    }

    fn reason(result: EngineResult<ValidatedRequest>) -> String {
        match result {
            Err(EngineError::InvalidParameter(reason)) => reason,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn accepts_boundaries() {
        for principal in [dec!(100.00), dec!(1000000.00)] {
            for term in [1, 360] {
                let ok = validate(&request(Some(principal), Some(term), Some("CDB"))).unwrap();
                assert_eq!(ok.principal, principal);
                assert_eq!(ok.term_months, term);
            }
        }
    }

    #[test]
    fn rejects_out_of_range_principal() {
        for principal in [dec!(0), dec!(-5), dec!(99.99), dec!(1000000.01)] {
            let result = validate(&request(Some(principal), Some(12), Some("CDB")));
            assert!(matches!(result, Err(EngineError::InvalidParameter(_))), "{principal}");
        }
    }

    #[test]
    fn rejects_out_of_range_term() {
        for term in [0, -1, 361] {
            let result = validate(&request(Some(dec!(1000)), Some(term), Some("CDB")));
            assert!(matches!(result, Err(EngineError::InvalidParameter(_))), "{term}");
        }
    }

    #[test]
    fn rejects_missing_or_blank_product_type() {
        for product_type in [None, Some(""), Some("   ")] {
            let result = validate(&request(Some(dec!(1000)), Some(12), product_type));
            assert!(matches!(result, Err(EngineError::InvalidParameter(_))));
        }
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(reason(validate(&request(None, Some(12), Some("CDB")))).contains("principal"));
        assert!(reason(validate(&request(Some(dec!(1000)), None, Some("CDB")))).contains("term_months"));
    }

    #[test]
    fn first_failing_check_wins() {
        // Everything is wrong; principal is reported.
        let r = reason(validate(&request(Some(dec!(0)), Some(0), Some(""))));
        assert!(r.contains("principal"), "{r}");

        // Principal fine, term and type wrong; term is reported.
        let r = reason(validate(&request(Some(dec!(500)), Some(400), Some(""))));
        assert!(r.contains("term_months"), "{r}");
    }

    #[test]
    fn distinct_reasons_per_bound() {
        let zero = reason(validate(&request(Some(dec!(0)), Some(12), Some("CDB"))));
        let low = reason(validate(&request(Some(dec!(99.99)), Some(12), Some("CDB"))));
        let high = reason(validate(&request(Some(dec!(1000000.01)), Some(12), Some("CDB"))));
        assert_ne!(zero, low);
        assert_ne!(low, high);
    }

    #[test]
    fn trims_product_type() {
        let ok = validate(&request(Some(dec!(1000)), Some(12), Some("  CDB "))).unwrap();
        assert_eq!(ok.product_type, "CDB");
    }
}
