//! Public tender figures.

use crate::models::TenderInfo;

/// Bid discount against the administration's estimate (tenzilat), in percent.
///
/// Zero when no approximate cost is recorded. A contract above the estimate
/// gives a negative discount.
#[must_use]
pub fn discount_percent(tender: &TenderInfo) -> f64 {
    if tender.approximate_cost > 0.0 {
        (tender.approximate_cost - tender.contract_amount) / tender.approximate_cost * 100.0
    } else {
        0.0
    }
}

/// Contract amount after a tender discount is applied to a cost estimate.
#[must_use]
pub fn discounted_amount(estimate: f64, discount_percent: f64) -> f64 {
    estimate * (1.0 - discount_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    #[test]
    fn test_discount_percent() {
        let tender = TenderInfo {
            ikn: "2024/123456".to_string(),
            approximate_cost: 2_000_000.0,
            contract_amount: 1_700_000.0,
            ..TenderInfo::default()
        };
        assert_close(discount_percent(&tender), 15.0);
        assert_close(discounted_amount(2_000_000.0, 15.0), 1_700_000.0);
    }

    #[test]
    fn test_discount_without_estimate_is_zero() {
        let tender = TenderInfo {
            contract_amount: 1_000.0,
            ..TenderInfo::default()
        };
        assert_close(discount_percent(&tender), 0.0);
    }
}
