//! Comparative discovery - contract quantities against realized quantities.
//!
//! The contract quantity is the ordinary `quantity` field; the realized
//! quantity is measured on site and counts as zero until entered. A cost
//! increase above 20% of the contract amount exceeds the statutory change
//! limit and is reported as a distinct failure state, never as a bare number.

use crate::core::aggregation::percent_of_total;
use crate::models::{LineItem, Project, WorkList};
use tracing::warn;

/// Statutory ceiling for quantity-driven cost increases, in percent.
pub const OVERRUN_LIMIT_PERCENT: f64 = 20.0;

/// Rounds a percentage to the two decimals it is reported with.
#[must_use]
pub fn round_percent(percent: f64) -> f64 {
    (percent * 100.0).round() / 100.0
}

/// Whether a comparison stays inside the statutory limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStatus {
    /// Increase at or below [`OVERRUN_LIMIT_PERCENT`]
    WithinLimit,
    /// Increase strictly above [`OVERRUN_LIMIT_PERCENT`]
    OverLimit,
}

impl ComparisonStatus {
    /// Judges the increase at two decimals, so `20.000000000000018` is still 20%.
    #[must_use]
    pub fn from_increase(increase_percent: f64) -> Self {
        if round_percent(increase_percent) > OVERRUN_LIMIT_PERCENT {
            Self::OverLimit
        } else {
            Self::WithinLimit
        }
    }

    /// True for [`ComparisonStatus::OverLimit`].
    #[must_use]
    pub const fn is_over_limit(self) -> bool {
        matches!(self, Self::OverLimit)
    }
}

/// Contract and realized money for one slice of work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variance {
    /// Money at contract quantities
    pub contract_amount: f64,
    /// Money at realized quantities
    pub realized_amount: f64,
    /// `realized - contract`
    pub delta: f64,
    /// Increase relative to the contract amount, in percent
    pub increase_percent: f64,
    /// Verdict against the limit
    pub status: ComparisonStatus,
}

impl Variance {
    /// Computes delta and increase; the increase is 0 when the contract amount is 0.
    #[must_use]
    pub fn new(contract_amount: f64, realized_amount: f64) -> Self {
        let delta = realized_amount - contract_amount;
        let increase_percent = if contract_amount > 0.0 {
            delta / contract_amount * 100.0
        } else {
            0.0
        };
        Self {
            contract_amount,
            realized_amount,
            delta,
            increase_percent,
            status: ComparisonStatus::from_increase(increase_percent),
        }
    }

    /// Shorthand for the status check.
    #[must_use]
    pub const fn is_over_limit(&self) -> bool {
        self.status.is_over_limit()
    }
}

/// One compared line item.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// List the item belongs to
    pub list: WorkList,
    /// Line item id
    pub id: String,
    /// Unit-price code
    pub code: String,
    /// Item description
    pub description: String,
    /// Unit symbol
    pub unit: String,
    /// Unit price in lira
    pub unit_price: f64,
    /// Contracted quantity
    pub contract_quantity: f64,
    /// Measured quantity, zero until entered
    pub realized_quantity: f64,
    /// Money comparison for the row
    pub variance: Variance,
}

impl ComparisonRow {
    /// Compares one item.
    #[must_use]
    pub fn from_item(list: WorkList, item: &LineItem) -> Self {
        Self {
            list,
            id: item.id.clone(),
            code: item.code.clone(),
            description: item.description.clone(),
            unit: item.unit.clone(),
            unit_price: item.unit_price,
            contract_quantity: item.quantity,
            realized_quantity: item.realized_quantity.unwrap_or(0.0),
            variance: Variance::new(item.amount(), item.realized_amount()),
        }
    }
}

/// Rows plus the project-level variance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    /// One row per compared item
    pub rows: Vec<ComparisonRow>,
    /// Project-level variance over all rows
    pub totals: Variance,
}

impl ComparisonReport {
    /// Rows whose own increase exceeds the limit.
    pub fn over_limit_rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().filter(|row| row.variance.is_over_limit())
    }

    /// Share of each row's realized amount in the realized total.
    #[must_use]
    pub fn realized_share(&self, row: &ComparisonRow) -> f64 {
        percent_of_total(row.variance.realized_amount, self.totals.realized_amount)
    }
}

/// Compares every line item that is not carried by a subcontractor.
#[must_use]
pub fn compare_project(project: &Project) -> ComparisonReport {
    let rows: Vec<ComparisonRow> = project
        .all_items()
        .filter(|(_, item)| !item.is_subcontracted())
        .map(|(list, item)| ComparisonRow::from_item(list, item))
        .collect();

    let contract_total = rows.iter().map(|r| r.variance.contract_amount).sum();
    let realized_total = rows.iter().map(|r| r.variance.realized_amount).sum();
    let totals = Variance::new(contract_total, realized_total);

    if totals.is_over_limit() {
        warn!(
            "Realized cost exceeds contract by {:.2}% (limit {}%)",
            totals.increase_percent, OVERRUN_LIMIT_PERCENT
        );
    }

    ComparisonReport { rows, totals }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{assert_close, catalog_item, project_with_items};

    #[test]
    fn test_comparison_scenario_over_limit() {
        let v = Variance::new(100.0 * 10.0, 125.0 * 10.0);
        assert_close(v.contract_amount, 1000.0);
        assert_close(v.realized_amount, 1250.0);
        assert_close(v.delta, 250.0);
        assert_close(v.increase_percent, 25.0);
        assert!(v.is_over_limit());
    }

    #[test]
    fn test_exactly_twenty_percent_is_within_limit() {
        let v = Variance::new(1000.0, 1200.0);
        assert_close(v.increase_percent, 20.0);
        assert_eq!(v.status, ComparisonStatus::WithinLimit);

        assert!(ComparisonStatus::from_increase(20.01).is_over_limit());
        assert!(!ComparisonStatus::from_increase(20.0).is_over_limit());
        assert!(!ComparisonStatus::from_increase(20.004).is_over_limit());
    }

    #[test]
    fn test_exact_twenty_percent_with_fractional_prices() {
        // 0.5 -> 0.6000000000000001 computes as 20.000000000000018%
        let v = Variance::new(5.0 * 0.1, 6.0 * 0.1);
        assert_close(v.increase_percent, 20.0);
        assert_eq!(v.status, ComparisonStatus::WithinLimit);

        for qty in 5..200 {
            for cents in (10..2000).step_by(7) {
                let price = f64::from(cents) / 100.0;
                let contract = f64::from(qty) * price;
                let realized = f64::from(qty) * 1.2 * price;
                assert!(
                    !Variance::new(contract, realized).is_over_limit(),
                    "qty {qty} price {price}"
                );
            }
        }

        let mut item = catalog_item("a", "Kaba", 0.1, 5.0);
        item.realized_quantity = Some(6.0);
        let report = compare_project(&project_with_items(vec![item], vec![]));
        assert_eq!(report.over_limit_rows().count(), 0);
        assert!(!report.totals.is_over_limit());
    }

    #[test]
    fn test_zero_contract_means_zero_increase() {
        for realized in [0.0, 1.0, 1_000_000.0] {
            let v = Variance::new(0.0, realized);
            assert_close(v.increase_percent, 0.0);
            assert!(!v.is_over_limit());
        }
    }

    #[test]
    fn test_decrease_is_negative_and_within_limit() {
        let v = Variance::new(1000.0, 600.0);
        assert_close(v.increase_percent, -40.0);
        assert!(!v.is_over_limit());
    }

    #[test]
    fn test_compare_project_skips_subcontracted_and_defaults_realized() {
        let mut measured = catalog_item("a", "Kaba", 10.0, 100.0);
        measured.realized_quantity = Some(125.0);
        let unmeasured = catalog_item("b", "Kaba", 5.0, 10.0);
        let mut sub = catalog_item("c", "Kaba", 1000.0, 1.0);
        sub.subcontractor_id = Some("t1".to_string());

        let project = project_with_items(vec![measured, unmeasured, sub], vec![]);
        let report = compare_project(&project);

        assert_eq!(report.rows.len(), 2);
        assert_close(report.rows[1].realized_quantity, 0.0);
        assert_close(report.rows[1].variance.delta, -50.0);
        assert_close(report.totals.contract_amount, 1050.0);
        assert_close(report.totals.realized_amount, 1250.0);
        assert_eq!(report.over_limit_rows().count(), 1);
        assert!(!report.totals.is_over_limit());
        assert_close(report.realized_share(&report.rows[0]), 100.0);
    }
}
