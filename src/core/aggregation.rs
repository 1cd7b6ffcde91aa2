//! Aggregation and rollup - subtotals, totals and budget estimates.
//!
//! All functions recompute from line item fields on every call; nothing is
//! cached. Two estimation modes exist side by side and are never merged:
//! [`EstimationMode::FixedRatio`] extrapolates the whole budget from the static
//! and architectural lists, [`EstimationMode::DirectSum`] adds up four real lists.

use crate::models::{LineItem, Project, WorkList};
use indexmap::IndexMap;

/// Share of total cost the static and architectural works stand for in the
/// fixed-ratio estimate.
pub const BUILDING_WORKS_SHARE: f64 = 0.8;
/// Share of the estimated grand total assigned to each installation trade.
pub const INSTALLATION_TRADE_SHARE: f64 = 0.10;

/// Subtotal of one category within a list.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySubtotal {
    /// Category label, or the default one for blank categories
    pub category: String,
    /// Number of items in the group
    pub item_count: usize,
    /// Sum of item amounts
    pub total: f64,
}

/// Groups items by category in first-seen order and sums their amounts.
/// Items without a category fall into [`crate::models::DEFAULT_CATEGORY`].
#[must_use]
pub fn category_subtotals(items: &[LineItem]) -> Vec<CategorySubtotal> {
    let mut groups: IndexMap<&str, (usize, f64)> = IndexMap::new();
    for item in items {
        let entry = groups.entry(item.category_or_default()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += item.amount();
    }
    groups
        .into_iter()
        .map(|(category, (item_count, total))| CategorySubtotal {
            category: category.to_string(),
            item_count,
            total,
        })
        .collect()
}

/// Sum of all item amounts in a list.
#[must_use]
pub fn list_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::amount).sum()
}

/// Percentage of `value` in `grand_total`, 0 whenever either side is not positive.
#[must_use]
pub fn percent_of_total(value: f64, grand_total: f64) -> f64 {
    if value > 0.0 && grand_total > 0.0 {
        let share = value / grand_total * 100.0;
        if share.is_finite() { share } else { 0.0 }
    } else {
        0.0
    }
}

/// Observed totals of the four work lists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TradeTotals {
    /// Sum of the static list
    pub static_total: f64,
    /// Sum of the architectural list
    pub architectural_total: f64,
    /// Sum of the mechanical list
    pub mechanical_total: f64,
    /// Sum of the electrical list
    pub electrical_total: f64,
}

impl TradeTotals {
    /// Sums each list of the project.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            static_total: list_total(&project.static_items),
            architectural_total: list_total(&project.architectural_items),
            mechanical_total: list_total(&project.mechanical_items),
            electrical_total: list_total(&project.electrical_items),
        }
    }

    /// Total of one list.
    #[must_use]
    pub const fn get(&self, list: WorkList) -> f64 {
        match list {
            WorkList::Static => self.static_total,
            WorkList::Architectural => self.architectural_total,
            WorkList::Mechanical => self.mechanical_total,
            WorkList::Electrical => self.electrical_total,
        }
    }

    /// Grand total as observed: the plain sum of every list.
    #[must_use]
    pub fn observed_grand_total(&self) -> f64 {
        self.static_total + self.architectural_total + self.mechanical_total + self.electrical_total
    }
}

/// How the project grand total is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationMode {
    /// Static + architectural taken as 80% of the project; the remaining 20%
    /// split evenly between mechanical and electrical ("Dashboard").
    FixedRatio,
    /// All four trades carry real items; the grand total is their sum
    /// ("ProjectResults").
    DirectSum,
}

impl EstimationMode {
    /// `DirectSum` once either installation list holds items, otherwise `FixedRatio`.
    #[must_use]
    pub fn for_project(project: &Project) -> Self {
        if project.tracks_installation_trades() {
            Self::DirectSum
        } else {
            Self::FixedRatio
        }
    }

    /// Display label shown above the estimate.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FixedRatio => "Oransal tahmin (%80 yapı işleri)",
            Self::DirectSum => "Dört branş toplamı",
        }
    }
}

/// One trade's line in an estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeShare {
    /// List the share belongs to
    pub list: WorkList,
    /// Observed or extrapolated total
    pub total: f64,
    /// Percentage of the grand total
    pub share_percent: f64,
    /// True when the total is extrapolated rather than summed from items
    pub estimated: bool,
}

/// Grand total with a per-trade breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEstimate {
    /// Mode the estimate was computed in
    pub mode: EstimationMode,
    /// Estimated project total
    pub grand_total: f64,
    /// One entry per list, in report order
    pub trades: Vec<TradeShare>,
}

impl BudgetEstimate {
    /// The entry for one list, if present.
    #[must_use]
    pub fn trade(&self, list: WorkList) -> Option<&TradeShare> {
        self.trades.iter().find(|t| t.list == list)
    }
}

/// Fixed-ratio estimate from the static and architectural totals.
///
/// Mechanical and electrical are each 10% of the *estimated* grand total.
#[must_use]
pub fn estimate_fixed_ratio(static_total: f64, architectural_total: f64) -> BudgetEstimate {
    let building_works = static_total + architectural_total;
    let grand_total = if building_works > 0.0 {
        building_works / BUILDING_WORKS_SHARE
    } else {
        0.0
    };
    let installation_total = grand_total * INSTALLATION_TRADE_SHARE;

    let share = |list, total, estimated| TradeShare {
        list,
        total,
        share_percent: percent_of_total(total, grand_total),
        estimated,
    };

    BudgetEstimate {
        mode: EstimationMode::FixedRatio,
        grand_total,
        trades: vec![
            share(WorkList::Static, static_total, false),
            share(WorkList::Architectural, architectural_total, false),
            share(WorkList::Mechanical, installation_total, true),
            share(WorkList::Electrical, installation_total, true),
        ],
    }
}

/// Direct-sum estimate over four real list totals.
#[must_use]
pub fn estimate_direct_sum(totals: &TradeTotals) -> BudgetEstimate {
    let grand_total = totals.observed_grand_total();
    BudgetEstimate {
        mode: EstimationMode::DirectSum,
        grand_total,
        trades: WorkList::ALL
            .into_iter()
            .map(|list| TradeShare {
                list,
                total: totals.get(list),
                share_percent: percent_of_total(totals.get(list), grand_total),
                estimated: false,
            })
            .collect(),
    }
}

/// Estimates with an explicitly chosen mode.
#[must_use]
pub fn estimate_with_mode(project: &Project, mode: EstimationMode) -> BudgetEstimate {
    let totals = TradeTotals::from_project(project);
    match mode {
        EstimationMode::FixedRatio => {
            estimate_fixed_ratio(totals.static_total, totals.architectural_total)
        }
        EstimationMode::DirectSum => estimate_direct_sum(&totals),
    }
}

/// Estimates with the mode the project's populated lists call for.
#[must_use]
pub fn estimate(project: &Project) -> BudgetEstimate {
    estimate_with_mode(project, EstimationMode::for_project(project))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{assert_close, catalog_item, project_with_items};

    #[test]
    fn test_category_subtotals_empty_and_zero() {
        assert!(category_subtotals(&[]).is_empty());
        assert_close(list_total(&[]), 0.0);

        let items = vec![
            catalog_item("a", "Kaba", 100.0, 0.0),
            catalog_item("b", "İnce", 50.0, 0.0),
        ];
        assert!(category_subtotals(&items).iter().all(|s| s.total == 0.0));
        assert_close(list_total(&items), 0.0);
    }

    #[test]
    fn test_category_subtotals_first_seen_order_and_default_bucket() {
        let items = vec![
            catalog_item("a", "Kaba", 10.0, 2.0),
            catalog_item("b", "", 5.0, 1.0),
            catalog_item("c", "İnce", 3.0, 3.0),
            catalog_item("d", "Kaba", 1.0, 5.0),
        ];
        let subtotals = category_subtotals(&items);
        let names: Vec<&str> = subtotals.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Kaba", "Genel", "İnce"]);
        assert_close(subtotals[0].total, 25.0);
        assert_eq!(subtotals[0].item_count, 2);
        assert_close(subtotals[1].total, 5.0);
        assert_close(subtotals[2].total, 9.0);
        assert_close(list_total(&items), 39.0);
    }

    #[test]
    fn test_percent_of_total_guards() {
        assert_close(percent_of_total(25.0, 100.0), 25.0);
        assert_close(percent_of_total(0.0, 100.0), 0.0);
        assert_close(percent_of_total(10.0, 0.0), 0.0);
        assert_close(percent_of_total(-5.0, 100.0), 0.0);
        assert!(percent_of_total(f64::MAX, f64::MIN_POSITIVE).is_finite());
    }

    #[test]
    fn test_fixed_ratio_scenario() {
        let estimate = estimate_fixed_ratio(800_000.0, 200_000.0);
        assert_eq!(estimate.mode, EstimationMode::FixedRatio);
        assert_close(estimate.grand_total, 1_250_000.0);
        assert_close(estimate.trade(WorkList::Electrical).unwrap().total, 125_000.0);
        assert_close(estimate.trade(WorkList::Mechanical).unwrap().total, 125_000.0);
        assert_close(estimate.trade(WorkList::Mechanical).unwrap().share_percent, 10.0);
        assert_close(estimate.trade(WorkList::Static).unwrap().share_percent, 64.0);
        assert!(estimate.trade(WorkList::Electrical).unwrap().estimated);
    }

    #[test]
    fn test_fixed_ratio_zero_input() {
        let estimate = estimate_fixed_ratio(0.0, 0.0);
        assert_close(estimate.grand_total, 0.0);
        assert!(estimate.trades.iter().all(|t| t.total == 0.0 && t.share_percent == 0.0));
    }

    #[test]
    fn test_direct_sum_shares() {
        let totals = TradeTotals {
            static_total: 500.0,
            architectural_total: 300.0,
            mechanical_total: 150.0,
            electrical_total: 50.0,
        };
        let estimate = estimate_direct_sum(&totals);
        assert_close(estimate.grand_total, 1000.0);
        assert_close(estimate.trade(WorkList::Static).unwrap().share_percent, 50.0);
        assert_close(estimate.trade(WorkList::Electrical).unwrap().share_percent, 5.0);
        let total_share: f64 = estimate.trades.iter().map(|t| t.share_percent).sum();
        assert_close(total_share, 100.0);
    }

    #[test]
    fn test_mode_selection_follows_populated_lists() {
        let mut project = project_with_items(
            vec![catalog_item("s", "Kaba", 800.0, 1.0)],
            vec![catalog_item("a", "İnce", 200.0, 1.0)],
        );
        let budget = estimate(&project);
        assert_eq!(budget.mode, EstimationMode::FixedRatio);
        assert_close(budget.grand_total, 1250.0);

        project.mechanical_items.push(catalog_item("m", "Sıhhi", 100.0, 1.0));
        let budget = estimate(&project);
        assert_eq!(budget.mode, EstimationMode::DirectSum);
        assert_close(budget.grand_total, 1100.0);

        // both modes stay callable explicitly
        let forced = estimate_with_mode(&project, EstimationMode::FixedRatio);
        assert_close(forced.grand_total, 1250.0);
    }
}
