//! Dashboard summary and text formatting.
//!
//! Everything here is recomputed from the project on demand and returned as
//! plain data; the formatters turn it into display text for any front end.

use crate::core::{
    aggregation::{BudgetEstimate, TradeTotals, estimate},
    comparison::{ComparisonReport, ComparisonStatus, OVERRUN_LIMIT_PERCENT, compare_project},
    green_book::format_cell,
};
use crate::models::{Project, WorkList};
use serde::Serialize;

/// Headline figures of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Observed per-list totals
    pub totals: TradeTotals,
    /// Estimate in the mode the project calls for
    pub estimate: BudgetEstimate,
    /// Contract against realized, excluding subcontracted work
    pub comparison: ComparisonReport,
    /// Line items across all four lists
    pub item_count: usize,
    /// Door openings with a positive count
    pub door_count: usize,
    /// Window openings with a positive count
    pub window_count: usize,
}

impl DashboardSummary {
    /// Status of the project-level comparison.
    #[must_use]
    pub const fn comparison_status(&self) -> ComparisonStatus {
        self.comparison.totals.status
    }
}

/// Builds the dashboard for a project.
#[must_use]
pub fn generate_dashboard(project: &Project) -> DashboardSummary {
    DashboardSummary {
        totals: TradeTotals::from_project(project),
        estimate: estimate(project),
        comparison: compare_project(project),
        item_count: project.all_items().count(),
        door_count: project.doors.iter().filter(|d| d.is_counted()).count(),
        window_count: project.windows.iter().filter(|w| w.is_counted()).count(),
    }
}

/// Formats an amount in Turkish lira, e.g. `1.250.000,00 ₺`.
///
/// Non-finite amounts are shown as zero.
#[must_use]
pub fn format_lira(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    // Cast safety: rounded cents of a finite, absolute amount; values beyond
    // u64 saturate, which is far outside any construction budget.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02} ₺")
}

/// Formats a percentage with a decimal comma, e.g. `%12,50`.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("%{percent:.2}").replace('.', ",")
}

/// Text bar for a share of the grand total: `[████████░░] %80,00`.
#[must_use]
pub fn format_share_bar(share_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = share_percent.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100] and length is a small display width.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {}",
        "█".repeat(filled),
        "░".repeat(empty),
        format_percent(share_percent)
    )
}

/// Banner for the comparison headline; over-limit states read as a warning.
#[must_use]
pub fn comparison_banner(report: &ComparisonReport) -> String {
    let totals = &report.totals;
    match totals.status {
        ComparisonStatus::OverLimit => format!(
            "UYARI: İş artışı {} ile %{OVERRUN_LIMIT_PERCENT} sınırını aşıyor ({} → {})",
            format_percent(totals.increase_percent),
            format_lira(totals.contract_amount),
            format_lira(totals.realized_amount),
        ),
        ComparisonStatus::WithinLimit => format!(
            "İş artışı {} (sınır %{OVERRUN_LIMIT_PERCENT}): {} → {}",
            format_percent(totals.increase_percent),
            format_lira(totals.contract_amount),
            format_lira(totals.realized_amount),
        ),
    }
}

/// One warning line per item over the limit, whatever the project total says.
#[must_use]
pub fn over_limit_lines(report: &ComparisonReport) -> Vec<String> {
    report
        .over_limit_rows()
        .map(|row| {
            format!(
                "{} {}: {} artış",
                row.code,
                row.description,
                format_percent(row.variance.increase_percent)
            )
        })
        .collect()
}

/// Multi-line dashboard text.
#[must_use]
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut lines = vec![format!(
        "{}: {}",
        summary.estimate.mode.label(),
        format_lira(summary.estimate.grand_total)
    )];

    for trade in &summary.estimate.trades {
        let marker = if trade.estimated { " (tahmini)" } else { "" };
        lines.push(format!(
            "  {:<9} {:>20} {}{marker}",
            trade.list.label(),
            format_lira(trade.total),
            format_share_bar(trade.share_percent, None),
        ));
    }

    lines.push(format!(
        "{} kalem, {} kapı, {} pencere",
        summary.item_count, summary.door_count, summary.window_count
    ));
    lines.push(comparison_banner(&summary.comparison));
    lines.join("\n")
}

/// Export shape of one comparative discovery row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonExportRow {
    /// List the item belongs to
    pub list: WorkList,
    /// Unit-price code
    pub code: String,
    /// Item description
    pub description: String,
    /// Unit symbol
    pub unit: String,
    /// Unit price
    pub unit_price: String,
    /// Contracted quantity
    pub contract_quantity: String,
    /// Measured quantity
    pub realized_quantity: String,
    /// Money at contract quantities
    pub contract_amount: String,
    /// Money at realized quantities
    pub realized_amount: String,
    /// Realized minus contract
    pub delta: String,
    /// Increase in percent
    pub increase_percent: String,
    /// Whether the row exceeds the limit
    pub over_limit: bool,
}

/// Flattens a comparison report into export rows, two decimals per number.
#[must_use]
pub fn comparison_export_rows(report: &ComparisonReport) -> Vec<ComparisonExportRow> {
    report
        .rows
        .iter()
        .map(|row| ComparisonExportRow {
            list: row.list,
            code: row.code.clone(),
            description: row.description.clone(),
            unit: row.unit.clone(),
            unit_price: format_cell(row.unit_price),
            contract_quantity: format_cell(row.contract_quantity),
            realized_quantity: format_cell(row.realized_quantity),
            contract_amount: format_cell(row.variance.contract_amount),
            realized_amount: format_cell(row.variance.realized_amount),
            delta: format_cell(row.variance.delta),
            increase_percent: format_cell(row.variance.increase_percent),
            over_limit: row.variance.is_over_limit(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::aggregation::EstimationMode;
    use crate::test_utils::{catalog_item, door, project_with_items};

    #[test]
    fn test_format_lira() {
        assert_eq!(format_lira(1_250_000.0), "1.250.000,00 ₺");
        assert_eq!(format_lira(999.999), "1.000,00 ₺");
        assert_eq!(format_lira(12.5), "12,50 ₺");
        assert_eq!(format_lira(0.0), "0,00 ₺");
        assert_eq!(format_lira(-1234.5), "-1.234,50 ₺");
        assert_eq!(format_lira(f64::NAN), "0,00 ₺");
    }

    #[test]
    fn test_format_percent_and_bar() {
        assert_eq!(format_percent(12.5), "%12,50");
        assert_eq!(format_share_bar(80.0, None), "[████████░░] %80,00");
        assert_eq!(format_share_bar(150.0, Some(4)), "[████] %150,00");
    }

    #[test]
    fn test_dashboard_for_building_works_only() {
        let mut project = project_with_items(
            vec![catalog_item("s", "Kaba", 800_000.0, 1.0)],
            vec![catalog_item("a", "İnce", 200_000.0, 1.0)],
        );
        project.doors.push(door(90.0, 220.0, 2.0));
        project.doors.push(door(90.0, 220.0, 0.0));

        let summary = generate_dashboard(&project);
        assert_eq!(summary.estimate.mode, EstimationMode::FixedRatio);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.door_count, 1);

        let text = format_dashboard(&summary);
        assert!(text.contains("1.250.000,00 ₺"));
        assert!(text.contains("(tahmini)"));
    }

    #[test]
    fn test_banner_marks_over_limit() {
        let mut item = catalog_item("a", "Kaba", 10.0, 100.0);
        item.realized_quantity = Some(125.0);
        let report = compare_project(&project_with_items(vec![item], vec![]));
        assert!(comparison_banner(&report).starts_with("UYARI"));

        let rows = comparison_export_rows(&report);
        assert_eq!(rows[0].increase_percent, "25.00");
        assert_eq!(rows[0].realized_amount, "1250.00");
        assert!(rows[0].over_limit);

        let within = compare_project(&project_with_items(vec![], vec![]));
        assert!(!comparison_banner(&within).starts_with("UYARI"));
    }

    #[test]
    fn test_item_over_limit_is_listed_inside_a_healthy_total() {
        let mut hot = catalog_item("a", "Kaba", 10.0, 100.0);
        hot.realized_quantity = Some(150.0);
        let mut cold = catalog_item("b", "Kaba", 10.0, 1000.0);
        cold.realized_quantity = Some(1000.0);
        let report = compare_project(&project_with_items(vec![hot, cold], vec![]));

        assert!(!report.totals.is_over_limit());
        assert_eq!(
            over_limit_lines(&report),
            vec!["T.a Test kalemi a: %50,00 artış".to_string()]
        );
        assert!(over_limit_lines(&compare_project(&Project::default())).is_empty());
    }
}
