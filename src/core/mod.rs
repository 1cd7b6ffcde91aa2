/// Category subtotals, list totals and the two budget estimation modes
pub mod aggregation;
/// Unit-price catalog search service and its ready gate
pub mod catalog;
/// Contract against realized quantities with the 20% overrun check
pub mod comparison;
/// Door and window quantity formulas
pub mod derivation;
/// CSV export sink
pub mod export;
/// Green book ledger rows
pub mod green_book;
/// Adding, editing, removing and merging line items
pub mod line_items;
/// Market price research protocol
pub mod market_research;
/// JSON save and partial restore
pub mod persistence;
/// Progress payment schedule
pub mod progress_payment;
/// Dashboard summary and display formatting
pub mod report;
/// Subcontractor work and payment balances
pub mod subcontractor;
/// Tender discount figures
pub mod tender;
