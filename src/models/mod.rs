//! Domain records the takeoff engine operates on.

/// Subcontractors, payments, progress payments and market research quotes
pub mod ledger;
/// Priced work items and the lists they live in
pub mod line_item;
/// Lenient number parsing for user input and restored files
pub mod numeric;
/// Door and window dimension inputs
pub mod opening;
/// Whole-project container and its metadata
pub mod project;
/// Catalog units of measure
pub mod unit;

pub use ledger::{MarketResearchItem, Payment, PriceQuote, ProgressPayment, Subcontractor};
pub use line_item::{DEFAULT_CATEGORY, ItemSource, ItemTag, LineItem, WorkList};
pub use opening::{DoorOpening, WindowMaterial, WindowOpening};
pub use project::{LocationNode, Project, ProjectMeta, TenderInfo};
pub use unit::Unit;
