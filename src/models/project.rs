//! Project - every collection the user works on, persisted as one JSON blob.

use super::ledger::{MarketResearchItem, ProgressPayment, Subcontractor};
use super::line_item::{LineItem, WorkList};
use super::numeric::{lenient_date, lenient_id, lenient_non_negative, lenient_string, lenient_vec};
use super::opening::{DoorOpening, WindowOpening};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive project header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Project name
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Contracting administration (idare / işveren)
    #[serde(default, deserialize_with = "lenient_string")]
    pub employer: String,
    /// Site address or region
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    /// Date the project was created
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<NaiveDate>,
}

/// Public tender record (ihale).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderInfo {
    /// Tender registration number (İKN), e.g. "2024/123456"
    #[serde(default, deserialize_with = "lenient_string")]
    pub ikn: String,
    /// Name of the tendered work
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Administration running the tender
    #[serde(default, deserialize_with = "lenient_string")]
    pub administration: String,
    /// Winning contractor
    #[serde(default, deserialize_with = "lenient_string")]
    pub contractor: String,
    /// Tender date
    #[serde(default, deserialize_with = "lenient_date")]
    pub tender_date: Option<NaiveDate>,
    /// Administration's cost estimate (yaklaşık maliyet)
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub approximate_cost: f64,
    /// Signed contract amount
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub contract_amount: f64,
}

/// Node of the location (mahal) tree: block, floor, room.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Label of this level, e.g. "Zemin Kat"
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Nested levels
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<LocationNode>,
}

impl LocationNode {
    /// Full labels of this node and all descendants, depth first,
    /// e.g. `"A Blok / 1. Kat / Salon"`.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        let label = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{prefix} / {}", self.name)
        };
        out.push(label.clone());
        for child in &self.children {
            child.collect_paths(&label, out);
        }
    }
}

/// All tracked collections of one project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Descriptive header
    pub meta: ProjectMeta,
    /// Structural work items
    pub static_items: Vec<LineItem>,
    /// Architectural work items
    pub architectural_items: Vec<LineItem>,
    /// Mechanical installation items
    pub mechanical_items: Vec<LineItem>,
    /// Electrical installation items
    pub electrical_items: Vec<LineItem>,
    /// Door openings
    pub doors: Vec<DoorOpening>,
    /// Window openings
    pub windows: Vec<WindowOpening>,
    /// Subcontractor firms and their payments
    pub subcontractors: Vec<Subcontractor>,
    /// Progress payment certificates
    pub progress_payments: Vec<ProgressPayment>,
    /// Items priced by market research
    pub market_research: Vec<MarketResearchItem>,
    /// Tender record, once entered
    pub tender: Option<TenderInfo>,
    /// Location tree roots
    pub locations: Vec<LocationNode>,
}

impl Project {
    /// Items of one list.
    #[must_use]
    pub fn list(&self, list: WorkList) -> &[LineItem] {
        match list {
            WorkList::Static => &self.static_items,
            WorkList::Architectural => &self.architectural_items,
            WorkList::Mechanical => &self.mechanical_items,
            WorkList::Electrical => &self.electrical_items,
        }
    }

    /// Mutable items of one list.
    pub fn list_mut(&mut self, list: WorkList) -> &mut Vec<LineItem> {
        match list {
            WorkList::Static => &mut self.static_items,
            WorkList::Architectural => &mut self.architectural_items,
            WorkList::Mechanical => &mut self.mechanical_items,
            WorkList::Electrical => &mut self.electrical_items,
        }
    }

    /// Every line item with the list it belongs to, in report order.
    pub fn all_items(&self) -> impl Iterator<Item = (WorkList, &LineItem)> {
        WorkList::ALL
            .into_iter()
            .flat_map(move |list| self.list(list).iter().map(move |item| (list, item)))
    }

    /// Locates an item by id across all lists.
    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<(WorkList, &LineItem)> {
        self.all_items().find(|(_, item)| item.id == id)
    }

    /// Whether the mechanical or electrical list has real items.
    #[must_use]
    pub fn tracks_installation_trades(&self) -> bool {
        !self.mechanical_items.is_empty() || !self.electrical_items.is_empty()
    }

    /// Flattened location labels for pickers.
    #[must_use]
    pub fn location_paths(&self) -> Vec<String> {
        self.locations.iter().flat_map(LocationNode::paths).collect()
    }
}
