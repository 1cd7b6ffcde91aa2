//! Subcontractor ledger.
//!
//! A subcontractor's work is every line item tagged with its id, across all
//! lists. Balance is `total_work − total_paid`: a positive balance is debt the
//! contracting firm still owes the subcontractor (borç), a negative balance
//! means it has been overpaid (alacak).

use crate::models::{LineItem, Payment, Project, Subcontractor};

/// Sign of a subcontractor balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// We owe the subcontractor money
    Owed,
    /// The subcontractor has been paid more than the work is worth
    Overpaid,
    /// Work and payments match
    Settled,
}

impl BalanceStatus {
    /// Amounts within half a kuruş count as settled.
    #[must_use]
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.005 {
            Self::Owed
        } else if balance < -0.005 {
            Self::Overpaid
        } else {
            Self::Settled
        }
    }

    /// Turkish label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Owed => "Borç",
            Self::Overpaid => "Alacak",
            Self::Settled => "Kapandı",
        }
    }
}

/// Derived figures for one subcontractor.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcontractorLedger {
    /// Id of the subcontractor
    pub subcontractor_id: String,
    /// Firm name
    pub name: String,
    /// Items assigned to the firm
    pub item_count: usize,
    /// Value of the assigned work
    pub total_work: f64,
    /// Sum of payments made
    pub total_paid: f64,
    /// `total_work - total_paid`; positive means we owe them
    pub balance: f64,
    /// Sign of the balance
    pub status: BalanceStatus,
}

/// Items assigned to a subcontractor.
pub fn items_for<'a>(
    project: &'a Project,
    subcontractor_id: &'a str,
) -> impl Iterator<Item = &'a LineItem> + 'a {
    project
        .all_items()
        .map(|(_, item)| item)
        .filter(move |item| item.subcontractor_id.as_deref() == Some(subcontractor_id))
}

/// Builds the ledger of one subcontractor.
#[must_use]
pub fn ledger_for(project: &Project, subcontractor: &Subcontractor) -> SubcontractorLedger {
    let (item_count, total_work) = items_for(project, &subcontractor.id)
        .fold((0, 0.0), |(count, sum), item| (count + 1, sum + item.amount()));
    let total_paid: f64 = subcontractor.payments.iter().map(|p: &Payment| p.amount).sum();
    let balance = total_work - total_paid;

    SubcontractorLedger {
        subcontractor_id: subcontractor.id.clone(),
        name: subcontractor.name.clone(),
        item_count,
        total_work,
        total_paid,
        balance,
        status: BalanceStatus::from_balance(balance),
    }
}

/// Ledgers of every subcontractor in the project, in stored order.
#[must_use]
pub fn all_ledgers(project: &Project) -> Vec<SubcontractorLedger> {
    project
        .subcontractors
        .iter()
        .map(|s| ledger_for(project, s))
        .collect()
}
