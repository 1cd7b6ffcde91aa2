//! Progress payment (hakediş) schedule.
//!
//! Each certificate states the cumulative value of work done to date; the
//! amount earned in a period is the difference to the previous certificate.

use crate::core::aggregation::percent_of_total;
use crate::models::ProgressPayment;
use chrono::NaiveDate;

/// One line of the payment schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentScheduleRow {
    /// Certificate number
    pub number: u32,
    /// Certificate date
    pub date: Option<NaiveDate>,
    /// Free-text note
    pub description: String,
    /// Value of work done to date
    pub cumulative_amount: f64,
    /// Cumulative amount of the previous certificate
    pub previous_amount: f64,
    /// May be negative when a certificate corrects an earlier one
    pub period_amount: f64,
    /// Cumulative amount as a share of the contract amount
    pub cumulative_percent: f64,
}

/// Builds the schedule ordered by certificate number.
#[must_use]
pub fn schedule(payments: &[ProgressPayment], contract_amount: f64) -> Vec<PaymentScheduleRow> {
    let mut ordered: Vec<&ProgressPayment> = payments.iter().collect();
    ordered.sort_by_key(|p| p.number);

    let mut previous = 0.0;
    ordered
        .into_iter()
        .map(|p| {
            let row = PaymentScheduleRow {
                number: p.number,
                date: p.date,
                description: p.description.clone(),
                cumulative_amount: p.cumulative_amount,
                previous_amount: previous,
                period_amount: p.cumulative_amount - previous,
                cumulative_percent: percent_of_total(p.cumulative_amount, contract_amount),
            };
            previous = p.cumulative_amount;
            row
        })
        .collect()
}

/// Contract value not yet certified; never negative.
#[must_use]
pub fn remaining_amount(payments: &[ProgressPayment], contract_amount: f64) -> f64 {
    let certified = payments
        .iter()
        .max_by_key(|p| p.number)
        .map_or(0.0, |p| p.cumulative_amount);
    (contract_amount - certified).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    fn certificate(number: u32, cumulative_amount: f64) -> ProgressPayment {
        ProgressPayment {
            id: number.to_string(),
            number,
            date: NaiveDate::from_ymd_opt(2024, number, 28),
            description: format!("{number} nolu hakediş"),
            cumulative_amount,
        }
    }

    #[test]
    fn test_schedule_periods_from_cumulative() {
        let payments = vec![
            certificate(2, 250_000.0),
            certificate(1, 100_000.0),
            certificate(3, 400_000.0),
        ];
        let rows = schedule(&payments, 1_000_000.0);

        assert_eq!(rows.iter().map(|r| r.number).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_close(rows[0].previous_amount, 0.0);
        assert_close(rows[0].period_amount, 100_000.0);
        assert_close(rows[1].period_amount, 150_000.0);
        assert_close(rows[2].period_amount, 150_000.0);
        assert_close(rows[2].cumulative_percent, 40.0);
        assert_close(remaining_amount(&payments, 1_000_000.0), 600_000.0);
    }

    #[test]
    fn test_schedule_without_contract_amount() {
        let rows = schedule(&[certificate(1, 5_000.0)], 0.0);
        assert_close(rows[0].cumulative_percent, 0.0);
        assert_close(remaining_amount(&[certificate(1, 5_000.0)], 0.0), 0.0);
        assert!(schedule(&[], 100.0).is_empty());
    }
}
