//! Market price research protocol (piyasa fiyat araştırması).
//!
//! Items missing from the official catalog are priced from supplier quotes.
//! The approved unit price is the average of the valid quotes.

use crate::models::MarketResearchItem;

/// One protocol line.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchRow {
    /// Item code
    pub code: String,
    /// Item description
    pub description: String,
    /// Unit symbol
    pub unit: String,
    /// Quantity to be priced
    pub quantity: f64,
    /// Valid quotes used for the price
    pub quote_count: usize,
    /// Lowest valid quote
    pub lowest: f64,
    /// Highest valid quote
    pub highest: f64,
    /// Average of the valid quotes
    pub approved_unit_price: f64,
    /// `approved_unit_price × quantity`
    pub total: f64,
}

/// Evaluates one item; quotes of zero or less are ignored.
#[must_use]
pub fn evaluate(item: &MarketResearchItem) -> ResearchRow {
    let prices: Vec<f64> = item
        .quotes
        .iter()
        .map(|q| q.unit_price)
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    let (lowest, highest, average) = if prices.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let lowest = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        #[allow(clippy::cast_precision_loss)]
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        (lowest, highest, average)
    };

    ResearchRow {
        code: item.code.clone(),
        description: item.description.clone(),
        unit: item.unit.clone(),
        quantity: item.quantity,
        quote_count: prices.len(),
        lowest,
        highest,
        approved_unit_price: average,
        total: average * item.quantity,
    }
}

/// Protocol rows and their grand total.
#[must_use]
pub fn protocol(items: &[MarketResearchItem]) -> (Vec<ResearchRow>, f64) {
    let rows: Vec<ResearchRow> = items.iter().map(evaluate).collect();
    let total = rows.iter().map(|r| r.total).sum();
    (rows, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceQuote;
    use crate::test_utils::assert_close;

    fn quote(supplier: &str, unit_price: f64) -> PriceQuote {
        PriceQuote {
            supplier: supplier.to_string(),
            unit_price,
        }
    }

    #[test]
    fn test_average_of_valid_quotes() {
        let item = MarketResearchItem {
            id: "1".to_string(),
            code: "PFA.01".to_string(),
            description: "Akustik tavan paneli".to_string(),
            unit: "m²".to_string(),
            quantity: 10.0,
            quotes: vec![
                quote("A Yapı", 300.0),
                quote("B Yapı", 360.0),
                quote("C Yapı", 330.0),
                quote("Boş teklif", 0.0),
            ],
        };
        let row = evaluate(&item);
        assert_eq!(row.quote_count, 3);
        assert_close(row.lowest, 300.0);
        assert_close(row.highest, 360.0);
        assert_close(row.approved_unit_price, 330.0);
        assert_close(row.total, 3300.0);

        let (rows, total) = protocol(&[item.clone(), item]);
        assert_eq!(rows.len(), 2);
        assert_close(total, 6600.0);
    }

    #[test]
    fn test_no_quotes_prices_at_zero() {
        let row = evaluate(&MarketResearchItem {
            quantity: 5.0,
            ..MarketResearchItem::default()
        });
        assert_eq!(row.quote_count, 0);
        assert_close(row.approved_unit_price, 0.0);
        assert_close(row.total, 0.0);
    }
}
