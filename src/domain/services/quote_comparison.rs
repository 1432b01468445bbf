//! # Quote Comparison
//!
//! Picks and ranks supplier quotes on an RFQ by price per unit.

use crate::domain::entities::Quote;
use crate::domain::errors::DomainResult;
use crate::domain::services::ranking::{percentage_diff, rank_position};
use crate::domain::value_objects::PriceTier;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A quote with its position on the RFQ's quote board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuote {
    /// The quote being ranked.
    pub quote: Quote,
    /// The rank (1 = cheapest per unit). Equal prices share a rank.
    pub rank: usize,
    /// Percent above the lowest price per unit.
    pub diff_from_lowest: Decimal,
    /// Price-competitiveness bucket.
    pub tier: PriceTier,
}

impl RankedQuote {
    /// Returns true if this quote ties for the lowest price.
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RankedQuote(#{} {} {}/unit +{}%)",
            self.rank,
            self.quote.supplier_name(),
            self.quote.price_per_unit(),
            self.diff_from_lowest
        )
    }
}

/// Returns the quote with the minimum price per unit.
///
/// On ties the earliest quote in `quotes` wins. Returns `None` for an empty
/// slice.
#[must_use]
pub fn get_lowest_quote(quotes: &[Quote]) -> Option<&Quote> {
    quotes.iter().min_by_key(|q| q.price_per_unit())
}

/// Ranks quotes cheapest first.
///
/// Equal prices share a rank; among them the faster delivery comes first,
/// then the earlier submission.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn compare_quotes(quotes: &[Quote]) -> DomainResult<Vec<RankedQuote>> {
    let Some(lowest) = get_lowest_quote(quotes).map(|q| q.price_per_unit().get()) else {
        return Ok(Vec::new());
    };
    let prices: Vec<Decimal> = quotes.iter().map(|q| q.price_per_unit().get()).collect();

    let mut sorted: Vec<&Quote> = quotes.iter().collect();
    sorted.sort_by(|a, b| {
        a.price_per_unit()
            .cmp(&b.price_per_unit())
            .then_with(|| a.delivery_days().cmp(&b.delivery_days()))
            .then_with(|| a.submitted_at().cmp(&b.submitted_at()))
    });

    sorted
        .into_iter()
        .map(|quote| {
            let price = quote.price_per_unit().get();
            let diff_from_lowest = percentage_diff(price, lowest)?;
            Ok(RankedQuote {
                quote: quote.clone(),
                rank: rank_position(&prices, price)?,
                diff_from_lowest,
                tier: PriceTier::classify(diff_from_lowest, price == lowest),
            })
        })
        .collect()
}
