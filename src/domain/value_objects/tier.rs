//! # Price Tier
//!
//! Qualitative bucket for a bid's distance from the lowest competing bid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive, percent) of the "Very Competitive" tier.
pub const VERY_COMPETITIVE_MAX_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Upper bound (inclusive, percent) of the "Competitive" tier.
pub const COMPETITIVE_MAX_PCT: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Qualitative tier of a bid relative to the lowest bid on the same order.
///
/// # Examples
///
/// ```
/// use marketplace_rfq::domain::value_objects::PriceTier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(PriceTier::classify(Decimal::ZERO, true), PriceTier::BestPrice);
/// assert_eq!(PriceTier::classify(Decimal::new(5, 0), false), PriceTier::VeryCompetitive);
/// assert_eq!(PriceTier::classify(Decimal::new(20, 0), false).to_string(), "High Price");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    /// The bid is (one of) the lowest.
    #[serde(rename = "Best Price")]
    BestPrice,
    /// Within 5% of the lowest bid.
    #[serde(rename = "Very Competitive")]
    VeryCompetitive,
    /// More than 5% and at most 15% above the lowest bid.
    #[serde(rename = "Competitive")]
    Competitive,
    /// More than 15% above the lowest bid.
    #[serde(rename = "High Price")]
    HighPrice,
}

impl PriceTier {
    /// Classifies a bid from its percentage distance to the lowest bid.
    ///
    /// `is_lowest` wins over the percentage. Otherwise:
    /// `diff ≤ 5` → very competitive, `5 < diff ≤ 15` → competitive,
    /// `diff > 15` → high price.
    #[must_use]
    pub fn classify(diff_from_lowest_pct: Decimal, is_lowest: bool) -> Self {
        if is_lowest {
            Self::BestPrice
        } else if diff_from_lowest_pct <= VERY_COMPETITIVE_MAX_PCT {
            Self::VeryCompetitive
        } else if diff_from_lowest_pct <= COMPETITIVE_MAX_PCT {
            Self::Competitive
        } else {
            Self::HighPrice
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BestPrice => "Best Price",
            Self::VeryCompetitive => "Very Competitive",
            Self::Competitive => "Competitive",
            Self::HighPrice => "High Price",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pct(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }

    #[test]
    fn boundaries() {
        assert_eq!(PriceTier::classify(pct(50, 1), false), PriceTier::VeryCompetitive);
        assert_eq!(PriceTier::classify(pct(50001, 4), false), PriceTier::Competitive);
        assert_eq!(PriceTier::classify(pct(150, 1), false), PriceTier::Competitive);
        assert_eq!(PriceTier::classify(pct(150001, 4), false), PriceTier::HighPrice);
    }

    #[test]
    fn lowest_overrides_percentage() {
        assert_eq!(PriceTier::classify(pct(99, 0), true), PriceTier::BestPrice);
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&PriceTier::VeryCompetitive).unwrap(),
            "\"Very Competitive\""
        );
    }
}
