//! Long-ticker composition and decomposition.
//!
//! A long ticker encodes instrument, settlement tenor, market segment,
//! venue and currency as `{TICKER}-{SETTLEMENT}-{SEGMENT}-CT-{CURRENCY}`,
//! e.g. `AAPL-0002-C-CT-ARS`. FCI instruments collapse to the bare
//! uppercased ticker and are not round-trippable by design.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Currency, Segment, Settlement, ValidationError};

/// BYMA venue marker, the only venue this client addresses.
pub const VENUE: &str = "CT";

/// Decomposed long ticker with every field resolved to a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongTicker {
    ticker: String,
    settlement: Settlement,
    segment: Segment,
    currency: Currency,
}

impl LongTicker {
    /// Builds the wire representation for a ticker.
    ///
    /// The ticker is uppercased; the FCI segment short-circuits to the
    /// bare ticker. Codes with no venue mapping (Cable currency) render
    /// as empty fields, mirroring the remote convention.
    pub fn compose(
        ticker: &str,
        settlement: Settlement,
        currency: Currency,
        segment: Segment,
    ) -> String {
        let upper = ticker.trim().to_ascii_uppercase();
        if segment == Segment::Fci {
            return upper;
        }
        format!(
            "{upper}-{}-{}-{VENUE}-{}",
            settlement.byma_code(),
            segment.as_str(),
            currency.byma_code()
        )
    }

    /// Parses a wire long ticker back into its components.
    ///
    /// Fails when the field count is wrong, the venue is not `CT`, or a
    /// settlement/segment/currency code does not map back to a known enum
    /// value. Callers that treat an unresolved ticker as a soft miss match
    /// on the error.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = value.split('-').collect();
        let [ticker, settlement_code, segment_code, venue, currency_code] = fields[..] else {
            return Err(ValidationError::MalformedLongTicker {
                value: value.to_owned(),
            });
        };

        if ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if venue != VENUE {
            return Err(ValidationError::UnexpectedVenue {
                value: value.to_owned(),
                venue: venue.to_owned(),
            });
        }

        let settlement = Settlement::from_byma_code(settlement_code).ok_or_else(|| {
            ValidationError::UnresolvedSettlementCode {
                code: settlement_code.to_owned(),
                long_ticker: value.to_owned(),
            }
        })?;
        let segment = Segment::from_ticker_code(segment_code).ok_or_else(|| {
            ValidationError::UnresolvedSegmentCode {
                code: segment_code.to_owned(),
                long_ticker: value.to_owned(),
            }
        })?;
        let currency = Currency::from_byma_code(currency_code).ok_or_else(|| {
            ValidationError::UnresolvedCurrencyCode {
                code: currency_code.to_owned(),
                long_ticker: value.to_owned(),
            }
        })?;

        Ok(Self {
            ticker: ticker.to_ascii_uppercase(),
            settlement,
            segment,
            currency,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub const fn settlement(&self) -> Settlement {
        self.settlement
    }

    pub const fn segment(&self) -> Segment {
        self.segment
    }

    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Re-renders the wire representation.
    pub fn as_wire(&self) -> String {
        Self::compose(&self.ticker, self.settlement, self.currency, self.segment)
    }
}

impl Display for LongTicker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_wire())
    }
}

impl From<LongTicker> for String {
    fn from(value: LongTicker) -> Self {
        value.as_wire()
    }
}

impl TryFrom<String> for LongTicker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_uppercases_and_maps_codes() {
        assert_eq!(
            LongTicker::compose("aapl", Settlement::T1, Currency::Pesos, Segment::Default),
            "AAPL-0002-C-CT-ARS"
        );
        assert_eq!(
            LongTicker::compose("googd", Settlement::T0, Currency::Usd, Segment::Default),
            "GOOGD-0001-C-CT-USD"
        );
        assert_eq!(
            LongTicker::compose(
                "GFGC500.JU",
                Settlement::T2,
                Currency::Pesos,
                Segment::Options
            ),
            "GFGC500.JU-0003-O-CT-ARS"
        );
    }

    #[test]
    fn fci_segment_collapses_to_bare_ticker() {
        assert_eq!(
            LongTicker::compose("cocoa", Settlement::T0, Currency::Pesos, Segment::Fci),
            "COCOA"
        );
    }

    #[test]
    fn round_trip_recovers_all_non_fci_components() {
        for settlement in [Settlement::T0, Settlement::T1, Settlement::T2] {
            for segment in [Segment::Default, Segment::Options, Segment::Repo] {
                for currency in [Currency::Pesos, Currency::Usd] {
                    let wire = LongTicker::compose("AL30", settlement, currency, segment);
                    let parsed = LongTicker::parse(&wire).expect("round-trippable ticker");
                    assert_eq!(parsed.ticker(), "AL30");
                    assert_eq!(parsed.settlement(), settlement);
                    assert_eq!(parsed.segment(), segment);
                    assert_eq!(parsed.currency(), currency);
                    assert_eq!(parsed.as_wire(), wire);
                }
            }
        }
    }

    #[test]
    fn parse_rejects_unknown_settlement_code() {
        let error =
            LongTicker::parse("AL30-0004-C-CT-ARS").expect_err("unknown settlement code");
        assert!(matches!(
            error,
            ValidationError::UnresolvedSettlementCode { .. }
        ));
    }

    #[test]
    fn parse_rejects_unknown_segment_code() {
        let error = LongTicker::parse("AL30-0001-Z-CT-ARS").expect_err("unknown segment code");
        assert!(matches!(
            error,
            ValidationError::UnresolvedSegmentCode { .. }
        ));
    }

    #[test]
    fn parse_rejects_wrong_field_count_and_venue() {
        assert!(matches!(
            LongTicker::parse("AL30-0001-C-ARS"),
            Err(ValidationError::MalformedLongTicker { .. })
        ));
        assert!(matches!(
            LongTicker::parse("AL30-0001-C-XX-ARS"),
            Err(ValidationError::UnexpectedVenue { .. })
        ));
    }

    #[test]
    fn bare_fci_ticker_does_not_parse_back() {
        assert!(LongTicker::parse("COCOA").is_err());
    }
}
