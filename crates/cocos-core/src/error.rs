use thiserror::Error;

/// Validation and contract errors exposed by `cocos-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("unknown currency '{value}', expected one of ARS, USD, EXT, INDISTINTO")]
    UnknownCurrency { value: String },
    #[error("unknown settlement '{value}', expected one of CI, 24hs, 48hs")]
    UnknownSettlement { value: String },
    #[error("unknown segment '{value}', expected one of C, FCI, O, U")]
    UnknownSegment { value: String },
    #[error("unknown order side '{value}', expected BUY or SELL")]
    UnknownOrderSide { value: String },
    #[error("unknown order type '{value}', expected LIMIT or MARKET")]
    UnknownOrderType { value: String },
    #[error("unknown instrument type '{value}'")]
    UnknownInstrumentType { value: String },
    #[error("unknown instrument subtype '{value}'")]
    UnknownInstrumentSubType { value: String },
    #[error("unknown performance timeframe '{value}', expected daily, historical or range")]
    UnknownTimeframe { value: String },

    #[error("unresolved settlement code '{code}' in long ticker '{long_ticker}'")]
    UnresolvedSettlementCode { code: String, long_ticker: String },
    #[error("unresolved segment code '{code}' in long ticker '{long_ticker}'")]
    UnresolvedSegmentCode { code: String, long_ticker: String },
    #[error("unresolved currency code '{code}' in long ticker '{long_ticker}'")]
    UnresolvedCurrencyCode { code: String, long_ticker: String },
    #[error("long ticker '{value}' must have exactly five dash-separated fields")]
    MalformedLongTicker { value: String },
    #[error("long ticker '{value}' carries unexpected venue '{venue}', expected CT")]
    UnexpectedVenue { value: String, venue: String },

    #[error("market order must not carry an explicit price")]
    MarketOrderWithPrice,
    #[error("market order must not carry both quantity and amount")]
    MarketOrderOverspecified,
    #[error("limit order requires a price")]
    LimitOrderWithoutPrice,
    #[error("order requires a quantity or an amount")]
    OrderWithoutSize,
    #[error("order field '{field}' must be a finite positive number")]
    NonPositiveOrderField { field: &'static str },

    #[error("instrument type '{instrument_type}' does not admit subtype '{subtype}'")]
    InvalidListCombination {
        instrument_type: String,
        subtype: String,
    },

    #[error("no price supplied and no asking price found for '{long_ticker}'")]
    UnpricedInstrument { long_ticker: String },
    #[error("bank account '{cbu_cvu}' is not registered; add it first")]
    UnknownBankAccount { cbu_cvu: String },

    #[error("insufficient funds: order total {required:.2} exceeds available {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },
    #[error("insufficient stock: requested {requested} exceeds available {available}")]
    InsufficientStock { requested: f64, available: f64 },

    #[error("date '{value}' must match yyyy-MM-dd")]
    InvalidDate { value: String },
    #[error("search query must be at least 2 characters long")]
    QueryTooShort,
}
