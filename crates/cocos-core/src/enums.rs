//! Closed value sets shared across the broker API surface.
//!
//! Every enum maps bidirectionally to the wire strings the remote API
//! understands. Parsing an unknown wire string fails explicitly with a
//! [`ValidationError`] instead of defaulting silently.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Pesos,
    Usd,
    Cable,
    All,
}

impl Currency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pesos => "ARS",
            Self::Usd => "USD",
            Self::Cable => "EXT",
            Self::All => "INDISTINTO",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "ARS" => Ok(Self::Pesos),
            "USD" => Ok(Self::Usd),
            "EXT" => Ok(Self::Cable),
            "INDISTINTO" => Ok(Self::All),
            other => Err(ValidationError::UnknownCurrency {
                value: other.to_owned(),
            }),
        }
    }

    /// BYMA currency code used inside long tickers. Cable instruments
    /// settle off-venue and carry no code.
    pub const fn byma_code(self) -> &'static str {
        match self {
            Self::Pesos => "ARS",
            Self::Usd => "USD",
            Self::Cable | Self::All => "",
        }
    }

    pub fn from_byma_code(code: &str) -> Option<Self> {
        match code {
            "ARS" => Some(Self::Pesos),
            "USD" => Some(Self::Usd),
            _ => None,
        }
    }
}

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(ValidationError::UnknownOrderSide {
                value: other.to_owned(),
            }),
        }
    }
}

/// Order pricing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "LIMIT" => Ok(Self::Limit),
            "MARKET" => Ok(Self::Market),
            other => Err(ValidationError::UnknownOrderType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Settlement tenor: business days until the trade settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Settlement {
    T0,
    T1,
    T2,
}

impl Settlement {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::T0 => "CI",
            Self::T1 => "24hs",
            Self::T2 => "48hs",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "CI" => Ok(Self::T0),
            "24hs" => Ok(Self::T1),
            "48hs" => Ok(Self::T2),
            other => Err(ValidationError::UnknownSettlement {
                value: other.to_owned(),
            }),
        }
    }

    /// BYMA settlement code used inside long tickers.
    pub const fn byma_code(self) -> &'static str {
        match self {
            Self::T0 => "0001",
            Self::T1 => "0002",
            Self::T2 => "0003",
        }
    }

    pub fn from_byma_code(code: &str) -> Option<Self> {
        match code {
            "0001" => Some(Self::T0),
            "0002" => Some(Self::T1),
            "0003" => Some(Self::T2),
            _ => None,
        }
    }
}

/// Market sub-venue classification.
///
/// FCI instruments are addressed by bare ticker; options and repo carry
/// their own segment codes inside the long ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Segment {
    Default,
    Fci,
    Options,
    Repo,
}

impl Segment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "C",
            Self::Fci => "FCI",
            Self::Options => "O",
            Self::Repo => "U",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "C" => Ok(Self::Default),
            "FCI" => Ok(Self::Fci),
            "O" => Ok(Self::Options),
            "U" => Ok(Self::Repo),
            other => Err(ValidationError::UnknownSegment {
                value: other.to_owned(),
            }),
        }
    }

    /// Reverse mapping from a long-ticker segment code. "FCI" never
    /// appears inside a long ticker, so it is not a valid code here.
    pub fn from_ticker_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Default),
            "O" => Some(Self::Options),
            "U" => Some(Self::Repo),
            _ => None,
        }
    }
}

/// Instrument categories accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstrumentType {
    Acciones,
    Bonos,
    Cedears,
    Corp,
    Fci,
    Letras,
    Repo,
}

impl InstrumentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acciones => "ACCIONES",
            Self::Bonos => "BONOS_PUBLICOS",
            Self::Cedears => "CEDEARS",
            Self::Corp => "BONOS_CORP",
            Self::Fci => "FCI",
            Self::Letras => "LETRAS",
            Self::Repo => "CAUCION",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "ACCIONES" => Ok(Self::Acciones),
            "BONOS_PUBLICOS" => Ok(Self::Bonos),
            "CEDEARS" => Ok(Self::Cedears),
            "BONOS_CORP" => Ok(Self::Corp),
            "FCI" => Ok(Self::Fci),
            "LETRAS" => Ok(Self::Letras),
            "CAUCION" => Ok(Self::Repo),
            other => Err(ValidationError::UnknownInstrumentType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Instrument sub-categories accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstrumentSubType {
    Ars,
    Cer,
    Crypto,
    Etf,
    Fixed,
    General,
    Lideres,
    New,
    Otros,
    Pf,
    Prov,
    Top,
    Usd,
    Corp,
    None,
}

impl InstrumentSubType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ars => "NACIONALES_ARS",
            Self::Cer => "CER",
            Self::Crypto => "CRYPTO",
            Self::Etf => "ETF",
            Self::Fixed => "TASA_FIJA",
            Self::General => "GENERAL",
            Self::Lideres => "LIDERES",
            Self::New => "NUEVOS",
            Self::Otros => "OTROS",
            Self::Pf => "PF",
            Self::Prov => "PROVINCIALES",
            Self::Top => "TOP",
            Self::Usd => "NACIONALES_USD",
            Self::Corp => "BONOSC",
            Self::None => "",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "NACIONALES_ARS" => Ok(Self::Ars),
            "CER" => Ok(Self::Cer),
            "CRYPTO" => Ok(Self::Crypto),
            "ETF" => Ok(Self::Etf),
            "TASA_FIJA" => Ok(Self::Fixed),
            "GENERAL" => Ok(Self::General),
            "LIDERES" => Ok(Self::Lideres),
            "NUEVOS" => Ok(Self::New),
            "OTROS" => Ok(Self::Otros),
            "PF" => Ok(Self::Pf),
            "PROVINCIALES" => Ok(Self::Prov),
            "TOP" => Ok(Self::Top),
            "NACIONALES_USD" => Ok(Self::Usd),
            "BONOSC" => Ok(Self::Corp),
            "" => Ok(Self::None),
            other => Err(ValidationError::UnknownInstrumentSubType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Performance report windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PerformanceTimeframe {
    Daily,
    Historical,
    Range,
}

impl PerformanceTimeframe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Historical => "historical",
            Self::Range => "range",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "daily" => Ok(Self::Daily),
            "historical" => Ok(Self::Historical),
            "range" => Ok(Self::Range),
            other => Err(ValidationError::UnknownTimeframe {
                value: other.to_owned(),
            }),
        }
    }
}

macro_rules! wire_enum_conversions {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.as_str().to_owned()
                }
            }

            impl TryFrom<String> for $name {
                type Error = ValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(&value)
                }
            }
        )+
    };
}

wire_enum_conversions!(
    Currency,
    OrderSide,
    OrderType,
    Settlement,
    Segment,
    InstrumentType,
    InstrumentSubType,
    PerformanceTimeframe,
);
