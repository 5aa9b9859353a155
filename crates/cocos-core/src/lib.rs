//! # Cocos Core
//!
//! Domain types and validation for the Cocos Capital broker API client.
//!
//! This crate is pure logic with no I/O:
//!
//! - **Closed enumerations** with bidirectional wire-string mappings
//! - **Long tickers**: composition and decomposition of the
//!   `TICKER-SETTLEMENT-SEGMENT-CT-CURRENCY` identifier
//! - **Order plans** with shape invariants enforced before submission
//! - **List-filter matrix** of legal (instrument type, subtype) pairs
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`combinations`] | Legal instrument list filters |
//! | [`enums`] | Wire enumerations |
//! | [`error`] | Validation error taxonomy |
//! | [`long_ticker`] | Long-ticker codec |
//! | [`order`] | Order plans and invariants |

pub mod combinations;
pub mod enums;
pub mod error;
pub mod long_ticker;
pub mod order;

pub use combinations::{validate_list_parameters, ALLOWED_COMBINATIONS};
pub use enums::{
    Currency, InstrumentSubType, InstrumentType, OrderSide, OrderType, PerformanceTimeframe,
    Segment, Settlement,
};
pub use error::ValidationError;
pub use long_ticker::{LongTicker, VENUE};
pub use order::OrderPlan;
