//! Asynchronous client for the Cocos Capital brokerage REST API.
//!
//! The entry point is [`Cocos`]: construction performs the whole login
//! flow (password token, optional second factor, account scoping) and
//! only hands back a client once the session is usable. All account,
//! market-data and order operations live on that one type; domain
//! vocabulary (currencies, settlements, long tickers, order plans)
//! comes from the `cocos-core` crate and is re-exported here.
//!
//! | Module      | Responsibility                                      |
//! |-------------|-----------------------------------------------------|
//! | `client`    | The `Cocos` facade and the login state machine      |
//! | `rest`      | Request executor with the remote status-code policy |
//! | `http`      | Transport abstraction and the reqwest adapter       |
//! | `endpoints` | Endpoint table, logical operation to URL path       |
//! | `auth`      | Second-factor challenge plumbing                    |
//! | `totp`      | RFC 6238 one-time codes for TOTP factors            |
//! | `config`    | Client configuration and credentials                |
//! | `session`   | Session state, auth progress and the audit log      |
//! | `error`     | The `ApiError` taxonomy                             |
//!
//! The HTTP transport is injected behind the [`HttpClient`] trait, so
//! every flow in this crate is exercisable against a scripted transport
//! without a network.

mod auth;
mod client;
mod config;
pub mod endpoints;
mod error;
mod http;
mod rest;
mod session;
mod totp;

pub use auth::{ChallengeCodeProvider, ChallengeInfo, StaticCodeProvider};
pub use client::Cocos;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL, PUBLIC_API_KEY};
pub use error::ApiError;
pub use http::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use session::{AuditEntry, AuthState};
pub use totp::TotpSecret;

pub use cocos_core::{
    validate_list_parameters, Currency, InstrumentSubType, InstrumentType, LongTicker,
    OrderPlan, OrderSide, OrderType, PerformanceTimeframe, Segment, Settlement,
    ValidationError, ALLOWED_COMBINATIONS, VENUE,
};
