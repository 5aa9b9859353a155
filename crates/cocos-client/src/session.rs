//! Mutable session state owned by the facade.

use std::collections::BTreeMap;

/// Authentication progress of a session.
///
/// `FullyAuthenticated` is not terminal; `LoggedOut` is, and a new
/// session must be constructed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    TokenObtained,
    ChallengeRequired,
    ChallengeVerified,
    FullyAuthenticated,
    LoggedOut,
}

/// Diagnostic record of one successful (status 200) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub path: String,
    /// RFC 3339 UTC timestamp taken when the response arrived.
    pub timestamp: String,
    /// Serialized response body.
    pub response: String,
}

/// Session state guarded by the executor's mutex. Headers are
/// cumulative: transitions add or overwrite keys but never clear the
/// map; blanking a specific header is always an explicit step.
#[derive(Debug)]
pub(crate) struct Session {
    pub state: AuthState,
    pub access_token: Option<String>,
    pub account_number: String,
    pub headers: BTreeMap<String, String>,
    pub connected: bool,
    /// Local cache of order ids returned on successful submission.
    /// Append-only and not authoritative.
    pub orders: Vec<String>,
    /// Append-only diagnostic log; never consulted by other components.
    pub audit: Vec<AuditEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: AuthState::Unauthenticated,
            access_token: None,
            account_number: String::new(),
            headers: BTreeMap::new(),
            connected: false,
            orders: Vec::new(),
            audit: Vec::new(),
        }
    }

    /// Installs or overwrites headers. Names are lowercased so later
    /// updates reliably overwrite earlier ones.
    pub fn update_headers<I, K, V>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in updates {
            self.headers
                .insert(name.into().to_ascii_lowercase(), value.into());
        }
    }
}
