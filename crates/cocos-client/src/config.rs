//! Client configuration and credentials.

use std::collections::BTreeMap;

use crate::totp::TotpSecret;
use crate::ApiError;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.cocos.capital/";

/// Published anonymous API key the web client ships with. It only
/// identifies the application, not a user, but it can rotate at any
/// time: supply your own through [`Credentials::with_api_key`] or
/// `COCOS_API_KEY` rather than relying on this default.
pub const PUBLIC_API_KEY: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.anonymous";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_INTERACTIVE_TIMEOUT_MS: u64 = 120_000;

/// Transport and timing knobs. Separate from [`Credentials`] so the same
/// configuration can be reused across sessions.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-call HTTP timeout.
    pub request_timeout_ms: u64,
    /// Upper bound on the interactive second-factor wait.
    pub interactive_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            interactive_timeout_ms: DEFAULT_INTERACTIVE_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_interactive_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.interactive_timeout_ms = timeout_ms;
        self
    }
}

/// Immutable login material, supplied once at construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub api_key: Option<String>,
    pub totp_secret: Option<TotpSecret>,
    /// Extra fields forwarded verbatim in the token request body
    /// (e.g. a recaptcha token).
    pub metadata: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            api_key: None,
            totp_secret: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_totp_secret(mut self, secret: TotpSecret) -> Self {
        self.totp_secret = Some(secret);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Reads `COCOS_EMAIL`, `COCOS_PASSWORD` and the optional
    /// `COCOS_API_KEY` / `COCOS_TOTP_SECRET` variables.
    pub fn from_env() -> Result<Self, ApiError> {
        let email = std::env::var("COCOS_EMAIL")
            .map_err(|_| ApiError::Configuration(String::from("COCOS_EMAIL is not set")))?;
        let password = std::env::var("COCOS_PASSWORD")
            .map_err(|_| ApiError::Configuration(String::from("COCOS_PASSWORD is not set")))?;

        let mut credentials = Self::new(email, password);
        if let Ok(api_key) = std::env::var("COCOS_API_KEY") {
            credentials.api_key = Some(api_key);
        }
        if let Ok(secret) = std::env::var("COCOS_TOTP_SECRET") {
            credentials.totp_secret = Some(TotpSecret::from_base32(&secret)?);
        }
        Ok(credentials)
    }

    /// Effective API key: caller-supplied or the bundled public default.
    pub fn effective_api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(PUBLIC_API_KEY)
    }
}
