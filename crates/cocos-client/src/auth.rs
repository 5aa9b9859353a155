//! Second-factor challenge plumbing.
//!
//! When the factor status reports a pending challenge and no TOTP secret
//! is configured, the verification code must come from outside. The
//! provider is injected so the state machine stays testable without a
//! terminal; the login flow bounds the wait with the configured
//! interactive timeout.

use std::future::Future;
use std::pin::Pin;

use crate::ApiError;

/// Challenge the remote issued during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeInfo {
    pub factor_id: String,
    pub challenge_id: String,
    /// Remote factor kind, e.g. `totp`, `sms`, `email`.
    pub factor_type: String,
}

/// Source of verification codes for non-TOTP challenges.
///
/// No session transition happens until this future resolves; the login
/// flow wraps it in the configured interactive timeout.
pub trait ChallengeCodeProvider: Send + Sync {
    fn code<'a>(
        &'a self,
        challenge: &'a ChallengeInfo,
    ) -> Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send + 'a>>;
}

/// Provider answering a pre-agreed code; useful in tests and scripted
/// environments.
#[derive(Debug, Clone)]
pub struct StaticCodeProvider {
    code: String,
}

impl StaticCodeProvider {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl ChallengeCodeProvider for StaticCodeProvider {
    fn code<'a>(
        &'a self,
        challenge: &'a ChallengeInfo,
    ) -> Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send + 'a>> {
        let _ = challenge;
        let code = self.code.clone();
        Box::pin(async move { Ok(code) })
    }
}
