//! Generic request executor with the remote's status-code policy.
//!
//! Every facade operation funnels through [`RestClient::request`]: build
//! the absolute URL, snapshot the session headers, dispatch, parse the
//! body as JSON regardless of status (the API returns structured JSON
//! even for errors), then apply the policy — one retry on 401, hard
//! failure on 500, audit-log append on 200.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::http::{HttpClient, HttpMethod, HttpRequest};
use crate::session::{AuditEntry, AuthState, Session};
use crate::ApiError;

/// Request body accepted by the executor. The 401 retry is always sent
/// without a body.
#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    Empty,
    Json(Value),
}

pub(crate) struct RestClient {
    base_url: String,
    timeout_ms: u64,
    http: Arc<dyn HttpClient>,
    session: Mutex<Session>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64, http: Arc<dyn HttpClient>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            timeout_ms,
            http,
            session: Mutex::new(Session::new()),
        }
    }

    /// Dispatches one API call and applies the status-code policy.
    ///
    /// `query` is a pre-encoded query string appended to the path (the
    /// token endpoint's `grant_type=password`); most paths carry their
    /// query inline from the endpoint table.
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        query: Option<&str>,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        let url = match query {
            Some(query) => format!("{}{path}?{query}", self.base_url),
            None => format!("{}{path}", self.base_url),
        };

        let mut is_retry = false;
        loop {
            let headers = self.lock().headers.clone();
            let mut request = HttpRequest::new(method, url.clone())
                .with_headers(&headers)
                .with_timeout_ms(self.timeout_ms);
            if !is_retry {
                if let RequestBody::Json(value) = &body {
                    request = request.with_body(value.to_string());
                }
            }

            debug!(%method, path, is_retry, "dispatching api request");
            let response = self
                .http
                .execute(request)
                .await
                .map_err(|error| ApiError::Transport(error.message().to_owned()))?;

            let parsed: Value = serde_json::from_str(&response.body)
                .map_err(|error| ApiError::Decode(format!("{path}: {error}")))?;

            match response.status {
                401 if !is_retry => {
                    warn!(path, "unauthorized response, retrying once without body");
                    is_retry = true;
                }
                401 => {
                    return Err(ApiError::Authentication(format!(
                        "401 persisted after retry on {path}"
                    )));
                }
                500 => return Err(ApiError::Server { body: parsed }),
                200 => {
                    self.record_success(path, &parsed);
                    return Ok(parsed);
                }
                status => {
                    debug!(path, status, "non-200 response passed through");
                    return Ok(parsed);
                }
            }
        }
    }

    fn record_success(&self, path: &str, response: &Value) {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("unknown"));
        debug!(path, %timestamp, "api call succeeded");
        self.lock().audit.push(AuditEntry {
            path: path.to_owned(),
            timestamp,
            response: response.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().expect("session lock poisoned")
    }

    // Session accessors; all mutation is serialized behind the mutex.

    pub fn update_headers<I, K, V>(&self, updates: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.lock().update_headers(updates);
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.lock().headers.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn state(&self) -> AuthState {
        self.lock().state
    }

    pub fn set_state(&self, state: AuthState) {
        self.lock().state = state;
    }

    /// Stores the token and installs/overwrites the bearer header.
    pub fn install_access_token(&self, token: &str) {
        let mut session = self.lock();
        session.access_token = Some(token.to_owned());
        session.update_headers([("authorization", format!("Bearer {token}"))]);
    }

    pub fn account_number(&self) -> String {
        self.lock().account_number.clone()
    }

    /// Stores the account id and installs the account-scoping header.
    pub fn install_account_number(&self, account_number: &str) {
        let mut session = self.lock();
        session.account_number = account_number.to_owned();
        session.update_headers([("x-account-id", account_number)]);
    }

    pub fn connected(&self) -> bool {
        self.lock().connected
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    pub fn push_order(&self, order_number: impl Into<String>) {
        self.lock().orders.push(order_number.into());
    }

    pub fn orders(&self) -> Vec<String> {
        self.lock().orders.clone()
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.lock().audit.clone()
    }
}
