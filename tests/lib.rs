//! Shared fixtures for the behavior tests: a scripted HTTP transport
//! and the canonical login route set.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::{json, Value};

pub use cocos_client::{
    ApiError, ClientConfig, Cocos, Credentials, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpResponse, TotpSecret,
};
pub use std::sync::Arc;

struct ScriptedRoute {
    needle: &'static str,
    sticky: bool,
    queue: Vec<HttpResponse>,
}

/// Transport answering by URL substring. Sticky routes answer forever;
/// one-shot routes are consumed in order, letting a path change its
/// answer across calls (e.g. 401 then 200). Unmatched requests get a
/// 404 so a missing route fails the test loudly.
pub struct ScriptedTransport {
    routes: Mutex<Vec<ScriptedRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Registers a sticky 200 route.
    pub fn respond(&self, needle: &'static str, body: Value) {
        self.routes.lock().expect("route table").push(ScriptedRoute {
            needle,
            sticky: true,
            queue: vec![HttpResponse::ok_json(body.to_string())],
        });
    }

    /// Registers a one-shot route consumed by the first matching call.
    /// One-shot routes take priority over sticky routes for the same
    /// path because registration order is match order.
    pub fn respond_once(&self, needle: &'static str, status: u16, body: Value) {
        self.routes.lock().expect("route table").push(ScriptedRoute {
            needle,
            sticky: false,
            queue: vec![HttpResponse::with_status(status, body.to_string())],
        });
    }

    /// Registers a one-shot route with a non-JSON body.
    pub fn respond_once_raw(&self, needle: &'static str, status: u16, body: &str) {
        self.routes.lock().expect("route table").push(ScriptedRoute {
            needle,
            sticky: false,
            queue: vec![HttpResponse::with_status(status, body)],
        });
    }

    /// Every request seen so far, oldest first.
    pub fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("request store").clone()
    }

    /// Requests whose URL contains the needle.
    pub fn recorded_for(&self, needle: &str) -> Vec<HttpRequest> {
        self.recorded()
            .into_iter()
            .filter(|request| request.url.contains(needle))
            .collect()
    }
}

impl HttpClient for ScriptedTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let url = request.url.clone();
        self.requests.lock().expect("request store").push(request);

        let mut routes = self.routes.lock().expect("route table");
        let mut response = None;
        for route in routes.iter_mut() {
            if !url.contains(route.needle) || route.queue.is_empty() {
                continue;
            }
            response = Some(if route.sticky {
                route.queue[0].clone()
            } else {
                route.queue.remove(0)
            });
            break;
        }
        let response = response.unwrap_or_else(|| HttpResponse::with_status(404, "{}"));
        Box::pin(async move { Ok(response) })
    }
}

/// Installs the three routes every successful password login needs.
pub fn install_login_routes(transport: &ScriptedTransport) {
    transport.respond("auth/v1/token", json!({"access_token": "tok-1"}));
    transport.respond("auth/v1/factors/default", json!({"required": false}));
    transport.respond("api/v1/users/me", json!({"id_accounts": [11000]}));
    transport.respond("auth/v1/logout", json!({}));
}

pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_base_url("https://api.test/")
        .with_interactive_timeout_ms(1_000)
}

pub fn test_credentials() -> Credentials {
    Credentials::new("user@example.test", "hunter2")
}

/// Logs in over the scripted transport with default test credentials.
pub async fn login(transport: Arc<ScriptedTransport>) -> Cocos {
    Cocos::login_with(test_config(), test_credentials(), transport, None)
        .await
        .expect("scripted login succeeds")
}
