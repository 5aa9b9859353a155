//! The `Cocos` facade: login state machine and every account, market
//! and order operation.
//!
//! Construction is authentication: [`Cocos::login`] only returns a
//! client once the whole flow has completed (password token, optional
//! second factor, account scoping). Every operation afterwards funnels
//! through the shared request executor, so the status-code policy and
//! the audit log apply uniformly.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};

use cocos_core::{
    Currency, InstrumentSubType, InstrumentType, LongTicker, OrderPlan, OrderSide,
    PerformanceTimeframe, Segment, ValidationError, ALLOWED_COMBINATIONS,
};

use crate::auth::{ChallengeCodeProvider, ChallengeInfo};
use crate::config::{ClientConfig, Credentials};
use crate::endpoints;
use crate::http::{HttpClient, HttpMethod};
use crate::rest::{RequestBody, RestClient};
use crate::session::{AuditEntry, AuthState};
use crate::ApiError;

const USER_AGENT: &str = concat!("cocos-client/", env!("CARGO_PKG_VERSION"));

/// Outcome of the buy-side affordability check.
enum BuyPower {
    Sufficient,
    Insufficient { required: f64, available: f64 },
    /// No explicit price and no asking price in the snapshot.
    Unpriced,
}

/// Authenticated client for the brokerage API.
///
/// The client is `Send + Sync`; session state lives behind the
/// executor's mutex, so a single instance can be shared across tasks.
pub struct Cocos {
    rest: RestClient,
    credentials: Credentials,
    interactive_timeout_ms: u64,
    code_provider: Option<Arc<dyn ChallengeCodeProvider>>,
}

impl std::fmt::Debug for Cocos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cocos").finish_non_exhaustive()
    }
}

impl Cocos {
    /// Logs in against the production API over the bundled HTTP
    /// transport. Second-factor challenges are answered from the
    /// credentials' TOTP secret; without one, a non-TOTP challenge
    /// fails the login.
    pub async fn login(credentials: Credentials) -> Result<Self, ApiError> {
        Self::login_with(
            ClientConfig::default(),
            credentials,
            Arc::new(crate::http::ReqwestHttpClient::new()),
            None,
        )
        .await
    }

    /// Fully parameterized login: custom configuration, injectable
    /// transport and an optional out-of-band code provider for
    /// challenges the TOTP secret cannot answer.
    pub async fn login_with(
        config: ClientConfig,
        credentials: Credentials,
        transport: Arc<dyn HttpClient>,
        code_provider: Option<Arc<dyn ChallengeCodeProvider>>,
    ) -> Result<Self, ApiError> {
        let client = Self {
            rest: RestClient::new(config.base_url, config.request_timeout_ms, transport),
            credentials,
            interactive_timeout_ms: config.interactive_timeout_ms,
            code_provider,
        };
        client.obtain_token().await?;
        client.pass_second_factor().await?;
        client.scope_account().await?;
        Ok(client)
    }

    // ---- authentication flow ------------------------------------------

    async fn obtain_token(&self) -> Result<(), ApiError> {
        self.rest.update_headers([
            ("user-agent", USER_AGENT),
            ("content-type", "application/json"),
            ("apikey", self.credentials.effective_api_key()),
        ]);

        let mut body = json!({
            "email": self.credentials.email,
            "password": self.credentials.password,
        });
        if let Some(object) = body.as_object_mut() {
            for (key, value) in &self.credentials.metadata {
                object.insert(key.clone(), json!(value));
            }
        }

        let response = self
            .rest
            .request(
                endpoints::TOKEN,
                HttpMethod::Post,
                Some("grant_type=password"),
                RequestBody::Json(body),
            )
            .await?;

        if response.get("error").is_some() {
            let description = response
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or("login rejected");
            return Err(ApiError::Authentication(description.to_owned()));
        }
        let token = response
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::Authentication(String::from(
                    "token response carries no access_token",
                ))
            })?;

        self.rest.install_access_token(token);
        self.rest.set_state(AuthState::TokenObtained);
        info!("password login accepted");
        Ok(())
    }

    async fn pass_second_factor(&self) -> Result<(), ApiError> {
        let status = self
            .rest
            .request(
                endpoints::TWO_FACTOR_STATUS,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await?;

        let required = status
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !required {
            debug!("no second factor required");
            self.rest.set_state(AuthState::ChallengeVerified);
            return Ok(());
        }
        self.rest.set_state(AuthState::ChallengeRequired);

        let factor_id = status
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::Authentication(String::from(
                    "second factor required but factor id is missing",
                ))
            })?
            .to_owned();
        let factor_type = status
            .get("factor_type")
            .and_then(Value::as_str)
            .unwrap_or("totp")
            .to_owned();

        let issued = self
            .rest
            .request(
                &endpoints::challenge(&factor_id),
                HttpMethod::Post,
                None,
                RequestBody::Empty,
            )
            .await?;
        let challenge_id = issued
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(&factor_id)
            .to_owned();

        let challenge = ChallengeInfo {
            factor_id: factor_id.clone(),
            challenge_id: challenge_id.clone(),
            factor_type,
        };
        let code = self.resolve_code(&challenge).await?;

        let verified = self
            .rest
            .request(
                &endpoints::verify(&factor_id),
                HttpMethod::Post,
                None,
                RequestBody::Json(json!({
                    "challenge_id": challenge_id,
                    "code": code,
                })),
            )
            .await?;
        let token = verified
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::Authentication(String::from(
                    "verify response carries no access_token",
                ))
            })?;

        self.rest.install_access_token(token);
        self.rest.set_state(AuthState::ChallengeVerified);
        info!("second factor verified");
        Ok(())
    }

    /// TOTP secrets answer TOTP challenges locally; everything else is
    /// delegated to the injected provider, bounded by the interactive
    /// timeout so a login never hangs forever.
    async fn resolve_code(&self, challenge: &ChallengeInfo) -> Result<String, ApiError> {
        if challenge.factor_type == "totp" {
            if let Some(secret) = &self.credentials.totp_secret {
                return Ok(secret.generate());
            }
        }
        let Some(provider) = &self.code_provider else {
            return Err(ApiError::Authentication(String::from(
                "second factor required but no TOTP secret or code provider is configured",
            )));
        };
        let wait = Duration::from_millis(self.interactive_timeout_ms);
        match tokio::time::timeout(wait, provider.code(challenge)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Authentication(String::from(
                "second factor code was not supplied in time",
            ))),
        }
    }

    async fn scope_account(&self) -> Result<(), ApiError> {
        let profile = self
            .rest
            .request(endpoints::MY_DATA, HttpMethod::Get, None, RequestBody::Empty)
            .await?;
        let account = profile
            .get("id_accounts")
            .and_then(Value::as_array)
            .and_then(|accounts| accounts.first())
            .ok_or_else(|| {
                ApiError::Authentication(String::from("profile carries no account ids"))
            })?;
        let account_number = match account {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        };

        self.rest.install_account_number(&account_number);
        self.rest.set_connected(true);
        self.rest.set_state(AuthState::FullyAuthenticated);
        info!(account_number = %account_number, "session fully authenticated");
        Ok(())
    }

    /// Invalidates the remote session. The client is terminal
    /// afterwards; construct a new one to log back in.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::LOGOUT, HttpMethod::Post, None, RequestBody::Empty)
            .await?;
        self.rest.set_connected(false);
        self.rest.set_state(AuthState::LoggedOut);
        info!("session logged out");
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), ApiError> {
        if self.rest.state() == AuthState::LoggedOut {
            return Err(ApiError::Configuration(String::from(
                "session is logged out; construct a new client",
            )));
        }
        Ok(())
    }

    // ---- account ------------------------------------------------------

    pub async fn my_data(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::MY_DATA, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    pub async fn my_bank_accounts(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::BANK_ACCOUNTS,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn my_portfolio(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::PORTFOLIO,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Available buying power, keyed by settlement then currency.
    pub async fn funds_available(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::BUYING_POWER,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Sellable holdings of one instrument, keyed by settlement.
    pub async fn stocks_available(&self, long_ticker: &str) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                &endpoints::selling_power(long_ticker),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Account movements between two `yyyy-MM-dd` dates, inclusive.
    pub async fn account_activity(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        validate_date(date_from)?;
        validate_date(date_to)?;
        self.rest
            .request(
                &endpoints::account_movements(date_from, date_to),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Portfolio performance. `Range` requires the date pair; the other
    /// timeframes ignore it.
    pub async fn portfolio_performance(
        &self,
        timeframe: PerformanceTimeframe,
        range: Option<(&str, &str)>,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        let path = match timeframe {
            PerformanceTimeframe::Daily => endpoints::DAILY_PERFORMANCE.to_owned(),
            PerformanceTimeframe::Historical => endpoints::HISTORIC_PERFORMANCE.to_owned(),
            PerformanceTimeframe::Range => {
                let Some((date_from, date_to)) = range else {
                    return Err(ApiError::Configuration(String::from(
                        "range performance requires a date_from/date_to pair",
                    )));
                };
                validate_date(date_from)?;
                validate_date(date_to)?;
                endpoints::performance_period(date_from, date_to)
            }
        };
        self.rest
            .request(&path, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    pub async fn submit_new_bank_account(
        &self,
        cbu_cvu: &str,
        cuit: &str,
        currency: Currency,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::BANK_ACCOUNTS,
                HttpMethod::Post,
                None,
                RequestBody::Json(json!({
                    "cbu_cvu": cbu_cvu,
                    "cuit": cuit,
                    "currency": currency.as_str(),
                })),
            )
            .await
    }

    /// Withdraws funds to a previously registered bank account. The
    /// destination is checked against the registered accounts first, so
    /// a typoed CBU fails locally instead of at the remote.
    pub async fn withdraw_funds(
        &self,
        currency: Currency,
        amount: f64,
        cbu_cvu: &str,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ValidationError::NonPositiveOrderField { field: "amount" }.into());
        }

        let accounts = self.my_bank_accounts().await?;
        if !bank_account_is_registered(&accounts, cbu_cvu) {
            return Err(ValidationError::UnknownBankAccount {
                cbu_cvu: cbu_cvu.to_owned(),
            }
            .into());
        }

        self.rest
            .request(
                endpoints::WITHDRAW,
                HttpMethod::Post,
                None,
                RequestBody::Json(json!({
                    "order": "1",
                    "amount": amount,
                    "currency": currency.as_str(),
                    "cbu_cvu": cbu_cvu,
                })),
            )
            .await
    }

    pub async fn investor_test(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::INVESTOR_TEST,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Submits investor profile answers. The payload is forwarded
    /// verbatim; the remote validates the questionnaire shape.
    pub async fn submit_investor_test(&self, answers: Value) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::INVESTOR_TEST,
                HttpMethod::Post,
                None,
                RequestBody::Json(answers),
            )
            .await
    }

    pub async fn transfer_receipt(&self, receipt_id: &str) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                &endpoints::receipt(receipt_id),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    // ---- orders -------------------------------------------------------

    /// Submits a buy order after the affordability check. The order id
    /// is cached locally when the remote confirms acceptance.
    pub async fn submit_buy_order(&self, plan: &OrderPlan) -> Result<Value, ApiError> {
        self.ensure_active()?;
        if plan.side != OrderSide::Buy {
            return Err(ApiError::Configuration(String::from(
                "submit_buy_order requires a BUY plan",
            )));
        }
        plan.validate()?;
        let ticker = LongTicker::parse(&plan.long_ticker)?;

        match self.buy_power(plan, &ticker).await? {
            BuyPower::Sufficient => {}
            BuyPower::Insufficient {
                required,
                available,
            } => {
                return Err(ValidationError::InsufficientFunds {
                    required,
                    available,
                }
                .into())
            }
            BuyPower::Unpriced => {
                return Err(ValidationError::UnpricedInstrument {
                    long_ticker: plan.long_ticker.clone(),
                }
                .into())
            }
        }

        let response = self
            .rest
            .request(
                endpoints::ORDERS,
                HttpMethod::Post,
                None,
                RequestBody::Json(plan.to_payload()),
            )
            .await?;
        self.cache_order_number(&response);
        Ok(response)
    }

    /// Submits a sell order. Quantity-sized plans are checked against
    /// sellable holdings first; amount-sized plans go straight through
    /// since holdings are quoted in units, not currency.
    pub async fn submit_sell_order(&self, plan: &OrderPlan) -> Result<Value, ApiError> {
        self.ensure_active()?;
        if plan.side != OrderSide::Sell {
            return Err(ApiError::Configuration(String::from(
                "submit_sell_order requires a SELL plan",
            )));
        }
        plan.validate()?;
        let ticker = LongTicker::parse(&plan.long_ticker)?;

        if let Some(quantity) = plan.quantity {
            let stocks = self.stocks_available(&plan.long_ticker).await?;
            let available = stocks
                .get(ticker.settlement().as_str())
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            if available < quantity {
                return Err(ValidationError::InsufficientStock {
                    requested: quantity,
                    available,
                }
                .into());
            }
        }

        let response = self
            .rest
            .request(
                endpoints::ORDERS,
                HttpMethod::Post,
                None,
                RequestBody::Json(plan.to_payload()),
            )
            .await?;
        self.cache_order_number(&response);
        Ok(response)
    }

    /// True iff the plan would pass the buy-side affordability check.
    /// Unparseable tickers and unpriceable instruments report `false`.
    pub async fn validate_buy_power(&self, plan: &OrderPlan) -> Result<bool, ApiError> {
        self.ensure_active()?;
        let Ok(ticker) = LongTicker::parse(&plan.long_ticker) else {
            return Ok(false);
        };
        Ok(matches!(
            self.buy_power(plan, &ticker).await?,
            BuyPower::Sufficient
        ))
    }

    /// True iff at least `quantity` units are sellable for the
    /// instrument's settlement tenor.
    pub async fn validate_sell_power(
        &self,
        long_ticker: &str,
        quantity: f64,
    ) -> Result<bool, ApiError> {
        self.ensure_active()?;
        let Ok(ticker) = LongTicker::parse(long_ticker) else {
            return Ok(false);
        };
        let stocks = self.stocks_available(long_ticker).await?;
        let available = stocks
            .get(ticker.settlement().as_str())
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        Ok(available >= quantity)
    }

    /// Submits a repo (caucion) placement.
    pub async fn place_repo_order(
        &self,
        currency: Currency,
        amount: f64,
        term_days: u32,
        rate: f64,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ValidationError::NonPositiveOrderField { field: "amount" }.into());
        }
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ValidationError::NonPositiveOrderField { field: "rate" }.into());
        }
        let response = self
            .rest
            .request(
                endpoints::REPO_ORDER,
                HttpMethod::Post,
                None,
                RequestBody::Json(json!({
                    "currency": currency.as_str(),
                    "amount": amount,
                    "term": term_days,
                    "rate": rate,
                })),
            )
            .await?;
        self.cache_order_number(&response);
        Ok(response)
    }

    /// Cancels a live order. The cancellation endpoint wants the
    /// instrument and ticker echoed back, so the order is fetched first.
    pub async fn cancel_order(&self, order_number: &str) -> Result<Value, ApiError> {
        self.ensure_active()?;
        let order = self.order_status(order_number).await?;
        let payload = json!({
            "instrument": order.get("instrument").cloned().unwrap_or(Value::Null),
            "ticker": order.get("ticker").cloned().unwrap_or(Value::Null),
        });
        self.rest
            .request(
                &endpoints::order(order_number),
                HttpMethod::Delete,
                None,
                RequestBody::Json(payload),
            )
            .await
    }

    pub async fn order_status(&self, order_number: &str) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                &endpoints::order(order_number),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Every order of the scoped account, live and settled.
    pub async fn all_orders_status(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::ORDERS, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    fn cache_order_number(&self, response: &Value) {
        if response.get("success").is_none() {
            return;
        }
        if let Some(number) = response.get("Orden").and_then(Value::as_str) {
            debug!(order_number = number, "order accepted");
            self.rest.push_order(number);
        }
    }

    // ---- buy-side affordability ---------------------------------------

    async fn buy_power(
        &self,
        plan: &OrderPlan,
        ticker: &LongTicker,
    ) -> Result<BuyPower, ApiError> {
        let entry = self.snapshot_entry(ticker, &plan.long_ticker).await?;
        let price_factor = entry
            .as_ref()
            .and_then(|entry| entry.get("price_factor"))
            .and_then(Value::as_f64)
            .unwrap_or(1.0);

        let required = if let Some(amount) = plan.amount {
            amount
        } else {
            // The plan shape guarantees a quantity when amount is absent.
            let quantity = plan.quantity.unwrap_or(0.0);
            let price = match plan.price {
                Some(price) => price,
                None => {
                    match entry
                        .as_ref()
                        .and_then(|entry| entry.get("ask"))
                        .and_then(Value::as_f64)
                    {
                        Some(ask) => ask,
                        None => return Ok(BuyPower::Unpriced),
                    }
                }
            };
            quantity * price / price_factor
        };

        let funds = self.funds_available().await?;
        let currency_key = ticker.currency().byma_code().to_ascii_lowercase();
        let available = funds
            .get(ticker.settlement().as_str())
            .and_then(|by_currency| by_currency.get(&currency_key))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        if available >= required {
            Ok(BuyPower::Sufficient)
        } else {
            Ok(BuyPower::Insufficient {
                required,
                available,
            })
        }
    }

    /// Snapshot row matching the plan's exact long ticker. The snapshot
    /// is addressed by instrument code when the search resolves one,
    /// falling back to the bare ticker.
    async fn snapshot_entry(
        &self,
        ticker: &LongTicker,
        long_ticker: &str,
    ) -> Result<Option<Value>, ApiError> {
        let code = self
            .find_instrument_code(long_ticker)
            .await?
            .unwrap_or_else(|| ticker.ticker().to_owned());
        let snapshot = self.instrument_snapshot(&code, ticker.segment()).await?;
        Ok(snapshot
            .as_array()
            .into_iter()
            .flatten()
            .find(|entry| {
                entry.get("long_ticker").and_then(Value::as_str) == Some(long_ticker)
            })
            .cloned())
    }

    /// Resolves the instrument code behind a long ticker through the
    /// search endpoint. `None` when no search result carries the exact
    /// long ticker.
    pub async fn find_instrument_code(
        &self,
        long_ticker: &str,
    ) -> Result<Option<String>, ApiError> {
        self.ensure_active()?;
        let short = long_ticker.split('-').next().unwrap_or(long_ticker);
        let results = self.search_ticker(short).await?;

        let Some(entries) = results.as_array() else {
            return Ok(None);
        };
        for entry in entries {
            let subtypes = entry
                .get("instrument_subtypes")
                .and_then(Value::as_array)
                .into_iter()
                .flatten();
            for subtype in subtypes {
                let rows = subtype
                    .get("market_data")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten();
                for row in rows {
                    if row.get("long_ticker").and_then(Value::as_str) == Some(long_ticker) {
                        if let Some(code) =
                            row.get("instrument_code").and_then(Value::as_str)
                        {
                            return Ok(Some(code.to_owned()));
                        }
                    }
                }
            }
        }
        Ok(None)
    }

    // ---- market data --------------------------------------------------

    /// Intraday candles since `date_from` (`yyyy-MM-dd`).
    pub async fn daily_history(
        &self,
        long_ticker: &str,
        date_from: &str,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        validate_date(date_from)?;
        self.rest
            .request(
                &endpoints::historic_data(long_ticker, date_from),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Market-data rows for one instrument across settlements and
    /// currencies. `ticker` is the short ticker or instrument code.
    pub async fn instrument_snapshot(
        &self,
        ticker: &str,
        segment: Segment,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                &endpoints::tickers(ticker, segment),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Filtered instrument list. The type/subtype pair is checked
    /// against the allowed matrix before any request is built.
    pub async fn instrument_list_snapshot(
        &self,
        instrument_type: InstrumentType,
        subtype: InstrumentSubType,
        settlement: cocos_core::Settlement,
        currency: Currency,
        segment: Segment,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        ensure_combination(instrument_type, subtype)?;
        self.rest
            .request(
                &endpoints::tickers_list(
                    instrument_type.as_str(),
                    subtype.as_str(),
                    settlement.as_str(),
                    currency.as_str(),
                    segment,
                ),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Paginated variant of [`Self::instrument_list_snapshot`].
    #[allow(clippy::too_many_arguments)]
    pub async fn instrument_list_snapshot_paginated(
        &self,
        instrument_type: InstrumentType,
        subtype: InstrumentSubType,
        settlement: cocos_core::Settlement,
        currency: Currency,
        segment: Segment,
        page: u32,
        size: u32,
    ) -> Result<Value, ApiError> {
        self.ensure_active()?;
        ensure_combination(instrument_type, subtype)?;
        self.rest
            .request(
                &endpoints::tickers_pagination(
                    instrument_type.as_str(),
                    subtype.as_str(),
                    settlement.as_str(),
                    currency.as_str(),
                    segment,
                    page,
                    size,
                ),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn recommended_tickers(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::HOME_LIST,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn favorite_tickers(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::MY_LIST, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    /// Free-text instrument search. Queries shorter than two characters
    /// are rejected locally.
    pub async fn search_ticker(&self, query: &str) -> Result<Value, ApiError> {
        self.ensure_active()?;
        if query.chars().count() < 2 {
            return Err(ValidationError::QueryTooShort.into());
        }
        self.rest
            .request(
                &endpoints::ticker_search(query),
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn market_status(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::OPEN_MARKET,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    /// Tick sizes, lot rules and trading parameters per instrument.
    pub async fn instrument_rules(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::RULES, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    pub async fn instrument_types_and_subtypes(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::TYPES, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    pub async fn dolar_mep_prices(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::MEP_PRICES,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn open_dolar_mep(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::OPEN_DOLAR_MEP,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn news(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(endpoints::NEWS, HttpMethod::Get, None, RequestBody::Empty)
            .await
    }

    pub async fn carrousel(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::CARROUSEL,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    pub async fn university_articles(&self) -> Result<Value, ApiError> {
        self.ensure_active()?;
        self.rest
            .request(
                endpoints::UNIVERSITY,
                HttpMethod::Get,
                None,
                RequestBody::Empty,
            )
            .await
    }

    // ---- local accessors ----------------------------------------------

    /// Builds a wire long ticker without touching the network.
    pub fn long_ticker(
        &self,
        ticker: &str,
        settlement: cocos_core::Settlement,
        currency: Currency,
        segment: Segment,
    ) -> String {
        LongTicker::compose(ticker, settlement, currency, segment)
    }

    pub fn is_connected(&self) -> bool {
        self.rest.connected()
    }

    pub fn account_number(&self) -> String {
        self.rest.account_number()
    }

    /// Order numbers accepted during this session, oldest first.
    pub fn submitted_orders(&self) -> Vec<String> {
        self.rest.orders()
    }

    /// Diagnostic log of successful calls, oldest first.
    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.rest.audit_log()
    }

    pub fn allowed_combinations(&self) -> &'static [(InstrumentType, InstrumentSubType)] {
        ALLOWED_COMBINATIONS
    }

    #[cfg(test)]
    pub(crate) fn last_request_header(&self, name: &str) -> Option<String> {
        self.rest.header(name)
    }
}

fn ensure_combination(
    instrument_type: InstrumentType,
    subtype: InstrumentSubType,
) -> Result<(), ApiError> {
    if cocos_core::validate_list_parameters(instrument_type, subtype) {
        return Ok(());
    }
    Err(ValidationError::InvalidListCombination {
        instrument_type: instrument_type.as_str().to_owned(),
        subtype: subtype.as_str().to_owned(),
    }
    .into())
}

fn validate_date(value: &str) -> Result<(), ApiError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(value, &format).map_err(|_| {
        ApiError::from(ValidationError::InvalidDate {
            value: value.to_owned(),
        })
    })?;
    Ok(())
}

/// True when any registered account carries the given CBU/CVU under the
/// usual field names.
fn bank_account_is_registered(accounts: &Value, cbu_cvu: &str) -> bool {
    let rows = match accounts {
        Value::Array(rows) => rows.as_slice(),
        Value::Object(_) => accounts
            .get("accounts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };
    rows.iter().any(|row| {
        ["cbu_cvu", "cbu", "cvu"].iter().any(|field| {
            row.get(field).and_then(Value::as_str) == Some(cbu_cvu)
        })
    })
}
