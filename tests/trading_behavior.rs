//! Behavior tests for order submission: affordability checks, holdings
//! checks, order-number caching and cancellation.

use cocos_core::{OrderPlan, OrderSide, ValidationError};
use cocos_tests::*;
use serde_json::{json, Value};

const AL30_24HS_ARS: &str = "AL30-0002-C-CT-ARS";

/// Routes for one priced instrument: search resolves the code, the
/// snapshot quotes an ask, buying power is parameterized.
fn install_trading_routes(transport: &ScriptedTransport, available_ars_24hs: f64) {
    install_login_routes(transport);
    transport.respond(
        "tickers/search",
        json!([{
            "instrument_subtypes": [{
                "market_data": [{
                    "long_ticker": AL30_24HS_ARS,
                    "instrument_code": "AL30",
                }],
            }],
        }]),
    );
    transport.respond(
        "markets/tickers/AL30",
        json!([{
            "long_ticker": AL30_24HS_ARS,
            "ask": 500.0,
            "price_factor": 1.0,
        }]),
    );
    transport.respond(
        "orders/buying-power",
        json!({"24hs": {"ars": available_ars_24hs}}),
    );
    transport.respond("orders/selling-power", json!({"24hs": 5.0}));
    transport.respond("api/v2/orders", json!({"success": true, "Orden": "ORD-1"}));
}

// =============================================================================
// Buy side
// =============================================================================

#[tokio::test]
async fn when_funds_cover_the_order_it_is_submitted_and_cached() {
    // Given: 10_000 ARS available against a 5_000 ARS limit order
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 10_000.0);
    let client = login(transport.clone()).await;
    let plan = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Buy, 10.0, 500.0).expect("valid");

    // When: the order is submitted
    let response = client.submit_buy_order(&plan).await.expect("accepted");

    // Then: the remote's answer is returned and the number cached
    assert_eq!(response["Orden"], "ORD-1");
    assert_eq!(client.submitted_orders(), vec!["ORD-1"]);

    // And: the posted payload is the plan's wire shape
    let submit = transport
        .recorded()
        .into_iter()
        .find(|request| request.method == HttpMethod::Post && request.url.ends_with("api/v2/orders"))
        .expect("order was posted");
    let body: Value = serde_json::from_str(submit.body.as_deref().expect("body")).expect("json");
    assert_eq!(body["side"], "BUY");
    assert_eq!(body["type"], "LIMIT");
    assert_eq!(body["long_ticker"], AL30_24HS_ARS);
    assert_eq!(body["quantity"], 10.0);
    assert_eq!(body["price"], 500.0);
    assert!(body.get("amount").is_none());
}

#[tokio::test]
async fn when_funds_fall_short_the_order_never_reaches_the_remote() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 1_000.0);
    let client = login(transport.clone()).await;
    let plan = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Buy, 10.0, 500.0).expect("valid");

    let error = client.submit_buy_order(&plan).await.expect_err("5000 > 1000");

    match error {
        ApiError::Validation(ValidationError::InsufficientFunds { required, available }) => {
            assert_eq!(required, 5_000.0);
            assert_eq!(available, 1_000.0);
        }
        other => panic!("expected insufficient funds, got {other:?}"),
    }
    assert!(
        !transport
            .recorded()
            .iter()
            .any(|request| request.method == HttpMethod::Post
                && request.url.ends_with("api/v2/orders")),
        "no submission reaches the remote"
    );
    assert!(client.submitted_orders().is_empty());
}

#[tokio::test]
async fn when_exact_funds_are_available_the_order_passes() {
    // Equality is sufficient: required == available is not a rejection.
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 5_000.0);
    let client = login(transport).await;
    let plan = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Buy, 10.0, 500.0).expect("valid");

    assert!(client.validate_buy_power(&plan).await.expect("check"));
    client.submit_buy_order(&plan).await.expect("accepted");
}

#[tokio::test]
async fn market_buys_are_priced_from_the_snapshot_ask() {
    // 10 units at the 500 ask, 4_000 available: short by 1_000
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 4_000.0);
    let client = login(transport).await;
    let plan = OrderPlan::market(AL30_24HS_ARS, OrderSide::Buy, 10.0).expect("valid");

    let error = client.submit_buy_order(&plan).await.expect_err("short");
    match error {
        ApiError::Validation(ValidationError::InsufficientFunds { required, .. }) => {
            assert_eq!(required, 5_000.0)
        }
        other => panic!("expected insufficient funds, got {other:?}"),
    }
}

#[tokio::test]
async fn amount_sized_orders_use_the_amount_as_the_total() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 4_000.0);
    let client = login(transport).await;
    let plan = OrderPlan::market_amount(AL30_24HS_ARS, OrderSide::Buy, 4_000.0).expect("valid");

    // The ask never enters the computation when an amount is given.
    client.submit_buy_order(&plan).await.expect("4000 <= 4000");
}

#[tokio::test]
async fn the_price_factor_divides_the_order_total() {
    // Given: a bond quoted per 100 nominals (price_factor 100)
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond(
        "tickers/search",
        json!([{
            "instrument_subtypes": [{
                "market_data": [{"long_ticker": AL30_24HS_ARS, "instrument_code": "AL30"}],
            }],
        }]),
    );
    transport.respond(
        "markets/tickers/AL30",
        json!([{"long_ticker": AL30_24HS_ARS, "ask": 500.0, "price_factor": 100.0}]),
    );
    transport.respond("orders/buying-power", json!({"24hs": {"ars": 60.0}}));
    transport.respond("api/v2/orders", json!({"success": true, "Orden": "ORD-2"}));
    let client = login(transport).await;

    // When/Then: 10 * 500 / 100 = 50, covered by the 60 available
    let plan = OrderPlan::market(AL30_24HS_ARS, OrderSide::Buy, 10.0).expect("valid");
    client.submit_buy_order(&plan).await.expect("50 <= 60");
}

#[tokio::test]
async fn when_no_ask_exists_a_market_buy_is_unpriced() {
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond("tickers/search", json!([]));
    transport.respond(
        "markets/tickers/AL30",
        json!([{"long_ticker": AL30_24HS_ARS, "price_factor": 1.0}]),
    );
    transport.respond("orders/buying-power", json!({"24hs": {"ars": 1_000_000.0}}));
    let client = login(transport).await;

    let plan = OrderPlan::market(AL30_24HS_ARS, OrderSide::Buy, 10.0).expect("valid");
    let error = client.submit_buy_order(&plan).await.expect_err("unpriced");
    assert!(matches!(
        error,
        ApiError::Validation(ValidationError::UnpricedInstrument { .. })
    ));
}

#[tokio::test]
async fn when_the_search_misses_the_snapshot_uses_the_bare_ticker() {
    // Given: a search with no matching row, so the code falls back
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond("tickers/search", json!([]));
    transport.respond(
        "markets/tickers/AL30",
        json!([{"long_ticker": AL30_24HS_ARS, "ask": 500.0, "price_factor": 1.0}]),
    );
    transport.respond("orders/buying-power", json!({"24hs": {"ars": 10_000.0}}));
    transport.respond("api/v2/orders", json!({"success": true, "Orden": "ORD-3"}));
    let client = login(transport.clone()).await;

    let plan = OrderPlan::market(AL30_24HS_ARS, OrderSide::Buy, 10.0).expect("valid");
    client.submit_buy_order(&plan).await.expect("accepted");

    assert_eq!(
        transport.recorded_for("markets/tickers/AL30").len(),
        1,
        "the snapshot was addressed by bare ticker"
    );
}

// =============================================================================
// Sell side
// =============================================================================

#[tokio::test]
async fn when_holdings_cover_the_quantity_the_sell_is_submitted() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 0.0);
    let client = login(transport).await;

    let plan = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Sell, 5.0, 500.0).expect("valid");
    client.submit_sell_order(&plan).await.expect("5 <= 5 held");
}

#[tokio::test]
async fn when_holdings_fall_short_the_sell_never_reaches_the_remote() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 0.0);
    let client = login(transport.clone()).await;

    let plan = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Sell, 10.0, 500.0).expect("valid");
    let error = client.submit_sell_order(&plan).await.expect_err("10 > 5");

    match error {
        ApiError::Validation(ValidationError::InsufficientStock { requested, available }) => {
            assert_eq!(requested, 10.0);
            assert_eq!(available, 5.0);
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }
    assert!(!transport
        .recorded()
        .iter()
        .any(|request| request.method == HttpMethod::Post
            && request.url.ends_with("api/v2/orders")));
}

#[tokio::test]
async fn amount_sized_sells_skip_the_holdings_check() {
    // Holdings are counted in units; an amount-sized sell cannot be
    // checked against them, so it goes straight through.
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 0.0);
    let client = login(transport.clone()).await;

    let plan = OrderPlan::market_amount(AL30_24HS_ARS, OrderSide::Sell, 9_999.0).expect("valid");
    client.submit_sell_order(&plan).await.expect("submitted");

    assert!(
        transport.recorded_for("orders/selling-power").is_empty(),
        "no holdings lookup is made for amount-sized sells"
    );
}

#[tokio::test]
async fn sell_power_validation_reports_without_failing() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 0.0);
    let client = login(transport).await;

    assert!(client.validate_sell_power(AL30_24HS_ARS, 5.0).await.expect("check"));
    assert!(!client.validate_sell_power(AL30_24HS_ARS, 5.5).await.expect("check"));
    assert!(
        !client.validate_sell_power("NOT-A-TICKER", 1.0).await.expect("check"),
        "unparseable tickers report false instead of failing"
    );
}

// =============================================================================
// Plan gatekeeping
// =============================================================================

#[tokio::test]
async fn malformed_tickers_are_rejected_before_any_request() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 10_000.0);
    let client = login(transport.clone()).await;
    let after_login = transport.recorded().len();

    let plan = OrderPlan::limit("AL30/BAD", OrderSide::Buy, 10.0, 500.0).expect("shape is fine");
    let error = client.submit_buy_order(&plan).await.expect_err("bad ticker");

    assert!(matches!(error, ApiError::Validation(_)));
    assert_eq!(transport.recorded().len(), after_login);
}

#[tokio::test]
async fn plans_on_the_wrong_side_are_rejected() {
    let transport = ScriptedTransport::new();
    install_trading_routes(&transport, 10_000.0);
    let client = login(transport).await;

    let sell = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Sell, 10.0, 500.0).expect("valid");
    assert!(matches!(
        client.submit_buy_order(&sell).await,
        Err(ApiError::Configuration(_))
    ));
    let buy = OrderPlan::limit(AL30_24HS_ARS, OrderSide::Buy, 10.0, 500.0).expect("valid");
    assert!(matches!(
        client.submit_sell_order(&buy).await,
        Err(ApiError::Configuration(_))
    ));
}

// =============================================================================
// Order management
// =============================================================================

#[tokio::test]
async fn cancelling_fetches_the_order_and_echoes_its_identity() {
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond(
        "api/v2/orders/ORD-1",
        json!({"instrument": "bonds_ars", "ticker": "AL30", "status": "LIVE"}),
    );
    let client = login(transport.clone()).await;

    client.cancel_order("ORD-1").await.expect("cancelled");

    let calls = transport.recorded_for("api/v2/orders/ORD-1");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, HttpMethod::Get);
    assert_eq!(calls[1].method, HttpMethod::Delete);
    let body: Value =
        serde_json::from_str(calls[1].body.as_deref().expect("body")).expect("json");
    assert_eq!(body["instrument"], "bonds_ars");
    assert_eq!(body["ticker"], "AL30");
}

#[tokio::test]
async fn repo_orders_carry_term_and_rate() {
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond("orders/caucion", json!({"success": true, "Orden": "ORD-7"}));
    let client = login(transport.clone()).await;

    client
        .place_repo_order(cocos_core::Currency::Pesos, 100_000.0, 7, 38.5)
        .await
        .expect("placed");

    let submit = &transport.recorded_for("orders/caucion")[0];
    let body: Value =
        serde_json::from_str(submit.body.as_deref().expect("body")).expect("json");
    assert_eq!(body["currency"], "ARS");
    assert_eq!(body["amount"], 100_000.0);
    assert_eq!(body["term"], 7);
    assert_eq!(body["rate"], 38.5);
    assert_eq!(client.submitted_orders(), vec!["ORD-7"]);
}

#[tokio::test]
async fn order_status_addresses_one_order_or_all() {
    let transport = ScriptedTransport::new();
    install_login_routes(&transport);
    transport.respond("api/v2/orders/ORD-1", json!({"status": "FILLED"}));
    transport.respond("api/v2/orders", json!([{"status": "FILLED"}]));
    let client = login(transport.clone()).await;

    let one = client.order_status("ORD-1").await.expect("one order");
    assert_eq!(one["status"], "FILLED");
    let all = client.all_orders_status().await.expect("all orders");
    assert!(all.is_array());
    assert!(transport.recorded().last().expect("last").url.ends_with("api/v2/orders"));
}
