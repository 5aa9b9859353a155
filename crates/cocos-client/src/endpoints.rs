//! Endpoint table: logical operation to URL path template.
//!
//! Paths are relative to the configured base URL. Positional arguments
//! are substituted urlencoded; dates use `yyyy-MM-dd`.

use cocos_core::Segment;
use urlencoding::encode;

pub const TOKEN: &str = "auth/v1/token";
pub const LOGOUT: &str = "auth/v1/logout";
pub const TWO_FACTOR_STATUS: &str = "auth/v1/factors/default";

pub fn challenge(factor_id: &str) -> String {
    format!("auth/v1/factors/{}/challenge", encode(factor_id))
}

pub fn verify(factor_id: &str) -> String {
    format!("auth/v1/factors/{}/verify", encode(factor_id))
}

pub const OPEN_MARKET: &str = "api/v1/calendar/open-market";
pub const CARROUSEL: &str = "api/v1/home/carrousel";
pub const NEWS: &str = "api/v1/home/news";
pub const UNIVERSITY: &str = "api/v1/home/university";
pub const MEP_PRICES: &str = "api/v1/public/mep-prices";
pub const OPEN_DOLAR_MEP: &str = "api/v1/public/open-dolar-mep";
pub const HOME_LIST: &str = "api/v1/markets/lists/home";
pub const MY_LIST: &str = "api/v1/markets/lists/me";
pub const RULES: &str = "api/v1/markets/tickers/rules";
pub const TYPES: &str = "api/v1/markets/types";

pub fn tickers_list(
    instrument_type: &str,
    instrument_subtype: &str,
    settlement: &str,
    currency: &str,
    segment: Segment,
) -> String {
    format!(
        "api/v1/markets/lists/tickers/?instrument_type={}&instrument_subtype={}&settlement_days={}&currency={}&segment={}",
        encode(instrument_type),
        encode(instrument_subtype),
        encode(settlement),
        encode(currency),
        segment.as_str(),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn tickers_pagination(
    instrument_type: &str,
    instrument_subtype: &str,
    settlement: &str,
    currency: &str,
    segment: Segment,
    page: u32,
    size: u32,
) -> String {
    format!(
        "api/v1/markets/lists/tickers-pagination?instrument_type={}&instrument_subtype={}&settlement_days={}&currency={}&segment={}&page={page}&size={size}",
        encode(instrument_type),
        encode(instrument_subtype),
        encode(settlement),
        encode(currency),
        segment.as_str(),
    )
}

pub fn historic_data(long_ticker: &str, date_from: &str) -> String {
    format!(
        "api/v1/markets/tickers/{}/historic-data?date_from={}",
        encode(long_ticker),
        encode(date_from)
    )
}

pub fn tickers(ticker: &str, segment: Segment) -> String {
    format!(
        "api/v1/markets/tickers/{}?segment={}",
        encode(ticker),
        segment.as_str()
    )
}

pub fn ticker_search(query: &str) -> String {
    format!("api/v1/markets/tickers/search?q={}", encode(query))
}

pub fn account_movements(date_from: &str, date_to: &str) -> String {
    format!(
        "api/v1/transfers?date_from={}&date_to={}",
        encode(date_from),
        encode(date_to)
    )
}

pub fn receipt(receipt_id: &str) -> String {
    format!(
        "api/v1/transfers/receipt?ext_id_receipt={}",
        encode(receipt_id)
    )
}

pub const BANK_ACCOUNTS: &str = "api/v1/transfers/accounts";
pub const WITHDRAW: &str = "api/v1/transfers/withdraw";
pub const MY_DATA: &str = "api/v1/users/me";
pub const INVESTOR_TEST: &str = "api/v1/users/investor-profile-test";
pub const DAILY_PERFORMANCE: &str = "api/v1/wallet/performance/daily";
pub const HISTORIC_PERFORMANCE: &str = "api/v1/wallet/performance/historic";

pub fn performance_period(date_from: &str, date_to: &str) -> String {
    format!(
        "api/v1/wallet/performance/global?date_from={}&date_to={}",
        encode(date_from),
        encode(date_to)
    )
}

pub const PORTFOLIO: &str = "api/v1/wallet/portfolio";
pub const ORDERS: &str = "api/v2/orders";
pub const REPO_ORDER: &str = "api/v2/orders/caucion";
pub const BUYING_POWER: &str = "api/v2/orders/buying-power";

pub fn order(order_number: &str) -> String {
    format!("api/v2/orders/{}", encode(order_number))
}

pub fn selling_power(long_ticker: &str) -> String {
    format!(
        "api/v2/orders/selling-power/?long_ticker={}",
        encode(long_ticker)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_are_urlencoded() {
        assert_eq!(
            ticker_search("dolar mep"),
            "api/v1/markets/tickers/search?q=dolar%20mep"
        );
        assert_eq!(
            selling_power("AL30-0002-C-CT-ARS"),
            "api/v2/orders/selling-power/?long_ticker=AL30-0002-C-CT-ARS"
        );
    }

    #[test]
    fn list_template_substitutes_all_filters() {
        let path = tickers_list("ACCIONES", "LIDERES", "24hs", "ARS", Segment::Default);
        assert!(path.contains("instrument_type=ACCIONES"));
        assert!(path.contains("instrument_subtype=LIDERES"));
        assert!(path.contains("settlement_days=24hs"));
        assert!(path.contains("currency=ARS"));
        assert!(path.contains("segment=C"));
    }
}
