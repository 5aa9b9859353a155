//! Order plans and the shape invariants enforced before submission.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{OrderSide, OrderType, ValidationError};

/// A locally constructed trading instruction, validated before it is
/// submitted. The remote system stays authoritative for the final order
/// state; this type only guarantees the payload shape is coherent.
///
/// Shape invariants:
/// - a market order never carries an explicit price;
/// - a market order never carries both quantity and amount;
/// - a limit order carries a price and at least one of quantity/amount;
/// - every present numeric field is finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlan {
    pub long_ticker: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
}

impl OrderPlan {
    pub fn new(
        long_ticker: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Option<f64>,
        price: Option<f64>,
        amount: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let plan = Self {
            long_ticker: long_ticker.into(),
            side,
            order_type,
            quantity,
            price,
            amount,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Limit order sized by quantity.
    pub fn limit(
        long_ticker: impl Into<String>,
        side: OrderSide,
        quantity: f64,
        price: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            long_ticker,
            side,
            OrderType::Limit,
            Some(quantity),
            Some(price),
            None,
        )
    }

    /// Market order sized by quantity.
    pub fn market(
        long_ticker: impl Into<String>,
        side: OrderSide,
        quantity: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            long_ticker,
            side,
            OrderType::Market,
            Some(quantity),
            None,
            None,
        )
    }

    /// Market order sized by total amount instead of quantity.
    pub fn market_amount(
        long_ticker: impl Into<String>,
        side: OrderSide,
        amount: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            long_ticker,
            side,
            OrderType::Market,
            None,
            None,
            Some(amount),
        )
    }

    /// Re-checks the shape invariants. Constructors run this, but the
    /// fields are public, so submission paths validate again.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("quantity", self.quantity),
            ("price", self.price),
            ("amount", self.amount),
        ] {
            if let Some(number) = value {
                if !number.is_finite() || number <= 0.0 {
                    return Err(ValidationError::NonPositiveOrderField { field });
                }
            }
        }

        match self.order_type {
            OrderType::Market => {
                if self.price.is_some() {
                    return Err(ValidationError::MarketOrderWithPrice);
                }
                if self.quantity.is_some() && self.amount.is_some() {
                    return Err(ValidationError::MarketOrderOverspecified);
                }
            }
            OrderType::Limit => {
                if self.price.is_none() {
                    return Err(ValidationError::LimitOrderWithoutPrice);
                }
            }
        }

        if self.quantity.is_none() && self.amount.is_none() {
            return Err(ValidationError::OrderWithoutSize);
        }

        Ok(())
    }

    /// Wire payload for the order submission endpoint. Absent optional
    /// fields are omitted rather than sent as null.
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "type": self.order_type.as_str(),
            "side": self.side.as_str(),
            "long_ticker": self.long_ticker,
        });
        let object = payload.as_object_mut().expect("payload is an object");
        if let Some(quantity) = self.quantity {
            object.insert(String::from("quantity"), json!(quantity));
        }
        if let Some(price) = self.price {
            object.insert(String::from("price"), json!(price));
        }
        if let Some(amount) = self.amount {
            object.insert(String::from("amount"), json!(amount));
        }
        payload
    }
}
