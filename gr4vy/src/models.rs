//! Payment-method payload models for checkout-session tokenization.

use serde::{Deserialize, Serialize};

/// Payment method details submitted for tokenization.
///
/// Optional security codes are omitted from the wire payload entirely when
/// absent, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Raw card details.
    Card {
        /// Primary account number.
        number: String,
        /// Expiration date in `MM/YY` form.
        expiration_date: String,
        /// Card verification value.
        #[serde(skip_serializing_if = "Option::is_none")]
        security_code: Option<String>,
    },
    /// An existing stored payment method.
    Id {
        /// Identifier of the stored payment method.
        id: String,
        /// Card verification value, when the stored method requires one.
        #[serde(skip_serializing_if = "Option::is_none")]
        security_code: Option<String>,
    },
}

/// Body of the checkout-session tokenize request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// The payment method being tokenized.
    pub payment_method: PaymentMethod,
}

impl CheckoutSessionRequest {
    /// Creates a request for the given payment method.
    #[must_use]
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self { payment_method }
    }
}

/// Raw result of a plain tokenize call.
///
/// The service replies `204 No Content` on some paths, in which case
/// `raw_response` is empty; presentation layers decide how to render that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizeResponse {
    /// Verbatim response body.
    pub raw_response: String,
}
