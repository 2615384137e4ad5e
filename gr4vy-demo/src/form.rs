//! Form state snapshot and the payment-method selector.

use gr4vy::models::PaymentMethod;

use crate::prefs::{PreferencesStore, StoreError, keys};

/// Which subset of the form is submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethodType {
    /// Raw card details.
    #[default]
    Card,
    /// An existing stored payment method.
    Id,
}

impl PaymentMethodType {
    /// Stable raw value used for persistence.
    #[must_use]
    pub fn raw_value(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Id => "id",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::Id => "ID",
        }
    }

    /// Parses a stored raw value, falling back to [`Self::Card`] for
    /// anything unknown.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        if value == "id" { Self::Id } else { Self::Card }
    }
}

/// Snapshot of every editable field on the screen, admin settings included.
///
/// Fields for the inactive payment-method selector are retained but not
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Gr4vy merchant identifier (admin setting).
    pub gr4vy_id: String,
    /// API bearer token (admin setting).
    pub api_token: String,
    /// Server environment raw value (admin setting).
    pub server_environment: String,
    /// Request timeout in seconds, as entered (admin setting).
    pub timeout: String,
    /// Checkout session identifier.
    pub checkout_session_id: String,
    /// Active payment-method selector.
    pub payment_method_type: PaymentMethodType,
    /// Card number.
    pub card_number: String,
    /// Card expiration date.
    pub expiration_date: String,
    /// Card security code.
    pub security_code: String,
    /// Stored payment method identifier.
    pub payment_method_id: String,
    /// Security code for the stored payment method.
    pub id_security_code: String,
    /// Whether to run 3-D Secure authentication on card submissions.
    pub authenticate: bool,
    /// Selected test card raw value.
    pub test_card: String,
    /// Selected theme raw value.
    pub theme: String,
    /// 3DS challenge timeout in minutes, as entered.
    pub sdk_max_timeout: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            gr4vy_id: String::new(),
            api_token: String::new(),
            server_environment: "sandbox".to_owned(),
            timeout: String::new(),
            checkout_session_id: String::new(),
            payment_method_type: PaymentMethodType::Card,
            card_number: String::new(),
            expiration_date: String::new(),
            security_code: String::new(),
            payment_method_id: String::new(),
            id_security_code: String::new(),
            authenticate: true,
            test_card: "custom".to_owned(),
            theme: "none".to_owned(),
            sdk_max_timeout: "5".to_owned(),
        }
    }
}

impl FormState {
    /// Reconstructs the form from the store, applying the defaults above
    /// for keys that were never written.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn load(store: &dyn PreferencesStore) -> Result<Self, StoreError> {
        let defaults = Self::default();

        let payment_method_type = store
            .get_string(keys::PAYMENT_METHOD_TYPE)
            .await?
            .map_or(PaymentMethodType::Card, |raw| {
                PaymentMethodType::from_raw(&raw)
            });

        Ok(Self {
            gr4vy_id: string_or(store, keys::GR4VY_ID, defaults.gr4vy_id).await?,
            api_token: string_or(store, keys::API_TOKEN, defaults.api_token).await?,
            server_environment: string_or(
                store,
                keys::SERVER_ENVIRONMENT,
                defaults.server_environment,
            )
            .await?,
            timeout: string_or(store, keys::TIMEOUT, defaults.timeout).await?,
            checkout_session_id: string_or(
                store,
                keys::CHECKOUT_SESSION_ID,
                defaults.checkout_session_id,
            )
            .await?,
            payment_method_type,
            card_number: string_or(store, keys::CARD_NUMBER, defaults.card_number).await?,
            expiration_date: string_or(store, keys::EXPIRATION_DATE, defaults.expiration_date)
                .await?,
            security_code: string_or(store, keys::SECURITY_CODE, defaults.security_code).await?,
            payment_method_id: string_or(
                store,
                keys::PAYMENT_METHOD_ID,
                defaults.payment_method_id,
            )
            .await?,
            id_security_code: string_or(store, keys::ID_SECURITY_CODE, defaults.id_security_code)
                .await?,
            authenticate: store
                .get_bool(keys::AUTHENTICATE)
                .await?
                .unwrap_or(defaults.authenticate),
            test_card: string_or(store, keys::TEST_CARD, defaults.test_card).await?,
            theme: string_or(store, keys::THEME, defaults.theme).await?,
            sdk_max_timeout: string_or(store, keys::SDK_MAX_TIMEOUT, defaults.sdk_max_timeout)
                .await?,
        })
    }

    /// Builds the payment-method payload from the active selector's fields.
    ///
    /// Values are trimmed; blank optional security codes are omitted rather
    /// than sent as empty strings.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        match self.payment_method_type {
            PaymentMethodType::Card => PaymentMethod::Card {
                number: self.card_number.trim().to_owned(),
                expiration_date: self.expiration_date.trim().to_owned(),
                security_code: non_blank(&self.security_code),
            },
            PaymentMethodType::Id => PaymentMethod::Id {
                id: self.payment_method_id.trim().to_owned(),
                security_code: non_blank(&self.id_security_code),
            },
        }
    }
}

async fn string_or(
    store: &dyn PreferencesStore,
    key: &str,
    fallback: String,
) -> Result<String, StoreError> {
    Ok(store.get_string(key).await?.unwrap_or(fallback))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
