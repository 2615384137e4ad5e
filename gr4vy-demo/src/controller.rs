//! The tokenization form controller.
//!
//! Owns the editable [`FormState`], mirrors every change into the injected
//! [`PreferencesStore`], and runs the submit flow: validate configuration,
//! build the payment-method payload, hand it to the SDK client, and map the
//! result into a [`TokenizationOutcome`]. One submission is in flight at a
//! time per controller; the busy flag is cleared by a drop guard on every
//! exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gr4vy::client::{Gr4vy, Gr4vyConfig};
use gr4vy::models::CheckoutSessionRequest;
use gr4vy::server::Gr4vyServer;
use gr4vy::threeds::{AuthenticatedTokenizeResult, AuthenticationOptions, ChallengeHost};
use gr4vy::{Gr4vyError, TokenizationApi};

use crate::cards;
use crate::classify::classify;
use crate::form::{FormState, PaymentMethodType};
use crate::outcome::TokenizationOutcome;
use crate::prefs::{PreferencesStore, StoreError, keys};
use crate::themes::ThemeOption;

/// Clears the busy flag when the submit flow exits, by any path.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Form controller for the tokenization screen.
pub struct FieldsController {
    store: Arc<dyn PreferencesStore>,
    state: FormState,
    busy: Arc<AtomicBool>,
    challenge_host: Option<Arc<dyn ChallengeHost>>,
}

impl FieldsController {
    /// Creates a controller over the given store, with default form state.
    #[must_use]
    pub fn new(store: Arc<dyn PreferencesStore>) -> Self {
        Self {
            store,
            state: FormState::default(),
            busy: Arc::new(AtomicBool::new(false)),
            challenge_host: None,
        }
    }

    /// Attaches a host for interactive 3-D Secure challenges.
    #[must_use]
    pub fn with_challenge_host(mut self, host: Arc<dyn ChallengeHost>) -> Self {
        self.challenge_host = Some(host);
        self
    }

    /// Reconciles local state with the persisted values.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.state = FormState::load(self.store.as_ref()).await?;
        Ok(())
    }

    /// Current form state.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    async fn persist_string(&self, key: &str, value: &str) {
        if let Err(error) = self.store.set_string(key, value).await {
            tracing::warn!(key, %error, "failed to persist field");
        }
    }

    async fn persist_bool(&self, key: &str, value: bool) {
        if let Err(error) = self.store.set_bool(key, value).await {
            tracing::warn!(key, %error, "failed to persist field");
        }
    }

    /// Sets the Gr4vy merchant id (admin setting).
    pub async fn set_gr4vy_id(&mut self, value: String) {
        self.state.gr4vy_id = value;
        self.persist_string(keys::GR4VY_ID, &self.state.gr4vy_id).await;
    }

    /// Sets the API token (admin setting).
    pub async fn set_api_token(&mut self, value: String) {
        self.state.api_token = value;
        self.persist_string(keys::API_TOKEN, &self.state.api_token).await;
    }

    /// Sets the server environment raw value (admin setting).
    pub async fn set_server_environment(&mut self, value: String) {
        self.state.server_environment = value;
        self.persist_string(keys::SERVER_ENVIRONMENT, &self.state.server_environment)
            .await;
    }

    /// Sets the request timeout in seconds, as entered (admin setting).
    pub async fn set_timeout(&mut self, value: String) {
        self.state.timeout = value;
        self.persist_string(keys::TIMEOUT, &self.state.timeout).await;
    }

    /// Sets the checkout session id.
    pub async fn set_checkout_session_id(&mut self, value: String) {
        self.state.checkout_session_id = value;
        self.persist_string(keys::CHECKOUT_SESSION_ID, &self.state.checkout_session_id)
            .await;
    }

    /// Switches the active payment-method selector.
    pub async fn set_payment_method_type(&mut self, value: PaymentMethodType) {
        self.state.payment_method_type = value;
        self.persist_string(keys::PAYMENT_METHOD_TYPE, value.raw_value())
            .await;
    }

    /// Sets the card number.
    pub async fn set_card_number(&mut self, value: String) {
        self.state.card_number = value;
        self.persist_string(keys::CARD_NUMBER, &self.state.card_number).await;
    }

    /// Sets the card expiration date.
    pub async fn set_expiration_date(&mut self, value: String) {
        self.state.expiration_date = value;
        self.persist_string(keys::EXPIRATION_DATE, &self.state.expiration_date)
            .await;
    }

    /// Sets the card security code.
    pub async fn set_security_code(&mut self, value: String) {
        self.state.security_code = value;
        self.persist_string(keys::SECURITY_CODE, &self.state.security_code)
            .await;
    }

    /// Sets the stored payment method id.
    pub async fn set_payment_method_id(&mut self, value: String) {
        self.state.payment_method_id = value;
        self.persist_string(keys::PAYMENT_METHOD_ID, &self.state.payment_method_id)
            .await;
    }

    /// Sets the security code for the stored payment method.
    pub async fn set_id_security_code(&mut self, value: String) {
        self.state.id_security_code = value;
        self.persist_string(keys::ID_SECURITY_CODE, &self.state.id_security_code)
            .await;
    }

    /// Toggles 3-D Secure authentication for card submissions.
    pub async fn set_authenticate(&mut self, value: bool) {
        self.state.authenticate = value;
        self.persist_bool(keys::AUTHENTICATE, value).await;
    }

    /// Sets the 3DS challenge timeout in minutes. Input is filtered to at
    /// most two digits, like the original entry field.
    pub async fn set_sdk_max_timeout(&mut self, value: &str) {
        let filtered: String = value.chars().filter(char::is_ascii_digit).take(2).collect();
        self.state.sdk_max_timeout = filtered;
        self.persist_string(keys::SDK_MAX_TIMEOUT, &self.state.sdk_max_timeout)
            .await;
    }

    /// Selects a theme preset by raw value.
    pub async fn select_theme(&mut self, raw_value: &str) {
        let option = ThemeOption::from_raw(raw_value);
        self.state.theme = option.raw_value().to_owned();
        self.persist_string(keys::THEME, option.raw_value()).await;
    }

    /// Selects a test-card preset by raw value.
    ///
    /// A non-custom preset overwrites number, expiration and cvv together
    /// and persists all three; selecting `custom` keeps whatever is there.
    pub async fn select_test_card(&mut self, raw_value: &str) {
        let card = cards::from_raw(raw_value);
        self.state.test_card = card.raw_value.to_owned();
        self.persist_string(keys::TEST_CARD, card.raw_value).await;

        if !card.is_custom() {
            self.state.card_number = card.number.to_owned();
            self.state.expiration_date = card.expiration_date.to_owned();
            self.state.security_code = card.cvv.to_owned();
            self.persist_string(keys::CARD_NUMBER, card.number).await;
            self.persist_string(keys::EXPIRATION_DATE, card.expiration_date)
                .await;
            self.persist_string(keys::SECURITY_CODE, card.cvv).await;
        }
    }

    /// Resets the card form: selection back to `custom`, card fields blank.
    pub async fn clear_form(&mut self) {
        self.state.test_card = cards::CUSTOM.raw_value.to_owned();
        self.state.card_number = String::new();
        self.state.expiration_date = String::new();
        self.state.security_code = String::new();
        self.persist_string(keys::TEST_CARD, cards::CUSTOM.raw_value).await;
        self.persist_string(keys::CARD_NUMBER, "").await;
        self.persist_string(keys::EXPIRATION_DATE, "").await;
        self.persist_string(keys::SECURITY_CODE, "").await;
    }

    /// Runs the submit flow against a real [`Gr4vy`] client.
    pub async fn submit(&self) -> TokenizationOutcome {
        self.submit_with(|config| {
            Gr4vy::new(config).map(|client| Box::new(client) as Box<dyn TokenizationApi>)
        })
        .await
    }

    /// Runs the submit flow with a caller-supplied client factory.
    ///
    /// The factory is only invoked once configuration and form validation
    /// have passed.
    pub async fn submit_with<F>(&self, factory: F) -> TokenizationOutcome
    where
        F: FnOnce(Gr4vyConfig) -> Result<Box<dyn TokenizationApi>, Gr4vyError>,
    {
        let _busy = BusyGuard::engage(&self.busy);

        let gr4vy_id = self.state.gr4vy_id.trim().to_owned();
        if gr4vy_id.is_empty() {
            return TokenizationOutcome::failure(
                "Configuration Error",
                "Please configure Gr4vy ID in Admin settings",
            );
        }

        let token = self.state.api_token.trim();
        if token.is_empty() {
            return TokenizationOutcome::failure(
                "Configuration Error",
                "Please configure API Token in Admin settings",
            );
        }

        let session_id = self.state.checkout_session_id.trim();
        if session_id.is_empty() {
            return TokenizationOutcome::failure(
                "Validation Error",
                "Please enter checkout_session_id",
            );
        }

        let server = Gr4vyServer::from_raw(&self.state.server_environment);
        let mut config = Gr4vyConfig::new(&gr4vy_id, token)
            .with_server(server)
            .with_debug(true);
        if let Some(timeout) = parse_request_timeout(&self.state.timeout) {
            config = config.with_timeout(timeout);
        }
        if let Some(host) = &self.challenge_host {
            config = config.with_challenge_host(Arc::clone(host));
        }

        let api = match factory(config) {
            Ok(api) => api,
            Err(error) => {
                return TokenizationOutcome::failure(
                    "SDK Configuration Error",
                    &format!("Failed to configure Gr4vy SDK: {error}"),
                );
            }
        };

        let request = CheckoutSessionRequest::new(self.state.payment_method());

        if self.state.payment_method_type == PaymentMethodType::Card && self.state.authenticate {
            let options = AuthenticationOptions {
                authenticate: true,
                timeout_minutes: clamp_timeout_minutes(&self.state.sdk_max_timeout),
                theme: ThemeOption::from_raw(&self.state.theme).customization(),
            };
            match api
                .tokenize_with_authentication(session_id, &request, &options)
                .await
            {
                Ok(result) => authenticated_outcome(&result),
                Err(error) => classify(&error, &gr4vy_id),
            }
        } else {
            match api.tokenize(session_id, &request).await {
                Ok(response) => {
                    let raw = response.raw_response;
                    // 204 No Content is still a success; give it a body.
                    if raw.trim().is_empty() {
                        TokenizationOutcome::Success("{\"result\": \"OK\"}".to_owned())
                    } else {
                        TokenizationOutcome::Success(raw)
                    }
                }
                Err(error) => classify(&error, &gr4vy_id),
            }
        }
    }
}

impl std::fmt::Debug for FieldsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldsController")
            .field("state", &self.state)
            .field("busy", &self.is_busy())
            .field("has_challenge_host", &self.challenge_host.is_some())
            .finish_non_exhaustive()
    }
}

/// Parses the admin request timeout: seconds as a float, ignored when
/// non-positive, unparsable, or beyond what a [`Duration`] can hold.
fn parse_request_timeout(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| *t > 0.0)
        .and_then(|t| Duration::try_from_secs_f64(t).ok())
}

/// Parses the challenge timeout in minutes, clamped to the `5..=99` range
/// the authentication engine accepts; 5 on parse failure.
fn clamp_timeout_minutes(value: &str) -> u8 {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .map_or(5, |minutes| u8::try_from(minutes.clamp(5, 99)).unwrap_or(5))
}

/// Builds the success body for the authenticated path: the authentication
/// sub-result plus the tokenization flag.
fn authenticated_outcome(result: &AuthenticatedTokenizeResult) -> TokenizationOutcome {
    let authentication = result.authentication.as_ref().map_or_else(
        || serde_json::json!({}),
        |auth| {
            serde_json::json!({
                "transaction_status": auth.transaction_status,
                "attempted": auth.attempted,
                "timed_out": auth.has_timed_out,
                "user_cancelled": auth.has_cancelled,
                "type": auth.kind,
            })
        },
    );
    let body = serde_json::json!({
        "authentication": authentication,
        "tokenized": result.tokenized,
    });
    match serde_json::to_string_pretty(&body) {
        Ok(body) => TokenizationOutcome::Success(body),
        Err(error) => {
            TokenizationOutcome::failure("Unexpected Error", &error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use async_trait::async_trait;
    use gr4vy::models::{PaymentMethod, TokenizeResponse};
    use gr4vy::threeds::AuthenticationResult;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Seen {
        plain_calls: u32,
        auth_calls: u32,
        timeout_minutes: Option<u8>,
        theme_present: Option<bool>,
        request: Option<CheckoutSessionRequest>,
    }

    /// Records calls and answers with canned responses.
    struct StubApi {
        plain_body: String,
        plain_error: Mutex<Option<Gr4vyError>>,
        seen: Arc<Mutex<Seen>>,
    }

    impl StubApi {
        fn new(seen: Arc<Mutex<Seen>>) -> Self {
            Self {
                plain_body: "{\"id\": \"cs-1\"}".to_owned(),
                plain_error: Mutex::new(None),
                seen,
            }
        }
    }

    #[async_trait]
    impl TokenizationApi for StubApi {
        async fn tokenize(
            &self,
            _session_id: &str,
            request: &CheckoutSessionRequest,
        ) -> Result<TokenizeResponse, Gr4vyError> {
            let mut seen = self.seen.lock().expect("lock");
            seen.plain_calls += 1;
            seen.request = Some(request.clone());
            if let Some(error) = self.plain_error.lock().expect("lock").take() {
                return Err(error);
            }
            Ok(TokenizeResponse {
                raw_response: self.plain_body.clone(),
            })
        }

        async fn tokenize_with_authentication(
            &self,
            _session_id: &str,
            request: &CheckoutSessionRequest,
            options: &AuthenticationOptions,
        ) -> Result<AuthenticatedTokenizeResult, Gr4vyError> {
            let mut seen = self.seen.lock().expect("lock");
            seen.auth_calls += 1;
            seen.timeout_minutes = Some(options.timeout_minutes);
            seen.theme_present = Some(options.theme.is_some());
            seen.request = Some(request.clone());
            Ok(AuthenticatedTokenizeResult {
                tokenized: true,
                authentication: Some(AuthenticationResult {
                    transaction_status: Some("Y".to_owned()),
                    attempted: true,
                    has_timed_out: false,
                    has_cancelled: false,
                    kind: Some("challenge".to_owned()),
                }),
            })
        }
    }

    /// Accepts nothing: every write fails as a store I/O error.
    struct FailingStore;

    #[async_trait]
    impl PreferencesStore for FailingStore {
        async fn get_string(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn set_string(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn get_bool(&self, _key: &str) -> Result<Option<bool>, StoreError> {
            Ok(None)
        }

        async fn set_bool(&self, _key: &str, _value: bool) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    async fn configured_controller() -> FieldsController {
        let store: Arc<dyn PreferencesStore> = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(store);
        controller.set_gr4vy_id("acme".to_owned()).await;
        controller.set_api_token("token".to_owned()).await;
        controller.set_checkout_session_id("cs-1".to_owned()).await;
        controller
    }

    fn stub_factory(
        seen: &Arc<Mutex<Seen>>,
    ) -> impl FnOnce(Gr4vyConfig) -> Result<Box<dyn TokenizationApi>, Gr4vyError> {
        let seen = Arc::clone(seen);
        move |_config| Ok(Box::new(StubApi::new(seen)))
    }

    #[tokio::test]
    async fn test_missing_gr4vy_id_short_circuits() {
        let store: Arc<dyn PreferencesStore> = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(store);
        controller.set_api_token("token".to_owned()).await;
        controller.set_checkout_session_id("cs-1".to_owned()).await;

        let constructed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&constructed);
        let outcome = controller
            .submit_with(move |_config| {
                flag.store(true, Ordering::SeqCst);
                Ok(Box::new(StubApi::new(Arc::default())) as Box<dyn TokenizationApi>)
            })
            .await;

        assert_eq!(outcome.title(), "Configuration Error");
        assert!(!constructed.load(Ordering::SeqCst), "no client constructed");
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_missing_api_token_short_circuits() {
        let store: Arc<dyn PreferencesStore> = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(store);
        controller.set_gr4vy_id("acme".to_owned()).await;
        controller.set_api_token("   ".to_owned()).await;
        controller.set_checkout_session_id("cs-1".to_owned()).await;

        let outcome = controller.submit_with(stub_factory(&Arc::default())).await;
        assert_eq!(outcome.title(), "Configuration Error");
    }

    #[tokio::test]
    async fn test_missing_session_id_is_validation_error() {
        let store: Arc<dyn PreferencesStore> = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(store);
        controller.set_gr4vy_id("acme".to_owned()).await;
        controller.set_api_token("token".to_owned()).await;

        let outcome = controller.submit_with(stub_factory(&Arc::default())).await;
        assert_eq!(outcome.title(), "Validation Error");
    }

    #[tokio::test]
    async fn test_factory_failure_is_sdk_configuration_error() {
        let controller = configured_controller().await;
        let outcome = controller
            .submit_with(|_config| Err(Gr4vyError::InvalidGr4vyId("nope".to_owned())))
            .await;
        assert_eq!(outcome.title(), "SDK Configuration Error");
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_card_with_authenticate_uses_threeds_path() {
        let mut controller = configured_controller().await;
        controller.set_authenticate(true).await;
        controller.select_theme("redBlue").await;

        let seen = Arc::new(Mutex::new(Seen::default()));
        let outcome = controller.submit_with(stub_factory(&seen)).await;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.auth_calls, 1);
        assert_eq!(seen.plain_calls, 0);
        assert_eq!(seen.theme_present, Some(true));

        let body: serde_json::Value = serde_json::from_str(outcome.body()).unwrap();
        assert_eq!(body["authentication"]["transaction_status"], "Y");
        assert_eq!(body["authentication"]["type"], "challenge");
        assert_eq!(body["tokenized"], true);
    }

    #[tokio::test]
    async fn test_card_without_authenticate_uses_plain_path() {
        let mut controller = configured_controller().await;
        controller.set_authenticate(false).await;

        let seen = Arc::new(Mutex::new(Seen::default()));
        let outcome = controller.submit_with(stub_factory(&seen)).await;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.plain_calls, 1);
        assert_eq!(seen.auth_calls, 0);

        let body: serde_json::Value = serde_json::from_str(outcome.body()).unwrap();
        assert!(body.get("authentication").is_none());
    }

    #[tokio::test]
    async fn test_id_selector_uses_plain_path_even_with_authenticate() {
        let mut controller = configured_controller().await;
        controller.set_authenticate(true).await;
        controller
            .set_payment_method_type(PaymentMethodType::Id)
            .await;
        controller.set_payment_method_id("pm-9".to_owned()).await;

        let seen = Arc::new(Mutex::new(Seen::default()));
        let _ = controller.submit_with(stub_factory(&seen)).await;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.plain_calls, 1);
        assert_eq!(seen.auth_calls, 0);
        match &seen.request.as_ref().expect("request").payment_method {
            PaymentMethod::Id { id, .. } => assert_eq!(id, "pm-9"),
            other => panic!("expected id payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_minutes_clamped_into_range() {
        for (input, expected) in [("3", 5), ("99", 99), ("120", 99), ("abc", 5), ("", 5)] {
            let mut controller = configured_controller().await;
            controller.state.sdk_max_timeout = input.to_owned();

            let seen = Arc::new(Mutex::new(Seen::default()));
            let _ = controller.submit_with(stub_factory(&seen)).await;
            let seen = seen.lock().expect("lock");
            assert_eq!(seen.timeout_minutes, Some(expected), "input {input:?}");
        }
    }

    #[tokio::test]
    async fn test_empty_plain_response_normalized() {
        let mut controller = configured_controller().await;
        controller.set_authenticate(false).await;

        let seen = Arc::new(Mutex::new(Seen::default()));
        let seen_clone = Arc::clone(&seen);
        let outcome = controller
            .submit_with(move |_config| {
                let api = StubApi {
                    plain_body: String::new(),
                    ..StubApi::new(seen_clone)
                };
                Ok(Box::new(api) as Box<dyn TokenizationApi>)
            })
            .await;

        assert_eq!(outcome.body(), "{\"result\": \"OK\"}");
    }

    #[tokio::test]
    async fn test_sdk_failure_is_classified() {
        let mut controller = configured_controller().await;
        controller.set_authenticate(false).await;

        let seen = Arc::new(Mutex::new(Seen::default()));
        let seen_clone = Arc::clone(&seen);
        let outcome = controller
            .submit_with(move |_config| {
                let api = StubApi::new(seen_clone);
                *api.plain_error.lock().expect("lock") = Some(Gr4vyError::Network {
                    message: "request timeout: deadline elapsed".to_owned(),
                });
                Ok(Box::new(api) as Box<dyn TokenizationApi>)
            })
            .await;

        assert_eq!(outcome.title(), "Request timed out");
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_busy_flag_set_during_submission() {
        struct BusyProbe {
            busy: Arc<AtomicBool>,
            observed: Arc<AtomicBool>,
        }

        #[async_trait]
        impl TokenizationApi for BusyProbe {
            async fn tokenize(
                &self,
                _session_id: &str,
                _request: &CheckoutSessionRequest,
            ) -> Result<TokenizeResponse, Gr4vyError> {
                self.observed
                    .store(self.busy.load(Ordering::SeqCst), Ordering::SeqCst);
                Ok(TokenizeResponse::default())
            }

            async fn tokenize_with_authentication(
                &self,
                _session_id: &str,
                _request: &CheckoutSessionRequest,
                _options: &AuthenticationOptions,
            ) -> Result<AuthenticatedTokenizeResult, Gr4vyError> {
                Ok(AuthenticatedTokenizeResult::default())
            }
        }

        let mut controller = configured_controller().await;
        controller.set_authenticate(false).await;
        assert!(!controller.is_busy());

        let observed = Arc::new(AtomicBool::new(false));
        let probe = BusyProbe {
            busy: Arc::clone(&controller.busy),
            observed: Arc::clone(&observed),
        };
        let _ = controller
            .submit_with(move |_config| Ok(Box::new(probe) as Box<dyn TokenizationApi>))
            .await;

        assert!(observed.load(Ordering::SeqCst), "busy during the call");
        assert!(!controller.is_busy(), "busy cleared afterwards");
    }

    #[tokio::test]
    async fn test_test_card_selection_is_all_or_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(Arc::clone(&store) as Arc<dyn PreferencesStore>);

        controller.select_test_card("visaFrictionless").await;
        assert_eq!(controller.state().card_number, "4556557955726624");
        assert_eq!(controller.state().expiration_date, "01/30");
        assert_eq!(controller.state().security_code, "123");
        assert_eq!(
            store.get_string(keys::CARD_NUMBER).await.unwrap().as_deref(),
            Some("4556557955726624")
        );
        assert_eq!(
            store
                .get_string(keys::EXPIRATION_DATE)
                .await
                .unwrap()
                .as_deref(),
            Some("01/30")
        );
        assert_eq!(
            store.get_string(keys::SECURITY_CODE).await.unwrap().as_deref(),
            Some("123")
        );

        // Switching back to custom keeps the populated values.
        controller.select_test_card("custom").await;
        assert_eq!(controller.state().test_card, "custom");
        assert_eq!(controller.state().card_number, "4556557955726624");
        assert_eq!(
            store.get_string(keys::CARD_NUMBER).await.unwrap().as_deref(),
            Some("4556557955726624")
        );
    }

    #[tokio::test]
    async fn test_clear_form_blanks_card_fields() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(Arc::clone(&store) as Arc<dyn PreferencesStore>);

        controller.select_test_card("jcbChallenge").await;
        controller.clear_form().await;

        assert_eq!(controller.state().test_card, "custom");
        assert!(controller.state().card_number.is_empty());
        assert_eq!(
            store.get_string(keys::CARD_NUMBER).await.unwrap().as_deref(),
            Some("")
        );
    }

    #[tokio::test]
    async fn test_field_changes_write_through_to_store() {
        let store = Arc::new(MemoryStore::new());
        let mut controller = FieldsController::new(Arc::clone(&store) as Arc<dyn PreferencesStore>);

        controller.set_checkout_session_id("cs-42".to_owned()).await;
        controller.set_sdk_max_timeout("12abc34").await;

        assert_eq!(
            store
                .get_string(keys::CHECKOUT_SESSION_ID)
                .await
                .unwrap()
                .as_deref(),
            Some("cs-42")
        );
        // Digits only, capped at two characters.
        assert_eq!(controller.state().sdk_max_timeout, "12");
    }

    #[tokio::test]
    async fn test_store_write_failures_never_block_editing_or_submit() {
        let store: Arc<dyn PreferencesStore> = Arc::new(FailingStore);
        let mut controller = FieldsController::new(store);
        controller.set_gr4vy_id("acme".to_owned()).await;
        controller.set_api_token("token".to_owned()).await;
        controller.set_checkout_session_id("cs-1".to_owned()).await;
        controller.set_authenticate(false).await;
        controller.select_test_card("visaFrictionless").await;

        // Local state updates despite every persist failing.
        assert_eq!(controller.state().gr4vy_id, "acme");
        assert_eq!(controller.state().card_number, "4556557955726624");
        assert!(!controller.state().authenticate);

        let seen = Arc::new(Mutex::new(Seen::default()));
        let outcome = controller.submit_with(stub_factory(&seen)).await;
        assert!(!outcome.is_failure());
        assert_eq!(seen.lock().expect("lock").plain_calls, 1);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_parse_request_timeout() {
        assert_eq!(parse_request_timeout("2.5"), Some(Duration::from_millis(2500)));
        assert_eq!(parse_request_timeout(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(parse_request_timeout("0"), None);
        assert_eq!(parse_request_timeout("-1"), None);
        assert_eq!(parse_request_timeout("soon"), None);
        assert_eq!(parse_request_timeout(""), None);
        // Values a Duration cannot hold are ignored, not a panic.
        assert_eq!(parse_request_timeout("1e30"), None);
        assert_eq!(parse_request_timeout("inf"), None);
        assert_eq!(parse_request_timeout("NaN"), None);
    }
}
