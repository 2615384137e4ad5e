//! Trait abstraction over the tokenize operations.
//!
//! The demo's form controller depends on this trait rather than on the
//! concrete [`Gr4vy`](crate::client::Gr4vy) client, so tests can substitute
//! an in-memory double without any network.

use async_trait::async_trait;

use crate::error::Gr4vyError;
use crate::models::{CheckoutSessionRequest, TokenizeResponse};
use crate::threeds::{AuthenticatedTokenizeResult, AuthenticationOptions};

/// The two operations the Gr4vy service exposes for checkout-session
/// tokenization.
#[async_trait]
pub trait TokenizationApi: Send + Sync {
    /// Tokenizes the payment method attached to the checkout session and
    /// returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns a [`Gr4vyError`] variant describing the failure mode.
    async fn tokenize(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<TokenizeResponse, Gr4vyError>;

    /// Tokenizes and then runs the 3-D Secure authentication sub-flow.
    ///
    /// # Errors
    ///
    /// Returns a [`Gr4vyError`] variant describing the failure mode.
    async fn tokenize_with_authentication(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
        options: &AuthenticationOptions,
    ) -> Result<AuthenticatedTokenizeResult, Gr4vyError>;
}
