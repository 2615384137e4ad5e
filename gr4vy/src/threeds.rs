//! 3-D Secure types: challenge-UI theme bundles, authentication results,
//! and the pluggable challenge host seam.
//!
//! The challenge state machine itself belongs to the externally supplied
//! authentication engine. This module only carries the data handed across
//! that boundary: styling for the challenge UI and the terminal result of
//! the interaction.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Gr4vyError;

/// Buttons that can be restyled inside the challenge UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRole {
    /// The primary submit action.
    Submit,
    /// The continue action on informational pages.
    Continue,
    /// The cancel action.
    Cancel,
}

/// Styling for a single challenge-UI button role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonCustomization {
    /// Platform font name; the engine's default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_font_name: Option<String>,
    /// Font size in points.
    pub text_font_size: u16,
    /// Text color as `#rrggbb`.
    pub text_color_hex: String,
    /// Background color as `#rrggbb`.
    pub background_color_hex: String,
    /// Corner radius in points.
    pub corner_radius: u16,
}

/// Styling for body and heading labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCustomization {
    /// Body font name.
    pub text_font_name: String,
    /// Body font size in points.
    pub text_font_size: u16,
    /// Body text color as `#rrggbb`.
    pub text_color_hex: String,
    /// Heading font name.
    pub heading_text_font_name: String,
    /// Heading font size in points.
    pub heading_text_font_size: u16,
    /// Heading text color as `#rrggbb`.
    pub heading_text_color_hex: String,
}

/// Styling for the challenge toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarCustomization {
    /// Toolbar font name.
    pub text_font_name: String,
    /// Toolbar font size in points.
    pub text_font_size: u16,
    /// Toolbar text color as `#rrggbb`.
    pub text_color_hex: String,
    /// Toolbar background color as `#rrggbb`.
    pub background_color_hex: String,
    /// Title shown in the toolbar.
    pub header_text: String,
    /// Label of the toolbar dismiss button.
    pub button_text: String,
}

/// Styling for text entry boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBoxCustomization {
    /// Entry font name.
    pub text_font_name: String,
    /// Entry font size in points.
    pub text_font_size: u16,
    /// Entry text color as `#rrggbb`.
    pub text_color_hex: String,
    /// Border width in points.
    pub border_width: u16,
    /// Border color as `#rrggbb`.
    pub border_color_hex: String,
    /// Corner radius in points.
    pub corner_radius: u16,
}

/// Background colors for the challenge and progress views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCustomization {
    /// Challenge view background as `#rrggbb`.
    pub challenge_view_background_color_hex: String,
    /// Progress view background as `#rrggbb`.
    pub progress_view_background_color_hex: String,
}

/// A complete styling bundle for one appearance (light or dark).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCustomization {
    /// Label styling.
    pub label: LabelCustomization,
    /// Toolbar styling.
    pub toolbar: ToolbarCustomization,
    /// Text box styling.
    pub text_box: TextBoxCustomization,
    /// View background styling.
    pub view: ViewCustomization,
    /// Per-button-role styling.
    pub buttons: HashMap<ButtonRole, ButtonCustomization>,
}

/// Light/dark pair of styling bundles applied to the challenge UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCustomizationMap {
    /// Bundle used in light appearance (and as the fallback).
    pub default: UiCustomization,
    /// Bundle used in dark appearance.
    pub dark: UiCustomization,
}

/// Outcome of the authentication sub-flow attached to a 3DS tokenize call.
///
/// A cardholder cancelling inside the challenge UI is reported here as
/// `has_cancelled`, not as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    /// Transaction status reported by the directory server (e.g. `Y`, `N`, `A`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<String>,
    /// Whether a challenge was actually attempted.
    pub attempted: bool,
    /// Whether the challenge hit the configured timeout.
    pub has_timed_out: bool,
    /// Whether the cardholder cancelled inside the challenge UI.
    pub has_cancelled: bool,
    /// Authentication type, e.g. `frictionless` or `challenge`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Combined result of tokenize-with-authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedTokenizeResult {
    /// Whether the payment method was tokenized.
    pub tokenized: bool,
    /// The authentication sub-result, when authentication ran.
    pub authentication: Option<AuthenticationResult>,
}

/// Options controlling the authentication sub-flow.
#[derive(Debug, Clone)]
pub struct AuthenticationOptions {
    /// Whether to run authentication at all.
    pub authenticate: bool,
    /// Challenge timeout in minutes. The engine accepts `5..=99`; callers
    /// clamp before handing the value in.
    pub timeout_minutes: u8,
    /// Optional challenge-UI theme bundle.
    pub theme: Option<UiCustomizationMap>,
}

impl Default for AuthenticationOptions {
    fn default() -> Self {
        Self {
            authenticate: true,
            timeout_minutes: 5,
            theme: None,
        }
    }
}

/// Challenge parameters handed to a [`ChallengeHost`].
#[derive(Debug)]
pub struct ChallengeRequest<'a> {
    /// Server-provided challenge payload, passed through opaquely.
    pub parameters: &'a serde_json::Value,
    /// Challenge timeout in minutes.
    pub timeout_minutes: u8,
    /// Theme bundle to apply to the challenge UI, if any.
    pub theme: Option<&'a UiCustomizationMap>,
}

/// Hosts the interactive 3-D Secure challenge.
///
/// Implementations hand the server's challenge parameters to the external
/// authentication engine together with the UI surface it should render on,
/// and report how the interaction ended. A user cancellation is a normal
/// [`AuthenticationResult`] with `has_cancelled` set; only engine failures
/// are returned as errors.
#[async_trait]
pub trait ChallengeHost: Send + Sync {
    /// Runs the challenge to completion, timeout, or cancellation.
    async fn run_challenge(
        &self,
        request: ChallengeRequest<'_>,
    ) -> Result<AuthenticationResult, Gr4vyError>;
}
