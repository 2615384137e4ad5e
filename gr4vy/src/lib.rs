#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client library for the Gr4vy payment tokenization API.
//!
//! This crate is a thin boundary over the externally operated Gr4vy service:
//! it builds checkout-session tokenization requests, submits them over HTTP,
//! and surfaces the service's failure modes as typed error variants. The
//! heavy machinery — session handling, the 3-D Secure challenge state
//! machine, cryptography — lives on the other side of the wire and behind
//! the pluggable [`ChallengeHost`](threeds::ChallengeHost) seam; nothing in
//! this crate reimplements it.
//!
//! # Overview
//!
//! A [`Gr4vy`](client::Gr4vy) client is constructed from a merchant
//! identifier, an API token, and a target [`Gr4vyServer`](server::Gr4vyServer)
//! environment. It exposes two operations:
//!
//! - [`tokenize`](client::Gr4vy::tokenize) — exchanges payment details for an
//!   opaque token attached to a checkout session, returning the raw response
//!   body.
//! - [`tokenize_with_authentication`](client::Gr4vy::tokenize_with_authentication)
//!   — the same exchange followed by the 3-D Secure authentication sub-flow,
//!   optionally skinned with a [`UiCustomizationMap`](threeds::UiCustomizationMap).
//!
//! Both are also available behind the [`TokenizationApi`](api::TokenizationApi)
//! trait so callers can substitute test doubles.
//!
//! # Modules
//!
//! - [`api`] - Trait abstraction over the two tokenize operations
//! - [`client`] - Reqwest-backed HTTP client and its configuration
//! - [`error`] - Typed failure variants
//! - [`models`] - Payment-method payload types
//! - [`server`] - Sandbox/production environments and API host derivation
//! - [`threeds`] - 3-D Secure theme bundles, results, and the challenge host seam

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod server;
pub mod threeds;

pub use api::TokenizationApi;
pub use client::{Gr4vy, Gr4vyConfig};
pub use error::Gr4vyError;
pub use models::{CheckoutSessionRequest, PaymentMethod, TokenizeResponse};
pub use server::Gr4vyServer;
