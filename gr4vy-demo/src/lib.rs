#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Demo form controller for Gr4vy payment tokenization.
//!
//! Recreates the single screen of the official client demo apps as a
//! library plus CLI: editable payment fields mirrored into a persisted
//! key-value store, test-card and 3DS-theme catalogs, and a submit flow
//! that validates configuration, builds the payment-method payload, and
//! hands it to the [`gr4vy`] client — classifying every failure into a
//! display title and JSON body.
//!
//! # Modules
//!
//! - [`cards`] - Fixed catalog of 3DS test cards
//! - [`classify`] - Pure failure-variant → display-outcome mapping
//! - [`controller`] - Form state, write-through persistence, and the submit flow
//! - [`form`] - Form state snapshot and the payment-method selector
//! - [`outcome`] - Terminal result handed to the display boundary
//! - [`prefs`] - Injected key-value preferences store
//! - [`themes`] - Challenge-UI theme presets

pub mod cards;
pub mod classify;
pub mod controller;
pub mod form;
pub mod outcome;
pub mod prefs;
pub mod themes;

pub use controller::FieldsController;
pub use form::{FormState, PaymentMethodType};
pub use outcome::TokenizationOutcome;
