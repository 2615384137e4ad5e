//! Command-line front end for the tokenization form.
//!
//! # Usage
//!
//! ```bash
//! # Configure once; values persist in the preferences file
//! gr4vy-demo --gr4vy-id acme --api-token "$GR4VY_API_TOKEN" tokenize \
//!     --session-id 7f61e9a0-6a4c-4a6e-9a19-3a1b0e7c9f2d --test-card visaFrictionless
//!
//! # Subsequent runs reuse the persisted fields
//! gr4vy-demo tokenize
//!
//! # List the available test-card presets
//! gr4vy-demo cards
//! ```
//!
//! # Environment Variables
//!
//! - `GR4VY_API_TOKEN` — API token, as an alternative to `--api-token`
//! - `RUST_LOG` — Log level filter (default: `warn`)

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gr4vy_demo::cards::TEST_CARDS;
use gr4vy_demo::controller::FieldsController;
use gr4vy_demo::form::PaymentMethodType;
use gr4vy_demo::prefs::{JsonFileStore, PreferencesStore};
use gr4vy_demo::themes::THEME_OPTIONS;

/// Demo client for tokenizing payment methods against a checkout session.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Preferences file where form fields and admin settings persist.
    #[arg(long, value_name = "FILE", default_value = "gr4vy-demo.json")]
    prefs: PathBuf,

    /// Gr4vy merchant id (admin setting).
    #[arg(long)]
    gr4vy_id: Option<String>,

    /// API token (admin setting).
    #[arg(long, env = "GR4VY_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Server environment: `sandbox` or `production` (admin setting).
    #[arg(long)]
    environment: Option<String>,

    /// HTTP request timeout in seconds (admin setting).
    #[arg(long)]
    timeout: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Tokenizes the payment method described by the form fields.
    Tokenize(TokenizeArgs),
    /// Lists the test-card presets and theme options.
    Cards,
    /// Resets the card form fields to their defaults.
    Clear,
}

#[derive(Debug, Default, clap::Args)]
struct TokenizeArgs {
    /// Checkout session id to tokenize against.
    #[arg(long)]
    session_id: Option<String>,

    /// Payment-method selector: `card` or `id`.
    #[arg(long)]
    method: Option<String>,

    /// Card number.
    #[arg(long)]
    card_number: Option<String>,

    /// Card expiration date, `MM/YY`.
    #[arg(long)]
    expiration_date: Option<String>,

    /// Card security code.
    #[arg(long)]
    security_code: Option<String>,

    /// Stored payment method id, for `--method id`.
    #[arg(long)]
    payment_method_id: Option<String>,

    /// Security code for the stored payment method.
    #[arg(long)]
    id_security_code: Option<String>,

    /// Whether to run 3-D Secure authentication for card payments.
    #[arg(long)]
    authenticate: Option<bool>,

    /// Test-card preset to fill the card fields from.
    #[arg(long)]
    test_card: Option<String>,

    /// Challenge-UI theme preset.
    #[arg(long)]
    theme: Option<String>,

    /// Challenge timeout in minutes, `5..=99`.
    #[arg(long)]
    sdk_max_timeout: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("gr4vy-demo failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let store: Arc<dyn PreferencesStore> = Arc::new(JsonFileStore::open(&cli.prefs).await?);
    let mut controller = FieldsController::new(store);
    controller.load().await?;

    if let Some(value) = cli.gr4vy_id {
        controller.set_gr4vy_id(value).await;
    }
    if let Some(value) = cli.api_token {
        controller.set_api_token(value).await;
    }
    if let Some(value) = cli.environment {
        controller.set_server_environment(value).await;
    }
    if let Some(value) = cli.timeout {
        controller.set_timeout(value).await;
    }

    match cli.command.unwrap_or(Command::Tokenize(TokenizeArgs::default())) {
        Command::Tokenize(args) => {
            apply_field_args(&mut controller, args).await;
            let outcome = controller.submit().await;
            println!("{}", outcome.title());
            println!();
            println!("{}", outcome.body());
        }
        Command::Cards => {
            println!("Test cards:");
            for card in TEST_CARDS {
                if card.is_custom() {
                    println!("  {:<22} {}", card.raw_value, card.display_name);
                } else {
                    println!(
                        "  {:<22} {} ({} exp {} cvv {})",
                        card.raw_value, card.display_name, card.number, card.expiration_date,
                        card.cvv
                    );
                }
            }
            println!();
            println!("Themes:");
            for theme in THEME_OPTIONS {
                println!("  {:<22} {}", theme.raw_value(), theme.display_name());
            }
        }
        Command::Clear => {
            controller.clear_form().await;
            println!("Card form cleared.");
        }
    }

    Ok(())
}

async fn apply_field_args(controller: &mut FieldsController, args: TokenizeArgs) {
    if let Some(value) = args.session_id {
        controller.set_checkout_session_id(value).await;
    }
    if let Some(value) = args.method {
        controller
            .set_payment_method_type(PaymentMethodType::from_raw(&value))
            .await;
    }
    // Preset first so explicit card fields can override it.
    if let Some(value) = args.test_card {
        controller.select_test_card(&value).await;
    }
    if let Some(value) = args.card_number {
        controller.set_card_number(value).await;
    }
    if let Some(value) = args.expiration_date {
        controller.set_expiration_date(value).await;
    }
    if let Some(value) = args.security_code {
        controller.set_security_code(value).await;
    }
    if let Some(value) = args.payment_method_id {
        controller.set_payment_method_id(value).await;
    }
    if let Some(value) = args.id_security_code {
        controller.set_id_security_code(value).await;
    }
    if let Some(value) = args.authenticate {
        controller.set_authenticate(value).await;
    }
    if let Some(value) = args.theme {
        controller.select_theme(&value).await;
    }
    if let Some(value) = args.sdk_max_timeout {
        controller.set_sdk_max_timeout(&value).await;
    }
}
