//! Pashle CLI - local storefront accounts, session and cart.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (passwords are read from the environment)
//! PASHLE_PASSWORD=secret1 PASHLE_PASSWORD_CONFIRM=secret1 \
//!     pashle register --name "Asha Rao" --email asha@pashle.in
//!
//! # Log in and out
//! PASHLE_PASSWORD=secret1 pashle login --email asha@pashle.in
//! pashle whoami
//! pashle logout
//!
//! # Cart
//! pashle cart add --name "Linen Kurta" --price 1299 --image kurta.jpg
//! pashle cart list
//! pashle cart remove 0
//! ```
//!
//! # Commands
//!
//! - `register` / `login` / `logout` / `whoami` - Account and session
//! - `cart` - List, add and remove cart items
//! - `carousel` - Walk the testimonial carousel index

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pashle_storefront::config::StorefrontConfig;
use pashle_storefront::error::AppError;
use pashle_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "pashle")]
#[command(author, version, about = "Pashle storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in.
    ///
    /// Password and confirmation are read from `PASHLE_PASSWORD` and
    /// `PASHLE_PASSWORD_CONFIRM`.
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Log in with the password in `PASHLE_PASSWORD`
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Log out
    Logout,
    /// Show who is logged in
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Walk the testimonial carousel
    Carousel {
        /// Number of cards
        #[arg(short, long)]
        len: usize,

        /// Index to show first (any integer, wraps)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        start: i64,

        /// Steps to advance (negative goes backwards)
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        steps: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart items with their index and the total
    List,
    /// Add a catalog item
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in whole currency units
        #[arg(short, long)]
        price: u64,

        /// Image reference
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Add an item from product-card text (e.g. "₹1,299")
    AddDisplayed {
        /// Product name as shown
        #[arg(short, long, default_value = "")]
        name: String,

        /// Price text as shown
        #[arg(short, long)]
        price_text: String,

        /// Image reference
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Remove the item at an index
    Remove {
        /// Zero-based index from `cart list`
        index: usize,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry_environment.clone().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pashle_storefront=info,pashle_cli=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().without_time().with_target(false)))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e.report();
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Register { name, email } => commands::account::register(&state, name, email).await?,
        Commands::Login { email } => commands::account::login(&state, &email).await?,
        Commands::Logout => commands::account::logout(&state)?,
        Commands::Whoami => commands::account::whoami(&state),
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&state),
            CartAction::Add { name, price, image } => {
                commands::cart::add(&state, &name, price, &image)?;
            }
            CartAction::AddDisplayed {
                name,
                price_text,
                image,
            } => commands::cart::add_displayed(&state, &name, &price_text, &image)?,
            CartAction::Remove { index } => commands::cart::remove(&state, index)?,
        },
        Commands::Carousel { len, start, steps } => commands::carousel::walk(len, start, steps),
    }
    Ok(())
}
