//! Session configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, ValueEnum};
use thiserror::Error;

use crate::loading::{LISTING_DELAY, MENU_DELAY};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// A dish to put in the cart: `restaurant:dish:quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    /// Restaurant id
    pub restaurant_id: String,

    /// Dish id
    pub dish_id: String,

    /// Quantity to add
    pub quantity: u32,
}

/// Errors parsing a cart entry argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartEntryError {
    /// Not shaped like `restaurant:dish[:quantity]`
    #[error("expected restaurant:dish[:quantity], got '{0}'")]
    Malformed(String),

    /// Quantity is not a positive integer
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
}

impl std::str::FromStr for CartEntry {
    type Err = CartEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);

        let (Some(restaurant_id), Some(dish_id)) = (parts.next(), parts.next()) else {
            return Err(CartEntryError::Malformed(s.to_string()));
        };

        let quantity = match parts.next() {
            None => 1,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| CartEntryError::InvalidQuantity(raw.to_string()))?,
        };

        if restaurant_id.is_empty() || dish_id.is_empty() || parts.next().is_some() {
            return Err(CartEntryError::Malformed(s.to_string()));
        }

        Ok(Self {
            restaurant_id: restaurant_id.to_string(),
            dish_id: dish_id.to_string(),
            quantity,
        })
    }
}

/// Larder storefront session configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "larder", about = "Larder storefront session", long_about = None)]
pub struct AppConfig {
    /// Directory holding the restaurants, orders and accounts fixtures
    #[arg(long, env = "LARDER_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set name
    #[arg(short, long, env = "LARDER_FIXTURE_SET", default_value = "default")]
    pub fixture: String,

    /// Signed-in user id
    #[arg(short, long, env = "LARDER_USER", default_value = "user-1")]
    pub user: String,

    /// Listing category to select (e.g. Pizza)
    #[arg(long)]
    pub category: Option<String>,

    /// Listing search term
    #[arg(long)]
    pub search: Option<String>,

    /// Restaurant whose menu to open
    #[arg(short, long, default_value = "1")]
    pub restaurant: String,

    /// Dishes to add, as restaurant:dish[:quantity]; repeatable
    #[arg(short = 'a', long = "add")]
    pub add: Vec<CartEntry>,

    /// Payment method id; the account's first method when omitted
    #[arg(long)]
    pub payment_method: Option<String>,

    /// Simulated listing load time in milliseconds
    #[arg(long, env = "LARDER_LISTING_DELAY_MS", default_value_t = duration_ms(LISTING_DELAY))]
    pub listing_delay_ms: u64,

    /// Simulated menu load time in milliseconds
    #[arg(long, env = "LARDER_MENU_DELAY_MS", default_value_t = duration_ms(MENU_DELAY))]
    pub menu_delay_ms: u64,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Listing load delay
    pub fn listing_delay(&self) -> Duration {
        Duration::from_millis(self.listing_delay_ms)
    }

    /// Menu load delay
    pub fn menu_delay(&self) -> Duration {
        Duration::from_millis(self.menu_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cart_entry_parses_with_default_quantity() -> TestResult {
        let entry: CartEntry = "2:s2".parse()?;

        assert_eq!(entry.restaurant_id, "2");
        assert_eq!(entry.dish_id, "s2");
        assert_eq!(entry.quantity, 1);

        let entry: CartEntry = "1:p1:3".parse()?;

        assert_eq!(entry.quantity, 3);

        Ok(())
    }

    #[test]
    fn cart_entry_rejects_bad_input() {
        assert_eq!(
            "p1".parse::<CartEntry>(),
            Err(CartEntryError::Malformed("p1".to_string()))
        );
        assert_eq!(
            "1:p1:0".parse::<CartEntry>(),
            Err(CartEntryError::InvalidQuantity("0".to_string()))
        );
        assert!("1:p1:2:x".parse::<CartEntry>().is_err());
    }

    #[test]
    fn defaults_and_flags_parse() -> TestResult {
        let config = AppConfig::try_parse_from([
            "larder",
            "--fixtures",
            "fixtures",
            "-a",
            "1:p1:1",
            "--add",
            "2:s2:2",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.fixture, "default");
        assert_eq!(config.add.len(), 2);
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.menu_delay(), MENU_DELAY);

        Ok(())
    }
}
