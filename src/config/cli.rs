use crate::config::toml_config::{TomlConfig, MAX_DELAY_MS};
use crate::core::listing::detect_platform;
use crate::domain::model::{ListingInput, Platform};
use crate::utils::error::{NegotiationError, Result};
use crate::utils::validation::{validate_price, validate_range, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "lowbal")]
#[command(about = "Draft counter-offers and negotiation messages for marketplace listings")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Suggest a counter-offer and a message to send the seller
    Offer(OfferArgs),
    /// Suggest a reply to something the seller wrote
    Reply(ReplyArgs),
    /// Detect the marketplace from a listing URL
    Detect {
        /// Listing URL
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct OfferArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,

    /// Zillow, Facebook, eBay, Craigslist, OfferUp or any other name
    #[arg(long)]
    pub platform: Option<String>,

    /// Listing URL, used to detect the platform when --platform is absent
    #[arg(long)]
    pub url: Option<String>,

    /// real-estate, cars, electronics or furniture
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Seed the random source for reproducible suggestions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cosmetic delay before printing, overrides the config file
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct ReplyArgs {
    /// What the seller wrote
    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub category: Option<String>,

    /// Offer to substitute into the reply
    #[arg(long, allow_negative_numbers = true)]
    pub offer: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl OfferArgs {
    /// 平台來源優先順序：--platform > --url > 設定檔預設值
    pub fn resolve_platform(&self, config: &TomlConfig) -> Result<Platform> {
        if let Some(platform) = &self.platform {
            return Ok(Platform::from(platform.as_str()));
        }
        if let Some(url) = &self.url {
            let platform = detect_platform(url)?;
            tracing::info!("🔗 Detected platform '{}' from listing URL", platform);
            return Ok(platform);
        }
        config
            .default_platform()
            .ok_or_else(|| NegotiationError::MissingField {
                field: "platform".to_string(),
            })
    }

    pub fn to_listing(&self, config: &TomlConfig) -> Result<ListingInput> {
        Ok(ListingInput {
            title: self.title.clone(),
            price: self.price,
            platform: self.resolve_platform(config)?,
            category: self.category.clone(),
            notes: self.notes.clone(),
        })
    }

    pub fn effective_delay_ms(&self, config: &TomlConfig) -> u64 {
        self.delay_ms.unwrap_or_else(|| config.delay_ms())
    }
}

impl Validate for OfferArgs {
    fn validate(&self) -> Result<()> {
        if let Some(delay) = self.delay_ms {
            validate_range("delay_ms", delay, 0, MAX_DELAY_MS)?;
        }
        Ok(())
    }
}

impl Validate for ReplyArgs {
    fn validate(&self) -> Result<()> {
        if let Some(offer) = self.offer {
            validate_price(offer)?;
        }
        Ok(())
    }
}
