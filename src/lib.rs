pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::listing::detect_platform;
pub use crate::core::message::{generate_negotiation_message, generate_negotiation_message_with, TemplateBank};
pub use crate::core::negotiator::Negotiator;
pub use crate::core::offer::{calculate_counter_offer, calculate_counter_offer_with};
pub use crate::core::reply::suggest_reply;
pub use domain::model::{Category, DiscountTier, ListingInput, NegotiationDraft, Platform};
pub use domain::ports::{RandomSource, SeededRandom, ThreadRandom};
pub use utils::error::{NegotiationError, Result};
