use crate::core::message::TemplateBank;
use crate::core::offer::calculate_offer;
use crate::domain::model::{ListingInput, MessageRequest, NegotiationDraft, OfferRequest};
use crate::domain::ports::{RandomSource, ThreadRandom};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_price, Validate};
use chrono::Utc;

impl Validate for ListingInput {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;
        validate_price(self.price)?;
        validate_non_empty_string("platform", self.platform.as_str())?;
        Ok(())
    }
}

/// Validates listing input, then runs the offer calculator and message composer.
pub struct Negotiator<R: RandomSource = ThreadRandom> {
    templates: TemplateBank,
    rng: R,
}

impl Negotiator<ThreadRandom> {
    pub fn new(templates: TemplateBank) -> Self {
        Self {
            templates,
            rng: ThreadRandom,
        }
    }
}

impl Default for Negotiator<ThreadRandom> {
    fn default() -> Self {
        Self::new(TemplateBank::default())
    }
}

impl<R: RandomSource> Negotiator<R> {
    pub fn with_random(templates: TemplateBank, rng: R) -> Self {
        Self { templates, rng }
    }

    pub fn draft(&mut self, listing: &ListingInput) -> Result<NegotiationDraft> {
        listing.validate()?;
        tracing::info!(
            "🧮 Drafting counter-offer for '{}' ({} on {})",
            listing.title,
            listing.price,
            listing.platform
        );

        let breakdown = calculate_offer(
            &mut self.rng,
            &OfferRequest {
                price: listing.price,
                platform: listing.platform.clone(),
                category: listing.category.clone(),
            },
        )?;

        let message = self.templates.compose(
            &mut self.rng,
            &MessageRequest {
                item_title: listing.title.clone(),
                original_price: listing.price,
                offer_price: breakdown.offer,
                platform: listing.platform.clone(),
                notes: listing.notes.clone(),
                category: listing.category.clone(),
            },
        );

        let savings = listing.price - breakdown.offer;
        let discount_percent = savings / listing.price * 100.0;
        tracing::info!(
            "✅ Suggested offer {} (saves {}, {:.1}% off)",
            breakdown.offer,
            savings,
            discount_percent
        );

        Ok(NegotiationDraft {
            title: listing.title.clone(),
            original_price: listing.price,
            offer: breakdown.offer,
            savings,
            discount_percent,
            tier: breakdown.tier,
            platform: listing.platform.clone(),
            category: listing.category.clone(),
            message,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DiscountTier, Platform};
    use crate::utils::error::NegotiationError;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn listing(title: &str, price: f64, platform: &str) -> ListingInput {
        ListingInput {
            title: title.to_string(),
            price,
            platform: Platform::from(platform),
            category: Some("electronics".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_draft_fills_every_field() {
        let mut negotiator = Negotiator::with_random(TemplateBank::default(), Fixed(0.0));
        let draft = negotiator.draft(&listing("MacBook Pro", 1000.0, "eBay")).unwrap();

        // eBay at 1000 is standard tier: 15% -> 850
        assert_eq!(draft.tier, DiscountTier::Standard);
        assert_eq!(draft.offer, 850.0);
        assert_eq!(draft.savings, 150.0);
        assert!((draft.discount_percent - 15.0).abs() < 1e-9);
        assert!(draft.message.contains("MacBook Pro"));
        assert!(draft.message.contains("850"));
    }

    #[test]
    fn test_draft_rejects_bad_input() {
        let mut negotiator = Negotiator::new(TemplateBank::default());
        assert!(matches!(
            negotiator.draft(&listing("", 100.0, "eBay")),
            Err(NegotiationError::MissingField { .. })
        ));
        assert!(matches!(
            negotiator.draft(&listing("Chair", 0.0, "eBay")),
            Err(NegotiationError::InvalidPrice { .. })
        ));
        assert!(matches!(
            negotiator.draft(&listing("Chair", 50.0, "")),
            Err(NegotiationError::MissingField { .. })
        ));
    }
}
