use crate::domain::model::{DiscountTier, OfferBreakdown, OfferRequest, Platform};
use crate::domain::ports::{RandomSource, ThreadRandom};
use crate::utils::error::Result;
use crate::utils::validation::validate_price;

pub const HIGH_VALUE_PLATFORMS: [&str; 2] = ["Zillow", "Facebook"];
pub const LOW_VALUE_PLATFORMS: [&str; 2] = ["eBay", "Craigslist"];

const HIGH_VALUE_THRESHOLD: f64 = 5000.0;
const LOW_VALUE_THRESHOLD: f64 = 500.0;
const DISCOUNT_SPREAD: f64 = 0.10;

impl DiscountTier {
    /// Tiers are evaluated in order; the first match wins.
    pub fn select(price: f64, platform: &Platform) -> Self {
        let name = platform.as_str();
        if HIGH_VALUE_PLATFORMS.contains(&name) && price > HIGH_VALUE_THRESHOLD {
            DiscountTier::HighValueCautious
        } else if LOW_VALUE_PLATFORMS.contains(&name) && price < LOW_VALUE_THRESHOLD {
            DiscountTier::LowValueAggressive
        } else {
            DiscountTier::Standard
        }
    }

    /// Half-open discount interval `[low, high)`.
    pub fn bounds(&self) -> (f64, f64) {
        let low = match self {
            DiscountTier::HighValueCautious => 0.10,
            DiscountTier::LowValueAggressive => 0.20,
            DiscountTier::Standard => 0.15,
        };
        (low, low + DISCOUNT_SPREAD)
    }

    pub fn draw_discount<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        let (low, _) = self.bounds();
        low + rng.next_unit() * DISCOUNT_SPREAD
    }
}

/// 無條件捨去：超過 100 取 50 的倍數，否則取 10 的倍數
pub fn round_offer(reduced: f64) -> f64 {
    let step = if reduced > 100.0 { 50.0 } else { 10.0 };
    (reduced / step).floor() * step
}

pub fn calculate_offer<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &OfferRequest,
) -> Result<OfferBreakdown> {
    validate_price(request.price)?;

    // category 只影響訊息模板，不影響折扣
    let tier = DiscountTier::select(request.price, &request.platform);
    let discount = tier.draw_discount(rng);
    let reduced = request.price * (1.0 - discount);
    let offer = round_offer(reduced);

    tracing::debug!(
        price = request.price,
        platform = %request.platform,
        ?tier,
        discount,
        reduced,
        offer,
        "Calculated counter-offer"
    );

    Ok(OfferBreakdown {
        tier,
        discount,
        reduced,
        offer,
    })
}

pub fn calculate_counter_offer_with<R: RandomSource + ?Sized>(
    rng: &mut R,
    price: f64,
    platform: &str,
    category: Option<&str>,
) -> Result<f64> {
    let request = OfferRequest {
        price,
        platform: Platform::from(platform),
        category: category.map(str::to_string),
    };
    calculate_offer(rng, &request).map(|breakdown| breakdown.offer)
}

pub fn calculate_counter_offer(price: f64, platform: &str, category: Option<&str>) -> Result<f64> {
    calculate_counter_offer_with(&mut ThreadRandom, price, platform, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::NegotiationError;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_tier_selection_order() {
        assert_eq!(
            DiscountTier::select(6000.0, &Platform::Zillow),
            DiscountTier::HighValueCautious
        );
        assert_eq!(
            DiscountTier::select(5000.0, &Platform::Zillow),
            DiscountTier::Standard
        );
        assert_eq!(
            DiscountTier::select(499.99, &Platform::Craigslist),
            DiscountTier::LowValueAggressive
        );
        assert_eq!(
            DiscountTier::select(500.0, &Platform::Ebay),
            DiscountTier::Standard
        );
        assert_eq!(
            DiscountTier::select(300.0, &Platform::Facebook),
            DiscountTier::Standard
        );
        assert_eq!(
            DiscountTier::select(9000.0, &Platform::from("Facebook Marketplace")),
            DiscountTier::Standard
        );
    }

    #[test]
    fn test_round_offer_boundaries() {
        assert_eq!(round_offer(100.0), 100.0);
        assert_eq!(round_offer(100.5), 100.0);
        assert_eq!(round_offer(149.99), 100.0);
        assert_eq!(round_offer(68.0), 60.0);
        assert_eq!(round_offer(9.99), 0.0);
        assert_eq!(round_offer(5399.0), 5350.0);
    }

    #[test]
    fn test_discount_draw_uses_interval_endpoints() {
        let tier = DiscountTier::Standard;
        assert_eq!(tier.draw_discount(&mut Fixed(0.0)), 0.15);
        let near_top = tier.draw_discount(&mut Fixed(0.999_999));
        assert!(near_top < 0.25);
    }

    #[test]
    fn test_fixed_draw_produces_expected_offer() {
        // Zillow 6000 -> discount 0.10 -> reduced 5400
        let offer = calculate_counter_offer_with(&mut Fixed(0.0), 6000.0, "Zillow", None).unwrap();
        assert_eq!(offer, 5400.0);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = calculate_counter_offer(0.0, "eBay", None).unwrap_err();
        assert!(matches!(err, NegotiationError::InvalidPrice { .. }));
        assert!(calculate_counter_offer(-20.0, "eBay", None).is_err());
        assert!(calculate_counter_offer(f64::NAN, "eBay", None).is_err());
    }

    #[test]
    fn test_category_does_not_change_offer() {
        let with = calculate_counter_offer_with(&mut Fixed(0.3), 2500.0, "Other", Some("cars")).unwrap();
        let without = calculate_counter_offer_with(&mut Fixed(0.3), 2500.0, "Other", None).unwrap();
        assert_eq!(with, without);
    }
}
