use crate::domain::model::Category;
use crate::domain::ports::RandomSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

const OFFER_MARKER: &str = "$X";

const REAL_ESTATE_REPLIES: [&str; 3] = [
    "I understand you're interested in the property. Based on current market conditions in this area, I'd like to discuss the pricing. Would you consider $X for a quick closing?",
    "Thank you for your interest. I've been pre-approved for financing and can close within 30 days. Given the current market, would you be open to negotiating on the price?",
    "I appreciate you getting back to me. I've done some research on comparable properties in the neighborhood, and I'm prepared to make a competitive offer. Can we discuss the terms?",
];

const CARS_REPLIES: [&str; 3] = [
    "Thanks for the quick response! I've had the vehicle inspected by a mechanic and I'm very interested. Based on the current market value and condition, would you consider $X?",
    "I appreciate you showing me the car. I'm ready to purchase today with cash. Given the mileage and condition, would you be open to $X?",
    "Thank you for your time today. I've researched similar vehicles in the area and I'm prepared to make a fair offer. Would $X work for you?",
];

const ELECTRONICS_REPLIES: [&str; 3] = [
    "Thanks for the details! I've checked the current market prices for this model and I'm very interested. Would you consider $X for a quick sale?",
    "I appreciate the information. I'm ready to pick it up today with cash. Based on the condition and current retail prices, would $X be acceptable?",
    "Thank you for getting back to me. I've been looking for this exact model and I'm prepared to purchase immediately. Would you accept $X?",
];

const DEFAULT_REPLIES: [&str; 3] = [
    "Thank you for your response. I'm very interested in your item and ready to purchase quickly. Based on current market conditions, would you consider $X?",
    "I appreciate you getting back to me. I'm a serious buyer and can complete the transaction today. Would you be open to negotiating on the price?",
    "Thanks for the information. I've done some research on similar items and I'm prepared to make a fair offer. Can we discuss the pricing?",
];

/// Furniture has no dedicated reply pool and shares the default one.
pub fn reply_pool(category: Option<&str>) -> &'static [&'static str] {
    match category.and_then(Category::parse) {
        Some(Category::RealEstate) => &REAL_ESTATE_REPLIES,
        Some(Category::Cars) => &CARS_REPLIES,
        Some(Category::Electronics) => &ELECTRONICS_REPLIES,
        Some(Category::Furniture) | None => &DEFAULT_REPLIES,
    }
}

/// Suggest a response to a seller's message. With an offer, `$X` becomes the figure.
pub fn suggest_reply<R: RandomSource + ?Sized>(
    rng: &mut R,
    seller_message: &str,
    category: Option<&str>,
    offer: Option<f64>,
) -> Result<String> {
    validate_non_empty_string("seller_message", seller_message)?;

    let pool = reply_pool(category);
    let template = pool[rng.pick_index(pool.len())];
    tracing::debug!(
        category = category.unwrap_or("default"),
        seller_chars = seller_message.len(),
        "Picked seller reply template"
    );

    Ok(match offer {
        Some(amount) => template.replace(OFFER_MARKER, &format!("${}", amount)),
        None => template.to_string(),
    })
}
