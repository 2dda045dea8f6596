use crate::domain::model::{Category, MessageRequest, Platform};
use crate::domain::ports::{RandomSource, ThreadRandom};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const TITLE_PLACEHOLDER: &str = "{title}";
pub const OFFER_PLACEHOLDER: &str = "{offer}";
pub const PRICE_PLACEHOLDER: &str = "{price}";
pub const PLATFORM_PLACEHOLDER: &str = "{platform}";

pub const REQUIRED_PLACEHOLDERS: [&str; 2] = [TITLE_PLACEHOLDER, OFFER_PLACEHOLDER];

const FALLBACK_TEMPLATE: &str = "Hi! I'm very interested in your {title}. Would you consider ${offer}? I'm ready to move forward if we can agree on this price. Thank you!";

const DEFAULT_TEMPLATES: [&str; 3] = [
    "Hi! I'm very interested in your {title}. Based on similar listings I've seen, would you consider ${offer}? I'm ready to pick it up/move forward today if we can agree on this price.",
    "Hello! Your {title} looks great. I've been researching the market and wondering if you'd be open to ${offer}? Happy to arrange pickup at your convenience if this works for you.",
    "Hi there! I'm interested in purchasing your {title}. Would you consider accepting ${offer}? I'm a serious buyer and can complete the transaction quickly if we can agree on this.",
];

const REAL_ESTATE_TEMPLATES: [&str; 3] = [
    "Hello! I'm very interested in {title}. Based on comparable properties in the neighborhood, would you consider ${offer}? I'm pre-approved and can move toward a quick closing if we can agree.",
    "Hi! Thank you for listing {title}. After reviewing recent sales in the area, I'd like to offer ${offer}. I'm a serious buyer and happy to move forward on your timeline if this works for you.",
    "Hello! {title} is exactly what I've been looking for. Given current market conditions, would you be open to ${offer}? I'm ready to put in a formal offer right away if we're close.",
];

const CARS_TEMPLATES: [&str; 3] = [
    "Hi! I'm very interested in your {title}. I've researched similar vehicles in the area, and based on the market would you consider ${offer}? I can come see it this week and pay the same day.",
    "Hello! Your {title} looks well kept. Considering the mileage and comparable listings, would you be open to ${offer}? I'm ready to complete the purchase quickly if we can agree.",
    "Hi there! I'd like to buy your {title}. Based on current market value, would you accept ${offer}? I'm a cash buyer and happy to move forward today if this works for you.",
];

const ELECTRONICS_TEMPLATES: [&str; 3] = [
    "Hi! I'm interested in your {title}. I've checked current prices for this model, and would you consider ${offer}? I can pick it up today if we can agree.",
    "Hello! Your {title} looks like a great deal. Based on similar listings I've seen, would you be open to ${offer}? Happy to pay cash and make this a quick, easy sale.",
    "Hi there! I've been looking for exactly this {title}. Given current retail and resale prices, would you accept ${offer}? I'm ready to move forward right away.",
];

const FURNITURE_TEMPLATES: [&str; 3] = [
    "Hi! I love your {title}. Based on similar pieces I've seen listed, would you consider ${offer}? I can handle pickup myself and come by whenever suits you.",
    "Hello! Your {title} would be perfect for my place. After looking at comparable listings, would you be open to ${offer}? Happy to arrange pickup this week if that works.",
    "Hi there! I'm interested in your {title}. Would you consider accepting ${offer}, given what similar items are going for? I'm ready to collect it quickly and make this easy for you.",
];

fn to_pool(templates: &[&str]) -> Vec<String> {
    templates.iter().map(|t| t.to_string()).collect()
}

/// Template pools keyed by category, plus the default pool.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    default_pool: Vec<String>,
    category_pools: HashMap<Category, Vec<String>>,
}

impl Default for TemplateBank {
    fn default() -> Self {
        let category_pools = HashMap::from([
            (Category::RealEstate, to_pool(&REAL_ESTATE_TEMPLATES)),
            (Category::Cars, to_pool(&CARS_TEMPLATES)),
            (Category::Electronics, to_pool(&ELECTRONICS_TEMPLATES)),
            (Category::Furniture, to_pool(&FURNITURE_TEMPLATES)),
        ]);

        Self {
            default_pool: to_pool(&DEFAULT_TEMPLATES),
            category_pools,
        }
    }
}

impl TemplateBank {
    /// Replace one pool. `None` replaces the default pool.
    pub fn with_pool(mut self, category: Option<Category>, templates: Vec<String>) -> Self {
        match category {
            Some(category) => {
                self.category_pools.insert(category, templates);
            }
            None => self.default_pool = templates,
        }
        self
    }

    /// Absent or unrecognised categories resolve to the default pool.
    pub fn pool_for(&self, category: Option<&str>) -> &[String] {
        category
            .and_then(Category::parse)
            .and_then(|c| self.category_pools.get(&c))
            .unwrap_or(&self.default_pool)
    }

    pub fn default_pool(&self) -> &[String] {
        &self.default_pool
    }

    pub fn compose<R: RandomSource + ?Sized>(&self, rng: &mut R, request: &MessageRequest) -> String {
        tracing::debug!(
            "Generating message with prompt: {}",
            drafting_prompt(request)
        );

        let pool = self.pool_for(request.category.as_deref());
        let template = if pool.is_empty() {
            tracing::warn!("⚠️ Template pool is empty, using fallback message");
            FALLBACK_TEMPLATE
        } else {
            pool[rng.pick_index(pool.len())].as_str()
        };

        render(template, request)
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{(title|offer|price|platform)\}").expect("placeholder pattern is valid")
    })
}

/// 單次替換：插入的內容不會再被當成佔位符
pub fn render(template: &str, request: &MessageRequest) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &regex::Captures| match &caps[0] {
            TITLE_PLACEHOLDER => request.item_title.clone(),
            OFFER_PLACEHOLDER => request.offer_price.to_string(),
            PRICE_PLACEHOLDER => request.original_price.to_string(),
            PLATFORM_PLACEHOLDER => request.platform.as_str().to_string(),
            other => other.to_string(),
        })
        .into_owned()
}

/// 生成訊息時記錄的提示內容（notes 只出現在這裡）
pub fn drafting_prompt(request: &MessageRequest) -> String {
    format!(
        "Create a polite, confident negotiation message for the following:\n\
         - Item: {}\n\
         - Original Price: ${}\n\
         - My Offer: ${}\n\
         - Platform: {}\n\
         - Additional Context: {}\n\
         Guidelines: respectful but confident, 2-3 sentences, reference the market, \
         ready to move forward with the deal",
        request.item_title,
        request.original_price,
        request.offer_price,
        request.platform,
        request.notes.as_deref().unwrap_or("")
    )
}

pub fn generate_negotiation_message_with<R: RandomSource + ?Sized>(
    rng: &mut R,
    item_title: &str,
    original_price: f64,
    offer_price: f64,
    platform: &str,
    notes: Option<&str>,
    category: Option<&str>,
) -> String {
    let request = MessageRequest {
        item_title: item_title.to_string(),
        original_price,
        offer_price,
        platform: Platform::from(platform),
        notes: notes.map(str::to_string),
        category: category.map(str::to_string),
    };
    TemplateBank::default().compose(rng, &request)
}

pub fn generate_negotiation_message(
    item_title: &str,
    original_price: f64,
    offer_price: f64,
    platform: &str,
    notes: Option<&str>,
    category: Option<&str>,
) -> String {
    generate_negotiation_message_with(
        &mut ThreadRandom,
        item_title,
        original_price,
        offer_price,
        platform,
        notes,
        category,
    )
}
