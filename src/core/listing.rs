use crate::domain::model::Platform;
use crate::utils::error::{NegotiationError, Result};
use url::Url;

const HOST_RULES: [(&str, Platform); 6] = [
    ("facebook.com", Platform::Facebook),
    ("fb.com", Platform::Facebook),
    ("craigslist.org", Platform::Craigslist),
    ("ebay.com", Platform::Ebay),
    ("zillow.com", Platform::Zillow),
    ("offerup.com", Platform::OfferUp),
];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// 從商品網址判斷平台；無法辨識的網站回傳 "Other"
pub fn detect_platform(listing_url: &str) -> Result<Platform> {
    let trimmed = listing_url.trim();
    if trimmed.is_empty() {
        return Err(NegotiationError::InvalidListingUrl {
            url: listing_url.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| NegotiationError::InvalidListingUrl {
        url: listing_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    let host = parsed
        .host_str()
        .ok_or_else(|| NegotiationError::InvalidListingUrl {
            url: listing_url.to_string(),
            reason: "URL has no host".to_string(),
        })?
        .to_ascii_lowercase();

    let platform = HOST_RULES
        .iter()
        .find(|(domain, _)| host_matches(&host, domain))
        .map(|(_, platform)| platform.clone())
        .unwrap_or_else(Platform::other);

    tracing::debug!(%host, %platform, "Detected platform from listing URL");
    Ok(platform)
}
