use crate::utils::error::{NegotiationError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證價格：必須是有限數值且大於 0
pub fn validate_price(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NegotiationError::InvalidPrice { value });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(NegotiationError::MissingField {
            field: field_name.to_string(),
        });
    }
    if value.trim().is_empty() {
        return Err(NegotiationError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(NegotiationError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 檢查模板是否包含所有必要的佔位符
pub fn validate_placeholders(field_name: &str, template: &str, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|placeholder| !template.contains(placeholder))
        .collect();

    if !missing.is_empty() {
        return Err(NegotiationError::InvalidValue {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Template is missing placeholders: {}", missing.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(1000.0).is_ok());
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-50.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("title", "iPhone 14").is_ok());
        assert!(matches!(
            validate_non_empty_string("title", ""),
            Err(NegotiationError::MissingField { .. })
        ));
        assert!(matches!(
            validate_non_empty_string("title", "   "),
            Err(NegotiationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("delay_ms", 500u64, 0, 10_000).is_ok());
        assert!(validate_range("delay_ms", 20_000u64, 0, 10_000).is_err());
    }

    #[test]
    fn test_validate_placeholders() {
        let required = ["{title}", "{offer}"];
        assert!(validate_placeholders("t", "Would you take {offer} for {title}?", &required).is_ok());
        assert!(validate_placeholders("t", "Would you take less?", &required).is_err());
    }
}
