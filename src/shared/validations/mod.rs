use validator::ValidationError;

/// E.164-style phone number: optional `+`, leading digit 1-9, 2..=15 digits total.
pub fn is_valid_phone_number(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if ('1'..='9').contains(&first) => {}
        _ => return false,
    }
    let rest = digits.len() - 1;
    (1..=14).contains(&rest) && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_number");
        err.message = Some("Please enter a valid phone number (e.g., +1234567890)".into());
        Err(err)
    }
}

pub fn validate_price(value: i64) -> Result<(), ValidationError> {
    if value >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price");
        err.message = Some("Price must not be negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_international_and_local_numbers() {
        assert!(is_valid_phone_number("+84912345678"));
        assert!(is_valid_phone_number("912345678"));
        assert!(is_valid_phone_number("12"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(!is_valid_phone_number(""));
        assert!(!is_valid_phone_number("+"));
        assert!(!is_valid_phone_number("0912345678"));
        assert!(!is_valid_phone_number("1"));
        assert!(!is_valid_phone_number("+84 912 345"));
        assert!(!is_valid_phone_number("1234567890123456"));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(650_000).is_ok());
        assert!(validate_price(-1).is_err());
    }
}
