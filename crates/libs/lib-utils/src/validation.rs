//! # Validation Utilities
//!
//! Input validation helpers. Errors are plain strings naming the field so
//! they can be shown next to the form input as-is.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a decimal number string lying within `[min, max]`.
///
/// Returns the trimmed input on success so the caller keeps the exact text
/// the user typed (contracts receive coordinates as strings).
pub fn validate_decimal_in_range(
    value: &str,
    min: f64,
    max: f64,
    field_name: &str,
) -> Result<String, String> {
    validate_not_empty(value, field_name)?;
    let trimmed = value.trim();
    let parsed: f64 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a decimal number", field_name))?;
    if !parsed.is_finite() || parsed < min || parsed > max {
        return Err(format!("{} must be between {} and {}", field_name, min, max));
    }
    Ok(trimmed.to_string())
}

/// Validate a strictly positive integer.
pub fn validate_positive_int(value: &str, field_name: &str) -> Result<u64, String> {
    validate_not_empty(value, field_name)?;
    match value.trim().parse::<u64>() {
        Ok(0) => Err(format!("{} must be greater than 0", field_name)),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("{} must be a whole number", field_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x", "Name").is_ok());
        assert_eq!(validate_not_empty("   ", "Name").unwrap_err(), "Name cannot be empty");
    }

    #[test]
    fn test_decimal_in_range_keeps_original_text() {
        let lat = validate_decimal_in_range(" 49.703168 ", -90.0, 90.0, "Latitude").unwrap();
        assert_eq!(lat, "49.703168");
    }

    #[test]
    fn test_decimal_out_of_range() {
        let err = validate_decimal_in_range("-190.5", -180.0, 180.0, "Longitude").unwrap_err();
        assert_eq!(err, "Longitude must be between -180 and 180");
    }

    #[test]
    fn test_decimal_not_a_number() {
        let err = validate_decimal_in_range("north", -90.0, 90.0, "Latitude").unwrap_err();
        assert_eq!(err, "Latitude must be a decimal number");
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(validate_positive_int("30", "Duration").unwrap(), 30);
        assert!(validate_positive_int("0", "Duration").is_err());
        assert!(validate_positive_int("-3", "Duration").is_err());
        assert!(validate_positive_int("2.5", "Duration").is_err());
    }
}
