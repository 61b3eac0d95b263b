//! Shared `validator` rules.

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
///
/// ```ignore
/// #[validate(custom(function = "axum_helpers::validation::not_blank"))]
/// pub name: String,
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Electronics").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }
}
