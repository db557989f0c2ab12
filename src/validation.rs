//! Argument checks the JSON schemas cannot express.
//!
//! Schemas only say a field is a string or an array. These reject the empty
//! ones before any request is built.

use crate::types::{Error, Result};

/// Validate that a string is not empty.
pub fn validate_non_empty(s: &str, field: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::invalid_arguments(format!("'{}' is required", field)));
    }
    Ok(())
}

/// Validate that a value can stand alone as one URL path segment.
pub fn validate_path_segment(s: &str, field: &str) -> Result<()> {
    validate_non_empty(s, field)?;
    if s == "." || s == ".." {
        return Err(Error::invalid_arguments(format!(
            "'{}' must not be '.' or '..'",
            field
        )));
    }
    Ok(())
}

/// Validate that a list has at least one element.
pub fn validate_non_empty_list<T>(items: &[T], field: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::invalid_arguments(format!(
            "'{}' must be a non-empty list",
            field
        )));
    }
    Ok(())
}

/// Validate that a value is positive.
pub fn validate_positive(n: u32, field: &str) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid_arguments(format!(
            "'{}' must be positive",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert!(validate_non_empty("x", "text").is_ok());
        let err = validate_non_empty("", "text").unwrap_err();
        assert_eq!(err.to_string(), "'text' is required");
    }

    #[test]
    fn test_non_empty_list() {
        assert!(validate_non_empty_list(&["a"], "texts").is_ok());
        let err = validate_non_empty_list::<String>(&[], "texts").unwrap_err();
        assert_eq!(err.to_string(), "'texts' must be a non-empty list");
    }

    #[test]
    fn test_path_segment() {
        assert!(validate_path_segment("t-1", "track_id").is_ok());
        assert!(validate_path_segment("../../health", "track_id").is_ok());
        assert!(validate_path_segment("", "track_id").is_err());
        let err = validate_path_segment("..", "track_id").unwrap_err();
        assert_eq!(err.to_string(), "'track_id' must not be '.' or '..'");
    }

    #[test]
    fn test_positive() {
        assert!(validate_positive(1, "max_depth").is_ok());
        assert!(validate_positive(0, "max_depth").is_err());
    }
}
