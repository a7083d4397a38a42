use crate::utils::error::{DigestError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DigestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DigestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DigestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DigestError::InvalidConfigValueError {
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
        return Err(DigestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// A (min, max) pair where max is at least 1 and min never exceeds max.
pub fn validate_length_bounds(field_name: &str, min: usize, max: usize) -> Result<()> {
    validate_positive_number(&format!("{}.max_length", field_name), max, 1)?;
    if min > max {
        return Err(DigestError::InvalidConfigValueError {
            field: format!("{}.min_length", field_name),
            value: min.to_string(),
            reason: format!("min_length must not exceed max_length ({})", max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input.dir", "./input").is_ok());
        assert!(validate_path("input.dir", "").is_err());
        assert!(validate_path("input.dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("analysis.max_items", 5, 1).is_ok());
        assert!(validate_positive_number("analysis.max_items", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("report.font_size", 12.0, 6.0, 36.0).is_ok());
        assert!(validate_range("report.font_size", 48.0, 6.0, 36.0).is_err());
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_length_bounds("summarizer", 40, 150).is_ok());
        assert!(validate_length_bounds("summarizer", 150, 150).is_ok());
        assert!(validate_length_bounds("summarizer", 151, 150).is_err());
        assert!(validate_length_bounds("summarizer", 0, 0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("report.title", "Summary").is_ok());
        assert!(validate_non_empty_string("report.title", "   ").is_err());
    }
}
