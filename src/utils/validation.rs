//! Centralized validation and helper functions.

use crate::core::locus::Locus;

/// Maximum number of rows allowed in a single locus table (DOS protection)
pub const MAX_ROWS: usize = 100_000;

/// Locus names end up in cache and output file names
pub const MAX_LOCUS_NAME_LENGTH: usize = 64;

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

/// Locus name validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty locus name")]
    EmptyLocusName,
    #[error("Locus name too long: exceeds {MAX_LOCUS_NAME_LENGTH} characters")]
    LocusNameTooLong,
    #[error("Invalid locus name '{0}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidLocusName(String),
}

/// Validate a locus name before it is used to build file paths.
///
/// # Errors
///
/// Returns `ValidationError::EmptyLocusName` if the name is empty,
/// `ValidationError::LocusNameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidLocusName` if it contains path separators or
/// other characters unsafe in a file name.
pub fn validate_locus_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyLocusName);
    }

    if name.len() > MAX_LOCUS_NAME_LENGTH {
        return Err(ValidationError::LocusNameTooLong);
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidLocusName(name.to_string()));
    }

    Ok(())
}

/// Validate every locus of a locus table.
///
/// # Errors
///
/// Returns the first `ValidationError` encountered.
pub fn validate_loci(loci: &[Locus]) -> Result<(), ValidationError> {
    loci.iter().try_for_each(|locus| validate_locus_name(&locus.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locus::hla_loci;

    #[test]
    fn test_check_row_limit() {
        assert!(check_row_limit(100).is_none());
        assert!(check_row_limit(MAX_ROWS - 1).is_none());
        assert!(check_row_limit(MAX_ROWS).is_some());
        assert!(check_row_limit(MAX_ROWS + 1).is_some());
    }

    #[test]
    fn test_validate_locus_name_safe() {
        assert!(validate_locus_name("A").is_ok());
        assert!(validate_locus_name("DRB1").is_ok());
        assert!(validate_locus_name("TEST_locus-2").is_ok());
    }

    #[test]
    fn test_validate_locus_name_dangerous() {
        assert_eq!(validate_locus_name(""), Err(ValidationError::EmptyLocusName));
        assert!(matches!(
            validate_locus_name("../etc/passwd"),
            Err(ValidationError::InvalidLocusName(_))
        ));
        assert!(validate_locus_name("a\\b").is_err());
        assert!(validate_locus_name("a\0").is_err());
        assert!(validate_locus_name("A B").is_err());
        assert_eq!(
            validate_locus_name(&"A".repeat(65)),
            Err(ValidationError::LocusNameTooLong)
        );
    }

    #[test]
    fn test_fixed_loci_are_valid() {
        assert!(validate_loci(&hla_loci()).is_ok());
    }
}
