//! Descriptor-table validation.
//!
//! Catches structural problems in a long-option table before scanning:
//! empty names, embedded `=`, duplicate names or short equivalents, and
//! reserved short characters. The scanners themselves never validate; a
//! malformed table simply fails to match.
//!
//! # Examples
//!
//! ```
//! use optscan_core::{LongOpt, validate_table};
//!
//! let table = [
//!     LongOpt::flag("verbose", Some('v')),
//!     LongOpt::with_value("output", Some('o')),
//! ];
//! assert!(validate_table(&table).is_empty());
//!
//! // Embedded '=' can never match a token name part.
//! let bad = [LongOpt::flag("key=value", None)];
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::LongOpt;

/// Structural problems found in a descriptor table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A descriptor has an empty name.
    #[error("long option name cannot be empty")]
    EmptyName,
    /// The name contains `=`, which the scanner treats as the value
    /// separator.
    #[error("long option name contains '=': {0}")]
    EmbeddedEquals(String),
    /// Two descriptors share a name.
    #[error("duplicate long option name: {0}")]
    DuplicateName(String),
    /// Two descriptors share a short equivalent.
    #[error("duplicate short equivalent: -{0}")]
    DuplicateShort(char),
    /// The short equivalent is `-` or `:`.
    #[error("'{0}' cannot be used as a short equivalent")]
    ReservedShort(char),
}

/// Validates a descriptor table, collecting every problem found.
///
/// # Examples
///
/// ```
/// use optscan_core::{LongOpt, ValidationError, validate_table};
///
/// let table = [
///     LongOpt::flag("verbose", Some('v')),
///     LongOpt::flag("version", Some('v')),
/// ];
/// let errors = validate_table(&table);
/// assert_eq!(errors, vec![ValidationError::DuplicateShort('v')]);
/// ```
pub fn validate_table(table: &[LongOpt]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut seen_shorts: HashSet<char> = HashSet::new();

    for opt in table {
        if opt.name.is_empty() {
            errors.push(ValidationError::EmptyName);
        } else {
            if opt.name.contains('=') {
                errors.push(ValidationError::EmbeddedEquals(opt.name.clone()));
            }
            if !seen_names.insert(opt.name.as_str()) {
                errors.push(ValidationError::DuplicateName(opt.name.clone()));
            }
        }

        if let Some(short) = opt.short {
            if short == '-' || short == ':' {
                errors.push(ValidationError::ReservedShort(short));
            } else if !seen_shorts.insert(short) {
                errors.push(ValidationError::DuplicateShort(short));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_has_no_errors() {
        let table = [
            LongOpt::with_value("message", Some('m')),
            LongOpt::flag("amend", None),
            LongOpt::flag("abort", None),
        ];
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let table = [LongOpt::flag("", None)];
        assert_eq!(validate_table(&table), vec![ValidationError::EmptyName]);
    }

    #[test]
    fn test_embedded_equals_rejected() {
        let table = [LongOpt::flag("key=value", None)];
        assert_eq!(
            validate_table(&table),
            vec![ValidationError::EmbeddedEquals("key=value".to_string())]
        );
    }

    #[test]
    fn test_duplicates_rejected() {
        let table = [
            LongOpt::flag("verbose", Some('v')),
            LongOpt::flag("verbose", Some('w')),
            LongOpt::flag("version", Some('v')),
        ];
        let errors = validate_table(&table);
        assert!(errors.contains(&ValidationError::DuplicateName("verbose".to_string())));
        assert!(errors.contains(&ValidationError::DuplicateShort('v')));
    }

    #[test]
    fn test_reserved_short_rejected() {
        let table = [LongOpt::flag("dash", Some('-'))];
        assert_eq!(
            validate_table(&table),
            vec![ValidationError::ReservedShort('-')]
        );
    }

    #[test]
    fn test_all_errors_collected() {
        let table = [
            LongOpt::flag("", None),
            LongOpt::flag("a=b", Some(':')),
        ];
        let errors = validate_table(&table);
        assert_eq!(errors.len(), 3);
    }
}
