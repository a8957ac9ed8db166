//! Field-level validation check-list.
//!
//! A [`Validator`] collects every failed check instead of stopping at the
//! first one, so a client gets the full list of problems in one response.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use crate::error::CoreError;

/// Field name to human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

/// Accumulates field violations. Only the first message per field is kept.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no violation has been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Record a violation for `field` unless one is already present.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Finish the check-list, failing with every recorded violation.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ValidationFailed(self.errors))
        }
    }
}

/// `true` when no value appears twice.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn starts_valid() {
        let v = Validator::new();
        assert!(v.is_valid());
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn keeps_first_message_per_field() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        v.check(false, "title", "must not be more than 500 bytes long");
        v.check(true, "year", "must be provided");

        assert!(!v.is_valid());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()["title"], "must be provided");
    }

    #[test]
    fn into_result_carries_every_field() {
        let mut v = Validator::new();
        v.add_error("title", "must be provided");
        v.add_error("year", "must be provided");

        assert_matches!(
            v.into_result(),
            Err(CoreError::ValidationFailed(errors)) if errors.len() == 2
        );
    }

    #[test]
    fn unique_detects_duplicates() {
        assert!(unique::<String>(&[]));
        assert!(unique(&["drama", "comedy"]));
        assert!(!unique(&["drama", "comedy", "drama"]));
    }
}
