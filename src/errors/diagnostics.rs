//! Append-only collection of the diagnostics raised during one type-check run.

use std::slice::Iter;

use tracing::debug;

use super::errors::{Error, ErrorCategory};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn record(&mut self, error: Error) {
        debug!(name = error.get_error_name(), "{}", error);
        self.errors.push(error);
    }

    /// Every diagnostic since the last `clear`, in the order they were raised.
    pub fn all(&self) -> &[Error] {
        &self.errors
    }

    /// The formatted form of `all`, header included.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn count(&self, category: ErrorCategory) -> usize {
        self.errors
            .iter()
            .filter(|error| error.category() == category)
            .count()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
