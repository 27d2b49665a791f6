//! Deferred log entries resolved against the final wire values

use serde::{Deserialize, Serialize};

/// Placeholder substituted by a resolved wire value.
pub const PLACEHOLDER: &str = "{}";

/// A message whose `{}` placeholders are filled, in order, by the decimal
/// values of `to_resolve` once solving ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub format: String,
    pub to_resolve: Vec<usize>,
}

impl LogEntry {
    pub fn new(format: impl Into<String>, to_resolve: Vec<usize>) -> Self {
        Self {
            format: format.into(),
            to_resolve,
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.format.matches(PLACEHOLDER).count()
    }

    /// Fills the placeholders with `values`. Missing values leave the
    /// placeholder untouched; surplus values are ignored.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut out = String::with_capacity(self.format.len());
        let mut parts = self.format.split(PLACEHOLDER);
        let mut values = values.iter();

        if let Some(first) = parts.next() {
            out.push_str(first);
        }
        for part in parts {
            match values.next() {
                Some(v) => out.push_str(v.as_ref()),
                None => out.push_str(PLACEHOLDER),
            }
            out.push_str(part);
        }
        out
    }
}
