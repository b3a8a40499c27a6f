//! Query string assembly for list endpoints.

use std::fmt::Display;

/// Ordered query parameter pairs, skipping absent values.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append `key=value` when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append `key=true` only when the flag is set.
    ///
    /// The platform treats an absent filter differently from `key=false`, so
    /// unset flags are left out entirely.
    pub fn push_flag(&mut self, key: &'static str, enabled: bool) {
        if enabled {
            self.pairs.push((key, "true".to_string()));
        }
    }

    /// Return the collected pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn push_flag_only_emits_true() {
        let mut params = QueryParams::new();
        params.push_flag("isTemplate", false);
        assert!(params.is_empty());

        params.push_flag("isTemplate", true);
        params.push_opt("limit", Some(100));
        assert_eq!(
            params.into_pairs(),
            vec![("isTemplate", "true".to_string()), ("limit", "100".to_string())]
        );
    }
}
