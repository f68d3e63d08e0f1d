use std::collections::{BTreeSet, HashMap};

use crate::error::{ForecastError, Result};

/// Maps each distinct observed string to a dense integer code.
///
/// Classes are sorted before codes are assigned: numerically when every
/// class parses as a number, lexicographically otherwise. Fitting the same
/// set of values in any order therefore yields the same mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalEncoder {
    field: String,
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CategoricalEncoder {
    /// Build the mapping for `field` from every observed value.
    pub fn fit<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = values
            .into_iter()
            .map(|value| value.as_ref().to_string())
            .collect();
        let mut classes: Vec<String> = distinct.into_iter().collect();

        let numeric: Option<Vec<f64>> = classes
            .iter()
            .map(|class| class.trim().parse::<f64>().ok().filter(|v| !v.is_nan()))
            .collect();
        if let Some(numbers) = numeric {
            let mut paired: Vec<(f64, String)> = numbers.into_iter().zip(classes).collect();
            paired.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            classes = paired.into_iter().map(|(_, class)| class).collect();
        }

        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code))
            .collect();
        Self {
            field: field.into(),
            classes,
            codes,
        }
    }

    /// Code for `value`.
    ///
    /// # Errors
    ///
    /// [`ForecastError::UnknownCategory`] when `value` was not seen at fit time.
    pub fn encode(&self, value: &str) -> Result<usize> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| ForecastError::UnknownCategory {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Classes in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
