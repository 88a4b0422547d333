//! # Extra Arguments
//!
//! A probability function often needs more than the response vector: a
//! covariate table, a selection mask, a target rate. `ExtraArgs` is the typed
//! bag that carries those values from the caller to the function untouched.
//! The injector never looks inside it.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One forwarded value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Scalar(f64),
    Flag(bool),
    Text(String),
    Vector(Vec<f64>),
    Mask(Vec<bool>),
    /// A covariate table, shape `[n_samples, n_covariates]`.
    Matrix(Array2<f64>),
}

impl ArgValue {
    /// Human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Scalar(_) => "scalar",
            ArgValue::Flag(_) => "flag",
            ArgValue::Text(_) => "text",
            ArgValue::Vector(_) => "vector",
            ArgValue::Mask(_) => "mask",
            ArgValue::Matrix(_) => "matrix",
        }
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Scalar(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Flag(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<Vec<f64>> for ArgValue {
    fn from(value: Vec<f64>) -> Self {
        ArgValue::Vector(value)
    }
}

impl From<Array1<f64>> for ArgValue {
    fn from(value: Array1<f64>) -> Self {
        ArgValue::Vector(value.to_vec())
    }
}

impl From<Vec<bool>> for ArgValue {
    fn from(value: Vec<bool>) -> Self {
        ArgValue::Mask(value)
    }
}

impl From<Array2<f64>> for ArgValue {
    fn from(value: Array2<f64>) -> Self {
        ArgValue::Matrix(value)
    }
}

/// Failures when a probability function reads its extra arguments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
    #[error("The extra argument '{0}' was not supplied.")]
    Missing(String),
    #[error("The extra argument '{name}' must be a {expected}, but a {found} was supplied.")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Named values forwarded verbatim to a probability function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ExtraArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ExtraArgs::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Stores `value` under `name`, returning the value it displaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ArgValue>,
    ) -> Option<ArgValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&ArgValue, ArgError> {
        self.values
            .get(name)
            .ok_or_else(|| ArgError::Missing(name.to_string()))
    }

    fn wrong_kind(name: &str, expected: &'static str, found: &ArgValue) -> ArgError {
        ArgError::WrongKind {
            name: name.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn scalar(&self, name: &str) -> Result<f64, ArgError> {
        match self.require(name)? {
            ArgValue::Scalar(v) => Ok(*v),
            other => Err(Self::wrong_kind(name, "scalar", other)),
        }
    }

    /// Like [`ExtraArgs::scalar`], but an absent argument yields `default`.
    /// A present argument of the wrong kind is still an error.
    pub fn scalar_or(&self, name: &str, default: f64) -> Result<f64, ArgError> {
        if self.contains(name) {
            self.scalar(name)
        } else {
            Ok(default)
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, ArgError> {
        match self.require(name)? {
            ArgValue::Flag(v) => Ok(*v),
            other => Err(Self::wrong_kind(name, "flag", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, ArgError> {
        match self.require(name)? {
            ArgValue::Text(v) => Ok(v.as_str()),
            other => Err(Self::wrong_kind(name, "text", other)),
        }
    }

    pub fn vector(&self, name: &str) -> Result<&[f64], ArgError> {
        match self.require(name)? {
            ArgValue::Vector(v) => Ok(v.as_slice()),
            other => Err(Self::wrong_kind(name, "vector", other)),
        }
    }

    pub fn mask(&self, name: &str) -> Result<&[bool], ArgError> {
        match self.require(name)? {
            ArgValue::Mask(v) => Ok(v.as_slice()),
            other => Err(Self::wrong_kind(name, "mask", other)),
        }
    }

    pub fn matrix(&self, name: &str) -> Result<&Array2<f64>, ArgError> {
        match self.require(name)? {
            ArgValue::Matrix(v) => Ok(v),
            other => Err(Self::wrong_kind(name, "matrix", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn typed_accessors_return_stored_values() {
        let extra = ExtraArgs::new()
            .with("rate", 0.25)
            .with("verbose", true)
            .with("label", "income")
            .with("z", vec![1.0, 2.0])
            .with("m", vec![true, false])
            .with("X", array![[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(extra.len(), 6);
        assert_eq!(extra.scalar("rate").unwrap(), 0.25);
        assert!(extra.flag("verbose").unwrap());
        assert_eq!(extra.text("label").unwrap(), "income");
        assert_eq!(extra.vector("z").unwrap(), &[1.0, 2.0]);
        assert_eq!(extra.mask("m").unwrap(), &[true, false]);
        assert_eq!(extra.matrix("X").unwrap()[[1, 0]], 3.0);
    }

    #[test]
    fn missing_and_mistyped_arguments_are_reported() {
        let extra = ExtraArgs::new().with("rate", "high");

        assert_eq!(
            extra.scalar("alpha"),
            Err(ArgError::Missing("alpha".to_string()))
        );
        assert_eq!(
            extra.scalar("rate"),
            Err(ArgError::WrongKind {
                name: "rate".to_string(),
                expected: "scalar",
                found: "text",
            })
        );
        assert!(extra.scalar_or("rate", 0.1).is_err());
        assert_eq!(extra.scalar_or("alpha", 0.1).unwrap(), 0.1);
    }

    #[test]
    fn insert_replaces_and_names_are_sorted() {
        let mut extra = ExtraArgs::new();
        assert!(extra.is_empty());
        assert!(extra.insert("rate", 0.1).is_none());
        extra.insert("alpha", 1.0);
        let previous = extra.insert("rate", 0.5);

        assert_eq!(previous, Some(ArgValue::Scalar(0.1)));
        assert_eq!(extra.names().collect::<Vec<_>>(), vec!["alpha", "rate"]);
        assert!(extra.contains("alpha"));
    }

    #[test]
    fn deserializes_from_a_toml_table() {
        let extra: ExtraArgs = toml::from_str(
            r#"
            rate = 0.3
            count = 2
            enabled = false
            label = "wave-2"
            z = [0.5, 1.5]
            m = [true, true, false]
            "#,
        )
        .unwrap();

        assert_eq!(extra.scalar("rate").unwrap(), 0.3);
        assert_eq!(extra.scalar("count").unwrap(), 2.0);
        assert!(!extra.flag("enabled").unwrap());
        assert_eq!(extra.text("label").unwrap(), "wave-2");
        assert_eq!(extra.vector("z").unwrap(), &[0.5, 1.5]);
        assert_eq!(extra.mask("m").unwrap(), &[true, true, false]);
    }
}
