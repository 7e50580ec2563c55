//! Construction context handed to factories.
//!
//! A context is a flat options table. Factories read their parameters through
//! the typed getters, which reject values they cannot represent instead of
//! clamping them.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ContextError, FactoryError};

/// A single option value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
}

impl OptionValue {
	fn type_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "integer",
			Self::Float(_) => "float",
			Self::Str(_) => "string",
		}
	}
}

impl From<bool> for OptionValue {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<i64> for OptionValue {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for OptionValue {
	fn from(v: i32) -> Self {
		Self::Int(v.into())
	}
}

impl From<f64> for OptionValue {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<&str> for OptionValue {
	fn from(v: &str) -> Self {
		Self::Str(v.to_owned())
	}
}

impl From<String> for OptionValue {
	fn from(v: String) -> Self {
		Self::Str(v)
	}
}

/// Options consulted by a factory while building a component.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ConstructionContext {
	options: BTreeMap<String, OptionValue>,
}

impl ConstructionContext {
	/// Creates an empty context; every getter falls back to its default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a flat TOML table of options.
	///
	/// ```
	/// use ember_registry::ConstructionContext;
	///
	/// let ctx = ConstructionContext::from_toml_str("bucket_count = 64\nheight = 6").unwrap();
	/// assert_eq!(ctx.get_size("bucket_count", 0).unwrap(), 64);
	/// ```
	pub fn from_toml_str(src: &str) -> Result<Self, ContextError> {
		Ok(toml::from_str(src)?)
	}

	/// Builder-style option setter.
	pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Sets an option, replacing any previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
		self.options.insert(key.into(), value.into());
	}

	/// Returns the raw value for `key`.
	pub fn get(&self, key: &str) -> Option<&OptionValue> {
		self.options.get(key)
	}

	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	pub fn len(&self) -> usize {
		self.options.len()
	}

	/// Reads a size parameter.
	///
	/// Negative values and values that do not fit the platform `usize` are
	/// rejected with [`FactoryError::InvalidArgument`].
	pub fn get_size(&self, key: &str, default: usize) -> Result<usize, FactoryError> {
		match self.get(key) {
			None => Ok(default),
			Some(OptionValue::Int(v)) => usize::try_from(*v).map_err(|_| {
				FactoryError::invalid_argument(format!("{key} = {v} does not fit in the platform size type"))
			}),
			Some(other) => Err(mismatch(key, "integer", other)),
		}
	}

	/// Reads a 32-bit signed parameter, rejecting out-of-range integers.
	pub fn get_i32(&self, key: &str, default: i32) -> Result<i32, FactoryError> {
		match self.get(key) {
			None => Ok(default),
			Some(OptionValue::Int(v)) => {
				i32::try_from(*v).map_err(|_| FactoryError::invalid_argument(format!("{key} = {v} is out of range for a 32-bit integer")))
			}
			Some(other) => Err(mismatch(key, "integer", other)),
		}
	}

	pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, FactoryError> {
		match self.get(key) {
			None => Ok(default),
			Some(OptionValue::Bool(v)) => Ok(*v),
			Some(other) => Err(mismatch(key, "bool", other)),
		}
	}

	pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, FactoryError> {
		match self.get(key) {
			None => Ok(default),
			Some(OptionValue::Str(v)) => Ok(v),
			Some(other) => Err(mismatch(key, "string", other)),
		}
	}
}

fn mismatch(key: &str, expected: &str, found: &OptionValue) -> FactoryError {
	FactoryError::invalid_argument(format!("{key}: expected {expected}, found {}", found.type_name()))
}

#[cfg(test)]
mod tests;
