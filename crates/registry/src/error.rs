use thiserror::Error;

/// Errors raised by a factory while building a component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
	/// A construction parameter failed validation (out of range, wrong type, unrepresentable).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// The component itself could not be built.
	#[error("construction failed: {0}")]
	Construction(String),
}

impl FactoryError {
	/// Shorthand for [`FactoryError::InvalidArgument`].
	pub fn invalid_argument(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	/// Shorthand for [`FactoryError::Construction`].
	pub fn construction(msg: impl Into<String>) -> Self {
		Self::Construction(msg.into())
	}
}

/// Outcome of a failed [`Registry::resolve`](crate::Registry::resolve).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
	/// No entry in any stacked library matches the requested name.
	#[error("no {category} registered under {name:?}")]
	NotFound { category: String, name: String },
	/// The matching entry was registered for a different capability type.
	#[error("entry {name:?} in category {category} builds {actual}, not {expected}")]
	TypeMismatch {
		category: String,
		name: String,
		expected: &'static str,
		actual: &'static str,
	},
	/// The factory ran and failed; forwarded unchanged.
	#[error(transparent)]
	Factory(#[from] FactoryError),
}

impl ResolveError {
	/// Returns true when no entry matched, as opposed to a failed construction.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

/// Errors raised while loading a [`ConstructionContext`](crate::ConstructionContext).
#[derive(Error, Debug)]
pub enum ContextError {
	#[error("invalid options table: {0}")]
	Parse(#[from] toml::de::Error),
}
