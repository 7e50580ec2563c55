//! Named factory descriptors.
//!
//! # Role
//!
//! An [`Entry`] pairs a [`NameMatcher`] with a factory for one capability
//! family. The factory is stored type-erased so a single library can hold
//! entries of every family; it is recovered by downcasting on resolution.
//!
//! # Invariants
//!
//! - An entry is immutable once built. Libraries store it behind an `Arc` and
//!   hand out [`EntryRef`] read handles only.
//! - [`Entry::matches`] is pure: the same name always yields the same answer.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::capability::Capability;
use crate::context::ConstructionContext;
use crate::error::{FactoryError, ResolveError};

/// Boxed factory closure for capability `C`.
pub type FactoryFn<C> = Box<dyn Fn(&str, &ConstructionContext) -> Result<Box<C>, FactoryError> + Send + Sync>;

/// Shared read handle to an entry owned by a library.
pub type EntryRef = Arc<Entry>;

/// Decides which requested names an entry services.
#[derive(Clone)]
pub enum NameMatcher {
	/// Matches one name exactly.
	Exact(Box<str>),
	/// Matches every name the anchored pattern accepts in full.
	Pattern(Regex),
}

impl NameMatcher {
	pub fn exact(name: impl Into<Box<str>>) -> Self {
		Self::Exact(name.into())
	}

	/// Compiles `pattern` anchored to the whole name (`^(?:pattern)$`).
	///
	/// `pattern` must be a valid regex on its own, so unbalanced groups cannot
	/// close the anchoring group early.
	pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
		Regex::new(pattern)?;
		Regex::new(&format!("^(?:{pattern})$")).map(Self::Pattern)
	}

	pub fn matches(&self, name: &str) -> bool {
		match self {
			Self::Exact(s) => **s == *name,
			Self::Pattern(re) => re.is_match(name),
		}
	}

	/// Registered identity: the exact name or the pattern source.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Exact(s) => s,
			Self::Pattern(re) => re.as_str(),
		}
	}
}

impl fmt::Debug for NameMatcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
			Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
		}
	}
}

impl From<&str> for NameMatcher {
	fn from(name: &str) -> Self {
		Self::exact(name)
	}
}

impl From<String> for NameMatcher {
	fn from(name: String) -> Self {
		Self::exact(name)
	}
}

/// Where an entry was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrySource {
	/// Registered by a named library crate.
	Crate(&'static str),
	/// Added by application code at runtime.
	Runtime,
}

impl fmt::Display for EntrySource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Crate(name) => write!(f, "crate:{name}"),
			Self::Runtime => write!(f, "runtime"),
		}
	}
}

/// A named factory for one capability family.
pub struct Entry {
	matcher: NameMatcher,
	factory: Box<dyn Any + Send + Sync>,
	capability: &'static str,
	source: EntrySource,
	description: &'static str,
}

impl Entry {
	/// Creates an entry producing `C` for every name `matcher` accepts.
	pub fn new<C, F>(matcher: impl Into<NameMatcher>, factory: F) -> Self
	where
		C: Capability + ?Sized,
		F: Fn(&str, &ConstructionContext) -> Result<Box<C>, FactoryError> + Send + Sync + 'static,
	{
		let factory: FactoryFn<C> = Box::new(factory);
		Self {
			matcher: matcher.into(),
			factory: Box::new(factory),
			capability: std::any::type_name::<C>(),
			source: EntrySource::Runtime,
			description: "",
		}
	}

	pub fn with_source(mut self, source: EntrySource) -> Self {
		self.source = source;
		self
	}

	pub fn with_description(mut self, description: &'static str) -> Self {
		self.description = description;
		self
	}

	/// Returns whether this entry services `name`.
	#[inline]
	pub fn matches(&self, name: &str) -> bool {
		self.matcher.matches(name)
	}

	pub fn matcher(&self) -> &NameMatcher {
		&self.matcher
	}

	/// Registered identity (exact name or pattern source).
	pub fn name(&self) -> &str {
		self.matcher.as_str()
	}

	pub fn source(&self) -> EntrySource {
		self.source
	}

	pub fn description(&self) -> &'static str {
		self.description
	}

	/// Type name of the capability this entry builds.
	pub fn capability(&self) -> &'static str {
		self.capability
	}

	/// Returns true if this entry builds capability `C`.
	pub fn builds<C: Capability + ?Sized>(&self) -> bool {
		self.factory.is::<FactoryFn<C>>()
	}

	/// Invokes the factory for `name`.
	///
	/// The factory result is forwarded unchanged. An entry registered for a
	/// different capability yields [`ResolveError::TypeMismatch`].
	pub fn create<C: Capability + ?Sized>(&self, name: &str, ctx: &ConstructionContext) -> Result<Box<C>, ResolveError> {
		let Some(factory) = self.factory.downcast_ref::<FactoryFn<C>>() else {
			return Err(ResolveError::TypeMismatch {
				category: C::CATEGORY.to_owned(),
				name: name.to_owned(),
				expected: std::any::type_name::<C>(),
				actual: self.capability,
			});
		};
		factory(name, ctx).map_err(ResolveError::from)
	}
}

impl fmt::Debug for Entry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Entry")
			.field("matcher", &self.matcher)
			.field("capability", &self.capability)
			.field("source", &self.source)
			.finish_non_exhaustive()
	}
}
