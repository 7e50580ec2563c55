//! Layered name resolution over a stack of libraries.
//!
//! # Role
//!
//! A [`Registry`] is a per-session view: the default library at the base and
//! any number of caller-owned libraries pushed on top. Later pushes shadow
//! earlier layers purely through search order; no entry is ever mutated or
//! removed to achieve an override.
//!
//! # Invariants
//!
//! - `libraries()[0]` is always the default library.
//! - Lookup walks the stack from the most recently pushed library down to the
//!   default library and returns the first hit.

use std::sync::Arc;

use crate::capability::Capability;
use crate::context::ConstructionContext;
use crate::entry::EntryRef;
use crate::error::ResolveError;
use crate::library::{Library, default_library};

/// An ordered stack of libraries performing override-aware lookup.
#[derive(Debug, Clone)]
pub struct Registry {
	libraries: Vec<Arc<Library>>,
}

impl Registry {
	/// Creates a registry whose only layer is the default library.
	pub fn new_instance() -> Self {
		Self {
			libraries: vec![default_library()],
		}
	}

	/// Pushes `library` as the new most-specific layer.
	pub fn push_library(&mut self, library: Arc<Library>) {
		tracing::debug!(library = library.label(), depth = self.libraries.len() + 1, "pushed library");
		self.libraries.push(library);
	}

	/// Library stack, base first.
	pub fn libraries(&self) -> &[Arc<Library>] {
		&self.libraries
	}

	/// Returns the first entry matching `name`, searching the newest layer first.
	pub fn find_entry(&self, category: &str, name: &str) -> Option<EntryRef> {
		self.libraries.iter().rev().find_map(|lib| lib.find_entry(category, name))
	}

	pub fn contains(&self, category: &str, name: &str) -> bool {
		self.find_entry(category, name).is_some()
	}

	/// Builds the `C` registered under `name`.
	///
	/// Absence is reported as [`ResolveError::NotFound`]; factory failures are
	/// forwarded unchanged as [`ResolveError::Factory`].
	pub fn resolve<C: Capability + ?Sized>(&self, name: &str, ctx: &ConstructionContext) -> Result<Box<C>, ResolveError> {
		let Some(entry) = self.find_entry(C::CATEGORY, name) else {
			tracing::debug!(category = C::CATEGORY, name, "no entry matched");
			return Err(ResolveError::NotFound {
				category: C::CATEGORY.to_owned(),
				name: name.to_owned(),
			});
		};

		tracing::trace!(category = C::CATEGORY, name, entry = entry.name(), source = %entry.source(), "resolved entry");
		entry
			.create::<C>(name, ctx)
			.inspect_err(|e| tracing::warn!(category = C::CATEGORY, name, error = %e, "component construction failed"))
	}

	/// [`Registry::resolve`] with an empty context.
	pub fn resolve_default<C: Capability + ?Sized>(&self, name: &str) -> Result<Box<C>, ResolveError> {
		self.resolve(name, &ConstructionContext::new())
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new_instance()
	}
}
