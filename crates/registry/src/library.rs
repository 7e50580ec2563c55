//! Entry storage grouped by capability category.
//!
//! # Role
//!
//! A [`Library`] owns entries and answers first-match lookups within one
//! category. Registries stack libraries; the process-wide base layer is
//! [`default_library`].
//!
//! # Invariants
//!
//! - Within a category, entries are searched in registration order and the
//!   first match wins. Duplicates are kept, never replaced.
//! - Registration is linearizable: concurrent `add_entry` calls never lose an
//!   entry (see `tests::test_concurrent_registration_loses_nothing`).
//! - Lookups read a published snapshot and never wait on writers.

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use crate::capability::Capability;
use crate::context::ConstructionContext;
use crate::entry::{Entry, EntryRef, NameMatcher};
use crate::error::FactoryError;
use crate::plugin;

/// Immutable view of a library's entries.
#[derive(Clone, Default)]
struct Snapshot {
	by_category: FxHashMap<Box<str>, Arc<[EntryRef]>>,
	len: usize,
}

impl Snapshot {
	fn with_entry(&self, category: &str, entry: EntryRef) -> Self {
		let mut next = self.clone();
		let slot = next.by_category.entry(Box::from(category)).or_insert_with(|| Arc::from(Vec::<EntryRef>::new()));
		let mut entries = slot.to_vec();
		entries.push(entry);
		*slot = Arc::from(entries);
		next.len += 1;
		next
	}
}

/// An owned, growable collection of entries grouped by category.
pub struct Library {
	label: Box<str>,
	snap: ArcSwap<Snapshot>,
}

impl Library {
	/// Creates an empty library. `label` shows up in logs and `Debug` output.
	pub fn new(label: impl Into<Box<str>>) -> Self {
		Self {
			label: label.into(),
			snap: ArcSwap::from_pointee(Snapshot::default()),
		}
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	/// Appends `entry` to `category`. Always succeeds.
	///
	/// Earlier registrations keep precedence: an entry whose name an existing
	/// entry already matches is stored but stays shadowed within this library.
	pub fn add_entry(&self, category: &str, entry: Entry) {
		let entry: EntryRef = Arc::new(entry);
		let shadowed = self.shadows(category, entry.matcher());
		self.snap.rcu(|old| old.with_entry(category, Arc::clone(&entry)));

		tracing::debug!(
			library = %self.label,
			category,
			name = entry.name(),
			source = %entry.source(),
			shadowed,
			"registered entry"
		);
	}

	/// Whether an existing entry already answers the exact name `matcher` stands for.
	///
	/// Pattern matchers have no single requestable name and never report shadowing.
	fn shadows(&self, category: &str, matcher: &NameMatcher) -> bool {
		match matcher {
			NameMatcher::Exact(name) => self.find_entry(category, name).is_some(),
			NameMatcher::Pattern(_) => false,
		}
	}

	/// Registers an exact-name factory for capability `C`.
	pub fn register<C, F>(&self, name: &str, factory: F)
	where
		C: Capability + ?Sized,
		F: Fn(&str, &ConstructionContext) -> Result<Box<C>, FactoryError> + Send + Sync + 'static,
	{
		self.add_entry(C::CATEGORY, Entry::new::<C, F>(name, factory));
	}

	/// Registers a pattern factory for capability `C`.
	///
	/// The factory receives the full requested name and derives any
	/// parameters from it.
	pub fn register_pattern<C, F>(&self, pattern: &str, factory: F) -> Result<(), regex::Error>
	where
		C: Capability + ?Sized,
		F: Fn(&str, &ConstructionContext) -> Result<Box<C>, FactoryError> + Send + Sync + 'static,
	{
		let matcher = NameMatcher::pattern(pattern)?;
		self.add_entry(C::CATEGORY, Entry::new::<C, F>(matcher, factory));
		Ok(())
	}

	/// Returns the first entry in `category` that matches `name`.
	pub fn find_entry(&self, category: &str, name: &str) -> Option<EntryRef> {
		let snap = self.snap.load();
		snap.by_category.get(category)?.iter().find(|e| e.matches(name)).cloned()
	}

	/// Entries of `category` in registration order.
	pub fn entries(&self, category: &str) -> Vec<EntryRef> {
		self.snap.load().by_category.get(category).map(|e| e.to_vec()).unwrap_or_default()
	}

	/// Categories with at least one entry, sorted.
	pub fn categories(&self) -> Vec<String> {
		let mut out: Vec<String> = self.snap.load().by_category.keys().map(|k| k.to_string()).collect();
		out.sort_unstable();
		out
	}

	/// Total number of entries across all categories.
	pub fn len(&self) -> usize {
		self.snap.load().len
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl std::fmt::Debug for Library {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Library").field("label", &self.label).field("len", &self.len()).finish()
	}
}

static DEFAULT: OnceLock<Arc<Library>> = OnceLock::new();

thread_local! {
	/// The default library while this thread is running plugins into it.
	static INITIALIZING: RefCell<Option<Arc<Library>>> = const { RefCell::new(None) };
}

/// Clears [`INITIALIZING`] when plugin initialization ends, including by unwind.
struct InitGuard;

impl InitGuard {
	fn enter(library: &Arc<Library>) -> Self {
		INITIALIZING.with_borrow_mut(|slot| *slot = Some(Arc::clone(library)));
		Self
	}
}

impl Drop for InitGuard {
	fn drop(&mut self) {
		INITIALIZING.with_borrow_mut(|slot| *slot = None);
	}
}

/// Returns the process-wide default library.
///
/// The first caller builds it and runs every linked [`PluginDef`](crate::PluginDef)
/// into it; concurrent first callers block until that finishes and then all
/// observe the same instance. Calls made from inside a plugin on the
/// initializing thread get the library under construction instead of
/// re-entering initialization.
pub fn default_library() -> Arc<Library> {
	if let Some(library) = INITIALIZING.with_borrow(Option::clone) {
		return library;
	}

	Arc::clone(DEFAULT.get_or_init(|| {
		let library = Arc::new(Library::new("default"));
		let plugins = {
			let _guard = InitGuard::enter(&library);
			plugin::run_plugins(&library)
		};
		tracing::info!(plugins, entries = library.len(), "default library initialized");
		library
	}))
}

/// Registers `entry` under `category` in the default library.
pub fn register(category: &str, entry: Entry) {
	default_library().add_entry(category, entry);
}
