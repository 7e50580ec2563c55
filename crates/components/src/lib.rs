//! Standard components for the ember registry.
//!
//! Linking this crate registers every component below into the default
//! library through a [`PluginDef`]; engine code then resolves them by name:
//!
//! ```
//! use ember_components::{Comparator, MemTableRepFactory};
//! use ember_registry::{ConstructionContext, Registry};
//!
//! let registry = Registry::new_instance();
//! let cmp = registry.resolve_default::<dyn Comparator>("bytewise").unwrap();
//! assert_eq!(cmp.name(), "leveldb.BytewiseComparator");
//!
//! let ctx = ConstructionContext::from_toml_str("bucket_count = 1024").unwrap();
//! let rep = registry.resolve::<dyn MemTableRepFactory>("hash_skiplist", &ctx).unwrap();
//! assert_eq!(rep.name(), "HashSkipListRepFactory");
//! ```

pub mod comparator;
pub mod memtable;
pub mod merge_operator;

use ember_registry::{Capability, ConstructionContext, Entry, EntrySource, FactoryError, Library, NameMatcher, PluginDef};

pub use comparator::{BytewiseComparator, Comparator, KvMap, ReverseBytewiseComparator};
pub use memtable::{HashLinkListRepFactory, HashSkipListRepFactory, MemTableRepFactory, SkipListFactory, VectorRepFactory};
pub use merge_operator::{MaxOperator, MergeOperator, PutOperator, StringAppendOperator, UInt64AddOperator};

/// Registers every standard component into `library`.
///
/// Runs automatically for the default library; call it directly to build an
/// isolated library with the same contents.
pub fn register_all(library: &Library) {
	comparator::register(library);
	memtable::register(library);
	merge_operator::register(library);
}

inventory::submit!(PluginDef::new("ember-components", 0, register_all));

fn builtin<C: Capability + ?Sized>(
	matcher: impl Into<NameMatcher>,
	description: &'static str,
	factory: impl Fn(&str, &ConstructionContext) -> Result<Box<C>, FactoryError> + Send + Sync + 'static,
) -> Entry {
	Entry::new::<C, _>(matcher, factory)
		.with_source(EntrySource::Crate(env!("CARGO_PKG_NAME")))
		.with_description(description)
}

/// Parses the numeric suffix of a `family:<n>` name into a size.
fn size_suffix(name: &str) -> Result<usize, FactoryError> {
	let (_, digits) = name
		.rsplit_once(':')
		.ok_or_else(|| FactoryError::invalid_argument(format!("{name:?} has no size suffix")))?;
	digits
		.parse::<usize>()
		.map_err(|e| FactoryError::invalid_argument(format!("{name:?}: size suffix {digits:?} is not a valid size ({e})")))
}
