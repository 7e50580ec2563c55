//! Memtable representation factories.
//!
//! | name              | options                                                     |
//! |-------------------|-------------------------------------------------------------|
//! | `skiplist`        | `lookahead`                                                 |
//! | `skiplist:<n>`    | lookahead taken from the name                               |
//! | `vector`          | `reserved_size`                                             |
//! | `vector:<n>`      | reserved size taken from the name                           |
//! | `hash_skiplist`   | `bucket_count`, `height`, `branching_factor`                |
//! | `hash_linkedlist` | `bucket_count`, `huge_page_tlb_size`,                       |
//! |                   | `bucket_entries_logging_threshold`,                         |
//! |                   | `if_log_bucket_dist_when_flash`, `threshold_use_skiplist`   |
//!
//! Size options that are negative or do not fit the platform `usize` are
//! rejected with [`FactoryError::InvalidArgument`].

use std::any::Any;

use ember_registry::{Capability, ConstructionContext, FactoryError, Library, NameMatcher};

/// Creates the in-memory write buffer representation for a column family.
pub trait MemTableRepFactory: Send + Sync {
	fn name(&self) -> &'static str;

	/// Whether concurrent inserts into one memtable are safe.
	fn is_insert_concurrently_supported(&self) -> bool {
		false
	}

	/// Concrete factory access for option inspection.
	fn as_any(&self) -> &dyn Any;
}

impl Capability for dyn MemTableRepFactory {
	const CATEGORY: &'static str = "MemTableRepFactory";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipListFactory {
	pub lookahead: usize,
}

impl SkipListFactory {
	pub fn from_context(ctx: &ConstructionContext) -> Result<Self, FactoryError> {
		Ok(Self {
			lookahead: ctx.get_size("lookahead", 0)?,
		})
	}
}

impl MemTableRepFactory for SkipListFactory {
	fn name(&self) -> &'static str {
		"SkipListFactory"
	}

	fn is_insert_concurrently_supported(&self) -> bool {
		true
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorRepFactory {
	pub reserved_size: usize,
}

impl VectorRepFactory {
	pub fn from_context(ctx: &ConstructionContext) -> Result<Self, FactoryError> {
		Ok(Self {
			reserved_size: ctx.get_size("reserved_size", 0)?,
		})
	}
}

impl MemTableRepFactory for VectorRepFactory {
	fn name(&self) -> &'static str {
		"VectorRepFactory"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSkipListRepFactory {
	pub bucket_count: usize,
	pub height: i32,
	pub branching_factor: i32,
}

impl Default for HashSkipListRepFactory {
	fn default() -> Self {
		Self {
			bucket_count: 1_000_000,
			height: 4,
			branching_factor: 4,
		}
	}
}

impl HashSkipListRepFactory {
	pub fn from_context(ctx: &ConstructionContext) -> Result<Self, FactoryError> {
		let d = Self::default();
		let out = Self {
			bucket_count: ctx.get_size("bucket_count", d.bucket_count)?,
			height: ctx.get_i32("height", d.height)?,
			branching_factor: ctx.get_i32("branching_factor", d.branching_factor)?,
		};
		if out.height <= 0 || out.branching_factor <= 0 {
			return Err(FactoryError::invalid_argument(format!(
				"skiplist height ({}) and branching_factor ({}) must be positive",
				out.height, out.branching_factor
			)));
		}
		Ok(out)
	}
}

impl MemTableRepFactory for HashSkipListRepFactory {
	fn name(&self) -> &'static str {
		"HashSkipListRepFactory"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashLinkListRepFactory {
	pub bucket_count: usize,
	pub huge_page_tlb_size: usize,
	pub bucket_entries_logging_threshold: i32,
	pub if_log_bucket_dist_when_flash: bool,
	pub threshold_use_skiplist: i32,
}

impl Default for HashLinkListRepFactory {
	fn default() -> Self {
		Self {
			bucket_count: 50_000,
			huge_page_tlb_size: 0,
			bucket_entries_logging_threshold: 4096,
			if_log_bucket_dist_when_flash: true,
			threshold_use_skiplist: 256,
		}
	}
}

impl HashLinkListRepFactory {
	pub fn from_context(ctx: &ConstructionContext) -> Result<Self, FactoryError> {
		let d = Self::default();
		Ok(Self {
			bucket_count: ctx.get_size("bucket_count", d.bucket_count)?,
			huge_page_tlb_size: ctx.get_size("huge_page_tlb_size", d.huge_page_tlb_size)?,
			bucket_entries_logging_threshold: ctx.get_i32("bucket_entries_logging_threshold", d.bucket_entries_logging_threshold)?,
			if_log_bucket_dist_when_flash: ctx.get_bool("if_log_bucket_dist_when_flash", d.if_log_bucket_dist_when_flash)?,
			threshold_use_skiplist: ctx.get_i32("threshold_use_skiplist", d.threshold_use_skiplist)?,
		})
	}
}

impl MemTableRepFactory for HashLinkListRepFactory {
	fn name(&self) -> &'static str {
		"HashLinkListRepFactory"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

type RepResult = Result<Box<dyn MemTableRepFactory>, FactoryError>;

fn boxed<R: MemTableRepFactory + 'static>(rep: R) -> Box<dyn MemTableRepFactory> {
	Box::new(rep)
}

pub(crate) fn register(library: &Library) {
	let category = <dyn MemTableRepFactory>::CATEGORY;

	library.add_entry(
		category,
		crate::builtin("skiplist", "skip list; option lookahead", |_, ctx| -> RepResult { SkipListFactory::from_context(ctx).map(boxed) }),
	);
	library.add_entry(
		category,
		crate::builtin("vector", "vector buffer; option reserved_size", |_, ctx| -> RepResult { VectorRepFactory::from_context(ctx).map(boxed) }),
	);
	library.add_entry(
		category,
		crate::builtin("hash_skiplist", "hashed skip list buckets", |_, ctx| -> RepResult {
			HashSkipListRepFactory::from_context(ctx).map(boxed)
		}),
	);
	library.add_entry(
		category,
		crate::builtin("hash_linkedlist", "hashed linked list buckets", |_, ctx| -> RepResult {
			HashLinkListRepFactory::from_context(ctx).map(boxed)
		}),
	);

	let patterns: [(&str, &'static str, fn(&str, &ConstructionContext) -> RepResult); 2] = [
		(r"skiplist:[0-9]+", "skip list with lookahead in the name", |name, _| {
			Ok(boxed(SkipListFactory {
				lookahead: crate::size_suffix(name)?,
			}))
		}),
		(r"vector:[0-9]+", "vector buffer with reserved size in the name", |name, _| {
			Ok(boxed(VectorRepFactory {
				reserved_size: crate::size_suffix(name)?,
			}))
		}),
	];
	for (pattern, description, factory) in patterns {
		match NameMatcher::pattern(pattern) {
			Ok(matcher) => library.add_entry(category, crate::builtin(matcher, description, factory)),
			Err(e) => tracing::error!(pattern, error = %e, "invalid memtable name pattern"),
		}
	}
}
