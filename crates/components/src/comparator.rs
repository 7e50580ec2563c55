//! Key comparators.

use std::cmp::Ordering;
use std::sync::Arc;

use ember_registry::{Capability, Entry, Library};

/// Total order over keys.
pub trait Comparator: Send + Sync {
	/// Stable identifier persisted alongside data ordered by this comparator.
	fn name(&self) -> &str;

	fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;

	fn equal(&self, a: &[u8], b: &[u8]) -> bool {
		self.compare(a, b) == Ordering::Equal
	}
}

impl Capability for dyn Comparator {
	const CATEGORY: &'static str = "Comparator";
}

/// Lexicographic byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytewiseComparator;

impl BytewiseComparator {
	pub const NAME: &'static str = "leveldb.BytewiseComparator";
}

impl Comparator for BytewiseComparator {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
		a.cmp(b)
	}
}

/// Reverse lexicographic byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseBytewiseComparator;

impl ReverseBytewiseComparator {
	pub const NAME: &'static str = "rocksdb.ReverseBytewiseComparator";
}

impl Comparator for ReverseBytewiseComparator {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
		b.cmp(a)
	}
}

pub(crate) fn register(library: &Library) {
	for name in [BytewiseComparator::NAME, "bytewise"] {
		library.add_entry(
			<dyn Comparator>::CATEGORY,
			crate::builtin::<dyn Comparator>(name, "lexicographic byte order", |_, _| Ok(Box::new(BytewiseComparator) as Box<dyn Comparator>)),
		);
	}
	for name in [ReverseBytewiseComparator::NAME, "reverse_bytewise"] {
		library.add_entry(
			<dyn Comparator>::CATEGORY,
			crate::builtin::<dyn Comparator>(name, "reverse lexicographic byte order", |_, _| Ok(Box::new(ReverseBytewiseComparator) as Box<dyn Comparator>)),
		);
	}
}

/// Key/value map ordered by an arbitrary [`Comparator`].
///
/// Keys the comparator considers equal collapse into one slot.
pub struct KvMap {
	cmp: Arc<dyn Comparator>,
	entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl KvMap {
	pub fn new(cmp: Arc<dyn Comparator>) -> Self {
		Self { cmp, entries: Vec::new() }
	}

	pub fn comparator(&self) -> &dyn Comparator {
		&*self.cmp
	}

	fn position(&self, key: &[u8]) -> Result<usize, usize> {
		self.entries.binary_search_by(|(k, _)| self.cmp.compare(k, key))
	}

	/// Inserts `value`, returning the value previously stored under an equal key.
	pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
		let key = key.into();
		let value = value.into();
		match self.position(&key) {
			Ok(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
			Err(i) => {
				self.entries.insert(i, (key, value));
				None
			}
		}
	}

	pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
		self.position(key).ok().map(|i| self.entries[i].1.as_slice())
	}

	pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
		self.position(key).ok().map(|i| self.entries.remove(i).1)
	}

	/// Entries in comparator order.
	pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
		self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Default for KvMap {
	fn default() -> Self {
		Self::new(Arc::new(BytewiseComparator))
	}
}

impl std::fmt::Debug for KvMap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KvMap").field("comparator", &self.cmp.name()).field("len", &self.entries.len()).finish()
	}
}
