/// A pluggable component family that entries can build.
///
/// Implemented on the trait-object type of the family, e.g.
/// `impl Capability for dyn Comparator`. [`Capability::CATEGORY`] is the
/// string key under which a [`Library`](crate::Library) groups the family's
/// entries.
pub trait Capability: Send + Sync + 'static {
	/// Category name shared by every entry of this family.
	const CATEGORY: &'static str;
}
