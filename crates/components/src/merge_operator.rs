//! Associative merge operators.

use ember_registry::{Capability, ConstructionContext, FactoryError, Library};

/// Combines an existing value with a sequence of merge operands.
pub trait MergeOperator: Send + Sync {
	fn name(&self) -> &'static str;

	/// Folds `operands` (oldest first) onto `existing`.
	///
	/// Returns `None` when the operands cannot be merged; the engine treats
	/// that as corruption of the key.
	fn full_merge(&self, key: &[u8], existing: Option<&[u8]>, operands: &[&[u8]]) -> Option<Vec<u8>>;
}

impl Capability for dyn MergeOperator {
	const CATEGORY: &'static str = "MergeOperator";
}

/// Last write wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutOperator;

impl MergeOperator for PutOperator {
	fn name(&self) -> &'static str {
		"PutOperator"
	}

	fn full_merge(&self, _key: &[u8], existing: Option<&[u8]>, operands: &[&[u8]]) -> Option<Vec<u8>> {
		operands.last().copied().or(existing).map(<[u8]>::to_vec)
	}
}

/// Wrapping addition of little-endian `u64` counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UInt64AddOperator;

impl UInt64AddOperator {
	fn decode(key: &[u8], value: &[u8]) -> u64 {
		match <[u8; 8]>::try_from(value) {
			Ok(bytes) => u64::from_le_bytes(bytes),
			Err(_) => {
				tracing::warn!(key = ?key, len = value.len(), "uint64add operand is not 8 bytes; treating as 0");
				0
			}
		}
	}
}

impl MergeOperator for UInt64AddOperator {
	fn name(&self) -> &'static str {
		"UInt64AddOperator"
	}

	fn full_merge(&self, key: &[u8], existing: Option<&[u8]>, operands: &[&[u8]]) -> Option<Vec<u8>> {
		let base = existing.map_or(0, |v| Self::decode(key, v));
		let sum = operands.iter().fold(base, |acc, op| acc.wrapping_add(Self::decode(key, op)));
		Some(sum.to_le_bytes().to_vec())
	}
}

/// Keeps the bytewise-greatest value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxOperator;

impl MergeOperator for MaxOperator {
	fn name(&self) -> &'static str {
		"MaxOperator"
	}

	fn full_merge(&self, _key: &[u8], existing: Option<&[u8]>, operands: &[&[u8]]) -> Option<Vec<u8>> {
		existing.into_iter().chain(operands.iter().copied()).max().map(<[u8]>::to_vec)
	}
}

/// Appends operands to the existing value, separated by a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringAppendOperator {
	pub delimiter: char,
}

impl Default for StringAppendOperator {
	fn default() -> Self {
		Self { delimiter: ',' }
	}
}

impl StringAppendOperator {
	/// Reads `delimiter`, which must be exactly one character.
	pub fn from_context(ctx: &ConstructionContext) -> Result<Self, FactoryError> {
		let raw = ctx.get_str("delimiter", ",")?;
		let mut chars = raw.chars();
		match (chars.next(), chars.next()) {
			(Some(delimiter), None) => Ok(Self { delimiter }),
			_ => Err(FactoryError::invalid_argument(format!("delimiter must be a single character, got {raw:?}"))),
		}
	}
}

impl MergeOperator for StringAppendOperator {
	fn name(&self) -> &'static str {
		"StringAppendOperator"
	}

	fn full_merge(&self, _key: &[u8], existing: Option<&[u8]>, operands: &[&[u8]]) -> Option<Vec<u8>> {
		let mut buf = [0u8; 4];
		let delim = self.delimiter.encode_utf8(&mut buf).as_bytes();

		let mut out = Vec::new();
		for (i, part) in existing.into_iter().chain(operands.iter().copied()).enumerate() {
			if i > 0 {
				out.extend_from_slice(delim);
			}
			out.extend_from_slice(part);
		}
		Some(out)
	}
}

type MergeResult = Result<Box<dyn MergeOperator>, FactoryError>;

pub(crate) fn register(library: &Library) {
	let category = <dyn MergeOperator>::CATEGORY;

	library.add_entry(category, crate::builtin("put", "last operand wins", |_, _| -> MergeResult { Ok(Box::new(PutOperator)) }));
	library.add_entry(
		category,
		crate::builtin("uint64add", "little-endian u64 counter addition", |_, _| -> MergeResult { Ok(Box::new(UInt64AddOperator)) }),
	);
	library.add_entry(category, crate::builtin("max", "bytewise maximum", |_, _| -> MergeResult { Ok(Box::new(MaxOperator)) }));
	library.add_entry(
		category,
		crate::builtin("stringappend", "delimited append; option delimiter", |_, ctx| -> MergeResult {
			Ok(Box::new(StringAppendOperator::from_context(ctx)?))
		}),
	);
}
