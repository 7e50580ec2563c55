//! Capability families used by the unit tests.

use crate::{Capability, Entry, FactoryError};

pub(crate) trait Greeter: Send + Sync {
	fn greet(&self) -> String;
}

impl Capability for dyn Greeter {
	const CATEGORY: &'static str = "Greeter";
}

pub(crate) trait Counter: Send + Sync {
	fn count(&self) -> usize;
}

impl Capability for dyn Counter {
	const CATEGORY: &'static str = "Counter";
}

pub(crate) struct Fixed(pub String);

impl Greeter for Fixed {
	fn greet(&self) -> String {
		self.0.clone()
	}
}

pub(crate) struct Tally(pub usize);

impl Counter for Tally {
	fn count(&self) -> usize {
		self.0
	}
}

/// Entry whose greeter answers with `reply`.
pub(crate) fn greeter_entry(name: &str, reply: &'static str) -> Entry {
	Entry::new::<dyn Greeter, _>(name, move |_, _| Ok(Box::new(Fixed(reply.to_owned())) as Box<dyn Greeter>))
}

/// Entry whose counter reads `size` from the context.
pub(crate) fn counter_entry(name: &str) -> Entry {
	Entry::new::<dyn Counter, _>(name, |_, ctx| {
		let size = ctx.get_size("size", 1)?;
		if size == 0 {
			return Err(FactoryError::construction("empty counter"));
		}
		Ok(Box::new(Tally(size)) as Box<dyn Counter>)
	})
}
