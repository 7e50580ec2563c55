//! Layered object registry for pluggable storage engine components.
//!
//! Engine code resolves comparators, memtable representations, merge
//! operators and similar extension points by a configured name, without
//! compiling in knowledge of every implementation.
//!
//! - [`Entry`]: a named factory for one capability family
//! - [`Library`]: entries grouped by category, first match wins
//! - [`default_library`]: the shared base library, filled by linked [`PluginDef`]s
//! - [`Registry`]: a stack of libraries; newer layers shadow older ones
//!
//! ```
//! use std::sync::Arc;
//!
//! use ember_registry::{Capability, ConstructionContext, Library, Registry};
//!
//! trait Greeter: Send + Sync {
//! 	fn greet(&self) -> String;
//! }
//!
//! impl Capability for dyn Greeter {
//! 	const CATEGORY: &'static str = "DocGreeter";
//! }
//!
//! struct Hello;
//! impl Greeter for Hello {
//! 	fn greet(&self) -> String {
//! 		"hello".into()
//! 	}
//! }
//!
//! let overrides = Arc::new(Library::new("session"));
//! overrides.register::<dyn Greeter, _>("hello", |_, _| Ok(Box::new(Hello) as Box<dyn Greeter>));
//!
//! let mut registry = Registry::new_instance();
//! registry.push_library(overrides);
//!
//! let greeter = registry.resolve::<dyn Greeter>("hello", &ConstructionContext::new()).unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! assert!(registry.resolve_default::<dyn Greeter>("goodbye").is_err_and(|e| e.is_not_found()));
//! ```

mod capability;
mod context;
mod entry;
mod error;
mod library;
mod plugin;
mod registry;

#[cfg(test)]
mod test_fixtures;

pub use capability::Capability;
pub use context::{ConstructionContext, OptionValue};
pub use entry::{Entry, EntryRef, EntrySource, FactoryFn, NameMatcher};
pub use error::{ContextError, FactoryError, ResolveError};
pub use library::{Library, default_library, register};
pub use plugin::PluginDef;
pub use registry::Registry;
