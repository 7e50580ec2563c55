//! Plugins that register through the public free functions.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ember_registry::{Capability, Entry, Library, PluginDef, Registry, default_library, register};

trait Tag: Send + Sync {
	fn tag(&self) -> &'static str;
}

impl Capability for dyn Tag {
	const CATEGORY: &'static str = "Tag";
}

struct Static(&'static str);

impl Tag for Static {
	fn tag(&self) -> &'static str {
		self.0
	}
}

fn tag_entry(name: &str, tag: &'static str) -> Entry {
	Entry::new::<dyn Tag, _>(name, move |_, _| Ok(Box::new(Static(tag)) as Box<dyn Tag>))
}

fn registers_through_free_functions(library: &Library) {
	library.add_entry("Tag", tag_entry("direct", "direct"));
	register("Tag", tag_entry("free", "free"));

	let registry = Registry::new_instance();
	assert!(registry.contains("Tag", "free"));
}

inventory::submit!(PluginDef::new("reentrant", 0, registers_through_free_functions));

#[test]
fn test_plugin_may_call_register_during_initialization() {
	let _ = tracing_subscriber::fmt::try_init();

	let (tx, rx) = mpsc::channel();
	thread::spawn(move || {
		let _ = tx.send(default_library());
	});
	let library = rx.recv_timeout(Duration::from_secs(10)).expect("default library initialization finished");

	assert!(Arc::ptr_eq(&library, &default_library()));
	assert_eq!(library.len(), 2);

	let registry = Registry::new_instance();
	for name in ["direct", "free"] {
		assert_eq!(registry.resolve_default::<dyn Tag>(name).unwrap().tag(), name);
	}
}
