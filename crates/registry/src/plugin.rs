use crate::library::Library;

/// A link-time registration hook for the default library.
///
/// Crates that ship components submit one with `inventory::submit!`; every
/// linked plugin runs exactly once while [`default_library`](crate::default_library)
/// initializes.
///
/// `register` runs on the initializing thread. Calls it makes to
/// [`register`](crate::register), [`default_library`](crate::default_library)
/// or [`Registry::new_instance`](crate::Registry::new_instance) see the library
/// under construction. Other threads calling `default_library` block until
/// initialization ends, so a plugin must not wait on such threads.
///
/// ```ignore
/// inventory::submit!(ember_registry::PluginDef::new("my-components", 0, register_all));
/// ```
pub struct PluginDef {
	/// Plugin name, used for ordering ties and logs.
	pub name: &'static str,
	/// Lower runs first, so its entries take precedence within the default library.
	pub priority: i16,
	/// Called with the default library under construction.
	pub register: fn(&Library),
}

inventory::collect!(PluginDef);

impl PluginDef {
	pub const fn new(name: &'static str, priority: i16, register: fn(&Library)) -> Self {
		Self { name, priority, register }
	}
}

/// Runs every collected plugin into `library` in `(priority, name)` order.
///
/// Returns the number of plugins run.
pub(crate) fn run_plugins(library: &Library) -> usize {
	let mut plugins: Vec<&'static PluginDef> = inventory::iter::<PluginDef>.into_iter().collect();
	plugins.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(b.name)));

	for plugin in &plugins {
		let before = library.len();
		(plugin.register)(library);
		tracing::debug!(plugin = plugin.name, added = library.len() - before, "ran registry plugin");
	}

	plugins.len()
}

#[cfg(test)]
mod tests;
