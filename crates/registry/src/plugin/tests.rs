use super::*;
use crate::ConstructionContext;
use crate::test_fixtures::{Greeter, greeter_entry};

const ORDER: &str = "PluginOrder";

fn record(library: &Library, plugin: &'static str) {
	library.add_entry(ORDER, greeter_entry("plugin-tests::ran", plugin));
	library.add_entry(ORDER, greeter_entry("plugin-tests::shared", plugin));
}

fn late(library: &Library) {
	record(library, "plugin-tests::late");
}

fn named_b(library: &Library) {
	record(library, "plugin-tests::b");
}

fn named_a(library: &Library) {
	record(library, "plugin-tests::a");
}

fn early(library: &Library) {
	record(library, "plugin-tests::early");
}

inventory::submit!(PluginDef::new("plugin-tests::late", 10, late));
inventory::submit!(PluginDef::new("plugin-tests::b", 0, named_b));
inventory::submit!(PluginDef::new("plugin-tests::a", 0, named_a));
inventory::submit!(PluginDef::new("plugin-tests::early", -10, early));

fn reply(library: &Library, name: &str) -> Option<String> {
	let entry = library.find_entry(ORDER, name)?;
	entry.create::<dyn Greeter>(name, &ConstructionContext::new()).ok().map(|g| g.greet())
}

#[test]
fn test_plugins_run_in_priority_then_name_order() {
	let library = Library::new("plugins");
	assert_eq!(run_plugins(&library), 4);

	let order: Vec<String> = library
		.entries(ORDER)
		.iter()
		.filter(|e| e.name() == "plugin-tests::ran")
		.filter_map(|e| e.create::<dyn Greeter>("plugin-tests::ran", &ConstructionContext::new()).ok())
		.map(|g| g.greet())
		.collect();
	assert_eq!(order, ["plugin-tests::early", "plugin-tests::a", "plugin-tests::b", "plugin-tests::late"]);
}

#[test]
fn test_lowest_priority_plugin_takes_precedence() {
	let library = Library::new("plugins");
	run_plugins(&library);
	assert_eq!(reply(&library, "plugin-tests::shared").as_deref(), Some("plugin-tests::early"));
	assert_eq!(reply(&crate::default_library(), "plugin-tests::shared").as_deref(), Some("plugin-tests::early"));
}
