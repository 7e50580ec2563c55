//! Races first access to the default library. Kept in its own binary so no
//! other test initializes the singleton beforehand.

use std::sync::{Arc, Barrier};
use std::thread;

use ember_registry::{Library, default_library};

#[test]
fn test_racing_first_access_yields_one_instance() {
	let _ = tracing_subscriber::fmt::try_init();

	const THREADS: usize = 32;
	let barrier = Arc::new(Barrier::new(THREADS));
	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				default_library()
			})
		})
		.collect();

	let libs: Vec<Arc<Library>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	assert!(libs.iter().all(|l| Arc::ptr_eq(l, &libs[0])));
	assert!(libs[0].is_empty(), "no plugins are linked into this test binary");
}
