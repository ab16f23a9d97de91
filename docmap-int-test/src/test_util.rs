use docmap::Connection;
use std::sync::Once;

static CONNECT: Once = Once::new();

#[ctor::ctor]
fn init_logging() {
    colog::init();
}

/// Connects the shared in-memory database, once per test process.
///
/// Tests within one binary run in parallel against this single connection,
/// so every test (or test file) uses its own collection to stay isolated.
pub fn setup() {
    CONNECT.call_once(|| {
        Connection::connect("memory://int-test", "docmap-int-test")
            .expect("failed to connect to the in-memory driver");
    });
}
