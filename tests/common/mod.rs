// Common test utilities and fixtures

pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test crates
#[allow(unused_imports)]
pub use fixtures::TestRepo;
#[allow(unused_imports)]
pub use helpers::{create_test_services, RecordingClient};
