#[path = "support/harness.rs"]
mod harness;

pub use fixtures::create_organization;
pub use harness::create_harness;
