//! Shared fixtures for the provis integration tests.

#![forbid(unsafe_code)]
#![deny(warnings)]

use provis_backend::InMemoryDirectory;
use provis_engine::Provisioner;
use provis_model::{BatchSpec, GroupSpec, UserSpec};

/// A provisioner over a fresh, empty in-memory directory.
pub fn fresh_provisioner() -> Provisioner<InMemoryDirectory> {
    Provisioner::new(InMemoryDirectory::new())
}

/// The canonical smoke-test batch: one group and one console user that
/// joins it.
pub fn console_batch() -> BatchSpec {
    BatchSpec::new()
        .with_group(GroupSpec::new("devs"))
        .with_user(
            UserSpec::new("alice")
                .with_group("devs")
                .with_console_access(true),
        )
}
