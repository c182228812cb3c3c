//! # provis-model
//!
//! Domain models for provis: the declarative specs read from a batch
//! document (user, group, batch), the record types the identity
//! backend returns, the per-entity provisioning results, and the
//! sensitive-material wrapper that keeps secrets out of logs.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::struct_excessive_bools)]

pub mod batch;
pub mod group;
pub mod record;
pub mod report;
pub mod secret;
pub mod user;

pub use batch::BatchSpec;
pub use group::GroupSpec;
pub use record::{AccessKeyPair, CallerIdentity, GroupRecord, Tag, UserRecord};
pub use report::{BatchReport, CreatedGroup, CreatedUser, FailedUser, GroupOutcome, UserOutcome};
pub use secret::SecretString;
pub use user::UserSpec;
