//! # provis-engine
//!
//! The provisioning workflow. Orchestrates group creation, user
//! creation, credential issuance, and policy/MFA attachment against a
//! [`provis_backend::DirectoryClient`], producing per-entity results
//! and an ordered audit trail.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod mfa;
pub mod password;
pub mod provisioner;

pub use password::{generate_password, DEFAULT_PASSWORD_LENGTH, PASSWORD_ALPHABET};
pub use provisioner::Provisioner;
