//! # provis-backend
//!
//! The capability interface to the external identity backend, plus
//! the two clients that implement it:
//!
//! - [`HttpDirectoryClient`] - REST client used against a real backend
//! - [`InMemoryDirectory`] - in-process directory used by tests
//!
//! The backend itself (user storage, policy evaluation, credential
//! vaulting) is out of scope; everything here is a thin, typed client
//! boundary.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod http;
pub mod memory;

pub use client::DirectoryClient;
pub use error::{BackendError, BackendResult};
pub use http::HttpDirectoryClient;
pub use memory::InMemoryDirectory;
