//! Storage abstraction for DocHub content.
//!
//! This crate provides a [`Storage`] trait that separates document discovery and
//! retrieval from the site layer that turns documents into pages and navigation.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()` and `read()` methods
//! - [`Document`] records describing discovered pages and folders
//! - [`StorageError`] with a semantic kind and backend context
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `dochub-storage-fs` crate.

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, Storage, StorageError, StorageErrorKind};
