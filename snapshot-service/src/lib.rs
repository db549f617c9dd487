//! The service layer for the snapshot stress harness.
//!
//! This crate wraps the `btrfs subvolume` command-line operations behind the
//! [`VolumeStore`] trait and builds the higher-level [`SnapshotService`] on
//! top of it: creating uniquely named test snapshots, listing them, and
//! sweeping them away again.
//!
//! It is designed as a library crate to be used by the `snapshot-server`.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod error;
mod inventory;
mod service;
mod store;

pub use error::{Result, ServiceError, VolumeError};
pub use inventory::filter_test_snapshots;
pub use service::{CreatedSnapshot, DeleteOutcome, SnapshotLayout, SnapshotService};
pub use store::{BoxedStore, BtrfsStore, InMemoryStore, VolumeStore};
