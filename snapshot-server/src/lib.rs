//! The snapshot API server component.
//!
//! This builds on top of the [`snapshot_service`] crate and exposes snapshot
//! creation, listing, and cleanup as an HTTP layer, primarily so the
//! `stresstest` tool can hammer it.

pub mod cli;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod observability;
pub mod state;
pub mod web;
