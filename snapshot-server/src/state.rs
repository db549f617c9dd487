//! Shared state handed to all endpoint handlers.

use std::sync::Arc;

use snapshot_service::{BtrfsStore, SnapshotService};

use crate::config::Config;

/// The state of the server, shared by all request handlers.
#[derive(Debug, Clone)]
pub struct ServiceState(Arc<StateInner>);

#[derive(Debug)]
struct StateInner {
    config: Config,
    service: SnapshotService,
}

impl ServiceState {
    /// Creates the state with a btrfs-backed snapshot service.
    pub fn new(config: Config) -> Self {
        let service = SnapshotService::new(Box::new(BtrfsStore::new()), config.layout.clone().into());
        Self::with_service(config, service)
    }

    /// Creates the state around an existing service, used by tests to swap
    /// in an in-memory store.
    pub fn with_service(config: Config, service: SnapshotService) -> Self {
        Self(Arc::new(StateInner { config, service }))
    }

    /// The server configuration.
    pub fn config(&self) -> &Config {
        &self.0.config
    }

    /// The snapshot service.
    pub fn service(&self) -> &SnapshotService {
        &self.0.service
    }
}
