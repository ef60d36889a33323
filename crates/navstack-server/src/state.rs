//! Application state shared across handlers.

use std::sync::Arc;

use navstack_core::NotificationLog;
use navstack_store::Store;
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::notifier::Notifier;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using
/// `State<AppState>`. The notification log is the one mutable component:
/// the mutex keeps record-then-truncate atomic when requests run on
/// parallel threads.
#[derive(Clone)]
pub struct AppState {
    /// Remote document store.
    store: Arc<Store>,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Bounded log of recent successful inserts.
    log: Arc<Mutex<NotificationLog>>,
    /// Outbound chat/webhook notification sinks.
    notifier: Arc<Notifier>,
}

impl AppState {
    /// Create new application state with an empty notification log.
    pub fn new(store: Store, config: ServerConfig) -> Self {
        let notifier = Notifier::from_config(&config);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            log: Arc::new(Mutex::new(NotificationLog::new())),
            notifier: Arc::new(notifier),
        }
    }

    /// Get a reference to the document store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a handle to the notification log.
    pub fn log(&self) -> &Arc<Mutex<NotificationLog>> {
        &self.log
    }

    /// Get a reference to the notification sinks.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
