//! Server state
//!
//! `ServerState` holds shared references to every service. Cloning is
//! shallow (Arc / channel handles), so handlers take it by value.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::message::{KitchenBroadcaster, MessageBus, SignalWorker};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Immutable server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// In-process message bus
    pub bus: MessageBus,
    /// Kitchen lifecycle event fan-out
    pub broadcaster: KitchenBroadcaster,
    /// Bearer token validation
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize all services.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server is useless without either.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");

        let db_path = db_dir.join("galley.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let bus = MessageBus::with_capacity(config.bus_capacity);
        let broadcaster = KitchenBroadcaster::new(Arc::new(bus.clone()));
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        Self {
            config: config.clone(),
            db: db_service.db,
            bus,
            broadcaster,
            jwt_service,
        }
    }

    /// Start background tasks; call before serving requests
    pub fn start_background_tasks(&self) {
        SignalWorker::spawn(self.clone());
    }
}
