//! Galley Kitchen Server - kitchen order lifecycle and real-time task queue
//!
//! # Module structure
//!
//! ```text
//! galley-server/src/
//! ├── core/          # configuration, state, server
//! ├── auth/          # bearer token validation, staff extractor
//! ├── api/           # HTTP routes and handlers
//! ├── kitchen/       # domain logic: lifecycle, queue, ETA, assignment, stats
//! ├── message/       # message bus and event broadcasting
//! ├── db/            # models and repositories (embedded SurrealDB)
//! └── utils/         # errors, response envelope, logging, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod kitchen;
pub mod message;
pub mod utils;

// Re-export public types
pub use auth::{CurrentStaff, JwtService};
pub use core::{Config, Server, ServerState};
pub use message::{KitchenBroadcaster, MessageBus, Publisher};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ / /__  __  __
 / / __/ __ `/ / / _ \/ / / /
/ /_/ / /_/ / / /  __/ /_/ /
\____/\__,_/_/_/\___/\__, /
                    /____/
    "#
    );
}
