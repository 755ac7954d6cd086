pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_app_config};
pub use wiring::{wire_session, Session, StoreBackend};
