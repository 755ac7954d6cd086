//! Port interfaces for the application layer
//!
//! Ports define the contract between the sync controller and the
//! collaborators around it: the external clipboard, the editor widget host,
//! the settings store and the event loop's timer. Implementations live in
//! `ce-infra` and `ce-platform`; tests provide their own.

pub mod app_dirs;
mod deferred;
pub mod errors;
mod external_store;
mod local_fields;
mod result_sink;
pub mod settings;

pub use app_dirs::AppDirsPort;
pub use deferred::{DeferredTask, DeferredTaskPort};
pub use errors::{AppDirsError, StoreError};
pub use external_store::{ExternalChangeHandler, ExternalStorePort, SubscriptionId};
pub use local_fields::LocalFieldHostPort;
pub use result_sink::ResultSinkPort;
pub use settings::{SettingsMigrationPort, SettingsPort};
