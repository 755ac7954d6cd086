pub mod clipboard;
pub mod settings;

pub use clipboard::InMemoryExternalStore;
pub use settings::FileSettingsRepository;
