pub mod alarm;
pub mod arbiter;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod messages;
pub mod notify;
pub mod receipt;
pub mod secret;
pub mod session;
pub mod subject;
pub mod timer;
pub mod view;
pub mod watcher;
