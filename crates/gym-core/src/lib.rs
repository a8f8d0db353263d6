pub mod activity;
pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod followup;
pub mod identity;
pub mod intake;
pub mod io;
pub mod lifecycle;
pub mod notify;
pub mod paths;
pub mod settings;
pub mod store;
pub mod types;

pub use error::{GymError, Result};
pub use lifecycle::{Applied, LifecycleEngine, OutcomeRecord};
