//! Runtime settings read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `STOREFRONT_CHANNEL_BUFFER` | 32 | mailbox capacity of each actor |
//! | `STOREFRONT_DELIVERED_WINDOW` | 20 | delivered orders shown on the kanban board |
//!
//! A missing variable falls back to its default. So does a value that fails to parse or
//! is zero, with a warning.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

pub const CHANNEL_BUFFER_VAR: &str = "STOREFRONT_CHANNEL_BUFFER";
pub const DELIVERED_WINDOW_VAR: &str = "STOREFRONT_DELIVERED_WINDOW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    pub channel_buffer: usize,
    pub delivered_window: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            delivered_window: 20,
        }
    }
}

impl SystemConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            channel_buffer: try_load(&lookup, CHANNEL_BUFFER_VAR, defaults.channel_buffer),
            delivered_window: try_load(&lookup, DELIVERED_WINDOW_VAR, defaults.delivered_window),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display + PartialEq + Default,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => value,
        Ok(_) => {
            warn!("{key} must be positive, using default: {default}");
            default
        }
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }
    }
}
