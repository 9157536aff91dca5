use tracing::warn;

use crate::domain::OrderStatus;

pub const CHANNEL_BUFFER_VAR: &str = "FOH_CHANNEL_BUFFER";
pub const ALLOW_REVERT_OVERRIDE_VAR: &str = "FOH_ALLOW_REVERT_OVERRIDE";

/// Runtime settings for the front-of-house system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of the order store's request channel.
    pub channel_buffer: usize,
    /// Whether operators may send in-flight orders back to pending.
    pub allow_revert_override: bool,
    /// Statuses that trigger a customer notification.
    pub notify_statuses: Vec<OrderStatus>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 100,
            allow_revert_override: true,
            notify_statuses: vec![OrderStatus::Confirmed, OrderStatus::Ready, OrderStatus::Cancelled],
        }
    }
}

impl SystemConfig {
    /// Defaults overridden by `FOH_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Malformed values are logged and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CHANNEL_BUFFER_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.channel_buffer = size,
                _ => warn!(var = CHANNEL_BUFFER_VAR, value = %raw, "Ignoring invalid channel buffer"),
            }
        }

        if let Some(raw) = lookup(ALLOW_REVERT_OVERRIDE_VAR) {
            match parse_flag(&raw) {
                Some(flag) => config.allow_revert_override = flag,
                None => warn!(var = ALLOW_REVERT_OVERRIDE_VAR, value = %raw, "Ignoring invalid flag"),
            }
        }

        config
    }

    pub fn notifies_on(&self, status: OrderStatus) -> bool {
        self.notify_statuses.contains(&status)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
