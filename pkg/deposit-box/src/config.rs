//! Runtime configuration

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{MAX_ADDRESSES, MAX_EVENT_CAPACITY, MESSAGE_LOG_CAPACITY, NULLIFIER_CONTEXT},
    ConfigError, Element,
};

/// Prefix of the environment variables read by [`Config::load`]
pub const ENV_PREFIX: &str = "DEPOSIT_BOX_";

/// Tunables of a [`DepositVerifier`](crate::DepositVerifier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The most identities the administrator may admit
    pub max_addresses: u64,
    /// The context tag credential proofs are checked against
    pub nullifier_context: u64,
    /// How many events a slow subscriber may fall behind before missing some
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_addresses: MAX_ADDRESSES,
            nullifier_context: NULLIFIER_CONTEXT,
            event_capacity: 1024,
        }
    }
}

impl Config {
    /// Load a config from the defaults, then `path` if given, then `DEPOSIT_BOX_*` environment
    /// variables, each overriding the last
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;

        Ok(config)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MESSAGE_LOG_CAPACITY).contains(&self.max_addresses) {
            return Err(ConfigError::MaxAddresses {
                max_addresses: self.max_addresses,
                capacity: MESSAGE_LOG_CAPACITY,
            });
        }

        if !(1..=MAX_EVENT_CAPACITY).contains(&self.event_capacity) {
            return Err(ConfigError::EventCapacity {
                event_capacity: self.event_capacity,
                max: MAX_EVENT_CAPACITY,
            });
        }

        Ok(())
    }

    /// [`Config::nullifier_context`] as an element
    #[must_use]
    pub fn context(&self) -> Element {
        Element::new(self.nullifier_context)
    }
}
