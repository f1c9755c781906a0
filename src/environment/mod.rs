//! Loaded environments and their arguments.
//!
//! An [`Environment`] is whatever a loader hands back. envload only looks at
//! two of its fields, [`env_id`](Environment::env_id) and
//! [`env_args`](Environment::env_args); everything else is carried along
//! untouched in [`attributes`](Environment::attributes).

pub mod args;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use args::{load_args_file, parse_arg_pair, parse_arg_value};

/// Keyword arguments passed to an environment loader.
pub type EnvArgs = Map<String, Value>;

/// An environment instance produced by a loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Identifier the environment was resolved from. Empty means unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub env_id: String,

    /// Arguments the environment was constructed with. Empty means unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub env_args: EnvArgs,

    /// Loader-defined attributes.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a loader-defined attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get a loader-defined attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Record where this environment came from.
    ///
    /// Fields the loader already filled in are left alone.
    pub fn record_origin(&mut self, env_id: &str, env_args: &EnvArgs) {
        if self.env_id.is_empty() {
            self.env_id = env_id.to_string();
        }
        if self.env_args.is_empty() {
            self.env_args = env_args.clone();
        }
    }
}

/// Loaders may report an unset field as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
