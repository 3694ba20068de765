//! Typed settings sections persisted as a single RON delta file.
//!
//! Every section is a struct implementing [`Settings`]. Defaults come from the
//! struct's `Default` impl; only values that differ from those defaults are
//! written to disk. A store without a backing file ([`SettingsStore::in_memory`])
//! behaves the same but never touches the filesystem.

#[cfg(feature = "bevy")]
mod bevy_adapter;
mod error;
mod store;

#[cfg(feature = "bevy")]
pub use bevy_adapter::*;

pub use error::SettingsError;
pub use store::{SettingsStore, SettingsStoreBuilder};

use serde::{de::DeserializeOwned, Serialize};

/// A strongly typed settings section.
pub trait Settings: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key of this section at the root of the settings file.
    const SECTION: &'static str;
}
