use bevy::{
    app::App,
    ecs::resource::Resource,
    prelude::{Deref, Res, ResMut},
};
use std::sync::Arc;

use crate::{Settings, SettingsError, SettingsStore};

/// Shared handle to the application's settings store.
#[derive(Resource, Deref, Clone)]
pub struct SettingsStoreRef(pub Arc<SettingsStore>);

/// Snapshot of one section, refreshed by [`sync_settings_section`].
#[derive(Resource, Deref, Clone)]
pub struct SettingsArc<T: Send + Sync + 'static> {
    #[deref]
    pub value: Arc<T>,
    revision: u64,
}

pub trait AppSettingsExt {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self;

    /// Registers `S` in the store (if needed) and seeds `SettingsArc<S>`.
    fn register_settings_section<S: Settings>(&mut self) -> Result<&mut Self, SettingsError>;
}

impl AppSettingsExt for App {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self {
        self.world_mut()
            .insert_resource(SettingsStoreRef(Arc::new(store)));
        self
    }

    fn register_settings_section<S: Settings>(&mut self) -> Result<&mut Self, SettingsError> {
        let store = self.world().resource::<SettingsStoreRef>().0.clone();
        if !store.is_registered::<S>() {
            store.register::<S>()?;
        }
        let value = store.get::<S>()?;
        self.world_mut().insert_resource(SettingsArc::<S> {
            value,
            revision: store.revision(),
        });
        Ok(self)
    }
}

/// Replaces the `SettingsArc<S>` snapshot whenever the store changed.
pub fn sync_settings_section<S: Settings>(
    store: Res<SettingsStoreRef>,
    mut section: ResMut<SettingsArc<S>>,
) {
    let revision = store.revision();
    if section.revision == revision {
        return;
    }
    if let Ok(value) = store.get::<S>() {
        section.value = value;
        section.revision = revision;
    }
}
