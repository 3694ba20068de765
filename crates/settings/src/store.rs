use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Settings, SettingsError};

use ron::value::{Map as RonMap, Value as RonValue};
use serde::Serialize;

type Deltas = HashMap<String, RonValue>;

fn to_ron_value<T: Serialize>(value: &T) -> Result<RonValue, SettingsError> {
    let text = ron::to_string(value)?;
    Ok(ron::from_str(&text)?)
}

fn to_ron_map<T: Serialize>(value: &T) -> Result<RonMap, SettingsError> {
    match to_ron_value(value)? {
        RonValue::Map(map) => Ok(map),
        _ => Err(SettingsError::Invalid("section must serialize to a map")),
    }
}

fn from_ron_value<T: Settings>(value: &RonValue) -> Result<T, SettingsError> {
    Ok(value.clone().into_rust::<T>()?)
}

/// Overlay `delta` onto `base`, descending into nested maps.
fn merge_maps(base: &RonMap, delta: &RonMap) -> RonMap {
    let mut merged = base.clone();
    for (key, delta_value) in delta.iter() {
        let value = match (merged.get(key), delta_value) {
            (Some(RonValue::Map(base_m)), RonValue::Map(delta_m)) => {
                RonValue::Map(merge_maps(base_m, delta_m))
            }
            _ => delta_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

/// Keys of `current` whose values differ from `defaults`, recursively.
fn diff_maps(current: &RonMap, defaults: &RonMap) -> RonMap {
    let mut out = RonMap::new();
    for (key, value) in current.iter() {
        match (defaults.get(key), value) {
            (Some(RonValue::Map(def_m)), RonValue::Map(cur_m)) => {
                let nested = diff_maps(cur_m, def_m);
                if !nested.is_empty() {
                    out.insert(key.clone(), RonValue::Map(nested));
                }
            }
            (Some(def_v), _) if def_v == value => {}
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

fn read_deltas(path: &Path) -> Result<Deltas, SettingsError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }
    Ok(ron::from_str(&content)?)
}

/// Builder for a file-backed [`SettingsStore`].
#[derive(Default)]
pub struct SettingsStoreBuilder {
    settings_file: Option<PathBuf>,
}

impl SettingsStoreBuilder {
    pub fn with_settings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    /// Reads the existing delta file, creating its parent directory if needed.
    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let file_path = self
            .settings_file
            .ok_or(SettingsError::Invalid("settings file not specified"))?;

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let deltas = read_deltas(&file_path)?;
        Ok(SettingsStore::with_state(Some(file_path), deltas))
    }
}

/// Thread-safe store of registered sections.
pub struct SettingsStore {
    file_path: Option<PathBuf>,
    deltas: RwLock<Deltas>,
    defaults: RwLock<HashMap<&'static str, RonMap>>,
    values: RwLock<HashMap<&'static str, RonMap>>,
    revision: AtomicU64,
}

impl SettingsStore {
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::default()
    }

    /// A store with no backing file. Updates apply but are never persisted.
    pub fn in_memory() -> Self {
        Self::with_state(None, HashMap::new())
    }

    fn with_state(file_path: Option<PathBuf>, deltas: Deltas) -> Self {
        Self {
            file_path,
            deltas: RwLock::new(deltas),
            defaults: RwLock::new(HashMap::new()),
            values: RwLock::new(HashMap::new()),
            revision: AtomicU64::new(0),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.file_path.is_some()
    }

    /// Bumped on every `update` and `reload`.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn is_registered<T: Settings>(&self) -> bool {
        read(&self.values)
            .map(|values| values.contains_key(T::SECTION))
            .unwrap_or(false)
    }

    /// Registers a section: its defaults plus whatever delta the file already holds.
    pub fn register<T: Settings>(&self) -> Result<(), SettingsError> {
        let section = T::SECTION;
        if read(&self.values)?.contains_key(section) {
            return Err(SettingsError::AlreadyRegistered(section));
        }

        let default_map = to_ron_map(&T::default())?;
        let merged = match read(&self.deltas)?.get(section) {
            Some(RonValue::Map(delta)) => merge_maps(&default_map, delta),
            _ => default_map.clone(),
        };

        write(&self.defaults)?.insert(section, default_map);
        write(&self.values)?.insert(section, merged);
        Ok(())
    }

    /// Current value of a section.
    pub fn get<T: Settings>(&self) -> Result<Arc<T>, SettingsError> {
        self.try_get::<T>()?
            .ok_or(SettingsError::NotRegistered(T::SECTION))
    }

    /// Like [`get`](Self::get) but `None` when the section is unknown.
    pub fn try_get<T: Settings>(&self) -> Result<Option<Arc<T>>, SettingsError> {
        let values = read(&self.values)?;
        let Some(map) = values.get(T::SECTION) else {
            return Ok(None);
        };
        let value = from_ron_value::<T>(&RonValue::Map(map.clone()))?;
        Ok(Some(Arc::new(value)))
    }

    /// Mutates a section and persists its delta against the defaults.
    pub fn update<T, F>(&self, mutator: F) -> Result<(), SettingsError>
    where
        T: Settings,
        F: FnOnce(&mut T),
    {
        let section = T::SECTION;
        let mut current: T = {
            let values = read(&self.values)?;
            let map = values
                .get(section)
                .ok_or(SettingsError::NotRegistered(section))?;
            from_ron_value(&RonValue::Map(map.clone()))?
        };
        mutator(&mut current);

        let new_map = to_ron_map(&current)?;
        let diff = {
            let defaults = read(&self.defaults)?;
            let default_map = defaults
                .get(section)
                .ok_or(SettingsError::NotRegistered(section))?;
            diff_maps(&new_map, default_map)
        };

        write(&self.values)?.insert(section, new_map);
        {
            let mut deltas = write(&self.deltas)?;
            if diff.is_empty() {
                deltas.remove(section);
            } else {
                deltas.insert(section.to_string(), RonValue::Map(diff));
            }
        }
        self.revision.fetch_add(1, Ordering::AcqRel);

        self.persist()
    }

    /// Re-reads the delta file and re-merges every registered section.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let new_deltas = read_deltas(path)?;

        {
            let defaults = read(&self.defaults)?;
            let mut values = write(&self.values)?;
            for (section, default_map) in defaults.iter() {
                let merged = match new_deltas.get(*section) {
                    Some(RonValue::Map(delta)) => merge_maps(default_map, delta),
                    _ => default_map.clone(),
                };
                values.insert(*section, merged);
            }
        }

        *write(&self.deltas)? = new_deltas;
        self.revision.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };

        let clean: HashMap<String, RonValue> = read(&self.deltas)?
            .iter()
            .filter(|(_, v)| !matches!(v, RonValue::Map(m) if m.is_empty()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let text = ron::ser::to_string_pretty(&clean, ron::ser::PrettyConfig::default())?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, SettingsError> {
    lock.read().map_err(|_| SettingsError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, SettingsError> {
    lock.write().map_err(|_| SettingsError::Poisoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Viewer {
        auto_rotate: bool,
        speed: f32,
    }

    impl Default for Viewer {
        fn default() -> Self {
            Self {
                auto_rotate: true,
                speed: 0.5,
            }
        }
    }

    impl Settings for Viewer {
        const SECTION: &'static str = "viewer";
    }

    #[test]
    fn in_memory_store_applies_updates_without_a_file() {
        let store = SettingsStore::in_memory();
        store.register::<Viewer>().unwrap();
        assert!(!store.is_persistent());

        store.update::<Viewer, _>(|v| v.auto_rotate = false).unwrap();
        assert!(!store.get::<Viewer>().unwrap().auto_rotate);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn register_twice_fails() {
        let store = SettingsStore::in_memory();
        store.register::<Viewer>().unwrap();
        assert!(matches!(
            store.register::<Viewer>(),
            Err(SettingsError::AlreadyRegistered("viewer"))
        ));
    }

    #[test]
    fn get_unregistered_section() {
        let store = SettingsStore::in_memory();
        assert!(store.try_get::<Viewer>().unwrap().is_none());
        assert!(matches!(
            store.get::<Viewer>(),
            Err(SettingsError::NotRegistered("viewer"))
        ));
    }

    #[test]
    fn diff_drops_values_equal_to_defaults() {
        let defaults = to_ron_map(&Viewer::default()).unwrap();
        let changed = to_ron_map(&Viewer {
            auto_rotate: false,
            speed: 0.5,
        })
        .unwrap();

        let diff = diff_maps(&changed, &defaults);
        assert_eq!(diff.len(), 1);
        assert!(diff
            .get(&RonValue::String("auto_rotate".into()))
            .is_some());
        assert!(diff_maps(&defaults, &defaults).is_empty());
    }
}
