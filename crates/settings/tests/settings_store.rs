//! Integration tests for the SettingsStore:
//! - Persisting only changed (delta) fields, including nested structs
//! - Reloading after external file modification
//! - Building against an unusable location

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use settings::{Settings, SettingsStore};

fn unique_temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    p.push(format!("settings_store_test_{name}_{nanos}.ron"));
    p
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Motion {
    enabled: bool,
    speed: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Viewer {
    asset_path: String,
    motion: Motion,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            asset_path: "room/bedroom.glb".into(),
            motion: Motion {
                enabled: true,
                speed: 5,
            },
        }
    }
}

impl Settings for Viewer {
    const SECTION: &'static str = "viewer";
}

fn keys_of(map: &ron::Map) -> HashSet<String> {
    map.iter()
        .filter_map(|(k, _)| match k {
            ron::Value::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn only_changed_fields_are_persisted() {
    let path = unique_temp_path("delta");
    let _ = fs::remove_file(&path);

    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build store");
    store.register::<Viewer>().expect("register viewer");

    assert!(!path.exists(), "nothing is written before the first update");

    store
        .update::<Viewer, _>(|v| v.motion.enabled = false)
        .expect("update motion.enabled");
    assert!(path.exists(), "delta file should be created");

    let content = fs::read_to_string(&path).expect("read delta file");
    let root: std::collections::HashMap<String, ron::Value> =
        ron::from_str(&content).expect("parse delta RON");
    let ron::Value::Map(section) = root.get("viewer").expect("viewer section") else {
        panic!("viewer entry should be a map");
    };

    let top = keys_of(section);
    assert!(!top.contains("asset_path"), "unchanged field must not be persisted");
    assert!(top.contains("motion"));

    let ron::Value::Map(motion) = section
        .iter()
        .find(|(k, _)| matches!(k, ron::Value::String(s) if s == "motion"))
        .map(|(_, v)| v)
        .unwrap()
    else {
        panic!("motion delta should be a map");
    };
    let nested = keys_of(motion);
    assert!(nested.contains("enabled"));
    assert!(!nested.contains("speed"));

    let viewer = store.get::<Viewer>().expect("get after update");
    assert!(!viewer.motion.enabled);
    assert_eq!(viewer.motion.speed, 5);

    let _ = fs::remove_file(&path);
}

#[test]
fn reverting_to_defaults_empties_the_delta() {
    let path = unique_temp_path("revert");
    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build");
    store.register::<Viewer>().expect("register");

    store
        .update::<Viewer, _>(|v| v.asset_path = "other.glb".into())
        .expect("change");
    store
        .update::<Viewer, _>(|v| v.asset_path = "room/bedroom.glb".into())
        .expect("revert");

    let content = fs::read_to_string(&path).expect("read");
    let root: std::collections::HashMap<String, ron::Value> =
        ron::from_str(&content).expect("parse");
    assert!(!root.contains_key("viewer"));

    let _ = fs::remove_file(&path);
}

#[test]
fn existing_file_is_merged_on_register_and_reload() {
    let path = unique_temp_path("reload");
    fs::write(&path, r#"{ "viewer": { "motion": { "speed": 9 } } }"#).expect("seed file");

    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build");
    store.register::<Viewer>().expect("register");

    let viewer = store.get::<Viewer>().expect("get");
    assert_eq!(viewer.motion.speed, 9);
    assert!(viewer.motion.enabled, "unchanged nested field keeps its default");

    fs::write(&path, r#"{ "viewer": { "asset_path": "desk.glb" } }"#).expect("external edit");
    let before = store.revision();
    store.reload().expect("reload");
    assert!(store.revision() > before);

    let viewer = store.get::<Viewer>().expect("get after reload");
    assert_eq!(viewer.asset_path, "desk.glb");
    assert_eq!(viewer.motion.speed, 5);

    let _ = fs::remove_file(&path);
}

#[test]
fn build_fails_when_parent_is_a_file() {
    let blocker = unique_temp_path("blocker");
    fs::write(&blocker, "not a directory").expect("write blocker");

    let result = SettingsStore::builder()
        .with_settings_file(blocker.join("settings.ron"))
        .build();
    assert!(result.is_err());

    let _ = fs::remove_file(&blocker);
}
