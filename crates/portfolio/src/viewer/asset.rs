use super::{ViewerSettings, ViewerState};
use crate::startup::LOG_VIEWER;
use bevy::{
    asset::{LoadState, RecursiveDependencyLoadState},
    platform::collections::HashMap,
    prelude::*,
};
use settings::SettingsArc;
use tracing::{error, info};

pub struct SceneAssetPlugin;

impl Plugin for SceneAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneAssetCache>()
            .add_systems(PreStartup, preload_scene)
            .add_systems(
                Update,
                poll_scene_load.run_if(in_state(ViewerState::Loading)),
            );
    }
}

/// The scene the viewer shows, requested before the first frame.
#[derive(Resource, Clone, Debug)]
pub struct SceneAsset {
    pub path: String,
    pub handle: Handle<Scene>,
}

/// Scene handles by asset path. A path is only requested once.
#[derive(Resource, Default, Debug)]
pub struct SceneAssetCache {
    handles: HashMap<String, Handle<Scene>>,
}

impl SceneAssetCache {
    pub fn get_or_load(
        &mut self,
        path: &str,
        load: impl FnOnce(&str) -> Handle<Scene>,
    ) -> Handle<Scene> {
        if let Some(handle) = self.handles.get(path) {
            return handle.clone();
        }
        let handle = load(path);
        self.handles.insert(path.to_string(), handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Where a pending scene load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneLoad {
    Pending,
    Loaded,
    Failed,
}

impl SceneLoad {
    pub fn from_states(load: &LoadState, recursive: &RecursiveDependencyLoadState) -> Self {
        if matches!(load, LoadState::Failed(_))
            || matches!(recursive, RecursiveDependencyLoadState::Failed(_))
        {
            SceneLoad::Failed
        } else if matches!(recursive, RecursiveDependencyLoadState::Loaded) {
            SceneLoad::Loaded
        } else {
            SceneLoad::Pending
        }
    }
}

/// Viewer state a load result leads to, `None` while still pending.
pub fn resolve_load_state(load: SceneLoad) -> Option<ViewerState> {
    match load {
        SceneLoad::Pending => None,
        SceneLoad::Loaded => Some(ViewerState::Ready),
        SceneLoad::Failed => Some(ViewerState::Failed),
    }
}

fn preload_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<SceneAssetCache>,
    settings: Option<Res<SettingsArc<ViewerSettings>>>,
) {
    let path = settings
        .map(|s| s.asset_path.clone())
        .unwrap_or_else(|| ViewerSettings::default().asset_path);

    let handle = cache.get_or_load(&path, |path| {
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_string()))
    });
    info!(target: LOG_VIEWER, "Preloading scene {path}");
    commands.insert_resource(SceneAsset { path, handle });
}

fn poll_scene_load(
    scene: Option<Res<SceneAsset>>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<ViewerState>>,
) {
    let Some(scene) = scene else {
        return;
    };
    let Some((load, _, recursive)) = asset_server.get_load_states(scene.handle.id()) else {
        return;
    };

    let result = SceneLoad::from_states(&load, &recursive);
    let Some(state) = resolve_load_state(result) else {
        return;
    };
    match result {
        SceneLoad::Failed => {
            error!(target: LOG_VIEWER, "Failed to load scene {}: {:?}", scene.path, load)
        }
        _ => info!(target: LOG_VIEWER, "Scene {} loaded", scene.path),
    }
    next_state.set(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_requests_each_path_once() {
        let mut cache = SceneAssetCache::default();
        let mut requests = 0;

        let first = cache.get_or_load("room/bedroom.glb", |_| {
            requests += 1;
            Handle::default()
        });
        let second = cache.get_or_load("room/bedroom.glb", |_| {
            requests += 1;
            Handle::default()
        });

        assert_eq!(requests, 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn load_states_map_to_viewer_states() {
        let pending = SceneLoad::from_states(
            &LoadState::Loading,
            &RecursiveDependencyLoadState::Loading,
        );
        assert_eq!(pending, SceneLoad::Pending);
        assert_eq!(resolve_load_state(pending), None);

        // Die Szene selbst ist da, Texturen fehlen noch
        let partial = SceneLoad::from_states(
            &LoadState::Loaded,
            &RecursiveDependencyLoadState::Loading,
        );
        assert_eq!(partial, SceneLoad::Pending);

        let done = SceneLoad::from_states(
            &LoadState::Loaded,
            &RecursiveDependencyLoadState::Loaded,
        );
        assert_eq!(resolve_load_state(done), Some(ViewerState::Ready));
        assert_eq!(
            resolve_load_state(SceneLoad::Failed),
            Some(ViewerState::Failed)
        );
    }
}
