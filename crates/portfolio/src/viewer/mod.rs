//! 3-D scene viewer
//!
//! Loads one glTF scene, shows a spinning placeholder until it resolves,
//! then lights the model, floats it and lets the visitor orbit around it.
//!
//! - `asset`: preloading, handle cache and load-state polling
//! - `loader`: placeholder shown while the scene is loading
//! - `model`: model rig, shadow pass, idle motion and hover flag
//! - `camera`: orbit camera with zoom limits and auto-rotate
//! - `lighting` / `contact_shadow`: fixed lights and the ground shadow
//! - `notice`: static message when the scene could not be loaded

mod asset;
mod camera;
mod contact_shadow;
mod lighting;
mod loader;
mod model;
mod notice;

use bevy::{picking::mesh_picking::MeshPickingPlugin, prelude::*};
use serde::{Deserialize, Serialize};
use settings::{sync_settings_section, Settings, SettingsArc};

pub use asset::SceneAsset;

/// Main plugin for the scene viewer
///
/// Coordinates all sub-plugins; each one spawns on a [`ViewerState`] transition.
pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<MeshPickingPlugin>() {
            app.add_plugins(MeshPickingPlugin);
        }

        app.init_state::<ViewerState>()
            .add_plugins((
                asset::SceneAssetPlugin,
                loader::LoaderPlugin,
                model::ModelPlugin,
                camera::ViewerCameraPlugin,
                lighting::ViewerLightingPlugin,
                contact_shadow::ContactShadowPlugin,
                notice::NoticePlugin,
            ))
            .add_systems(
                Update,
                sync_settings_section::<ViewerSettings>
                    .run_if(resource_exists::<SettingsArc<ViewerSettings>>),
            );
    }
}

/// Viewer lifecycle. `Loading` shows the placeholder, `Ready` the scene.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewerState {
    #[default]
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Relative to the Bevy asset directory.
    pub asset_path: String,
    pub auto_rotate: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            asset_path: "room/bedroom.glb".to_string(),
            auto_rotate: true,
        }
    }
}

impl Settings for ViewerSettings {
    const SECTION: &'static str = "viewer";
}
