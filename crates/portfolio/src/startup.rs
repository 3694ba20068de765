use crate::{theme::ThemePlugin, ui::UiPlugin, viewer::ViewerPlugin};
use crate::{theme::AppearanceSettings, viewer::ViewerSettings};
use app::{AppBuilder, Application, BevyApp, BoxError, LOG_MAIN};
use bevy::{log::LogPlugin, prelude::*};
use settings::{AppSettingsExt, SettingsError, SettingsStore};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const LOG_VIEWER: &str = "viewer";
pub const LOG_THEME: &str = "theme";
pub const LOG_UI: &str = "ui";

pub struct Portfolio;

impl Application for Portfolio {
    const APP_ID: &'static str = "portfolio";
    const TITLE: &'static str = "Babitdor Kayang Khonglah | Portfolio";
}

pub fn init() -> Result<BevyApp<Portfolio>, BoxError> {
    let builder = AppBuilder::<Portfolio>::new(env!("CARGO_PKG_VERSION"))?;

    Ok(builder.build_with_bevy(|mut app, context| {
        app.add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: Portfolio::TITLE.to_string(),
                        ..default()
                    }),
                    ..default()
                }),
        );

        app.insert_settings_store(open_settings_store(
            context.path_context().settings_file(),
        ));
        if let Err(err) = register_sections(&mut app) {
            // Datei kaputt oder nicht lesbar: ohne Persistenz weiter
            warn!(target: LOG_MAIN, "Settings file unusable ({err}), continuing without persistence");
            app.insert_settings_store(SettingsStore::in_memory());
            if let Err(err) = register_sections(&mut app) {
                error!(target: LOG_MAIN, "Failed to register settings sections: {err}");
            }
        }

        app.add_plugins((ThemePlugin, ViewerPlugin, UiPlugin));
        app
    }))
}

/// File-backed store, or an in-memory one when the location is unusable.
pub fn open_settings_store(settings_file: PathBuf) -> SettingsStore {
    match SettingsStore::builder()
        .with_settings_file(settings_file.clone())
        .build()
    {
        Ok(store) => {
            info!(target: LOG_MAIN, "Settings loaded from {}", settings_file.display());
            store
        }
        Err(err) => {
            warn!(
                target: LOG_MAIN,
                "Settings storage unavailable at {} ({err}), preferences will not persist",
                settings_file.display()
            );
            SettingsStore::in_memory()
        }
    }
}

fn register_sections(app: &mut App) -> Result<(), SettingsError> {
    app.register_settings_section::<AppearanceSettings>()?
        .register_settings_section::<ViewerSettings>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_location_falls_back_to_memory() {
        let blocker = std::env::temp_dir().join(format!(
            "portfolio_blocker_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::write(&blocker, "file").unwrap();

        let store = open_settings_store(blocker.join("settings.ron"));
        assert!(!store.is_persistent());

        let _ = std::fs::remove_file(&blocker);
    }

    #[test]
    fn sections_register_on_a_fresh_store() {
        let mut app = App::new();
        app.insert_settings_store(SettingsStore::in_memory());
        register_sections(&mut app).unwrap();

        let viewer = app.world().resource::<settings::SettingsArc<ViewerSettings>>();
        assert_eq!(viewer.asset_path, "room/bedroom.glb");
        assert!(viewer.auto_rotate);
    }
}
