//! Light/dark mode.
//!
//! [`ActiveTheme`] is the one place the current mode lives. It is only
//! changed by [`ToggleTheme`] messages and, until the visitor picks a mode,
//! by the OS theme in [`PlatformTheme`]. Every toggle is written to the
//! `appearance` settings section.

use crate::startup::LOG_THEME;
use bevy::{
    ecs::system::NonSendMarker,
    prelude::*,
    window::{PrimaryWindow, WindowTheme, WindowThemeChanged},
    winit::WINIT_WINDOWS,
};
use serde::{Deserialize, Serialize};
use settings::{Settings, SettingsStoreRef};
use tracing::{debug, info, warn};

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTheme>()
            .init_resource::<PlatformTheme>()
            .add_message::<ToggleTheme>()
            .add_systems(PreStartup, init_active_theme)
            .add_systems(
                Update,
                (
                    toggle_on_key,
                    detect_platform_theme,
                    track_platform_theme,
                    follow_platform_theme,
                    apply_theme_toggle,
                    apply_palette,
                )
                    .chain(),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl From<WindowTheme> for Theme {
    fn from(theme: WindowTheme) -> Self {
        match theme {
            WindowTheme::Light => Theme::Light,
            WindowTheme::Dark => Theme::Dark,
        }
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_string()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(String);

impl TryFrom<String> for Theme {
    type Error = UnknownTheme;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(value)),
        }
    }
}

/// Persisted appearance preference. `None` until the visitor toggles once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub theme: Option<Theme>,
}

impl Settings for AppearanceSettings {
    const SECTION: &'static str = "appearance";
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deref)]
pub struct ActiveTheme(pub Theme);

/// Theme reported by the OS. `None` until the window exists or when the
/// platform does not report one.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformTheme(pub Option<WindowTheme>);

/// Request to flip the active theme.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ToggleTheme;

/// Marks UI nodes that follow the palette.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Themed {
    Surface,
    Text,
    TextMuted,
    Accent,
    Border,
}

/// Persisted choice first, then the platform preference, then dark.
pub fn resolve_initial_theme(persisted: Option<Theme>, platform: Option<WindowTheme>) -> Theme {
    persisted
        .or_else(|| platform.map(Theme::from))
        .unwrap_or_default()
}

fn persisted_theme(store: Option<&SettingsStoreRef>) -> Option<Theme> {
    store
        .and_then(|store| store.get::<AppearanceSettings>().ok())
        .and_then(|appearance| appearance.theme)
}

fn init_active_theme(
    store: Option<Res<SettingsStoreRef>>,
    platform: Res<PlatformTheme>,
    mut active: ResMut<ActiveTheme>,
) {
    let persisted = persisted_theme(store.as_deref());
    let platform = platform.0;
    let theme = resolve_initial_theme(persisted, platform);

    info!(
        target: LOG_THEME,
        "Initial theme: {} (persisted: {:?}, platform: {:?})",
        theme.as_str(),
        persisted,
        platform
    );
    active.0 = theme;
}

fn toggle_on_key(keys: Res<ButtonInput<KeyCode>>, mut toggles: MessageWriter<ToggleTheme>) {
    if keys.just_pressed(KeyCode::KeyT) {
        toggles.write(ToggleTheme);
    }
}

fn window_theme_from_winit(theme: winit::window::Theme) -> WindowTheme {
    match theme {
        winit::window::Theme::Light => WindowTheme::Light,
        winit::window::Theme::Dark => WindowTheme::Dark,
    }
}

/// Reads the OS theme once, as soon as winit created the primary window.
///
/// winit only reports a `WindowThemeChanged` on change, never for the theme
/// the window started with.
fn detect_platform_theme(
    _main_thread: NonSendMarker,
    window: Query<Entity, With<PrimaryWindow>>,
    mut platform: ResMut<PlatformTheme>,
    mut detected: Local<bool>,
) {
    if *detected {
        return;
    }
    let Ok(entity) = window.single() else {
        return;
    };
    let Some(reported) = WINIT_WINDOWS.with_borrow(|windows| {
        windows.get_window(entity).map(|window| window.theme())
    }) else {
        // Fenster existiert noch nicht
        return;
    };

    *detected = true;
    let reported = reported.map(window_theme_from_winit);
    info!(target: LOG_THEME, "Platform theme: {:?}", reported);
    platform.set_if_neq(PlatformTheme(reported));
}

fn track_platform_theme(
    mut changes: MessageReader<WindowThemeChanged>,
    mut platform: ResMut<PlatformTheme>,
) {
    if let Some(change) = changes.read().last() {
        platform.set_if_neq(PlatformTheme(Some(change.theme)));
    }
}

/// Applies the platform theme for as long as no choice was persisted.
fn follow_platform_theme(
    platform: Res<PlatformTheme>,
    store: Option<Res<SettingsStoreRef>>,
    mut active: ResMut<ActiveTheme>,
) {
    if !platform.is_changed() {
        return;
    }
    let Some(reported) = platform.0 else {
        return;
    };
    if persisted_theme(store.as_deref()).is_some() {
        return;
    }
    let theme = Theme::from(reported);
    if active.0 != theme {
        debug!(target: LOG_THEME, "Following platform theme {}", theme.as_str());
        active.0 = theme;
    }
}

/// The only writer of a visitor-chosen theme.
pub fn apply_theme_toggle(
    mut toggles: MessageReader<ToggleTheme>,
    store: Option<Res<SettingsStoreRef>>,
    mut active: ResMut<ActiveTheme>,
) {
    let count = toggles.read().count();
    if count == 0 {
        return;
    }

    let mut theme = active.0;
    for _ in 0..count {
        theme = theme.toggled();
    }
    active.0 = theme;
    info!(target: LOG_THEME, "Theme switched to {}", theme.as_str());

    let Some(store) = store else {
        warn!(target: LOG_THEME, "No settings store, theme choice is not persisted");
        return;
    };
    if let Err(err) = store.update::<AppearanceSettings, _>(|a| a.theme = Some(theme)) {
        warn!(target: LOG_THEME, "Failed to persist theme: {err}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub background: Color,
    pub surface: Color,
    pub surface_scrolled: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub border: Color,
}

impl ThemePalette {
    pub fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::srgb_u8(0x0a, 0x0a, 0x0f),
                surface: Color::srgba(0.08, 0.08, 0.11, 0.7),
                surface_scrolled: Color::srgba(0.08, 0.08, 0.11, 0.85),
                text: Color::srgb(0.96, 0.96, 0.97),
                text_muted: Color::srgb(0.62, 0.62, 0.68),
                accent: Color::srgb_u8(0x29, 0x97, 0xff),
                border: Color::srgba(1.0, 1.0, 1.0, 0.1),
            },
            Theme::Light => Self {
                background: Color::srgb_u8(0xfa, 0xfa, 0xfc),
                surface: Color::srgba(1.0, 1.0, 1.0, 0.7),
                surface_scrolled: Color::srgba(1.0, 1.0, 1.0, 0.85),
                text: Color::srgb(0.07, 0.07, 0.1),
                text_muted: Color::srgb(0.38, 0.38, 0.44),
                accent: Color::srgb_u8(0x9d, 0x4e, 0xdd),
                border: Color::srgba(0.0, 0.0, 0.0, 0.1),
            },
        }
    }

    /// Navbar background: see-through at the top of the page.
    pub fn navbar(&self, scrolled: bool) -> Color {
        if scrolled {
            self.surface_scrolled
        } else {
            Color::NONE
        }
    }

    pub fn color(&self, role: Themed) -> Color {
        match role {
            Themed::Surface => self.surface,
            Themed::Text => self.text,
            Themed::TextMuted => self.text_muted,
            Themed::Accent => self.accent,
            Themed::Border => self.border,
        }
    }
}

/// Recolours the clear colour and every [`Themed`] node after a change.
pub fn apply_palette(
    active: Res<ActiveTheme>,
    mut clear_color: ResMut<ClearColor>,
    // Buttons keep their interaction colours
    mut backgrounds: Query<(&Themed, &mut BackgroundColor), (Without<TextColor>, Without<Button>)>,
    mut texts: Query<(&Themed, &mut TextColor)>,
    mut borders: Query<&mut BorderColor, With<Themed>>,
    changed: Query<(), Changed<Themed>>,
) {
    if !active.is_changed() && changed.is_empty() {
        return;
    }
    let palette = ThemePalette::of(active.0);

    clear_color.0 = palette.background;
    for (role, mut background) in &mut backgrounds {
        background.0 = palette.color(*role);
    }
    for (role, mut text) in &mut texts {
        // Fade-in tweens own the alpha.
        text.0 = palette.color(*role).with_alpha(text.0.alpha());
    }
    for mut border in &mut borders {
        *border = BorderColor::all(palette.border);
    }
}
