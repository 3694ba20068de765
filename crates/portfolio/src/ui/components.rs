use crate::content::Section;
use bevy::prelude::*;

/// Button colours. Translucent so they read on both themes.
pub const NORMAL_BUTTON: Color = Color::srgba(0.5, 0.5, 0.55, 0.12);
pub const HOVERED_BUTTON: Color = Color::srgba(0.5, 0.5, 0.55, 0.28);
pub const PRESSED_BUTTON: Color = Color::srgba(0.16, 0.59, 1.0, 0.6);

/// What a button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    GoTo(Section),
    ToggleTheme,
    ToggleMobileMenu,
}

/// Section at the top of the page; its nav item is highlighted.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Deref)]
pub struct ActiveSection(pub Section);

pub fn button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut color) in &mut buttons {
        *color = match *interaction {
            Interaction::Pressed => PRESSED_BUTTON.into(),
            Interaction::Hovered => HOVERED_BUTTON.into(),
            Interaction::None => NORMAL_BUTTON.into(),
        };
    }
}

pub fn text_font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..default()
    }
}
