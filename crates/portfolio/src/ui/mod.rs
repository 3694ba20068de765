//! Page overlay: navbar and the scrolling sections on top of the viewer.

mod components;
mod navbar;
mod reveal;
mod sections;

use bevy::prelude::*;
use bevy_tweening::TweeningPlugin;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            TweeningPlugin,
            reveal::RevealPlugin,
            navbar::NavbarPlugin,
            sections::SectionsPlugin,
        ))
        .init_resource::<components::ActiveSection>()
        .add_systems(Update, components::button_colors);
    }
}
