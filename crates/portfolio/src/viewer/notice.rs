use super::ViewerState;
use crate::startup::LOG_VIEWER;
use crate::theme::Themed;
use bevy::prelude::*;
use tracing::warn;

pub struct NoticePlugin;

impl Plugin for NoticePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Failed), spawn_notice);
    }
}

/// Shown in place of the scene when it could not be loaded. No retry.
#[derive(Component)]
pub struct ViewerNotice;

fn spawn_notice(mut commands: Commands) {
    warn!(target: LOG_VIEWER, "Showing scene fallback notice");

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            ViewerNotice,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("3-D scene unavailable"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.65)),
                Themed::TextMuted,
            ));
        });
}
