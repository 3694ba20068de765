use super::ViewerState;
use bevy::{light::DirectionalLightShadowMap, prelude::*};

/// Plugin for the fixed scene lighting
pub struct ViewerLightingPlugin;

impl Plugin for ViewerLightingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DirectionalLightShadowMap { size: 2048 })
            .add_systems(OnEnter(ViewerState::Ready), setup_lighting);
    }
}

/// Marker component for lighting entities
#[derive(Component)]
pub struct ViewerLight;

fn setup_lighting(mut commands: Commands, ambient_light: Option<ResMut<AmbientLight>>) {
    // Grundhelligkeit
    if let Some(mut ambient_light) = ambient_light {
        ambient_light.brightness = 400.0;
        ambient_light.color = Color::WHITE;
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            shadow_depth_bias: DirectionalLight::DEFAULT_SHADOW_DEPTH_BIAS - 0.0001,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ViewerLight,
        Name::new("Key Light"),
    ));

    commands.spawn((
        PointLight {
            intensity: 250_000.0,
            color: Color::WHITE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, 3.0, -5.0),
        ViewerLight,
        Name::new("Fill Light"),
    ));

    // Weicher Rand: innerer Winkel 0
    commands.spawn((
        SpotLight {
            intensity: 150_000.0,
            outer_angle: 0.5,
            inner_angle: 0.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        ViewerLight,
        Name::new("Top Light"),
    ));
}
