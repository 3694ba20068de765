use super::{ViewerSettings, ViewerState};
use crate::startup::LOG_VIEWER;
use bevy::{core_pipeline::tonemapping::Tonemapping, input::touch::Touches, prelude::*};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use settings::SettingsArc;
use std::f32::consts::TAU;
use tracing::info;

pub struct ViewerCameraPlugin;

impl Plugin for ViewerCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .init_resource::<OrbitDefaults>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(ViewerState::Ready), enable_controls)
            .add_systems(
                Update,
                (auto_rotate, pin_focus, clamp_radius)
                    .chain()
                    .run_if(in_state(ViewerState::Ready)),
            );
    }
}

#[derive(Resource, Clone, Debug)]
pub struct OrbitDefaults {
    pub position: Vec3,
    pub focus: Vec3,
    pub fov_degrees: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Full turns per minute.
    pub auto_rotate_speed: f32,
}

impl Default for OrbitDefaults {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 2.5, 4.0),
            focus: Vec3::ZERO,
            fov_degrees: 45.0,
            zoom_min: 2.0,
            zoom_max: 10.0,
            auto_rotate_speed: 0.5,
        }
    }
}

#[derive(Component)]
pub struct ViewerCamera;

/// (yaw, pitch, radius) of a camera at `translation` looking at `focus`.
pub fn orbit_from_translation(translation: Vec3, focus: Vec3) -> (f32, f32, f32) {
    let offset = translation - focus;
    let mut radius = offset.length();
    if radius == 0.0 {
        radius = 0.05; // Radius 0 macht Probleme
    }
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).asin();
    (yaw, pitch, radius)
}

pub fn clamp_orbit_radius(radius: f32) -> f32 {
    let defaults = OrbitDefaults::default();
    radius.clamp(defaults.zoom_min, defaults.zoom_max)
}

/// Yaw increment for `delta_secs` at the default speed.
pub fn auto_rotate_step(delta_secs: f32) -> f32 {
    TAU / 60.0 * OrbitDefaults::default().auto_rotate_speed * delta_secs
}

pub fn should_auto_rotate(enabled: bool, dragging: bool) -> bool {
    enabled && !dragging
}

fn spawn_camera(mut commands: Commands, defaults: Res<OrbitDefaults>) {
    let (yaw, pitch, radius) = orbit_from_translation(defaults.position, defaults.focus);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: defaults.fov_degrees.to_radians(),
            ..default()
        }),
        Tonemapping::AcesFitted,
        Transform::from_translation(defaults.position).looking_at(defaults.focus, Vec3::Y),
        PanOrbitCamera {
            focus: defaults.focus,
            yaw: Some(yaw),
            pitch: Some(pitch),
            radius: Some(radius),

            // Limits
            zoom_upper_limit: Some(defaults.zoom_max),
            zoom_lower_limit: defaults.zoom_min,

            // Steuerung erst, wenn die Szene steht
            enabled: false,
            ..default()
        },
        ViewerCamera,
        Name::new("Viewer Camera"),
    ));
}

fn enable_controls(mut cameras: Query<&mut PanOrbitCamera, With<ViewerCamera>>) {
    for mut camera in &mut cameras {
        camera.enabled = true;
    }
    info!(target: LOG_VIEWER, "Orbit controls enabled");
}

fn is_dragging(mouse: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    mouse.get_pressed().next().is_some() || touches.iter().next().is_some()
}

pub fn auto_rotate(
    time: Res<Time>,
    settings: Option<Res<SettingsArc<ViewerSettings>>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut cameras: Query<&mut PanOrbitCamera, With<ViewerCamera>>,
) {
    let enabled = settings.is_none_or(|s| s.auto_rotate);
    if !should_auto_rotate(enabled, is_dragging(&mouse, &touches)) {
        return;
    }
    let step = auto_rotate_step(time.delta_secs());
    for mut camera in &mut cameras {
        if camera.enabled {
            camera.target_yaw += step;
        }
    }
}

/// Panning moves the focus only while dragging; afterwards it returns.
fn pin_focus(
    defaults: Res<OrbitDefaults>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut cameras: Query<&mut PanOrbitCamera, With<ViewerCamera>>,
) {
    if is_dragging(&mouse, &touches) {
        return;
    }
    for mut camera in &mut cameras {
        if camera.target_focus != defaults.focus {
            camera.target_focus = defaults.focus;
        }
    }
}

/// Enforces the zoom limits, also against programmatic changes.
pub fn clamp_radius(mut cameras: Query<&mut PanOrbitCamera, With<ViewerCamera>>) {
    for mut camera in &mut cameras {
        let target = clamp_orbit_radius(camera.target_radius);
        if target != camera.target_radius {
            camera.target_radius = target;
        }
        if let Some(radius) = camera.radius {
            let clamped = clamp_orbit_radius(radius);
            if clamped != radius {
                camera.radius = Some(clamped);
                camera.force_update = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn world_with_camera(delta: Duration) -> (World, Entity) {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(delta);
        world.insert_resource(time);
        world.init_resource::<ButtonInput<MouseButton>>();
        world.init_resource::<Touches>();
        let camera = world
            .spawn((
                PanOrbitCamera {
                    target_yaw: 0.0,
                    ..default()
                },
                ViewerCamera,
            ))
            .id();
        (world, camera)
    }

    #[test]
    fn initial_orbit_matches_camera_position() {
        let (yaw, pitch, radius) = orbit_from_translation(Vec3::new(4.0, 2.5, 4.0), Vec3::ZERO);
        assert!(approx(yaw, std::f32::consts::FRAC_PI_4));
        assert!(approx(radius, 38.25_f32.sqrt()));
        assert!(approx(pitch, (2.5 / 38.25_f32.sqrt()).asin()));
    }

    #[test]
    fn radius_stays_within_zoom_limits() {
        assert_eq!(clamp_orbit_radius(0.5), 2.0);
        assert_eq!(clamp_orbit_radius(6.0), 6.0);
        assert_eq!(clamp_orbit_radius(42.0), 10.0);

        let (mut world, camera) = world_with_camera(Duration::ZERO);
        {
            let mut orbit = world.get_mut::<PanOrbitCamera>(camera).unwrap();
            orbit.radius = Some(25.0);
            orbit.target_radius = 0.1;
        }
        world.run_system_once(clamp_radius).unwrap();
        let orbit = world.get::<PanOrbitCamera>(camera).unwrap();
        assert_eq!(orbit.radius, Some(10.0));
        assert_eq!(orbit.target_radius, 2.0);
    }

    #[test]
    fn drag_pans_and_zooms_within_limits_then_recenters() {
        let (mut world, camera) = world_with_camera(Duration::ZERO);
        world.init_resource::<OrbitDefaults>();
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);

        // Was die Orbit-Steuerung während des Ziehens schreibt
        {
            let mut orbit = world.get_mut::<PanOrbitCamera>(camera).unwrap();
            orbit.target_focus = Vec3::new(1.0, 0.0, 0.5);
            orbit.target_radius = 0.5;
        }
        world.run_system_once(pin_focus).unwrap();
        world.run_system_once(clamp_radius).unwrap();
        let orbit = world.get::<PanOrbitCamera>(camera).unwrap();
        assert_eq!(orbit.target_focus, Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(orbit.target_radius, 2.0);

        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Right);
        world.get_mut::<PanOrbitCamera>(camera).unwrap().target_radius = 30.0;
        world.run_system_once(pin_focus).unwrap();
        world.run_system_once(clamp_radius).unwrap();
        let orbit = world.get::<PanOrbitCamera>(camera).unwrap();
        assert_eq!(orbit.target_focus, Vec3::ZERO);
        assert_eq!(orbit.target_radius, 10.0);
    }

    #[test]
    fn auto_rotate_turns_once_every_two_minutes() {
        assert!(approx(auto_rotate_step(120.0), TAU));
        assert!(should_auto_rotate(true, false));
        assert!(!should_auto_rotate(true, true));
        assert!(!should_auto_rotate(false, false));
    }

    #[test]
    fn auto_rotate_pauses_while_dragging() {
        let (mut world, camera) = world_with_camera(Duration::from_secs(1));

        world.run_system_once(auto_rotate).unwrap();
        let yaw = world.get::<PanOrbitCamera>(camera).unwrap().target_yaw;
        assert!(approx(yaw, auto_rotate_step(1.0)));

        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        world.run_system_once(auto_rotate).unwrap();
        let paused = world.get::<PanOrbitCamera>(camera).unwrap().target_yaw;
        assert_eq!(paused, yaw);

        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        world.run_system_once(auto_rotate).unwrap();
        let resumed = world.get::<PanOrbitCamera>(camera).unwrap().target_yaw;
        assert!(resumed > paused);
    }
}
