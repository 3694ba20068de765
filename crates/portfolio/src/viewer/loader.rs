use super::ViewerState;
use crate::utils::cleanup;
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(150);

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Loading), spawn_loader)
            .add_systems(
                Update,
                tick_loader_progress.run_if(in_state(ViewerState::Loading)),
            )
            // Timer hängt am Loader, verschwindet also mit ihm
            .add_systems(OnExit(ViewerState::Loading), cleanup::<LoaderRoot>);
    }
}

/// Root of the placeholder shown while the scene loads.
#[derive(Component)]
pub struct LoaderRoot;

#[derive(Component)]
struct LoaderRing;

/// Cosmetic percentage that cycles 0, 10, ..., 100, 0 every 150 ms.
#[derive(Component, Debug)]
pub struct LoaderProgress {
    timer: Timer,
    percent: u8,
}

impl Default for LoaderProgress {
    fn default() -> Self {
        Self {
            timer: Timer::new(TICK, TimerMode::Repeating),
            percent: 0,
        }
    }
}

impl LoaderProgress {
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Advances the timer and returns the percentage afterwards.
    pub fn tick(&mut self, delta: Duration) -> u8 {
        self.timer.tick(delta);
        for _ in 0..self.timer.times_finished_this_tick() {
            self.percent = advance_progress(self.percent);
        }
        self.percent
    }
}

pub fn advance_progress(percent: u8) -> u8 {
    if percent >= 100 { 0 } else { percent + 10 }
}

fn spawn_loader(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(0.4).mesh().uv(16, 12));
    let ring = meshes.add(Annulus::new(0.5, 0.55).mesh().resolution(32));

    let sphere_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x29, 0x97, 0xff).with_alpha(0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x9d, 0x4e, 0xdd).with_alpha(0.4),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            LoaderRoot,
            LoaderProgress::default(),
            Name::new("Scene Loader"),
        ))
        .with_children(|parent| {
            parent.spawn((Mesh3d(sphere), MeshMaterial3d(sphere_material)));
            parent.spawn((
                Mesh3d(ring),
                MeshMaterial3d(ring_material),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                LoaderRing,
            ));
        });
}

fn tick_loader_progress(
    time: Res<Time>,
    mut loaders: Query<(&mut LoaderProgress, &Children)>,
    mut rings: Query<&mut Transform, With<LoaderRing>>,
) {
    for (mut progress, children) in &mut loaders {
        let percent = progress.tick(time.delta());
        let spin = Quat::from_rotation_y(f32::from(percent) / 100.0 * TAU);
        for child in children.iter() {
            if let Ok(mut transform) = rings.get_mut(child) {
                transform.rotation = spin * Quat::from_rotation_x(-FRAC_PI_2);
            }
        }
    }
}
