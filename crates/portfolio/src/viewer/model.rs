use super::{SceneAsset, ViewerState};
use crate::startup::LOG_VIEWER;
use bevy::{
    light::{NotShadowCaster, NotShadowReceiver},
    picking::hover::HoverMap,
    prelude::*,
};
use tracing::{debug, info};

const MODEL_SCALE: f32 = 0.28;
const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -0.3, 0.0);

// Float-Verhalten
const FLOAT_SPEED: f32 = 0.8;
const FLOAT_ROTATION_INTENSITY: f32 = 0.2;
const FLOAT_RANGE: f32 = 0.1;

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Ready), spawn_model_rig)
            .add_systems(
                Update,
                (apply_shadow_policy, idle_rotate, float_rig, update_model_hover)
                    .run_if(in_state(ViewerState::Ready)),
            );
    }
}

/// Parent of the model; carries the float bobbing and tilt.
#[derive(Component)]
pub struct FloatRig;

/// Carries the loaded scene and the idle yaw.
#[derive(Component)]
pub struct ModelRoot;

/// Whether any pointer is over the model. Nothing reads it yet.
#[derive(Component, Debug, Default, PartialEq, Eq)]
pub struct ModelHover(pub bool);

/// Mesh of the loaded model that went through the shadow pass.
#[derive(Component)]
pub struct ModelMesh;

#[derive(Component)]
pub struct ShadowPolicyApplied;

pub fn idle_yaw(elapsed: f32) -> f32 {
    (elapsed * 0.15).sin() * 0.1
}

fn float_phase(elapsed: f32) -> f32 {
    elapsed / 4.0 * FLOAT_SPEED
}

pub fn float_offset(elapsed: f32) -> f32 {
    float_phase(elapsed).sin() * FLOAT_RANGE
}

/// Tilt around x and z.
pub fn float_tilt(elapsed: f32) -> (f32, f32) {
    let phase = float_phase(elapsed);
    (
        phase.cos() / 8.0 * FLOAT_ROTATION_INTENSITY,
        phase.sin() / 20.0 * FLOAT_ROTATION_INTENSITY,
    )
}

fn spawn_model_rig(mut commands: Commands, scene: Res<SceneAsset>) {
    info!(target: LOG_VIEWER, "Spawning model rig for {}", scene.path);

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            FloatRig,
            Name::new("Float Rig"),
        ))
        .with_children(|parent| {
            parent.spawn((
                SceneRoot(scene.handle.clone()),
                Transform::from_translation(MODEL_OFFSET).with_scale(Vec3::splat(MODEL_SCALE)),
                ModelRoot,
                ModelHover::default(),
                Name::new("Model"),
            ));
        });
}

/// Every mesh below the model casts and receives shadows.
///
/// Scene instances spawn a few frames after `SceneRoot`, so this runs every
/// frame and skips meshes it already handled.
pub fn apply_shadow_policy(
    mut commands: Commands,
    roots: Query<Entity, With<ModelRoot>>,
    children: Query<&Children>,
    meshes: Query<Option<&MeshMaterial3d<StandardMaterial>>, (With<Mesh3d>, Without<ShadowPolicyApplied>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for root in &roots {
        for entity in children.iter_descendants(root) {
            let Ok(material) = meshes.get(entity) else {
                continue;
            };
            commands
                .entity(entity)
                .remove::<(NotShadowCaster, NotShadowReceiver)>()
                .insert((ShadowPolicyApplied, ModelMesh));
            if let Some(material) = material {
                if touch_material(&mut materials, &material.0) {
                    debug!(target: LOG_VIEWER, "Material of {entity} marked for re-preparation");
                }
            }
        }
    }
}

/// Mutable access queues `AssetEvent::Modified`, so the renderer prepares the
/// material again with the new shadow flags.
fn touch_material(
    materials: &mut Assets<StandardMaterial>,
    material: &Handle<StandardMaterial>,
) -> bool {
    materials.get_mut(material).is_some()
}

fn idle_rotate(time: Res<Time>, mut models: Query<&mut Transform, With<ModelRoot>>) {
    let yaw = idle_yaw(time.elapsed_secs());
    for mut transform in &mut models {
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

fn float_rig(time: Res<Time>, mut rigs: Query<&mut Transform, With<FloatRig>>) {
    let elapsed = time.elapsed_secs();
    let (tilt_x, tilt_z) = float_tilt(elapsed);
    for mut transform in &mut rigs {
        transform.translation.y = float_offset(elapsed);
        transform.rotation = Quat::from_euler(EulerRot::XYZ, tilt_x, 0.0, tilt_z);
    }
}

fn update_model_hover(
    hover_map: Option<Res<HoverMap>>,
    meshes: Query<(), With<ModelMesh>>,
    mut models: Query<&mut ModelHover>,
) {
    let hovered = hover_map.is_some_and(|map| {
        map.values()
            .any(|hits| hits.keys().any(|entity| meshes.contains(*entity)))
    });
    for mut hover in &mut models {
        if hover.set_if_neq(ModelHover(hovered)) {
            debug!(target: LOG_VIEWER, "Model hovered: {hovered}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::f32::consts::TAU;

    #[test]
    fn idle_motion_starts_at_rest_and_repeats() {
        assert_eq!(idle_yaw(0.0), 0.0);
        assert_eq!(float_offset(0.0), 0.0);

        let period = TAU / 0.15;
        for t in [0.7_f32, 3.0, 11.5] {
            assert!((idle_yaw(t) - idle_yaw(t + period)).abs() < 1e-4);
        }
        for t in [0.0_f32, 5.0, 40.0, 123.0] {
            assert!(idle_yaw(t).abs() <= 0.1);
            assert!(float_offset(t).abs() <= FLOAT_RANGE);
        }
    }

    #[test]
    fn shadow_pass_touches_only_known_materials() {
        let mut materials = Assets::<StandardMaterial>::default();
        let known = materials.add(StandardMaterial::default());

        assert!(touch_material(&mut materials, &known));
        assert!(!touch_material(&mut materials, &Handle::default()));
    }

    #[test]
    fn shadow_pass_visits_every_mesh_once() {
        let mut world = World::new();
        world.init_resource::<Assets<StandardMaterial>>();

        let root = world.spawn((Transform::default(), ModelRoot)).id();
        let mesh_a = world
            .spawn((
                Mesh3d(Handle::default()),
                NotShadowCaster,
                NotShadowReceiver,
                ChildOf(root),
            ))
            .id();
        let group = world.spawn((Transform::default(), ChildOf(root))).id();
        let mesh_b = world
            .spawn((Mesh3d(Handle::default()), NotShadowCaster, ChildOf(group)))
            .id();
        let outside = world
            .spawn((Mesh3d(Handle::default()), NotShadowCaster))
            .id();

        world.run_system_once(apply_shadow_policy).unwrap();

        for mesh in [mesh_a, mesh_b] {
            let entity = world.entity(mesh);
            assert!(entity.contains::<ModelMesh>());
            assert!(!entity.contains::<NotShadowCaster>());
            assert!(!entity.contains::<NotShadowReceiver>());
        }
        assert!(!world.entity(group).contains::<ModelMesh>());
        assert!(world.entity(outside).contains::<NotShadowCaster>());

        // Zweiter Durchlauf ändert nichts mehr
        world.entity_mut(mesh_a).insert(NotShadowCaster);
        world.run_system_once(apply_shadow_policy).unwrap();
        assert!(world.entity(mesh_a).contains::<NotShadowCaster>());
    }
}
