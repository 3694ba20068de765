use super::ViewerState;
use bevy::{
    asset::RenderAssetUsages,
    light::{NotShadowCaster, NotShadowReceiver},
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};

const RESOLUTION: u32 = 512;
const SCALE: f32 = 12.0;
const HEIGHT: f32 = -0.5;
const OPACITY: f32 = 0.4;
const BLUR: f32 = 2.5;
const FAR: f32 = 4.0;

pub struct ContactShadowPlugin;

impl Plugin for ContactShadowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Ready), spawn_contact_shadow);
    }
}

#[derive(Component)]
pub struct ContactShadow;

/// Shadow opacity at `distance` world units from the centre.
pub fn contact_shadow_alpha(distance: f32) -> f32 {
    if distance >= FAR {
        return 0.0;
    }
    let sigma = BLUR * 0.4;
    OPACITY * (-(distance * distance) / (2.0 * sigma * sigma)).exp()
}

/// Black RGBA8 pixels whose alpha falls off radially.
pub fn shadow_texture_data(resolution: u32) -> Vec<u8> {
    let size = resolution as usize;
    let mut data = Vec::with_capacity(size * size * 4);
    for y in 0..resolution {
        for x in 0..resolution {
            let u = (x as f32 + 0.5) / resolution as f32 - 0.5;
            let v = (y as f32 + 0.5) / resolution as f32 - 0.5;
            let distance = Vec2::new(u, v).length() * SCALE;
            let alpha = (contact_shadow_alpha(distance) * 255.0).round() as u8;
            data.extend_from_slice(&[0, 0, 0, alpha]);
        }
    }
    data
}

fn spawn_contact_shadow(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let texture = images.add(Image::new(
        Extent3d {
            width: RESOLUTION,
            height: RESOLUTION,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        shadow_texture_data(RESOLUTION),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(SCALE, SCALE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: Some(texture),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, HEIGHT, 0.0),
        NotShadowCaster,
        NotShadowReceiver,
        ContactShadow,
        Name::new("Contact Shadow"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_fades_out_before_far_plane() {
        assert_eq!(contact_shadow_alpha(0.0), OPACITY);
        assert!(contact_shadow_alpha(1.0) < contact_shadow_alpha(0.5));
        assert_eq!(contact_shadow_alpha(FAR), 0.0);
        assert_eq!(contact_shadow_alpha(9.0), 0.0);
    }

    #[test]
    fn texture_is_darkest_in_the_middle() {
        let res = 64;
        let data = shadow_texture_data(res);
        assert_eq!(data.len(), (res * res * 4) as usize);

        let alpha_at = |x: u32, y: u32| data[((y * res + x) * 4 + 3) as usize];
        assert!(alpha_at(res / 2, res / 2) > 90);
        assert_eq!(alpha_at(0, 0), 0);
        assert!(data.chunks(4).all(|px| px[..3] == [0, 0, 0]));
    }
}
