//! Enter animations for UI nodes.
//!
//! A [`Reveal`] waits for its delay and then hands over to a `bevy_tweening`
//! tween: containers slide into place, text fades in.

use bevy::{math::curve::EaseFunction, prelude::*};
use bevy_tweening::{AnimCompletedEvent, Tween, TweenAnim, lens::Lens};
use std::time::Duration;

const DEFAULT_DURATION: f32 = 0.6;

pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (prepare_reveals, start_reveals, finish_reveals).chain(),
        );
    }
}

/// Delay in seconds of the `index`-th item of a staggered group.
pub fn stagger_delay(base: f32, step: f32, index: usize) -> f32 {
    base + index as f32 * step
}

#[derive(Component, Debug)]
pub struct Reveal {
    delay: Timer,
    /// Start offset in px; positive starts below the resting place.
    offset: f32,
    duration: Duration,
}

impl Reveal {
    pub fn new(delay_secs: f32, offset: f32) -> Self {
        Self {
            delay: Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once),
            offset,
            duration: Duration::from_secs_f32(DEFAULT_DURATION),
        }
    }

    /// Fade only, for text leaves.
    pub fn fade(delay_secs: f32) -> Self {
        Self::new(delay_secs, 0.0)
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        self.duration = Duration::from_secs_f32(secs);
        self
    }
}

/// Tween is running; removed again when it completes.
#[derive(Component)]
struct Revealing;

#[derive(Clone)]
struct SlideLens {
    from: f32,
}

impl Lens<Node> for SlideLens {
    fn lerp(&mut self, mut target: Mut<Node>, ratio: f32) {
        target.top = Val::Px(self.from * (1.0 - ratio));
    }
}

#[derive(Clone)]
struct FadeLens;

impl Lens<TextColor> for FadeLens {
    fn lerp(&mut self, mut target: Mut<TextColor>, ratio: f32) {
        target.0.set_alpha(ratio);
    }
}

/// Moves freshly spawned nodes to their start pose.
fn prepare_reveals(
    mut nodes: Query<(&Reveal, &mut Node, Option<&mut TextColor>), Added<Reveal>>,
) {
    for (reveal, mut node, text_color) in &mut nodes {
        match text_color {
            Some(mut color) => color.0.set_alpha(0.0),
            None => node.top = Val::Px(reveal.offset),
        }
    }
}

fn start_reveals(
    mut commands: Commands,
    time: Res<Time>,
    mut pending: Query<(Entity, &mut Reveal, Has<TextColor>), Without<Revealing>>,
) {
    for (entity, mut reveal, is_text) in &mut pending {
        if !reveal.delay.tick(time.delta()).just_finished() {
            continue;
        }
        let mut entity_commands = commands.entity(entity);
        if is_text {
            let tween = Tween::new(EaseFunction::CubicOut, reveal.duration, FadeLens);
            entity_commands.insert((TweenAnim::new(tween), Revealing));
        } else {
            let tween = Tween::new(
                EaseFunction::CubicOut,
                reveal.duration,
                SlideLens { from: reveal.offset },
            );
            entity_commands.insert((TweenAnim::new(tween), Revealing));
        }
    }
}

fn finish_reveals(
    mut commands: Commands,
    mut completed: MessageReader<AnimCompletedEvent>,
    revealing: Query<(), With<Revealing>>,
) {
    for event in completed.read() {
        if revealing.contains(event.anim_entity) {
            commands
                .entity(event.anim_entity)
                .remove::<(TweenAnim, Revealing, Reveal)>();
        }
    }
}
