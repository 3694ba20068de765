//! Content panel next to the viewer.
//!
//! One scrolling column with every section in page order and the footer at
//! the end. Section tops are measured after layout so the navbar can scroll
//! to them. Links are shown as text only.

use super::components::{text_font, ActiveSection, NavAction, NORMAL_BUTTON};
use super::navbar::{PageScroll, NAVBAR_HEIGHT};
use super::reveal::{stagger_delay, Reveal};
use crate::content::{
    self, Section, ABOUT_TEXT, CONTACT_METHODS, EDUCATION, FOOTER_TAGLINE, HERO, LOGO, PROJECTS,
    SKILLS, SOCIAL_LINKS, STATS,
};
use crate::startup::LOG_UI;
use crate::theme::Themed;
use bevy::{
    ecs::relationship::RelatedSpawnerCommands,
    platform::collections::HashMap,
    prelude::*,
    ui::{RelativeCursorPosition, UiGlobalTransform},
};
use chrono::Datelike;
use tracing::debug;

type Spawner<'a> = RelatedSpawnerCommands<'a, ChildOf>;

pub struct SectionsPlugin;

impl Plugin for SectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SectionOffsets>()
            .add_systems(Startup, spawn_content_panel)
            .add_systems(
                Update,
                (measure_sections, scroll_panel, follow_scroll).chain(),
            );
    }
}

/// Clipping frame of the content; receives the wheel.
#[derive(Component)]
pub struct ContentPanel;

/// Scrolled child of [`ContentPanel`] holding all sections.
#[derive(Component)]
struct PanelBody;

/// Block of one section inside [`PanelBody`].
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionAnchor(pub Section);

/// Distance of each section from the top of the page, in logical px.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SectionOffsets {
    tops: HashMap<Section, f32>,
}

impl SectionOffsets {
    pub fn set(&mut self, section: Section, top: f32) {
        self.tops.insert(section, top);
    }

    /// Scroll offset that puts `section` at the top of the panel.
    pub fn top_of(&self, section: Section) -> f32 {
        match section {
            Section::Home => 0.0,
            _ => self.tops.get(&section).copied().unwrap_or(0.0),
        }
    }

    /// Last section whose top has been scrolled past.
    pub fn section_at(&self, offset: f32) -> Section {
        Section::ALL
            .into_iter()
            .filter(|section| {
                self.tops
                    .get(section)
                    .is_some_and(|top| *top <= offset + 1.0)
            })
            .last()
            .unwrap_or_default()
    }
}

/// Top edge of a laid-out node in logical px.
fn logical_top(node: &ComputedNode, transform: &UiGlobalTransform) -> f32 {
    (transform.translation.y - node.size().y * 0.5) * node.inverse_scale_factor()
}

fn spawn_content_panel(mut commands: Commands) {
    let year = chrono::Local::now().year();

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(NAVBAR_HEIGHT),
                left: Val::Px(0.0),
                width: Val::Percent(50.0),
                min_width: Val::Px(340.0),
                height: Val::Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
            RelativeCursorPosition::default(),
            ContentPanel,
            Name::new("Content Panel"),
        ))
        .with_children(|panel| {
            panel
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::new(
                            Val::Px(40.0),
                            Val::Px(24.0),
                            Val::Px(24.0),
                            Val::Px(NAVBAR_HEIGHT + 24.0),
                        ),
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                    PanelBody,
                ))
                .with_children(|body| {
                    for section in Section::ALL {
                        spawn_section(body, section);
                    }
                    spawn_footer(body, year);
                });
        });
}

/// Records section tops and the scroll limit after layout.
fn measure_sections(
    panels: Query<&ComputedNode, With<ContentPanel>>,
    bodies: Query<(&ComputedNode, &UiGlobalTransform), With<PanelBody>>,
    sections: Query<(&SectionAnchor, &ComputedNode, &UiGlobalTransform)>,
    mut offsets: ResMut<SectionOffsets>,
    mut scroll: ResMut<PageScroll>,
) {
    let Ok((body_node, body_transform)) = bodies.single() else {
        return;
    };
    // Der Body verschiebt sich beim Scrollen mit, Abstände bleiben gleich
    let body_top = logical_top(body_node, body_transform);

    let mut measured = SectionOffsets::default();
    for (anchor, node, transform) in &sections {
        measured.set(anchor.0, (logical_top(node, transform) - body_top).max(0.0));
    }
    if *offsets != measured {
        *offsets = measured;
    }

    if let Ok(panel) = panels.single() {
        let visible = panel.size().y * panel.inverse_scale_factor();
        let content = body_node.size().y * body_node.inverse_scale_factor();
        let limit = (content - visible).max(0.0);
        if scroll.limit() != limit {
            scroll.set_limit(limit);
        }
    }
}

fn scroll_panel(scroll: Res<PageScroll>, mut bodies: Query<&mut Node, With<PanelBody>>) {
    if !scroll.is_changed() {
        return;
    }
    for mut node in &mut bodies {
        node.top = Val::Px(-scroll.offset());
    }
}

/// Keeps the highlighted nav item on the section at the top of the panel.
pub fn follow_scroll(
    scroll: Res<PageScroll>,
    offsets: Res<SectionOffsets>,
    mut active: ResMut<ActiveSection>,
) {
    if !scroll.is_changed() && !offsets.is_changed() {
        return;
    }
    let section = offsets.section_at(scroll.offset());
    if active.set_if_neq(ActiveSection(section)) {
        debug!(target: LOG_UI, "Section in view: {}", section.anchor());
    }
}

fn spawn_section(parent: &mut Spawner, section: Section) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                padding: UiRect::vertical(Val::Px(32.0)),
                ..default()
            },
            SectionAnchor(section),
            Name::new(section.label()),
        ))
        .with_children(|block| {
            if let Some((title, subtitle)) = section.heading() {
                block
                    .spawn((Node::default(), Reveal::new(0.0, 30.0)))
                    .with_children(|header| {
                        header.spawn(heading(title, 36.0, Themed::Text));
                    });
                block.spawn(paragraph(subtitle, Themed::TextMuted));
            }

            match section {
                Section::Home => spawn_hero(block),
                Section::About => spawn_about(block),
                Section::Skills => spawn_skills(block),
                Section::Projects => spawn_projects(block),
                Section::Contact => spawn_contact(block),
            }
        });
}

fn heading(text: &str, size: f32, role: Themed) -> impl Bundle {
    (Text::new(text), text_font(size), TextColor::WHITE, role)
}

fn paragraph(text: &str, role: Themed) -> impl Bundle {
    (
        Text::new(text),
        text_font(16.0),
        TextColor::WHITE,
        role,
        Node {
            max_width: Val::Px(560.0),
            ..default()
        },
    )
}

fn card() -> impl Bundle {
    (
        Node {
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(16.0)),
            row_gap: Val::Px(6.0),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BorderColor::all(Color::WHITE),
        BorderRadius::all(Val::Px(12.0)),
        BackgroundColor(Color::NONE),
        Themed::Surface,
    )
}

fn wrap_row() -> Node {
    Node {
        flex_wrap: FlexWrap::Wrap,
        column_gap: Val::Px(8.0),
        row_gap: Val::Px(8.0),
        ..default()
    }
}

fn chip(parent: &mut Spawner, label: &str) {
    parent
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BorderRadius::all(Val::Px(999.0)),
            Themed::Border,
        ))
        .with_children(|chip| {
            chip.spawn(heading(label, 13.0, Themed::TextMuted));
        });
}

fn link_line(parent: &mut Spawner, label: &str, href: &str) {
    parent.spawn(Node::default()).with_children(|line| {
        line.spawn(heading(label, 15.0, Themed::Accent));
        line.spawn((
            heading(href, 13.0, Themed::TextMuted),
            Node {
                margin: UiRect::left(Val::Px(8.0)),
                ..default()
            },
        ));
    });
}

fn spawn_hero(parent: &mut Spawner) {
    let delay = |i| stagger_delay(0.2, 0.15, i);

    parent
        .spawn((
            Node {
                align_self: AlignSelf::FlexStart,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BorderRadius::all(Val::Px(999.0)),
            Themed::Border,
            Reveal::new(delay(0), 30.0),
        ))
        .with_children(|badge| {
            badge.spawn((heading(HERO.badge, 14.0, Themed::Accent), Reveal::fade(delay(0))));
        });

    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Reveal::new(delay(1), 30.0),
        ))
        .with_children(|title| {
            title.spawn((heading("Hi, I'm", 40.0, Themed::Text), Reveal::fade(delay(1))));
            title.spawn((heading(HERO.name, 48.0, Themed::Accent), Reveal::fade(delay(1))));
        });

    parent.spawn((paragraph(HERO.subtitle, Themed::TextMuted), Reveal::fade(delay(2))));
    parent.spawn((heading(HERO.location, 15.0, Themed::TextMuted), Reveal::fade(delay(3))));

    parent
        .spawn((
            Node {
                column_gap: Val::Px(12.0),
                ..default()
            },
            Reveal::new(delay(4), 30.0),
        ))
        .with_children(|buttons| {
            for (label, anchor) in [("View Projects", "#projects"), ("Get In Touch", "#contact")] {
                let Some(target) = Section::from_anchor(anchor) else {
                    continue;
                };
                buttons
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                            ..default()
                        },
                        BorderRadius::all(Val::Px(10.0)),
                        BackgroundColor(NORMAL_BUTTON),
                        NavAction::GoTo(target),
                    ))
                    .with_children(|button| {
                        button.spawn(heading(label, 16.0, Themed::Text));
                    });
            }
        });

    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            Reveal::new(delay(5), 30.0),
        ))
        .with_children(|socials| {
            for link in SOCIAL_LINKS {
                link_line(socials, link.label, link.href);
            }
        });
}

fn spawn_about(parent: &mut Spawner) {
    for (i, text) in ABOUT_TEXT.iter().enumerate() {
        parent.spawn((paragraph(text, Themed::Text), Reveal::fade(stagger_delay(0.1, 0.1, i))));
    }

    parent.spawn(heading("Education", 20.0, Themed::Text));
    for (i, education) in EDUCATION.iter().enumerate() {
        parent
            .spawn((card(), Reveal::new(stagger_delay(0.2, 0.1, i), 30.0)))
            .with_children(|card| {
                card.spawn(heading(education.degree, 17.0, Themed::Text));
                card.spawn(heading(education.school, 14.0, Themed::TextMuted));
                card.spawn(heading(education.period, 13.0, Themed::Accent));
            });
    }

    parent
        .spawn(Node {
            column_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|stats| {
            for (i, stat) in STATS.iter().enumerate() {
                stats
                    .spawn((card(), Reveal::new(stagger_delay(0.4, 0.1, i), 30.0)))
                    .with_children(|card| {
                        card.spawn(heading(stat.number, 28.0, Themed::Accent));
                        card.spawn(heading(stat.label, 13.0, Themed::TextMuted));
                    });
            }
        });
}

fn spawn_skills(parent: &mut Spawner) {
    for (i, category) in content::skill_categories().into_iter().enumerate() {
        parent
            .spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(8.0),
                    ..default()
                },
                Reveal::new(stagger_delay(0.1, 0.08, i), 30.0),
            ))
            .with_children(|group| {
                group.spawn(heading(category, 16.0, Themed::Accent));
                group.spawn(wrap_row()).with_children(|row| {
                    for skill in SKILLS.iter().filter(|s| s.category == category) {
                        chip(row, skill.name);
                    }
                });
            });
    }
}

fn spawn_projects(parent: &mut Spawner) {
    for (i, project) in PROJECTS.iter().enumerate() {
        parent
            .spawn((card(), Reveal::new(stagger_delay(0.1, 0.08, i), 30.0)))
            .with_children(|card| {
                card.spawn(heading(project.title, 18.0, Themed::Text));
                card.spawn(paragraph(project.description, Themed::TextMuted));
                card.spawn(wrap_row()).with_children(|tags| {
                    for tag in project.tags {
                        chip(tags, tag);
                    }
                });
                link_line(card, "Code", project.github);
                if project.link != project.github {
                    link_line(card, "Live", project.link);
                }
            });
    }
}

fn spawn_contact(parent: &mut Spawner) {
    for (i, method) in CONTACT_METHODS.iter().enumerate() {
        parent
            .spawn((card(), Reveal::new(stagger_delay(0.1, 0.1, i), 30.0)))
            .with_children(|card| {
                card.spawn(heading(method.label, 17.0, Themed::Text));
                card.spawn(heading(method.value, 14.0, Themed::TextMuted));
                card.spawn(heading(method.href, 12.0, Themed::Accent));
            });
    }
}

fn spawn_footer(parent: &mut Spawner, year: i32) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                margin: UiRect::top(Val::Px(32.0)),
                padding: UiRect::top(Val::Px(16.0)),
                border: UiRect::top(Val::Px(1.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            Themed::Border,
            Name::new("Footer"),
        ))
        .with_children(|footer| {
            footer.spawn(heading(LOGO, 20.0, Themed::Accent));
            footer.spawn(heading(FOOTER_TAGLINE, 14.0, Themed::TextMuted));
            footer.spawn(wrap_row()).with_children(|links| {
                for link in SOCIAL_LINKS {
                    links.spawn(heading(link.label, 13.0, Themed::Text));
                }
            });
            footer.spawn(heading(&content::copyright(year), 12.0, Themed::TextMuted));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn measured_page() -> SectionOffsets {
        let mut offsets = SectionOffsets::default();
        offsets.set(Section::Home, 0.0);
        offsets.set(Section::About, 640.0);
        offsets.set(Section::Skills, 1180.0);
        offsets.set(Section::Projects, 1620.0);
        offsets.set(Section::Contact, 2900.0);
        offsets
    }

    #[test]
    fn anchors_resolve_to_measured_tops() {
        let offsets = measured_page();
        assert_eq!(offsets.top_of(Section::Home), 0.0);
        assert_eq!(offsets.top_of(Section::Projects), 1620.0);
        // Vor dem ersten Layout bleibt alles oben
        assert_eq!(SectionOffsets::default().top_of(Section::Contact), 0.0);
    }

    #[test]
    fn section_in_view_follows_the_scroll_offset() {
        let offsets = measured_page();
        assert_eq!(offsets.section_at(0.0), Section::Home);
        assert_eq!(offsets.section_at(639.5), Section::About);
        assert_eq!(offsets.section_at(1400.0), Section::Skills);
        assert_eq!(offsets.section_at(5000.0), Section::Contact);
    }

    #[test]
    fn scrolling_moves_the_highlight() {
        let mut world = World::new();
        world.insert_resource(measured_page());
        world.init_resource::<ActiveSection>();
        world.init_resource::<PageScroll>();

        world.resource_mut::<PageScroll>().scroll_by(1700.0);
        world.run_system_once(follow_scroll).unwrap();
        assert_eq!(world.resource::<ActiveSection>().0, Section::Projects);

        world.resource_mut::<PageScroll>().scroll_by(-1700.0);
        world.run_system_once(follow_scroll).unwrap();
        assert_eq!(world.resource::<ActiveSection>().0, Section::Home);
    }
}
