use super::components::{text_font, ActiveSection, NavAction, NORMAL_BUTTON};
use super::reveal::{stagger_delay, Reveal};
use super::sections::{ContentPanel, SectionOffsets};
use crate::content::{Section, LOGO};
use crate::startup::LOG_UI;
use crate::theme::{ActiveTheme, Theme, ThemePalette, Themed, ToggleTheme};
use bevy::{
    ecs::relationship::RelatedSpawnerCommands,
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
    ui::RelativeCursorPosition,
    window::PrimaryWindow,
};
use tracing::info;

pub const NAVBAR_HEIGHT: f32 = 64.0;
pub const SCROLLED_THRESHOLD: f32 = 50.0;
pub const COMPACT_WIDTH: f32 = 768.0;
const LINE_HEIGHT: f32 = 24.0;

pub struct NavbarPlugin;

impl Plugin for NavbarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageScroll>()
            .init_resource::<MobileMenu>()
            .add_systems(Startup, spawn_navbar)
            .add_systems(
                Update,
                (
                    accumulate_scroll,
                    handle_nav_actions,
                    update_compact_layout,
                    sync_mobile_menu,
                    update_navbar_background,
                    update_theme_label,
                    highlight_active_nav,
                )
                    .chain(),
            );
    }
}

/// Vertical scroll of the page in px, between 0 and the measured limit.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PageScroll {
    offset: f32,
    limit: f32,
}

impl Default for PageScroll {
    fn default() -> Self {
        // Unbegrenzt bis zum ersten Layout
        Self {
            offset: 0.0,
            limit: f32::INFINITY,
        }
    }
}

impl PageScroll {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.offset + delta);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.limit);
    }

    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.offset = self.offset.min(self.limit);
    }
}

pub fn navbar_scrolled(offset: f32) -> bool {
    offset > SCROLLED_THRESHOLD
}

pub fn is_compact(width: f32) -> bool {
    width < COMPACT_WIDTH
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[derive(Component)]
struct Navbar;

#[derive(Component)]
struct NavLinks;

#[derive(Component)]
struct MenuButton;

#[derive(Component)]
struct MenuButtonLabel;

#[derive(Component)]
struct MobileMenuPanel;

#[derive(Component)]
struct ThemeLabel;

/// Label of a navbar link, highlighted while its section is in view.
#[derive(Component, Debug, Clone, Copy)]
struct NavLabel(Section);

fn theme_label(theme: Theme) -> &'static str {
    // Zeigt das Ziel des Umschaltens
    match theme {
        Theme::Light => "Dark",
        Theme::Dark => "Light",
    }
}

fn spawn_nav_button(
    parent: &mut RelatedSpawnerCommands<ChildOf>,
    label: &str,
    action: NavAction,
    font_size: f32,
    extra: impl Bundle,
) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(8.0)),
            BackgroundColor(NORMAL_BUTTON),
            action,
            extra,
        ))
        .with_children(|button| {
            let mut text = button.spawn((
                Text::new(label),
                text_font(font_size),
                TextColor::WHITE,
                Themed::Text,
            ));
            if let NavAction::GoTo(section) = action {
                text.insert(NavLabel(section));
            }
        });
}

fn spawn_navbar(mut commands: Commands, theme: Res<ActiveTheme>) {
    info!(target: LOG_UI, "Spawning navbar");

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Px(NAVBAR_HEIGHT),
                padding: UiRect::horizontal(Val::Px(24.0)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::NONE),
            GlobalZIndex(10),
            Reveal::new(0.0, -100.0).with_duration(0.5),
            Navbar,
            Name::new("Navbar"),
        ))
        .with_children(|nav| {
            nav.spawn((
                Text::new(LOGO),
                text_font(24.0),
                TextColor::WHITE,
                Themed::Accent,
            ));

            nav.spawn((
                Node {
                    column_gap: Val::Px(4.0),
                    ..default()
                },
                NavLinks,
            ))
            .with_children(|links| {
                for (i, section) in Section::ALL.into_iter().enumerate() {
                    spawn_nav_button(
                        links,
                        section.label(),
                        NavAction::GoTo(section),
                        16.0,
                        Reveal::new(stagger_delay(0.3, 0.1, i), -20.0),
                    );
                }
            });

            nav.spawn(Node {
                column_gap: Val::Px(8.0),
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|actions| {
                actions
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                        BorderColor::all(Color::WHITE),
                        BorderRadius::all(Val::Px(8.0)),
                        BackgroundColor(NORMAL_BUTTON),
                        Themed::Border,
                        NavAction::ToggleTheme,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(theme_label(theme.0)),
                            text_font(14.0),
                            TextColor::WHITE,
                            Themed::Text,
                            ThemeLabel,
                        ));
                    });

                actions
                    .spawn((
                        Button,
                        Node {
                            display: Display::None,
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                            ..default()
                        },
                        BorderRadius::all(Val::Px(8.0)),
                        BackgroundColor(NORMAL_BUTTON),
                        NavAction::ToggleMobileMenu,
                        MenuButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new("Menu"),
                            text_font(14.0),
                            TextColor::WHITE,
                            Themed::Text,
                            MenuButtonLabel,
                        ));
                    });
            });
        });

    commands
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                top: Val::Px(NAVBAR_HEIGHT),
                right: Val::Px(0.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::NONE),
            Themed::Surface,
            GlobalZIndex(11),
            MobileMenuPanel,
            Name::new("Mobile Menu"),
        ))
        .with_children(|menu| {
            for section in Section::ALL {
                spawn_nav_button(menu, section.label(), NavAction::GoTo(section), 20.0, ());
            }
        });
}

fn accumulate_scroll(
    mut wheel: MessageReader<MouseWheel>,
    panels: Query<&RelativeCursorPosition, With<ContentPanel>>,
    mut scroll: ResMut<PageScroll>,
) {
    let over_panel = panels.iter().any(|cursor| cursor.cursor_over());
    let delta: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        })
        .sum();
    if over_panel && delta != 0.0 {
        scroll.scroll_by(-delta);
    }
}

pub fn handle_nav_actions(
    buttons: Query<(&Interaction, &NavAction), Changed<Interaction>>,
    offsets: Res<SectionOffsets>,
    mut active: ResMut<ActiveSection>,
    mut scroll: ResMut<PageScroll>,
    mut menu: ResMut<MobileMenu>,
    mut toggles: MessageWriter<ToggleTheme>,
) {
    for (interaction, action) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match *action {
            NavAction::GoTo(section) => {
                let top = offsets.top_of(section);
                info!(target: LOG_UI, "Navigating to {} at {top}px", section.anchor());
                scroll.scroll_to(top);
                active.set_if_neq(ActiveSection(section));
                menu.close();
            }
            NavAction::ToggleTheme => {
                toggles.write(ToggleTheme);
            }
            NavAction::ToggleMobileMenu => {
                menu.toggle();
            }
        }
    }
}

fn update_compact_layout(
    window: Query<&Window, With<PrimaryWindow>>,
    mut links: Query<&mut Node, (With<NavLinks>, Without<MenuButton>)>,
    mut menu_buttons: Query<&mut Node, (With<MenuButton>, Without<NavLinks>)>,
    mut menu: ResMut<MobileMenu>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let compact = is_compact(window.width());
    let (links_display, button_display) = if compact {
        (Display::None, Display::Flex)
    } else {
        (Display::Flex, Display::None)
    };

    for mut node in &mut links {
        if node.display != links_display {
            node.display = links_display;
        }
    }
    for mut node in &mut menu_buttons {
        if node.display != button_display {
            node.display = button_display;
        }
    }
    if !compact && menu.is_open() {
        menu.close();
    }
}

fn sync_mobile_menu(
    menu: Res<MobileMenu>,
    mut panels: Query<&mut Node, With<MobileMenuPanel>>,
    mut labels: Query<&mut Text, With<MenuButtonLabel>>,
) {
    if !menu.is_changed() {
        return;
    }
    let open = menu.is_open();
    for mut node in &mut panels {
        node.display = if open { Display::Flex } else { Display::None };
    }
    for mut label in &mut labels {
        label.0 = if open { "Close" } else { "Menu" }.to_string();
    }
}

fn update_navbar_background(
    theme: Res<ActiveTheme>,
    scroll: Res<PageScroll>,
    mut navbars: Query<&mut BackgroundColor, With<Navbar>>,
) {
    if !theme.is_changed() && !scroll.is_changed() {
        return;
    }
    let color = ThemePalette::of(theme.0).navbar(navbar_scrolled(scroll.offset()));
    for mut background in &mut navbars {
        background.set_if_neq(BackgroundColor(color));
    }
}

fn update_theme_label(theme: Res<ActiveTheme>, mut labels: Query<&mut Text, With<ThemeLabel>>) {
    if !theme.is_changed() {
        return;
    }
    for mut label in &mut labels {
        label.0 = theme_label(theme.0).to_string();
    }
}

fn highlight_active_nav(
    active: Res<ActiveSection>,
    mut labels: Query<(&NavLabel, &mut Themed)>,
) {
    if !active.is_changed() {
        return;
    }
    for (label, mut role) in &mut labels {
        let wanted = if label.0 == active.0 {
            Themed::Accent
        } else {
            Themed::Text
        };
        role.set_if_neq(wanted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::{message::Messages, system::RunSystemOnce};

    #[test]
    fn navbar_turns_solid_past_fifty_pixels() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
    }

    #[test]
    fn scroll_never_goes_above_the_top() {
        let mut scroll = PageScroll::default();
        scroll.scroll_by(120.0);
        scroll.scroll_by(-500.0);
        assert_eq!(scroll.offset(), 0.0);
        scroll.scroll_by(80.0);
        assert_eq!(scroll.offset(), 80.0);
    }

    #[test]
    fn scroll_stops_at_the_end_of_the_page() {
        let mut scroll = PageScroll::default();
        scroll.scroll_to(900.0);
        scroll.set_limit(600.0);
        assert_eq!(scroll.offset(), 600.0);
        scroll.scroll_by(50.0);
        assert_eq!(scroll.offset(), 600.0);
        scroll.set_limit(-20.0);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn compact_layout_below_tablet_width() {
        assert!(is_compact(767.0));
        assert!(!is_compact(768.0));
    }

    #[test]
    fn choosing_an_item_closes_the_mobile_menu() {
        let mut offsets = SectionOffsets::default();
        offsets.set(Section::Projects, 1620.0);

        let mut world = World::new();
        world.insert_resource(offsets);
        world.init_resource::<ActiveSection>();
        world.init_resource::<PageScroll>();
        world.insert_resource(MobileMenu { open: true });
        world.init_resource::<Messages<ToggleTheme>>();
        world.resource_mut::<PageScroll>().scroll_by(300.0);

        world.spawn((Interaction::Pressed, NavAction::GoTo(Section::Projects)));
        world.run_system_once(handle_nav_actions).unwrap();

        assert_eq!(world.resource::<ActiveSection>().0, Section::Projects);
        assert!(!world.resource::<MobileMenu>().is_open());
        assert_eq!(world.resource::<PageScroll>().offset(), 1620.0);

        world.spawn((Interaction::Pressed, NavAction::GoTo(Section::Home)));
        world.run_system_once(handle_nav_actions).unwrap();
        assert_eq!(world.resource::<PageScroll>().offset(), 0.0);
    }

    #[test]
    fn only_the_section_in_view_is_highlighted() {
        let mut world = World::new();
        world.insert_resource(ActiveSection(Section::Skills));
        let skills = world.spawn((NavLabel(Section::Skills), Themed::Text)).id();
        let about = world.spawn((NavLabel(Section::About), Themed::Accent)).id();

        world.run_system_once(highlight_active_nav).unwrap();

        assert_eq!(*world.get::<Themed>(skills).unwrap(), Themed::Accent);
        assert_eq!(*world.get::<Themed>(about).unwrap(), Themed::Text);
    }

    #[test]
    fn menu_and_theme_buttons_only_act_when_pressed() {
        let mut world = World::new();
        world.init_resource::<SectionOffsets>();
        world.init_resource::<ActiveSection>();
        world.init_resource::<PageScroll>();
        world.init_resource::<MobileMenu>();
        world.init_resource::<Messages<ToggleTheme>>();

        world.spawn((Interaction::Hovered, NavAction::ToggleMobileMenu));
        world.spawn((Interaction::Pressed, NavAction::ToggleMobileMenu));
        world.spawn((Interaction::Pressed, NavAction::ToggleTheme));
        world.run_system_once(handle_nav_actions).unwrap();

        assert!(world.resource::<MobileMenu>().is_open());
        assert_eq!(world.resource::<Messages<ToggleTheme>>().len(), 1);
    }
}
