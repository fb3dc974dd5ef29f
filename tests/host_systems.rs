use std::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use guitar_panel::file::settings::PanelSettings;
use guitar_panel::file::theme::PanelTheme;
use guitar_panel::file::Exercise;
use guitar_panel::scenes::practice::{
    advance_scroll, layout_panel, repaint_panel, PanelCanvas, PanelKind, PanelRegion,
};
use guitar_panel::scenes::PracticePanel;
use guitar_panel::{DisplayList, PanelView, ScaleContext};

fn panel() -> PracticePanel {
    PracticePanel::new(
        &PanelTheme::default(),
        &ScaleContext::default(),
        &PanelSettings::default(),
        &Exercise::sample(),
    )
    .unwrap()
}

fn app_with(panel: PracticePanel) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(panel);
    app
}

fn child_count(app: &App, entity: Entity) -> usize {
    app.world()
        .entity(entity)
        .get::<Children>()
        .map(|children| children.len())
        .unwrap_or(0)
}

#[test]
fn repaint_spawns_one_node_per_draw_command() {
    let mut panel = panel();
    panel.arrange(Vec2::new(1024.0, 640.0));

    let mut expected = DisplayList::new();
    panel.chord.render(&mut expected);

    let mut app = app_with(panel);
    app.add_systems(Update, repaint_panel);
    let canvas = app.world_mut().spawn(PanelCanvas(PanelKind::Chord)).id();

    app.update();
    assert_eq!(child_count(&app, canvas), expected.len());
    assert!(!app.world().resource::<PracticePanel>().chord.is_invalidated());

    // nothing changed, so the children stay as they are
    let before: Vec<Entity> = app
        .world()
        .entity(canvas)
        .get::<Children>()
        .map(|children| children.to_vec())
        .unwrap_or_default();
    app.update();
    let after: Vec<Entity> = app
        .world()
        .entity(canvas)
        .get::<Children>()
        .map(|children| children.to_vec())
        .unwrap_or_default();
    assert_eq!(before, after);
}

#[test]
fn invalidation_rebuilds_the_canvas() {
    let mut app = app_with(panel());
    app.add_systems(Update, repaint_panel);
    let canvas = app.world_mut().spawn(PanelCanvas(PanelKind::Chord)).id();
    app.update();
    assert!(child_count(&app, canvas) > 0);

    app.world_mut().resource_mut::<PracticePanel>().chord.reset();
    app.update();
    assert_eq!(child_count(&app, canvas), 0);
}

#[test]
fn layout_sizes_regions_from_the_window() {
    let mut app = app_with(panel());
    app.add_systems(Update, layout_panel);
    app.world_mut().spawn((Window::default(), PrimaryWindow));
    let region = app
        .world_mut()
        .spawn((Node::default(), PanelRegion(PanelKind::Chord)))
        .id();
    let canvas = app
        .world_mut()
        .spawn((Node::default(), PanelCanvas(PanelKind::FretBoard)))
        .id();

    app.update();

    let region_node = app.world().entity(region).get::<Node>().unwrap();
    assert_eq!(region_node.width, Val::Px(200.0));
    assert_eq!(region_node.height, Val::Px(240.0));

    let canvas_node = app.world().entity(canvas).get::<Node>().unwrap();
    assert_eq!(canvas_node.width, Val::Px(16_000.0));
}

#[test]
fn scroll_moves_the_tablature_canvas_only() {
    let mut panel = panel();
    panel.start_transport(Duration::ZERO);

    let mut app = app_with(panel);
    app.add_systems(Update, advance_scroll);
    let tab = app
        .world_mut()
        .spawn((Node::default(), PanelCanvas(PanelKind::FretBoard)))
        .id();
    let chord = app
        .world_mut()
        .spawn((Node::default(), PanelCanvas(PanelKind::Chord)))
        .id();

    app.update();

    let offset = app.world().resource::<PracticePanel>().fretboard.scroll_offset();
    assert!(offset.x >= 0.0);
    assert_eq!(
        app.world().entity(tab).get::<Node>().unwrap().left,
        Val::Px(-offset.x)
    );
    assert_eq!(app.world().entity(chord).get::<Node>().unwrap().left, Val::Auto);
}
