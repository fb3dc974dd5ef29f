use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::path::Path;
use std::time::Duration;

use crate::components::{ChordDiagramView, FretBoardView, GuitarStringsView, PanelView};
use crate::error::PanelError;
use crate::file::config::AppConfig;
use crate::file::exercise::Exercise;
use crate::file::settings::{PanelSettings, Settings};
use crate::file::theme::{PanelTheme, Themes};
use crate::layout::{MeasureSpec, ScaleContext};
use crate::model::NoteState;
use crate::surface::{DisplayList, DrawCommand, Paint, PaintStyle};

const PANEL_PADDING: f32 = 16.0;
const CHORD_SIZE: Vec2 = Vec2::new(200.0, 240.0);
const RULER_WIDTH: f32 = 112.0;
const BACKDROP: Color = Color::srgb(0.08, 0.08, 0.1);
/// Baseline depth below the top of a text node's line box, in ems, for bevy's
/// bundled font (ascent 0.935 em; ascent plus descent fills the 1.2 em line).
/// Other fonts land within a pixel or two of it.
const LINE_BOX_ASCENT: f32 = 0.935;

#[derive(Component)]
pub struct PracticeRoot;

/// Clipping box of one view on screen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRegion(pub PanelKind);

/// Node the view's draw commands are spawned under.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelCanvas(pub PanelKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Chord,
    FretBoard,
    Ruler,
}

const PANEL_KINDS: [PanelKind; 3] = [PanelKind::Chord, PanelKind::Ruler, PanelKind::FretBoard];

/// Screen rects of the three views in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRegions {
    pub chord: Rect,
    pub ruler: Rect,
    pub fretboard: Rect,
}

impl PanelRegions {
    pub fn get(&self, kind: PanelKind) -> Rect {
        match kind {
            PanelKind::Chord => self.chord,
            PanelKind::FretBoard => self.fretboard,
            PanelKind::Ruler => self.ruler,
        }
    }
}

/// The three views of the practice screen and the transport driving them.
#[derive(Resource, Debug, Clone)]
pub struct PracticePanel {
    pub chord: ChordDiagramView,
    pub fretboard: FretBoardView,
    pub ruler: GuitarStringsView,
}

impl PracticePanel {
    pub fn new(
        theme: &PanelTheme,
        scale: &ScaleContext,
        settings: &PanelSettings,
        exercise: &Exercise,
    ) -> Result<Self, PanelError> {
        let mut chord = ChordDiagramView::new(theme, scale);
        chord.set_frame(exercise.chord_frame()?);

        let mut fretboard = FretBoardView::new(theme, scale)
            .with_time_scale(settings.time_scale_ratio)?
            .with_default_scroll(Duration::from_millis(settings.default_scroll_ms));
        fretboard.set_data(exercise.note_groups()?);

        let mut ruler = GuitarStringsView::new(theme, scale).with_variant(settings.ruler_variant);
        if let Some(spacing) = settings.string_spacing_dp {
            ruler.set_string_spacing_dp(spacing);
        }

        Ok(Self {
            chord,
            fretboard,
            ruler,
        })
    }

    pub fn view_mut(&mut self, kind: PanelKind) -> &mut dyn PanelView {
        match kind {
            PanelKind::Chord => &mut self.chord,
            PanelKind::FretBoard => &mut self.fretboard,
            PanelKind::Ruler => &mut self.ruler,
        }
    }

    /// Lay the views out in a window of `window` logical pixels and push the
    /// resulting sizes into them. The tablature gets its full timeline width;
    /// its region clips it.
    pub fn arrange(&mut self, window: Vec2) -> PanelRegions {
        let chord_size = self
            .chord
            .measure(MeasureSpec::Exactly(CHORD_SIZE.x), MeasureSpec::Exactly(CHORD_SIZE.y));
        let chord = Rect::from_corners(Vec2::splat(PANEL_PADDING), Vec2::splat(PANEL_PADDING) + chord_size);

        let remaining = (window.y - chord.max.y - 2.0 * PANEL_PADDING).max(0.0);
        let ruler_size = self
            .ruler
            .measure(MeasureSpec::Exactly(RULER_WIDTH), MeasureSpec::AtMost(remaining));
        let ruler_min = Vec2::new(PANEL_PADDING, chord.max.y + PANEL_PADDING);
        let ruler = Rect::from_corners(ruler_min, ruler_min + ruler_size);

        let visible_width = (window.x - ruler.max.x - PANEL_PADDING).max(0.0);
        let fretboard = Rect::new(ruler.max.x, ruler.min.y, ruler.max.x + visible_width, ruler.max.y);
        let content = self
            .fretboard
            .measure(MeasureSpec::Unspecified, MeasureSpec::Exactly(ruler_size.y));

        self.chord.on_size_changed(chord_size.x, chord_size.y);
        self.ruler.on_size_changed(ruler_size.x, ruler_size.y);
        self.fretboard.on_size_changed(content.x, content.y);

        PanelRegions {
            chord,
            ruler,
            fretboard,
        }
    }

    /// Scroll the whole timeline past in real time, from the start.
    pub fn start_transport(&mut self, now: Duration) {
        let total = self.fretboard.total_duration();
        if total == 0 {
            return;
        }
        self.fretboard.reset_scroll();
        self.fretboard
            .smooth_scroll_by(total as f32, 0.0, Some(Duration::from_millis(total)), now);
        info!("Transport started over {total}ms");
    }

    pub fn stop_transport(&mut self) {
        self.fretboard.reset_states();
        self.fretboard.reset_scroll();
        info!("Transport stopped");
    }

    /// Timeline position at the left edge of the tablature.
    pub fn playhead_ms(&self) -> u64 {
        (self.fretboard.scroll_offset().x * self.fretboard.time_scale()).max(0.0) as u64
    }

    /// Mark the group under the playhead. Returns its index, if any.
    pub fn mark_current(&mut self, state: NoteState) -> Result<Option<usize>, PanelError> {
        let Some(index) = self.fretboard.tablature().group_at(self.playhead_ms()) else {
            return Ok(None);
        };
        self.fretboard.update_group_state(index, state)?;
        Ok(Some(index))
    }
}

pub fn load_exercise(config: &AppConfig) -> Exercise {
    let Some(path) = &config.paths.exercise_file else {
        return Exercise::sample();
    };
    Exercise::load(Path::new(path)).unwrap_or_else(|e| {
        warn!("Failed to load exercise '{path}': {e}, using the built-in sample");
        Exercise::sample()
    })
}

pub fn setup_practice(
    mut commands: Commands,
    themes: Res<Themes>,
    settings: Res<Settings>,
    config: Res<AppConfig>,
) {
    let theme = themes.resolve(&settings.start_theme);
    let scale = ScaleContext::new(1.0, settings.panel.font_scale);
    let exercise = load_exercise(&config);

    let panel = match PracticePanel::new(&theme, &scale, &settings.panel, &exercise) {
        Ok(panel) => panel,
        Err(e) => {
            error!("Could not build the practice panel: {e}");
            return;
        }
    };
    info!(
        "Practice '{}' with {} note groups",
        exercise.chord.symbol,
        panel.fretboard.tablature().len()
    );
    commands.insert_resource(panel);

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(BACKDROP),
            PracticeRoot,
        ))
        .id();

    for kind in PANEL_KINDS {
        let region = commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    overflow: Overflow::clip(),
                    ..default()
                },
                PanelRegion(kind),
                ChildOf(root),
            ))
            .id();
        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            PanelCanvas(kind),
            ChildOf(region),
        ));
    }
}

pub fn teardown_practice(mut commands: Commands, roots: Query<Entity, With<PracticeRoot>>) {
    for root in &roots {
        commands.entity(root).despawn();
    }
    commands.remove_resource::<PracticePanel>();
}

pub fn layout_panel(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panel: ResMut<PracticePanel>,
    mut regions: Query<(&PanelRegion, &mut Node), Without<PanelCanvas>>,
    mut canvases: Query<(&PanelCanvas, &mut Node), Without<PanelRegion>>,
    mut arranged_for: Local<Option<Vec2>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    if *arranged_for == Some(window_size) {
        return;
    }
    *arranged_for = Some(window_size);
    let arranged = panel.arrange(window_size);

    for (region, mut node) in &mut regions {
        let rect = arranged.get(region.0);
        node.left = Val::Px(rect.min.x);
        node.top = Val::Px(rect.min.y);
        node.width = Val::Px(rect.width());
        node.height = Val::Px(rect.height());
    }

    for (canvas, mut node) in &mut canvases {
        let size = panel.view_mut(canvas.0).size();
        node.width = Val::Px(size.x);
        node.height = Val::Px(size.y);
    }
}

pub fn transport_input(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut panel: ResMut<PracticePanel>,
) {
    if keys.just_pressed(KeyCode::Space) {
        panel.start_transport(time.elapsed());
    }
    if keys.just_pressed(KeyCode::Escape) {
        panel.stop_transport();
    }

    let mark = if keys.just_pressed(KeyCode::KeyC) {
        Some(NoteState::Correct)
    } else if keys.just_pressed(KeyCode::KeyX) {
        Some(NoteState::Wrong)
    } else {
        None
    };
    if let Some(state) = mark {
        match panel.mark_current(state) {
            Ok(Some(index)) => debug!("Group {index} marked {state:?}"),
            Ok(None) => debug!("No group under the playhead"),
            Err(e) => warn!("{e}"),
        }
    }
}

/// Advance the scroll animation and slide the tablature canvas under its
/// region.
pub fn advance_scroll(
    time: Res<Time>,
    mut panel: ResMut<PracticePanel>,
    mut canvases: Query<(&PanelCanvas, &mut Node)>,
) {
    panel.fretboard.compute_scroll(time.elapsed());
    let offset = panel.fretboard.scroll_offset();

    for (canvas, mut node) in &mut canvases {
        if canvas.0 == PanelKind::FretBoard {
            node.left = Val::Px(-offset.x);
            node.top = Val::Px(-offset.y);
        }
    }
}

/// Re-record invalidated views and rebuild their canvas children.
pub fn repaint_panel(
    mut commands: Commands,
    mut panel: ResMut<PracticePanel>,
    canvases: Query<(Entity, &PanelCanvas)>,
) {
    for (entity, canvas) in &canvases {
        let view = panel.view_mut(canvas.0);
        if !view.take_invalidation() {
            continue;
        }

        let mut list = DisplayList::new();
        view.render(&mut list);
        commands.entity(entity).despawn_related::<Children>();
        for command in list.commands() {
            spawn_command(&mut commands, entity, command);
        }
        debug!("Repainted {:?} with {} commands", canvas.0, list.len());
    }
}

fn absolute(rect: Rect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x),
        top: Val::Px(rect.min.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        ..default()
    }
}

fn spawn_shape(commands: &mut Commands, canvas: Entity, rect: Rect, radius: f32, paint: &Paint) {
    let mut shape = match paint.style {
        PaintStyle::Fill => commands.spawn((absolute(rect), BackgroundColor(paint.color))),
        PaintStyle::Stroke => {
            // UI borders sit inside the node; strokes are centered on the edge
            let mut node = absolute(rect.inflate(paint.stroke_width / 2.0));
            node.border = UiRect::all(Val::Px(paint.stroke_width));
            commands.spawn((node, BorderColor::all(paint.color)))
        }
    };
    shape.insert((BorderRadius::all(Val::Px(radius)), ChildOf(canvas)));
}

fn spawn_command(commands: &mut Commands, canvas: Entity, command: &DrawCommand) {
    match command {
        DrawCommand::Line { from, to, paint } => {
            let half = paint.stroke_width / 2.0;
            let thickness = if from.y == to.y {
                Vec2::new(0.0, half)
            } else {
                Vec2::new(half, 0.0)
            };
            let rect = Rect::from_corners(from.min(*to) - thickness, from.max(*to) + thickness);
            commands.spawn((absolute(rect), BackgroundColor(paint.color), ChildOf(canvas)));
        }
        DrawCommand::Rect { rect, paint } => spawn_shape(commands, canvas, *rect, 0.0, paint),
        DrawCommand::RoundRect { rect, radius, paint }
        | DrawCommand::Background { rect, radius, paint } => {
            spawn_shape(commands, canvas, *rect, *radius, paint)
        }
        DrawCommand::Circle {
            center,
            radius,
            paint,
        } => {
            let rect = Rect::from_center_half_size(*center, Vec2::splat(*radius));
            spawn_shape(commands, canvas, rect, *radius, paint);
        }
        DrawCommand::Text {
            text,
            origin,
            paint,
            ..
        } => {
            let top_left = text_node_top_left(*origin, paint.size);
            commands.spawn((
                Text::new(text.clone()),
                TextFont {
                    font_size: paint.size,
                    ..default()
                },
                TextColor(paint.color),
                TextLayout::new_with_no_wrap(),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(top_left.x),
                    top: Val::Px(top_left.y),
                    ..default()
                },
                ChildOf(canvas),
            ));
        }
    }
}

/// Top-left corner of a text node whose baseline pen position is `origin`.
/// A UI text node is placed by its line box, which starts at the pen x and
/// rises above the ink, so the recorded ink bounds are not used here.
fn text_node_top_left(origin: Vec2, font_size: f32) -> Vec2 {
    Vec2::new(origin.x, origin.y - font_size * LINE_BOX_ASCENT)
}
