use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};

use crate::scenes::PracticePanel;

const DEBUG_FONT_SIZE: f32 = 14.0;
const DEBUG_TEXT: Color = Color::srgb(1.0, 1.0, 1.0);

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct TransportText;

fn label(text: &str) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: DEBUG_FONT_SIZE,
            ..default()
        },
        TextColor(DEBUG_TEXT),
    )
}

fn span() -> (TextSpan, TextFont, TextColor) {
    (
        TextSpan::default(),
        TextFont {
            font_size: DEBUG_FONT_SIZE,
            ..default()
        },
        TextColor(DEBUG_TEXT),
    )
}

pub fn spawn_debug_overlay(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                top: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            GlobalZIndex(10),
        ))
        .with_children(|parent| {
            parent.spawn(label("FPS: ")).with_child((span(), FpsText));
            parent
                .spawn(label("Transport: "))
                .with_child((span(), TransportText));
        });
}

pub fn update_fps_text(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut TextSpan, With<FpsText>>,
) {
    for mut span in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                **span = format!("{value:.0}");
            }
        }
    }
}

pub fn update_transport_text(
    time: Res<Time>,
    panel: Res<PracticePanel>,
    mut query: Query<&mut TextSpan, With<TransportText>>,
) {
    let progress = panel.fretboard.scroll_progress(time.elapsed());
    let status = if panel.fretboard.is_scrolling() { "playing" } else { "idle" };
    for mut span in &mut query {
        **span = format!("{status} {:.0}% @ {}ms", progress * 100.0, panel.playhead_ms());
    }
}
