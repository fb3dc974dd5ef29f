use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};

use crate::scenes::PracticePanel;
use crate::states::AppState;

pub mod fps_counter;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(OnEnter(AppState::Practice), fps_counter::spawn_debug_overlay)
            .add_systems(
                Update,
                (
                    fps_counter::update_fps_text,
                    fps_counter::update_transport_text.run_if(resource_exists::<PracticePanel>),
                )
                    .run_if(in_state(AppState::Practice)),
            );
    }
}
