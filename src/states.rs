use bevy::prelude::*;

use crate::file::settings::setup_settings;
use crate::file::theme::setup_theme;
use crate::scenes::practice::{advance_scroll, layout_panel, repaint_panel, transport_input, PracticePanel};
use crate::scenes::{setup_camera, setup_practice, teardown_practice};

#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    InitialLoad,
    Practice,
}

// Settings and themes load in separate systems; the latch holds the state
// until both have landed.
#[derive(Resource, Default)]
pub struct StartupLatch {
    pub settings_loaded: bool,
    pub theme_loaded: bool,
}

pub fn check_startup_complete(
    latch: Res<StartupLatch>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if latch.settings_loaded && latch.theme_loaded {
        next_state.set(AppState::Practice);
    }
}

pub struct StartupPlugin;

impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(StartupLatch::default())
            .add_systems(
                OnEnter(AppState::InitialLoad),
                (setup_theme, setup_settings, setup_camera),
            )
            .add_systems(
                Update,
                check_startup_complete.run_if(in_state(AppState::InitialLoad)),
            );
    }
}

pub struct PracticePlugin;

impl Plugin for PracticePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Practice), setup_practice)
            .add_systems(OnExit(AppState::Practice), teardown_practice)
            .add_systems(
                Update,
                (layout_panel, transport_input, advance_scroll, repaint_panel)
                    .chain()
                    .run_if(in_state(AppState::Practice).and(resource_exists::<PracticePanel>)),
            );
    }
}
