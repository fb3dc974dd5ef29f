use bevy::{
    prelude::*,
    window::{ExitCondition, WindowPlugin},
};

use guitar_panel::file::config::{AppConfig, ConfigPlugin};
use guitar_panel::states::{AppState, PracticePlugin, StartupPlugin};

#[cfg(not(feature = "production"))]
use guitar_panel::debug::DebugPlugin;

fn main() {
    let mut app = App::new();
    // the window title comes from the config, so it has to be read first
    app.add_plugins(ConfigPlugin);
    let title = app
        .world()
        .get_resource::<AppConfig>()
        .map(|config| config.window.title.clone())
        .unwrap_or_default();

    app.add_plugins((
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title,
                ..default()
            }),
            exit_condition: ExitCondition::OnPrimaryClosed,
            ..default()
        }),
        #[cfg(not(feature = "production"))]
        DebugPlugin,
        StartupPlugin,
        PracticePlugin,
    ))
    .init_state::<AppState>()
    .run();
}
