use bevy::prelude::*;

pub mod practice;

pub use practice::{setup_practice, teardown_practice, PracticePanel};

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
