mod config;
mod game;
mod plugins;

use bevy::prelude::*;

use config::tuning::Tuning;
use plugins::{game_plugin::GamePlugin, input_plugin::DeviceInputPlugin, scene_plugin::ScenePlugin};

fn main() {
    let tuning = Tuning::load_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Blade Walker".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_seconds(tuning.dt as f64))
        .insert_resource(tuning)
        .add_plugins(GamePlugin)
        .add_plugins(DeviceInputPlugin)
        .add_plugins(ScenePlugin)
        .run();
}
