pub mod game_plugin;
pub mod input_plugin;
pub mod scene_plugin;
