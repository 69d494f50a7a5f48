pub mod animation;
pub mod attack;
pub mod components;
pub mod destructible;
pub mod events;
pub mod input;
pub mod locomotion;
pub mod look;
pub mod physics;
pub mod player;
pub mod scheduler;
pub mod targeting;
pub mod types;
