pub mod audio;
pub mod config;
pub mod engine;
pub mod player;
pub mod renderer;
pub mod script;
pub mod types;
