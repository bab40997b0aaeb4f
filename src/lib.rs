pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod flap;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod spawn;
