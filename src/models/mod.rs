//! Core data models for filmroom.

mod ack;
mod ids;
mod player;
mod point;
mod team;
mod view;

pub use ack::*;
pub use ids::*;
pub use player::*;
pub use point::*;
pub use team::*;
pub use view::*;
