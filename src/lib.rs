//! A five-day terminal minigame about living with a cat. Day three's maze is
//! carved by a recursive backtracker and the cat hides in the cell farthest
//! from the entrance.

pub mod app;
pub mod arena;
pub mod config;
pub mod error;
pub mod input;
pub mod maze;
pub mod missions;
pub mod render;
pub mod story;
pub mod view;
