pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod menu;
pub mod powerup;
pub mod preview;
