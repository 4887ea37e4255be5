pub mod board;
pub mod check;
pub mod config;
pub mod error;
pub mod game;
pub mod legality;
pub mod moves;
pub mod piece;
pub mod reach;
pub mod special;

#[cfg(target_arch = "wasm32")]
mod wasm_api;
