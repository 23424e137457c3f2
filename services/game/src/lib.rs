//! The playable blindfold chess host.
//!
//! Supplies the collaborators the core pipeline consumes (recognizer
//! backends, notice queue) plus the board, the random engine opponent,
//! and the terminal game loop that wires everything together.

pub mod ai;
pub mod board;
pub mod config;
pub mod game;
pub mod notices;
pub mod recognizer;
