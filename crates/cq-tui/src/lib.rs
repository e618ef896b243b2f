//! Terminal front-end for Colloquy dialogue sessions.
//!
//! `colloquy play` drives a [`cq_core::DialogueSession`] from a ratatui
//! view, `colloquy run` prints a transcript using the headless surface, and
//! `colloquy check` validates a story file.

pub mod app;
pub mod config;
pub mod logging;
pub mod surface;
pub mod terminal;
pub mod transcript;
