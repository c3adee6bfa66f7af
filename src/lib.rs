//! Aurora-X: prompt-to-scaffold router.
//!
//! Classifies a natural-language prompt into an intent, picks a target
//! language, renders boilerplate from templates, and writes it to a
//! content-addressed project directory.

pub mod cli;
pub mod core;
pub mod journal;
pub mod server;
pub mod templates;
