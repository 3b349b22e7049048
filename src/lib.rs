//! cuecard: outline text to structured trees, speech cards and chapters.
//!
//! Layers, innermost first: `domain` (pure tree logic), `application`
//! (services over I/O traits), `infrastructure` (real I/O and wiring),
//! `cli` (argument model and output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
