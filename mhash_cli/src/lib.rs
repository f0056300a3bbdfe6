//! mhash CLI library
//!
//! Pieces of the `mhash` binary that are useful on their own: layered
//! configuration, result formatting and progress rendering.

pub mod config;
pub mod output;
pub mod progress;
pub mod terminal;
