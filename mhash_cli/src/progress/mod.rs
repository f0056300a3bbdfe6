//! Progress reporting for the CLI
//!
//! The core reports through a [`ChannelProvider`](mhash_core::ChannelProvider);
//! a renderer task drains the channel into indicatif bars on stderr.

pub mod renderer;
pub mod utils;

pub use renderer::{ProgressRenderer, render_progress};
pub use utils::{format_bytes, format_summary, format_throughput};
