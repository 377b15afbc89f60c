// src/lib.rs

//! Text-processing core of a terminal emulator: escape-sequence decoding,
//! Unicode run segmentation and contextual shaping, and the circular buffer
//! behind scrollback.

pub mod ansi;
pub mod color;
pub mod config;
pub mod pipeline;
pub mod ring;
pub mod text;
pub mod unicode;

pub use config::Config;
pub use pipeline::TextPipeline;
