//! Generator for the C interrupt stubs and IDT gate registrations that a
//! kernel's vector table needs for every vector it does not handle by hand.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod vector;

pub use config::{GeneratorConfig, Section, Symbols};
pub use error::Error;
pub use vector::{VectorIndex, VectorRange};
