pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod shader;
pub mod state;
pub mod types;
pub mod ui;

pub use controller::{Controller, SliderField};
pub use error::PipelineError;
pub use state::TransformState;
