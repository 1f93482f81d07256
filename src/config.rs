use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::state::TransformState;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Startup configuration, read from an optional JSON file and then
/// overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    /// Seed for the vertex colors. `None` draws from entropy.
    pub seed: Option<u64>,
    pub initial: TransformState,
    #[serde(skip)]
    pub vertex_shader: Option<PathBuf>,
    #[serde(skip)]
    pub fragment_shader: Option<PathBuf>,
    #[serde(skip)]
    pub show_ui: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            initial: TransformState::default(),
            vertex_shader: None,
            fragment_shader: None,
            show_ui: true,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).context("Invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to load config {}", path.display()))
    }

    /// Config file (if any) with command-line flags layered on top.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.vertex_shader.is_some() {
            self.vertex_shader = cli.vertex_shader.clone();
        }
        if cli.fragment_shader.is_some() {
            self.fragment_shader = cli.fragment_shader.clone();
        }
        if cli.no_ui {
            self.show_ui = false;
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "Canvas size must be positive, got {}x{}",
            self.width,
            self.height
        );
        let TransformState {
            translation,
            angle_radians,
            scale,
        } = self.initial;
        let values = [translation.0, translation.1, angle_radians, scale.0, scale.1];
        anyhow::ensure!(
            values.iter().all(|v| v.is_finite()),
            "Initial transform must be finite, got {:?}",
            self.initial
        );
        Ok(())
    }
}
