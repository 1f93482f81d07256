// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "affine-rect")]
#[command(about = "Translate, rotate and scale a colored rectangle", long_about = None)]
pub struct Cli {
    /// JSON file with window size, color seed and initial transform
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Seed for the vertex colors; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace the embedded vertex shader with a WGSL file
    #[arg(long = "vertex-shader")]
    pub vertex_shader: Option<PathBuf>,

    /// Replace the embedded fragment shader with a WGSL file
    #[arg(long = "fragment-shader")]
    pub fragment_shader: Option<PathBuf>,

    /// Hide the slider panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["affine-rect"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.no_ui);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "affine-rect",
            "--config",
            "rect.json",
            "--width",
            "640",
            "--height",
            "480",
            "--seed",
            "9",
            "--vertex-shader",
            "v.wgsl",
            "--fragment-shader",
            "f.wgsl",
            "--no-ui",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("rect.json")));
        assert_eq!((cli.width, cli.height), (Some(640), Some(480)));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.vertex_shader, Some(PathBuf::from("v.wgsl")));
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("f.wgsl")));
        assert!(cli.no_ui);
    }

    #[test]
    fn test_rejects_non_numeric_seed() {
        assert!(Cli::try_parse_from(["affine-rect", "--seed", "abc"]).is_err());
    }
}
