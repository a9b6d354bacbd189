//! CLI definition using clap.

use clap::Parser;
use probekit_core::Language;
use probekit_settings::Config;
use std::path::PathBuf;

/// ProbeKit - expand tool changes into a park, pause and probe sequence
#[derive(Parser, Debug)]
#[command(name = "probekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// G-code file to process (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write processed G-code here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (.json or .toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Park X position (machine coordinates)
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// Park Y position (machine coordinates)
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<f64>,

    /// Park Z height (machine coordinates)
    #[arg(long, allow_negative_numbers = true)]
    pub z: Option<f64>,

    /// Command that moves to the tool length probe
    #[arg(long)]
    pub probe_move: Option<String>,

    /// Command that runs the measurement
    #[arg(long)]
    pub probe_action: Option<String>,

    /// Help text language (en, de, es, fr)
    #[arg(long)]
    pub language: Option<Language>,

    /// Pass tool changes through untouched
    #[arg(long)]
    pub no_tool_change: bool,

    /// List the pipeline's processors and exit
    #[arg(long)]
    pub describe: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        let tool_change = &mut config.tool_change;

        if let Some(x) = self.x {
            tool_change.x = x;
        }
        if let Some(y) = self.y {
            tool_change.y = y;
        }
        if let Some(z) = self.z {
            tool_change.z = z;
        }
        if let Some(cmd) = &self.probe_move {
            tool_change.probe_move_command = cmd.clone();
        }
        if let Some(cmd) = &self.probe_action {
            tool_change.probe_action_command = cmd.clone();
        }
        if self.no_tool_change {
            tool_change.enabled = false;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "probekit",
            "part.nc",
            "--x",
            "-250.5",
            "--z",
            "-5",
            "--probe-action",
            "G38.2Z-20F50",
            "--language",
            "de",
        ]);

        let mut config = Config::new();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.input, Some(PathBuf::from("part.nc")));
        assert_eq!(config.tool_change.x, -250.5);
        assert_eq!(config.tool_change.y, 0.0);
        assert_eq!(config.tool_change.z, -5.0);
        assert_eq!(config.tool_change.probe_action_command, "G38.2Z-20F50");
        assert_eq!(config.language, Language::De);
        assert!(config.tool_change.enabled);
    }

    #[test]
    fn test_no_tool_change_flag() {
        let cli = Cli::parse_from(["probekit", "--no-tool-change"]);
        let mut config = Config::new();
        cli.apply_overrides(&mut config);
        assert!(!config.tool_change.enabled);
        assert!(cli.input.is_none());
    }
}
