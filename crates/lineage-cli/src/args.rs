use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

/// Render a `.lineage` family tree to SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Family tree source file
    pub input: PathBuf,

    /// Where to write the SVG; `-` for stdout. Defaults to INPUT with an
    /// `.svg` extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Parse and validate only, without writing any SVG
    #[arg(long)]
    pub check: bool,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

/// Resolved destination for the rendered SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl Args {
    /// Arguments for rendering `input` with every other option defaulted.
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            config: None,
            check: false,
            log_level: LevelFilter::Info,
        }
    }

    pub fn output_target(&self) -> OutputTarget {
        match self.output.as_deref() {
            Some(path) if path == Path::new("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::File(self.input.with_extension("svg")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_follows_input() {
        let args = Args::parse_from(["lineage", "trees/royal.lineage"]);
        assert_eq!(
            args.output_target(),
            OutputTarget::File(PathBuf::from("trees/royal.svg"))
        );
        assert_eq!(args.log_level, LevelFilter::Info);
        assert!(!args.check);
    }

    #[test]
    fn test_dash_means_stdout() {
        let args = Args::parse_from(["lineage", "royal.lineage", "-o", "-"]);
        assert_eq!(args.output_target(), OutputTarget::Stdout);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "lineage",
            "royal.lineage",
            "--output",
            "out/chart.svg",
            "-c",
            "style.toml",
            "--check",
            "--log-level",
            "debug",
        ]);
        assert_eq!(
            args.output_target(),
            OutputTarget::File(PathBuf::from("out/chart.svg"))
        );
        assert_eq!(args.config, Some(PathBuf::from("style.toml")));
        assert!(args.check);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Args::try_parse_from(["lineage", "a.lineage", "--log-level", "loud"]).is_err());
    }
}
