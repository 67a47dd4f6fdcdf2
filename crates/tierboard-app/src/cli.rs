//! Command line arguments.

use crate::app::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tierboard")]
#[command(about = "Tiered rookie ranking board for the terminal")]
pub struct Cli {
    /// Directory holding the saved board and preferences
    /// (defaults to the platform data directory).
    pub data_dir: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory `export` writes to")]
    pub export_dir: PathBuf,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_dir: cli.data_dir,
            export_dir: cli.export_dir,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierboard_core::NOTICE_DURATION;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tierboard"]).unwrap();
        let config = AppConfig::from(cli);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.notice_duration, NOTICE_DURATION);
    }

    #[test]
    fn test_data_dir_and_export_dir() {
        let cli =
            Cli::try_parse_from(["tierboard", "/tmp/boards", "--export-dir", "/tmp/out"]).unwrap();
        let config = AppConfig::from(cli);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/boards")));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["tierboard", "/tmp/boards", "extra"]).is_err());
        assert!(Cli::try_parse_from(["tierboard", "--verbose"]).is_err());
    }
}
