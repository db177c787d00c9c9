//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Package a catalog entry into an offline curation archive.
///
/// Gamezipper looks the entry up in the catalog, resolves every file it
/// launches, downloads them from the configured mirrors together with the
/// entry's logo and screenshot, writes `meta.yaml` and archives the result.
#[derive(Parser, Debug)]
#[command(name = "gamezipper")]
#[command(author, version, about)]
pub struct Args {
    /// Catalog id of the entry to package
    #[arg(value_name = "ENTRY_ID")]
    pub entry_id: Option<String>,

    /// Extra URLs, wildcard patterns ending in `*`, or text files listing them one per line
    #[arg(value_name = "SOURCES")]
    pub sources: Vec<String>,

    /// Configuration file (JSON)
    #[arg(short = 'c', long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output directory (overrides `OutputDirectory` from the config)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Assemble the curation directory but do not run the archiver
    #[arg(long)]
    pub no_archive: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args_parses_successfully() {
        let args = Args::try_parse_from(["gamezipper"]).unwrap();
        assert!(args.entry_id.is_none());
        assert!(args.sources.is_empty());
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert!(args.output_dir.is_none());
        assert!(!args.no_archive);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_entry_id_and_sources() {
        let args = Args::try_parse_from([
            "gamezipper",
            "0a1b2c3d",
            "http://example.org/a.swf",
            "extra.txt",
            "http://example.org/data/*",
        ])
        .unwrap();
        assert_eq!(args.entry_id.as_deref(), Some("0a1b2c3d"));
        assert_eq!(
            args.sources,
            vec![
                "http://example.org/a.swf",
                "extra.txt",
                "http://example.org/data/*"
            ]
        );
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["gamezipper", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["gamezipper", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);

        let args = Args::try_parse_from(["gamezipper", "--verbose", "--verbose"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["gamezipper", "-q"]).unwrap();
        assert!(args.quiet);

        let args = Args::try_parse_from(["gamezipper", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_config_and_output_dir() {
        let args = Args::try_parse_from([
            "gamezipper",
            "-c",
            "/etc/gz.json",
            "--output-dir",
            "/tmp/out",
            "--no-archive",
            "abcd",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("/etc/gz.json"));
        assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(args.no_archive);
        assert_eq!(args.entry_id.as_deref(), Some("abcd"));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["gamezipper", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["gamezipper", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["gamezipper", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
