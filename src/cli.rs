//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use pgn_downloader::{Color, Server};

/// Download a player's chess games as PGN.
///
/// Fetches the game history of USERNAME from chess.com or lichess, keeps the
/// games matching the color, mode and date filters, and writes them to a new
/// PGN file.
#[derive(Parser, Debug)]
#[command(name = "pgn-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Account whose games are downloaded
    pub username: String,

    /// Game server to download from: chess-com or lichess [default: chess-com]
    #[arg(short, long)]
    pub server: Option<Server>,

    /// Output file (must not exist) [default: USERNAME.pgn or USERNAME-COLOR.pgn]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only games where USERNAME played this color (white or black)
    #[arg(short, long)]
    pub color: Option<Color>,

    /// Only games of these modes (repeatable or comma-separated), e.g. blitz,rapid
    #[arg(short, long = "mode", value_delimiter = ',')]
    pub modes: Vec<String>,

    /// Earliest date: relative (12h, 7d, 1.5d, 3m, 1y) or absolute (2024, 2024-03, 2024-03-07)
    #[arg(long, allow_hyphen_values = true)]
    pub since: Option<String>,

    /// Latest date, same formats as --since (the whole named unit is included)
    #[arg(long, allow_hyphen_values = true)]
    pub until: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,
}

impl Args {
    /// Output path, defaulting to `{username}.pgn` or `{username}-{color}.pgn`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        match self.color {
            Some(color) => PathBuf::from(format!("{}-{color}.pgn", self.username)),
            None => PathBuf::from(format!("{}.pgn", self.username)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_username_only_parses_with_defaults() {
        let args = Args::try_parse_from(["pgn-downloader", "alice"]).unwrap();
        assert_eq!(args.username, "alice");
        assert_eq!(args.server, None);
        assert_eq!(args.color, None);
        assert!(args.modes.is_empty());
        assert_eq!(args.since, None);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.no_progress);
        assert_eq!(args.output_path(), PathBuf::from("alice.pgn"));
    }

    #[test]
    fn test_cli_missing_username_is_error() {
        let err = Args::try_parse_from(["pgn-downloader"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_server_values() {
        let args = Args::try_parse_from(["pgn-downloader", "-s", "lichess", "bob"]).unwrap();
        assert_eq!(args.server, Some(Server::Lichess));

        let args = Args::try_parse_from(["pgn-downloader", "--server", "chess.com", "bob"]).unwrap();
        assert_eq!(args.server, Some(Server::ChessCom));

        let err = Args::try_parse_from(["pgn-downloader", "-s", "fics", "bob"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_modes_repeatable_and_comma_separated() {
        let args = Args::try_parse_from([
            "pgn-downloader",
            "-m",
            "blitz,rapid",
            "--mode",
            "correspondence",
            "alice",
        ])
        .unwrap();
        assert_eq!(args.modes, vec!["blitz", "rapid", "correspondence"]);
    }

    #[test]
    fn test_cli_color_sets_default_output_name() {
        let args = Args::try_parse_from(["pgn-downloader", "-c", "white", "alice"]).unwrap();
        assert_eq!(args.color, Some(Color::White));
        assert_eq!(args.output_path(), PathBuf::from("alice-white.pgn"));
    }

    #[test]
    fn test_cli_explicit_output_wins() {
        let args =
            Args::try_parse_from(["pgn-downloader", "-c", "black", "-o", "out.pgn", "alice"])
                .unwrap();
        assert_eq!(args.output_path(), PathBuf::from("out.pgn"));
    }

    #[test]
    fn test_cli_date_expressions_are_kept_verbatim() {
        let args = Args::try_parse_from([
            "pgn-downloader",
            "--since",
            "-1d",
            "--until",
            "2024-01",
            "alice",
        ])
        .unwrap();
        assert_eq!(args.since.as_deref(), Some("-1d"));
        assert_eq!(args.until.as_deref(), Some("2024-01"));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["pgn-downloader", "-vv", "alice"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let err = Args::try_parse_from(["pgn-downloader", "-q", "-v", "alice"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_timeout_range() {
        let args =
            Args::try_parse_from(["pgn-downloader", "--read-timeout", "60", "alice"]).unwrap();
        assert_eq!(args.read_timeout, Some(60));

        let err = Args::try_parse_from(["pgn-downloader", "--connect-timeout", "0", "alice"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["pgn-downloader", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["pgn-downloader", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
