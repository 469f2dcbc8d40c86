//! Accept/reject decision for one chess.com game record.
//!
//! Every criterion is evaluated for every record so rejections can be logged
//! in full; a missing field fails only the criterion that needs it.

use std::fmt;

use crate::calendar::DateWindow;
use crate::chess_com::{GameRecord, STANDARD_RULES};

use super::FilterSpec;

/// Why a record was not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The record carries no PGN text.
    MissingPgn,
    /// The ruleset is a variant (or absent), not standard chess.
    Variant,
    /// The user did not play the requested color.
    WrongColor,
    /// The time-control class is not among the requested modes.
    ModeNotAllowed,
    /// The completion time is missing or outside the date window.
    OutsideWindow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingPgn => "missing pgn",
            Self::Variant => "variant rules",
            Self::WrongColor => "wrong color",
            Self::ModeNotAllowed => "mode not allowed",
            Self::OutsideWindow => "outside date window",
        })
    }
}

/// Returns every criterion `record` fails under `spec`.
///
/// `spec` must already be in chess.com vocabulary (see
/// [`FilterSpec::for_server`]).
#[must_use]
pub fn rejections(record: &GameRecord, spec: &FilterSpec) -> Vec<Rejection> {
    let checks = [
        (record.pgn.is_some(), Rejection::MissingPgn),
        (
            record.rules.as_deref() == Some(STANDARD_RULES),
            Rejection::Variant,
        ),
        (plays_requested_color(record, spec), Rejection::WrongColor),
        (mode_allowed(record, spec), Rejection::ModeNotAllowed),
        (in_window(record, spec), Rejection::OutsideWindow),
    ];

    checks
        .into_iter()
        .filter_map(|(passed, rejection)| (!passed).then_some(rejection))
        .collect()
}

/// Returns true when `record` meets every criterion of `spec`.
#[must_use]
pub fn accept(record: &GameRecord, spec: &FilterSpec) -> bool {
    rejections(record, spec).is_empty()
}

fn plays_requested_color(record: &GameRecord, spec: &FilterSpec) -> bool {
    let Some(color) = spec.color() else {
        return true;
    };
    match (record.username_for(color), spec.username()) {
        (Some(player), Some(wanted)) => player.eq_ignore_ascii_case(wanted),
        _ => false,
    }
}

fn in_window(record: &GameRecord, spec: &FilterSpec) -> bool {
    let window = spec.window();
    match record.completed_at() {
        Some(instant) => window.contains(instant),
        // Without a completion time only an unbounded window can hold the game.
        None => window == DateWindow::UNBOUNDED,
    }
}

fn mode_allowed(record: &GameRecord, spec: &FilterSpec) -> bool {
    if spec.modes().is_empty() {
        return true;
    }
    record
        .time_class
        .as_deref()
        .is_some_and(|mode| spec.modes().iter().any(|allowed| allowed == mode))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::calendar::{DateBound, parse_absolute_date};
    use crate::chess_com::Side;
    use crate::download::Server;
    use crate::filter::Color;

    fn side(name: &str) -> Option<Side> {
        Some(Side {
            username: Some(name.to_string()),
        })
    }

    // 2024-01-15T12:00:00Z
    const MID_JANUARY: i64 = 1_705_320_000;

    fn game() -> GameRecord {
        GameRecord {
            pgn: Some("1. e4 e5 *".to_string()),
            rules: Some("chess".to_string()),
            time_class: Some("blitz".to_string()),
            end_time: Some(MID_JANUARY),
            white: side("alice"),
            black: side("bob"),
            url: None,
        }
    }

    fn january() -> FilterSpec {
        FilterSpec::new().with_window(
            DateBound::At(parse_absolute_date("2024-01", false).unwrap()),
            DateBound::At(parse_absolute_date("2024-01", true).unwrap()),
        )
    }

    #[test]
    fn test_unfiltered_spec_accepts_standard_game() {
        assert!(accept(&game(), &FilterSpec::new()));
    }

    #[test]
    fn test_missing_pgn_rejected() {
        let record = GameRecord {
            pgn: None,
            ..game()
        };
        assert_eq!(rejections(&record, &FilterSpec::new()), [Rejection::MissingPgn]);
    }

    #[test]
    fn test_variants_rejected_under_every_spec() {
        let specs = [
            FilterSpec::new(),
            january(),
            FilterSpec::new().with_color(Color::White, "alice"),
            FilterSpec::new().with_modes(["blitz"]),
            january()
                .with_color(Color::White, "alice")
                .with_modes(["blitz", "rapid"]),
        ];
        for rules in [Some("chess960"), Some("crazyhouse"), Some("Chess"), None] {
            let record = GameRecord {
                rules: rules.map(str::to_string),
                ..game()
            };
            for spec in &specs {
                assert!(!accept(&record, spec), "{rules:?} accepted under {spec:?}");
                assert!(rejections(&record, spec).contains(&Rejection::Variant));
            }
        }
    }

    #[test]
    fn test_color_selection() {
        let white_alice = FilterSpec::new().with_color(Color::White, "alice");
        let black_alice = FilterSpec::new().with_color(Color::Black, "alice");
        assert!(accept(&game(), &white_alice));
        assert_eq!(rejections(&game(), &black_alice), [Rejection::WrongColor]);
    }

    #[test]
    fn test_color_selection_ignores_username_case() {
        let spec = FilterSpec::new().with_color(Color::White, "Alice");
        assert!(accept(&game(), &spec));
    }

    #[test]
    fn test_color_selection_with_missing_side_rejects() {
        let record = GameRecord {
            white: None,
            ..game()
        };
        let spec = FilterSpec::new().with_color(Color::White, "alice");
        assert_eq!(rejections(&record, &spec), [Rejection::WrongColor]);
    }

    #[test]
    fn test_mode_membership() {
        assert!(accept(&game(), &FilterSpec::new().with_modes(["bullet", "blitz"])));
        assert_eq!(
            rejections(&game(), &FilterSpec::new().with_modes(["rapid"])),
            [Rejection::ModeNotAllowed]
        );
        let untagged = GameRecord {
            time_class: None,
            ..game()
        };
        assert!(accept(&untagged, &FilterSpec::new()));
        assert!(!accept(&untagged, &FilterSpec::new().with_modes(["blitz"])));
    }

    #[test]
    fn test_correspondence_matches_daily_after_translation() {
        let spec = FilterSpec::new()
            .with_modes(["correspondence"])
            .for_server(Server::ChessCom);
        let daily = GameRecord {
            time_class: Some("daily".to_string()),
            ..game()
        };
        let literal = GameRecord {
            time_class: Some("correspondence".to_string()),
            ..game()
        };
        assert!(accept(&daily, &spec));
        assert!(!accept(&literal, &spec));
    }

    #[test]
    fn test_window_edges_inclusive() {
        let start = parse_absolute_date("2024-01", false).unwrap().timestamp();
        let end = parse_absolute_date("2024-01", true).unwrap().timestamp();
        for end_time in [start, end, MID_JANUARY] {
            let record = GameRecord {
                end_time: Some(end_time),
                ..game()
            };
            assert!(accept(&record, &january()), "end_time {end_time}");
        }
        for end_time in [start - 1, end + 1] {
            let record = GameRecord {
                end_time: Some(end_time),
                ..game()
            };
            assert_eq!(rejections(&record, &january()), [Rejection::OutsideWindow]);
        }
    }

    #[test]
    fn test_missing_end_time_fails_only_bounded_windows() {
        let record = GameRecord {
            end_time: None,
            ..game()
        };
        assert!(accept(&record, &FilterSpec::new()));
        assert_eq!(rejections(&record, &january()), [Rejection::OutsideWindow]);
    }

    #[test]
    fn test_all_failures_reported_together() {
        let record = GameRecord {
            pgn: None,
            rules: Some("chess960".to_string()),
            time_class: Some("bullet".to_string()),
            end_time: Some(0),
            white: side("carol"),
            black: side("dave"),
            url: None,
        };
        let spec = january()
            .with_color(Color::White, "alice")
            .with_modes(["blitz"]);
        assert_eq!(
            rejections(&record, &spec),
            [
                Rejection::MissingPgn,
                Rejection::Variant,
                Rejection::WrongColor,
                Rejection::ModeNotAllowed,
                Rejection::OutsideWindow,
            ]
        );
    }
}
