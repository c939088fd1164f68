//! Edge-line parser for propagation-tree files
//!
//! Each line of a tree file describes one directed edge as two quoted tuples
//! joined by `->`:
//!
//! ```text
//! ['972651', '80080680482123777', '0.0']->['189397006', '80080680482123777', '1.2']
//! ```
//!
//! Splitting either half on `'` puts the user id at token 1, the tweet id at
//! token 3 and the timestamp at token 5. Nothing else about the line is
//! interpreted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// Separator between the origin and destination tuples
pub const EDGE_SEPARATOR: &str = "->";

/// Marker used in the user/tweet slots of the first line of each tree file
pub const ROOT_MARKER: &str = "ROOT";

const USER_TOKEN: usize = 1;
const TWEET_TOKEN: usize = 3;
const TIME_TOKEN: usize = 5;
const MIN_TOKENS: usize = TIME_TOKEN + 1;

/// One directed edge of a propagation tree
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Origin tweet id
    pub tweet_in: i64,
    /// Destination tweet id
    pub tweet_out: i64,
    /// Origin user id
    pub user_in: i64,
    /// Destination user id
    pub user_out: i64,
    /// Origin timestamp
    pub time_in: f64,
    /// Destination timestamp
    pub time_out: f64,
}

impl Edge {
    /// Parse a single edge line
    pub fn parse(line: &str) -> Result<Self> {
        let (origin, dest) = split_halves(line)?;
        let origin = Endpoint::parse(origin, "origin")?;
        let dest = Endpoint::parse(dest, "destination")?;

        Ok(Edge {
            tweet_in: origin.tweet,
            tweet_out: dest.tweet,
            user_in: origin.user,
            user_out: dest.user,
            time_in: origin.time,
            time_out: dest.time,
        })
    }

    /// Flatten into `(tweet_in, tweet_out, user_in, user_out, time_in, time_out)`
    pub fn as_tuple(&self) -> (i64, i64, i64, i64, f64, f64) {
        (
            self.tweet_in,
            self.tweet_out,
            self.user_in,
            self.user_out,
            self.time_in,
            self.time_out,
        )
    }

    /// Time elapsed between the origin and destination posts
    pub fn delay(&self) -> f64 {
        self.time_out - self.time_in
    }
}

impl FromStr for Edge {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self> {
        Edge::parse(s)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "['{}', '{}', '{}']->['{}', '{}', '{}']",
            self.user_in, self.tweet_in, self.time_in, self.user_out, self.tweet_out, self.time_out
        )
    }
}

/// Parse an edge line into
/// `(tweet_in, tweet_out, user_in, user_out, time_in, time_out)`.
pub fn parse_edge_line(line: &str) -> Result<(i64, i64, i64, i64, f64, f64)> {
    Edge::parse(line).map(|edge| edge.as_tuple())
}

/// Whether `line` is the header line of a tree file, whose origin is `ROOT`
/// rather than a real user/tweet.
pub fn is_root_marker(line: &str) -> bool {
    match line.split_once(EDGE_SEPARATOR) {
        Some((origin, _)) => origin
            .split('\'')
            .nth(USER_TOKEN)
            .map_or(false, |token| token.trim() == ROOT_MARKER),
        None => false,
    }
}

/// Fields read from one side of an edge
struct Endpoint {
    user: i64,
    tweet: i64,
    time: f64,
}

impl Endpoint {
    fn parse(half: &str, side: &str) -> Result<Self> {
        let tokens: Vec<&str> = half.split('\'').collect();
        if tokens.len() < MIN_TOKENS {
            return Err(PrepError::format(format!(
                "{} tuple has {} quote-delimited tokens, expected at least {}: {:?}",
                side,
                tokens.len(),
                MIN_TOKENS,
                half
            )));
        }

        Ok(Endpoint {
            user: parse_token(tokens[USER_TOKEN], side, "user id")?,
            tweet: parse_token(tokens[TWEET_TOKEN], side, "tweet id")?,
            time: parse_token(tokens[TIME_TOKEN], side, "timestamp")?,
        })
    }
}

fn split_halves(line: &str) -> Result<(&str, &str)> {
    let mut parts = line.split(EDGE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(origin), Some(dest), None) => Ok((origin, dest)),
        (_, None, _) => Err(PrepError::format(format!(
            "missing '{}' separator in edge line {:?}",
            EDGE_SEPARATOR, line
        ))),
        _ => Err(PrepError::format(format!(
            "more than one '{}' separator in edge line {:?}",
            EDGE_SEPARATOR, line
        ))),
    }
}

fn parse_token<T>(token: &str, side: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    token.trim().parse().map_err(|e| {
        PrepError::format(format!("invalid {} {} {:?}: {}", side, what, token, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINE: &str =
        "['972651', '80080680482123777', '0.0']->['189397006', '80080680482123777', '1.2']";

    #[test]
    fn test_parse_edge_line() {
        let parsed = parse_edge_line(LINE).unwrap();
        assert_eq!(
            parsed,
            (80080680482123777, 80080680482123777, 972651, 189397006, 0.0, 1.2)
        );
    }

    #[test]
    fn test_parse_reads_fixed_positions() {
        // Tokens at 1, 3 and 5; everything else is ignored.
        let line = "(a'7'b'70'c'0.5'd)->(e'8'f'80'g'2.5'h)";
        assert_eq!(parse_edge_line(line).unwrap(), (70, 80, 7, 8, 0.5, 2.5));
    }

    #[test]
    fn test_edge_struct() {
        let edge: Edge = LINE.parse().unwrap();
        assert_eq!(edge.user_in, 972651);
        assert_eq!(edge.user_out, 189397006);
        assert!((edge.delay() - 1.2).abs() < 1e-12);

        let reparsed = Edge::parse(&edge.to_string()).unwrap();
        assert_eq!(edge, reparsed);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_edge_line("['1', '2', '3.0']").unwrap_err();
        assert!(matches!(err, PrepError::Format(_)));
    }

    #[test]
    fn test_extra_separator() {
        let line = format!("{}->['1', '2', '3.0']", LINE);
        assert!(matches!(parse_edge_line(&line), Err(PrepError::Format(_))));
    }

    #[test]
    fn test_too_few_tokens() {
        let line = "['1', '2']->['3', '4', '5.0']";
        assert!(matches!(parse_edge_line(line), Err(PrepError::Format(_))));

        let line = "['1', '2', '5.0']->['3']";
        assert!(matches!(parse_edge_line(line), Err(PrepError::Format(_))));
    }

    #[test]
    fn test_non_numeric_tokens() {
        let line = "['ROOT', 'ROOT', '0.0']->['1', '2', '0.0']";
        assert!(matches!(parse_edge_line(line), Err(PrepError::Format(_))));

        let line = "['1', '2', 'soon']->['3', '4', '0.0']";
        assert!(matches!(parse_edge_line(line), Err(PrepError::Format(_))));

        // Ids must be integers, not floats.
        let line = "['1.5', '2', '0.0']->['3', '4', '0.0']";
        assert!(matches!(parse_edge_line(line), Err(PrepError::Format(_))));
    }

    #[test]
    fn test_root_marker() {
        assert!(is_root_marker("['ROOT', 'ROOT', '0.0']->['1', '2', '0.0']"));
        assert!(!is_root_marker(LINE));
        assert!(!is_root_marker("no separator here"));
    }

    proptest! {
        #[test]
        fn prop_parse_recovers_literals(
            user_in in any::<i64>(),
            tweet_in in any::<i64>(),
            user_out in any::<i64>(),
            tweet_out in any::<i64>(),
            time_in in 0u32..1_000_000,
            time_out in 0u32..1_000_000,
        ) {
            let line = format!(
                "['{}', '{}', '{}.25']->['{}', '{}', '{}.5']",
                user_in, tweet_in, time_in, user_out, tweet_out, time_out
            );
            let parsed = parse_edge_line(&line).unwrap();
            prop_assert_eq!(
                parsed,
                (tweet_in, tweet_out, user_in, user_out, time_in as f64 + 0.25, time_out as f64 + 0.5)
            );
            prop_assert_eq!(parse_edge_line(&line).unwrap(), parsed);
        }

        #[test]
        fn prop_parse_never_panics(line in ".*") {
            let _ = parse_edge_line(&line);
        }
    }
}
