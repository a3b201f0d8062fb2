//! Line-level helpers for the UCI protocol.
//!
//! Nothing in here touches a process; these functions only build the
//! commands we send and pick apart the lines the engine prints, so they
//! can be tested against captured engine output.

use shakmaty::uci::UciMove;

use crate::{
    error::Error,
    types::{EngineOption, Limit, Score, Variation},
};

/// Build the `go` command for a search budget. An empty limit searches
/// a single ply rather than running forever.
pub fn go_command(limit: &Limit) -> String {
    let mut cmd = String::from("go");
    if let Some(depth) = limit.depth {
        cmd.push_str(&format!(" depth {depth}"));
    }
    if let Some(movetime) = limit.movetime {
        cmd.push_str(&format!(" movetime {}", movetime.as_millis().max(1)));
    }
    if limit.depth.is_none() && limit.movetime.is_none() {
        cmd.push_str(" depth 1");
    }
    cmd
}

pub fn setoption_command(name: &str, value: &str) -> String {
    format!("setoption name {name} value {value}")
}

/// Parse an `option name <id> type <t> [default <x>] [min <x>] [max <x>] [var <x>]*`
/// advertisement.
pub fn parse_option(line: &str) -> Option<EngineOption> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "option" || tokens.next()? != "name" {
        return None;
    }

    let mut name = Vec::new();
    let mut kind = None;
    let mut default = None;
    let mut min = None;
    let mut max = None;

    // The name runs until the `type` keyword and may contain spaces.
    while let Some(token) = tokens.next() {
        if token == "type" {
            kind = tokens.next();
            break;
        }
        name.push(token);
    }

    let rest: Vec<&str> = tokens.collect();
    let mut i = 0;
    while i < rest.len() {
        let key = rest[i];
        // Values run until the next keyword, `default` may be multi-word.
        let mut j = i + 1;
        while j < rest.len() && !matches!(rest[j], "default" | "min" | "max" | "var") {
            j += 1;
        }
        let value = rest[i + 1..j].join(" ");
        match key {
            "default" => default = Some(value),
            "min" => min = value.parse().ok(),
            "max" => max = value.parse().ok(),
            _ => {}
        }
        i = j;
    }

    if name.is_empty() {
        return None;
    }

    Some(EngineOption {
        name: name.join(" "),
        kind: kind?.to_string(),
        default: default.filter(|d| d != "<empty>"),
        min,
        max,
    })
}

/// Parse an `info` line into a variation. Lines without a score or a
/// principal variation (currmove updates, `info string`) yield `None`.
pub fn parse_info(line: &str) -> Option<Variation> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() != Some(&"info") {
        return None;
    }

    let mut variation = Variation {
        multipv: 1,
        depth: 0,
        score: None,
        pv: Vec::new(),
    };

    let mut i = 1;
    while i < tokens.len() {
        match tokens[i] {
            "string" => return None,
            "depth" => {
                variation.depth = tokens.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            "multipv" => {
                variation.multipv = tokens.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            "score" => {
                let value: i32 = tokens.get(i + 2)?.parse().ok()?;
                variation.score = match *tokens.get(i + 1)? {
                    "cp" => Some(Score::Cp(value)),
                    "mate" => Some(Score::Mate(value)),
                    _ => None,
                };
                i += 3;
                while matches!(tokens.get(i), Some(&"lowerbound" | &"upperbound")) {
                    i += 1;
                }
            }
            "pv" => {
                variation.pv = tokens[i + 1..]
                    .iter()
                    .map_while(|t| t.parse::<UciMove>().ok())
                    .collect();
                break;
            }
            "wdl" => i += 4,
            "refutation" | "currline" => break,
            _ => i += 2,
        }
    }

    if variation.score.is_none() && variation.pv.is_empty() {
        None
    } else {
        Some(variation)
    }
}

/// Parse a `bestmove` line. `bestmove (none)` means the side to move has
/// no legal moves.
pub fn parse_bestmove(line: &str) -> Result<Option<UciMove>, Error> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return Err(Error::Protocol(format!("expected bestmove, got {line:?}")));
    }
    match tokens.next() {
        None | Some("(none)") | Some("0000") => Ok(None),
        Some(mv) => mv
            .parse::<UciMove>()
            .map(Some)
            .map_err(|_| Error::Protocol(format!("unparsable bestmove {mv:?}"))),
    }
}
