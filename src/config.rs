use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::{game::TurnSettings, policy::DEFAULT_CANDIDATES};

/// Play chess against a UCI engine at a chosen rating.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the UCI engine executable
    #[arg(long, env = "STOCKFISH_PATH", default_value = "stockfish")]
    pub engine_path: String,

    /// Address to listen on
    #[arg(long, env = "WEAKFISH_HOST", default_value = "0.0.0.0")]
    pub host: std::net::IpAddr,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Time budget for each position evaluation, in milliseconds
    #[arg(long, env = "EVAL_TIME_MS", default_value_t = 100)]
    pub eval_time_ms: u64,

    /// Time budget for the engine's move at limiter ratings, in milliseconds
    #[arg(long, env = "PLAY_TIME_MS", default_value_t = 500)]
    pub play_time_ms: u64,

    /// Number of candidate lines requested for low ratings
    #[arg(long, env = "CANDIDATES", default_value_t = DEFAULT_CANDIDATES,
          value_parser = clap::value_parser!(u32).range(1..=500))]
    pub candidates: u32,

    /// Print the options the engine advertises and exit
    #[arg(long)]
    pub list_options: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn turn_settings(&self) -> TurnSettings {
        TurnSettings {
            eval_time: Duration::from_millis(self.eval_time_ms),
            play_time: Duration::from_millis(self.play_time_ms),
            candidates: self.candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_turn_defaults() {
        let config = Config::try_parse_from(["weakfish"]).unwrap();
        assert!(!config.list_options);

        let settings = config.turn_settings();
        let defaults = TurnSettings::default();
        assert_eq!(settings.eval_time, defaults.eval_time);
        assert_eq!(settings.play_time, defaults.play_time);
        assert_eq!(settings.candidates, defaults.candidates);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "weakfish",
            "--engine-path",
            "/opt/sf",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--candidates",
            "3",
        ])
        .unwrap();
        assert_eq!(config.engine_path, "/opt/sf");
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.candidates, 3);
    }

    #[test]
    fn rejects_zero_candidates() {
        assert!(Config::try_parse_from(["weakfish", "--candidates", "0"]).is_err());
    }
}
