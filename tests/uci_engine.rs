//! `UciEngine` against a scripted shell engine, so the handshake and the
//! search loops run over real pipes without a Stockfish install.
#![cfg(unix)]

use std::{fs, os::unix::fs::PermissionsExt};

use weakfish::{Analyzer, Error, Limit, Score, UciEngine, shakmaty::Chess};

fn fake_engine() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fake_uci.sh");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string()
}

fn first_moves(engine: &mut UciEngine, multipv: u32) -> Vec<(u32, String)> {
    engine
        .analyze(&Chess::default(), Limit::depth(2), multipv)
        .unwrap()
        .iter()
        .map(|v| (v.multipv, v.pv[0].to_string()))
        .collect()
}

#[test]
fn handshake_collects_name_and_options() {
    let mut engine = UciEngine::spawn(&fake_engine()).unwrap();
    assert_eq!(engine.name(), Some("Fake UCI 1.0"));

    let names: Vec<&str> = engine.options().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["MultiPV", "UCI_LimitStrength", "UCI_Elo"]);
    let elo = &engine.options()[2];
    assert_eq!((elo.min, elo.max), (Some(1320), Some(3190)));

    engine.quit().unwrap();
}

#[test]
fn multipv_analysis_keeps_the_deepest_line_per_rank() {
    let mut engine = UciEngine::spawn(&fake_engine()).unwrap();

    let lines = engine.analyze(&Chess::default(), Limit::depth(2), 2).unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|v| v.depth == 2));
    assert_eq!(lines[0].score, Some(Score::Cp(35)));
    assert_eq!(
        first_moves(&mut engine, 2),
        [(1, "e2e4".to_string()), (2, "d2d4".to_string())]
    );
}

#[test]
fn play_switches_back_to_a_single_line() {
    let mut engine = UciEngine::spawn(&fake_engine()).unwrap();

    assert_eq!(first_moves(&mut engine, 2).len(), 2);
    let best = engine.play(&Chess::default(), Limit::depth(4)).unwrap();
    assert_eq!(best.unwrap().to_string(), "g1f3");
    assert_eq!(first_moves(&mut engine, 1), [(1, "g1f3".to_string())]);
}

#[test]
fn configure_and_quit() {
    let mut engine = UciEngine::spawn(&fake_engine()).unwrap();
    engine
        .configure(&[
            ("UCI_LimitStrength", "true".to_string()),
            ("UCI_Elo", "1500".to_string()),
        ])
        .unwrap();
    engine.quit().unwrap();
    // A second quit is a no-op.
    engine.quit().unwrap();
}

#[test]
fn engine_exit_is_fatal() {
    let mut engine = UciEngine::spawn(&fake_engine()).unwrap();
    let err = engine.configure(&[("Crash", "1".to_string())]).unwrap_err();
    assert!(err.is_fatal_to_engine(), "{err}");
    assert!(matches!(err, Error::EngineTerminated | Error::EngineIo(_)));
}
