use std::fs;

use holdem_engine::decision::{DecisionRequest, DecisionResponse};
use holdem_engine::engine::{Engine, TableConfig};
use holdem_engine::errors::GameError;
use holdem_engine::logger::{format_hand_id, HandLogger, HandRecord};
use holdem_engine::player::{ActionKind, Player, PlayerAction};

fn passive(req: &DecisionRequest) -> Result<DecisionResponse, GameError> {
    let action = if req.can(ActionKind::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Call
    };
    Ok(action.into())
}

fn played_record() -> HandRecord {
    let players = vec![
        Player::new("p0", 500),
        Player::new("p1", 500),
        Player::new("p2", 500),
    ];
    let mut eng = Engine::new(TableConfig::new(5, 10), players, 2024).unwrap();
    let mut d = passive;
    eng.play_hand(&mut d).unwrap()
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = played_record();
    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn record_uses_snake_case_tags() {
    let rec = played_record();
    let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
    assert_eq!(v["actions"][0]["street"], "preflop");
    assert_eq!(v["seats"][0]["position"], "button");
    assert_eq!(v["blinds"][0]["blind"], "small");
    assert!(v["net"].is_object());
}

#[test]
fn id_format_is_date_and_sequence() {
    let id = format_hand_id("20251231", 42);
    assert_eq!(id, "20251231-000042");
    let mut logger = HandLogger::detached("20250101");
    assert_eq!(logger.next_id(), "20250101-000001");
    assert_eq!(logger.next_id(), "20250101-000002");
}

#[test]
fn logger_writes_one_line_per_hand_with_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create log");
    let rec = played_record();
    let first = logger.write(&rec).unwrap();
    logger.write(&rec).unwrap();
    drop(logger);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let parsed: HandRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed, first);
    assert!(parsed.ts.is_some(), "timestamp injected");
    assert!(parsed.hand_id.ends_with("-000001"));
    let second: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert!(second.hand_id.ends_with("-000002"));
}
