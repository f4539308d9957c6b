use std::fs;

use holdem_cli::run;
use holdem_engine::logger::HandRecord;
use serial_test::serial;

fn read_records(path: &std::path::Path) -> Vec<HandRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
#[serial]
fn sim_writes_one_record_per_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("sim.jsonl");
    let path_str = path.to_string_lossy().into_owned();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        [
            "holdem", "sim", "--hands", "25", "--players", "4", "--seed", "42", "--output",
            path_str.as_str(), "--ai", "baseline", "--ai", "aggressive",
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));

    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let hands = summary["hands"].as_u64().unwrap() as usize;
    let records = read_records(&path);
    assert_eq!(records.len(), hands);
    assert!(hands > 0 && hands <= 25);
    assert_eq!(summary["chips_conserved"], true);

    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.net_sum(), 0, "hand {}", rec.hand_id);
        assert_eq!(rec.hand_no, i as u64);
        assert_eq!(rec.seed, Some(42 + i as u64));
        assert!(rec.hand_id.ends_with(&format!("-{:06}", i + 1)));
        assert!(rec.ts.is_some());
    }
}

#[test]
#[serial]
fn sim_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let mut boards = Vec::new();
    for name in ["a.jsonl", "b.jsonl"] {
        let path = dir.path().join(name);
        let path_str = path.to_string_lossy().into_owned();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            [
                "holdem", "sim", "--hands", "10", "--players", "3", "--seed", "9", "--output",
                path_str.as_str(), "--ai", "random",
            ],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0);
        let recs = read_records(&path);
        boards.push(
            recs.iter()
                .map(|r| (r.board.clone(), r.actions.clone(), r.net.clone()))
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(boards[0], boards[1]);
}

#[test]
#[serial]
fn sim_break_after_exits_130() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.jsonl");
    let path_str = path.to_string_lossy().into_owned();
    unsafe {
        std::env::set_var("HOLDEM_SIM_BREAK_AFTER", "3");
    }
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        [
            "holdem", "sim", "--hands", "10", "--seed", "1", "--stack", "100000", "--output",
            path_str.as_str(),
        ],
        &mut out,
        &mut err,
    );
    unsafe {
        std::env::remove_var("HOLDEM_SIM_BREAK_AFTER");
    }
    assert_eq!(code, 130);
    assert!(String::from_utf8(out).unwrap().contains("Interrupted: saved 3/10"));
    assert_eq!(read_records(&path).len(), 3);
}

#[test]
#[serial]
fn sim_rejects_zero_hands() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["holdem", "sim", "--hands", "0"], &mut out, &mut err);
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("hands must be >= 1"));
}

#[test]
#[serial]
fn sim_rejects_unknown_policy() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        ["holdem", "sim", "--hands", "1", "--ai", "oracle"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("oracle"));
}
