use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn flowgrade() -> Command {
    cargo_bin_cmd!("flowgrade")
}

/// start -> init -> check -> increment -> print -> end
#[allow(dead_code)]
pub const LINEAR_CHAIN: &str = r#"{
  "nodes": [
    {"id": "start", "type": "start", "text": "Start"},
    {"id": "init", "type": "process", "text": "Set i = 0"},
    {"id": "check", "type": "decision", "text": "Is i < 10?"},
    {"id": "increment", "type": "process", "text": "Increment i"},
    {"id": "print", "type": "output", "text": "Print i"},
    {"id": "end", "type": "end", "text": "End"}
  ],
  "edges": [
    {"from": "start", "to": "init"},
    {"from": "init", "to": "check"},
    {"from": "check", "to": "increment"},
    {"from": "increment", "to": "print"},
    {"from": "print", "to": "end"}
  ]
}"#;

/// Counting loop with a back edge from inc to check
#[allow(dead_code)]
pub const COUNTING_LOOP: &str = r#"{
  "nodes": [
    {"id": "start", "type": "start", "text": "Start"},
    {"id": "init", "type": "process", "text": "Set i = 0"},
    {"id": "check", "type": "decision", "text": "Is i < 10?"},
    {"id": "print", "type": "output", "text": "Print i"},
    {"id": "inc", "type": "process", "text": "Increment i"},
    {"id": "end", "type": "end", "text": "End"}
  ],
  "edges": [
    {"from": "start", "to": "init"},
    {"from": "init", "to": "check"},
    {"from": "check", "to": "print", "condition": "yes"},
    {"from": "print", "to": "inc"},
    {"from": "inc", "to": "check"},
    {"from": "check", "to": "end", "condition": "no"}
  ]
}"#;

#[allow(dead_code)]
pub const TWO_STARTS: &str = r#"{
  "nodes": [
    {"id": "a", "type": "start", "text": "Start A"},
    {"id": "b", "type": "start", "text": "Start B"},
    {"id": "p", "type": "process", "text": "Print i"},
    {"id": "e", "type": "end", "text": "End"}
  ],
  "edges": [
    {"from": "a", "to": "p"},
    {"from": "b", "to": "p"},
    {"from": "p", "to": "e"}
  ]
}"#;

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}
