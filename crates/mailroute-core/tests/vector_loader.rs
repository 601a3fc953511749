//! JSON test vector loader shared by policy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use mailroute_core::MessageEnvelope;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub document: serde_json::Value,
    pub message: MessageEnvelope,
    pub expect: serde_json::Value,
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("bad vector {name}: {e}"))
}

/// Every vector file in `tests/vectors`, sorted.
pub fn all_names() -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir("tests/vectors")
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".json"))
        .collect();
    names.sort();
    names
}
