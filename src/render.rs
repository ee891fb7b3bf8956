//! Purpose: Format observed key/type pairs as output lines.
//! Exports: `OutputFormat`, `render_pair`, `render_pairs`.
//! Role: Small, pure formatter used by the CLI emission path.
//! Invariants: One line per pair, no trailing newline inside a line.
//! Invariants: ANSI escapes appear only in text format and only when enabled.
use serde::Serialize;

use crate::scan::{KeyTypePair, ObservedPairs};

// Conservative 8-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_TAG: &str = "33";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// `("key", tag)`
    #[default]
    Text,
    /// `{"key":"key","type":"tag"}`
    Jsonl,
}

#[derive(Serialize)]
struct PairRecord<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    tag: &'static str,
}

pub fn render_pair(pair: &KeyTypePair, format: OutputFormat, use_color: bool) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            out.push('(');
            push_colored(&encode_str(&pair.key), COLOR_KEY, use_color, &mut out);
            out.push_str(", ");
            push_colored(pair.tag.as_str(), COLOR_TAG, use_color, &mut out);
            out.push(')');
            out
        }
        OutputFormat::Jsonl => {
            let record = PairRecord {
                key: &pair.key,
                tag: pair.tag.as_str(),
            };
            serde_json::to_string(&record)
                .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
        }
    }
}

pub fn render_pairs(pairs: &ObservedPairs, format: OutputFormat, use_color: bool) -> Vec<String> {
    pairs
        .iter()
        .map(|pair| render_pair(pair, format, use_color))
        .collect()
}

fn encode_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}
