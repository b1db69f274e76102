#![allow(dead_code)]

use esi_expr::{Node, format, parse_str, tokenize};

/// Parse then format should reproduce the input exactly.
pub fn roundtrip(input: &str) {
    let node = parse_str(input).expect("parse failed");
    let output = format(&node);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Helper: format an AST, parse it back, assert structural equality.
pub fn assert_ast_roundtrip(original: &Node) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });
    assert_eq!(
        original, &parsed,
        "tree mismatch\n--- formatted ---\n{formatted}"
    );
}

/// Concatenate the `raw` text of every source-mapped token.
pub fn raw_concat(input: &str) -> String {
    tokenize(input, true)
        .expect("tokenize failed")
        .iter()
        .map(|t| t.raw.as_deref().unwrap_or_default())
        .collect()
}
