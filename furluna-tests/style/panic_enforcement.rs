//! Panic Enforcement
//!
//! Production code propagates errors instead of calling unwrap()/expect().
//! Test modules are exempt.

use super::sources::production_sources;

const FORBIDDEN: &[&str] = &[".unwrap()", ".expect("];

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let mut violations = Vec::new();
    for source in production_sources() {
        for (index, line) in source.code.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            if FORBIDDEN.iter().any(|pattern| trimmed.contains(pattern)) {
                violations.push(format!("{}:{}: {}", source.path.display(), index + 1, trimmed));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "unwrap()/expect() in production code:\n{}",
        violations.join("\n")
    );
}
