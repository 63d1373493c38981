//! Dead Code Enforcement
//!
//! Production code must not contain #[allow(dead_code)] attributes.

use super::sources::production_sources;

#[test]
fn test_no_dead_code_allowances_in_production_code() {
    let sources = production_sources();
    assert!(!sources.is_empty(), "no production sources found");

    let mut violations = Vec::new();
    for source in &sources {
        for (index, line) in source.code.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#[allow(") && trimmed.contains("dead_code") {
                violations.push(format!("{}:{}: {trimmed}", source.path.display(), index + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "dead code allowances in production code:\n{}",
        violations.join("\n")
    );
}
