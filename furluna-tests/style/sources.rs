//! Production source discovery shared by the style checks

use std::fs;
use std::path::{Path, PathBuf};

/// Crates whose `src/` trees hold production code.
const PRODUCTION_CRATES: &[&str] = &["furluna-core", "furluna-search", "furluna-web", "furluna-cli"];

/// A source file with its test module stripped.
pub struct ProductionSource {
    pub path: PathBuf,
    pub code: String,
}

/// Reads every production source file of the workspace.
///
/// Everything from the first `#[cfg(test)]` line on is test code and
/// excluded.
pub fn production_sources() -> Vec<ProductionSource> {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf();

    let mut files = Vec::new();
    for name in PRODUCTION_CRATES {
        collect_rust_files(&workspace.join(name).join("src"), &mut files);
    }
    files.sort();

    files
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).unwrap();
            let code = content
                .lines()
                .take_while(|line| !line.trim().starts_with("#[cfg(test)]"))
                .collect::<Vec<_>>()
                .join("\n");
            ProductionSource { path, code }
        })
        .collect()
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_rust_files(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}
