//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files to verify that each layer only imports
//! from the layers beneath it.

use std::path::{Path, PathBuf};

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Lines of `path` outside `#[cfg(test)]` blocks and comments.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    let mut depth = 0i32;
    let mut test_depth: Option<i32> = None;
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") && test_depth.is_none() {
            test_depth = Some(depth);
        }
        let in_test = test_depth.is_some();
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if test_depth.is_some_and(|d| depth <= d) {
                        test_depth = None;
                    }
                }
                _ => {}
            }
        }
        if !in_test && !trimmed.starts_with("//") && !trimmed.is_empty() {
            lines.push((i + 1, line.to_string()));
        }
    }
    lines
}

fn violations(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let dir = src_dir().join(layer);
    let mut found = Vec::new();
    for file in collect_rs_files(&dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (lineno, line) in production_lines(&file) {
            for pattern in forbidden {
                if line.contains(pattern) {
                    found.push(format!("{rel}:{lineno}: `{pattern}` in: {}", line.trim()));
                }
            }
        }
    }
    found
}

#[test]
fn domain_is_pure() {
    let found = violations(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::net",
            "ureq::",
        ],
    );
    assert!(found.is_empty(), "domain/ must stay pure:\n{}", found.join("\n"));
}

#[test]
fn application_depends_only_on_domain() {
    let found = violations(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "ureq::", "std::fs"],
    );
    assert!(
        found.is_empty(),
        "application/ must go through ports:\n{}",
        found.join("\n")
    );
}

#[test]
fn infra_never_reaches_up() {
    let found = violations("infra", &["crate::commands", "crate::output", "crate::app::"]);
    assert!(found.is_empty(), "infra/ reaches up a layer:\n{}", found.join("\n"));
}

#[test]
fn http_stays_in_the_client() {
    let mut found = Vec::new();
    for file in collect_rs_files(&src_dir()) {
        if file.ends_with("infra/client.rs") {
            continue;
        }
        for (lineno, line) in production_lines(&file) {
            if line.contains("ureq::") {
                found.push(format!("{}:{lineno}: {}", file.display(), line.trim()));
            }
        }
    }
    assert!(found.is_empty(), "ureq used outside infra/client.rs:\n{}", found.join("\n"));
}

#[test]
fn commands_branch_on_output_mode_through_the_context() {
    let found = violations("commands", &["json: bool", "if json", "if !json"]);
    assert!(
        found.is_empty(),
        "use app.is_json() instead of threading a json flag:\n{}",
        found.join("\n")
    );
}
