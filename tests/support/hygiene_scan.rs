//! Source scanner shared by the per-crate hygiene tests.
//!
//! Each crate's `tests/hygiene.rs` pulls this in with `#[path]` and states its
//! own [`Budgets`]. `*_test.rs` files and trailing inline `#[cfg(test)] mod`
//! blocks are not scanned.

use std::fs;
use std::path::Path;

/// Ceilings per antipattern. A budget never grows.
pub struct Budgets {
    pub unwrap: usize,
    pub expect: usize,
    pub panic: usize,
    pub unreachable: usize,
    pub todo: usize,
    pub unimplemented: usize,
    pub silent_discard: usize,
    pub dot_ok: usize,
    pub allow_dead_code: usize,
}

impl Budgets {
    pub const ZERO: Self = Self {
        unwrap: 0,
        expect: 0,
        panic: 0,
        unreachable: 0,
        todo: 0,
        unimplemented: 0,
        silent_discard: 0,
        dot_ok: 0,
        allow_dead_code: 0,
    };

    /// Pattern, label and ceiling for every tracked antipattern.
    pub fn rules(&self) -> [(&'static str, &'static str, usize); 9] {
        [
            (".unwrap()", ".unwrap()", self.unwrap),
            (".expect(", ".expect()", self.expect),
            ("panic!(", "panic!()", self.panic),
            ("unreachable!(", "unreachable!()", self.unreachable),
            ("todo!(", "todo!()", self.todo),
            ("unimplemented!(", "unimplemented!()", self.unimplemented),
            ("let _ =", "let _ =", self.silent_discard),
            (".ok()", ".ok()", self.dot_ok),
            ("#[allow(dead_code)]", "#[allow(dead_code)]", self.allow_dead_code),
        ]
    }
}

pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// Collect production `.rs` files from `src/`, excluding test files.
pub fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if name == "target" || name == "tests" {
                continue;
            }
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content: production_part(&content) });
            }
        }
    }
}

/// Everything before the first inline test module.
pub fn production_part(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let end = lines
        .windows(2)
        .position(|w| {
            let next = w[1].trim_start();
            w[0].trim() == "#[cfg(test)]" && (next.starts_with("mod ") || next.starts_with("pub mod ")) && next.ends_with('{')
        })
        .unwrap_or(lines.len());
    lines[..end].join("\n")
}

pub fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn total(hits: &[(String, usize)]) -> usize {
    hits.iter().map(|(_, c)| c).sum()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every pattern over its ceiling, one report line block per pattern.
pub fn violations(files: &[SourceFile], budgets: &Budgets) -> Vec<String> {
    budgets
        .rules()
        .into_iter()
        .filter_map(|(pattern, label, max)| {
            let hits = count_in_source(files, pattern);
            let count = total(&hits);
            (count > max).then(|| format!("{label} budget exceeded: found {count}, max {max}.\n{}", format_hits(&hits)))
        })
        .collect()
}

/// Scan this crate's `src/` and fail with every exceeded budget.
pub fn enforce(budgets: &Budgets) {
    let failures = violations(&source_files(), budgets);
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
