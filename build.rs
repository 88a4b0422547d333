use grep::regex::RegexMatcher;
use grep::searcher::{Searcher, Sink, SinkMatch};
use std::error::Error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[path = "build/lint.rs"]
mod lint;

// Only the crate's own sources are policed.
const SOURCE_ROOTS: [&str; 3] = ["ampute", "tests", "benches"];

// Collects the matching lines of one file and renders them into a build error.
struct ViolationCollector {
    violations: Vec<String>,
    file_path: PathBuf,
    code_only: bool,
}

impl ViolationCollector {
    fn new(file_path: &Path, code_only: bool) -> Self {
        Self {
            violations: Vec::new(),
            file_path: file_path.to_path_buf(),
            code_only,
        }
    }

    fn check_and_get_error_message(&self, rule: &str) -> Option<String> {
        if self.violations.is_empty() {
            return None;
        }

        let file_name = self.file_path.to_str().unwrap_or("?");
        let mut error_msg = format!(
            "\n❌ ERROR: Found {} {} in {}:\n",
            self.violations.len(),
            rule,
            file_name
        );
        for violation in &self.violations {
            error_msg.push_str(&format!("   {violation}\n"));
        }
        error_msg.push_str(&format!(
            "\n⚠️ {rule} are STRICTLY FORBIDDEN in this project.\n"
        ));
        Some(error_msg)
    }
}

impl Sink for ViolationCollector {
    type Error = std::io::Error;

    fn matched(&mut self, _: &Searcher, mat: &SinkMatch) -> Result<bool, Self::Error> {
        let line_number = mat.line_number().unwrap_or(0);
        let line_text = std::str::from_utf8(mat.bytes()).unwrap_or("").trim_end();

        if self.code_only && !lint::has_underscore_binding(line_text) {
            return Ok(true);
        }

        self.violations.push(format!("{line_number}:{line_text}"));
        Ok(true)
    }
}

fn rust_sources() -> Vec<PathBuf> {
    SOURCE_ROOTS
        .iter()
        .flat_map(|root| WalkDir::new(root).into_iter().filter_map(|e| e.ok()))
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn scan(pattern: &str, rule: &str, code_only: bool) -> Result<(), Box<dyn Error>> {
    let matcher = RegexMatcher::new_line_matcher(pattern)?;
    let mut searcher = Searcher::new();

    for path in rust_sources() {
        let mut collector = ViolationCollector::new(&path, code_only);
        searcher.search_path(&matcher, &path, &mut collector)?;
        if let Some(error_message) = collector.check_and_get_error_message(rule) {
            return Err(error_message.into());
        }
    }
    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/lint.rs");
    for root in SOURCE_ROOTS {
        println!("cargo:rerun-if-changed={root}");
    }

    let checks = [
        (
            r"\b(_[a-zA-Z0-9_]+)\b",
            "underscore-prefixed variables",
            true,
        ),
        (
            r"(//|/\*).*(?:FIXED|CORRECTED|FIXES|FIX|CHANGED|CHANGES|CHANGE|UPDATED|UPDATES|UPDATE)",
            "comments narrating edits",
            false,
        ),
        (
            r"#\s*\[\s*allow\s*\(\s*dead_code\s*\)\s*\]",
            "#[allow(dead_code)] attributes",
            false,
        ),
    ];

    for (pattern, rule, code_only) in checks {
        if let Err(e) = scan(pattern, rule, code_only) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
