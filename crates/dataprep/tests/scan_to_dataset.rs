use std::fs;
use std::path::Path;

use dataprep::{build_dataset, scan, write_jsonl, ScanRequest};

fn write(root: &Path, rel: &str, content: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

fn strings(p: &[&str]) -> Vec<String> {
    p.iter().map(|s| s.to_string()).collect()
}

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "app.js", "function main() {\n  run();\n}\n");
    write(root, "src/util.py", "def helper(path):\n    return path\n");
    write(root, "src/deep/mod.ts", "export const id = (x) => x;\n");
    write(root, "node_modules/react/index.js", "module.exports = {};\n");
    write(root, "web/node_modules/lib/index.js", "function lib() {}\n");
    write(root, "build/out.js", "function built() {}\n");
    write(root, "static/app.min.js", "function m(){}\n");
    write(root, "yarn.lock", "# lock\n");
    write(root, "logo.png", "not really a png");
    dir
}

#[test]
fn test_default_patterns_prune_and_filter() {
    let dir = sample_tree();
    let report = scan(&ScanRequest::new(dir.path())).unwrap();

    let paths: Vec<_> = report.files.iter().map(|f| f.file_path.as_str()).collect();
    assert_eq!(paths, vec!["app.js", "src/deep/mod.ts", "src/util.py"]);
    assert!(report.skipped.is_empty());

    let util = report.files.iter().find(|f| f.file_path == "src/util.py").unwrap();
    assert_eq!(util.file_name, "util.py");
    assert_eq!(util.content, "def helper(path):\n    return path\n");
}

#[test]
fn test_pruned_directory_wins_over_include() {
    let dir = sample_tree();
    let req = ScanRequest::new(dir.path())
        .with_include(strings(&["*.js", "**/node_modules/**"]))
        .with_exclude(strings(&["node_modules"]));
    let report = scan(&req).unwrap();

    assert!(report.files.iter().all(|f| !f.file_path.contains("node_modules")));
    assert!(report.files.iter().any(|f| f.file_path == "build/out.js"));
}

#[test]
fn test_bare_directory_name_prunes() {
    let dir = sample_tree();
    let req = ScanRequest::new(dir.path()).with_exclude(strings(&["src"]));
    let report = scan(&req).unwrap();
    assert!(report.files.iter().all(|f| !f.file_path.starts_with("src/")));
    assert!(report.files.iter().any(|f| f.file_path == "app.js"));
}

#[test]
fn test_only_excluded_files_yields_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bundle.min.js", "x");
    write(dir.path(), "node_modules/a/index.js", "y");

    let report = scan(&ScanRequest::new(dir.path())).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_empty_include_matches_nothing() {
    let dir = sample_tree();
    let req = ScanRequest::new(dir.path()).with_include(vec![]);
    assert!(scan(&req).unwrap().is_empty());
}

#[test]
fn test_invalid_pattern_rejected() {
    let dir = sample_tree();
    let req = ScanRequest::new(dir.path()).with_include(strings(&["[oops"]));
    assert!(matches!(scan(&req), Err(dataprep::DataprepError::InvalidPattern { .. })));
}

#[test]
fn test_repeated_scan_is_byte_identical() {
    let dir = sample_tree();
    let out = tempfile::tempdir().unwrap();
    let a = out.path().join("a.jsonl");
    let b = out.path().join("b.jsonl");

    let req = ScanRequest::new(dir.path());
    write_jsonl(&a, &build_dataset(&scan(&req).unwrap().files)).unwrap();
    write_jsonl(&b, &build_dataset(&scan(&req).unwrap().files)).unwrap();

    let a = fs::read(a).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, fs::read(b).unwrap());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "open.py", "def a(): pass");
    write(dir.path(), "locked.py", "def b(): pass");
    let locked = dir.path().join("locked.py");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores permission bits
    if fs::read(&locked).is_ok() {
        return;
    }

    let report = scan(&ScanRequest::new(dir.path())).unwrap();
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].file_path, "open.py");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, "locked.py");
}
