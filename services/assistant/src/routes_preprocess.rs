use axum::{extract::{rejection::JsonRejection, State}, Json};
use dataprep::{build_dataset, scan, write_jsonl, ScanRequest};
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;
use crate::types::{PreprocessRequest, PreprocessResponse};

pub async fn preprocess(
    State(state): State<SharedState>,
    body: Result<Json<PreprocessRequest>, JsonRejection>,
) -> Result<Json<PreprocessResponse>, ApiError> {
    let Json(req) = body?;

    // one scan at a time: every run rewrites the same dataset file
    let _guard = state.scan_lock.lock().await;

    let output = state.config.dataset_path.clone();
    let scan_req = ScanRequest::new(&req.directory_path)
        .with_include(req.file_patterns)
        .with_exclude(req.exclude_patterns);

    info!(root = %req.directory_path, "preprocess: scanning");

    // blocking walk + build + write
    let resp = tokio::task::spawn_blocking(move || -> Result<PreprocessResponse, ApiError> {
        let report = scan(&scan_req)?;
        if report.is_empty() {
            return Err(ApiError::NoFilesMatched);
        }

        let records = build_dataset(&report.files);
        write_jsonl(&output, &records)?;

        Ok(PreprocessResponse {
            message: format!("Data successfully saved to {}", output.display()),
            files: report.files.len(),
            records: records.len(),
            skipped: report.skipped.len(),
        })
    })
    .await??;

    info!(files = resp.files, records = resp.records, skipped = resp.skipped, "preprocess: done");
    Ok(Json(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_state, FakeGateway};
    use std::fs;

    fn request(root: &std::path::Path) -> PreprocessRequest {
        serde_json::from_value(serde_json::json!({ "directory_path": root.to_string_lossy() })).unwrap()
    }

    #[tokio::test]
    async fn test_writes_dataset() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join("a.py"), "def a():\n    pass\n").unwrap();
        fs::write(project.path().join("b.js"), "function b() {\n  c();\n}\n").unwrap();

        let (state, out_dir) = fake_state(FakeGateway::default());
        let Json(resp) = preprocess(State(state.clone()), Ok(Json(request(project.path())))).await.unwrap();

        assert_eq!(resp.files, 2);
        assert_eq!(resp.records, 8);
        assert!(resp.message.starts_with("Data successfully saved to"));

        let text = fs::read_to_string(&state.config.dataset_path).unwrap();
        assert_eq!(text.lines().count(), 8);
        drop(out_dir);
    }

    #[tokio::test]
    async fn test_only_excluded_files_is_client_error_and_writes_nothing() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join("app.min.js"), "x").unwrap();
        fs::create_dir_all(project.path().join("node_modules")).unwrap();
        fs::write(project.path().join("node_modules").join("a.js"), "y").unwrap();

        let (state, _out) = fake_state(FakeGateway::default());
        let err = preprocess(State(state.clone()), Ok(Json(request(project.path())))).await.unwrap_err();

        assert!(matches!(err, ApiError::NoFilesMatched));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(!state.config.dataset_path.exists());
    }

    #[tokio::test]
    async fn test_missing_directory_is_client_error() {
        let (state, _out) = fake_state(FakeGateway::default());
        let req: PreprocessRequest =
            serde_json::from_str(r#"{"directory_path":"/no/such/project/dir"}"#).unwrap();
        let err = preprocess(State(state), Ok(Json(req))).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rescan_replaces_previous_dataset() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join("one.py"), "def one(): pass").unwrap();
        fs::write(project.path().join("two.py"), "def two(): pass").unwrap();

        let (state, _out) = fake_state(FakeGateway::default());
        preprocess(State(state.clone()), Ok(Json(request(project.path())))).await.unwrap();
        let first = fs::read(&state.config.dataset_path).unwrap();

        preprocess(State(state.clone()), Ok(Json(request(project.path())))).await.unwrap();
        assert_eq!(fs::read(&state.config.dataset_path).unwrap(), first);

        fs::remove_file(project.path().join("two.py")).unwrap();
        preprocess(State(state.clone()), Ok(Json(request(project.path())))).await.unwrap();
        let text = fs::read_to_string(&state.config.dataset_path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("two.py"));
    }
}
