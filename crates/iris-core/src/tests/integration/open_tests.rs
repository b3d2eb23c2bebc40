use super::common::setup_app;
use crate::io::{LayerKind, ReadError};
use crate::kernel::error::Error;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manager::ReaderManager;
use crate::viewer::OpenOptions;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_open_real_file_skips_failing_hook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tracks.pts");
    fs::write(&path, "1 2\n3 4\n\n5 6\n").unwrap();

    let mut app = setup_app().await;
    let added = app
        .viewer_mut()
        .open_path(path.as_path(), &OpenOptions::default())
        .await
        .unwrap();

    assert_eq!(added, vec!["tracks"]);
    let layer = app.viewer().layers().get("tracks").unwrap();
    assert_eq!(layer.kind, LayerKind::Points);
    assert_eq!(layer.data.shape(), &[3, 2]);
    assert_eq!(layer.data.get(&[2, 1]), Some(6.0));
    assert_eq!(layer.metadata.get("size"), Some(&json!(2.0)));
    assert_eq!(layer.source.reader_plugin.as_deref(), Some("points-text"));
}

#[tokio::test]
async fn test_stacked_list_gives_layer_per_file() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.pts");
    let b = dir.path().join("b.pts");
    fs::write(&a, "0 0 0\n").unwrap();
    fs::write(&b, "1 1 1\n2 2 2\n").unwrap();

    let mut app = setup_app().await;
    let options = OpenOptions {
        stack: true,
        ..OpenOptions::default()
    };
    let added = app
        .viewer_mut()
        .open_path(vec![a, b], &options)
        .await
        .unwrap();

    // One loader call; both records are named after the first path
    assert_eq!(added, vec!["a", "a [1]"]);
    assert_eq!(app.viewer().layers().get("a [1]").unwrap().data.shape(), &[2, 3]);
}

#[tokio::test]
async fn test_missing_file_fails_in_loader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.pts");

    let mut app = setup_app().await;
    let err = app
        .viewer_mut()
        .open_path(path.as_path(), &OpenOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::PluginSystem(PluginSystemError::ReaderFailed {
            ref plugin_id,
            source: ReadError::Io { .. },
            ..
        }) if plugin_id == "points-text"
    ));
    assert!(app.viewer().layers().is_empty());
}

#[tokio::test]
async fn test_malformed_file_reports_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.pts");
    fs::write(&path, "1 2\n3 x\n").unwrap();

    let mut app = setup_app().await;
    let err = app
        .viewer_mut()
        .open_path(path.as_path(), &OpenOptions::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("line 2"), "got: {}", err);
}

#[tokio::test]
async fn test_unclaimed_path_lists_hook_errors() {
    let app = setup_app().await;
    let err = app
        .reader_manager()
        .get_reader(&"notes.md".into(), None)
        .await
        .unwrap_err();

    match err {
        PluginSystemError::NoReaderFound { path, errors } => {
            assert_eq!(path, "notes.md");
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].plugin_id, "broken");
        }
        other => panic!("unexpected error: {other}"),
    }
}
