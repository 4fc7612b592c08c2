use super::*;
use std::io::Write;

#[test]
fn worker_config_defaults() {
    let config = WorkerConfig::default();
    assert_eq!(config.name, "worker");
    assert!(config.depth_cap_override.is_none());
}

#[test]
fn worker_config_parses_partial_toml() {
    let config = WorkerConfig::from_toml("name = \"billing-worker\"\n").expect("parse");
    assert_eq!(config.name, "billing-worker");
    assert!(config.depth_cap_override.is_none());
}

#[test]
fn worker_config_parses_depth_cap_override() {
    let config = WorkerConfig::from_toml("name = \"w\"\ndepth_cap_override = 500\n").expect("parse");
    assert_eq!(config.depth_cap_override, Some(500));
}

#[test]
fn worker_config_loads_from_a_toml_file_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("worker.toml");
    let mut f = std::fs::File::create(&path).expect("create");
    writeln!(f, "name = \"from-file-worker\"\ndepth_cap_override = 42").expect("write");

    let config = WorkerConfig::from_toml_file(&path).expect("load");
    assert_eq!(config.name, "from-file-worker");
    assert_eq!(config.depth_cap_override, Some(42));
}

#[test]
fn worker_config_from_file_reports_a_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist.toml");
    assert!(matches!(WorkerConfig::from_toml_file(&missing), Err(ConfigLoadError::Read { .. })));
}

#[test]
fn publisher_config_defaults() {
    let config = PublisherConfig::default();
    assert_eq!(config.poll_interval, std::time::Duration::from_secs(5));
    assert_eq!(config.batch_size, 100);
}

#[test]
fn publisher_config_parses_toml() {
    let config = PublisherConfig::from_toml(
        "name = \"main-publisher\"\npoll_interval = 10\nbatch_size = 50\n",
    )
    .expect("parse");
    assert_eq!(config.name, "main-publisher");
    assert_eq!(config.poll_interval, std::time::Duration::from_secs(10));
    assert_eq!(config.batch_size, 50);
}
