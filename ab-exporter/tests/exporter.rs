//! Registry construction and the HTTP scrape path over real stores.

mod common;

use std::sync::Arc;

use ab_exporter::api::{ApiServer, ApiServerConfig, AppState};
use ab_exporter::config::ExporterConfig;
use ab_exporter::discovery::{ACTIVE_BACKUP_ACTIVITY_DB, GSUITE_LOG_DB};
use ab_exporter::{Error, build_registry};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::{DataDir, TaskRun};

fn config_for(data: &DataDir) -> ExporterConfig {
    ExporterConfig {
        data_dir: data.path().to_path_buf(),
        ..ExporterConfig::default()
    }
}

async fn populated() -> DataDir {
    let data = DataDir::new();
    data.create_active_backup().await;
    data.insert_device_result(1, "dev-A", 2, 100, 200, 2048).await;
    data.create_gsuite().await;
    data.insert_task_name(1, Some("Mailboxes")).await;
    data.insert_task_run(&TaskRun {
        job_execution_id: 1,
        task_id: 1,
        execution_status: 2,
        end_run_time: 300,
        transfered_size: 512,
        ..TaskRun::default()
    })
    .await;
    data
}

async fn scrape(state: AppState, uri: &str) -> (StatusCode, String) {
    let server = ApiServer::with_state(ApiServerConfig::default(), state);
    let response = server
        .build_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_registry_with_both_packages() {
    let data = populated().await;
    let registry = build_registry(&config_for(&data)).await.unwrap();

    assert_eq!(registry.collector_names(), vec!["active_backup", "gsuite"]);
    assert_eq!(registry.descriptors().count(), 4 + 25);
}

#[tokio::test]
async fn test_no_packages_is_an_error() {
    let data = DataDir::new();
    let err = build_registry(&config_for(&data)).await.err().unwrap();
    assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("no ActiveBackup software detected")));
}

#[tokio::test]
async fn test_disabled_package_not_registered() {
    let data = populated().await;
    let mut config = config_for(&data);
    config.gsuite.enabled = false;

    let registry = build_registry(&config).await.unwrap();
    assert_eq!(registry.collector_names(), vec!["active_backup"]);
}

#[tokio::test]
async fn test_unavailable_package_skipped_sibling_scrapes() {
    let data = populated().await;
    // GSuite is detected by its config store but the log store is gone.
    std::fs::remove_file(data.store_path(GSUITE_LOG_DB)).unwrap();

    let registry = build_registry(&config_for(&data)).await.unwrap();
    assert_eq!(registry.collector_names(), vec!["active_backup"]);

    let (status, body) = scrape(AppState::new(Arc::new(registry)), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ab_business_device_result_transferred_bytes{device_name=\"dev-A\"} 2048\n"));
    assert!(!body.contains("ab_gsuite_"));
}

#[tokio::test]
async fn test_metrics_endpoint_end_to_end() {
    let data = populated().await;
    let registry = build_registry(&config_for(&data)).await.unwrap();

    let (status, body) = scrape(AppState::new(Arc::new(registry)), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# TYPE ab_business_device_result_status gauge\n"));
    assert!(body.contains("ab_business_device_result_status{device_name=\"dev-A\"} 2\n"));
    assert!(body.contains("ab_gsuite_task_result_transferred_bytes{task_name=\"Mailboxes\"} 512\n"));
    assert!(body.contains("ab_exporter_collector_up{collector=\"active_backup\"} 1\n"));
    assert!(body.contains("ab_exporter_collector_up{collector=\"gsuite\"} 1\n"));
}

#[tokio::test]
async fn test_store_lost_after_startup() {
    let data = populated().await;
    let registry = Arc::new(build_registry(&config_for(&data)).await.unwrap());

    std::fs::remove_file(data.store_path(ACTIVE_BACKUP_ACTIVITY_DB)).unwrap();
    let (status, body) = scrape(AppState::new(registry.clone()), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ab_exporter_collector_up{collector=\"active_backup\"} 0\n"));
    assert!(body.contains("ab_exporter_collector_up{collector=\"gsuite\"} 1\n"));

    std::fs::remove_file(data.store_path(GSUITE_LOG_DB)).unwrap();
    let (status, _) = scrape(AppState::new(registry.clone()), "/metrics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = scrape(AppState::new(registry), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("active_backup"));
}
