//! OmniCloud Client API Tests
//!
//! Exercise the resource clients against a wiremock server.

use std::sync::Arc;

use omnicloud_client::{
    AcknowledgeAlert, AlertSeverity, AlertStatus, BuildStatus, ClientConfig, ClientError,
    DeployApplication, InstanceStatus, ListParams, MemoryStore, Method, NewDeployment,
    OmniCloudClient, PlatformId, RecordId, RequestOptions, TOKEN_KEY,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, OmniCloudClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(&format!("{}/api/v1", server.uri()));
    let client = OmniCloudClient::new(config, Arc::new(MemoryStore::new())).unwrap();
    (server, client)
}

// ============== List normalization ==============

#[tokio::test]
async fn test_list_builds_without_pagination() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/1/builds"))
        .and(query_param("page", "0"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "builds": [
                {"id": 1, "status": "success"},
                {"id": 2, "status": "running"},
                {"id": 3, "status": "failed"}
            ],
            "pagination": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .builds(1)
        .list(&ListParams::new(0, 10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 3);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.total_count, 3);
    assert_eq!(page.pagination.per_page, 10);
    assert_eq!(page.data[0].status, BuildStatus::Succeeded);
}

#[tokio::test]
async fn test_list_alerts_with_pagination_and_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/7/alerts"))
        .and(query_param("page", "2"))
        .and(query_param("severity", "critical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alerts": [{"id": 9, "name": "DiskFull", "severity": "critical", "status": "active"}],
            "pagination": {"page": 2, "per_page": 5, "total_count": 11, "total_pages": 3}
        })))
        .mount(&server)
        .await;

    let params = ListParams::new(2, 5).with_param("severity", "critical");
    let page = client.alerts(7).list(&params).await.unwrap();

    assert_eq!(page.data[0].severity, AlertSeverity::Critical);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages, 3);
}

#[tokio::test]
async fn test_list_bare_array_response() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/1/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "US East", "code": "us-east-1"},
            {"id": 2, "name": "EU West", "code": "eu-west-1"}
        ])))
        .mount(&server)
        .await;

    let page = client.regions(1).list(&ListParams::default()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.page, 0);
    assert_eq!(page.pagination.total_pages, 1);
}

// ============== Errors ==============

#[tokio::test]
async fn test_list_tolerates_nulls_and_loose_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/1/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alerts": [
                {
                    "id": 1,
                    "name": null,
                    "metadata": null,
                    "severity": "warning",
                    "created_at": "2024-05-01T10:00:00"
                },
                {"id": "a1b2", "name": "DiskFull", "created_at": "2024-05-01 10:00:00"}
            ]
        })))
        .mount(&server)
        .await;

    let page = client
        .alerts(1)
        .list(&ListParams::default())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0].id, RecordId::from(1));
    assert!(page.data[0].name.is_empty());
    assert!(page.data[0].metadata.is_empty());
    assert_eq!(page.data[0].created_at, page.data[1].created_at);
    assert!(page.data[0].created_at.is_some());
    assert_eq!(page.data[1].id, "a1b2");
}

#[tokio::test]
async fn test_get_missing_record_is_request_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/1/deployments/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.deployments(1).get(404).await.unwrap_err();
    match err {
        ClientError::Request {
            status,
            status_text,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/1/instances"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .instances(1)
        .list(&ListParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = OmniCloudClient::new(
        ClientConfig::new("http://127.0.0.1:1/api/v1"),
        Arc::new(MemoryStore::new()),
    )
    .unwrap();

    let err = client
        .alerts(1)
        .list(&ListParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

// ============== Mutations and actions ==============

#[tokio::test]
async fn test_acknowledge_alert_returns_server_representation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/platform/3/alerts/12/acknowledge"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"acknowledged_by": "ops"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "status": "acknowledged",
            "acknowledged_by": "ops"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let alert = client
        .alerts(3)
        .acknowledge(
            12,
            &AcknowledgeAlert {
                acknowledged_by: Some("ops".to_string()),
                note: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(alert.status, AlertStatus::Acknowledged);
    assert_eq!(alert.acknowledged_by.as_deref(), Some("ops"));
}

#[tokio::test]
async fn test_cancel_build() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/platform/1/builds/5/cancel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 5, "status": "cancelled"})),
        )
        .mount(&server)
        .await;

    let build = client.builds(1).cancel(5).await.unwrap();
    assert_eq!(build.status, BuildStatus::Cancelled);
}

#[tokio::test]
async fn test_create_deployment_and_delete_instance() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/platform/2/deployments"))
        .and(body_json(json!({"application_id": 4, "environment": "staging"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 30, "application_id": 4, "environment": "staging", "status": "pending"
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/platform/2/instances/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let deployment = client
        .deployments(2)
        .create(&NewDeployment {
            application_id: 4,
            environment: Some("staging".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(deployment.id, RecordId::from(30));

    let deleted = client.instances(2).delete(8).await.unwrap();
    assert!(deleted.is_none());
}

#[tokio::test]
async fn test_delete_returns_server_representation() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/platform/2/instances/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "name": "worker-3", "status": "terminated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client.instances(2).delete(9).await.unwrap().unwrap();
    assert_eq!(deleted.id, RecordId::from(9));
    assert_eq!(deleted.name, "worker-3");
    assert_eq!(deleted.status, InstanceStatus::Terminated);
}

#[tokio::test]
async fn test_deploy_application_returns_deployment() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/platform/1/applications/6/deploy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77, "application_id": 6, "status": "in_progress"
        })))
        .mount(&server)
        .await;

    let deployment = client
        .applications(1)
        .deploy(6, &DeployApplication::default())
        .await
        .unwrap();
    assert_eq!(deployment.id, RecordId::from(77));
    assert_eq!(deployment.application_id, Some(RecordId::from(6)));
}

#[tokio::test]
async fn test_set_platform_id_rebinds_client() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platform/9/instances/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "status": "RUNNING"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut instances = client.instances(1);
    instances.set_platform_id(9);
    assert_eq!(instances.platform_id(), &PlatformId::from(9));

    let instance = instances.get(1).await.unwrap();
    assert_eq!(instance.status, InstanceStatus::Running);
}

#[tokio::test]
async fn test_request_options_override_method_and_headers() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/platform/1/applications/2"))
        .and(header("x-request-source", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .with_method(Method::PATCH)
        .with_header("X-Request-Source", "cli")
        .with_json(&json!({"name": "renamed"}))
        .unwrap();
    let value: serde_json::Value = client
        .http()
        .request(
            Method::POST,
            &PlatformId::from(1),
            "/applications/2",
            options,
        )
        .await
        .unwrap();
    assert_eq!(value["id"], 2);
}

// ============== Platforms ==============

#[tokio::test]
async fn test_platform_list_sends_bearer_token() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "tok-123")]));
    let client =
        OmniCloudClient::new(ClientConfig::new(&format!("{}/api/v1", server.uri())), store)
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "platforms": [{"id": 5, "name": "five"}, {"id": 2, "name": "two"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let platforms = client.platforms().list().await.unwrap();
    assert_eq!(platforms.len(), 2);
    assert_eq!(platforms[1].name, "two");
}
