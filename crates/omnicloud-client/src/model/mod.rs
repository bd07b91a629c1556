// Model types for OmniCloud API requests and responses

pub mod alert;
pub mod application;
pub mod audit;
pub mod build;
pub mod common;
pub mod deployment;
pub mod instance;
pub mod lenient;
pub mod platform;
pub mod provider;
pub mod region;
pub mod status;

pub use alert::{AcknowledgeAlert, Alert, EscalateAlert, ResolveAlert};
pub use application::{Application, DeployApplication, NewApplication};
pub use audit::AuditLog;
pub use build::{Build, BuildLogs};
pub use common::{
    DEFAULT_PER_PAGE, ListParams, PaginatedResponse, PaginationInfo, RecordId, total_pages,
};
pub use deployment::{Deployment, NewDeployment, RollbackDeployment};
pub use instance::{Instance, NewInstance};
pub use platform::{Platform, PlatformId};
pub use provider::{NewProvider, Provider};
pub use region::{NewRegion, Region};
pub use status::{
    AlertSeverity, AlertStatus, ApplicationStatus, AuditSeverity, BuildStatus, DeploymentStatus,
    InstanceStatus, ProviderStatus, RegionStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_deserialization() {
        let json = r#"{
            "id": 11,
            "name": "HighCPU",
            "message": "CPU above 90%",
            "severity": "CRITICAL",
            "status": "firing",
            "region": "us-east-1",
            "created_at": "2024-05-01T10:00:00Z",
            "metadata": {"threshold": 90}
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id, RecordId::from(11));
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(alert.metadata["threshold"], 90);
        assert!(alert.acknowledged_at.is_none());
    }

    #[test]
    fn test_provider_type_field_rename() {
        let provider: Provider =
            serde_json::from_str(r#"{"id":1,"name":"aws-main","type":"aws","status":"Active"}"#)
                .unwrap();
        assert_eq!(provider.provider_type, "aws");
        assert_eq!(provider.status, ProviderStatus::Active);

        let body = serde_json::to_value(NewProvider {
            name: "gcp".to_string(),
            provider_type: "gcp".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body["type"], "gcp");
        assert!(body.get("config").is_none());
    }

    #[test]
    fn test_optional_request_fields_are_skipped() {
        let body = serde_json::to_value(AcknowledgeAlert {
            acknowledged_by: Some("ops@example.com".to_string()),
            note: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"acknowledged_by": "ops@example.com"}));
    }

    #[test]
    fn test_records_tolerate_nulls_and_naive_timestamps() {
        let json = r#"{
            "id": "a1b2",
            "name": null,
            "message": null,
            "severity": null,
            "metadata": null,
            "created_at": "2024-05-01T10:00:00",
            "resolved_at": "not a date"
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id, "a1b2");
        assert!(alert.name.is_empty());
        assert!(alert.metadata.is_empty());
        assert_eq!(
            alert.created_at,
            Some("2024-05-01T10:00:00Z".parse().unwrap())
        );
        assert!(alert.resolved_at.is_none());

        let build: Build = serde_json::from_str(
            r#"{"id":5,"application_id":"app-9","artifacts":null,"started_at":1714557600}"#,
        )
        .unwrap();
        assert_eq!(build.id, RecordId::from(5));
        assert_eq!(build.application_id, Some(RecordId::from("app-9")));
        assert!(build.artifacts.is_empty());
        assert!(build.started_at.is_some());

        let deployment: Deployment =
            serde_json::from_str(r#"{"id":1,"target_instances":null,"healthy_instances":2}"#)
                .unwrap();
        assert_eq!(deployment.target_instances, 0);
        assert_eq!(deployment.healthy_instances, 2);
    }

    #[test]
    fn test_instance_with_unknown_status() {
        let instance: Instance =
            serde_json::from_str(r#"{"id":4,"name":"web-1","status":"hibernating"}"#).unwrap();
        assert_eq!(
            instance.status,
            InstanceStatus::Other("hibernating".to_string())
        );
        assert_eq!(instance.status.label(), "hibernating");
    }
}
