use clap::{Args, ValueEnum};
use omnicloud_client::{
    Alert, Application, AuditLog, Build, Deployment, Instance, OmniCloudClient, PlatformId,
    Provider, Region, Resource,
};
use omnicloud_dashboard::{DashboardOptions, DashboardState, FilterField, ListView};
use serde::Serialize;
use serde_json::{Value, json};

use super::{Session, print_json};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Alerts,
    Applications,
    AuditLogs,
    Builds,
    Deployments,
    Instances,
    Providers,
    Regions,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub resource: ResourceKind,
    /// 0-based page number
    #[arg(long, default_value_t = 0)]
    pub page: u64,
    #[arg(long, default_value_t = 10)]
    pub per_page: u64,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub severity: Option<String>,
}

impl ListArgs {
    fn dashboard_state(&self) -> DashboardState {
        let mut state = DashboardState::with_options(
            DashboardOptions::new("all".to_string()).with_page_size(self.per_page),
        );
        if let Some(search) = &self.search {
            state.set_search_query(search.clone());
        }
        if let Some(status) = &self.status {
            state.set_filter(FilterField::Status, status.clone());
        }
        if let Some(severity) = &self.severity {
            state.set_filter(FilterField::Severity, severity.clone());
        }
        state.set_page(self.page);
        state
    }
}

pub async fn list(session: &Session, args: ListArgs) -> anyhow::Result<()> {
    let platform_id = session.platform_id().await?;
    let client = &session.client;
    let state = args.dashboard_state();

    let output = match args.resource {
        ResourceKind::Alerts => fetch_page::<Alert>(client, platform_id, state).await?,
        ResourceKind::Applications => fetch_page::<Application>(client, platform_id, state).await?,
        ResourceKind::AuditLogs => fetch_page::<AuditLog>(client, platform_id, state).await?,
        ResourceKind::Builds => fetch_page::<Build>(client, platform_id, state).await?,
        ResourceKind::Deployments => fetch_page::<Deployment>(client, platform_id, state).await?,
        ResourceKind::Instances => fetch_page::<Instance>(client, platform_id, state).await?,
        ResourceKind::Providers => fetch_page::<Provider>(client, platform_id, state).await?,
        ResourceKind::Regions => fetch_page::<Region>(client, platform_id, state).await?,
    };
    print_json(&output)
}

async fn fetch_page<R>(
    client: &OmniCloudClient,
    platform_id: PlatformId,
    state: DashboardState,
) -> anyhow::Result<Value>
where
    R: Resource + Clone + Serialize,
{
    let view = ListView::fixed(client.resource::<R>(platform_id), state);
    view.fetch().await?;
    Ok(json!({
        (R::COLLECTION_KEY): view.items(),
        "pagination": view.pagination(),
    }))
}

pub async fn get(session: &Session, resource: ResourceKind, id: String) -> anyhow::Result<()> {
    let platform_id = session.platform_id().await?;
    let client = &session.client;

    let output = match resource {
        ResourceKind::Alerts => fetch_one::<Alert>(client, platform_id, id).await?,
        ResourceKind::Applications => fetch_one::<Application>(client, platform_id, id).await?,
        ResourceKind::AuditLogs => fetch_one::<AuditLog>(client, platform_id, id).await?,
        ResourceKind::Builds => fetch_one::<Build>(client, platform_id, id).await?,
        ResourceKind::Deployments => fetch_one::<Deployment>(client, platform_id, id).await?,
        ResourceKind::Instances => fetch_one::<Instance>(client, platform_id, id).await?,
        ResourceKind::Providers => fetch_one::<Provider>(client, platform_id, id).await?,
        ResourceKind::Regions => fetch_one::<Region>(client, platform_id, id).await?,
    };
    print_json(&output)
}

async fn fetch_one<R>(
    client: &OmniCloudClient,
    platform_id: PlatformId,
    id: String,
) -> anyhow::Result<Value>
where
    R: Resource + Serialize,
{
    let record: R = client.resource::<R>(platform_id).get(id).await?;
    Ok(serde_json::to_value(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_to_params() {
        let args = ListArgs {
            resource: ResourceKind::Alerts,
            page: 2,
            per_page: 25,
            search: Some("disk".to_string()),
            status: None,
            severity: Some("critical".to_string()),
        };
        let params = args.dashboard_state().list_params();
        let query = params.to_query();

        assert!(query.contains(&("page".to_string(), "2".to_string())));
        assert!(query.contains(&("per_page".to_string(), "25".to_string())));
        assert!(query.contains(&("search".to_string(), "disk".to_string())));
        assert!(query.contains(&("severity".to_string(), "critical".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "status"));
    }
}
