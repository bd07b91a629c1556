// Audit log queries

use crate::error::Result;
use crate::model::{AuditLog, ListParams};
use crate::resource::{Resource, ResourceClient};

impl Resource for AuditLog {
    const PATH: &'static str = "audit-logs";
    const COLLECTION_KEY: &'static str = "audit_logs";
}

pub type AuditLogsApi = ResourceClient<AuditLog>;

impl ResourceClient<AuditLog> {
    /// Export every audit entry matching the filters as raw JSON records
    pub async fn export(&self, params: &ListParams) -> Result<Vec<serde_json::Value>> {
        let path = format!("{}/export", AuditLog::PATH);
        let query = params.extra.clone();
        let value: serde_json::Value = self
            .http()
            .get_with_query(self.platform_id(), &path, query)
            .await?;
        let page = crate::resource::normalize_list(value, AuditLog::COLLECTION_KEY, params.per_page)?;
        Ok(page.data)
    }
}
