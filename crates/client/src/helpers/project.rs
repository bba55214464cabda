//! Project helpers (`project.project`)

use odoo_domain::constants::PROJECT_MODEL;
use odoo_domain::{RecordId, Result};
use serde_json::{json, Value};

use crate::client::OdooClient;

impl OdooClient {
    /// Create a project and return its id.
    pub async fn create_project(&self, values: Value) -> Result<RecordId> {
        self.create(PROJECT_MODEL, values).await
    }

    /// Write values on a project.
    pub async fn update_project(&self, project_id: RecordId, values: Value) -> Result<bool> {
        self.update(PROJECT_MODEL, &[project_id], values).await
    }

    /// Hard-delete a project. Prefer [`OdooClient::archive_project`] when
    /// tasks and timesheets should survive.
    pub async fn delete_project(&self, project_id: RecordId) -> Result<bool> {
        self.delete(PROJECT_MODEL, &[project_id]).await
    }

    /// Archive (`active = false`) or re-activate a project.
    pub async fn archive_project(&self, project_id: RecordId, active: bool) -> Result<bool> {
        self.update_project(project_id, json!({"active": active})).await
    }
}
