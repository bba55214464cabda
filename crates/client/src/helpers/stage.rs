//! Kanban stage helpers (`project.task.type`)

use odoo_domain::constants::STAGE_MODEL;
use odoo_domain::{RecordId, Result};
use serde_json::{json, Value};

use crate::client::OdooClient;

/// Sequence and fold settings for a new stage.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Position of the column on the board
    pub sequence: u32,
    /// Whether the column starts collapsed
    pub fold: bool,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self { sequence: 10, fold: false }
    }
}

impl OdooClient {
    /// Create a kanban column linked to a single project.
    ///
    /// The link uses the relational-add directive `(4, project_id)` so the
    /// stage is attached without touching the project's other stages.
    pub async fn create_stage(
        &self,
        project_id: RecordId,
        name: &str,
        options: &StageOptions,
    ) -> Result<RecordId> {
        self.create(
            STAGE_MODEL,
            json!({
                "name": name,
                "sequence": options.sequence,
                "fold": options.fold,
                "project_ids": [[4, project_id]],
            }),
        )
        .await
    }

    /// Write values on a stage (rename, reorder, fold, ...).
    pub async fn update_stage(&self, stage_id: RecordId, values: Value) -> Result<bool> {
        self.update(STAGE_MODEL, &[stage_id], values).await
    }

    /// Archive or re-activate a stage without deleting it. Useful when
    /// tasks are still attached, since the remote blocks deletion of
    /// non-empty columns.
    pub async fn archive_stage(&self, stage_id: RecordId, active: bool) -> Result<bool> {
        self.update(STAGE_MODEL, &[stage_id], json!({"active": active})).await
    }

    /// Delete a column. Migrate its tasks first (see
    /// [`OdooClient::move_task`]) — the remote refuses to delete a column
    /// that still has tasks.
    pub async fn delete_stage(&self, stage_id: RecordId) -> Result<bool> {
        self.delete(STAGE_MODEL, &[stage_id]).await
    }
}
