//! Task helpers (`project.task`)

use odoo_domain::constants::TASK_MODEL;
use odoo_domain::{OdooError, RecordId, Result};
use serde_json::{json, Map, Value};

use crate::client::OdooClient;

impl OdooClient {
    /// Create a task and return its id.
    pub async fn create_task(&self, values: Value) -> Result<RecordId> {
        self.create(TASK_MODEL, values).await
    }

    /// Create a task nested under an existing one.
    pub async fn create_subtask(&self, parent_id: RecordId, values: Value) -> Result<RecordId> {
        let mut values = match values {
            Value::Object(map) => map,
            other => {
                return Err(OdooError::InvalidInput(format!(
                    "task values must be an object, got: {other}"
                )))
            }
        };
        values.insert("parent_id".into(), json!(parent_id));
        self.create_task(Value::Object(values)).await
    }

    /// Write values on a task.
    pub async fn update_task(&self, task_id: RecordId, values: Value) -> Result<bool> {
        self.update(TASK_MODEL, &[task_id], values).await
    }

    /// Replace a task's HTML description.
    pub async fn set_task_description(&self, task_id: RecordId, html: &str) -> Result<bool> {
        self.update_task(task_id, json!({"description": html})).await
    }

    /// Move a task to another stage, optionally setting its status.
    ///
    /// When `state_label` is given, the task model's `state` selection
    /// metadata is fetched and the first code whose label matches
    /// case-insensitively is written together with the stage. An unmatched
    /// label emits a warning and moves the stage alone — it never fails the
    /// whole operation.
    pub async fn move_task(
        &self,
        task_id: RecordId,
        stage_id: RecordId,
        state_label: Option<&str>,
    ) -> Result<bool> {
        let mut values = Map::new();
        values.insert("stage_id".into(), json!(stage_id));

        if let Some(label) = state_label {
            match self.selection_labels(TASK_MODEL, "state").await {
                Ok(pairs) => {
                    let code = pairs
                        .iter()
                        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(label))
                        .map(|(code, _)| code.clone());
                    match code {
                        Some(code) => {
                            values.insert("state".into(), json!(code));
                        }
                        None => self.emit_warning(&format!(
                            "state label '{label}' not found - only stage moved"
                        )),
                    }
                }
                // a model without the selection field degrades the same way
                Err(OdooError::InvalidInput(_)) => self.emit_warning(&format!(
                    "state label '{label}' not found - only stage moved"
                )),
                Err(err) => return Err(err),
            }
        }

        self.update_task(task_id, Value::Object(values)).await
    }

    /// Hard-delete a single task.
    pub async fn delete_task(&self, task_id: RecordId) -> Result<bool> {
        self.delete(TASK_MODEL, &[task_id]).await
    }

    /// Archive or re-activate a task.
    pub async fn archive_task(&self, task_id: RecordId, active: bool) -> Result<bool> {
        self.update_task(task_id, json!({"active": active})).await
    }

    /// Assign a task to a user, optionally adding them as follower so they
    /// receive notifications.
    pub async fn assign_task(
        &self,
        task_id: RecordId,
        user_id: RecordId,
        add_follower: bool,
    ) -> Result<bool> {
        let mut values = Map::new();
        values.insert("user_id".into(), json!(user_id));
        if add_follower {
            values.insert("message_follower_ids".into(), json!([[4, user_id]]));
        }
        self.update_task(task_id, Value::Object(values)).await
    }
}
