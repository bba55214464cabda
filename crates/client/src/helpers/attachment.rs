//! Attachment helpers (`ir.attachment`)

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use odoo_domain::constants::{ATTACHMENT_MODEL, DEFAULT_MIMETYPE, TASK_MODEL};
use odoo_domain::{DomainTerm, OdooError, RecordId, Result};
use serde_json::{json, Value};

use crate::client::{OdooClient, SearchReadOptions};

/// Owner model and metadata overrides for a new attachment.
#[derive(Debug, Clone, Default)]
pub struct AttachOptions {
    /// Owning model; defaults to the task model
    pub model: Option<String>,
    /// Display filename; defaults to `attachment` (or the source file name
    /// when attaching from a path)
    pub filename: Option<String>,
    /// MIME type; defaults to `application/octet-stream`
    pub mimetype: Option<String>,
}

impl OdooClient {
    /// Create an attachment from raw bytes, linked to `res_id` on the
    /// owning model. The content is base64-encoded for the wire.
    pub async fn attach_file(
        &self,
        res_id: RecordId,
        content: &[u8],
        options: &AttachOptions,
    ) -> Result<RecordId> {
        let datas = BASE64.encode(content);
        self.create(
            ATTACHMENT_MODEL,
            json!({
                "name": options.filename.as_deref().unwrap_or("attachment"),
                "datas": datas,
                "res_model": options.model.as_deref().unwrap_or(TASK_MODEL),
                "res_id": res_id,
                "mimetype": options.mimetype.as_deref().unwrap_or(DEFAULT_MIMETYPE),
            }),
        )
        .await
    }

    /// Create an attachment from a file on disk. The file name is used as
    /// the attachment name unless overridden.
    pub async fn attach_file_from_path(
        &self,
        res_id: RecordId,
        path: impl AsRef<Path>,
        options: &AttachOptions,
    ) -> Result<RecordId> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|err| {
            OdooError::InvalidInput(format!("failed to read {}: {err}", path.display()))
        })?;

        let mut options = options.clone();
        if options.filename.is_none() {
            options.filename = path.file_name().map(|name| name.to_string_lossy().into_owned());
        }
        self.attach_file(res_id, &content, &options).await
    }

    /// List the attachments linked to one record.
    pub async fn list_attachments(
        &self,
        res_model: &str,
        res_id: RecordId,
        fields: Option<Vec<String>>,
    ) -> Result<Vec<Value>> {
        let domain = vec![
            DomainTerm::new("res_model", "=", res_model),
            DomainTerm::new("res_id", "=", res_id),
        ];
        let fields = fields.unwrap_or_else(|| {
            vec!["name".to_string(), "mimetype".to_string(), "datas_fname".to_string()]
        });
        let options = SearchReadOptions { fields: Some(fields), ..SearchReadOptions::default() };
        self.search_read(ATTACHMENT_MODEL, domain, &options).await
    }
}
