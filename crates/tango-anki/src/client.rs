use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::template::{FIELDS, NoteModel};

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Check if AnkiConnect is available
    pub async fn check_connection(&self) -> Result<u32> {
        self.invoke("version", json!({})).await
    }

    pub async fn deck_names(&self) -> Result<Vec<String>> {
        self.invoke("deckNames", json!({})).await
    }

    pub async fn model_names(&self) -> Result<Vec<String>> {
        self.invoke("modelNames", json!({})).await
    }

    pub async fn create_deck(&self, deck: &str) -> Result<u64> {
        self.invoke("createDeck", json!({ "deck": deck })).await
    }

    /// Register the note type with its fields, card template and styling
    pub async fn create_model(&self, model: &NoteModel) -> Result<Value> {
        let params = json!({
            "modelName": model.name,
            "inOrderFields": FIELDS,
            "css": model.css,
            "cardTemplates": [{
                "Name": "Card 1",
                "Front": model.front_template,
                "Back": model.back_template,
            }]
        });
        self.invoke("createModel", params).await
    }

    /// Copy a local file into the collection's media folder
    pub async fn store_media_file(&self, filename: &str, path: &Path) -> Result<String> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Media file {} not found", path.display()))?;

        let params = json!({
            "filename": filename,
            "path": path.to_string_lossy(),
        });
        self.invoke("storeMediaFile", params).await
    }

    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        fields: Map<String, Value>,
        tags: &[String],
    ) -> Result<u64> {
        let params = json!({
            "note": {
                "deckName": deck,
                "modelName": model,
                "fields": fields,
                "options": { "allowDuplicate": false, "duplicateScope": "deck" },
                "tags": tags
            }
        });

        self.invoke("addNote", params).await
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(&self, action: &str, params: Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send {action} to AnkiConnect"))?;

        response
            .json::<AnkiResponse<T>>()
            .await
            .context("Failed to parse AnkiConnect response")?
            .into_result()
    }
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }

        self.result.context("AnkiConnect returned null result")
    }
}
