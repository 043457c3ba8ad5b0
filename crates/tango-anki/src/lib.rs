mod client;
mod template;


use std::borrow::Cow;
use std::path::Path;

pub use client::AnkiConnectClient;
pub use template::{FIELDS, NoteModel, image_field, note_guid};

use anyhow::Result;
use tango_types::EnrichedTerm;

pub const TAG: &str = "tango";

/// Make sure `deck` and the note type exist before the first note is added
pub async fn prepare(client: &AnkiConnectClient, model: &NoteModel, deck: &str) -> Result<()> {
    let version = client.check_connection().await?;
    tracing::info!("Connected to AnkiConnect v{}", version);

    if !client.deck_names().await?.iter().any(|d| d == deck) {
        tracing::info!("Creating deck '{}'", deck);
        client.create_deck(deck).await?;
    }

    if !client.model_names().await?.iter().any(|m| *m == model.name) {
        tracing::info!("Creating note type '{}'", model.name);
        client.create_model(model).await?;
    }

    Ok(())
}

/// Add one resolved term as a note, uploading its image from `media_dir` first.
///
/// An image that is no longer on disk is left off the note with a warning.
pub async fn add_card(
    client: &AnkiConnectClient,
    model: &NoteModel,
    deck: &str,
    record: &EnrichedTerm,
    media_dir: &Path,
) -> Result<u64> {
    let mut record = Cow::Borrowed(record);

    if !record.image_ref.is_empty() {
        let path = media_dir.join(&record.image_ref);
        if path.is_file() {
            client.store_media_file(&record.image_ref, &path).await?;
        } else {
            tracing::warn!(
                "Media file {} for '{}' is missing, adding the note without an image",
                path.display(),
                record.term
            );
            record.to_mut().image_ref.clear();
        }
    }

    let guid = note_guid(&record.term, &record.reading, &record.gloss_english);
    let tags = [TAG.to_string(), format!("{TAG}-{guid}")];

    client
        .add_note(deck, &model.name, model.to_fields(&record), &tags)
        .await
}
