use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tango_sources::media::store_media;
use tango_sources::{ImageSource, SourceError};

use crate::http::HttpClient;
use crate::mediawiki::first_page;

/// First matching file on Wikimedia Commons, stored under the media directory
#[derive(Clone)]
pub struct CommonsImageSource {
    http: HttpClient,
    api: String,
    width: u32,
    media_dir: PathBuf,
}

impl CommonsImageSource {
    pub fn new(http: HttpClient, api: impl Into<String>, width: u32, media_dir: PathBuf) -> Self {
        Self {
            http,
            api: api.into(),
            width,
            media_dir,
        }
    }

    async fn find_url(&self, query: &str) -> Result<Option<String>, SourceError> {
        let width = self.width.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrnamespace", "6"),
            ("gsrlimit", "1"),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("iiurlwidth", width.as_str()),
        ];
        let payload = self.http.get_json(&self.api, &params).await?;
        Ok(image_url(&payload).map(str::to_string))
    }
}

/// Thumbnail URL of the first result, the original when no thumbnail exists
pub fn image_url(payload: &Value) -> Option<&str> {
    let info = first_page(payload)?.pointer("/imageinfo/0")?;
    ["thumburl", "url"]
        .into_iter()
        .filter_map(|key| info.get(key).and_then(Value::as_str))
        .find(|url| !url.is_empty())
}

#[async_trait]
impl ImageSource for CommonsImageSource {
    async fn image(&self, term: &str, query: &str) -> Result<Option<String>, SourceError> {
        let Some(url) = self.find_url(query).await? else {
            return Ok(None);
        };

        let content = self.http.get_bytes(&url).await?;
        if content.is_empty() {
            return Ok(None);
        }

        let filename = store_media(&self.media_dir, term, &url, &content).await?;
        Ok(Some(filename))
    }

    fn name(&self) -> &'static str {
        "commons"
    }
}
