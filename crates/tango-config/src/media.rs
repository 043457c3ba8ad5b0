use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_media_dir() -> PathBuf {
    PathBuf::from("out").join("media")
}

fn default_image_width() -> u32 {
    600
}

fn default_image_query_limit() -> usize {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MediaConfig {
    /// Downloaded images land here
    #[serde(default = "default_media_dir")]
    pub dir: PathBuf,
    /// Thumbnail width requested from Commons
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    /// Max distinct queries (term, reading, gloss words) tried for an image
    #[serde(default = "default_image_query_limit")]
    pub image_query_limit: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_media_dir(),
            image_width: default_image_width(),
            image_query_limit: default_image_query_limit(),
        }
    }
}

impl MediaConfig {
    pub fn new() -> Self {
        Self {
            dir: std::env::var("TANGO_MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_media_dir()),
            image_width: env_or("TANGO_IMAGE_WIDTH", default_image_width()),
            image_query_limit: env_or("TANGO_IMAGE_QUERY_LIMIT", default_image_query_limit()),
        }
    }
}
