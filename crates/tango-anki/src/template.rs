use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tango_types::EnrichedTerm;

/// Field names of the vocabulary note type, in card order
pub const FIELDS: [&str; 7] = [
    "Expression",
    "Reading",
    "English",
    "SentenceJP",
    "SentenceEN",
    "DefinitionJP",
    "Image",
];

const FRONT: &str = "<div class='front'>\
<div class='jp'>{{Expression}}</div>\
<div class='reading'>{{Reading}}</div>\
<div class='img'>{{Image}}</div>\
</div>";

const BACK: &str = "{{FrontSide}}<hr id='answer'>\
<div class='back'>\
<div class='en'><b>English:</b> {{English}}</div>\
<div class='ex'><b>例文:</b> {{SentenceJP}}</div>\
<div class='ex'><b>EN:</b> {{SentenceEN}}</div>\
<div class='def'><b>国語:</b> {{DefinitionJP}}</div>\
</div>";

const CSS: &str = "\
.jp { font-family: 'Hiragino Kaku Gothic Pro', 'Meiryo', 'Noto Sans JP', sans-serif; font-size: 28px; }
.reading { color: #555; font-size: 20px; }
.en { margin-top: 8px; font-size: 16px; }
.def { margin-top: 8px; font-size: 16px; color: #333; }
.ex { margin-top: 10px; }
img { max-width: 100%; height: auto; }
.front { text-align: center; }
.back { text-align: left; }
";

/// Note type the cards are written with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteModel {
    pub name: String,
    pub front_template: String,
    pub back_template: String,
    pub css: String,
}

impl NoteModel {
    /// Seven-field Japanese vocabulary note type
    pub fn vocabulary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            front_template: FRONT.to_string(),
            back_template: BACK.to_string(),
            css: CSS.to_string(),
        }
    }

    /// Field values keyed by field name, in [`FIELDS`] order
    pub fn to_fields(&self, record: &EnrichedTerm) -> Map<String, Value> {
        let values = [
            record.term.clone(),
            record.reading.clone(),
            record.gloss_english.clone(),
            record.example_jp.clone(),
            record.example_en.clone(),
            record.definition_jp.clone(),
            image_field(&record.image_ref),
        ];

        FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), Value::String(value)))
            .collect()
    }
}

pub fn image_field(image_ref: &str) -> String {
    if image_ref.is_empty() {
        "<div></div>".to_string()
    } else {
        format!("<div><img src=\"{image_ref}\" /></div>")
    }
}

/// Stable id for a note: the same term, reading and gloss always map to
/// the same value, so re-runs can be recognised
pub fn note_guid(term: &str, reading: &str, gloss: &str) -> String {
    let digest = Sha256::digest([term, reading, gloss].join("::").as_bytes());
    let prefix = &hex::encode(digest)[..8];
    u32::from_str_radix(prefix, 16)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| prefix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EnrichedTerm {
        EnrichedTerm {
            term: "猫".to_string(),
            reading: "ねこ".to_string(),
            gloss_english: "cat".to_string(),
            example_jp: "猫が好きです。".to_string(),
            example_en: "I like cats.".to_string(),
            definition_jp: "食肉目ネコ科の哺乳類。".to_string(),
            image_ref: "猫_img_0123456789.jpg".to_string(),
        }
    }

    #[test]
    fn fields_follow_model_order() {
        let fields = NoteModel::vocabulary("Vocab").to_fields(&record());
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, FIELDS);
        assert_eq!(fields["Reading"], "ねこ");
        assert_eq!(fields["Image"], "<div><img src=\"猫_img_0123456789.jpg\" /></div>");
    }

    #[test]
    fn empty_image_keeps_wrapper() {
        assert_eq!(image_field(""), "<div></div>");
    }

    #[test]
    fn guid_is_stable() {
        let a = note_guid("猫", "ねこ", "cat");
        assert_eq!(a, note_guid("猫", "ねこ", "cat"));
        assert_ne!(a, note_guid("猫", "ねこ", "kitty"));
        assert!(a.parse::<u32>().is_ok());
    }

    #[test]
    fn templates_reference_every_field() {
        let model = NoteModel::vocabulary("Vocab");
        let both = format!("{}{}", model.front_template, model.back_template);
        for field in FIELDS {
            assert!(both.contains(&format!("{{{{{field}}}}}")), "{field} missing");
        }
    }
}
