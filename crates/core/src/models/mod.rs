//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Author credit shown when a record carries none.
pub const DEFAULT_AUTHOR: &str = "GameAnt Studio";
/// Last-updated label shown when a record carries none.
pub const DEFAULT_LAST_UPDATED: &str = "2024";
/// How-to-play text shown when a record carries none.
pub const DEFAULT_INSTRUCTIONS: &str = "Follow the on-screen instructions to play.";
/// Feature list shown when a record carries none.
pub const DEFAULT_FEATURES: [&str; 3] = ["Fun gameplay", "Challenging levels", "High score tracking"];

/// Distribution kind of a catalog entry, read from the `type` field.
///
/// Unknown values are kept verbatim in [`GameKind::Other`] and render through
/// the same branch as store downloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// Embeddable HTML5 page.
    Html,
    /// External Android store listing.
    Android,
    /// Hand-picked entries shown under the "Unique" category.
    Unique,
    /// Any other value found in the catalog.
    Other(String),
}

impl GameKind {
    /// Raw value as stored in the catalog file.
    pub fn as_str(&self) -> &str {
        match self {
            GameKind::Html => "html",
            GameKind::Android => "android",
            GameKind::Unique => "Unique",
            GameKind::Other(raw) => raw,
        }
    }

    /// Whether the game can be embedded in the player view.
    pub fn is_embeddable(&self) -> bool {
        matches!(self, GameKind::Html)
    }
}

impl From<&str> for GameKind {
    // Matching is case sensitive: "Android" is not "android".
    fn from(value: &str) -> Self {
        match value {
            "html" => GameKind::Html,
            "android" => GameKind::Android,
            "Unique" => GameKind::Unique,
            other => GameKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GameKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GameKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(GameKind::from(raw.as_str()))
    }
}

/// One catalog entry describing a playable game and its presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Stable identifier, used as the player route key.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Short summary shown on cards.
    #[serde(default)]
    pub description: String,
    /// Extended summary for the player page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Preview image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Play target: an embeddable page or an external store link.
    pub url: String,
    /// Distribution kind.
    #[serde(rename = "type")]
    pub kind: GameKind,
    /// Show a NEW badge on the card.
    #[serde(rename = "isNew", default)]
    pub is_new: bool,
    /// Author credit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-form last-updated label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// How-to-play text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Control scheme description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<String>,
    /// Bullet list for the features section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl GameRecord {
    /// Extended description, falling back to the short one.
    pub fn long_description(&self) -> &str {
        present(&self.long_description).unwrap_or(&self.description)
    }

    /// Author credit or the studio default.
    pub fn author(&self) -> &str {
        present(&self.author).unwrap_or(DEFAULT_AUTHOR)
    }

    /// Last-updated label or the static default.
    pub fn last_updated(&self) -> &str {
        present(&self.last_updated).unwrap_or(DEFAULT_LAST_UPDATED)
    }

    /// How-to-play text or the generic hint.
    pub fn instructions(&self) -> &str {
        present(&self.instructions).unwrap_or(DEFAULT_INSTRUCTIONS)
    }

    /// Controls text, only when the catalog provides it.
    pub fn controls(&self) -> Option<&str> {
        present(&self.controls)
    }

    /// Feature bullets, or the default triple when the field is absent.
    ///
    /// An explicit empty list is honored and renders no bullets.
    pub fn features(&self) -> Vec<&str> {
        match &self.features {
            Some(features) => features.iter().map(String::as_str).collect(),
            None => DEFAULT_FEATURES.to_vec(),
        }
    }

    /// Badge text for listing cards.
    pub fn badge_label(&self) -> &'static str {
        match self.kind {
            GameKind::Android => "Android",
            GameKind::Unique => "Unique",
            _ => "Web Browser",
        }
    }

    /// Short label describing how the game is played.
    pub fn play_label(&self) -> &'static str {
        if self.kind.is_embeddable() {
            "Instant Play"
        } else {
            "Store Download"
        }
    }

    /// Platform line for the player metadata box.
    pub fn platform_label(&self) -> &'static str {
        if self.kind.is_embeddable() {
            "Browser (HTML5)"
        } else {
            "Android App"
        }
    }
}

// Only absent or empty strings take a fallback; whitespace is shown as given.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare_record() -> GameRecord {
        serde_json::from_value(json!({
            "id": "a",
            "title": "A",
            "description": "Short",
            "thumbnail": "/img/a.png",
            "url": "/games/a.html",
            "type": "html"
        }))
        .expect("valid record")
    }

    #[test]
    fn missing_fields_take_fallbacks_independently() {
        let mut record = bare_record();
        assert_eq!(record.long_description(), "Short");
        assert_eq!(record.author(), DEFAULT_AUTHOR);
        assert_eq!(record.last_updated(), DEFAULT_LAST_UPDATED);
        assert_eq!(record.instructions(), DEFAULT_INSTRUCTIONS);
        assert_eq!(record.features(), DEFAULT_FEATURES.to_vec());
        assert_eq!(record.controls(), None);
        assert!(!record.is_new);

        record.author = Some("Someone".to_string());
        assert_eq!(record.author(), "Someone");
        assert_eq!(record.last_updated(), DEFAULT_LAST_UPDATED);
        assert_eq!(record.long_description(), "Short");

        record.long_description = Some(String::new());
        assert_eq!(record.long_description(), "Short");

        record.features = Some(vec!["Only one".to_string()]);
        assert_eq!(record.features(), vec!["Only one"]);
    }

    #[test]
    fn empty_features_and_blank_text_are_kept() {
        let record: GameRecord = serde_json::from_value(json!({
            "id": "a",
            "title": "A",
            "url": "/games/a.html",
            "type": "html",
            "features": [],
            "author": "  ",
            "instructions": ""
        }))
        .expect("valid record");

        assert!(record.features().is_empty());
        assert_eq!(record.author(), "  ");
        assert_eq!(record.instructions(), DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn type_field_is_case_sensitive() {
        assert_eq!(GameKind::from("android"), GameKind::Android);
        assert_eq!(
            GameKind::from("Android"),
            GameKind::Other("Android".to_string())
        );
        assert_eq!(GameKind::from("unique"), GameKind::Other("unique".to_string()));
        assert_eq!(GameKind::from("Unique"), GameKind::Unique);
    }

    #[test]
    fn parses_catalog_field_names() {
        let record: GameRecord = serde_json::from_value(json!({
            "id": "b",
            "title": "B",
            "description": "Store game",
            "thumbnail": "",
            "url": "https://play/b",
            "type": "android",
            "isNew": true,
            "features": ["x", "y"]
        }))
        .expect("valid record");

        assert_eq!(record.kind, GameKind::Android);
        assert!(record.is_new);
        assert_eq!(record.badge_label(), "Android");
        assert_eq!(record.play_label(), "Store Download");
        assert_eq!(record.platform_label(), "Android App");

        let value = serde_json::to_value(&record).expect("serializable");
        assert_eq!(value["type"], json!("android"));
        assert_eq!(value["isNew"], json!(true));
    }

    #[test]
    fn unknown_types_use_web_badge_and_download_branch() {
        let mut record = bare_record();
        record.kind = GameKind::from("ios");
        assert_eq!(record.badge_label(), "Web Browser");
        assert_eq!(record.play_label(), "Store Download");
        assert!(!record.kind.is_embeddable());
    }
}
