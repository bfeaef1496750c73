use serde::{Deserialize, Serialize};

pub const ELEMENTS: [&str; 20] = [
    "Fire",
    "Water",
    "Earth",
    "Air",
    "Lightning",
    "Ice",
    "Shadow",
    "Light",
    "Nature",
    "Metal",
    "Poison",
    "Psychic",
    "Chaos",
    "Order",
    "Void",
    "Time",
    "Space",
    "Gravity",
    "Sound",
    "Mind",
];

pub const STYLES: [&str; 4] = ["Chaos", "Order", "Nature", "Dark"];

pub const MAX_KEYWORD_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameState {
    #[default]
    ElementSelection,
    StyleSelection,
    KeywordInput,
    Generating,
    Preview,
    Minting,
}

/// Everything a wizard session knows. The client carries it between requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrameData {
    pub state: FrameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl FrameData {
    pub fn in_state(state: FrameState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn page_or_first(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Returns the generation inputs when all three are present.
    pub fn spell_inputs(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.element.as_deref()?,
            self.style.as_deref()?,
            self.keyword.as_deref()?,
        ))
    }
}

pub fn is_element(value: &str) -> bool {
    ELEMENTS.contains(&value)
}

pub fn is_style(value: &str) -> bool {
    STYLES.contains(&value)
}

/// Trims a keyword and rejects blank or over-long input.
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_KEYWORD_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_starts_at_element_selection() {
        assert_eq!(FrameData::default().state, FrameState::ElementSelection);
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let data = FrameData {
            state: FrameState::Preview,
            metadata_url: Some("ipfs://meta".into()),
            ..FrameData::default()
        };
        let json = serde_json::to_string(&data).expect("json");
        assert_eq!(json, r#"{"state":"preview","metadataUrl":"ipfs://meta"}"#);
    }

    #[test]
    fn rejects_unknown_fields_and_states() {
        assert!(serde_json::from_str::<FrameData>(r#"{"state":"preview","extra":1}"#).is_err());
        assert!(serde_json::from_str::<FrameData>(r#"{"state":"burning"}"#).is_err());
        assert!(serde_json::from_str::<FrameData>(r#"{"state":"preview","page":-1}"#).is_err());
    }

    #[test]
    fn keyword_is_trimmed_and_bounded() {
        assert_eq!(normalize_keyword("  Rage "), Some("Rage".to_string()));
        assert_eq!(normalize_keyword("   "), None);
        assert_eq!(normalize_keyword(&"x".repeat(MAX_KEYWORD_CHARS + 1)), None);
    }

    #[test]
    fn spell_inputs_require_all_three_fields() {
        let mut data = FrameData {
            element: Some("Fire".into()),
            style: Some("Chaos".into()),
            ..FrameData::default()
        };
        assert!(data.spell_inputs().is_none());
        data.keyword = Some("Rage".into());
        assert_eq!(data.spell_inputs(), Some(("Fire", "Chaos", "Rage")));
    }
}
