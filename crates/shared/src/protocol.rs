use serde::{Deserialize, Serialize};

pub const FRAME_PROTOCOL_VERSION: &str = "vNext";
pub const MAX_FRAME_BUTTONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Post,
    Tx,
}

impl ButtonAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Tx => "tx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameButton {
    pub label: String,
    pub action: ButtonAction,
    /// Only `tx` buttons carry a target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Encoded state this button represents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FrameButton {
    pub fn post(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Post,
            target: None,
            value: Some(value.into()),
        }
    }

    pub fn tx(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Tx,
            target: Some(target.into()),
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDocument {
    pub version: String,
    pub image: String,
    pub post_url: String,
    pub buttons: Vec<FrameButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default)]
    pub button_index: Option<u32>,
    #[serde(default)]
    pub input_text: Option<String>,
}

/// Body a frame client posts back. Anything beyond `untrustedData` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePostBody {
    #[serde(default)]
    pub untrusted_data: UntrustedData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRequest {
    pub element: String,
    pub style: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellArtifacts {
    pub metadata_url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintRequestBody {
    #[serde(default, rename = "tokenURI")]
    pub token_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintTxParams {
    pub to: String,
    pub data: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintTransaction {
    pub chain_id: String,
    pub method: String,
    pub params: MintTxParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_post_body_tolerates_missing_and_extra_fields() {
        let body: FramePostBody = serde_json::from_str(
            r#"{"untrustedData":{"buttonIndex":2,"fid":1},"trustedData":{"messageBytes":"00"}}"#,
        )
        .expect("body");
        assert_eq!(body.untrusted_data.button_index, Some(2));
        assert_eq!(body.untrusted_data.input_text, None);

        let empty: FramePostBody = serde_json::from_str("{}").expect("empty body");
        assert_eq!(empty, FramePostBody::default());
    }

    #[test]
    fn spell_artifacts_ignore_extra_response_fields() {
        let artifacts: SpellArtifacts = serde_json::from_str(
            r#"{"success":true,"imageUrl":"https://img","metadataUrl":"https://meta","base64":"x"}"#,
        )
        .expect("artifacts");
        assert_eq!(artifacts.image_url, "https://img");
        assert_eq!(artifacts.metadata_url, "https://meta");
    }

    #[test]
    fn mint_transaction_uses_wallet_field_names() {
        let tx = MintTransaction {
            chain_id: "eip155:84532".into(),
            method: "eth_sendTransaction".into(),
            params: MintTxParams {
                to: "0x00".into(),
                data: "0x".into(),
                value: "1".into(),
            },
        };
        let json = serde_json::to_value(&tx).expect("json");
        assert_eq!(json["chainId"], "eip155:84532");
        assert_eq!(json["params"]["to"], "0x00");
    }
}
