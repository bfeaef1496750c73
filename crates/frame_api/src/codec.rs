use shared::domain::{is_element, is_style, normalize_keyword, FrameData, ELEMENTS};
use tracing::debug;
use url::Url;

use crate::{error::FrameError, layout};

pub const MAX_STATE_PARAM_BYTES: usize = 8192;
pub const MAX_URL_BYTES: usize = 1024;

const DEFAULT_STATE_JSON: &str = r#"{"state":"element_selection"}"#;

/// JSON-serializes `data` and percent-encodes it for use as a query value.
pub fn encode(data: &FrameData) -> String {
    let json = serde_json::to_string(data).unwrap_or_else(|_| DEFAULT_STATE_JSON.to_string());
    urlencoding::encode(&json).into_owned()
}

/// Decodes a state parameter, falling back to a fresh session on any defect.
pub fn decode(param: &str) -> FrameData {
    try_decode(param).unwrap_or_else(|err| {
        debug!(%err, "discarding state parameter");
        FrameData::default()
    })
}

/// A missing parameter and a broken one both start a fresh session.
pub fn decode_param(param: Option<&str>) -> FrameData {
    param.map(decode).unwrap_or_default()
}

pub fn try_decode(param: &str) -> Result<FrameData, FrameError> {
    if param.len() > MAX_STATE_PARAM_BYTES {
        return Err(FrameError::Decode(format!(
            "state parameter exceeds {MAX_STATE_PARAM_BYTES} bytes"
        )));
    }
    let json = urlencoding::decode(param).map_err(|e| FrameError::Decode(e.to_string()))?;
    let data: FrameData =
        serde_json::from_str(&json).map_err(|e| FrameError::Decode(e.to_string()))?;
    validate(&data)?;
    Ok(data)
}

/// Checks the fields a client could have tampered with.
pub fn validate(data: &FrameData) -> Result<(), FrameError> {
    if let Some(element) = data.element.as_deref() {
        if !is_element(element) {
            return Err(FrameError::Decode(format!("unknown element {element:?}")));
        }
    }
    if let Some(style) = data.style.as_deref() {
        if !is_style(style) {
            return Err(FrameError::Decode(format!("unknown style {style:?}")));
        }
    }
    if let Some(keyword) = data.keyword.as_deref() {
        if normalize_keyword(keyword).as_deref() != Some(keyword) {
            return Err(FrameError::Decode("keyword is blank, padded or too long".into()));
        }
    }
    if let Some(url) = data.image_url.as_deref() {
        validate_url("imageUrl", url)?;
    }
    if let Some(url) = data.metadata_url.as_deref() {
        validate_url("metadataUrl", url)?;
    }
    if let Some(page) = data.page {
        if page as usize >= layout::page_count(ELEMENTS.len()) {
            return Err(FrameError::Decode(format!("page {page} out of range")));
        }
    }
    Ok(())
}

pub fn validate_url(field: &str, value: &str) -> Result<(), FrameError> {
    if value.len() > MAX_URL_BYTES {
        return Err(FrameError::Decode(format!(
            "{field} exceeds {MAX_URL_BYTES} bytes"
        )));
    }
    let parsed = Url::parse(value).map_err(|e| FrameError::Decode(format!("{field}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" | "ipfs" => Ok(()),
        other => Err(FrameError::Decode(format!(
            "{field} has unsupported scheme {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
