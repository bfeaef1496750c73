use shared::{
    domain::{normalize_keyword, FrameData, FrameState, ELEMENTS, STYLES},
    protocol::{FrameDocument, FramePostBody, SpellRequest, UntrustedData},
};
use tracing::{debug, error, info, warn};

use crate::{
    codec,
    error::{validation, FrameError},
    layout::{self, SlotKind},
    FrameContext,
};

/// Renders the document for a GET with the given state parameter.
pub fn render_get(ctx: &FrameContext, state_param: Option<&str>) -> FrameDocument {
    let data = codec::decode_param(state_param);
    ctx.renderer.render(data.state, &data, None)
}

/// Advances the wizard for one post-back and renders the next document.
/// Always yields a document; failures restart the wizard.
pub async fn handle_post(
    ctx: &FrameContext,
    state_param: Option<&str>,
    body: &FramePostBody,
) -> FrameDocument {
    let data = codec::decode_param(state_param);
    match advance(ctx, data, &body.untrusted_data).await {
        Ok(next) => {
            let post_url = ctx.renderer.post_url(&next);
            ctx.renderer.render(next.state, &next, Some(post_url))
        }
        Err(err) => {
            match &err {
                FrameError::Unexpected(_) => error!(%err, "frame post failed; restarting wizard"),
                _ => warn!(%err, "frame post failed; restarting wizard"),
            }
            reset_document(ctx)
        }
    }
}

pub fn reset_document(ctx: &FrameContext) -> FrameDocument {
    let fresh = FrameData::default();
    let post_url = ctx.renderer.post_url(&fresh);
    ctx.renderer.render(fresh.state, &fresh, Some(post_url))
}

async fn advance(
    ctx: &FrameContext,
    data: FrameData,
    input: &UntrustedData,
) -> Result<FrameData, FrameError> {
    let next = match transition(data.clone(), input) {
        Ok(next) => next,
        Err(FrameError::Validation(reason)) => {
            debug!(state = ?data.state, %reason, "ignoring frame input");
            return Ok(data);
        }
        Err(err) => return Err(err),
    };
    if next.state == FrameState::Generating {
        return generate(ctx, next).await;
    }
    Ok(next)
}

/// Applies one post-back to `data` without side effects. Reaching
/// `Generating` means the caller still owes the generation call.
pub fn transition(mut data: FrameData, input: &UntrustedData) -> Result<FrameData, FrameError> {
    match data.state {
        FrameState::ElementSelection => {
            let index = input
                .button_index
                .ok_or_else(|| validation("no button pressed"))?;
            let page = data.page_or_first();
            match layout::resolve_press(&ELEMENTS, page, index) {
                Some(SlotKind::Previous) => data.page = Some(page.saturating_sub(1)),
                Some(SlotKind::Next) => data.page = Some(page + 1),
                Some(SlotKind::Entry(entry)) => {
                    let element = ELEMENTS
                        .get(entry)
                        .ok_or_else(|| validation(format!("no element at {entry}")))?;
                    data.element = Some((*element).to_string());
                    data.page = Some(page);
                    data.state = FrameState::StyleSelection;
                }
                None => return Err(validation(format!("button {index} has no control"))),
            }
        }
        FrameState::StyleSelection => {
            let index = input
                .button_index
                .ok_or_else(|| validation("no button pressed"))?;
            let style = usize::try_from(index)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| STYLES.get(i))
                .ok_or_else(|| validation(format!("button {index} has no style")))?;
            data.style = Some((*style).to_string());
            data.state = FrameState::KeywordInput;
        }
        FrameState::KeywordInput => {
            if let Some(raw) = input.input_text.as_deref().filter(|t| !t.trim().is_empty()) {
                let keyword =
                    normalize_keyword(raw).ok_or_else(|| validation("keyword is too long"))?;
                data.keyword = Some(keyword);
            }
            match input.button_index {
                Some(1) if data.spell_inputs().is_some() => data.state = FrameState::Generating,
                Some(1) => return Err(validation("generate needs element, style and keyword")),
                Some(other) => return Err(validation(format!("button {other} has no control"))),
                None if data.keyword.is_some() => {}
                None => return Err(validation("no keyword entered")),
            }
        }
        FrameState::Generating => {}
        FrameState::Preview => return Err(validation("preview has no post transition")),
        FrameState::Minting => return Ok(FrameData::default()),
    }
    Ok(data)
}

async fn generate(ctx: &FrameContext, data: FrameData) -> Result<FrameData, FrameError> {
    let Some((element, style, keyword)) = data.spell_inputs() else {
        debug!("generation requested with incomplete inputs; ignoring");
        return Ok(data);
    };
    let request = SpellRequest {
        element: element.to_string(),
        style: style.to_string(),
        keyword: keyword.to_string(),
    };

    let generator = ctx.generator.clone();
    let artifacts = tokio::spawn(async move { generator.generate(&request).await })
        .await
        .map_err(|e| FrameError::Unexpected(format!("generation task aborted: {e}")))??;

    for (field, url) in [
        ("imageUrl", &artifacts.image_url),
        ("metadataUrl", &artifacts.metadata_url),
    ] {
        codec::validate_url(field, url).map_err(|e| FrameError::Upstream(e.to_string()))?;
    }

    let next = FrameData {
        state: FrameState::Preview,
        image_url: Some(artifacts.image_url),
        metadata_url: Some(artifacts.metadata_url),
        ..data.clone()
    };
    // the preview document posts its own state back
    let encoded = codec::encode(&next).len();
    if encoded > codec::MAX_STATE_PARAM_BYTES {
        return Err(FrameError::Upstream(format!(
            "preview state encodes to {encoded} bytes, limit is {}",
            codec::MAX_STATE_PARAM_BYTES
        )));
    }
    info!(element = %element, style = %style, "spell generated");
    Ok(next)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
