use askama::Template;
use shared::{
    domain::{FrameData, FrameState, ELEMENTS, STYLES},
    protocol::{FrameButton, FrameDocument, FRAME_PROTOCOL_VERSION},
};
use tracing::error;

use crate::{
    codec, layout,
    mint::{mint_button_label, DEFAULT_MINT_PRICE_WEI},
};

pub const GENERATE_LABEL: &str = "Generate Spell";
pub const GENERATING_LABEL: &str = "⏳ Generating...";
pub const START_LABEL: &str = "Start Creating";
pub const KEYWORD_PROMPT: &str = "Enter keyword (e.g., Rage)";
pub const PAGE_TITLE: &str = "SpellCard NFT Creator";

/// Maps a wizard state onto the document a frame client displays.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    public_url: String,
    mint_label: String,
}

impl FrameRenderer {
    pub fn new(public_url: impl Into<String>) -> Self {
        let public_url: String = public_url.into();
        Self {
            public_url: public_url.trim_end_matches('/').to_string(),
            mint_label: mint_button_label(DEFAULT_MINT_PRICE_WEI),
        }
    }

    pub fn with_mint_price(mut self, price_wei: u128) -> Self {
        self.mint_label = mint_button_label(price_wei);
        self
    }

    pub fn hero_image(&self) -> String {
        format!("{}/hero.png", self.public_url)
    }

    pub fn post_url(&self, data: &FrameData) -> String {
        format!("{}/api/frame?state={}", self.public_url, codec::encode(data))
    }

    pub fn mint_target(&self, metadata_url: Option<&str>) -> String {
        format!(
            "{}/api/mint?tokenURI={}",
            self.public_url,
            urlencoding::encode(metadata_url.unwrap_or_default())
        )
    }

    pub fn render(
        &self,
        state: FrameState,
        data: &FrameData,
        post_url: Option<String>,
    ) -> FrameDocument {
        let mut image = self.hero_image();
        let mut input_text = None;

        let buttons = match state {
            FrameState::ElementSelection => {
                layout::layout_buttons(data, data.page_or_first(), &ELEMENTS)
                    .into_iter()
                    .map(|button| FrameButton::post(button.label, button.value))
                    .collect()
            }
            FrameState::StyleSelection => STYLES
                .iter()
                .map(|style| {
                    let value = codec::encode(&FrameData {
                        state: FrameState::StyleSelection,
                        style: Some((*style).to_string()),
                        ..data.clone()
                    });
                    FrameButton::post(*style, value)
                })
                .collect(),
            FrameState::KeywordInput => {
                input_text = Some(KEYWORD_PROMPT.to_string());
                let value = codec::encode(&FrameData {
                    state: FrameState::Generating,
                    ..data.clone()
                });
                vec![FrameButton::post(GENERATE_LABEL, value)]
            }
            FrameState::Generating => {
                vec![FrameButton::post(GENERATING_LABEL, codec::encode(data))]
            }
            FrameState::Preview => {
                if let Some(url) = data.image_url.as_deref() {
                    image = url.to_string();
                }
                vec![FrameButton::tx(
                    self.mint_label.clone(),
                    self.mint_target(data.metadata_url.as_deref()),
                )]
            }
            FrameState::Minting => {
                vec![FrameButton::post(
                    START_LABEL,
                    codec::encode(&FrameData::default()),
                )]
            }
        };

        FrameDocument {
            version: FRAME_PROTOCOL_VERSION.to_string(),
            image,
            post_url: post_url.unwrap_or_else(|| self.post_url(data)),
            buttons,
            input_text,
        }
    }
}

struct MetaTag<'a> {
    property: String,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "frame.html")]
struct FramePage<'a> {
    title: &'a str,
    image: &'a str,
    tags: Vec<MetaTag<'a>>,
}

/// Serializes a document as an HTML page carrying frame meta tags.
pub fn to_html(doc: &FrameDocument) -> String {
    let mut tags = vec![
        MetaTag {
            property: "fc:frame".into(),
            content: &doc.version,
        },
        MetaTag {
            property: "fc:frame:image".into(),
            content: &doc.image,
        },
        MetaTag {
            property: "og:image".into(),
            content: &doc.image,
        },
        MetaTag {
            property: "fc:frame:post_url".into(),
            content: &doc.post_url,
        },
    ];
    if let Some(prompt) = doc.input_text.as_deref() {
        tags.push(MetaTag {
            property: "fc:frame:input:text".into(),
            content: prompt,
        });
    }
    for (index, button) in doc.buttons.iter().enumerate() {
        let n = index + 1;
        tags.push(MetaTag {
            property: format!("fc:frame:button:{n}"),
            content: &button.label,
        });
        tags.push(MetaTag {
            property: format!("fc:frame:button:{n}:action"),
            content: button.action.as_str(),
        });
        if let Some(target) = button.target.as_deref() {
            tags.push(MetaTag {
                property: format!("fc:frame:button:{n}:target"),
                content: target,
            });
        }
    }

    let page = FramePage {
        title: PAGE_TITLE,
        image: &doc.image,
        tags,
    };
    page.render().unwrap_or_else(|err| {
        error!(%err, "frame page failed to render");
        String::new()
    })
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
