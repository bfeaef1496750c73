//! Stateless frame protocol for the spell card wizard.
//!
//! Nothing is kept between requests: each post carries its whole session in
//! the `state` query parameter, which [`codec`] turns back into
//! [`FrameData`](shared::domain::FrameData).

use std::sync::Arc;

use spell_generation::SpellGenerator;

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod mint;
pub mod render;

pub use dispatch::{handle_post, render_get, reset_document, transition};
pub use error::FrameError;
pub use mint::MintConfig;
pub use render::{to_html, FrameRenderer};

#[derive(Clone)]
pub struct FrameContext {
    pub renderer: FrameRenderer,
    pub generator: Arc<dyn SpellGenerator>,
    pub mint: MintConfig,
}

impl FrameContext {
    pub fn new(
        public_url: impl Into<String>,
        generator: Arc<dyn SpellGenerator>,
        mint: MintConfig,
    ) -> Self {
        Self {
            renderer: FrameRenderer::new(public_url).with_mint_price(mint.price_wei),
            generator,
            mint,
        }
    }
}
