use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use frame_api::{codec, render_get, to_html, FrameContext, MintConfig};
use shared::domain::{FrameData, FrameState};
use spell_generation::MissingSpellGenerator;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the state parameter for a hand-built session.
    Encode {
        #[arg(long, value_enum, default_value = "element-selection")]
        state: StateArg,
        #[arg(long)]
        element: Option<String>,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        metadata_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Print the session a state parameter decodes to.
    Decode { param: String },
    /// Print the HTML a GET with this state parameter would return.
    Render {
        param: Option<String>,
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        public_url: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StateArg {
    ElementSelection,
    StyleSelection,
    KeywordInput,
    Generating,
    Preview,
    Minting,
}

impl From<StateArg> for FrameState {
    fn from(value: StateArg) -> Self {
        match value {
            StateArg::ElementSelection => Self::ElementSelection,
            StateArg::StyleSelection => Self::StyleSelection,
            StateArg::KeywordInput => Self::KeywordInput,
            StateArg::Generating => Self::Generating,
            StateArg::Preview => Self::Preview,
            StateArg::Minting => Self::Minting,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            state,
            element,
            style,
            keyword,
            metadata_url,
            image_url,
            page,
        } => {
            let data = FrameData {
                state: state.into(),
                element,
                style,
                keyword,
                metadata_url,
                image_url,
                page,
            };
            codec::validate(&data).context("session would be rejected on decode")?;
            println!("{}", codec::encode(&data));
        }
        Command::Decode { param } => {
            let data = codec::decode(&param);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Render { param, public_url } => {
            let ctx = FrameContext::new(
                public_url,
                Arc::new(MissingSpellGenerator),
                MintConfig::default(),
            );
            println!("{}", to_html(&render_get(&ctx, param.as_deref())));
        }
    }

    Ok(())
}
