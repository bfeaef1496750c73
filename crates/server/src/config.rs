use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use frame_api::mint::{is_contract_address, MintConfig, DEFAULT_CHAIN_ID, DEFAULT_MINT_PRICE_WEI};
use spell_generation::DEFAULT_GENERATION_TIMEOUT;
use tracing::warn;
use url::Url;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub public_url: String,
    pub generation_url: Option<String>,
    pub generation_timeout_secs: u64,
    pub contract_address: Option<String>,
    pub chain_id: u64,
    pub mint_price_wei: u128,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            public_url: "http://127.0.0.1:8080".into(),
            generation_url: None,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT.as_secs(),
            contract_address: None,
            chain_id: DEFAULT_CHAIN_ID,
            mint_price_wei: DEFAULT_MINT_PRICE_WEI,
        }
    }
}

impl Settings {
    pub fn mint_config(&self) -> MintConfig {
        MintConfig {
            contract_address: self.contract_address.clone(),
            chain_id: self.chain_id,
            price_wei: self.mint_price_wei,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let public_url = Url::parse(&self.public_url)
            .with_context(|| format!("invalid public url '{}'", self.public_url))?;
        if !matches!(public_url.scheme(), "http" | "https") {
            bail!("public url '{}' must use http or https", self.public_url);
        }
        if let Some(endpoint) = self.generation_url.as_deref() {
            Url::parse(endpoint)
                .with_context(|| format!("invalid generation url '{endpoint}'"))?;
        }
        if let Some(address) = self.contract_address.as_deref() {
            if !is_contract_address(address) {
                bail!("contract address '{address}' is not a 0x-prefixed 20-byte hex address");
            }
        }
        Ok(())
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    let settings = settings_from_sources(file.as_deref(), |key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}

/// Builds settings from defaults, then the flat settings file, then the
/// environment. `APP__` variables win over their plain counterparts.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();
    let file_cfg = file.map(parse_settings_file).unwrap_or_default();
    let pick = |file_key: &str, env_keys: &[&str]| {
        env_keys
            .iter()
            .find_map(|key| env(key))
            .or_else(|| file_cfg.get(file_key).cloned())
            .map(|v| v.trim().to_string())
    };

    if let Some(v) = pick("bind_addr", &["APP__BIND_ADDR", "SERVER_BIND"]) {
        settings.server_bind = v;
    }
    if let Some(v) = pick("public_url", &["APP__PUBLIC_URL", "PUBLIC_URL"]) {
        settings.public_url = v.trim_end_matches('/').to_string();
    }
    if let Some(v) = pick("generation_url", &["APP__GENERATION_URL", "GENERATION_URL"]) {
        settings.generation_url = Some(v).filter(|v| !v.is_empty());
    }
    if let Some(v) = pick("generation_timeout_secs", &["APP__GENERATION_TIMEOUT_SECS"])
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
    {
        settings.generation_timeout_secs = v;
    }
    if let Some(v) = pick("contract_address", &["APP__CONTRACT_ADDRESS", "CONTRACT_ADDRESS"]) {
        settings.contract_address = Some(v).filter(|v| !v.is_empty());
    }
    if let Some(v) = pick("chain_id", &["APP__CHAIN_ID"]).and_then(|v| v.parse::<u64>().ok()) {
        settings.chain_id = v;
    }
    if let Some(v) = pick("mint_price_wei", &["APP__MINT_PRICE_WEI"])
        .and_then(|v| v.parse::<u128>().ok())
    {
        settings.mint_price_wei = v;
    }

    settings
}

fn parse_settings_file(raw: &str) -> HashMap<String, String> {
    let table = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(error) => {
            warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file");
            return HashMap::new();
        }
    };
    table
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
