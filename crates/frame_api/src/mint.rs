use shared::{
    error::{ApiException, ErrorCode},
    protocol::{MintTransaction, MintTxParams},
};

/// First four bytes of keccak256("mintSpell(string)").
pub const MINT_SPELL_SELECTOR: [u8; 4] = [0xee, 0xa7, 0x5e, 0x31];
pub const DEFAULT_CHAIN_ID: u64 = 84532;
pub const DEFAULT_MINT_PRICE_WEI: u128 = 1_000_000_000_000_000;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintConfig {
    pub contract_address: Option<String>,
    pub chain_id: u64,
    pub price_wei: u128,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            contract_address: None,
            chain_id: DEFAULT_CHAIN_ID,
            price_wei: DEFAULT_MINT_PRICE_WEI,
        }
    }
}

pub fn is_contract_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// ABI-encodes a `mintSpell(string)` call.
pub fn encode_mint_call(token_uri: &str) -> String {
    let bytes = token_uri.as_bytes();
    let padding = (WORD - bytes.len() % WORD) % WORD;
    let mut calldata = Vec::with_capacity(MINT_SPELL_SELECTOR.len() + 2 * WORD + bytes.len() + padding);
    calldata.extend_from_slice(&MINT_SPELL_SELECTOR);
    calldata.extend_from_slice(&abi_word(WORD as u128));
    calldata.extend_from_slice(&abi_word(bytes.len() as u128));
    calldata.extend_from_slice(bytes);
    calldata.resize(calldata.len() + padding, 0);
    format!("0x{}", hex::encode(calldata))
}

fn abi_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn build_mint_transaction(
    cfg: &MintConfig,
    token_uri: Option<&str>,
) -> Result<MintTransaction, ApiException> {
    let token_uri = token_uri
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .ok_or_else(|| ApiException::new(ErrorCode::Validation, "Missing tokenURI"))?;
    let contract = cfg
        .contract_address
        .as_deref()
        .ok_or_else(|| ApiException::new(ErrorCode::Internal, "Contract address not configured"))?;

    Ok(MintTransaction {
        chain_id: format!("eip155:{}", cfg.chain_id),
        method: "eth_sendTransaction".to_string(),
        params: MintTxParams {
            to: contract.to_string(),
            data: encode_mint_call(token_uri),
            value: cfg.price_wei.to_string(),
        },
    })
}

/// Formats a wei amount as ether without trailing zeros, e.g. `0.001`.
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:018}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

pub fn mint_button_label(price_wei: u128) -> String {
    format!("Mint NFT ({} ETH)", format_ether(price_wei))
}

#[cfg(test)]
#[path = "tests/mint_tests.rs"]
mod tests;
