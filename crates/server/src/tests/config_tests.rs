use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_sources() {
    let settings = settings_from_sources(None, env_of(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.generation_timeout_secs, 30);
    assert_eq!(settings.chain_id, 84532);
    settings.validate().expect("defaults are valid");
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
        bind_addr = "0.0.0.0:9000"
        public_url = "https://spells.example/"
        generation_url = "https://gen.example/api/generate-spell"
        generation_timeout_secs = 12
        chain_id = 8453
    "#;
    let settings = settings_from_sources(Some(file), env_of(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.public_url, "https://spells.example");
    assert_eq!(
        settings.generation_url.as_deref(),
        Some("https://gen.example/api/generate-spell")
    );
    assert_eq!(settings.generation_timeout_secs, 12);
    assert_eq!(settings.chain_id, 8453);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let file = r#"bind_addr = "0.0.0.0:9000""#;
    let settings = settings_from_sources(
        Some(file),
        env_of(&[
            ("SERVER_BIND", "127.0.0.1:7000"),
            ("APP__BIND_ADDR", "127.0.0.1:7100"),
            ("CONTRACT_ADDRESS", "0x5FbDB2315678afecb367f032d93F642f64180aa3"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7100");
    assert_eq!(
        settings.mint_config().contract_address.as_deref(),
        Some("0x5FbDB2315678afecb367f032d93F642f64180aa3")
    );
}

#[test]
fn unparsable_numbers_keep_defaults() {
    let settings = settings_from_sources(
        None,
        env_of(&[
            ("APP__GENERATION_TIMEOUT_SECS", "soon"),
            ("APP__CHAIN_ID", "-1"),
            ("APP__MINT_PRICE_WEI", "0.001"),
        ]),
    );
    assert_eq!(settings.generation_timeout_secs, 30);
    assert_eq!(settings.chain_id, 84532);
    assert_eq!(settings.mint_price_wei, 1_000_000_000_000_000);
}

#[test]
fn unreadable_file_is_ignored() {
    let settings = settings_from_sources(Some("this is = = not toml"), env_of(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn invalid_contract_address_fails_validation() {
    let settings = settings_from_sources(None, env_of(&[("CONTRACT_ADDRESS", "0xabc")]));
    assert!(settings.validate().is_err());
}

#[test]
fn non_http_public_url_fails_validation() {
    let settings = settings_from_sources(None, env_of(&[("PUBLIC_URL", "ftp://spells.example")]));
    assert!(settings.validate().is_err());
}
