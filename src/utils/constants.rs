use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref DATABASE_MAX_CONNECTIONS: u32 = load_max_connections();
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_max_connections() -> u32 {
    load_env();
    parse_max_connections(
        std_env::var(env::DATABASE_MAX_CONNECTIONS_ENV_VAR).ok().as_deref(),
    )
}

fn parse_max_connections(value: Option<&str>) -> u32 {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => match value.parse::<u32>() {
            Ok(max) if max > 0 => max,
            _ => {
                tracing::warn!(
                    "Ignoring invalid {}: {}",
                    env::DATABASE_MAX_CONNECTIONS_ENV_VAR,
                    value
                );
                DEFAULT_DATABASE_MAX_CONNECTIONS
            }
        },
        _ => DEFAULT_DATABASE_MAX_CONNECTIONS,
    }
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const DATABASE_MAX_CONNECTIONS_ENV_VAR: &str =
        "DATABASE_MAX_CONNECTIONS";
}

pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[test]
fn test_max_connections_defaults() {
    for value in [None, Some(""), Some("  "), Some("0"), Some("many")] {
        assert_eq!(
            parse_max_connections(value),
            DEFAULT_DATABASE_MAX_CONNECTIONS,
            "Unexpected pool size for {:?}",
            value
        );
    }
}

#[test]
fn test_max_connections_override() {
    assert_eq!(parse_max_connections(Some("12")), 12);
    assert_eq!(parse_max_connections(Some(" 3 ")), 3);
}
