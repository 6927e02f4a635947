use std::net::SocketAddr;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use log::info;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Config {
    pub db_uri: String,
    pub listen: SocketAddr,
    pub strategy: Strategy,
}

/// Which of the two data models the service runs on.
///
/// Both strategies expose the same ``products`` query; they differ in how an
/// item finds its book/movie row and in how a broken item surfaces (see
/// [`crate::catalog`]).
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// books/movies share their primary key with the owning item; resolution
    /// is a single left-joined query
    Joined,
    /// items carry an ``item_type`` discriminator plus an ``owner_id`` into
    /// the specific table; resolution does one lookup per item
    Discriminated,
}

impl Config {
    pub fn new() -> Self {
        info!("parsing config file at config.toml");
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CATALOG_"))
            .extract()
            .unwrap_or_else(|e| panic!("invalid configuration: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_are_lowercase() {
        let joined: Strategy = serde_json::from_str("\"joined\"").unwrap();
        assert_eq!(joined, Strategy::Joined);
        let discriminated: Strategy = serde_json::from_str("\"discriminated\"").unwrap();
        assert_eq!(discriminated, Strategy::Discriminated);
        assert!(serde_json::from_str::<Strategy>("\"Joined\"").is_err());
    }
}
