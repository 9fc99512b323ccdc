use std::env;

use anyhow::Context;
use common::{reasons::ReasonSet, utils::SaveVariant};
use dotenv::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Database configuration
    pub database_url: String,

    // Which `/saveRemarks` payload this deployment accepts
    pub save_variant: SaveVariant,
    pub reasons: ReasonSet,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let save_variant = match env::var("SAVE_VARIANT") {
            Ok(raw) => raw.parse::<SaveVariant>()?,
            Err(_) => SaveVariant::default(),
        };

        Ok(Config {
            server_host,
            server_port,
            database_url,
            save_variant,
            reasons: ReasonSet::from_env(),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
