use std::env;

use services::services::{email::EmailConfig, storage::StorageConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub email: Option<EmailConfig>,
    pub storage: Option<StorageConfig>,
}

impl Config {
    /// Read configuration from the environment. Email and storage are each
    /// enabled only when their full variable set is present.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://bridgebreak.db".to_string());

        let email = match (
            env::var("EMAIL_API_URL"),
            env::var("EMAIL_API_KEY"),
            env::var("APP_URL"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(app_url)) => Some(EmailConfig {
                api_url,
                api_key,
                app_url,
            }),
            _ => None,
        };

        let storage = match (env::var("STORAGE_URL"), env::var("STORAGE_SERVICE_KEY")) {
            (Ok(base_url), Ok(service_key)) => Some(StorageConfig {
                base_url,
                service_key,
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            email,
            storage,
        })
    }
}
