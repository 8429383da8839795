use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Loads `configuration.*` and `APP__` variables, falling back to the
    /// given port when neither source sets one.
    pub fn load_with_default_port(port: u16) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .set_default("port", i64::from(port))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
