use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub bookings: BookingsConfig,
    pub supplier: SupplierConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingsConfig {
    /// Directory where booking records are written, one JSON file per id.
    pub dir: String,
    /// Directory where rendered receipts land.
    pub receipts_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SupplierConfig {
    pub max_results: u32,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub max_message_length: usize,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Built-in defaults keep the engine runnable with no config tree
            .set_default("bookings.dir", "bookings")?
            .set_default("bookings.receipts_dir", "receipts")?
            .set_default("supplier.max_results", 10)?
            .set_default("chat.max_message_length", 2000)?
            // Optional file layers, most specific last
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Environment overrides, e.g. CARAVEL__BOOKINGS__DIR=/tmp/bookings
            .add_source(config::Environment::with_prefix("CARAVEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
