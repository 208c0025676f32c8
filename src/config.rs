use std::env;
use dotenvy::dotenv;
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_read_per_min: u32,
    pub rate_write_per_min: u32,

    pub api_prefix: String,

    /// Cumulative-percent threshold that closes the Pareto focus set
    pub pareto_focus_percent: f64,

    /// How many recent baselines to preload into the sector cache
    pub warmup_baselines: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            rate_read_per_min: env::var("RATE_READ_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
            rate_write_per_min: env::var("RATE_WRITE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            pareto_focus_percent: env::var("PARETO_FOCUS_PERCENT")
                .unwrap_or_else(|_| "80".to_string())
                .parse()
                .unwrap(),

            warmup_baselines: env::var("WARMUP_BASELINES")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap(),
        }
    }
}
