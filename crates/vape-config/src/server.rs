use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub metrics_address: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            metrics_address: env::var("METRICS_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:9090".to_string()),
        }
    }
}
