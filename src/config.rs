use std::net::SocketAddr;

/// Runtime configuration, read from the environment (a `.env` file is
/// honored via dotenvy before this is built). Every field has a
/// development default.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub frontend_dir: String,
    pub chat_webhook_url: String,
    pub summary_webhook_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            db_path: std::env::var("CARENEST_DB_PATH")
                .unwrap_or_else(|_| "carenest_data".to_string()),
            frontend_dir: std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string()),
            chat_webhook_url: std::env::var("AI_CHAT_WEBHOOK_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/tinystep-chatbot".to_string()),
            summary_webhook_url: std::env::var("AI_SUMMARY_WEBHOOK_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/carebuddy-agent".to_string()),
        }
    }
}
