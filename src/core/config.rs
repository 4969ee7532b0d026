use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
    pub secrets_url: String,
    pub system_message: Option<String>,
}

// Falls back to the default when the variable is missing or doesn't
// parse so a typo in the environment can't keep the app from starting.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value for {}: {}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "2222";
        let openai_api_hostname = env::var("TRIPCHAT_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("TRIPCHAT_LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let secrets_url = env::var("TRIPCHAT_SECRETS_URL")
            .unwrap_or(format!("http://{}:{}/secrets/apiKey", host, port));
        let system_message = env::var("TRIPCHAT_SYSTEM_MESSAGE").ok();

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            max_tokens: env_or("TRIPCHAT_MAX_TOKENS", 800),
            temperature: env_or("TRIPCHAT_TEMPERATURE", 0.7),
            timeout_secs: env_or("TRIPCHAT_TIMEOUT_SECS", 60),
            secrets_url,
            system_message,
        }
    }
}
