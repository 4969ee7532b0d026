use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

/// URL of this server's own secrets endpoint. Wildcard bind addresses
/// are reached over loopback.
fn local_secrets_url(host: &str, port: &str) -> String {
    let local_host = match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) if ip.is_unspecified() => Ipv4Addr::LOCALHOST.to_string(),
        Ok(IpAddr::V6(ip)) if ip.is_unspecified() => format!("[{}]", Ipv6Addr::LOCALHOST),
        Ok(IpAddr::V6(ip)) => format!("[{}]", ip),
        _ => host.to_string(),
    };
    format!("http://{}:{}/secrets/apiKey", local_host, port)
}

pub async fn run(host: String, port: String) -> Result<()> {
    let mut config = AppConfig::default();

    // The session fetches its key from this same server unless told
    // otherwise
    if env::var("TRIPCHAT_SECRETS_URL").is_err() {
        config.secrets_url = local_secrets_url(&host, &port);
    }

    api::serve(host, port, config).await
}
