use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub data_dir: PathBuf,
    pub page_size: usize,
    pub cors_allow_any: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:5001");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        let page_size: usize = env_or_parse("PAGE_SIZE", "15")?;
        if page_size == 0 {
            return Err(anyhow!("invalid PAGE_SIZE: must be at least 1"));
        }

        Ok(Self {
            http_addr,
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            page_size,
            cors_allow_any: env_or_parse("CORS_ALLOW_ANY", "true")?,
        })
    }

    pub fn posts_file(&self) -> PathBuf {
        self.data_dir.join("posts.json")
    }

    pub fn comments_file(&self) -> PathBuf {
        self.data_dir.join("comments.json")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
