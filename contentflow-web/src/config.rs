use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::csrf::CSRF_COOKIE_NAME;
use crate::caption::DEFAULT_TAG_URL_BASE;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "contentflow.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Caption {
    /// Prefix of hashtag links, the page's `tagUrlBase`
    pub tag_url_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Client {
    pub csrf_cookie: String,
    #[serde(default)]
    pub cookies: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub caption: Caption,
    pub client: Client,
}

impl Settings {
    /// Load settings. Priority, highest first: environment variables, the
    /// given file (or `contentflow.toml`), built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.url", "http://127.0.0.1:8000")?
            .set_default("caption.tag_url_base", DEFAULT_TAG_URL_BASE)?
            .set_default("client.csrf_cookie", CSRF_COOKIE_NAME)?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                let current_dir_path = PathBuf::from(SETTINGS_FILE);
                if current_dir_path.exists() {
                    builder = builder.add_source(File::from(current_dir_path).required(false));
                }
            }
        }

        if let Ok(url) = std::env::var("CONTENTFLOW_SERVER_URL") {
            builder = builder.set_override("server.url", url)?;
        }
        if let Ok(base) = std::env::var("CONTENTFLOW_TAG_URL_BASE") {
            builder = builder.set_override("caption.tag_url_base", base)?;
        }
        if let Ok(cookies) = std::env::var("CONTENTFLOW_COOKIES") {
            builder = builder.set_override("client.cookies", cookies)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
