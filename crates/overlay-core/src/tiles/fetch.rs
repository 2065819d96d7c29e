//! Tile download over HTTP(S).
//!
//! Uses the curl crate (libcurl) for a plain GET per tile. One attempt per
//! tile; any failure is returned to the caller.

use anyhow::Result;
use std::time::Duration;

use super::{expand_template, validate_template, TileId, TileSource};
use crate::config::TileConfig;
use crate::error::TileError;

/// Fetches tiles from a slippy-map server given a `{z}/{x}/{y}` URL template.
#[derive(Debug, Clone)]
pub struct HttpTileSource {
    url_template: String,
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpTileSource {
    pub fn new(cfg: &TileConfig) -> Result<Self> {
        validate_template(&cfg.url_template)?;
        Ok(Self {
            url_template: cfg.url_template.clone(),
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        })
    }

    pub fn tile_url(&self, tile: &TileId) -> String {
        expand_template(&self.url_template, tile)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, TileError> {
        let transport = |source| TileError::Transport {
            url: url.to_string(),
            source,
        };
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(5).map_err(transport)?;
        easy.useragent(&self.user_agent).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let code = easy.response_code().map_err(transport)?;
        if !(200..300).contains(&code) {
            return Err(TileError::Http {
                url: url.to_string(),
                code,
            });
        }
        if body.is_empty() {
            return Err(TileError::Empty {
                url: url.to_string(),
            });
        }
        Ok(body)
    }
}

impl TileSource for HttpTileSource {
    fn fetch(&self, tile: &TileId) -> Result<Vec<u8>> {
        let url = self.tile_url(tile);
        let bytes = self.get(&url)?;
        tracing::debug!(tile = %tile, bytes = bytes.len(), "fetched tile");
        Ok(bytes)
    }
}
