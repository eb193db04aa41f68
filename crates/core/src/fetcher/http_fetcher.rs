//! HTTP implementation of `ChannelDataFetcher` against the upstream data API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::fetcher_model::{ChannelInfo, FetchError, VideoInfo};
use super::fetcher_traits::ChannelDataFetcher;
use crate::errors::Result;

/// Page size requested from the video listing endpoint.
const PAGE_LIMIT: usize = 50;

/// Safety limit on pages per listing; the guard below catches a stuck
/// cursor before this is ever reached.
const MAX_PAGES: usize = 10_000;

/// Response from the video listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoPage {
    items: Vec<VideoInfo>,
    next_page_token: Option<String>,
}

/// reqwest-backed fetcher for the channel data API.
pub struct HttpChannelDataFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChannelDataFetcher {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Make a GET request and decode the JSON body.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("Data API request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn fetch_video_page(
        &self,
        channel_id: &str,
        limit: usize,
        page_token: Option<&str>,
    ) -> std::result::Result<VideoPage, FetchError> {
        let limit = limit.to_string();
        let mut params = vec![("channelId", channel_id), ("limit", limit.as_str())];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.fetch("/v1/videos", &params).await
    }
}

#[async_trait]
impl ChannelDataFetcher for HttpChannelDataFetcher {
    async fn fetch_channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        let info: ChannelInfo = self
            .fetch("/v1/channels", &[("channelId", channel_id)])
            .await?;
        Ok(info)
    }

    async fn fetch_all_videos(&self, channel_id: &str) -> Result<Vec<VideoInfo>> {
        let mut videos: Vec<VideoInfo> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0usize;

        loop {
            if pages_fetched >= MAX_PAGES {
                return Err(FetchError::Api {
                    status: 0,
                    message: format!("Video listing exceeded {} pages", MAX_PAGES),
                }
                .into());
            }

            let page = self
                .fetch_video_page(channel_id, PAGE_LIMIT, page_token.as_deref())
                .await?;
            pages_fetched += 1;

            debug!(
                "Fetched {} videos for channel {} (page {})",
                page.items.len(),
                channel_id,
                pages_fetched
            );

            videos.extend(page.items);

            match page.next_page_token {
                // A repeated token means the cursor is stuck upstream.
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    return Err(FetchError::Api {
                        status: 0,
                        message: "Video listing cursor did not advance".to_string(),
                    }
                    .into());
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(videos)
    }

    async fn fetch_recent_videos(&self, channel_id: &str, max: usize) -> Result<Vec<VideoInfo>> {
        let page = self
            .fetch_video_page(channel_id, max.min(PAGE_LIMIT), None)
            .await?;
        let mut videos = page.items;
        videos.truncate(max);
        Ok(videos)
    }
}
