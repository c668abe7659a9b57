use super::{decode, transport, DEFAULT_API_URL};
use crate::scoreboard::{ActivityId, RawActivity};
use crate::source::{ActivitySource, DateRange, SourceError};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;

const MAX_PAGE_SIZE: usize = 200;

/// Authenticated Strava API handle.
#[derive(Debug, Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_url: String,
    access_token: String,
}

impl StravaClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_api_url(DEFAULT_API_URL, access_token)
    }

    pub fn with_api_url(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), api_url, access_token)
    }

    pub fn with_http(
        http: reqwest::Client,
        api_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn page(
        &self,
        range: DateRange,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<RawActivity>, SourceError> {
        self.get("athlete/activities", &page_query(range, page, per_page))
            .await
    }
}

fn page_query(range: DateRange, page: usize, per_page: usize) -> Vec<(&'static str, String)> {
    vec![
        ("after", range.after.timestamp().to_string()),
        ("before", range.before.timestamp().to_string()),
        ("page", page.to_string()),
        ("per_page", per_page.to_string()),
    ]
}

struct Paging {
    page: usize,
    remaining: usize,
    buffer: VecDeque<RawActivity>,
    exhausted: bool,
}

#[async_trait]
impl ActivitySource for StravaClient {
    fn activities(
        &self,
        range: DateRange,
        limit: usize,
    ) -> BoxStream<'_, Result<RawActivity, SourceError>> {
        let per_page = limit.clamp(1, MAX_PAGE_SIZE);
        let paging = Paging {
            page: 1,
            remaining: limit,
            buffer: VecDeque::new(),
            exhausted: false,
        };

        stream::unfold(paging, move |mut paging| async move {
            loop {
                if paging.remaining == 0 {
                    return None;
                }
                if let Some(activity) = paging.buffer.pop_front() {
                    paging.remaining -= 1;
                    return Some((Ok(activity), paging));
                }
                if paging.exhausted {
                    return None;
                }

                match self.page(range, paging.page, per_page).await {
                    Ok(batch) => {
                        tracing::debug!(page = paging.page, count = batch.len(), "activity page");
                        paging.exhausted = batch.len() < per_page;
                        paging.page += 1;
                        paging.buffer.extend(batch);
                    }
                    Err(err) => {
                        paging.remaining = 0;
                        return Some((Err(err), paging));
                    }
                }
            }
        })
        .boxed()
    }

    async fn activity(&self, id: ActivityId) -> Result<RawActivity, SourceError> {
        self.get(&format!("activities/{id}"), &[]).await
    }
}
