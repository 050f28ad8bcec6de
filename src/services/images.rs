//! # 이미지 추천 백엔드 클라이언트
//!
//! 주제(topic)로 이미지 검색 API를 호출해 본문에 넣을 만한
//! 이미지 URL 목록을 가져오는 얇은 래퍼입니다.

use serde::Deserialize;

use crate::error::AppError;

/// 한 번에 가져올 이미지 추천 수
const SUGGESTION_COUNT: u32 = 6;

/// 이미지 검색 응답 (필요한 필드만 역직렬화)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ImageUrls,
}

#[derive(Debug, Deserialize)]
struct ImageUrls {
    regular: String,
}

/// 이미지 백엔드 호출에서 발생할 수 있는 에러
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image backend error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// 이미지 추천 백엔드 HTTP 클라이언트
#[derive(Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ImageClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// 기존 [`reqwest::Client`]를 재사용하여 생성합니다.
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// 주제에 맞는 이미지 URL 목록을 순서대로 반환합니다.
    pub async fn suggest(&self, topic: &str) -> Result<Vec<String>, ImageError> {
        let url = format!("{}/search/photos", self.base_url);
        let per_page = SUGGESTION_COUNT.to_string();
        let mut request = self
            .client
            .get(&url)
            .query(&[("query", topic), ("per_page", per_page.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Client-ID {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.results.into_iter().map(|r| r.urls.regular).collect())
    }
}
