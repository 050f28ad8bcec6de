//! # 텍스트 생성 백엔드 클라이언트
//!
//! 외부 생성 API(프롬프트 입력 → 텍스트 출력)에 대한 HTTP 클라이언트입니다.
//! 블로그 초안 생성과 다듬기(refinement) 두 가지 호출을 제공합니다.
//!
//! 재시도는 하지 않습니다 — 실패는 즉시 호출자에게 전파되고,
//! 핸들러에서 일반적인 업스트림 에러 응답으로 변환됩니다.
//! 진행 중인 호출의 취소도 구현하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 한 번의 생성 호출에서 요청할 최대 토큰 수
const MAX_TOKENS: u32 = 2048;

/// 생성 백엔드 HTTP 클라이언트.
///
/// `reqwest::Client`는 내부적으로 연결 풀을 공유하므로
/// clone해도 새 연결 풀이 만들어지지 않습니다.
#[derive(Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// 생성 백엔드 `/v1/complete` 요청 본문
#[derive(Debug, Serialize)]
struct CompleteRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

/// 생성 백엔드 응답 본문
#[derive(Debug, Deserialize)]
struct CompleteResponse {
    text: String,
}

/// 생성 백엔드 호출에서 발생할 수 있는 에러
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// HTTP 요청 자체가 실패 (네트워크, DNS, TLS 등)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 백엔드가 2xx가 아닌 상태 코드를 반환
    #[error("generation backend error ({status}): {body}")]
    Api {
        /// HTTP 상태 코드
        status: u16,
        /// 디버깅용 응답 본문
        body: String,
    },
}

// 핸들러에서 `?`로 바로 AppError::Upstream으로 전파할 수 있게 합니다.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl GenerationClient {
    /// 새 클라이언트를 생성합니다.
    ///
    /// * `base_url` - 백엔드 기본 URL (예: `https://api.example.com`)
    /// * `api_key`  - 선택적 인증 키. 있으면 Bearer 헤더로 전달합니다.
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// 기존 [`reqwest::Client`]를 재사용하여 생성합니다
    /// (여러 클라이언트가 연결 풀을 공유할 때 유용).
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

    /// 주제(topic)로 블로그 글 초안을 생성합니다. 날것의 텍스트를 반환합니다.
    pub async fn generate_post(&self, topic: &str) -> Result<String, GenerationError> {
        self.complete(&build_post_prompt(topic)).await
    }

    /// 기존 내용과 사용자 피드백으로 다듬어진 텍스트를 생성합니다.
    pub async fn refine(&self, content: &str, feedback: &str) -> Result<String, GenerationError> {
        self.complete(&build_refine_prompt(content, feedback)).await
    }

    /// `POST {base}/v1/complete` 호출의 공통 구현.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/v1/complete", self.base_url);
        let mut request = self.client.post(&url).json(&CompleteRequest {
            prompt,
            max_tokens: MAX_TOKENS,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // 에러 본문은 진단용으로만 읽습니다. 읽기 실패해도 상태 코드는 보존.
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completed: CompleteResponse = response.json().await?;
        Ok(completed.text)
    }
}

/// 주제로부터 블로그 생성 프롬프트를 만듭니다.
fn build_post_prompt(topic: &str) -> String {
    format!(
        "Write a well-structured blog post about the following topic. \
         Separate paragraphs with blank lines. Do not include a title.\n\n\
         Topic: {topic}"
    )
}

/// 기존 내용 + 피드백으로 다듬기 프롬프트를 만듭니다.
fn build_refine_prompt(content: &str, feedback: &str) -> String {
    format!(
        "Revise the following blog post according to the feedback. \
         Return the full revised post, with paragraphs separated by blank lines.\n\n\
         Feedback: {feedback}\n\nPost:\n{content}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_prompt_contains_topic() {
        let prompt = build_post_prompt("rust error handling");
        assert!(prompt.contains("Topic: rust error handling"));
    }

    #[test]
    fn refine_prompt_carries_feedback_and_content() {
        let prompt = build_refine_prompt("<p>draft</p>", "make it shorter");
        assert!(prompt.contains("Feedback: make it shorter"));
        assert!(prompt.contains("<p>draft</p>"));
        // 피드백이 본문보다 먼저 와야 모델이 지시를 놓치지 않습니다.
        assert!(prompt.find("Feedback:").unwrap() < prompt.find("Post:").unwrap());
    }
}
