//! # 생성/다듬기/이미지 추천 프록시 핸들러
//!
//! 외부 백엔드를 호출해 초안 세션에 들어갈 내용을 만들어 돌려주는
//! 핸들러들입니다. 여기서는 아무것도 저장하지 않습니다 — 응답은 전부
//! 클라이언트의 초안 세션으로 들어가고, 명시적 저장이 있을 때에만
//! 버전이 됩니다 (routes/versions.rs 참고).
//!
//! ## 엔드포인트
//! - `POST /api/v1/generate` → `{ topic }`으로 블로그 초안 생성
//! - `POST /api/v1/refine`   → `{ content, feedback }`로 초안 다듬기
//! - `GET  /api/v1/images`   → `?topic=`으로 이미지 URL 추천

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppError, services::draft::DraftSession};

use super::documents::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub content: String,
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub topic: String,
}

/// `POST /generate` — 주제로 블로그 초안을 생성합니다.
///
/// 생성 백엔드의 날것 출력을 표시 가능한 HTML로 변환한 초안을 반환합니다.
/// 백엔드 장애는 재시도 없이 그대로 업스트림 에러로 전파됩니다.
pub async fn generate_draft(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<Value>, AppError> {
    if req.topic.trim().is_empty() {
        return Err(AppError::BadRequest("topic is required".to_string()));
    }

    let raw = state.generation.generate_post(&req.topic).await?;
    let draft = DraftSession::from_generated(&raw, req.topic);

    Ok(Json(json!({
        "content": draft.content,
        "prompt": draft.prompt
    })))
}

/// `POST /refine` — 기존 내용과 피드백으로 다듬어진 초안을 반환합니다.
pub async fn refine_draft(
    State(state): State<AppState>,
    Json(req): Json<RefineRequest>,
) -> Result<Json<Value>, AppError> {
    if req.feedback.trim().is_empty() {
        return Err(AppError::BadRequest("feedback is required".to_string()));
    }

    let raw = state.generation.refine(&req.content, &req.feedback).await?;
    let draft = DraftSession::from_refined(&raw, req.feedback);

    Ok(Json(json!({
        "content": draft.content,
        "prompt": draft.prompt
    })))
}

/// `GET /images?topic=` — 주제에 맞는 이미지 URL 목록을 반환합니다.
pub async fn suggest_images(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Json<Value>, AppError> {
    let images = state.images.suggest(&query.topic).await?;
    Ok(Json(json!({ "images": images })))
}

#[cfg(test)]
mod tests {
    use super::super::documents::tests::{send, test_app, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn generate_without_topic_is_rejected() {
        let app = test_app(test_state().await);

        let (status, body) =
            send(&app, "POST", "/generate", Some(json!({ "topic": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn generate_with_unreachable_backend_is_upstream_error() {
        // 테스트 상태의 생성 백엔드 주소는 연결 불가능한 포트입니다.
        let app = test_app(test_state().await);

        let (status, body) =
            send(&app, "POST", "/generate", Some(json!({ "topic": "rust" }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "upstream_error");
    }

    #[tokio::test]
    async fn refine_without_feedback_is_rejected() {
        let app = test_app(test_state().await);

        let (status, _) = send(
            &app,
            "POST",
            "/refine",
            Some(json!({ "content": "<p>x</p>", "feedback": " " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
