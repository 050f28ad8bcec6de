//! # 문서(Document) 라우트 핸들러
//!
//! 문서의 생성/조회/삭제를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /api/v1/documents`      → 문서 목록 조회 (최신 생성 순)
//! - `POST   /api/v1/documents`      → 새 문서 생성 (버전 1개 포함)
//! - `GET    /api/v1/documents/{id}` → 단일 문서 조회
//! - `DELETE /api/v1/documents`      → 본문 `{ id }`로 완전 삭제
//!
//! ## Axum 핸들러 패턴
//! Axum 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다.
//! Extractor는 HTTP 요청에서 데이터를 자동으로 추출합니다:
//! - `State(state)`: 앱 전역 상태 (DB 풀, 업스트림 클라이언트 등)
//! - `Path(id)`: URL 경로 파라미터 (예: /documents/{id}에서 id)
//! - `Json(body)`: 요청 본문을 JSON으로 파싱하여 구조체로 변환
//!
//! 반환 타입이 `Result<T, AppError>`이면, Axum이 자동으로:
//! - `Ok(T)` → T를 HTTP 응답으로 변환 (IntoResponse 트레이트 사용)
//! - `Err(AppError)` → AppError를 에러 JSON 응답으로 변환

use std::sync::Arc;

use crate::{
    db,            // 데이터베이스 접근 계층
    error::AppError,
    middleware::rate_limit::RateLimiter,
    models::*,     // 데이터 모델 구조체들
    services::{generation::GenerationClient, images::ImageClient},
};
use axum::{
    extract::{Path, State}, // Axum Extractor: 요청에서 데이터 추출
    http::StatusCode,        // HTTP 상태 코드 (200, 201, 404 등)
    Json,                    // JSON 요청/응답 래퍼
};
use serde_json::{json, Value}; // JSON 값 생성 유틸리티
use sqlx::SqlitePool;          // SQLite 연결 풀 타입

// #[derive(Clone)]: AppState가 Clone 트레이트를 구현하게 합니다.
// Axum의 State Extractor는 내부적으로 AppState를 clone하므로 필수입니다.
// SqlitePool과 업스트림 클라이언트는 내부적으로 Arc(참조 카운트)를 쓰므로
// clone해도 실제 자원이 복제되지 않습니다.

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 의존성 주입(Dependency Injection) 메커니즘입니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 텍스트 생성 백엔드 클라이언트
    pub generation: GenerationClient,
    /// 이미지 추천 백엔드 클라이언트
    pub images: ImageClient,
    /// 클라이언트 주소별 슬라이딩 윈도우 카운터
    pub limiter: Arc<RateLimiter>,
}

/// `GET /documents` — 모든 문서를 최신 생성 순으로 반환합니다.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentPayload>>, AppError> {
    let docs = db::list_documents(&state.pool).await?;
    Ok(Json(docs.iter().map(Document::to_payload).collect()))
}

/// `POST /documents` — 새 문서를 생성합니다.
///
/// 생성된 문서는 정확히 하나의 버전(인덱스 0 = 원본, 포인터 0)을 가집니다.
pub async fn create_document(
    State(state): State<AppState>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentPayload>), AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }

    let doc = Document::new(req.content, req.topic, req.title);
    db::create_document(&state.pool, &doc).await?;

    tracing::info!(document_id = %doc.id, "document created");
    Ok((StatusCode::CREATED, Json(doc.to_payload())))
}

/// `GET /documents/{id}` — 단일 문서를 조회합니다.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentPayload>, AppError> {
    // 임시 식별자는 저장소에 존재할 수 없으므로 조회할 것도 없습니다.
    let key = match DocumentId::parse(&id).as_store_key() {
        Some(key) => key,
        None => return Err(AppError::NotFound),
    };

    let doc = db::get_document(&state.pool, &key)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(doc.to_payload()))
}

/// `DELETE /documents` — 본문 `{ id }`의 문서를 완전 삭제(hard delete)합니다.
///
/// 임시 형식의 식별자(아직 저장된 적 없는 초안)는 "지울 것이 없음"으로
/// 성공 no-op 처리합니다. 저장소에는 접근하지 않습니다.
pub async fn delete_document(
    State(state): State<AppState>,
    Json(req): Json<DeleteDocumentRequest>,
) -> Result<Json<Value>, AppError> {
    let key = match DocumentId::parse(&req.id).as_store_key() {
        Some(key) => key,
        None => {
            // 클라이언트 로컬 초안의 임시 키 — 저장소에 없는 게 정상입니다.
            return Ok(Json(json!({
                "success": true,
                "message": "nothing to delete"
            })));
        }
    };

    if !db::delete_document(&state.pool, &key).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(document_id = %key, "document deleted");
    Ok(Json(json!({ "success": true })))
}

// ── 라우터 수준 테스트 ──
// 실제 소켓 없이 tower::ServiceExt::oneshot으로 라우터에 요청을 보내고,
// 인메모리 SQLite(sqlite::memory:)로 전체 흐름을 검증합니다.
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::routes::api_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;
    use tower::util::ServiceExt;

    /// 인메모리 DB 위에 테스트용 상태를 만듭니다.
    /// 인메모리 SQLite는 연결마다 별개의 DB이므로 연결을 1개로 고정합니다.
    pub(crate) async fn test_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        AppState {
            pool,
            // 업스트림 클라이언트는 이 테스트들에서 호출되지 않습니다.
            generation: GenerationClient::new("http://127.0.0.1:0".to_string(), None),
            images: ImageClient::new("http://127.0.0.1:0".to_string(), None),
            limiter: Arc::new(RateLimiter::new(1000, Duration::from_secs(60))),
        }
    }

    pub(crate) fn test_app(state: AppState) -> Router {
        api_router(state)
    }

    pub(crate) async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(json_body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json_body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn create_returns_document_with_single_version() {
        let app = test_app(test_state().await);

        let (status, body) = send(
            &app,
            "POST",
            "/documents",
            Some(json!({ "content": "<p>A</p>", "topic": "rust", "title": "T" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["versions"].as_array().unwrap().len(), 1);
        assert_eq!(body["currentVersion"], 0);
        assert_eq!(body["versions"][0]["isActive"], true);
        assert!(body["_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn create_without_content_is_rejected() {
        let app = test_app(test_state().await);

        let (status, body) = send(
            &app,
            "POST",
            "/documents",
            Some(json!({ "content": "   " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let app = test_app(test_state().await);

        let (_, first) = send(&app, "POST", "/documents", Some(json!({ "content": "one" }))).await;
        let (_, second) =
            send(&app, "POST", "/documents", Some(json!({ "content": "two" }))).await;

        let (status, body) = send(&app, "GET", "/documents", None).await;
        assert_eq!(status, StatusCode::OK);

        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        // 나중에 만든 문서가 먼저 옵니다.
        assert_eq!(list[0]["_id"], second["_id"]);
        assert_eq!(list[1]["_id"], first["_id"]);
    }

    #[tokio::test]
    async fn get_unknown_document_is_not_found() {
        let app = test_app(test_state().await);

        let missing = uuid::Uuid::now_v7();
        let (status, body) = send(&app, "GET", &format!("/documents/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn delete_document_hard_deletes() {
        let app = test_app(test_state().await);

        let (_, created) =
            send(&app, "POST", "/documents", Some(json!({ "content": "bye" }))).await;
        let id = created["_id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, "DELETE", "/documents", Some(json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(&app, "GET", &format!("/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_with_temporary_id_is_success_noop() {
        let app = test_app(test_state().await);

        let (status, body) = send(
            &app,
            "DELETE",
            "/documents",
            Some(json!({ "id": "not-a-valid-object-id" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "nothing to delete");
    }

    #[tokio::test]
    async fn delete_missing_persisted_id_is_not_found() {
        let app = test_app(test_state().await);

        let missing = uuid::Uuid::now_v7().to_string();
        let (status, _) = send(&app, "DELETE", "/documents", Some(json!({ "id": missing }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
