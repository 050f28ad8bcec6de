//! # 버전(Version) 라우트 핸들러
//!
//! 문서의 버전 이력을 다루는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `POST   /api/v1/documents/{id}/versions`         → 초안을 새 버전으로 저장 (Append)
//! - `PUT    /api/v1/documents/{id}/versions/{index}` → 활성 버전 전환 (SwitchTo)
//! - `DELETE /api/v1/documents/{id}/versions/{index}` → 버전 삭제 (원본 제외)
//!
//! 변경은 항상 "메모리에서 버전 관리자 연산 → 문서 전체 저장" 순서로
//! 이루어집니다. 저장이 실패하면 저장소의 문서는 호출 전 상태 그대로입니다.

use crate::{
    db,
    error::AppError,
    models::*,
    services::{draft::DraftSession, versions},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::documents::AppState;

/// 문서를 불러오되, 임시 식별자나 없는 문서는 NotFound로 처리합니다.
async fn load_document(state: &AppState, id: &str) -> Result<Document, AppError> {
    let key = DocumentId::parse(id)
        .as_store_key()
        .ok_or(AppError::NotFound)?;
    db::get_document(&state.pool, &key)
        .await?
        .ok_or(AppError::NotFound)
}

/// `POST /documents/{id}/versions` — 초안 세션을 새 버전으로 저장합니다.
///
/// 명시적 저장(Save)만이 초안을 내구성 있는 버전으로 만듭니다.
/// 응답은 새로 저장된 문서 전체이며, 클라이언트는 이것으로 초안 상태를
/// 교체합니다.
pub async fn save_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SaveVersionRequest>,
) -> Result<Json<DocumentPayload>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }

    let mut doc = load_document(&state, &id).await?;

    let draft = DraftSession::from_edited(req.content, req.prompt);
    draft.commit(&mut doc);
    db::save_document(&state.pool, &doc).await?;

    tracing::info!(
        document_id = %doc.id,
        versions = doc.versions.len(),
        "draft saved as new version"
    );
    Ok(Json(doc.to_payload()))
}

/// `PUT /documents/{id}/versions/{index}` — 활성 버전을 전환합니다.
///
/// 포인터 이동도 저장합니다. 저장하지 않으면 새로고침 시 사용자가
/// 선택했던 버전이 사라진 것처럼 보이기 때문입니다.
pub async fn switch_version(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<DocumentPayload>, AppError> {
    let mut doc = load_document(&state, &id).await?;

    versions::switch_to(&mut doc, index)?;
    db::save_document(&state.pool, &doc).await?;

    Ok(Json(doc.to_payload()))
}

/// `DELETE /documents/{id}/versions/{index}` — 버전을 삭제합니다.
///
/// - 인덱스 0(원본)은 `protected_version`으로 거부합니다.
/// - 임시 형식의 식별자는 저장소에 접근하지 않고 성공 no-op으로 답합니다.
pub async fn delete_version(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Value>, AppError> {
    let key = match DocumentId::parse(&id).as_store_key() {
        Some(key) => key,
        None => {
            // 저장된 적 없는 초안의 임시 키 — 지울 버전도 없습니다.
            return Ok(Json(json!({
                "success": true,
                "message": "nothing to delete"
            })));
        }
    };

    let mut doc = db::get_document(&state.pool, &key)
        .await?
        .ok_or(AppError::NotFound)?;

    versions::delete(&mut doc, index)?;
    db::save_document(&state.pool, &doc).await?;

    tracing::info!(document_id = %doc.id, index, "version deleted");
    Ok(Json(json!({
        "success": true,
        "document": doc.to_payload()
    })))
}
