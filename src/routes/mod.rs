//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 CRUD 핸들러 + 앱 공유 상태(AppState)
//! - `versions`: 버전 저장/전환/삭제 핸들러
//! - `generate`: 생성/다듬기/이미지 추천 프록시 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)

use axum::{
    routing::{get, post, put},
    Router,
};

pub mod documents;
pub mod generate;
pub mod health;
pub mod versions;

// 각 모듈의 핸들러 함수들을 재공개하여
// `routes::list_documents`처럼 바로 접근 가능하게 합니다.
pub use documents::*;
pub use generate::*;
pub use health::*;
pub use versions::*;

/// API 라우터를 구성합니다.
///
/// main과 라우터 수준 테스트가 같은 구성을 쓰도록 함수로 분리했습니다.
/// 요청 제한 미들웨어는 클라이언트 주소(ConnectInfo)가 필요하므로
/// 여기서가 아니라 main에서 씌웁니다.
pub fn api_router(state: documents::AppState) -> Router {
    Router::new()
        // 문서(Document) CRUD API
        // .post()를 .route()에 체이닝하면 같은 경로에 여러 HTTP 메서드를 매핑할 수 있습니다.
        .route(
            "/documents",
            get(list_documents)
                .post(create_document)
                .delete(delete_document),
        )
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route("/documents/{id}", get(get_document))
        // 버전 이력 API: 초안 저장(Append), 전환(SwitchTo), 삭제(Delete)
        .route("/documents/{id}/versions", post(save_version))
        .route(
            "/documents/{id}/versions/{index}",
            put(switch_version).delete(delete_version),
        )
        // 생성/다듬기/이미지 추천 프록시 API
        .route("/generate", post(generate_draft))
        .route("/refine", post(refine_draft))
        .route("/images", get(suggest_images))
        // 헬스체크 API (서버 상태 확인용)
        .route("/health", get(health_check))
        // .with_state(): 이 라우터의 모든 핸들러에서 AppState를 사용할 수 있게 합니다.
        .with_state(state)
}
