use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 현재 시각을 RFC 3339(ISO-8601) 문자열로 반환합니다.
/// 버전 타임스탬프와 문서의 created_at/updated_at에 공통으로 사용합니다.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 문서 내용의 한 스냅샷.
///
/// `is_active` 플래그는 저장하지 않습니다. 활성 버전의 단일 출처(source of
/// truth)는 `Document::current_version` 인덱스이며, 응답 직렬화 시점에
/// 인덱스로부터 유도됩니다. 인덱스와 플래그를 둘 다 저장하면 서로 어긋날 수
/// 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub content: String,
    /// 이 버전을 만들어낸 지시문(AI 생성/다듬기인 경우에만 존재)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// RFC 3339 문자열
    pub timestamp: String,
}

/// 버전 이력을 포함한 문서 전체.
///
/// 불변 조건(invariant) — 생성과 모든 변경 이후에 항상 성립해야 합니다:
/// - `versions`는 비어 있지 않다 (인덱스 0 = 원본, 절대 삭제 불가)
/// - `0 <= current_version < versions.len()`
/// - `content`는 `versions[current_version].content`의 비정규화 복사본
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub topic: Option<String>,
    pub title: Option<String>,
    pub images: Vec<String>,
    pub versions: Vec<Version>,
    pub current_version: usize,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl Document {
    /// 정확히 하나의 버전(인덱스 0, 포인터 0)을 가진 새 문서를 생성합니다.
    /// 식별자는 UUIDv7 문자열입니다.
    pub fn new(content: String, topic: Option<String>, title: Option<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            content: content.clone(),
            topic,
            title,
            images: Vec::new(),
            versions: vec![Version {
                content,
                prompt: None,
                timestamp: now.clone(),
            }],
            current_version: 0,
            created_at: now,
            updated_at: None,
        }
    }

    /// API 응답용 페이로드로 변환합니다.
    /// 각 버전의 `isActive`는 `current_version` 인덱스에서 유도합니다.
    pub fn to_payload(&self) -> DocumentPayload {
        DocumentPayload {
            id: self.id.clone(),
            content: self.content.clone(),
            topic: self.topic.clone(),
            title: self.title.clone(),
            images: self.images.clone(),
            versions: self
                .versions
                .iter()
                .enumerate()
                .map(|(i, v)| VersionPayload {
                    content: v.content.clone(),
                    prompt: v.prompt.clone(),
                    timestamp: v.timestamp.clone(),
                    is_active: i == self.current_version,
                })
                .collect(),
            current_version: self.current_version,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

/// 문서의 외부(JSON) 표현.
/// 프론트엔드 계약에 맞춰 camelCase 필드명과 `_id` 키를 사용합니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub images: Vec<String>,
    pub versions: Vec<VersionPayload>,
    pub current_version: usize,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 버전의 외부(JSON) 표현. `isActive`는 저장값이 아니라 유도값입니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionPayload {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub timestamp: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub content: String,
    pub topic: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDocumentRequest {
    pub id: String,
}

/// 초안(draft)을 새 버전으로 저장할 때의 요청 본문
#[derive(Debug, Deserialize)]
pub struct SaveVersionRequest {
    pub content: String,
    /// 이 내용을 만들어낸 지시문 (AI 생성/다듬기였다면 전달)
    pub prompt: Option<String>,
}
