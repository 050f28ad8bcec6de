//! # 문서 식별자 모듈
//!
//! 클라이언트가 만든 임시 식별자와 저장소가 부여한 영속 식별자는
//! 하나의 문자열 공간을 공유합니다. 형태로 추측(sniffing)하는 대신
//! 명시적인 태그드 유니언(enum)으로 구분합니다.
//!
//! - `Persisted`: 저장소가 부여한 UUIDv7 키. 저장소 조회/삭제 대상.
//! - `Temporary`: 아직 저장되지 않은 초안의 클라이언트 로컬 키.
//!   삭제 요청이 들어오면 "지울 것이 없음"으로 처리합니다 (에러 아님).

use uuid::Uuid;

/// 문서 식별자: 영속(저장소 키) 또는 임시(클라이언트 로컬 키)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentId {
    /// 저장소가 부여한 키 (UUIDv7)
    Persisted(Uuid),
    /// 클라이언트가 만든 임시 키 (아직 저장 전)
    Temporary(String),
}

impl DocumentId {
    /// 문자열을 식별자로 분류합니다.
    /// UUID로 파싱되면 영속 키, 아니면 임시 키입니다.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(uuid) => DocumentId::Persisted(uuid),
            Err(_) => DocumentId::Temporary(raw.to_string()),
        }
    }

    /// 저장소 조회에 쓸 수 있는 키라면 반환합니다.
    pub fn as_store_key(&self) -> Option<String> {
        match self {
            DocumentId::Persisted(uuid) => Some(uuid.to_string()),
            DocumentId::Temporary(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn uuid_is_classified_as_persisted() {
        let raw = Uuid::now_v7().to_string();
        let id = DocumentId::parse(&raw);
        assert_matches!(id, DocumentId::Persisted(_));
        assert_eq!(id.as_store_key(), Some(raw));
    }

    #[test]
    fn non_uuid_is_classified_as_temporary() {
        let id = DocumentId::parse("draft-1724400000000");
        assert_matches!(id, DocumentId::Temporary(_));
        assert_eq!(id.as_store_key(), None);
    }

    #[test]
    fn object_id_like_string_is_temporary() {
        // 다른 저장소 형식의 키(예: 24자리 16진수)도 UUID가 아니므로 임시로 분류
        let id = DocumentId::parse("not-a-valid-object-id");
        assert_matches!(id, DocumentId::Temporary(_));
    }
}
