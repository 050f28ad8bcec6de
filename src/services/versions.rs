//! # 버전 관리자 (Version Manager)
//!
//! 문서의 버전 이력을 다루는 핵심 로직입니다.
//! 세 가지 연산(추가/전환/삭제)을 제공하며, 어떤 연산 후에도
//! 아래 불변 조건이 항상 성립하도록 보장합니다:
//!
//! - `versions`는 비어 있지 않다
//! - 인덱스 0(원본 버전)은 절대 삭제되지 않는다
//! - `0 <= current_version < versions.len()`
//! - `content == versions[current_version].content`
//!
//! 이 모듈의 함수들은 메모리 위의 `Document`만 변경하는 순수 로직입니다.
//! 저장(persist)은 라우트 핸들러가 변경 직후 `db::save_document`를
//! 호출하는 것으로 조합됩니다. 순수 로직으로 분리했기 때문에
//! DB 없이 단위 테스트할 수 있습니다.

use crate::error::AppError;
use crate::models::{now_rfc3339, Document, Version};

/// 새 내용을 버전으로 추가하고 활성 포인터를 새 버전으로 옮깁니다.
///
/// - `versions` 끝에 `Version { content, prompt, timestamp: now }`를 추가
/// - `current_version = versions.len() - 1`
/// - 비정규화된 `content`와 `updated_at`을 갱신
///
/// 이 함수 자체는 실패하지 않습니다. 저장소 장애는 이후의
/// `save_document` 호출에서 드러나며, 그 경우 저장소의 문서는
/// 호출 전 상태 그대로 남습니다.
pub fn append(doc: &mut Document, content: String, prompt: Option<String>) {
    let now = now_rfc3339();
    doc.versions.push(Version {
        content: content.clone(),
        prompt,
        timestamp: now.clone(),
    });
    doc.current_version = doc.versions.len() - 1;
    doc.content = content;
    doc.updated_at = Some(now);
}

/// 활성 버전 포인터를 `index`로 옮깁니다.
///
/// `versions` 배열은 변경하지 않는 순수 포인터 이동입니다.
/// 화면 표시용으로 `content`를 해당 버전의 내용으로 바꿉니다.
///
/// # 에러
/// - `VersionOutOfRange`: `index >= versions.len()`
pub fn switch_to(doc: &mut Document, index: usize) -> Result<(), AppError> {
    if index >= doc.versions.len() {
        return Err(AppError::VersionOutOfRange {
            index,
            len: doc.versions.len(),
        });
    }
    doc.current_version = index;
    doc.content = doc.versions[index].content.clone();
    doc.updated_at = Some(now_rfc3339());
    Ok(())
}

/// `index` 위치의 버전을 삭제합니다.
///
/// 삭제 후 포인터 보정 규칙:
/// - 삭제한 인덱스가 포인터보다 앞이면 포인터를 1 감소시킵니다.
///   (배열이 한 칸 당겨져도 사용자가 보던 버전을 계속 가리키게 됨)
/// - 그 외에는 포인터를 그대로 두고 `len - 1`로 클램프합니다.
///
/// 단순 min 클램프만 하면 앞쪽 버전을 지웠을 때 포인터가 소리 없이
/// 다른 버전을 가리키게 되므로, 시프트를 반영한 보정을 사용합니다.
///
/// # 에러
/// - `ProtectedVersion`: `index == 0` (원본 버전은 삭제 불가)
/// - `VersionOutOfRange`: `index >= versions.len()`
pub fn delete(doc: &mut Document, index: usize) -> Result<(), AppError> {
    if index == 0 {
        return Err(AppError::ProtectedVersion);
    }
    if index >= doc.versions.len() {
        return Err(AppError::VersionOutOfRange {
            index,
            len: doc.versions.len(),
        });
    }

    doc.versions.remove(index);

    if index < doc.current_version {
        doc.current_version -= 1;
    } else {
        doc.current_version = doc.current_version.min(doc.versions.len() - 1);
    }

    // 포인터가 움직였을 수 있으므로 비정규화 복사본을 다시 맞춥니다.
    doc.content = doc.versions[doc.current_version].content.clone();
    doc.updated_at = Some(now_rfc3339());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// 내용 목록으로 테스트용 문서를 만듭니다. 포인터는 마지막 버전.
    fn doc_with_versions(contents: &[&str]) -> Document {
        let mut doc = Document::new(contents[0].to_string(), None, None);
        for c in &contents[1..] {
            append(&mut doc, c.to_string(), None);
        }
        doc
    }

    /// 모든 연산 후 성립해야 하는 불변 조건 검사
    fn assert_invariants(doc: &Document) {
        assert!(!doc.versions.is_empty());
        assert!(doc.current_version < doc.versions.len());
        assert_eq!(doc.content, doc.versions[doc.current_version].content);
    }

    #[test]
    fn new_document_has_single_original_version() {
        let doc = Document::new("A".to_string(), Some("topic".to_string()), None);
        assert_eq!(doc.versions.len(), 1);
        assert_eq!(doc.current_version, 0);
        assert_eq!(doc.versions[0].content, "A");
        assert!(doc.versions[0].prompt.is_none());
        assert_invariants(&doc);
    }

    #[test]
    fn append_grows_by_one_and_points_at_last() {
        let mut doc = doc_with_versions(&["A"]);
        append(&mut doc, "B".to_string(), Some("make it better".to_string()));

        assert_eq!(doc.versions.len(), 2);
        assert_eq!(doc.current_version, 1);
        assert_eq!(doc.content, "B");
        assert_eq!(doc.versions[1].prompt.as_deref(), Some("make it better"));
        assert!(doc.updated_at.is_some());
        assert_invariants(&doc);
    }

    #[test]
    fn append_then_delete_last_returns_to_original() {
        // 시나리오: ["A"] → append("B") → delete(1) → ["A"], 포인터 0
        let mut doc = doc_with_versions(&["A"]);
        append(&mut doc, "B".to_string(), None);
        assert_eq!(doc.current_version, 1);

        delete(&mut doc, 1).unwrap();
        assert_eq!(doc.versions.len(), 1);
        assert_eq!(doc.current_version, 0);
        assert_eq!(doc.content, "A");
        assert_invariants(&doc);
    }

    #[test]
    fn delete_original_is_rejected_and_state_unchanged() {
        let mut doc = doc_with_versions(&["A", "B", "C"]);
        assert_eq!(doc.current_version, 2);
        let before = doc.clone();

        let err = delete(&mut doc, 0).unwrap_err();
        assert_matches!(err, AppError::ProtectedVersion);

        // 거부된 연산은 아무것도 바꾸지 않아야 합니다.
        assert_eq!(doc.versions, before.versions);
        assert_eq!(doc.current_version, before.current_version);
        assert_eq!(doc.content, before.content);
    }

    #[test]
    fn delete_original_is_rejected_even_with_single_version() {
        let mut doc = doc_with_versions(&["A"]);
        let err = delete(&mut doc, 0).unwrap_err();
        assert_matches!(err, AppError::ProtectedVersion);
        assert_eq!(doc.versions.len(), 1);
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let mut doc = doc_with_versions(&["A", "B"]);
        let err = delete(&mut doc, 5).unwrap_err();
        assert_matches!(err, AppError::VersionOutOfRange { index: 5, len: 2 });
        assert_eq!(doc.versions.len(), 2);
    }

    #[test]
    fn delete_middle_shifts_later_versions_down() {
        let mut doc = doc_with_versions(&["A", "B", "C", "D"]);
        let v1 = doc.versions[1].clone();
        let v3 = doc.versions[3].clone();

        delete(&mut doc, 2).unwrap();

        // 삭제 지점 앞은 그대로, 뒤는 한 칸씩 앞으로 (내용/프롬프트/타임스탬프 보존)
        assert_eq!(doc.versions.len(), 3);
        assert_eq!(doc.versions[0].content, "A");
        assert_eq!(doc.versions[1], v1);
        assert_eq!(doc.versions[2], v3);
        assert_invariants(&doc);
    }

    #[test]
    fn delete_before_pointer_keeps_pointing_at_same_version() {
        // 포인터가 "D"(인덱스 3)를 보는 중에 인덱스 1을 삭제하면,
        // 배열이 당겨져도 여전히 "D"를 가리켜야 합니다.
        let mut doc = doc_with_versions(&["A", "B", "C", "D"]);
        assert_eq!(doc.current_version, 3);

        delete(&mut doc, 1).unwrap();

        assert_eq!(doc.current_version, 2);
        assert_eq!(doc.content, "D");
        assert_invariants(&doc);
    }

    #[test]
    fn delete_at_pointer_clamps_into_range() {
        let mut doc = doc_with_versions(&["A", "B", "C"]);
        switch_to(&mut doc, 2).unwrap();

        // 마지막(포인터 위치)을 삭제하면 포인터는 새 마지막으로 클램프
        delete(&mut doc, 2).unwrap();
        assert_eq!(doc.current_version, 1);
        assert_eq!(doc.content, "B");
        assert_invariants(&doc);
    }

    #[test]
    fn switch_to_moves_pointer_without_touching_versions() {
        let mut doc = doc_with_versions(&["A", "B", "C"]);

        switch_to(&mut doc, 0).unwrap();
        assert_eq!(doc.current_version, 0);
        assert_eq!(doc.content, "A");
        assert_eq!(doc.versions.len(), 3);
        assert_invariants(&doc);
    }

    #[test]
    fn switch_to_out_of_range_is_rejected() {
        let mut doc = doc_with_versions(&["A"]);
        let err = switch_to(&mut doc, 1).unwrap_err();
        assert_matches!(err, AppError::VersionOutOfRange { index: 1, len: 1 });
        assert_eq!(doc.current_version, 0);
    }

    #[test]
    fn payload_derives_is_active_from_pointer() {
        let mut doc = doc_with_versions(&["A", "B", "C"]);
        switch_to(&mut doc, 1).unwrap();

        let payload = doc.to_payload();
        let flags: Vec<bool> = payload.versions.iter().map(|v| v.is_active).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(payload.current_version, 1);
    }
}
