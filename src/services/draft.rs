//! # 초안 세션 (Draft Session)
//!
//! 생성/다듬기 출력과 영속 버전 이력 사이를 잇는 계층입니다.
//!
//! 생성 백엔드가 돌려주는 날것의 텍스트는 그대로 에디터에 넣을 수 없으므로
//! 표시 가능한 HTML로 변환하여 초안 세션에 담습니다. 초안은 아직 버전이
//! 아닙니다 — 사용자가 명시적으로 저장할 때에만 버전 관리자의 `append`를
//! 거쳐 내구성 있는 버전이 되고, 초안 자체는 독립적인 정체성을 잃습니다.
//! 저장 전의 초안은 클라이언트가 버리면 그걸로 끝입니다.

use crate::models::Document;
use crate::services::versions;

/// 저장 전의 임시 초안. 내용과 그것을 만들어낸 지시문을 함께 들고 다닙니다.
#[derive(Debug, Clone)]
pub struct DraftSession {
    /// 표시 가능한 HTML 내용
    pub content: String,
    /// 이 초안을 만들어낸 지시문 (AI 생성/다듬기인 경우)
    pub prompt: Option<String>,
}

impl DraftSession {
    /// 생성 백엔드의 날것 출력으로 초안을 만듭니다.
    pub fn from_generated(raw_text: &str, prompt: String) -> Self {
        Self {
            content: to_display_html(raw_text),
            prompt: Some(prompt),
        }
    }

    /// 다듬기(refinement) 출력으로 초안을 만듭니다.
    /// 다듬기 결과는 기존 내용을 대체하는 새 초안입니다.
    pub fn from_refined(raw_text: &str, feedback: String) -> Self {
        Self {
            content: to_display_html(raw_text),
            prompt: Some(feedback),
        }
    }

    /// 사용자가 직접 편집한 내용으로 초안을 만듭니다.
    /// 에디터가 이미 HTML을 다루므로 변환하지 않습니다.
    pub fn from_edited(content: String, prompt: Option<String>) -> Self {
        Self { content, prompt }
    }

    /// 명시적 저장: 초안을 문서의 새 버전으로 커밋합니다.
    /// 커밋 후 초안은 소비되어(self를 move) 더 이상 존재하지 않습니다.
    pub fn commit(self, doc: &mut Document) {
        versions::append(doc, self.content, self.prompt);
    }
}

/// 생성 백엔드의 날것 텍스트를 표시 가능한 HTML로 변환합니다.
///
/// 빈 줄로 구분된 덩어리를 문단(`<p>`)으로, 문단 안의 줄바꿈은 `<br>`로
/// 바꿉니다. 에디터가 HTML 문자열을 소비하므로 특수문자는 이스케이프합니다.
pub fn to_display_html(raw: &str) -> String {
    raw.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let escaped = escape_html(block);
            format!("<p>{}</p>", escaped.replace('\n', "<br>"))
        })
        .collect::<Vec<_>>()
        .join("")
}

fn escape_html(text: &str) -> String {
    // 순서 주의: &를 먼저 바꾸지 않으면 이미 바꾼 &lt;의 &까지 또 바뀝니다.
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_split_paragraphs() {
        let html = to_display_html("first paragraph\n\nsecond paragraph");
        assert_eq!(html, "<p>first paragraph</p><p>second paragraph</p>");
    }

    #[test]
    fn single_newlines_become_line_breaks() {
        let html = to_display_html("line one\nline two");
        assert_eq!(html, "<p>line one<br>line two</p>");
    }

    #[test]
    fn html_special_characters_are_escaped() {
        let html = to_display_html("a < b & b > c");
        assert_eq!(html, "<p>a &lt; b &amp; b &gt; c</p>");
    }

    #[test]
    fn empty_blocks_are_dropped() {
        let html = to_display_html("\n\nonly one\n\n\n\n");
        assert_eq!(html, "<p>only one</p>");
    }

    #[test]
    fn commit_appends_draft_as_new_version() {
        let mut doc = Document::new("<p>original</p>".to_string(), None, None);
        let draft = DraftSession::from_generated("generated text", "write about rust".to_string());

        draft.commit(&mut doc);

        assert_eq!(doc.versions.len(), 2);
        assert_eq!(doc.current_version, 1);
        assert_eq!(doc.content, "<p>generated text</p>");
        assert_eq!(
            doc.versions[1].prompt.as_deref(),
            Some("write about rust")
        );
    }
}
