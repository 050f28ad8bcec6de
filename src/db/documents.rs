//! # 문서 데이터베이스 쿼리 모듈 (문서 저장소)
//!
//! `documents` 테이블에 대한 CRUD(Create, Read, Update, Delete) 쿼리
//! 함수들이 정의되어 있습니다.
//!
//! 저장소 계약:
//! - 저장(save)은 행 전체 덮어쓰기입니다 (필드 단위 패치가 아님).
//!   versions/images 배열까지 포함한 문서 전체가 한 번의 UPDATE로
//!   교체되므로, 문서 단위에서 원자적(atomic)입니다.
//!   낙관적 동시성 토큰은 없습니다 — 나중에 쓴 쪽이 이깁니다(last-write-wins).
//! - versions와 images는 JSON 배열을 TEXT 컬럼에 직렬화하여 저장합니다.
//!
//! 모든 함수는 `async`이며 `SqlitePool`을 받아 데이터베이스와 상호작용합니다.
//! 에러 발생 시 `AppError`를 반환합니다.

use crate::error::AppError;
use crate::models::{Document, Version};
// SqlitePool: SQLite 연결 풀. 여러 비동기 작업이 동시에 DB에 접근할 수 있게 합니다.
// &SqlitePool로 받으면 소유권을 가져가지 않고 빌려서(borrow) 사용합니다.
use sqlx::SqlitePool;

/// `documents` 테이블의 한 행을 그대로 담는 구조체.
///
/// versions/images 컬럼은 DB에서는 JSON 문자열이므로 일단 String으로 받고,
/// [`into_document`](DocumentRow::into_document)에서 파싱합니다.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    content: String,
    topic: Option<String>,
    title: Option<String>,
    images: String,
    versions: String,
    current_version: i64,
    created_at: String,
    updated_at: Option<String>,
}

impl DocumentRow {
    /// DB 행 → 도메인 모델 변환. JSON 컬럼을 실제 벡터로 파싱합니다.
    fn into_document(self) -> Result<Document, AppError> {
        // serde_json::from_str: JSON 문자열 → Rust 값 역직렬화
        // `?`: 파싱 실패 시 AppError::Serialization으로 자동 변환 (error.rs의 #[from])
        let versions: Vec<Version> = serde_json::from_str(&self.versions)?;
        let images: Vec<String> = serde_json::from_str(&self.images)?;

        // 저장된 문서의 불변 조건을 읽는 시점에 검증합니다.
        // 쓰는 쪽이 항상 지키는 조건이므로, 깨져 있다면 내부 오류입니다.
        // DB의 INTEGER(i64)를 배열 인덱스 타입(usize)으로 변환합니다.
        let current_version = usize::try_from(self.current_version).unwrap_or(usize::MAX);
        if versions.is_empty() || current_version >= versions.len() {
            return Err(AppError::Internal(format!(
                "document {} has corrupt version state (pointer {}, {} versions)",
                self.id,
                self.current_version,
                versions.len()
            )));
        }

        Ok(Document {
            id: self.id,
            content: self.content,
            topic: self.topic,
            title: self.title,
            images,
            versions,
            current_version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// 모든 문서를 조회합니다. 최신 생성 순(내림차순)으로 정렬합니다.
///
/// # 매개변수
/// - `pool`: SQLite 연결 풀의 참조(&). 소유권을 가져가지 않고 빌려 씁니다.
///
/// # 반환값
/// - `Result<Vec<Document>, AppError>`: 성공 시 문서 목록, 실패 시 에러
pub async fn list_documents(pool: &SqlitePool) -> Result<Vec<Document>, AppError> {
    // sqlx::query_as::<_, DocumentRow>():
    //   SQL 쿼리를 실행하고 결과를 DocumentRow 구조체로 자동 변환합니다.
    //   DocumentRow에 #[derive(sqlx::FromRow)]가 있어서 자동 변환이 가능합니다.
    //
    // r#"..."#: Raw 문자열 리터럴.
    //   이스케이프 문자(\n, \" 등)를 처리하지 않아 SQL을 그대로 쓸 수 있습니다.
    let rows = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, content, topic, title, images, versions,
               current_version, created_at, updated_at
        FROM documents
        ORDER BY created_at DESC, id DESC
        "#,
        // ↑ id(UUIDv7)는 시간순 정렬이 가능하므로,
        //   같은 밀리초에 만들어진 문서들의 순서까지 안정적으로 보장합니다.
    )
    // .fetch_all(pool): 모든 결과 행을 가져옵니다 (Vec<DocumentRow> 반환)
    .fetch_all(pool)
    .await?;

    // 각 행의 JSON 컬럼을 파싱하면서 도메인 모델로 변환합니다.
    // collect::<Result<...>>(): 하나라도 Err이면 전체가 Err이 됩니다.
    rows.into_iter().map(DocumentRow::into_document).collect()
}

/// ID로 단일 문서를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
/// - `Err(AppError)`: DB 에러 발생 시
pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<Option<Document>, AppError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, content, topic, title, images, versions,
               current_version, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
        // ↑ SQL의 `?`는 파라미터 바인딩 자리표시자입니다.
        //   아래 .bind(id)로 실제 값을 안전하게 대입합니다.
        //   이 방식은 SQL 인젝션 공격을 방지합니다.
    )
    .bind(id)
    // .fetch_optional(): 결과가 0행이면 None, 1행이면 Some을 반환합니다.
    .fetch_optional(pool)
    .await?;

    // Option<DocumentRow> → Option<Document> 변환.
    // map + transpose: Option<Result<T>>를 Result<Option<T>>로 뒤집습니다.
    row.map(DocumentRow::into_document).transpose()
}

/// 새 문서를 삽입합니다. 호출 전에 `Document::new`로 만들어진 문서는
/// 이미 버전 하나(인덱스 0)를 갖고 있어야 합니다.
pub async fn create_document(pool: &SqlitePool, doc: &Document) -> Result<(), AppError> {
    // serde_json::to_string: Rust 값 → JSON 문자열 직렬화
    let versions_json = serde_json::to_string(&doc.versions)?;
    let images_json = serde_json::to_string(&doc.images)?;

    sqlx::query(
        r#"
        INSERT INTO documents (id, content, topic, title, images, versions,
                               current_version, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&doc.id)
    .bind(&doc.content)
    .bind(&doc.topic)
    .bind(&doc.title)
    .bind(&images_json)
    .bind(&versions_json)
    .bind(doc.current_version as i64)
    .bind(&doc.created_at)
    .bind(&doc.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// 문서 전체를 덮어씁니다 (whole-document overwrite).
///
/// 부분 패치가 아니라 모든 컬럼을 교체하므로, 메모리에서 변경한 문서가
/// 그대로 저장소의 새 상태가 됩니다. 실패하면 기존 행은 그대로 남습니다.
///
/// # 에러
/// - `AppError::NotFound`: 해당 ID의 행이 없는 경우
pub async fn save_document(pool: &SqlitePool, doc: &Document) -> Result<(), AppError> {
    let versions_json = serde_json::to_string(&doc.versions)?;
    let images_json = serde_json::to_string(&doc.images)?;

    let result = sqlx::query(
        r#"
        UPDATE documents
        SET content = ?, topic = ?, title = ?, images = ?, versions = ?,
            current_version = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&doc.content)
    .bind(&doc.topic)
    .bind(&doc.title)
    .bind(&images_json)
    .bind(&versions_json)
    .bind(doc.current_version as i64)
    .bind(&doc.updated_at)
    .bind(&doc.id)
    .execute(pool)
    .await?;

    // rows_affected(): UPDATE가 실제로 바꾼 행 수.
    // 0이면 해당 ID의 문서가 존재하지 않는 것입니다.
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// ID로 문서를 완전 삭제(hard delete)합니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 ID의 문서가 없음
pub async fn delete_document(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
