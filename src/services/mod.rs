//! # 서비스(비즈니스 로직) 모듈
//!
//! 라우트 핸들러와 데이터 계층 사이의 핵심 로직을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `versions`: 버전 관리자 — 버전 추가/전환/삭제와 불변 조건 유지
//! - `draft`: 초안 세션 — 생성/다듬기 출력과 버전 이력 사이의 다리
//! - `generation`: 텍스트 생성 백엔드 HTTP 클라이언트
//! - `images`: 이미지 추천 백엔드 HTTP 클라이언트

pub mod draft;
pub mod generation;
pub mod images;
pub mod versions;
