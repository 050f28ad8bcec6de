//! # 미들웨어 모듈
//!
//! 요청이 핸들러에 도달하기 전에 가로채서 처리하는 계층입니다.
//!
//! 각 하위 모듈:
//! - `rate_limit`: 클라이언트 주소별 슬라이딩 윈도우 요청 제한

pub mod rate_limit;
