//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `GENERATION_API_URL`: 텍스트 생성 백엔드 주소
//! - `GENERATION_API_KEY`: 생성 백엔드 인증 키 (선택)
//! - `IMAGE_API_URL`: 이미지 추천 백엔드 주소
//! - `IMAGE_API_KEY`: 이미지 백엔드 인증 키 (선택)
//! - `RATE_LIMIT_MAX`: 슬라이딩 윈도우당 허용 요청 수
//! - `RATE_LIMIT_WINDOW_SECS`: 슬라이딩 윈도우 길이(초)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

// std::env: Rust 표준 라이브러리의 환경변수 모듈
use std::env;

// #[derive(...)]: 자동으로 트레이트 구현을 생성하는 **derive 매크로**
// - Debug: {:?} 포맷으로 출력 가능 (디버깅용 문자열 표현)
// - Clone: .clone() 메서드로 값을 복제 가능
#[derive(Debug, Clone)]
/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/blogindo.db")
    pub database_url: String,
    /// 텍스트 생성 백엔드의 기본 URL (예: "https://api.example.com")
    pub generation_api_url: String,
    /// 생성 백엔드 인증 키. Option: 없을 수도 있는 값을 표현하는 타입입니다.
    pub generation_api_key: Option<String>,
    /// 이미지 추천 백엔드의 기본 URL
    pub image_api_url: String,
    /// 이미지 백엔드 인증 키 (선택)
    pub image_api_key: Option<String>,
    /// 슬라이딩 윈도우당 허용 요청 수 (기본값: 5)
    pub rate_limit_max: usize,
    /// 슬라이딩 윈도우 길이(초) (기본값: 60)
    pub rate_limit_window_secs: u64,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    /// u16: 0~65535 범위의 부호 없는 16비트 정수. 포트 번호에 딱 맞는 타입입니다.
    pub port: u16,
}

// impl: 구조체에 메서드를 추가하는 블록
impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 반환값
    /// - `Ok(Config)`: 필수 환경변수가 모두 있으면 설정 객체 반환
    /// - `Err(VarError)`: 필수 환경변수(DATABASE_URL, GENERATION_API_URL)가 없으면 에러
    ///
    /// # 에러
    /// `DATABASE_URL`과 `GENERATION_API_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있거나 선택 사항이라 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            // env::var("KEY"): 환경변수를 읽습니다.
            // 반환 타입은 Result<String, VarError>이며,
            // `?`를 사용해 변수가 없으면 즉시 에러를 반환합니다.
            database_url: env::var("DATABASE_URL")?,           // 필수: 없으면 에러
            generation_api_url: env::var("GENERATION_API_URL")?, // 필수: 없으면 에러

            // .ok(): Result<String, VarError> → Option<String> 변환.
            // 키가 없으면 None이 되어 인증 헤더 없이 호출합니다.
            generation_api_key: env::var("GENERATION_API_KEY").ok(),

            // unwrap_or_else(|_| ...): Result가 Err일 때 실행할 클로저(익명 함수)를 지정합니다.
            // .to_string(): &str(문자열 슬라이스)를 String(소유된 문자열)으로 변환
            image_api_url: env::var("IMAGE_API_URL")
                .unwrap_or_else(|_| "https://api.unsplash.com".to_string()), // 선택: 기본값 제공
            image_api_key: env::var("IMAGE_API_KEY").ok(),

            // 숫자 설정은 문자열 → 숫자 변환이 필요합니다.
            // .parse(): 문자열을 다른 타입으로 파싱
            // .unwrap_or(N): 파싱 실패 시 기본값 사용
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),

            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()        // "3000" → 3000u16
                .unwrap_or(3000), // 파싱 실패 시 기본값
        })
    }
}
