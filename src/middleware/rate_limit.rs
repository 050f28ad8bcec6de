//! # 슬라이딩 윈도우 요청 제한 (Rate Limiting)
//!
//! 클라이언트 주소별로 고정 길이 슬라이딩 윈도우(기본: 60초에 5회)를
//! 적용하는 미들웨어입니다. 모든 API 라우트에 일괄 적용되며,
//! 버전 관리 로직과는 완전히 독립적입니다 — 교체 가능한 정책 모듈이고
//! 핵심 로직은 이 구현에 의존하지 않습니다.
//!
//! 카운터는 프로세스 메모리에 살기 때문에 수평 확장 배포에서는
//! 전역 보장이 아니라 인스턴스별 보장이 됩니다.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::routes::documents::AppState;

/// 클라이언트 주소별 슬라이딩 윈도우 카운터.
///
/// 주소마다 최근 요청 시각들을 VecDeque(양방향 큐)로 보관하고,
/// 검사할 때마다 윈도우를 벗어난 오래된 시각을 앞에서 제거합니다.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    // Mutex: 여러 요청(태스크)이 동시에 접근하므로 상호 배제가 필요합니다.
    // 잠금 구간은 큐 정리 + 길이 검사뿐이라 아주 짧습니다.
    hits: Mutex<HashMap<IpAddr, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// 이 주소의 요청을 지금 허용할 수 있는지 검사하고, 허용되면 기록합니다.
    pub fn allow(&self, addr: IpAddr) -> bool {
        self.allow_at(addr, Instant::now())
    }

    /// 시각을 주입받는 내부 구현. 테스트에서 시간을 제어하기 위해 분리했습니다.
    fn allow_at(&self, addr: IpAddr, now: Instant) -> bool {
        // 잠금이 poisoned 상태여도 카운터 맵은 계속 쓸 수 있습니다.
        let mut hits = match self.hits.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let queue = hits.entry(addr).or_default();

        // 윈도우를 벗어난 기록을 앞에서부터 제거합니다.
        while let Some(&oldest) = queue.front() {
            if now.duration_since(oldest) >= self.window {
                queue.pop_front();
            } else {
                break;
            }
        }

        if queue.len() >= self.max_requests {
            return false;
        }
        queue.push_back(now);
        true
    }
}

/// API 라우트 전체에 씌우는 미들웨어 함수.
///
/// `ConnectInfo<SocketAddr>`로 클라이언트 주소를 얻으려면 main에서
/// `into_make_service_with_connect_info::<SocketAddr>()`로 서버를 띄워야 합니다.
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.limiter.allow(addr.ip()) {
        tracing::warn!(client = %addr.ip(), "rate limit exceeded");
        return Err(AppError::RateLimited);
    }
    Ok(next.run(request).await)
}
