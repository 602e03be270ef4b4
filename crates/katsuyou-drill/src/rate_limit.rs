//! Per-client token bucket in front of the router.
//!
//! Clients are identified by a proxy-supplied header; requests without it are
//! not limited.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{HeaderName, Request, Response, StatusCode};
use axum::response::IntoResponse;
use dashmap::DashMap;
use tower::{Layer, Service};
use tracing::warn;

const LOG_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_CLIENT_HEADER: &str = "fly-client-ip";

#[derive(Clone)]
pub struct RateLimiter<S> {
    inner: S,
    state: SharedState,
    client_header: HeaderName,
    rate_per_sec: f64,
    burst: f64,
}

#[derive(Clone)]
struct SharedState {
    buckets: Arc<DashMap<String, Bucket>>,
    dropped_since_log: Arc<AtomicU64>,
    last_log: Arc<Mutex<Instant>>,
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

#[derive(Clone)]
pub struct RateLimiterLayer {
    client_header: HeaderName,
    rate_per_sec: f64,
    burst: f64,
}

impl RateLimiterLayer {
    pub fn new(rate_per_sec: u32, burst: u32, client_header: HeaderName) -> Self {
        Self {
            client_header,
            rate_per_sec: rate_per_sec as f64,
            burst: burst as f64,
        }
    }
}

impl<S> Layer<S> for RateLimiterLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            state: SharedState {
                buckets: Arc::new(DashMap::new()),
                dropped_since_log: Arc::new(AtomicU64::new(0)),
                last_log: Arc::new(Mutex::new(Instant::now())),
            },
            client_header: self.client_header.clone(),
            rate_per_sec: self.rate_per_sec,
            burst: self.burst,
        }
    }
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimiter<S>
where
    S: Service<Request<ReqBody>, Response = Response<Body>> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if let Some(client) = self.client_id(&req)
            && !self.check_and_consume(&client)
        {
            self.state.dropped_since_log.fetch_add(1, Ordering::Relaxed);
            log_drops_if_needed(&self.state);
            return Box::pin(async move {
                Ok((StatusCode::TOO_MANY_REQUESTS, "rate limited").into_response())
            });
        }

        let fut = self.inner.call(req);
        Box::pin(fut)
    }
}

impl<S> RateLimiter<S> {
    fn client_id<B>(&self, req: &Request<B>) -> Option<String> {
        req.headers()
            .get(&self.client_header)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn check_and_consume(&self, client: &str) -> bool {
        let mut entry = self
            .state
            .buckets
            .entry(client.to_string())
            .or_insert(Bucket {
                tokens: self.burst,
                last_refill: Instant::now(),
            });
        let now = Instant::now();
        let elapsed = now
            .saturating_duration_since(entry.last_refill)
            .as_secs_f64();
        if elapsed > 0.0 {
            entry.tokens = (entry.tokens + elapsed * self.rate_per_sec).min(self.burst);
            entry.last_refill = now;
        }
        if entry.tokens >= 1.0 {
            entry.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

fn log_drops_if_needed(state: &SharedState) {
    let now = Instant::now();
    let Ok(mut last) = state.last_log.lock() else {
        return;
    };
    if now.saturating_duration_since(*last) >= LOG_INTERVAL {
        let dropped = state.dropped_since_log.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            warn!("rate limiter dropped {dropped} requests in the last minute");
        }
        *last = now;
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use tower::ServiceExt;
    use tower::service_fn;

    type Inner = fn(Request<Body>) -> std::future::Ready<Result<Response<Body>, Infallible>>;

    fn ok(_req: Request<Body>) -> std::future::Ready<Result<Response<Body>, Infallible>> {
        std::future::ready(Ok(Response::new(Body::from("ok"))))
    }

    fn limited(burst: u32) -> RateLimiter<tower::util::ServiceFn<Inner>> {
        let inner = service_fn(ok as Inner);
        RateLimiterLayer::new(1, burst, HeaderName::from_static("x-client")).layer(inner)
    }

    fn request(client: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/healthz");
        if let Some(client) = client {
            builder = builder.header("x-client", client);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn exhausts_burst_per_client() {
        let svc = limited(2);
        for _ in 0..2 {
            let res = svc.clone().oneshot(request(Some("a"))).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = svc.clone().oneshot(request(Some("a"))).await.unwrap();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

        let other = svc.clone().oneshot(request(Some("b"))).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn requests_without_the_header_pass() {
        let svc = limited(1);
        for _ in 0..5 {
            let res = svc.clone().oneshot(request(None)).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
    }
}
