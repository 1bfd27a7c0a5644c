#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use wordlink::application::services::{AuthService, CodeGenerator, LinkService, RateLimiter};
use wordlink::domain::entities::Corpus;
use wordlink::domain::repositories::KeyValueStore;
use wordlink::infrastructure::store::MemoryStore;
use wordlink::routes::router;
use wordlink::state::AppState;

pub const BASE_URL: &str = "http://s.test";

/// Every code the test corpora can produce.
pub const CODE_SPACE: [&str; 4] = ["redcat", "reddog", "bluecat", "bluedog"];

pub const PEER_IP: &str = "127.0.0.1";

pub struct TestOptions {
    pub rate_limit: u64,
    pub window: Duration,
    pub password: Option<String>,
    pub behind_proxy: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            rate_limit: 100,
            window: Duration::from_secs(60),
            password: None,
            behind_proxy: true,
        }
    }
}

pub fn test_corpora() -> Vec<Corpus> {
    vec![
        Corpus::new("colors", ["red", "blue"]).unwrap(),
        Corpus::new("animals", ["cat", "dog"]).unwrap(),
    ]
}

pub fn create_test_state(options: TestOptions) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let links: Arc<dyn KeyValueStore> = store.clone();
    state_with_links(options, links, store.clone())
}

/// State whose link store is `links`; rate counters stay in memory.
pub fn state_with_links(
    options: TestOptions,
    links: Arc<dyn KeyValueStore>,
    counters: Arc<MemoryStore>,
) -> (AppState, Arc<MemoryStore>) {
    let generator = CodeGenerator::new(test_corpora(), links.clone()).unwrap();

    let state = AppState {
        link_service: Arc::new(LinkService::new(links.clone(), generator, BASE_URL)),
        rate_limiter: Arc::new(RateLimiter::new(
            counters.clone(),
            options.window,
            options.rate_limit,
        )),
        auth_service: Arc::new(AuthService::new(options.password)),
        store: links,
        behind_proxy: options.behind_proxy,
    };

    (state, counters)
}

/// Test server over the full router, with a fixed peer address.
pub fn test_server(state: AppState) -> TestServer {
    let app = router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub fn code_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("unexpected short url {}", short_url))
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{}:12345", PEER_IP).parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
