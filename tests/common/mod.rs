#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use snaplink::domain::click_queue::ClickQueue;
use snaplink::domain::entities::{Link, NewLink};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::MemoryStore;
use snaplink::routes::router;
use snaplink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://s.test.com";

/// Peer address injected by [`MockConnectInfoLayer`].
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub queue: Arc<ClickQueue>,
}

/// State over a fresh [`MemoryStore`] with default code policy.
pub fn create_test_state(queue_capacity: usize) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let queue = Arc::new(ClickQueue::new(queue_capacity));

    let state = AppState::new(store.clone(), store.clone(), queue.clone(), BASE_URL, 6, 5);

    TestContext {
        state,
        store,
        queue,
    }
}

/// Full application router with a fake peer address.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub async fn create_test_link(store: &MemoryStore, code: &str, url: &str) -> Link {
    store
        .create(NewLink::new(code.to_string(), url.to_string()))
        .await
        .unwrap()
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
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
