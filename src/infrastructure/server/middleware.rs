//! Request handlers and middleware for the dev server

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use hyper::StatusCode;
use tracing::{debug, error};

use crate::domain::entities::ArtifactRegistry;
use crate::domain::ports::{FileSystem, FsError};

/// Request as seen by handlers; bodies are never read
pub type Request = hyper::Request<()>;

pub type Response = hyper::Response<Full<Bytes>>;

pub const WASM_CONTENT_TYPE: &str = "application/wasm";

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Terminal request handler
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request) -> Response;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
    async fn handle(&self, request: Request) -> Response {
        (**self).handle(request).await
    }
}

/// Answers a request or passes it on to `next`
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Response;
}

/// A middleware bound to the handler after it
struct Link {
    middleware: Arc<dyn Middleware>,
    next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for Link {
    async fn handle(&self, request: Request) -> Response {
        self.middleware.process(request, self.next.clone()).await
    }
}

/// Wrap `handler` so that `middlewares` run first, in order
pub fn chain(middlewares: &[Arc<dyn Middleware>], handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
    middlewares.iter().rev().fold(handler, |next, middleware| {
        Arc::new(Link {
            middleware: middleware.clone(),
            next,
        })
    })
}

fn not_found() -> Response {
    let mut response = hyper::Response::new(Full::new(Bytes::from_static(b"Not Found")));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Fallback handler: `404 Not Found` for everything
pub struct NotFound;

#[async_trait]
impl Handler for NotFound {
    async fn handle(&self, _request: Request) -> Response {
        not_found()
    }
}

/// Serves registered artifacts by the last segment of the request path
///
/// File reads run on tokio's blocking pool.
pub struct ArtifactMiddleware<FS: FileSystem> {
    registry: Arc<ArtifactRegistry>,
    fs: FS,
}

impl<FS: FileSystem> ArtifactMiddleware<FS> {
    pub fn new(registry: Arc<ArtifactRegistry>, fs: FS) -> Self {
        Self { registry, fs }
    }
}

/// Final segment of a URI path (`/assets/x.wasm` -> `x.wasm`)
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[async_trait]
impl<FS: FileSystem + Clone + 'static> Middleware for ArtifactMiddleware<FS> {
    async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Response {
        let name = last_segment(request.uri().path());
        let Some(entry) = self.registry.get(name) else {
            return next.handle(request).await;
        };

        debug!(name, path = %entry.source_path().display(), "serving artifact");
        let fs = self.fs.clone();
        let path = entry.source_path().to_path_buf();
        let read = tokio::task::spawn_blocking(move || fs.read_bytes(&path))
            .await
            .unwrap_or_else(|e| Err(FsError::Other(e.to_string())));

        match read {
            Ok(bytes) => {
                let mut response = hyper::Response::new(Full::new(Bytes::from(bytes)));
                let headers = response.headers_mut();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(WASM_CONTENT_TYPE));
                headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
                response
            }
            Err(e) => {
                error!("cannot serve {}: {}", name, e);
                not_found()
            }
        }
    }
}
