//! HTTP/1.1 dev server

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::error::{ForgeError, ForgeResult};

use super::middleware::{chain, Handler, Middleware, Request};

/// HTTP server with a middleware chain in front of a fallback handler
pub struct DevServer {
    handler: Arc<dyn Handler>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl DevServer {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware; middlewares run in the order they are added
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Bind `addr` and serve until Ctrl+C
    pub async fn listen(self, addr: SocketAddr) -> ForgeResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ForgeError::Server(format!("cannot bind {}: {}", addr, e)))?;
        info!("dev server listening on http://{}", addr);

        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Accept connections on `listener` until `shutdown` completes
    ///
    /// Connections already accepted run to completion on their own tasks.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> ForgeResult<()> {
        let handler = chain(&self.middlewares, self.handler);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = listener.accept() => {
                    let (stream, remote) = result
                        .map_err(|e| ForgeError::Server(format!("accept failed: {}", e)))?;
                    let handler = handler.clone();
                    tokio::task::spawn(async move {
                        if let Err(e) = handle_connection(stream, handler).await {
                            debug!(%remote, "connection closed with error: {}", e);
                        }
                    });
                }
                _ = &mut shutdown => {
                    info!("shutdown signal received, stopping dev server");
                    break;
                }
            }
        }
        Ok(())
    }
}

async fn handle_connection(stream: TcpStream, handler: Arc<dyn Handler>) -> hyper::Result<()> {
    let service = service_fn(move |request: hyper::Request<Incoming>| {
        let handler = handler.clone();
        async move {
            let (parts, _body) = request.into_parts();
            debug!(method = %parts.method, uri = %parts.uri, "request");
            Ok::<_, Infallible>(handler.handle(Request::from_parts(parts, ())).await)
        }
    });

    http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .await
}
