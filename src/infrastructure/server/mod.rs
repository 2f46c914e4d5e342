//! Development server
//!
//! A hyper HTTP/1.1 server that answers requests for registered artifacts
//! and hands everything else to the next handler.

mod http;
mod middleware;

pub use http::DevServer;
pub use middleware::{
    chain, ArtifactMiddleware, Handler, Middleware, NotFound, Request, Response, NO_CACHE,
    WASM_CONTENT_TYPE,
};
