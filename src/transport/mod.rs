//! Request/response channel to the server.
//!
//! The core depends only on [`Transport`]; [`ReqwestTransport`] is the
//! production implementation and tests substitute their own.

mod client;
mod error;
mod http;
mod request;

pub use client::{ApiClient, Transport};
pub use error::TransportError;
pub use http::{ReqwestTransport, TimeoutConfig};
pub use request::{ApiRequest, HttpRequest, HttpResponse, Method};
