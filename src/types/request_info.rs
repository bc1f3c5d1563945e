use crate::types::Resolution;
use hyper::{HeaderMap, Method, Request, Uri, Version};
use std::net::SocketAddr;
use std::sync::Arc;

/// Represents some information for the incoming request.
///
/// It's used to access request information e.g. headers, method, uri etc. after the request itself
/// has been moved into an action, that is in post middlewares, in the error handler and in the
/// completion hook.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    inner: Arc<RequestInfoInner>,
    resolution: Option<Arc<Resolution>>,
}

#[derive(Debug)]
struct RequestInfoInner {
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    version: Version,
    remote_addr: SocketAddr,
}

impl RequestInfo {
    pub(crate) fn new_from_req<B>(req: &Request<B>, remote_addr: SocketAddr) -> Self {
        let inner = RequestInfoInner {
            headers: req.headers().clone(),
            method: req.method().clone(),
            uri: req.uri().clone(),
            version: req.version(),
            remote_addr,
        };

        RequestInfo {
            inner: Arc::new(inner),
            resolution: None,
        }
    }

    pub(crate) fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = Some(Arc::new(resolution));
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.inner.headers
    }

    /// Returns the request method type.
    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    /// Returns the request uri.
    pub fn uri(&self) -> &Uri {
        &self.inner.uri
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version
    }

    /// Returns the remote address of the connection the request came from.
    pub fn remote_addr(&self) -> SocketAddr {
        self.inner.remote_addr
    }

    /// Returns the controller/action the request was dispatched to, if it got that far.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_deref()
    }
}
