use super::Scope;
use crate::types::RequestInfo;
use crate::Error;
use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

type HandlerReturn<E> = Box<dyn Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static>;

// Post middlewares either ignore the request or get a copy of its info.
pub(super) enum Handler<E> {
    Response(Box<dyn Fn(Response<Full<Bytes>>) -> HandlerReturn<E> + Send + Sync + 'static>),
    WithInfo(Box<dyn Fn(Response<Full<Bytes>>, RequestInfo) -> HandlerReturn<E> + Send + Sync + 'static>),
}

pub(super) fn boxed<E, H, R>(handler: H) -> Handler<E>
where
    H: Fn(Response<Full<Bytes>>) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
{
    Handler::Response(Box::new(move |res| Box::new(handler(res))))
}

pub(super) fn boxed_with_info<E, H, R>(handler: H) -> Handler<E>
where
    H: Fn(Response<Full<Bytes>>, RequestInfo) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
{
    Handler::WithInfo(Box::new(move |res, req_info| Box::new(handler(res, req_info))))
}

/// Transforms the rendered response of a request. See [Post Middleware](./index.html#post-middleware).
///
/// Post middlewares don't see error responses.
pub struct PostMiddleware<E> {
    pub(crate) scope: Scope,
    handler: Handler<E>,
}

impl<E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> PostMiddleware<E> {
    /// Creates a post middleware for the paths matching `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyper::header::{HeaderValue, CACHE_CONTROL};
    /// use roadway::{Middleware, PostMiddleware, Road};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     let cache = PostMiddleware::new("/assets/*", |mut res| async move {
    ///         res.headers_mut().insert(CACHE_CONTROL, HeaderValue::from_static("max-age=3600"));
    ///         Ok(res)
    ///     });
    ///     Road::builder().middleware(Middleware::Post(cache.unwrap())).build().unwrap()
    /// }
    /// # run();
    /// ```
    pub fn new<P, H, R>(path: P, handler: H) -> crate::Result<PostMiddleware<E>>
    where
        P: Into<String>,
        H: Fn(Response<Full<Bytes>>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        Ok(PostMiddleware::with_scope(Scope::new(path)?, boxed(handler)))
    }

    /// Like [`PostMiddleware::new`] but the handler also receives the [request info](./struct.RequestInfo.html).
    pub fn new_with_info<P, H, R>(path: P, handler: H) -> crate::Result<PostMiddleware<E>>
    where
        P: Into<String>,
        H: Fn(Response<Full<Bytes>>, RequestInfo) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        Ok(PostMiddleware::with_scope(Scope::new(path)?, boxed_with_info(handler)))
    }

    pub(super) fn with_scope(scope: Scope, handler: Handler<E>) -> PostMiddleware<E> {
        PostMiddleware { scope, handler }
    }

    pub(crate) async fn process(
        &self,
        res: Response<Full<Bytes>>,
        req_info: &RequestInfo,
    ) -> crate::Result<Response<Full<Bytes>>> {
        let fut = match self.handler {
            Handler::Response(ref handler) => handler(res),
            Handler::WithInfo(ref handler) => handler(res, req_info.clone()),
        };

        Pin::from(fut).await.map_err(Error::from_handler)
    }
}

impl<E> Debug for PostMiddleware<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PostMiddleware({:?})", self.scope)
    }
}
