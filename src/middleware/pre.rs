use super::Scope;
use crate::Error;
use hyper::Request;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

type Handler<B, E> = Box<dyn Fn(Request<B>) -> HandlerReturn<B, E> + Send + Sync + 'static>;
type HandlerReturn<B, E> = Box<dyn Future<Output = Result<Request<B>, E>> + Send + 'static>;

/// Transforms a request before it is routed. See [Pre Middleware](./index.html#pre-middleware).
///
/// Returning an error skips routing, the error is answered like any other failure.
pub struct PreMiddleware<B, E> {
    pub(crate) scope: Scope,
    handler: Handler<B, E>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> PreMiddleware<B, E> {
    /// Creates a pre middleware for the paths matching `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::{Middleware, PreMiddleware, Road};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     let admin_only = PreMiddleware::new("/admin/*", |req| async move { Ok(req) }).unwrap();
    ///     Road::builder().middleware(Middleware::Pre(admin_only)).build().unwrap()
    /// }
    /// # run();
    /// ```
    pub fn new<P, H, R>(path: P, handler: H) -> crate::Result<PreMiddleware<B, E>>
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Request<B>, E>> + Send + 'static,
    {
        Ok(PreMiddleware::with_scope(Scope::new(path)?, handler))
    }

    pub(super) fn with_scope<H, R>(scope: Scope, handler: H) -> PreMiddleware<B, E>
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Request<B>, E>> + Send + 'static,
    {
        PreMiddleware {
            scope,
            handler: Box::new(move |req: Request<B>| Box::new(handler(req))),
        }
    }

    pub(crate) async fn process(&self, req: Request<B>) -> crate::Result<Request<B>> {
        Pin::from((self.handler)(req)).await.map_err(Error::from_handler)
    }
}

impl<B, E> Debug for PreMiddleware<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PreMiddleware({:?})", self.scope)
    }
}
