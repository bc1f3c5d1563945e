use crate::regex_generator::generate_exact_match_regex;
use crate::types::RequestInfo;
use crate::Error;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

pub use self::post::PostMiddleware;
pub use self::pre::PreMiddleware;

mod post;
mod pre;

const ALL_PATHS: &str = "/*";

lazy_static! {
    static ref ALL_PATHS_RE: Regex = Regex::new(r"(?s)^/(.*)$").expect("valid catch-all pattern");
}

/// A middleware which runs around the dispatching of a request. See [Middleware](./index.html#middleware).
///
/// `B` is the request body type seen by pre middlewares and `E` is the error type shared with the actions.
#[derive(Debug)]
pub enum Middleware<B, E> {
    /// Runs before the request is routed. See [Pre Middleware](./index.html#pre-middleware).
    Pre(PreMiddleware<B, E>),

    /// Runs on the rendered response. See [Post Middleware](./index.html#post-middleware).
    Post(PostMiddleware<E>),
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> Middleware<B, E> {
    /// A pre middleware for every path.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::{Middleware, Road};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder()
    ///         .middleware(Middleware::pre(|mut req| async move {
    ///             req.headers_mut().insert("x-road", "1".parse().unwrap());
    ///             Ok(req)
    ///         }))
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn pre<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Request<B>, E>> + Send + 'static,
    {
        Middleware::Pre(PreMiddleware::with_scope(Scope::all(), handler))
    }

    /// A post middleware for every path.
    pub fn post<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Response<Full<Bytes>>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        Middleware::Post(PostMiddleware::with_scope(Scope::all(), post::boxed(handler)))
    }

    /// A post middleware for every path which also receives the [request info](./struct.RequestInfo.html), including
    /// the resolved controller action.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::header::HeaderValue;
    /// use bytes::Bytes;
    /// use hyper::Response;
    /// use roadway::{Middleware, RequestInfo, Road};
    /// use std::convert::Infallible;
    ///
    /// async fn stamp(mut res: Response<Full<Bytes>>, req_info: RequestInfo) -> Result<Response<Full<Bytes>>, Infallible> {
    ///     if let Some(resolution) = req_info.resolution() {
    ///         let val = HeaderValue::from_str(&resolution.to_string()).unwrap();
    ///         res.headers_mut().insert("x-action", val);
    ///     }
    ///     Ok(res)
    /// }
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder().middleware(Middleware::post_with_info(stamp)).build().unwrap()
    /// }
    /// # run();
    /// ```
    pub fn post_with_info<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Response<Full<Bytes>>, RequestInfo) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        Middleware::Post(PostMiddleware::with_scope(Scope::all(), post::boxed_with_info(handler)))
    }

    /// A pre middleware limited to the paths matching `path`, e.g. `/admin/*`.
    pub fn pre_with_path<P, H, R>(path: P, handler: H) -> crate::Result<Middleware<B, E>>
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Request<B>, E>> + Send + 'static,
    {
        PreMiddleware::new(path, handler).map(Middleware::Pre)
    }

    /// A post middleware limited to the paths matching `path`.
    pub fn post_with_path<P, H, R>(path: P, handler: H) -> crate::Result<Middleware<B, E>>
    where
        P: Into<String>,
        H: Fn(Response<Full<Bytes>>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        PostMiddleware::new(path, handler).map(Middleware::Post)
    }

    /// A post middleware with request info access, limited to the paths matching `path`.
    pub fn post_with_info_with_path<P, H, R>(path: P, handler: H) -> crate::Result<Middleware<B, E>>
    where
        P: Into<String>,
        H: Fn(Response<Full<Bytes>>, RequestInfo) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        PostMiddleware::new_with_info(path, handler).map(Middleware::Post)
    }
}

// The paths a middleware applies to.
pub(crate) struct Scope {
    path: String,
    regex: Regex,
}

impl Scope {
    fn new<P: Into<String>>(path: P) -> crate::Result<Scope> {
        let path = path.into();
        let (regex, _) = generate_exact_match_regex(path.as_str())
            .map_err(|e| Error::new(format!("Invalid middleware path `{}`: {}", path, e)))?;
        Ok(Scope { path, regex })
    }

    fn all() -> Scope {
        Scope {
            path: ALL_PATHS.to_owned(),
            regex: ALL_PATHS_RE.clone(),
        }
    }

    pub(crate) fn matches(&self, target_path: &str) -> bool {
        self.regex.is_match(target_path)
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.path)
    }
}
