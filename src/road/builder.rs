use crate::controller::{Action, Controller};
use crate::data_map::DataMap;
use crate::middleware::{Middleware, PostMiddleware, PreMiddleware};
use crate::reply::Reply;
use crate::resolver::Conventions;
use crate::road::{CompletionHook, ErrHandler, Road};
use crate::route::{Route, Target};
use crate::types::RequestInfo;
use crate::view::Views;
use crate::{Completion, Error};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Builder for the [Road](./struct.Road.html) type.
///
/// This `RoadBuilder<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type.
/// * The `E` represents any error type which will be used by route handlers, actions and the middlewares. This error type must implement the [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// # Examples
///
/// ```
/// use roadway::{Controller, Reply, Road, Views};
/// use std::convert::Infallible;
///
/// fn run() -> Road<(), Infallible> {
///     let views = Views::from_raw([("index/index.html", "Index template: {{ method }} {{ controller }}/{{ action }}")]).unwrap();
///
///     Road::builder()
///         .views(views)
///         .controller(Controller::new("index").action("index", |_| async move { Ok(Reply::view()) }))
///         .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
///         .build()
///         .unwrap()
/// }
/// # run();
/// ```
pub struct RoadBuilder<B, E> {
    inner: crate::Result<BuilderInner<B, E>>,
}

struct BuilderInner<B, E> {
    pre_middlewares: Vec<PreMiddleware<B, E>>,
    routes: Vec<Route<B, E>>,
    controllers: HashMap<String, Controller<B, E>>,
    post_middlewares: Vec<PostMiddleware<E>>,
    views: Views,
    conventions: Conventions,
    data_map: DataMap,
    err_handler: Option<ErrHandler>,
    on_complete: Option<CompletionHook>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> RoadBuilder<B, E> {
    /// Creates a new `RoadBuilder` instance with default options.
    pub fn new() -> RoadBuilder<B, E> {
        RoadBuilder::default()
    }

    /// Creates a new [Road](./struct.Road.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Road<B, E>> {
        self.inner.and_then(|inner| {
            Road::new(
                inner.pre_middlewares,
                inner.routes,
                inner.controllers,
                inner.post_middlewares,
                inner.views,
                inner.conventions,
                Arc::new(inner.data_map),
                inner.err_handler,
                inner.on_complete,
            )
        })
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(BuilderInner<B, E>) -> crate::Result<BuilderInner<B, E>>,
    {
        RoadBuilder {
            inner: self.inner.and_then(func),
        }
    }
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> RoadBuilder<B, E> {
    /// Registers a controller. Its name is the first segment of the paths it serves.
    ///
    /// Registering two controllers with the same name fails the build.
    pub fn controller(self, controller: Controller<B, E>) -> Self {
        self.and_then(move |mut inner| {
            let name = controller.name().to_owned();
            if inner.controllers.contains_key(&name) {
                return Err(Error::new(format!("Controller `{}` is registered twice", name)));
            }
            inner.controllers.insert(name, controller);
            Ok(inner)
        })
    }

    /// Sets the view templates the replies are rendered with.
    pub fn views(self, views: Views) -> Self {
        self.and_then(move |mut inner| {
            inner.views = views;
            Ok(inner)
        })
    }

    /// Replaces the default naming conventions.
    pub fn conventions(self, conventions: Conventions) -> Self {
        self.and_then(move |mut inner| {
            inner.conventions = conventions;
            Ok(inner)
        })
    }

    /// Adds a new explicit route with `GET` method and the handler at the specified path.
    ///
    /// Explicit routes are matched before convention resolution, in the order they are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::{Reply, Road};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder()
    ///         .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn get<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add(path, vec![Method::GET], handler)
    }

    /// Adds a new explicit route with `POST` method and the handler at the specified path.
    pub fn post<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add(path, vec![Method::POST], handler)
    }

    /// Adds a new explicit route with `PUT` method and the handler at the specified path.
    pub fn put<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add(path, vec![Method::PUT], handler)
    }

    /// Adds a new explicit route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add(path, vec![Method::DELETE], handler)
    }

    /// Adds a new explicit route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add(path, vec![Method::PATCH], handler)
    }

    /// Adds a new explicit route which accepts any method at the specified path.
    pub fn any<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.and_then(move |mut inner| {
            let route = Route::new(path, Target::Handler(Action::new(None, handler)))?;
            inner.routes.push(route);
            Ok(inner)
        })
    }

    /// Adds a new explicit route with the specified methods and the handler at the specified path.
    pub fn add<P, H, R>(self, path: P, methods: Vec<Method>, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.and_then(move |mut inner| {
            let route = Route::new(path, Target::Handler(Action::new(Some(methods), handler)))?;
            inner.routes.push(route);
            Ok(inner)
        })
    }

    /// Maps a path to a controller action given as `controller/action`, for any method.
    ///
    /// The `:name` segments of the path become the action's positional parameters in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::prelude::*;
    /// use roadway::{Controller, Reply, Road};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder()
    ///         .controller(Controller::new("posts").action("show", |req| async move {
    ///             Ok(Reply::text(req.id().unwrap_or_default().to_owned()))
    ///         }))
    ///         // `/p/42` is served like `/posts/show/42`.
    ///         .map("/p/:id", "posts/show")
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn map<P: Into<String>>(self, path: P, target: &str) -> Self {
        let target = target.to_owned();
        self.and_then(move |mut inner| {
            inner.routes.push(Route::new_mapped(path, &target, None)?);
            Ok(inner)
        })
    }

    /// Maps a path to a controller action for the specified methods only.
    pub fn map_with_methods<P: Into<String>>(self, path: P, methods: Vec<Method>, target: &str) -> Self {
        let target = target.to_owned();
        self.and_then(move |mut inner| {
            inner.routes.push(Route::new_mapped(path, &target, Some(methods))?);
            Ok(inner)
        })
    }

    /// Adds a single middleware. A pre middleware can be created by [`Middleware::pre`](./enum.Middleware.html#method.pre) method and a post
    /// middleware can be created by [`Middleware::post`](./enum.Middleware.html#method.post) method.
    pub fn middleware(self, m: Middleware<B, E>) -> Self {
        self.and_then(move |mut inner| {
            match m {
                Middleware::Pre(middleware) => inner.pre_middlewares.push(middleware),
                Middleware::Post(middleware) => inner.post_middlewares.push(middleware),
            }
            Ok(inner)
        })
    }

    /// Specify app data to be shared across route handlers, actions and middlewares.
    ///
    /// It's retrieved with [`RequestExt::data`](./ext/trait.RequestExt.html#tymethod.data). Only one value per type is kept.
    pub fn data<T: Send + Sync + 'static>(self, data: T) -> Self {
        self.and_then(move |mut inner| {
            inner.data_map.insert(data);
            Ok(inner)
        })
    }

    /// Replaces the default error response.
    ///
    /// The handler receives the error and the request info and returns the response to send.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use bytes::Bytes;
    /// use hyper::Response;
    /// use roadway::{Error, RequestInfo, Road};
    /// use std::convert::Infallible;
    ///
    /// fn error_handler(err: &Error, req_info: RequestInfo) -> Response<Full<Bytes>> {
    ///     let mut res = Response::new(Full::new(Bytes::from(format!("{} {}: {}", req_info.method(), req_info.uri(), err))));
    ///     *res.status_mut() = err.status();
    ///     res
    /// }
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder().err_handler(error_handler).build().unwrap()
    /// }
    /// # run();
    /// ```
    pub fn err_handler<H>(self, handler: H) -> Self
    where
        H: Fn(&Error, RequestInfo) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.and_then(move |mut inner| {
            inner.err_handler = Some(Box::new(handler));
            Ok(inner)
        })
    }

    /// Registers a hook which is called exactly once per request, after the final response is ready.
    ///
    /// The hook sees the error, if the request failed, along with the request info and the response.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::Road;
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Road<(), Infallible> {
    ///     Road::builder()
    ///         .on_complete(|done| match done.error {
    ///             Some(err) => eprintln!("{} {} failed: {}", done.req_info.method(), done.req_info.uri(), err),
    ///             None => println!("{} {} {}", done.req_info.method(), done.req_info.uri(), done.response.status()),
    ///         })
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn on_complete<H>(self, hook: H) -> Self
    where
        H: Fn(Completion<'_>) + Send + Sync + 'static,
    {
        self.and_then(move |mut inner| {
            inner.on_complete = Some(Box::new(hook));
            Ok(inner)
        })
    }
}

impl<B, E> Default for RoadBuilder<B, E> {
    fn default() -> RoadBuilder<B, E> {
        RoadBuilder {
            inner: Ok(BuilderInner {
                pre_middlewares: Vec::new(),
                routes: Vec::new(),
                controllers: HashMap::new(),
                post_middlewares: Vec::new(),
                views: Views::empty(),
                conventions: Conventions::default(),
                data_map: DataMap::new(),
                err_handler: None,
                on_complete: None,
            }),
        }
    }
}

