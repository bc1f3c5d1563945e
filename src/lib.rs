//! `roadway` is a convention-based router for the Rust HTTP library [hyper](https://hyper.rs/).
//!
//! Instead of registering every route, a road resolves the request path by convention:
//!
//! - the first path segment selects a [controller](./struct.Controller.html), `index` when absent,
//! - the second path segment selects one of its actions, `index` when absent,
//! - the remaining segments are positional parameters, the first one is exposed as the `id` route parameter.
//!
//! The action answers with a [Reply](./struct.Reply.html), usually its conventional view `{controller}/{action}.html`,
//! which is rendered with [Tera](https://keats.github.io/tera/) and served with the matching content type.
//! Explicit routes can override the conventions for specific paths.
//!
//! Requests which can't be routed to an action are answered with `404 Not Found` and the body `Error, or not found.`.
//! A completion hook may be registered to observe every request once it is done, e.g. for logging.
//!
//! ## Basic Example
//!
//! ```no_run
//! use hyper::body::Incoming;
//! use hyper::service::Service;
//! use hyper::Method;
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! // Import the roadway prelude traits.
//! use roadway::prelude::*;
//! use roadway::{Controller, Reply, Road, RoadService, Views};
//! use std::sync::Arc;
//! use std::{convert::Infallible, net::SocketAddr};
//! use tokio::net::TcpListener;
//!
//! fn road() -> roadway::Result<Road<Incoming, Infallible>> {
//!     // `views/foo/bar.html` is the view of the `bar` action of the `foo` controller.
//!     let views = Views::from_dir("views")?;
//!
//!     let foo = Controller::new("foo")
//!         // GET /foo
//!         .action("index", |_| async move { Ok(Reply::view()) })
//!         // GET /foo/bar
//!         .action("bar", |_| async move { Ok(Reply::view().with("title", "Road for hyper")) })
//!         // POST, PUT or DELETE /foo/baz/:id
//!         .action_with_methods("baz", vec![Method::POST, Method::PUT, Method::DELETE], |req| async move {
//!             Ok(Reply::text(req.id().unwrap_or_default().to_owned()))
//!         });
//!
//!     Road::builder()
//!         .views(views)
//!         .controller(foo)
//!         // Explicit routes win over the conventions.
//!         .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
//!         .on_complete(|done| {
//!             println!("{} {} {}", done.req_info.method(), done.req_info.uri(), done.response.status());
//!         })
//!         .build()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let road_service = Arc::new(RoadService::new(road()?)?);
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!     println!("App is running on: {}", addr);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let road_service = road_service.clone();
//!
//!         tokio::spawn(async move {
//!             let request_service = road_service.call(&stream).await.unwrap();
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Route Parameters
//!
//! Explicit route paths may contain `:name` segments and a trailing `*`. Their values are available through
//! [`RequestExt::param`](./ext/trait.RequestExt.html#tymethod.param). A path mapped to an action with
//! [`RoadBuilder::map`](./struct.RoadBuilder.html#method.map) passes the captured values as the action's positional parameters.
//!
//! ## Middleware
//!
//! ### Pre Middleware
//!
//! A pre middleware runs before dispatching and may transform the request, see [`Middleware::pre`](./enum.Middleware.html#method.pre).
//!
//! ### Post Middleware
//!
//! A post middleware runs after the reply has been rendered and may transform the response, see
//! [`Middleware::post`](./enum.Middleware.html#method.post) and [`Middleware::post_with_info`](./enum.Middleware.html#method.post_with_info).
//!
//! ## Error Handling
//!
//! Every failure ends up as an [Error](./enum.Error.html) with an HTTP [status](./enum.Error.html#method.status). The default
//! error response can be replaced with [`RoadBuilder::err_handler`](./struct.RoadBuilder.html#method.err_handler).

pub use self::controller::Controller;
pub use self::error::{Error, RouteError};
pub use self::middleware::{Middleware, PostMiddleware, PreMiddleware};
pub use self::reply::Reply;
pub use self::resolver::{Conventions, Resolution};
pub use self::road::{Completion, Road, RoadBuilder};
pub use self::route::Route;
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::{RequestServiceBuilder, RoadService};
pub use self::types::{RequestInfo, RouteParams};
pub use self::view::Views;
pub use tera::Context;

mod constants;
mod controller;
mod data_map;
mod error;
pub mod ext;
mod helpers;
mod middleware;
pub mod prelude;
mod regex_generator;
mod reply;
mod resolver;
mod road;
mod route;
mod service;
mod types;
mod view;

/// A Result type often returned from methods that can have roadway errors.
pub type Result<T> = std::result::Result<T, Error>;
