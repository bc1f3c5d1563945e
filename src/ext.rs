//! Extension traits for the request type.

use crate::data_map::SharedDataMap;
use crate::types::{RequestMeta, Resolution, RouteParams};
use hyper::Request;
use lazy_static::lazy_static;
use std::net::SocketAddr;

lazy_static! {
    static ref EMPTY_ROUTE_PARAMS: RouteParams = RouteParams::new();
}

/// A extension trait which extends the [`hyper::Request`](https://docs.rs/hyper/1/hyper/struct.Request.html) type with some helpful methods.
pub trait RequestExt {
    /// It returns the route parameters as [RouteParams](../struct.RouteParams.html) type with the name of the parameter specified in the path as their respective keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::prelude::*;
    /// use roadway::{Reply, Road};
    /// use std::convert::Infallible;
    ///
    /// # fn run() -> Road<(), Infallible> {
    /// let road = Road::builder()
    ///     .get("/users/:userName/books/:bookName", |req| async move {
    ///         let params = req.params();
    ///         let user_name = params.get("userName").unwrap();
    ///         let book_name = params.get("bookName").unwrap();
    ///
    ///         Ok(Reply::text(format!("Username: {}, Book Name: {}", user_name, book_name)))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # road
    /// # }
    /// # run();
    /// ```
    fn params(&self) -> &RouteParams;

    /// It returns the route parameter value by the name of the parameter specified in the path.
    fn param<P: Into<String>>(&self, param_name: P) -> Option<&String>;

    /// The conventional `id` parameter, i.e. the first positional segment after the action.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::prelude::*;
    /// use roadway::{Controller, Reply};
    /// use std::convert::Infallible;
    ///
    /// // `POST /foo/baz/42` replies with `42`.
    /// let foo = Controller::<(), Infallible>::new("foo").action("baz", |req| async move {
    ///     Ok(Reply::text(req.id().unwrap_or_default().to_owned()))
    /// });
    /// # drop(foo);
    /// ```
    fn id(&self) -> Option<&str>;

    /// The positional parameters following the action segment, in path order.
    fn positional_params(&self) -> &[String];

    /// The controller/action this request was dispatched to.
    fn resolution(&self) -> Option<&Resolution>;

    /// It returns the remote address of the incoming request.
    fn remote_addr(&self) -> SocketAddr;

    /// Access data which was shared by the [`RoadBuilder`](../struct.RoadBuilder.html) method
    /// [`data`](../struct.RoadBuilder.html#method.data).
    fn data<T: Send + Sync + 'static>(&self) -> Option<&T>;
}

impl<B> RequestExt for Request<B> {
    fn params(&self) -> &RouteParams {
        self.extensions()
            .get::<RequestMeta>()
            .and_then(|meta| meta.route_params())
            .unwrap_or(&*EMPTY_ROUTE_PARAMS)
    }

    fn param<P: Into<String>>(&self, param_name: P) -> Option<&String> {
        self.params().get(param_name.into())
    }

    fn id(&self) -> Option<&str> {
        self.resolution().and_then(Resolution::id)
    }

    fn positional_params(&self) -> &[String] {
        match self.resolution() {
            Some(resolution) => resolution.params(),
            None => &[],
        }
    }

    fn resolution(&self) -> Option<&Resolution> {
        self.extensions()
            .get::<RequestMeta>()
            .and_then(|meta| meta.resolution())
    }

    fn remote_addr(&self) -> SocketAddr {
        self.extensions()
            .get::<RequestMeta>()
            .and_then(|meta| meta.remote_addr())
            .copied()
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 0)))
    }

    fn data<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions()
            .get::<SharedDataMap>()
            .and_then(|data_map| data_map.inner.get::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::update_req_meta_in_extensions;
    use crate::resolver::Conventions;

    #[test]
    fn should_read_request_meta() {
        let mut req = Request::builder().uri("/foo/baz/42").body(()).unwrap();
        assert!(req.params().is_empty());
        assert_eq!(req.id(), None);
        assert!(req.positional_params().is_empty());

        let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
        update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(addr));

        let mut params = RouteParams::new();
        params.set("id", "42");
        let resolution = Resolution::from_path("/foo/baz/42", &Conventions::default());
        update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_resolution(resolution, params));

        assert_eq!(req.remote_addr(), addr);
        assert_eq!(req.param("id").map(String::as_str), Some("42"));
        assert_eq!(req.id(), Some("42"));
        assert_eq!(req.positional_params(), ["42"]);
        assert_eq!(req.resolution().map(|r| r.action()), Some("baz"));
        assert_eq!(req.data::<u64>(), None);
    }
}
