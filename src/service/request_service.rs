use crate::helpers;
use crate::road::Road;
use crate::types::{RequestInfo, RequestMeta};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{service::Service, Request, Response};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A per-connection [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) which runs every request of the
/// connection through the road.
///
/// Failures never surface as service errors, they are rendered into error responses by the road.
pub struct RequestService<B, E> {
    pub(crate) road: Arc<Road<B, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<B, E> Service<Request<B>> for RequestService<B, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    B: Send + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, mut req: Request<B>) -> Self::Future {
        let road = self.road.clone();
        let remote_addr = self.remote_addr;

        let fut = async move {
            helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(remote_addr));

            let target_path = helpers::normalize_request_path(req.uri().path());
            let req_info = RequestInfo::new_from_req(&req, remote_addr);

            Ok(road.process(target_path.as_str(), req, req_info).await)
        };

        Box::pin(fut)
    }
}

/// Builds a [`RequestService`](./struct.RequestService.html) per connection out of a shared road.
#[derive(Debug)]
pub struct RequestServiceBuilder<B, E> {
    road: Arc<Road<B, E>>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> RequestServiceBuilder<B, E> {
    pub fn new(road: Road<B, E>) -> crate::Result<Self> {
        Ok(Self { road: Arc::from(road) })
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<B, E> {
        RequestService {
            road: self.road.clone(),
            remote_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{Controller, Error, Middleware, Reply, RequestServiceBuilder, Road, Views};
    use bytes::Bytes;
    use futures::future::poll_fn;
    use http::Method;
    use http_body_util::{BodyExt, Empty, Full};
    use hyper::header::CONTENT_TYPE;
    use hyper::service::Service;
    use hyper::{Request, Response, StatusCode};
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::task::Poll;

    type Body = Empty<Bytes>;

    async fn call(road: Road<Body, Error>, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
        let remote_addr = SocketAddr::from_str("0.0.0.0:8080").unwrap();
        let req: Request<Body> = Request::builder()
            .method(method)
            .uri(uri)
            .body(Empty::<Bytes>::new())
            .unwrap();

        let builder = RequestServiceBuilder::new(road).unwrap();
        let service = builder.build(remote_addr);

        poll_fn(|_| -> Poll<Result<(), Infallible>> { Poll::Ready(Ok(())) })
            .await
            .expect("request service is not ready");

        let resp: Response<Full<Bytes>> = service.call(req).await.unwrap();
        into_parts(resp).await
    }

    async fn into_parts(resp: Response<Full<Bytes>>) -> (StatusCode, Option<String>, String) {
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .map(|val| val.to_str().unwrap().to_owned());
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(body_bytes.to_vec()).unwrap())
    }

    fn views() -> Views {
        Views::from_raw([
            ("index/index.html", "Index template: {{ method }} {{ controller }}/{{ action }}"),
            ("foo/index.html", "Index template: {{ method }} {{ controller }}/{{ action }}"),
            ("foo/bar.html", "Bar template: {{ method }} {{ controller }}/{{ action }}"),
        ])
        .unwrap()
    }

    fn road() -> Road<Body, Error> {
        Road::builder()
            .views(views())
            .controller(Controller::new("index").action("index", |_| async move { Ok(Reply::view()) }))
            .controller(
                Controller::new("foo")
                    .action("index", |_| async move { Ok(Reply::view()) })
                    .action("bar", |_| async move { Ok(Reply::view()) })
                    .action_with_methods(
                        "baz",
                        vec![Method::POST, Method::PUT, Method::DELETE],
                        |req: Request<Body>| async move { Ok(Reply::text(req.id().unwrap_or_default().to_owned())) },
                    ),
            )
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_route_request() {
        let (status, content_type, body) = call(road(), Method::GET, "/foo/bar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert_eq!(body, "Bar template: GET foo/bar");
    }

    #[tokio::test]
    async fn should_fall_back_to_default_controller_and_action() {
        let (_, _, body) = call(road(), Method::GET, "/").await;
        assert_eq!(body, "Index template: GET index/index");

        let (_, _, body) = call(road(), Method::GET, "/foo").await;
        assert_eq!(body, "Index template: GET foo/index");
    }

    #[tokio::test]
    async fn should_expose_id_to_rest_actions() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let (status, content_type, body) = call(road(), method, "/foo/baz/42").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(content_type.as_deref(), Some("text/plain"));
            assert_eq!(body, "42");
        }

        let (status, _, body) = call(road(), Method::GET, "/foo/baz/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Error, or not found.");
    }

    #[tokio::test]
    async fn should_respond_404_for_unknown_controller_or_action() {
        for uri in ["/nonexistent", "/foo/bazinga"] {
            let (status, content_type, body) = call(road(), Method::GET, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
            assert_eq!(body, "Error, or not found.");
        }
    }

    #[tokio::test]
    async fn should_prefer_explicit_routes() {
        let road = Road::builder()
            .controller(Controller::new("customPath").action("index", |_| async move { Ok(Reply::text("convention")) }))
            .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
            .build()
            .unwrap();

        let (status, content_type, body) = call(road, Method::GET, "/customPath").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, "custom URL mapping");
    }

    #[tokio::test]
    async fn should_fall_through_when_explicit_route_method_differs() {
        let road = Road::builder()
            .controller(Controller::new("customPath").action("index", |_| async move { Ok(Reply::text("convention")) }))
            .get("/customPath", |_| async move { Ok(Reply::text("custom URL mapping")) })
            .build()
            .unwrap();

        let (_, _, body) = call(road, Method::POST, "/customPath").await;
        assert_eq!(body, "convention");
    }

    #[tokio::test]
    async fn should_map_paths_to_actions() {
        let road = Road::builder()
            .controller(Controller::new("posts").action("show", |req: Request<Body>| async move {
                let res = req.resolution().unwrap();
                Ok(Reply::text(format!("{} {}", res, req.param("slug").unwrap())))
            }))
            .map("/p/:id/:slug", "posts/show")
            .build()
            .unwrap();

        let (_, _, body) = call(road, Method::GET, "/p/7/hello").await;
        assert_eq!(body, "posts/show/7/hello hello");
    }

    #[tokio::test]
    async fn should_fire_completion_hook_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let statuses = Arc::new(Mutex::new(Vec::new()));

        let make_road = |calls: Arc<AtomicUsize>, statuses: Arc<Mutex<Vec<Option<StatusCode>>>>| {
            Road::builder()
                .views(views())
                .controller(Controller::new("foo").action("bar", |_| async move { Ok(Reply::view()) }))
                .on_complete(move |done| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(done.response.status(), done.error.map_or(StatusCode::OK, |err| err.status()));
                    statuses.lock().unwrap().push(done.error.map(|err| err.status()));
                })
                .build()
                .unwrap()
        };

        call(make_road(calls.clone(), statuses.clone()), Method::GET, "/foo/bar").await;
        call(make_road(calls.clone(), statuses.clone()), Method::GET, "/foo2/bar").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*statuses.lock().unwrap(), vec![None, Some(StatusCode::NOT_FOUND)]);
    }

    #[tokio::test]
    async fn should_fire_completion_hook_once_on_server_errors() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let make_road = |seen: Arc<Mutex<Vec<(Option<StatusCode>, StatusCode)>>>| {
            Road::builder()
                .views(views())
                .controller(
                    Controller::new("foo")
                        .action("bar", |_| async move { Ok(Reply::view()) })
                        .action("missing", |_| async move { Ok(Reply::view()) }),
                )
                .middleware(
                    Middleware::post_with_path("/foo/bar", |_| async move { Err(Error::Handler("post failed".into())) })
                        .unwrap(),
                )
                .on_complete(move |done| {
                    seen.lock()
                        .unwrap()
                        .push((done.error.map(|err| err.status()), done.response.status()));
                })
                .build()
                .unwrap()
        };

        let (status, _, body) = call(make_road(seen.clone()), Method::GET, "/foo/missing").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error, or not found.");

        let (status, _, body) = call(make_road(seen.clone()), Method::GET, "/foo/bar").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error, or not found.");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Some(StatusCode::INTERNAL_SERVER_ERROR), StatusCode::INTERNAL_SERVER_ERROR),
                (Some(StatusCode::INTERNAL_SERVER_ERROR), StatusCode::INTERNAL_SERVER_ERROR),
            ]
        );
    }

    #[tokio::test]
    async fn should_run_middlewares_around_actions() {
        struct Greeting(&'static str);

        let road: Road<Body, Error> = Road::builder()
            .data(Greeting("hello"))
            .middleware(Middleware::pre(|mut req: Request<Body>| async move {
                req.headers_mut().insert("x-pre", "1".parse().unwrap());
                Ok(req)
            }))
            .middleware(Middleware::post_with_info(|mut res: Response<Full<Bytes>>, info| async move {
                let action = info.resolution().map(|r| r.to_string()).unwrap_or_default();
                res.headers_mut().insert("x-action", action.parse().unwrap());
                Ok(res)
            }))
            .controller(Controller::new("index").action("index", |req: Request<Body>| async move {
                let greeting = req.data::<Greeting>().unwrap().0;
                let pre = req.headers().contains_key("x-pre");
                Ok(Reply::text(format!("{} {}", greeting, pre)))
            }))
            .build()
            .unwrap();

        let remote_addr = SocketAddr::from_str("0.0.0.0:8080").unwrap();
        let service = RequestServiceBuilder::new(road).unwrap().build(remote_addr);
        let req = Request::builder().uri("/").body(Empty::<Bytes>::new()).unwrap();
        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.headers()["x-action"], "index/index");

        let (_, _, body) = into_parts(resp).await;
        assert_eq!(body, "hello true");
    }

    #[tokio::test]
    async fn should_scope_middlewares_to_paths() {
        let road: Road<Body, Error> = Road::builder()
            .middleware(
                Middleware::post_with_path("/foo/*", |mut res: Response<Full<Bytes>>| async move {
                    res.headers_mut().insert("x-foo", "1".parse().unwrap());
                    Ok(res)
                })
                .unwrap(),
            )
            .controller(Controller::new("index").action("index", |_| async move { Ok(Reply::text("index")) }))
            .controller(Controller::new("foo").action("index", |_| async move { Ok(Reply::text("foo")) }))
            .build()
            .unwrap();

        let service = RequestServiceBuilder::new(road)
            .unwrap()
            .build(SocketAddr::from_str("0.0.0.0:8080").unwrap());

        let req = Request::builder().uri("/foo").body(Empty::<Bytes>::new()).unwrap();
        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.headers()["x-foo"], "1");

        let req = Request::builder().uri("/").body(Empty::<Bytes>::new()).unwrap();
        let resp = service.call(req).await.unwrap();
        assert!(!resp.headers().contains_key("x-foo"));
    }

    #[tokio::test]
    async fn should_use_custom_error_handler() {
        let road = Road::builder()
            .controller(Controller::new("foo").action("fail", |_| async move {
                Err(Error::Handler("boom".into()))
            }))
            .err_handler(|err, _| {
                let mut res = Response::new(Full::new(Bytes::from(format!("custom: {}", err))));
                *res.status_mut() = err.status();
                res
            })
            .build()
            .unwrap();

        let (status, _, body) = call(road, Method::GET, "/foo/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "custom: boom");
    }
}
