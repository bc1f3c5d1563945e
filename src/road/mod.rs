use crate::constants::{ERROR_BODY, TEXT_HTML};
use crate::controller::Controller;
use crate::data_map::{DataMap, SharedDataMap};
use crate::helpers;
use crate::middleware::{PostMiddleware, PreMiddleware};
use crate::reply::Reply;
use crate::resolver::{Conventions, Resolution};
use crate::route::{Route, Target};
use crate::types::{RequestInfo, RequestMeta, RouteParams};
use crate::view::Views;
use crate::Error;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response};
use regex::RegexSet;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub use self::builder::RoadBuilder;

mod builder;

pub(crate) type ErrHandler = Box<dyn Fn(&Error, RequestInfo) -> Response<Full<Bytes>> + Send + Sync + 'static>;
pub(crate) type CompletionHook = Box<dyn Fn(Completion<'_>) + Send + Sync + 'static>;

/// What the completion hook sees once a request is done.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    /// The error the request failed with, `None` on success. A not found error has a `404` [status](./enum.Error.html#method.status).
    pub error: Option<&'a Error>,
    /// The request information.
    pub req_info: &'a RequestInfo,
    /// The response which is about to be sent.
    pub response: &'a Response<Full<Bytes>>,
}

/// Represents a modular, lightweight and mountable convention router.
///
/// A road dispatches a request to an explicit route when one matches, otherwise it resolves the path by convention
/// into a controller, an action and positional parameters. The action's [Reply](./struct.Reply.html) is then rendered,
/// with content negotiation, into the response.
///
/// This `Road<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type.
/// * The `E` represents any error type which will be used by route handlers, actions and the middlewares. This error type must implement the [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// A `Road` can be created using the `Road::builder()` method.
///
/// # Examples
///
/// ```
/// use roadway::{Controller, Reply, Road};
/// use std::convert::Infallible;
///
/// fn run() -> Road<(), Infallible> {
///     let foo = Controller::new("foo").action("bar", |_| async move { Ok(Reply::text("bar")) });
///     Road::builder().controller(foo).build().unwrap()
/// }
/// # run();
/// ```
pub struct Road<B, E> {
    pre_middlewares: Vec<PreMiddleware<B, E>>,
    routes: Vec<Route<B, E>>,
    controllers: HashMap<String, Controller<B, E>>,
    post_middlewares: Vec<PostMiddleware<E>>,
    views: Views,
    conventions: Conventions,
    data_map: Arc<DataMap>,
    err_handler: Option<ErrHandler>,
    on_complete: Option<CompletionHook>,
    // Matches the explicit routes in one pass.
    regex_set: RegexSet,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> Road<B, E> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        pre_middlewares: Vec<PreMiddleware<B, E>>,
        routes: Vec<Route<B, E>>,
        controllers: HashMap<String, Controller<B, E>>,
        post_middlewares: Vec<PostMiddleware<E>>,
        views: Views,
        conventions: Conventions,
        data_map: Arc<DataMap>,
        err_handler: Option<ErrHandler>,
        on_complete: Option<CompletionHook>,
    ) -> crate::Result<Self> {
        let regex_set = RegexSet::new(routes.iter().map(|route| route.regex.as_str()))
            .map_err(|e| Error::new(format!("Couldn't create router RegexSet: {}", e)))?;

        Ok(Road {
            pre_middlewares,
            routes,
            controllers,
            post_middlewares,
            views,
            conventions,
            data_map,
            err_handler,
            on_complete,
            regex_set,
        })
    }

    /// Return a [RoadBuilder](./struct.RoadBuilder.html) instance to build a `Road`.
    pub fn builder() -> RoadBuilder<B, E> {
        RoadBuilder::new()
    }

    /// The naming conventions the road resolves paths with.
    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    // Runs a request through the whole pipeline. Failures are turned into error responses here, so the
    // completion hook always fires exactly once.
    pub(crate) async fn process(
        &self,
        target_path: &str,
        mut req: Request<B>,
        mut req_info: RequestInfo,
    ) -> Response<Full<Bytes>> {
        req.extensions_mut()
            .insert(SharedDataMap::new(self.data_map.clone()));

        let outcome = self.dispatch(target_path, req, &mut req_info).await;

        let (response, error) = match outcome {
            Ok(res) => (res, None),
            Err(err) => {
                if err.is_not_found() {
                    tracing::warn!(method = %req_info.method(), uri = %req_info.uri(), "{}", err);
                } else {
                    tracing::error!(method = %req_info.method(), uri = %req_info.uri(), "{}", err);
                }
                (self.error_response(&err, req_info.clone()), Some(err))
            }
        };

        if let Some(ref hook) = self.on_complete {
            hook(Completion {
                error: error.as_ref(),
                req_info: &req_info,
                response: &response,
            });
        }

        response
    }

    async fn dispatch(
        &self,
        target_path: &str,
        mut req: Request<B>,
        req_info: &mut RequestInfo,
    ) -> crate::Result<Response<Full<Bytes>>> {
        for middleware in self.pre_middlewares.iter() {
            if middleware.scope.matches(target_path) {
                req = middleware.process(req).await?;
            }
        }

        let (resolution, reply) = self.invoke(target_path, req, req_info).await?;
        let mut res = reply.into_response(&self.views, &self.conventions, &resolution, req_info)?;

        for middleware in self.post_middlewares.iter() {
            if middleware.scope.matches(target_path) {
                res = middleware.process(res, req_info).await?;
            }
        }

        Ok(res)
    }

    async fn invoke(
        &self,
        target_path: &str,
        mut req: Request<B>,
        req_info: &mut RequestInfo,
    ) -> crate::Result<(Resolution, Reply)> {
        if let Some(route) = self.find_route(target_path, req.method()) {
            let captures = route.captures(target_path);

            match route.target {
                Target::Handler(ref handler) => {
                    let resolution = Resolution::from_path(target_path, &self.conventions);
                    self.push_req_meta(&mut req, req_info, resolution.clone(), captures);

                    tracing::debug!(path = %target_path, route = %route.path, "explicit route");
                    let reply = handler.invoke(req).await?;
                    return Ok((resolution, reply));
                }
                Target::Action {
                    ref controller,
                    ref action,
                    ..
                } => {
                    let params = captures.iter().map(|(_, val)| val.clone()).collect();
                    let resolution = Resolution::new(controller.as_str(), action.as_str(), params);

                    tracing::debug!(path = %target_path, route = %route.path, action = %resolution, "mapped route");
                    return self.invoke_action(resolution, captures, req, req_info).await;
                }
            }
        }

        let resolution = Resolution::from_path(target_path, &self.conventions);
        tracing::debug!(path = %target_path, action = %resolution, "convention route");
        self.invoke_action(resolution, Vec::new(), req, req_info).await
    }

    async fn invoke_action(
        &self,
        resolution: Resolution,
        mut route_params: Vec<(String, String)>,
        mut req: Request<B>,
        req_info: &mut RequestInfo,
    ) -> crate::Result<(Resolution, Reply)> {
        let controller = self
            .controllers
            .get(resolution.controller())
            .ok_or_else(|| Error::ControllerNotFound {
                controller: resolution.controller().to_owned(),
            })?;

        let action = controller
            .find_action(resolution.action())
            .ok_or_else(|| Error::not_found(resolution.controller(), resolution.action()))?;

        if !action.is_match_method(req.method()) {
            return Err(Error::MethodNotAccepted {
                controller: resolution.controller().to_owned(),
                action: resolution.action().to_owned(),
                method: req.method().clone(),
            });
        }

        if let Some(id) = resolution.id() {
            if !route_params.iter().any(|(name, _)| *name == self.conventions.id_param) {
                route_params.push((self.conventions.id_param.clone(), id.to_owned()));
            }
        }

        self.push_req_meta(&mut req, req_info, resolution.clone(), route_params);
        let reply = action.invoke(req).await?;

        Ok((resolution, reply))
    }

    fn find_route(&self, target_path: &str, method: &hyper::Method) -> Option<&Route<B, E>> {
        self.regex_set
            .matches(target_path)
            .into_iter()
            .map(|idx| &self.routes[idx])
            .find(|route| route.is_match_method(method))
    }

    fn push_req_meta(
        &self,
        req: &mut Request<B>,
        req_info: &mut RequestInfo,
        resolution: Resolution,
        route_params: Vec<(String, String)>,
    ) {
        let mut params = RouteParams::with_capacity(route_params.len());
        for (name, val) in route_params {
            params.set(name, val);
        }

        req_info.set_resolution(resolution.clone());
        helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_resolution(resolution, params));
    }

    fn error_response(&self, err: &Error, req_info: RequestInfo) -> Response<Full<Bytes>> {
        match self.err_handler {
            Some(ref handler) => handler(err, req_info),
            None => {
                let mut res = Response::new(Full::new(Bytes::from_static(ERROR_BODY.as_bytes())));
                *res.status_mut() = err.status();
                res.headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML));
                res
            }
        }
    }
}

impl<B, E> Debug for Road<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ Pre-Middlewares: {:?}, Routes: {:?}, Controllers: {:?}, Post-Middlewares: {:?}, Views: {:?}, Conventions: {:?} }}",
            self.pre_middlewares,
            self.routes,
            self.controllers,
            self.post_middlewares,
            self.views,
            self.conventions
        )
    }
}
