use crate::controller::Action;
use crate::helpers;
use crate::regex_generator::generate_exact_match_regex;
use crate::Error;
use hyper::Method;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

/// Represents a single explicit route.
///
/// An explicit route overrides convention resolution for the paths it matches. It consists of a path, http method
/// type(s) and a target, which is either a handler or a `controller/action` pair. It shouldn't be created directly,
/// use [RoadBuilder](./struct.RoadBuilder.html) methods to create a route.
///
/// This `Route<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type.
/// * The `E` represents any error type which will be used by route handlers and the middlewares. This error type must implement the [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
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
///         .map("/about", "pages/about")
///         .build()
///         .unwrap()
/// }
/// # run();
/// ```
pub struct Route<B, E> {
    pub(crate) path: String,
    pub(crate) regex: Regex,
    route_params: Vec<String>,
    pub(crate) target: Target<B, E>,
}

pub(crate) enum Target<B, E> {
    Handler(Action<B, E>),
    Action {
        controller: String,
        action: String,
        methods: Option<Vec<Method>>,
    },
}

impl<B, E> Route<B, E> {
    pub(crate) fn new<P: Into<String>>(path: P, target: Target<B, E>) -> crate::Result<Route<B, E>> {
        let path = path.into();
        let (re, params) = generate_exact_match_regex(path.as_str()).map_err(|e| {
            Error::new(format!(
                "Could not create an exact match regex for the route path: {}",
                e
            ))
        })?;

        Ok(Route {
            path,
            regex: re,
            route_params: params,
            target,
        })
    }

    // Parses a `controller/action` target.
    pub(crate) fn new_mapped<P: Into<String>>(
        path: P,
        target: &str,
        methods: Option<Vec<Method>>,
    ) -> crate::Result<Route<B, E>> {
        let mut parts = target.trim_matches('/').split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(controller), Some(action), None) if !controller.is_empty() && !action.is_empty() => Route::new(
                path,
                Target::Action {
                    controller: controller.to_owned(),
                    action: action.to_owned(),
                    methods,
                },
            ),
            _ => Err(Error::new(format!(
                "Route target `{}` must have the form `controller/action`",
                target
            ))),
        }
    }

    pub(crate) fn is_match_method(&self, method: &Method) -> bool {
        match self.target {
            Target::Handler(ref handler) => handler.is_match_method(method),
            Target::Action { ref methods, .. } => methods.as_ref().map_or(true, |methods| methods.contains(method)),
        }
    }

    // Captured parameters in the order they appear in the path.
    pub(crate) fn captures(&self, target_path: &str) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.route_params.len());

        if !self.route_params.is_empty() {
            if let Some(caps) = self.regex.captures(target_path) {
                let mut iter = caps.iter();
                // Skip the first match because it's the whole path.
                iter.next();
                for param in &self.route_params {
                    if let Some(Some(g)) = iter.next() {
                        params.push((param.clone(), helpers::decode_segment(g.as_str().trim_end_matches('/'))));
                    }
                }
            }
        }

        params
    }
}

impl<B, E> Debug for Route<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Handler(ref handler) => format!("handler {:?}", handler),
            Target::Action {
                ref controller,
                ref action,
                ..
            } => format!("{}/{}", controller, action),
        };
        write!(
            f,
            "{{ path: {:?}, regex: {:?}, route_params: {:?}, target: {} }}",
            self.path, self.regex, self.route_params, target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn should_parse_mapped_targets() {
        let route = Route::<(), Infallible>::new_mapped("/about/:section", "pages/about", None).unwrap();
        assert!(matches!(route.target, Target::Action { ref controller, ref action, .. } if controller == "pages" && action == "about"));
        assert!(route.is_match_method(&Method::DELETE));
        assert_eq!(
            route.captures("/about/team/"),
            vec![("section".to_owned(), "team".to_owned())]
        );

        assert_eq!(
            route.captures("/about/a%2Fb/"),
            vec![("section".to_owned(), "a/b".to_owned())]
        );

        assert!(Route::<(), Infallible>::new_mapped("/about", "pages", None).is_err());
        assert!(Route::<(), Infallible>::new_mapped("/about", "pages/about/extra", None).is_err());
        assert!(Route::<(), Infallible>::new_mapped("/about", "/about", None).is_err());
    }

    #[test]
    fn should_restrict_mapped_methods() {
        let route = Route::<(), Infallible>::new_mapped("/login", "session/create", Some(vec![Method::POST])).unwrap();
        assert!(route.is_match_method(&Method::POST));
        assert!(!route.is_match_method(&Method::GET));
    }
}
