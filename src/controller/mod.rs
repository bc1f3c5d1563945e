use crate::reply::Reply;
use hyper::{Method, Request};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

pub(crate) use self::action::Action;

mod action;

/// A named group of actions, selected by the first segment of the request path.
///
/// An action is an async function which accepts a request and returns a [Reply](./struct.Reply.html). The action name is
/// the second segment of the request path, the segments after it are exposed as positional parameters.
///
/// This `Controller<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type.
/// * The `E` represents any error type which will be used by the actions. This error type must implement the [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// # Examples
///
/// ```
/// use hyper::Method;
/// use roadway::prelude::*;
/// use roadway::{Controller, Reply};
/// use std::convert::Infallible;
///
/// // Serves `/foo`, `/foo/bar` and `/foo/baz/:id`.
/// let foo = Controller::<(), Infallible>::new("foo")
///     .action("index", |_| async move { Ok(Reply::view()) })
///     .action("bar", |_| async move { Ok(Reply::view()) })
///     .action_with_methods("baz", vec![Method::POST, Method::PUT, Method::DELETE], |req| async move {
///         Ok(Reply::text(req.id().unwrap_or_default().to_owned()))
///     });
///
/// assert!(foo.has_action("baz"));
/// ```
pub struct Controller<B, E> {
    name: String,
    actions: HashMap<String, Action<B, E>>,
}

impl<B, E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static> Controller<B, E> {
    /// Creates a controller without actions.
    pub fn new<N: Into<String>>(name: N) -> Controller<B, E> {
        Controller {
            name: name.into(),
            actions: HashMap::new(),
        }
    }

    /// Adds an action which accepts any request method. An action registered twice replaces the previous one.
    pub fn action<N, H, R>(self, name: N, handler: H) -> Controller<B, E>
    where
        N: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add_action(name.into(), Action::new(None, handler))
    }

    /// Adds an action which only accepts the given request methods.
    pub fn action_with_methods<N, H, R>(self, name: N, methods: Vec<Method>, handler: H) -> Controller<B, E>
    where
        N: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Reply, E>> + Send + 'static,
    {
        self.add_action(name.into(), Action::new(Some(methods), handler))
    }

    fn add_action(mut self, name: String, action: Action<B, E>) -> Controller<B, E> {
        self.actions.insert(name, action);
        self
    }
}

impl<B, E> Controller<B, E> {
    /// The controller name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks if the controller has an action with that name.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub(crate) fn find_action(&self, name: &str) -> Option<&Action<B, E>> {
        self.actions.get(name)
    }
}

impl<B, E> Debug for Controller<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ name: {:?}, actions: {:?} }}", self.name, self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn should_invoke_actions_by_name() {
        let foo = Controller::<(), Infallible>::new("foo")
            .action("bar", |_| async move { Ok(Reply::text("bar")) })
            .action_with_methods("baz", vec![Method::POST], |_| async move { Ok(Reply::text("baz")) });

        assert_eq!(foo.name(), "foo");
        assert!(foo.has_action("bar"));
        assert!(!foo.has_action("bazinga"));

        let baz = foo.find_action("baz").unwrap();
        assert!(baz.is_match_method(&Method::POST));
        assert!(!baz.is_match_method(&Method::GET));
        assert!(foo.find_action("bar").unwrap().is_match_method(&Method::DELETE));

        let req = Request::builder().uri("/foo/bar").body(()).unwrap();
        let reply = foo.find_action("bar").unwrap().invoke(req).await.unwrap();
        assert!(format!("{:?}", reply).contains("text/plain"));
    }
}
