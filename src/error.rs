use hyper::{Method, StatusCode};

/// The error type used by the route handlers, actions and middlewares when they fail.
///
/// Any error type which implements [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html) can be converted
/// into a `RouteError`.
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type of `roadway`.
///
/// Every variant maps to an HTTP status through [`Error::status`]. The not-found variants
/// map to `404 Not Found`, the rest to `500 Internal Server Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No controller is registered under the name taken from the request path.
    #[error("No controller is registered for `{controller}`")]
    ControllerNotFound { controller: String },

    /// The controller exists but has no action with that name.
    #[error("Controller `{controller}` has no action `{action}`")]
    ActionNotFound { controller: String, action: String },

    /// The action exists but it doesn't accept the request method.
    #[error("Action `{controller}/{action}` does not accept {method} requests")]
    MethodNotAccepted {
        controller: String,
        action: String,
        method: Method,
    },

    /// An action asked for a view which is not registered.
    #[error("Template `{0}` could not be found")]
    TemplateNotFound(String),

    /// The view templates could not be loaded.
    #[error("Could not load the view templates: {0}")]
    Templates(#[source] tera::Error),

    /// The template engine failed to render a template.
    #[error("Could not render template `{name}`: {source}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// A JSON reply could not be serialized.
    #[error("Could not serialize the JSON reply: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid router configuration, reported when the road is built.
    #[error("{0}")]
    Config(String),

    /// An error returned by a route handler, an action or a middleware.
    #[error("{0}")]
    Handler(RouteError),
}

impl Error {
    /// Creates a configuration error with the given message.
    pub fn new<M: Into<String>>(message: M) -> Error {
        Error::Config(message.into())
    }

    /// Creates a not found error for a controller action pair.
    pub fn not_found<C: Into<String>, A: Into<String>>(controller: C, action: A) -> Error {
        Error::ActionNotFound {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Converts an error coming out of user code, keeping a boxed `roadway::Error` as is.
    pub fn from_handler<E: Into<RouteError>>(err: E) -> Error {
        let err: RouteError = err.into();
        match err.downcast::<Error>() {
            Ok(err) => *err,
            Err(err) => Error::Handler(err),
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::ControllerNotFound { .. } | Error::ActionNotFound { .. } | Error::MethodNotAccepted { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` if the request could not be routed to an action.
    pub fn is_not_found(&self) -> bool {
        self.status() == StatusCode::NOT_FOUND
    }
}
