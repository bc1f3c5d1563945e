use crate::helpers;
use std::fmt::{self, Display, Formatter};

/// The naming conventions used to resolve a request path into a controller action and its view.
///
/// # Examples
///
/// ```
/// use roadway::Conventions;
///
/// let conventions = Conventions {
///     default_controller: "home".into(),
///     ..Default::default()
/// };
/// assert_eq!(conventions.default_action, "index");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// The controller used when the path has no segment at all.
    pub default_controller: String,
    /// The action used when the path has no action segment.
    pub default_action: String,
    /// The route parameter the first positional parameter is exposed as.
    pub id_param: String,
    /// Appended to `{controller}/{action}` to get the conventional template name.
    pub view_extension: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            default_controller: "index".to_owned(),
            default_action: "index".to_owned(),
            id_param: "id".to_owned(),
            view_extension: ".html".to_owned(),
        }
    }
}

impl Conventions {
    /// Returns the conventional template name of a resolved request e.g. `foo/bar.html`.
    pub fn template_name(&self, resolution: &Resolution) -> String {
        format!(
            "{}/{}{}",
            resolution.controller, resolution.action, self.view_extension
        )
    }
}

/// The outcome of routing a request: the controller, the action and the positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    controller: String,
    action: String,
    params: Vec<String>,
}

impl Resolution {
    /// Creates a resolution out of its parts.
    pub fn new<C: Into<String>, A: Into<String>>(controller: C, action: A, params: Vec<String>) -> Resolution {
        Resolution {
            controller: controller.into(),
            action: action.into(),
            params,
        }
    }

    /// Resolves a request path by convention.
    ///
    /// The first segment selects the controller, the second one the action and everything after
    /// are positional parameters. Missing segments fall back to the conventional defaults.
    /// The path is split before the segments are percent-decoded, so `%2F` never splits a segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadway::{Conventions, Resolution};
    ///
    /// let conventions = Conventions::default();
    ///
    /// let res = Resolution::from_path("/foo/baz/42", &conventions);
    /// assert_eq!(res.controller(), "foo");
    /// assert_eq!(res.action(), "baz");
    /// assert_eq!(res.params(), ["42"]);
    ///
    /// let res = Resolution::from_path("/", &conventions);
    /// assert_eq!((res.controller(), res.action()), ("index", "index"));
    /// ```
    pub fn from_path(path: &str, conventions: &Conventions) -> Resolution {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).map(helpers::decode_segment);

        let controller = segments.next().unwrap_or_else(|| conventions.default_controller.clone());
        let action = segments.next().unwrap_or_else(|| conventions.default_action.clone());
        let params = segments.collect();

        Resolution::new(controller, action, params)
    }

    /// The controller name.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The positional parameters in path order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The first positional parameter, conventionally the resource id.
    pub fn id(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.controller, self.action)?;
        for param in &self.params {
            write!(f, "/{}", param)?;
        }
        Ok(())
    }
}
