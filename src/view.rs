use crate::Error;
use std::fmt::{self, Debug, Formatter};
use std::path::Path;
use tera::{Context, Tera};

/// The registry of view templates, backed by [Tera](https://keats.github.io/tera/).
///
/// Templates are named by their path relative to the views directory, so the conventional view of the
/// `bar` action of the `foo` controller is `foo/bar.html`.
///
/// # Examples
///
/// ```
/// use roadway::Views;
///
/// let views = Views::from_raw([("foo/bar.html", "Bar template: {{ method }} {{ controller }}/{{ action }}")]).unwrap();
/// assert!(views.has("foo/bar.html"));
/// ```
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Loads every template matching the glob e.g. `views/**/*.html`.
    pub fn new(glob: &str) -> crate::Result<Views> {
        let tera = Tera::new(glob).map_err(Error::Templates)?;
        Ok(Views { tera })
    }

    /// Loads every template found under the directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> crate::Result<Views> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::new(format!(
                "Views directory `{}` does not exist",
                dir.display()
            )));
        }

        Views::new(format!("{}/**/*", dir.display()).as_str())
    }

    /// Builds the registry from `(name, source)` pairs.
    pub fn from_raw<I, N, C>(templates: I) -> crate::Result<Views>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates).map_err(Error::Templates)?;
        Ok(Views { tera })
    }

    /// A registry without templates, for roads whose actions never render a view.
    pub fn empty() -> Views {
        Views { tera: Tera::default() }
    }

    /// Checks if a template is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Renders a registered template.
    pub fn render(&self, name: &str, context: &Context) -> crate::Result<String> {
        if !self.has(name) {
            return Err(Error::TemplateNotFound(name.to_owned()));
        }

        self.tera.render(name, context).map_err(|source| Error::Render {
            name: name.to_owned(),
            source,
        })
    }
}

impl Default for Views {
    fn default() -> Self {
        Views::empty()
    }
}

impl Debug for Views {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        write!(f, "{{ templates: {:?} }}", names)
    }
}
