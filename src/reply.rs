use crate::constants::{APPLICATION_JAVASCRIPT, APPLICATION_JSON, TEXT_HTML, TEXT_PLAIN};
use crate::resolver::{Conventions, Resolution};
use crate::types::RequestInfo;
use crate::view::Views;
use crate::Error;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};
use tera::Context;

/// What an action or a route handler answers with.
///
/// A reply is either a view to render or a ready body with its content type. The content type
/// and the status can be overridden on any reply.
///
/// # Examples
///
/// ```
/// use roadway::Reply;
///
/// // Renders `foo/bar.html` for the `bar` action of the `foo` controller.
/// let reply = Reply::view().with("title", "Road for hyper");
///
/// // Renders the same view but serves it as plain text.
/// let reply = Reply::view().content_type("text/plain");
///
/// let reply = Reply::js("var foo = \"bar\";");
/// ```
pub struct Reply {
    body: ReplyBody,
    content_type: Option<String>,
    status: Option<StatusCode>,
}

enum ReplyBody {
    View { template: Option<String>, context: Context },
    Bytes { bytes: Bytes, content_type: &'static str },
    Response(Response<Full<Bytes>>),
}

impl Reply {
    fn new(body: ReplyBody) -> Reply {
        Reply {
            body,
            content_type: None,
            status: None,
        }
    }

    fn bytes<T: Into<Bytes>>(bytes: T, content_type: &'static str) -> Reply {
        Reply::new(ReplyBody::Bytes {
            bytes: bytes.into(),
            content_type,
        })
    }

    /// Renders the conventional view of the resolved action i.e. `{controller}/{action}.html`.
    pub fn view() -> Reply {
        Reply::view_with(Context::new())
    }

    /// Renders the conventional view with the given template context.
    pub fn view_with(context: Context) -> Reply {
        Reply::new(ReplyBody::View {
            template: None,
            context,
        })
    }

    /// Renders a named template instead of the conventional one.
    pub fn template<N: Into<String>>(name: N) -> Reply {
        Reply::new(ReplyBody::View {
            template: Some(name.into()),
            context: Context::new(),
        })
    }

    /// Inserts a value into the template context. It has no effect on replies which are not views.
    pub fn with<K: Into<String>, V: Serialize + ?Sized>(mut self, key: K, value: &V) -> Reply {
        if let ReplyBody::View { ref mut context, .. } = self.body {
            context.insert(key, value);
        }
        self
    }

    /// A `text/plain` reply.
    pub fn text<T: Into<Bytes>>(body: T) -> Reply {
        Reply::bytes(body, TEXT_PLAIN)
    }

    /// A `text/html; charset=utf-8` reply.
    pub fn html<T: Into<Bytes>>(body: T) -> Reply {
        Reply::bytes(body, TEXT_HTML)
    }

    /// An `application/javascript` reply.
    pub fn js<T: Into<Bytes>>(body: T) -> Reply {
        Reply::bytes(body, APPLICATION_JAVASCRIPT)
    }

    /// An `application/json` reply. Object keys keep their insertion order.
    pub fn json(value: serde_json::Value) -> Reply {
        Reply::bytes(value.to_string(), APPLICATION_JSON)
    }

    /// An `application/json` reply with any serializable value. Struct fields keep their declaration order.
    pub fn try_json<T: Serialize + ?Sized>(value: &T) -> crate::Result<Reply> {
        let body = serde_json::to_vec(value)?;
        Ok(Reply::bytes(body, APPLICATION_JSON))
    }

    /// Sends a response as is.
    pub fn response(res: Response<Full<Bytes>>) -> Reply {
        Reply::new(ReplyBody::Response(res))
    }

    /// Overrides the content type of the reply.
    pub fn content_type<T: Into<String>>(mut self, content_type: T) -> Reply {
        self.content_type = Some(content_type.into());
        self
    }

    /// Overrides the status of the reply, `200 OK` by default.
    pub fn status(mut self, status: StatusCode) -> Reply {
        self.status = Some(status);
        self
    }

    pub(crate) fn into_response(
        self,
        views: &Views,
        conventions: &Conventions,
        resolution: &Resolution,
        req_info: &RequestInfo,
    ) -> crate::Result<Response<Full<Bytes>>> {
        let (mut res, default_content_type) = match self.body {
            ReplyBody::View { template, context } => {
                let name = template.unwrap_or_else(|| conventions.template_name(resolution));
                let html = views.render(&name, &view_context(resolution, req_info, context))?;
                (Response::new(Full::new(Bytes::from(html))), Some(TEXT_HTML))
            }
            ReplyBody::Bytes { bytes, content_type } => (Response::new(Full::new(bytes)), Some(content_type)),
            ReplyBody::Response(res) => (res, None),
        };

        let content_type = self.content_type.as_deref().or(default_content_type);
        if let Some(content_type) = content_type {
            let val = HeaderValue::try_from(content_type)
                .map_err(|e| Error::new(format!("Invalid content type `{}`: {}", content_type, e)))?;
            res.headers_mut().insert(CONTENT_TYPE, val);
        }

        if let Some(status) = self.status {
            *res.status_mut() = status;
        }

        Ok(res)
    }
}

// Every view sees the request it renders for; the action's own values win.
fn view_context(resolution: &Resolution, req_info: &RequestInfo, context: Context) -> Context {
    let mut ctx = Context::new();
    ctx.insert("method", req_info.method().as_str());
    ctx.insert("path", req_info.uri().path());
    ctx.insert("controller", resolution.controller());
    ctx.insert("action", resolution.action());
    ctx.insert("params", resolution.params());
    ctx.extend(context);
    ctx
}

impl Debug for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let body = match self.body {
            ReplyBody::View { ref template, .. } => format!("View({:?})", template),
            ReplyBody::Bytes { ref bytes, content_type } => format!("Bytes({} bytes, {})", bytes.len(), content_type),
            ReplyBody::Response(ref res) => format!("Response({})", res.status()),
        };
        write!(
            f,
            "{{ body: {}, content_type: {:?}, status: {:?} }}",
            body, self.content_type, self.status
        )
    }
}
