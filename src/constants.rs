// Content types the replies are negotiated to.
pub(crate) const TEXT_HTML: &str = "text/html; charset=utf-8";
pub(crate) const TEXT_PLAIN: &str = "text/plain";
pub(crate) const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub(crate) const APPLICATION_JSON: &str = "application/json";

// Body of the default error response.
pub(crate) const ERROR_BODY: &str = "Error, or not found.";
