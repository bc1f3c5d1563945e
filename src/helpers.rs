use crate::types::RequestMeta;
use http::Extensions;
use percent_encoding::percent_decode_str;

pub(crate) fn update_req_meta_in_extensions(ext: &mut Extensions, req_meta: RequestMeta) {
    if let Some(existing_req_meta) = ext.get_mut::<RequestMeta>() {
        existing_req_meta.extend(req_meta);
    } else {
        ext.insert(req_meta);
    }
}

// Makes sure the path ends with a `/` so that explicit route patterns match with or
// without a trailing slash. The path stays encoded, segments are decoded one by one
// once it has been split.
pub(crate) fn normalize_request_path(path: &str) -> String {
    let mut target_path = path.to_owned();

    if !target_path.ends_with('/') {
        target_path.push('/');
    }

    target_path
}

// Decodes a single path segment or captured value. An encoded `/` stays inside the value.
pub(crate) fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_normalize_request_path() {
        assert_eq!(normalize_request_path(""), "/");
        assert_eq!(normalize_request_path("/foo/bar"), "/foo/bar/");
        assert_eq!(normalize_request_path("/foo/"), "/foo/");
        assert_eq!(normalize_request_path("/posts/show/a%2Fb"), "/posts/show/a%2Fb/");
    }

    #[test]
    fn should_decode_segments() {
        assert_eq!(decode_segment("hello%20world"), "hello world");
        assert_eq!(decode_segment("a%2Fb"), "a/b");
        assert_eq!(decode_segment("plain"), "plain");
    }
}
