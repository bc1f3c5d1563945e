use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PATH_PARAMS_RE: Regex = Regex::new(r"(?s)(?::([^/]+))|(?:\*)").expect("valid path params pattern");
}

// Generates a regex which matches the whole request path, along with the
// parameter names in the order their capture groups appear. A `*` is exposed as
// the `*` parameter.
pub(crate) fn generate_exact_match_regex(path: &str) -> crate::Result<(Regex, Vec<String>)> {
    let (re_str, params) = generate_common_regex_str(path)?;
    let re_str = format!("(?s)^{}$", re_str);

    let re = Regex::new(re_str.as_str())
        .map_err(|e| crate::Error::new(format!("Invalid route path `{}`: {}", path, e)))?;

    Ok((re, params))
}

fn generate_common_regex_str(path: &str) -> crate::Result<(String, Vec<String>)> {
    if !path.starts_with('/') {
        return Err(crate::Error::new(format!(
            "Route path `{}` must start with a `/`",
            path
        )));
    }

    let mut regex_str = String::with_capacity(path.len());
    let mut params = Vec::new();
    let mut pos = 0;

    for caps in PATH_PARAMS_RE.captures_iter(path) {
        let whole = match caps.get(0) {
            Some(whole) => whole,
            None => continue,
        };

        regex_str.push_str(regex::escape(&path[pos..whole.start()]).as_str());

        match caps.get(1) {
            Some(name) => {
                regex_str.push_str("([^/]+)");
                params.push(name.as_str().to_owned());
            }
            None => {
                regex_str.push_str("(.*)");
                params.push("*".to_owned());
            }
        }

        pos = whole.end();
    }

    regex_str.push_str(regex::escape(&path[pos..]).as_str());

    // Request paths always carry a trailing slash once they reach the road. A
    // trailing glob already swallows it.
    if !regex_str.ends_with('/') && !path.ends_with('*') {
        regex_str.push('/');
    }

    Ok((regex_str, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_match_literal_paths() {
        let (re, params) = generate_exact_match_regex("/customPath").unwrap();
        assert!(params.is_empty());
        assert!(re.is_match("/customPath/"));
        assert!(!re.is_match("/customPath/more/"));
        assert!(!re.is_match("/custom/"));
    }

    #[test]
    fn should_capture_named_params() {
        let (re, params) = generate_exact_match_regex("/users/:userId/posts/:postId").unwrap();
        assert_eq!(params, vec!["userId", "postId"]);

        let caps = re.captures("/users/7/posts/42/").unwrap();
        assert_eq!(&caps[1], "7");
        assert_eq!(&caps[2], "42");
        assert!(!re.is_match("/users/7/posts/"));
    }

    #[test]
    fn should_capture_glob() {
        let (re, params) = generate_exact_match_regex("/static/*").unwrap();
        assert_eq!(params, vec!["*"]);
        let caps = re.captures("/static/css/site.css/").unwrap();
        assert_eq!(&caps[1], "css/site.css/");
        assert!(re.is_match("/static/"));

        let (re, _) = generate_exact_match_regex("/*").unwrap();
        assert!(re.is_match("/"));
        assert!(re.is_match("/foo/bar/"));
    }

    #[test]
    fn should_reject_relative_paths() {
        assert!(generate_exact_match_regex("customPath").is_err());
    }
}
