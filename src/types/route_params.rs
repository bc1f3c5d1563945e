use std::collections::HashMap;

/// Represents a map of the route parameters using the name of the parameter specified in the path as their respective keys.
///
/// Explicit routes fill it from their `:name` segments. Under convention routing the first positional
/// segment after the action is bound to the `id` parameter.
///
/// Please refer to the [Route Parameters](./index.html#route-parameters) section for more info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Sets a new parameter entry with the specified key and the value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.insert(param_name.into(), param_val.into());
    }

    /// Returns the route parameter value mapped with the specified key.
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&String> {
        self.0.get(param_name.as_ref())
    }

    /// Checks if a route parameter exists.
    pub fn has<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.0.contains_key(param_name.as_ref())
    }

    /// Returns the length of the route parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no route parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an [Iterator](https://doc.rust-lang.org/std/iter/trait.Iterator.html) over the parameter names.
    pub fn params_names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Returns an [Iterator](https://doc.rust-lang.org/std/iter/trait.Iterator.html) over the parameter entries
    /// as `(parameter_name: &String, parameter_value: &String)`.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Extends the current parameters map with other one.
    pub fn extend(&mut self, other_route_params: RouteParams) {
        other_route_params.0.into_iter().for_each(|(key, val)| {
            self.set(key, val);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extend_params() {
        let mut params = RouteParams::new();
        params.set("id", "41");

        let mut other = RouteParams::with_capacity(2);
        other.set("id", "42");
        other.set("slug", "hello");

        params.extend(other);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(params.has("slug"));
        assert!(!params.has("name"));
    }
}
