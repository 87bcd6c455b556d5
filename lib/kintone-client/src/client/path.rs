use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use super::error::ApiClientError;

/// Matches path parameters in the form `{param_name}`.
static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

/// URL-encodes a path parameter value so it stays a single path segment.
fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// A parameterized URL path with named parameter substitution.
///
/// Parameters use `{name}` placeholders; the same parameter may appear more
/// than once. Values are percent-encoded on resolution so they cannot escape
/// their path segment.
///
/// The production use is the guest-space API prefix
/// (`k/guest/{space}/v1/`), but the resolver is general.
///
/// # Examples
///
/// ```rust
/// use kintone_client::client::PathTemplate;
///
/// let path = PathTemplate::from("k/guest/{space}/v1/").add_param("space", 17);
/// assert_eq!(path.resolve().unwrap(), "k/guest/17/v1/");
/// ```
#[derive(Debug, Clone, Default, derive_more::Display)]
#[display("{path}")]
pub struct PathTemplate {
    path: String,
    args: IndexMap<String, String>,
}

impl PathTemplate {
    /// Adds a path parameter with the given name and value.
    pub fn add_param(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// Substitutes all parameters and returns the concrete path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::PathUnresolved`] when a placeholder has no
    /// supplied value.
    pub fn resolve(&self) -> Result<String, ApiClientError> {
        let mut path = self.path.clone();

        let mut names: Vec<String> = PARAM_RE
            .captures_iter(&path)
            .filter_map(|caps| caps.name("name"))
            .map(|matched| matched.as_str().to_string())
            .collect();
        names.dedup();

        if names.is_empty() {
            return Ok(path);
        }

        for (name, value) in &self.args {
            if !names.contains(name) {
                tracing::warn!(?name, "path argument not found in template");
                continue;
            }
            names.retain(|candidate| candidate != name);

            let encoded = encode_path_param_value(value);
            path = replace_path_param(&path, name, &encoded);
        }

        if names.is_empty() {
            Ok(path)
        } else {
            Err(ApiClientError::PathUnresolved {
                path,
                missing: names,
            })
        }
    }
}

impl From<&str> for PathTemplate {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for PathTemplate {
    fn from(value: String) -> Self {
        Self {
            path: value,
            args: IndexMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use rstest::rstest;

    use super::*;

    #[test]
    fn should_resolve_guest_space_prefix() {
        let path = PathTemplate::from("k/guest/{space}/v1/").add_param("space", 42);
        check!(path.resolve().expect("full resolve") == "k/guest/42/v1/");
    }

    #[test]
    fn should_pass_through_literal_paths() {
        let path = PathTemplate::from("k/v1/");
        check!(path.resolve().expect("no params") == "k/v1/");
    }

    #[test]
    fn should_resolve_multiple_parameters() {
        let path = PathTemplate::from("api/{version}/apps/{id}")
            .add_param("version", "v1")
            .add_param("id", 123);
        check!(path.resolve().expect("full resolve") == "api/v1/apps/123");
    }

    #[test]
    fn should_resolve_duplicate_placeholders() {
        let path = PathTemplate::from("echo/{id}/{id}").add_param("id", 7);
        check!(path.resolve().expect("full resolve") == "echo/7/7");
    }

    #[test]
    fn should_report_missing_parameters() {
        let path = PathTemplate::from("k/guest/{space}/v1/");

        let result = path.resolve();
        assert2::let_assert!(Err(ApiClientError::PathUnresolved { missing, .. }) = result);
        check!(missing == vec!["space".to_string()]);
    }

    #[test]
    fn should_overwrite_parameters_added_twice() {
        let path = PathTemplate::from("apps/{id}")
            .add_param("id", 1)
            .add_param("id", 2);
        check!(path.resolve().expect("full resolve") == "apps/2");
    }

    #[rstest]
    #[case("hello world", "apps/hello%20world")]
    #[case("test@example.com", "apps/test%40example%2Ecom")]
    #[case("a/b", "apps/a%2Fb")]
    fn should_percent_encode_values(#[case] value: &str, #[case] expected: &str) {
        let path = PathTemplate::from("apps/{name}").add_param("name", value);
        check!(path.resolve().expect("full resolve") == expected);
    }

    #[test]
    fn replace_does_not_match_substring_parameter_names() {
        let replaced = replace_path_param("/users/{user_id}/posts/{id}", "id", "123");
        check!(replaced == "/users/{user_id}/posts/123");
    }
}
