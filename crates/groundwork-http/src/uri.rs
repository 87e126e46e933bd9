//! URI templating for outbound calls.

use reqwest::Url;

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;

/// Replace every `{key}` in `template` with its value. Values are inserted
/// as given; unknown placeholders stay in place.
pub fn expand(template: &str, paths: &[(String, String)]) -> String {
    paths.iter().fold(template.to_string(), |uri, (key, value)| {
        uri.replace(&format!("{{{key}}}"), value)
    })
}

/// Build the final URL: expand path parameters, join relative URIs onto
/// `base`, then append percent-encoded query parameters in order.
pub fn resolve(
    base: Option<&Url>,
    template: &str,
    paths: &[(String, String)],
    queries: &[(String, String)],
) -> AppResult<Url> {
    let expanded = expand(template, paths);

    let mut url = match (Url::parse(&expanded), base) {
        (Ok(url), _) => url,
        (Err(_), Some(base)) => base.join(&expanded).map_err(|e| {
            AppError::with_source(
                codes::INVALID_PARAMETER,
                format!("Cannot join '{expanded}' onto {base}"),
                e,
            )
        })?,
        (Err(e), None) => {
            return Err(AppError::with_source(
                codes::INVALID_PARAMETER,
                format!("'{expanded}' is not an absolute URL and the client has no base URL"),
                e,
            ));
        }
    };

    if !queries.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in queries {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_replaces_placeholders() {
        let uri = expand(
            "/projects/{projectId}/files/{fileId}",
            &pairs(&[("projectId", "42"), ("fileId", "a1")]),
        );
        assert_eq!(uri, "/projects/42/files/a1");
    }

    #[test]
    fn test_expand_leaves_unknown_placeholders() {
        assert_eq!(expand("/users/{id}", &[]), "/users/{id}");
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("http://svc.local/api/").unwrap();
        let url = resolve(Some(&base), "users/{id}", &pairs(&[("id", "7")]), &[]).unwrap();
        assert_eq!(url.as_str(), "http://svc.local/api/users/7");
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let base = Url::parse("http://svc.local/").unwrap();
        let url = resolve(Some(&base), "https://other.example/x", &[], &[]).unwrap();
        assert_eq!(url.host_str(), Some("other.example"));
    }

    #[test]
    fn test_resolve_appends_encoded_queries_in_order() {
        let url = resolve(
            None,
            "http://svc.local/search",
            &[],
            &pairs(&[("q", "a b&c"), ("page", "2")]),
        )
        .unwrap();
        assert_eq!(url.query(), Some("q=a+b%26c&page=2"));
    }

    #[test]
    fn test_resolve_relative_without_base_fails() {
        let err = resolve(None, "/users", &[], &[]).unwrap_err();
        assert!(err.has_code(codes::INVALID_PARAMETER));
    }
}
