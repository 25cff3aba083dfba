//! Request builders for the suggestion and shortcut protocols

use super::ProviderRequest;
use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::results::SUGGEST_COLUMN_INTENT_EXTRA_DATA;
use url::Url;

/// Scheme of provider URIs
pub const CONTENT_SCHEME: &str = "content";

/// Path segment selecting the suggestion query
pub const SUGGEST_URI_PATH_QUERY: &str = "search_suggest_query";

/// Path segment selecting a shortcut refresh
pub const SUGGEST_URI_PATH_SHORTCUT: &str = "search_suggest_shortcut";

/// Query parameter carrying the row limit
pub const LIMIT_PARAM: &str = "limit";

/// Provider URI under construction, with its literal path
struct RequestBuilder {
    uri: Url,
    path: Vec<String>,
}

impl RequestBuilder {
    /// `content://authority[/path]` for a source
    fn for_source(config: &SourceConfig) -> Result<Self> {
        let authority = config
            .suggest_authority
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| SourceError::ProviderUnavailable {
                component: config.component.flatten_to_short_string(),
            })?;

        let mut uri = Url::parse(&format!("{}://{}", CONTENT_SCHEME, authority))
            .map_err(|e| SourceError::InvalidUri(format!("{}: {}", authority, e)))?;

        // The declared path is already encoded
        let declared = config
            .suggest_path
            .as_deref()
            .map(|p| p.trim_matches('/'))
            .unwrap_or_default();
        uri.set_path(&format!("/{}", declared));

        let path = declared
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();

        Ok(Self { uri, path })
    }

    /// Append literal segments
    ///
    /// The URI drops `.` and `..`; the request path keeps them.
    fn push(&mut self, segments: &[&str]) -> Result<()> {
        let text = self.uri.to_string();
        {
            let mut uri_path = self
                .uri
                .path_segments_mut()
                .map_err(|_| SourceError::InvalidUri(text))?;
            uri_path.pop_if_empty();
            uri_path.extend(segments);
        }
        self.path.extend(segments.iter().map(|s| s.to_string()));
        Ok(())
    }

    fn append_pair(&mut self, name: &str, value: &str) {
        self.uri.query_pairs_mut().append_pair(name, value);
    }

    fn build(self) -> ProviderRequest {
        ProviderRequest::with_path(self.uri, self.path)
    }
}

/// Request for the suggestions matching `query`
///
/// With a selection template the query is bound as its only argument;
/// otherwise it becomes the last path segment.
pub fn suggestions_request(
    config: &SourceConfig,
    query: &str,
    limit: usize,
) -> Result<ProviderRequest> {
    let mut builder = RequestBuilder::for_source(config)?;

    match config.suggest_selection.as_deref() {
        Some(_) => builder.push(&[SUGGEST_URI_PATH_QUERY])?,
        None => builder.push(&[SUGGEST_URI_PATH_QUERY, query])?,
    }
    builder.append_pair(LIMIT_PARAM, &limit.to_string());

    let request = builder.build();
    Ok(match config.suggest_selection.as_deref() {
        Some(selection) => request.with_selection(selection, vec![query.to_string()]),
        None => request,
    })
}

/// Request re-validating the shortcut `shortcut_id`
pub fn shortcut_request(
    config: &SourceConfig,
    shortcut_id: &str,
    extra_data: Option<&str>,
) -> Result<ProviderRequest> {
    let mut builder = RequestBuilder::for_source(config)?;
    builder.push(&[SUGGEST_URI_PATH_SHORTCUT, shortcut_id])?;

    if let Some(data) = extra_data {
        builder.append_pair(SUGGEST_COLUMN_INTENT_EXTRA_DATA, data);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentName;

    fn config() -> SourceConfig {
        SourceConfig::new(ComponentName::new("com.example.contacts", ".Search"))
            .with_authority("com.example.contacts.provider")
    }

    #[test]
    fn test_rest_style_query() {
        let request = suggestions_request(&config(), "ada lovelace", 7).unwrap();
        assert_eq!(request.uri.scheme(), CONTENT_SCHEME);
        assert_eq!(request.authority(), Some("com.example.contacts.provider"));
        assert_eq!(
            request.path_segments(),
            vec![SUGGEST_URI_PATH_QUERY.to_string(), "ada lovelace".to_string()]
        );
        assert_eq!(request.query_param(LIMIT_PARAM).as_deref(), Some("7"));
        assert!(request.selection.is_none());
        assert!(request.selection_args.is_empty());
    }

    #[test]
    fn test_query_text_stays_one_segment() {
        let request = suggestions_request(&config(), "a/b?c#d", 1).unwrap();
        assert_eq!(request.path_segments().last().map(String::as_str), Some("a/b?c#d"));
        assert_eq!(request.query_param(LIMIT_PARAM).as_deref(), Some("1"));
        assert!(request.uri.fragment().is_none());
    }

    #[test]
    fn test_dot_query_text_is_kept() {
        for text in [".", ".."] {
            let request = suggestions_request(&config(), text, 5).unwrap();
            assert_eq!(
                request.path_segments(),
                vec![SUGGEST_URI_PATH_QUERY.to_string(), text.to_string()]
            );
            assert_eq!(request.query_param(LIMIT_PARAM).as_deref(), Some("5"));
        }
    }

    #[test]
    fn test_dot_shortcut_id_is_kept() {
        for id in [".", ".."] {
            let request = shortcut_request(&config().with_path("people"), id, Some("x")).unwrap();
            assert_eq!(
                request.path_segments(),
                vec!["people", SUGGEST_URI_PATH_SHORTCUT, id]
            );
            assert_eq!(
                request.query_param(SUGGEST_COLUMN_INTENT_EXTRA_DATA).as_deref(),
                Some("x")
            );
        }
    }

    #[test]
    fn test_selection_binds_query() {
        let config = config().with_selection("display_name LIKE ?");
        let request = suggestions_request(&config, "o'brien", 3).unwrap();

        assert_eq!(request.selection.as_deref(), Some("display_name LIKE ?"));
        assert_eq!(request.selection_args, vec!["o'brien".to_string()]);
        assert_eq!(request.path_segments(), vec![SUGGEST_URI_PATH_QUERY.to_string()]);
        assert!(!request.uri.as_str().contains("brien"));
        assert_eq!(request.query_param(LIMIT_PARAM).as_deref(), Some("3"));
    }

    #[test]
    fn test_content_path_is_inserted() {
        let config = config().with_path("/people/v2/");
        let request = suggestions_request(&config, "x", 10).unwrap();
        assert_eq!(
            request.path_segments(),
            vec!["people", "v2", SUGGEST_URI_PATH_QUERY, "x"]
        );
    }

    #[test]
    fn test_shortcut_request() {
        let config = config().with_path("people");
        let request = shortcut_request(&config, "id 9", Some("extra=1&b")).unwrap();
        assert_eq!(
            request.path_segments(),
            vec!["people", SUGGEST_URI_PATH_SHORTCUT, "id 9"]
        );
        assert_eq!(
            request.query_param(SUGGEST_COLUMN_INTENT_EXTRA_DATA).as_deref(),
            Some("extra=1&b")
        );
        assert!(request.query_param(LIMIT_PARAM).is_none());
    }

    #[test]
    fn test_shortcut_without_extra_data() {
        let request = shortcut_request(&config(), "9", None).unwrap();
        assert!(request.uri.query().is_none());
    }

    #[test]
    fn test_missing_authority_is_unavailable() {
        let config = SourceConfig::new(ComponentName::new("com.example", ".Search"));
        assert!(matches!(
            suggestions_request(&config, "x", 1),
            Err(SourceError::ProviderUnavailable { .. })
        ));
        assert!(matches!(
            shortcut_request(&config, "1", None),
            Err(SourceError::ProviderUnavailable { .. })
        ));
    }
}
