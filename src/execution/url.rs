//! URL building

use url::Url;

use crate::defaults;
use crate::error::{PandaDocError, Result};

/// Normalize a configured base URL: trimmed, blank falls back to the default,
/// scheme and host required, path ends with `/`.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = match raw.trim() {
        "" => defaults::http::BASE_URL,
        trimmed => trimmed,
    };
    let mut url = Url::parse(raw).map_err(|e| PandaDocError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(PandaDocError::InvalidBaseUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join a base path and a relative path with exactly one `/` between them.
///
/// An empty relative path yields the base path without its trailing slash
/// (or `/` for the root).
pub(crate) fn join_paths(base_path: &str, rel_path: &str) -> String {
    let mut base = base_path.trim().to_string();
    if base.is_empty() {
        base.push('/');
    }
    if !base.starts_with('/') {
        base.insert(0, '/');
    }
    let rel = rel_path.trim();
    let rel = rel.strip_prefix('/').unwrap_or(rel);
    let trimmed_base = base.strip_suffix('/').unwrap_or(&base);

    if rel.is_empty() {
        return if trimmed_base.is_empty() {
            "/".to_string()
        } else {
            trimmed_base.to_string()
        };
    }
    format!("{trimmed_base}/{rel}")
}

/// Resolve `endpoint_path` against `base`, merging queries in order: base URL
/// query, query embedded in the endpoint path, then `query`.
pub(crate) fn build_url(base: &Url, endpoint_path: &str, query: &[(String, String)]) -> Result<Url> {
    if endpoint_path.trim().is_empty() {
        return Err(PandaDocError::EndpointPathRequired);
    }
    let (rel_path, rel_query) = split_endpoint(endpoint_path)?;

    let mut url = base.clone();
    url.set_path(&join_paths(base.path(), &rel_path));

    let mut pairs: Vec<(String, String)> = base.query_pairs().into_owned().collect();
    if let Some(rel_query) = rel_query {
        pairs.extend(url::form_urlencoded::parse(rel_query.as_bytes()).into_owned());
    }
    pairs.extend(query.iter().cloned());

    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

/// Split an endpoint reference into its path and raw query. Absolute URLs
/// contribute only their path and query.
fn split_endpoint(endpoint_path: &str) -> Result<(String, Option<String>)> {
    if let Ok(absolute) = Url::parse(endpoint_path)
        && absolute.has_host()
    {
        return Ok((absolute.path().to_string(), absolute.query().map(str::to_string)));
    }

    let without_fragment = endpoint_path.split('#').next().unwrap_or_default();
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };
    validate_reference(endpoint_path, path)?;
    if let Some(query) = query {
        validate_reference(endpoint_path, query)?;
    }
    Ok((path.to_string(), query.map(str::to_string)))
}

fn validate_reference(endpoint_path: &str, part: &str) -> Result<()> {
    if part.chars().any(char::is_control) {
        return Err(PandaDocError::InvalidEndpointPath(format!(
            "{endpoint_path:?}: invalid control character"
        )));
    }
    let bytes = part.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let escape: String = part[i..].chars().take(3).collect();
                return Err(PandaDocError::InvalidEndpointPath(format!(
                    "{endpoint_path:?}: invalid URL escape {escape:?}"
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Trim and percent-escape a path parameter. `name` labels the error when the
/// value is blank.
pub fn escape_path_param(name: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PandaDocError::EmptyPathParameter(name));
    }
    Ok(urlencoding::encode(trimmed).into_owned())
}
