//! Content hash extraction from magnet links.

use thiserror::Error;

/// Magnet URI that does not carry a readable content hash.
#[derive(Debug, Error)]
#[error("Malformed magnet URI: {0}")]
pub struct MalformedMagnetUri(pub String);

/// Pull the content hash out of a `magnet:?xt=urn:btih:<hash>&...` URI.
///
/// The hash is the fourth colon-delimited segment, truncated at the
/// first `&`. Fewer than four segments means the URI is malformed.
pub fn extract_info_hash(magnet: &str) -> Result<String, MalformedMagnetUri> {
    let segment = magnet
        .split(':')
        .nth(3)
        .ok_or_else(|| MalformedMagnetUri(magnet.to_string()))?;
    let hash = match segment.find('&') {
        Some(end) => &segment[..end],
        None => segment,
    };
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_hash_before_parameters() {
        let hash = extract_info_hash("magnet:?xt=urn:btih:ABCDEF1234&dn=x").unwrap();
        assert_eq!(hash, "ABCDEF1234");
    }

    #[test]
    fn test_extracts_hash_without_parameters() {
        let hash = extract_info_hash("magnet:?xt=urn:btih:ABCDEF1234").unwrap();
        assert_eq!(hash, "ABCDEF1234");
    }

    #[test]
    fn test_rejects_short_uri() {
        assert!(extract_info_hash("magnet:?xt=urn").is_err());
        assert!(extract_info_hash("").is_err());
    }
}
