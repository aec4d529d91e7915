//! Photo reference → displayable image URL.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ImageNormalizationError;

/// Local image served when a product has no usable photo.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.jpg";

/// Spreadsheet exports write missing cells as this literal.
const MISSING_SENTINEL: &str = "nan";

const SHARE_MARKER: &str = "cloud.mail.ru/public/";
const SHARE_PATH_SEGMENT: &str = "/public/";
const THUMBNAIL_BASE: &str = "https://thumb.cloud.mail.ru/weblink/thumb/xw1/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub is_external: bool,
}

impl ResolvedImage {
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_IMAGE.to_string(),
            is_external: false,
        }
    }

    fn external(url: String) -> Self {
        Self {
            url,
            is_external: true,
        }
    }
}

/// Resolve a raw photo reference. Total: every input maps to some image.
pub fn normalize(raw: Option<&str>) -> ResolvedImage {
    let Some(raw) = raw.map(str::trim) else {
        return ResolvedImage::placeholder();
    };
    if raw.is_empty() || raw == MISSING_SENTINEL {
        return ResolvedImage::placeholder();
    }

    if raw.contains(SHARE_MARKER) {
        return match rewrite_share_link(raw) {
            Ok(url) => {
                debug!(from = raw, to = %url, "rewrote share link to thumbnail");
                ResolvedImage::external(url)
            }
            Err(e) => {
                warn!(url = raw, error = %e, "share link rewrite failed; using placeholder");
                ResolvedImage::placeholder()
            }
        };
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return ResolvedImage::external(raw.to_string());
    }

    ResolvedImage::placeholder()
}

/// `https://cloud.mail.ru/public/<a>/<b>` → `https://thumb.cloud.mail.ru/weblink/thumb/xw1/<a>/<b>`
fn rewrite_share_link(raw: &str) -> Result<String, ImageNormalizationError> {
    let (_, public_part) = raw
        .rsplit_once(SHARE_PATH_SEGMENT)
        .ok_or_else(|| ImageNormalizationError::malformed(raw, "no public path segment"))?;

    if public_part.trim_matches('/').is_empty() {
        return Err(ImageNormalizationError::malformed(raw, "empty share path"));
    }
    if public_part.chars().any(char::is_whitespace) {
        return Err(ImageNormalizationError::malformed(raw, "whitespace in share path"));
    }

    Ok(format!("{THUMBNAIL_BASE}{public_part}"))
}
