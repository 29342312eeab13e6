//! Image MIME type / file extension lookups shared by the picker and resolver.

use bridge_traits::picker::IMAGE_MIME_WILDCARD;

/// File extensions matching the given MIME filters.
///
/// `image/*` expands to every known image extension. Non-image entries are
/// skipped. An empty result falls back to every image extension.
pub fn extensions_for_mime_types(mime_types: &[String]) -> Vec<&'static str> {
    let mut extensions = Vec::new();

    for mime in mime_types {
        let mime = mime.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            continue;
        }
        for ext in mime_guess::get_mime_extensions_str(&mime).unwrap_or_default() {
            if !extensions.contains(ext) {
                extensions.push(*ext);
            }
        }
    }

    if extensions.is_empty() {
        return all_image_extensions();
    }
    extensions
}

/// Best-effort MIME type for a file extension (case-insensitive).
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    mime_guess::from_ext(extension).first_raw()
}

fn all_image_extensions() -> Vec<&'static str> {
    mime_guess::get_mime_extensions_str(IMAGE_MIME_WILDCARD)
        .map(<[_]>::to_vec)
        .unwrap_or_default()
}
