//! Image asset resolution and gradient fallbacks

/// Curated background gradients used when a game has no usable image
pub const GRADIENTS: [&str; 17] = [
    "linear-gradient(135deg, #a18cd1 0%, #fbc2eb 100%)",
    "linear-gradient(135deg, #fad0c4 0%, #ffd1ff 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 99%, #fecfef 100%)",
    "linear-gradient(135deg, #fbc2eb 0%, #a6c1ee 100%)",
    "linear-gradient(135deg, #84fab0 0%, #8fd3f4 100%)",
    "linear-gradient(135deg, #a1c4fd 0%, #c2e9fb 100%)",
    "linear-gradient(135deg, #e0c3fc 0%, #8ec5fc 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #89f7fe 0%, #66a6ff 100%)",
    "linear-gradient(135deg, #fddb92 0%, #d1fdff 100%)",
    "linear-gradient(135deg, #9890e3 0%, #b1f4cf 100%)",
    "linear-gradient(135deg, #ebc0fd 0%, #d9ded8 100%)",
    "linear-gradient(135deg, #96fbc4 0%, #f9f586 100%)",
];

/// Stable gradient for an id.
///
/// `hash = c + ((hash << 5) - hash)` over UTF-16 code units with the shift
/// done in 32 bits and the rest unbounded, so ids keep the palette entry the
/// existing pages already show for them.
pub fn gradient_for(id: &str) -> &'static str {
    let mut hash: i64 = 0;
    for unit in id.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + (shifted - hash);
    }
    let index = (hash.unsigned_abs() % GRADIENTS.len() as u64) as usize;
    GRADIENTS[index]
}

/// Resolve a stored image reference to a displayable path.
///
/// - `http…` and `data:` strings pass through
/// - bare filenames land under `image_dir`
/// - anything else is treated as a relative path already
pub fn resolve_image(reference: &str, image_dir: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("http") || reference.starts_with("data:") {
        return reference.to_string();
    }
    if !reference.contains('/') {
        let dir = image_dir.trim_end_matches('/');
        return format!("{dir}/{reference}");
    }
    reference.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image() {
        let dir = "assets/images/games/";
        assert_eq!(
            resolve_image("https://cdn.example.com/a.png", dir),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(resolve_image("data:image/png;base64,xx", dir), "data:image/png;base64,xx");
        assert_eq!(resolve_image("catan.jpg", dir), "assets/images/games/catan.jpg");
        assert_eq!(resolve_image("img/other/catan.jpg", dir), "img/other/catan.jpg");
    }

    #[test]
    fn test_gradient_is_stable() {
        assert_eq!(gradient_for("catan"), gradient_for("catan"));
        // "a" hashes to 97 -> 97 % 17 == 12
        assert_eq!(gradient_for("a"), GRADIENTS[12]);
        assert_eq!(gradient_for(""), GRADIENTS[0]);
    }
}
