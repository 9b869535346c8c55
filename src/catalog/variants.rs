/// Expands an evaluated URL into its route variants.
///
/// The query string is dropped first. A URL with optional-segment markers
/// yields the full variant (markers stripped, enclosed text kept) followed by
/// the minimal variant (bracketed regions removed). Brackets do not nest.
#[must_use]
pub fn expand_url(url: &str) -> Vec<String> {
    let path = match url.find('?') {
        Some(index) => &url[..index],
        None => url,
    };

    if !path.contains('[') {
        return vec![path.to_owned()];
    }

    let full = path.replace(['[', ']'], "");
    vec![full, strip_optional_segments(path)]
}

/// Removes every `[` up to the next `]`, plus any directly repeated `]`.
fn strip_optional_segments(path: &str) -> String {
    let mut minimal = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('[') {
        minimal.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find(']') {
            Some(close) => {
                rest = after_open[close..].trim_start_matches(']');
            }
            None => {
                // Unterminated marker: keep the remainder untouched.
                minimal.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    minimal.push_str(rest);
    minimal
}
