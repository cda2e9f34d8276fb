//! Escaping, link and inline style helpers.

use builder_core::StyleMap;

/// Escape text for use in element content or a quoted attribute.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a camelCase style key to its CSS property name.
///
/// `backgroundColor` becomes `background-color`; keys that are already
/// kebab-case pass through.
#[must_use]
pub fn css_property(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a style map as an inline `style` declaration list.
///
/// Entries with an empty value are skipped. Values are not escaped here;
/// [`style_attr`] escapes the whole declaration.
#[must_use]
pub fn inline_css(styles: &StyleMap) -> String {
    styles
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{}: {}", css_property(key), value.trim()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// ` style="..."` attribute, or an empty string when there are no styles.
#[must_use]
pub fn style_attr(styles: &StyleMap) -> String {
    let css = inline_css(styles);
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape(&css))
    }
}

/// URL schemes a link may use.
const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Link target that is safe to place in an `href`.
///
/// Relative paths, fragments and `http`, `https`, `mailto` and `tel` URLs
/// pass through trimmed. Anything else, including `javascript:` and
/// `data:` URLs, becomes `#`.
#[must_use]
pub fn safe_href(href: &str) -> &str {
    let href = href.trim();
    if href.is_empty() {
        return "#";
    }
    let scheme_end = href.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    let Some(colon) = scheme_end.filter(|&i| href[i..].starts_with(':')) else {
        return href;
    };
    // Browsers drop tabs and newlines inside the scheme.
    let scheme = href[..colon]
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if LINK_SCHEMES.contains(&scheme.as_str()) {
        href
    } else {
        tracing::debug!("Unsafe link scheme {scheme:?} replaced with #");
        "#"
    }
}
