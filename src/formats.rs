//! Format predicates used by the rule catalog, and the path-template grammar.
//!
//! The predicates are plain function pointers collected in
//! [`FormatCheckers`], so a host can swap any of them on the engine.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// type "/" subtype, either side may be `*`, followed by `; param=value` pairs.
static MIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$&^_.+*-]+/[A-Za-z0-9!#$&^_.+*-]+(\s*;\s*[A-Za-z0-9!#$&^_.+-]+=[^;]+)*$")
        .unwrap()
});

static STATUS_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-5][0-9][0-9]|[1-5]XX)$").unwrap());

/// Swappable format predicates.
#[derive(Clone, Copy, Debug)]
pub struct FormatCheckers {
    pub url: fn(&str) -> bool,
    pub email: fn(&str) -> bool,
    pub mime_type: fn(&str) -> bool,
    pub markup: fn(&str) -> bool,
}

impl Default for FormatCheckers {
    fn default() -> Self {
        FormatCheckers {
            url: is_url,
            email: is_email,
            mime_type: is_mime_type,
            markup: is_markup,
        }
    }
}

/// Absolute URLs, and relative references that start like one (`/`, `./`,
/// `../`, `?`, `#` or `//host`).
///
/// Bare words such as `example.com` or `terms` are rejected: they parse as
/// relative paths but are almost always a URL with its scheme left out.
pub fn is_url(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    if let Ok(url) = Url::parse(s) {
        return !url.cannot_be_a_base() || url.scheme() == "mailto" || url.scheme() == "urn";
    }
    let relative = ["/", "./", "../", "?", "#"].into_iter().any(|p| s.starts_with(p));
    if !relative {
        return false;
    }
    match Url::parse("http://localhost/") {
        Ok(base) => base.join(s).is_ok(),
        Err(_) => false,
    }
}

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Media types and media type ranges (`text/*`, `*/*`).
pub fn is_mime_type(s: &str) -> bool {
    MIME_RE.is_match(s.trim())
}

/// CommonMark accepts any text; only control characters are rejected.
pub fn is_markup(s: &str) -> bool {
    !s.chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
}

/// Response keys: `default` is handled separately.
pub fn is_status_code(key: &str) -> bool {
    STATUS_CODE_RE.is_match(key)
}

// ─── Path templates ─────────────────────────────────────────────────────────

/// A well-formed path template such as `/pets/{petId}/photos`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    /// Raw segments between slashes, the leading empty one excluded.
    pub segments: Vec<String>,
    /// Template parameter names in order of appearance.
    pub parameters: Vec<String>,
}

impl PathTemplate {
    /// Parses a path key. `None` when the template is malformed: it does not
    /// start with `/`, has a query string, or has unbalanced, nested or empty
    /// braces.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        if path.contains(['?', '#']) {
            return None;
        }
        let mut parameters = Vec::new();
        let mut segments = Vec::new();
        for segment in rest.split('/') {
            let mut open: Option<usize> = None;
            for (i, c) in segment.char_indices() {
                match c {
                    '{' if open.is_none() => open = Some(i),
                    '}' => {
                        let start = open.take()?;
                        let name = &segment[start + 1..i];
                        if name.is_empty() {
                            return None;
                        }
                        parameters.push(name.to_string());
                    }
                    '{' => return None,
                    _ => {}
                }
            }
            if open.is_some() {
                return None;
            }
            segments.push(segment.to_string());
        }
        Some(PathTemplate {
            segments,
            parameters,
        })
    }

    /// True for `//` or a trailing slash. The root path `/` has no empty segment.
    pub fn has_empty_segment(&self) -> bool {
        if self.segments.len() == 1 {
            return false;
        }
        self.segments.iter().any(String::is_empty)
    }

    /// The template with every parameter name erased (`/pets/{}`).
    pub fn normalized(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            let mut in_braces = false;
            for c in segment.chars() {
                match c {
                    '{' => {
                        in_braces = true;
                        out.push('{');
                    }
                    '}' => {
                        in_braces = false;
                        out.push('}');
                    }
                    _ if in_braces => {}
                    _ => out.push(c),
                }
            }
        }
        out
    }
}
