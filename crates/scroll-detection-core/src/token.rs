#![forbid(unsafe_code)]

//! Scroll class tokens and the sinks that hold them.
//!
//! Two families of class token are managed:
//!
//! | Kind | Form | Example |
//! |------|------|---------|
//! | Pixel | `scrolled-<N>` | `scrolled-150` |
//! | Percent | `scrolled-pct-<N>` | `scrolled-pct-25` |
//!
//! Everything else in the class list is foreign and never touched.
//!
//! A [`ClassSink`] is the only thing the detector writes to. [`TokenSet`] is
//! an in-memory ordered set; [`ClassAttribute`] edits a whitespace-separated
//! `class` attribute value the way the browser frontend does.

const PIXEL_PREFIX: &str = "scrolled-";
const PERCENT_PREFIX: &str = "scrolled-pct-";

/// Family of a scroll class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Pixel,
    Percent,
}

/// Which tokens a reset removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPattern {
    /// Pixel and percent tokens.
    AnyScroll,
    /// Percent tokens only.
    PercentOnly,
}

impl TokenPattern {
    #[must_use]
    pub fn matches(self, token: &str) -> bool {
        match (self, classify(token)) {
            (_, None) => false,
            (Self::AnyScroll, Some(_)) => true,
            (Self::PercentOnly, Some(kind)) => kind == TokenKind::Percent,
        }
    }
}

/// Classify a single class token. Prefix matching ignores ASCII case.
#[must_use]
pub fn classify(token: &str) -> Option<TokenKind> {
    if let Some(rest) = strip_prefix_ignore_case(token, PERCENT_PREFIX) {
        if is_number(rest) {
            return Some(TokenKind::Percent);
        }
    }
    let rest = strip_prefix_ignore_case(token, PIXEL_PREFIX)?;
    is_number(rest).then_some(TokenKind::Pixel)
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head = token.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &token[prefix.len()..])
}

/// Digits with an optional fractional part and an optional exponent.
fn is_number(s: &str) -> bool {
    let (s, exp) = match s.split_once(['e', 'E']) {
        Some((mantissa, exp)) => (mantissa, Some(exp)),
        None => (s, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let exp_ok = exp.is_none_or(|exp| {
        all_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp))
    });
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    exp_ok && all_digits(int) && frac.is_none_or(all_digits)
}

/// Render a number the way JavaScript string concatenation does.
#[must_use]
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        let rendered = if value > 0.0 { "Infinity" } else { "-Infinity" };
        rendered.to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else if value.abs() < 1e-6 {
        format!("{value:e}")
    } else if value.abs() >= 1e21 {
        format!("{value:e}").replacen('e', "e+", 1)
    } else {
        format!("{value}")
    }
}

/// `scrolled-<value>`.
#[must_use]
pub fn pixel_token(value: f64) -> String {
    format!("{PIXEL_PREFIX}{}", js_number(value))
}

/// `scrolled-pct-<value>`.
#[must_use]
pub fn percent_token(value: f64) -> String {
    format!("{PERCENT_PREFIX}{}", js_number(value))
}

/// Destination for class token edits.
///
/// Implementations must answer [`has_token`](ClassSink::has_token) from their
/// current contents, not from a cache of earlier edits.
pub trait ClassSink {
    /// Whether `token` is present.
    fn has_token(&self, token: &str) -> bool;

    /// Append `token` unless it is already present.
    fn add_token(&mut self, token: &str);

    /// Remove every token `pattern` matches. Returns how many were removed.
    fn remove_matching(&mut self, pattern: TokenPattern) -> usize;
}

/// Ordered set of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for token in iter {
            let token = token.into();
            if !set.has_token(&token) {
                set.tokens.push(token);
            }
        }
        set
    }
}

impl ClassSink for TokenSet {
    fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    fn add_token(&mut self, token: &str) {
        if !self.has_token(token) {
            self.tokens.push(token.to_owned());
        }
    }

    fn remove_matching(&mut self, pattern: TokenPattern) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|t| !pattern.matches(t));
        before - self.tokens.len()
    }
}

/// A `class` attribute value edited in place.
///
/// Foreign tokens keep their relative order. Removal rejoins the remaining
/// tokens with single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassAttribute {
    value: String,
}

impl ClassAttribute {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }

    /// Tokens in attribute order, as a set.
    #[must_use]
    pub fn tokens(&self) -> TokenSet {
        self.value.split_ascii_whitespace().collect()
    }
}

impl ClassSink for ClassAttribute {
    fn has_token(&self, token: &str) -> bool {
        self.value.split_ascii_whitespace().any(|t| t == token)
    }

    fn add_token(&mut self, token: &str) {
        if self.has_token(token) {
            return;
        }
        if !self.value.is_empty() && !self.value.ends_with(|c: char| c.is_ascii_whitespace()) {
            self.value.push(' ');
        }
        self.value.push_str(token);
    }

    fn remove_matching(&mut self, pattern: TokenPattern) -> usize {
        let mut removed = 0;
        let kept: Vec<&str> = self
            .value
            .split_ascii_whitespace()
            .filter(|t| {
                let hit = pattern.matches(t);
                removed += usize::from(hit);
                !hit
            })
            .collect();
        if removed > 0 {
            self.value = kept.join(" ");
        }
        removed
    }
}
