//! Width media queries and the viewport that evaluates them.

use crate::error::ShellError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use todo_shell_core::{Listener, Listeners, Subscription};

/// One `(feature: value)` condition
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WidthFeature {
    /// `(max-width: Npx)`, inclusive
    Max(f64),
    /// `(min-width: Npx)`, inclusive
    Min(f64),
}

impl WidthFeature {
    fn matches(self, width: f64) -> bool {
        match self {
            Self::Max(limit) => width <= limit,
            Self::Min(limit) => width >= limit,
        }
    }
}

/// A conjunction of width features, e.g. `(max-width: 1150px)`
#[derive(Clone, Debug, PartialEq)]
pub struct MediaQuery {
    source: String,
    features: Vec<WidthFeature>,
}

impl MediaQuery {
    /// Parses `(max-width: Npx)` / `(min-width: Npx)` features joined by `and`
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidMediaQuery`] for empty queries, unknown
    /// features, non-pixel units, or malformed numbers.
    pub fn parse(query: &str) -> Result<Self, ShellError> {
        let source = query.trim();
        if source.is_empty() {
            return Err(ShellError::media_query(query, "empty query"));
        }

        let mut features = Vec::new();
        let mut expect_feature = true;
        for token in split_features(source) {
            if expect_feature {
                features.push(parse_feature(query, token)?);
            } else if !token.eq_ignore_ascii_case("and") {
                return Err(ShellError::media_query(query, format!("expected `and`, found `{token}`")));
            }
            expect_feature = !expect_feature;
        }

        if expect_feature {
            return Err(ShellError::media_query(query, "dangling `and`"));
        }

        Ok(Self {
            source: source.to_string(),
            features,
        })
    }

    /// `(max-width: Npx)`
    #[must_use]
    pub fn max_width(px: u32) -> Self {
        Self {
            source: format!("(max-width: {px}px)"),
            features: vec![WidthFeature::Max(f64::from(px))],
        }
    }

    /// Whether a viewport `width` pixels wide satisfies every feature
    #[must_use]
    pub fn matches(&self, width: f64) -> bool {
        self.features.iter().all(|feature| feature.matches(width))
    }

    /// The parsed features
    #[must_use]
    pub fn features(&self) -> &[WidthFeature] {
        &self.features
    }

    /// The query as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits into parenthesised groups and bare words
fn split_features(source: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = source.trim_start();
    while !rest.is_empty() {
        let end = if rest.starts_with('(') {
            rest.find(')').map_or(rest.len(), |close| close + 1)
        } else {
            rest.find(|c: char| c.is_whitespace() || c == '(').unwrap_or(rest.len())
        };
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    tokens
}

fn parse_feature(query: &str, token: &str) -> Result<WidthFeature, ShellError> {
    let inner = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| ShellError::media_query(query, format!("expected `(feature: value)`, found `{token}`")))?;

    let (name, value) = inner
        .split_once(':')
        .ok_or_else(|| ShellError::media_query(query, format!("missing `:` in `{token}`")))?;

    let value = value.trim();
    let px = value
        .strip_suffix("px")
        .ok_or_else(|| ShellError::media_query(query, format!("`{value}` is not a pixel length")))?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px >= 0.0)
        .ok_or_else(|| ShellError::media_query(query, format!("`{value}` is not a valid length")))?;

    match name.trim().to_ascii_lowercase().as_str() {
        "max-width" => Ok(WidthFeature::Max(px)),
        "min-width" => Ok(WidthFeature::Min(px)),
        other => Err(ShellError::media_query(query, format!("unsupported feature `{other}`"))),
    }
}

/// Source of media-query match changes
pub trait MediaQueryWatcher: Send + Sync {
    /// Calls `listener` with the current match result, then again every
    /// time the result changes, until the subscription is released.
    fn watch(&self, query: &MediaQuery, listener: Listener<bool>) -> Subscription;
}

/// In-memory viewport
///
/// Clones share the same width and watchers.
#[derive(Clone)]
pub struct Viewport {
    width: Arc<Mutex<f64>>,
    watchers: Listeners<f64>,
}

impl Viewport {
    /// Creates a viewport `width` pixels wide
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width: Arc::new(Mutex::new(width)),
            watchers: Listeners::new(),
        }
    }

    /// Current width in pixels
    #[must_use]
    pub fn width(&self) -> f64 {
        *self.width.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes the width, notifying watchers whose match result flipped
    pub fn resize(&self, width: f64) {
        *self.width.lock().unwrap_or_else(PoisonError::into_inner) = width;
        tracing::debug!(width, "Viewport resized");
        self.watchers.notify(&width);
    }

    /// Number of live watchers
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}

impl MediaQueryWatcher for Viewport {
    fn watch(&self, query: &MediaQuery, listener: Listener<bool>) -> Subscription {
        let initial = query.matches(self.width());
        listener(&initial);

        let query = query.clone();
        let matched = AtomicBool::new(initial);
        self.watchers.add(move |width: &f64| {
            let now = query.matches(*width);
            if matched.swap(now, Ordering::AcqRel) != now {
                tracing::trace!(%query, matches = now, "Media query crossed");
                listener(&now);
            }
        })
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("width", &self.width())
            .field("watchers", &self.watchers.len())
            .finish()
    }
}
