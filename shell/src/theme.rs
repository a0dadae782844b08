//! Light and dark theme variable sets, and width-dependent overrides.

use crate::error::ShellError;
use crate::media::MediaQuery;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LIGHT: &[(&str, &str)] = &[
    ("--app-primary-color", "#039be5"),
    ("--secondary-color", "#4caf50"),
    ("--app-light-background", "#424242"),
    ("--app-medium-background", "#303030"),
    ("--app-dark-background", "#212121"),
    ("--app-light-text-color", "white"),
    ("--app-dark-text-color", "black"),
    ("--app-header-background-color", "var(--app-primary-color)"),
    ("--app-header-text-color", "var(--app-light-text-color)"),
    ("--app-drawer-header-background", "url('/img/background-light.svg')"),
    ("--app-drawer-background-color", "white"),
    ("--app-drawer-text-color", "var(--app-dark-text-color)"),
    ("--drawer-divider-color", "#e0e0e0"),
    ("--app-drawer-width", "290px"),
    ("--page-list-selected-color", "var(--app-primary-color)"),
    ("--page-list-color", "var(--app-dark-text-color)"),
    ("--page-list-icon-color", "#757575"),
    ("--account-list-icon-color", "#757575"),
    ("--notification-dropdown-primary-color", "var(--app-primary-color)"),
];

const DARK: &[(&str, &str)] = &[
    ("--app-primary-color", "#7e57c2"),
    ("--app-header-background-color", "var(--app-dark-background)"),
    ("--app-header-text-color", "var(--app-light-text-color)"),
    ("--app-drawer-text-color", "var(--app-light-text-color)"),
    ("--app-drawer-header-background", "url('/img/background-dark.svg')"),
    ("--app-drawer-background-color", "var(--app-dark-background)"),
    ("--drawer-divider-color", "var(--app-medium-background)"),
    ("--page-list-selected-color", "var(--app-primary-color)"),
    ("--page-list-color", "var(--app-light-text-color)"),
    ("--page-list-icon-color", "var(--app-light-text-color)"),
    ("--notification-dropdown-content-color", "var(--app-light-text-color)"),
    ("--notification-dropdown-content-secondary-color", "var(--app-light-text-color)"),
    ("--notification-dropdown-content-background", "var(--app-light-background)"),
];

/// Colour scheme of the shell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default scheme
    #[default]
    Light,
    /// Dark scheme, selected by `theme="dark"` on the host
    Dark,
}

impl Theme {
    /// Value for the host `theme` attribute, if any
    #[must_use]
    pub const fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark"),
        }
    }

    /// Host background
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Light => "#f8f9fa",
            Self::Dark => "var(--app-medium-background)",
        }
    }

    /// Resolved custom properties, light values overridden by the theme
    #[must_use]
    pub fn variables(self) -> Vec<(&'static str, &'static str)> {
        let mut vars = LIGHT.to_vec();
        if self == Self::Dark {
            for &(name, value) in DARK {
                match vars.iter_mut().find(|(n, _)| *n == name) {
                    Some(slot) => slot.1 = value,
                    None => vars.push((name, value)),
                }
            }
        }
        vars
    }

    /// Looks up one resolved variable
    #[must_use]
    pub fn variable(self, name: &str) -> Option<&'static str> {
        self.variables()
            .into_iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Inline `style` for the host element
    #[must_use]
    pub fn style(self) -> String {
        let mut style = format!("background: {};", self.background());
        for (name, value) in self.variables() {
            style.push_str(&format!(" {name}: {value};"));
        }
        style
    }
}

/// A custom property that takes another value while a media query matches
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsiveVariable {
    /// Condition on the viewport width
    pub query: MediaQuery,
    /// Custom property name
    pub name: String,
    /// Value while `query` matches
    pub value: String,
}

impl ResponsiveVariable {
    /// Parses the query of a `(query, name, value)` override
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidMediaQuery`] if `query` does not parse.
    pub fn parse(query: &str, name: impl Into<String>, value: impl Into<String>) -> Result<Self, ShellError> {
        Ok(Self {
            query: MediaQuery::parse(query)?,
            name: name.into(),
            value: value.into(),
        })
    }

    /// The override as a host-scoped `@media` rule
    #[must_use]
    pub fn css(&self, host: &str) -> String {
        format!("@media {} {{ {host} {{ {}: {}; }} }}", self.query, self.name, self.value)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ShellError::UnknownTheme(other.to_string())),
        }
    }
}
