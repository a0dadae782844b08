//! Shell configuration.

use crate::error::ShellError;
use crate::media::MediaQuery;
use crate::reducer::AppEnvironment;
use crate::render::RenderOptions;
use crate::state::{Account, AccountState, AppState, DrawerState, Page, PageId};
use crate::theme::{ResponsiveVariable, Theme};
use std::env;
use todo_shell_runtime::StoreConfig;

/// Everything needed to build the store and mount the shell
///
/// # Example
///
/// ```
/// use todo_shell::{ShellConfig, Theme};
///
/// let config = ShellConfig::default()
///     .with_theme(Theme::Dark)
///     .with_responsive_width(900);
/// assert_eq!(config.breakpoint_query().as_str(), "(max-width: 900px)");
/// ```
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Prefix of every document title
    pub app_title: String,
    /// Width at or below which the drawer goes narrow
    pub responsive_width_px: u32,
    /// Colour scheme
    pub theme: Theme,
    /// `(media query, custom property, value)` overrides, parsed on validation
    pub responsive_variables: Vec<(String, String, String)>,
    /// Routable pages, in drawer order
    pub pages: Vec<Page>,
    /// Page the router starts on
    pub default_page: PageId,
    /// Page shown for unknown page ids
    pub not_found_page: PageId,
    /// Account shown in the drawer header
    pub active_account: Account,
    /// Accounts offered by the account selector
    pub accounts: Vec<Account>,
    /// Store tuning
    pub store: StoreConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_title: "Todo App".to_string(),
            responsive_width_px: 1150,
            theme: Theme::Light,
            responsive_variables: vec![(
                "(min-width: 377.8px)".to_string(),
                "--app-drawer-width".to_string(),
                "340px".to_string(),
            )],
            pages: default_pages(),
            default_page: PageId::new("today"),
            not_found_page: PageId::new("view404"),
            active_account: Account::new("George Johnson", "george.johnson@gmail.com", "/img/avatars/128_6.jpg"),
            accounts: vec![
                Account::new("Jack Benton", "jackyboii@gmail.com", "/img/avatars/128_10.jpg"),
                Account::new("Bli A", "youwotm9@gmail.com", "/img/avatars/128_8.jpg"),
                Account::new("Katie Jackson", "the.kate.1993@gmail.com", "/img/avatars/128_9.jpg"),
            ],
            store: StoreConfig::default(),
        }
    }
}

fn default_pages() -> Vec<Page> {
    vec![
        Page::new("today", "/", "Today"),
        Page::new("upcoming", "/upcoming", "Upcoming"),
        Page::new("projects", "/projects", "Projects"),
        Page::new("settings", "/settings", "Settings"),
        Page::new("login", "/login", "Sign in")
            .with_drawer(false)
            .with_header(false),
        Page::new("view404", "/404", "Page Not Found"),
    ]
}

impl ShellConfig {
    /// Defaults overridden by `TODO_SHELL_THEME` and
    /// `TODO_SHELL_RESPONSIVE_WIDTH`
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTheme`] or [`ShellError::InvalidConfig`]
    /// for unusable values.
    pub fn from_env() -> Result<Self, ShellError> {
        let mut config = Self::default();

        if let Ok(theme) = env::var("TODO_SHELL_THEME") {
            config.theme = theme.parse()?;
        }

        if let Ok(width) = env::var("TODO_SHELL_RESPONSIVE_WIDTH") {
            config.responsive_width_px = width
                .trim()
                .parse()
                .map_err(|_| ShellError::InvalidConfig(format!("TODO_SHELL_RESPONSIVE_WIDTH={width} is not a pixel count")))?;
        }

        config.validate()?;
        tracing::debug!(theme = %config.theme, width = config.responsive_width_px, "Loaded shell configuration");
        Ok(config)
    }

    /// Checks that the configured ids refer to configured pages and that
    /// every responsive override parses
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidConfig`] or
    /// [`ShellError::InvalidMediaQuery`] describing the first problem.
    pub fn validate(&self) -> Result<(), ShellError> {
        if self.responsive_width_px == 0 {
            return Err(ShellError::InvalidConfig("responsive width must be positive".to_string()));
        }

        for (index, page) in self.pages.iter().enumerate() {
            if self.pages[..index].iter().any(|p| p.id == page.id) {
                return Err(ShellError::InvalidConfig(format!("duplicate page id `{}`", page.id)));
            }
        }

        for (role, id) in [("default", &self.default_page), ("not-found", &self.not_found_page)] {
            if !self.pages.iter().any(|p| &p.id == id) {
                return Err(ShellError::InvalidConfig(format!("{role} page `{id}` is not configured")));
            }
        }

        self.render_options().map(|_| ())
    }

    /// Sets the title prefix
    #[must_use]
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = title.into();
        self
    }

    /// Sets the colour scheme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the responsive width
    #[must_use]
    pub const fn with_responsive_width(mut self, px: u32) -> Self {
        self.responsive_width_px = px;
        self
    }

    /// Adds a custom property override applied while `query` matches
    #[must_use]
    pub fn with_responsive_variable(
        mut self,
        query: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.responsive_variables.push((query.into(), name.into(), value.into()));
        self
    }

    /// Replaces the page list
    #[must_use]
    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        self
    }

    /// Replaces the accounts
    #[must_use]
    pub fn with_accounts(mut self, active: Account, available: Vec<Account>) -> Self {
        self.active_account = active;
        self.accounts = available;
        self
    }

    /// Sets the store tuning
    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Store state before the first navigation
    #[must_use]
    pub fn initial_state(&self) -> AppState {
        AppState {
            page: None,
            pages: self.pages.clone(),
            drawer: DrawerState::default(),
            accounts: AccountState {
                active: self.active_account.clone(),
                available: self.accounts.clone(),
                selector_opened: false,
            },
        }
    }

    /// Reducer environment
    #[must_use]
    pub fn environment(&self) -> AppEnvironment {
        AppEnvironment::new(self.not_found_page.clone())
    }

    /// Renderer options
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidMediaQuery`] for an override whose query
    /// does not parse.
    pub fn render_options(&self) -> Result<RenderOptions, ShellError> {
        let responsive = self
            .responsive_variables
            .iter()
            .map(|(query, name, value)| ResponsiveVariable::parse(query, name.as_str(), value.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RenderOptions {
            theme: self.theme,
            responsive_width_px: self.responsive_width_px,
            responsive,
        })
    }

    /// `(max-width: <responsive width>px)`
    #[must_use]
    pub fn breakpoint_query(&self) -> MediaQuery {
        MediaQuery::max_width(self.responsive_width_px)
    }

    /// Path of the default page
    #[must_use]
    pub fn default_path(&self) -> &str {
        self.pages
            .iter()
            .find(|p| p.id == self.default_page)
            .map_or("/", |p| p.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ShellConfig::default();
        config.validate().unwrap();

        let state = config.initial_state();
        assert!(state.page.is_none());
        assert_eq!(state.pages.len(), 6);
        assert_eq!(state.accounts.active.name, "George Johnson");
        assert_eq!(state.accounts.available.len(), 3);
        assert_eq!(config.environment().not_found.as_str(), "view404");
        assert_eq!(config.default_path(), "/");
        assert_eq!(config.breakpoint_query(), MediaQuery::parse("(max-width: 1150px)").unwrap());
    }

    #[test]
    fn validate_catches_bad_ids() {
        let config = ShellConfig::default().with_pages(vec![Page::new("today", "/", "Today")]);
        assert!(matches!(config.validate(), Err(ShellError::InvalidConfig(msg)) if msg.contains("view404")));

        let config = ShellConfig::default().with_pages(vec![
            Page::new("today", "/", "Today"),
            Page::new("today", "/again", "Again"),
        ]);
        assert!(matches!(config.validate(), Err(ShellError::InvalidConfig(msg)) if msg.contains("duplicate")));

        let config = ShellConfig::default().with_responsive_width(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn builders_feed_render_options() {
        let options = ShellConfig::default()
            .with_theme(Theme::Dark)
            .with_responsive_width(720)
            .render_options()
            .unwrap();

        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.responsive_width_px, 720);
        assert_eq!(options.variable_at("--app-drawer-width", 377.0), Some("290px"));
        assert_eq!(options.variable_at("--app-drawer-width", 377.8), Some("340px"));
    }

    #[test]
    fn validate_parses_responsive_overrides() {
        let config = ShellConfig::default().with_responsive_variable("(max-width: 600px) and", "--app-drawer-width", "100%");
        assert!(matches!(
            config.validate(),
            Err(ShellError::InvalidMediaQuery { query, .. }) if query == "(max-width: 600px) and"
        ));

        let options = ShellConfig::default()
            .with_responsive_variable("(min-width: 600px) and (max-width: 800px)", "--app-drawer-width", "300px")
            .render_options()
            .unwrap();
        assert_eq!(options.variable_at("--app-drawer-width", 700.0), Some("300px"));
        assert_eq!(options.variable_at("--app-drawer-width", 900.0), Some("340px"));
    }
}
