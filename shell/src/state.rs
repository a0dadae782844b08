//! Application state and actions.
//!
//! `AppState` is the snapshot the global store publishes. The shell never
//! mutates it; it only reads projections of it and sends [`AppAction`]s back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a routable page (e.g. `"today"`, `"view404"`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates a page identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Descriptor of a page the shell can display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier
    pub id: PageId,
    /// Route path (e.g. `/upcoming`)
    pub path: String,
    /// Title shown in the header and the document title
    pub title: String,
    /// Whether the page shows the side drawer
    pub drawer: bool,
    /// Whether the page shows the header
    pub header: bool,
}

impl Page {
    /// Creates a page that shows both drawer and header
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: PageId::new(id),
            path: path.into(),
            title: title.into(),
            drawer: true,
            header: true,
        }
    }

    /// Sets drawer visibility
    #[must_use]
    pub const fn with_drawer(mut self, drawer: bool) -> Self {
        self.drawer = drawer;
        self
    }

    /// Sets header visibility
    #[must_use]
    pub const fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// A signed-in account
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Display name
    pub name: String,
    /// Email address, unique per account
    pub email: String,
    /// Avatar image path
    pub avatar: String,
}

impl Account {
    /// Creates an account
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }
}

/// Drawer layout flags
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerState {
    /// Whether the drawer is open
    pub opened: bool,
    /// Whether the viewport is at or below the responsive width
    pub narrow: bool,
}

/// Accounts available in the drawer header and selector
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Account shown in the drawer header
    pub active: Account,
    /// Accounts listed by the account selector
    pub available: Vec<Account>,
    /// Whether the account selector replaces the page list
    pub selector_opened: bool,
}

impl AccountState {
    /// Finds an available account by email
    #[must_use]
    pub fn find(&self, email: &str) -> Option<&Account> {
        self.available.iter().find(|account| account.email == email)
    }
}

/// Global application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Page currently displayed; `None` until the first navigation
    pub page: Option<Page>,
    /// Every routable page, in drawer order
    pub pages: Vec<Page>,
    /// Drawer flags
    pub drawer: DrawerState,
    /// Account data
    pub accounts: AccountState,
}

impl AppState {
    /// Finds a page descriptor by id
    #[must_use]
    pub fn page_by_id(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| &page.id == id)
    }
}

/// Every action the shell can send to the store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppAction {
    /// Show the page with this id
    Navigate {
        /// Page to show
        page: PageId,
    },

    /// Flip the drawer open/closed
    ToggleDrawer,

    /// The drawer finished opening or closing
    UpdateDrawerState {
        /// New drawer state
        opened: bool,
    },

    /// Swap the page list for the account list (or back)
    ToggleAccountSelector,

    /// The viewport crossed the responsive width
    UpdateDrawerLayout {
        /// Whether the viewport is now narrow
        narrow: bool,
    },

    /// Make another account active
    SelectAccount {
        /// Email of the account to activate
        email: String,
    },
}

impl AppAction {
    /// Short kebab-case name, used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::ToggleDrawer => "toggle-drawer",
            Self::UpdateDrawerState { .. } => "update-drawer-state",
            Self::ToggleAccountSelector => "toggle-account-selector",
            Self::UpdateDrawerLayout { .. } => "update-drawer-layout",
            Self::SelectAccount { .. } => "select-account",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_builder_defaults_to_full_chrome() {
        let page = Page::new("login", "/login", "Sign in").with_drawer(false);
        assert!(!page.drawer);
        assert!(page.header);
        assert_eq!(page.id.as_str(), "login");
    }

    #[test]
    fn page_lookup() {
        let state = AppState {
            pages: vec![Page::new("today", "/", "Today"), Page::new("settings", "/settings", "Settings")],
            ..AppState::default()
        };

        assert_eq!(state.page_by_id(&"settings".into()).map(|p| p.title.as_str()), Some("Settings"));
        assert!(state.page_by_id(&"missing".into()).is_none());
    }

    #[test]
    fn actions_serialize_with_type_tag() {
        let json = serde_json::to_string(&AppAction::UpdateDrawerState { opened: true }).unwrap();
        assert_eq!(json, r#"{"type":"UPDATE_DRAWER_STATE","opened":true}"#);

        let action: AppAction = serde_json::from_str(r#"{"type":"NAVIGATE","page":"today"}"#).unwrap();
        assert_eq!(action, AppAction::Navigate { page: "today".into() });
        assert_eq!(action.kind(), "navigate");
    }
}
