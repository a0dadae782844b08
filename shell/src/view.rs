//! View state: the shell's projection of an [`AppState`] snapshot.

use crate::state::{Account, AppState, Page, PageId};

/// Fields of the current page the shell renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentPage {
    /// Page identifier
    pub id: PageId,
    /// Header and document title
    pub title: String,
    /// Drawer visibility
    pub drawer: bool,
    /// Header visibility
    pub header: bool,
}

impl From<&Page> for CurrentPage {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            drawer: page.drawer,
            header: page.header,
        }
    }
}

/// Everything the renderer reads
///
/// Always rebuilt wholesale from a snapshot, never patched field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Page being shown, `None` before the first navigation
    pub current_page: Option<CurrentPage>,
    /// Pages listed in the drawer
    pub pages: Vec<Page>,
    /// Whether the drawer is open
    pub drawer_opened: bool,
    /// Whether the viewport is at or below the responsive width
    pub narrow: bool,
    /// Whether the account list replaces the page list
    pub account_selector_opened: bool,
    /// Account shown in the drawer header
    pub active_account: Account,
    /// Accounts listed by the account selector
    pub accounts: Vec<Account>,
}

impl ViewState {
    /// Projects a store snapshot
    #[must_use]
    pub fn project(state: &AppState) -> Self {
        Self {
            current_page: state.page.as_ref().map(CurrentPage::from),
            pages: state.pages.clone(),
            drawer_opened: state.drawer.opened,
            narrow: state.drawer.narrow,
            account_selector_opened: state.accounts.selector_opened,
            active_account: state.accounts.active.clone(),
            accounts: state.accounts.available.clone(),
        }
    }

    /// Whether the drawer is shown; false without a page
    #[must_use]
    pub fn shows_drawer(&self) -> bool {
        self.current_page.as_ref().is_some_and(|p| p.drawer)
    }

    /// Whether the header is shown; false without a page
    #[must_use]
    pub fn shows_header(&self) -> bool {
        self.current_page.as_ref().is_some_and(|p| p.header)
    }

    /// Whether the menu button is shown; only narrow layouts have one
    #[must_use]
    pub const fn shows_menu_button(&self) -> bool {
        self.narrow
    }

    /// Title of the current page, empty without a page
    #[must_use]
    pub fn title(&self) -> &str {
        self.current_page.as_ref().map_or("", |p| p.title.as_str())
    }

    /// Id of the current page
    #[must_use]
    pub fn page_id(&self) -> Option<&PageId> {
        self.current_page.as_ref().map(|p| &p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AccountState, DrawerState};

    #[test]
    fn missing_page_projects_to_bare_view() {
        let view = ViewState::project(&AppState::default());

        assert!(view.current_page.is_none());
        assert!(!view.shows_drawer());
        assert!(!view.shows_header());
        assert_eq!(view.title(), "");
        assert!(view.page_id().is_none());
        assert!(!view.shows_menu_button());
    }

    #[test]
    fn projects_every_field() {
        let today = Page::new("today", "/", "Today");
        let state = AppState {
            page: Some(today.clone()),
            pages: vec![today],
            drawer: DrawerState {
                opened: true,
                narrow: true,
            },
            accounts: AccountState {
                active: Account::new("A", "a@example.com", "/a.jpg"),
                available: vec![Account::new("B", "b@example.com", "/b.jpg")],
                selector_opened: true,
            },
        };

        let view = ViewState::project(&state);

        assert_eq!(view.title(), "Today");
        assert!(view.shows_drawer());
        assert!(view.drawer_opened);
        assert!(view.shows_menu_button());
        assert!(view.account_selector_opened);
        assert_eq!(view.active_account.email, "a@example.com");
        assert_eq!(view.accounts.len(), 1);
        assert_eq!(view.pages.len(), 1);
    }
}
