//! Pure rendering from [`ViewState`] to a [`Node`] tree.
//!
//! The tree mirrors the shell's markup: a drawer layout holding the drawer
//! (account header, page list, account list) and a header layout holding
//! the toolbar and the page container. Sections that are not shown stay in
//! the tree with `hidden` so toggling them never removes nodes.

pub mod diff;
pub mod icons;
pub mod node;

pub use diff::{apply, diff, Patch, PatchError};
pub use icons::Icon;
pub use node::{Element, Node};

use crate::state::{Account, Page};
use crate::theme::{ResponsiveVariable, Theme};
use crate::view::ViewState;

/// Host element tag
pub const HOST_TAG: &str = "todo-app";

/// Rendering inputs that do not come from the store
///
/// The default has no responsive overrides; [`crate::ShellConfig`] supplies
/// the shell's own.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Colour scheme
    pub theme: Theme,
    /// Width at or below which the drawer layout goes narrow
    pub responsive_width_px: u32,
    /// Theme variables overridden by viewport width, later entries winning
    pub responsive: Vec<ResponsiveVariable>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            responsive_width_px: 1150,
            responsive: Vec::new(),
        }
    }
}

impl RenderOptions {
    /// Resolved value of custom property `name` at viewport `width`
    #[must_use]
    pub fn variable_at(&self, name: &str, width: f64) -> Option<&str> {
        self.responsive
            .iter()
            .rev()
            .find(|rule| rule.name == name && rule.query.matches(width))
            .map(|rule| rule.value.as_str())
            .or_else(|| self.theme.variable(name))
    }

    fn stylesheet(&self) -> Option<String> {
        if self.responsive.is_empty() {
            return None;
        }
        let rules: Vec<String> = self.responsive.iter().map(|rule| rule.css(HOST_TAG)).collect();
        Some(rules.join("\n"))
    }
}

/// Renders the whole shell
#[must_use]
pub fn render(view: &ViewState, options: &RenderOptions) -> Node {
    let mut host = Element::new(HOST_TAG);
    if let Some(theme) = options.theme.attribute() {
        host = host.attr("theme", theme);
    }

    host = host.attr("style", options.theme.style());
    if let Some(stylesheet) = options.stylesheet() {
        host = host.child(Element::new("style").text(stylesheet));
    }

    host.child(
        Element::new("app-drawer-layout")
            .attr("responsive-width", format!("{}px", options.responsive_width_px))
            .flag("force-narrow", !view.shows_drawer())
            .child(drawer(view))
            .child(header_layout(view)),
    )
    .into()
}

fn drawer(view: &ViewState) -> Element {
    Element::new("app-drawer")
        .attr("slot", "drawer")
        .flag("hidden", !view.shows_drawer())
        .flag("opened", view.drawer_opened)
        .child(
            Element::new("div")
                .id("drawer-content")
                .child(drawer_header(view))
                .child(page_list(view))
                .child(account_list(view)),
        )
}

fn drawer_header(view: &ViewState) -> Element {
    let account = &view.active_account;
    let indicator = if view.account_selector_opened {
        Icon::DropUp
    } else {
        Icon::DropDown
    };

    Element::new("div")
        .id("drawer-header")
        .child(
            Element::new("div")
                .id("profile-picture-container")
                .child(avatar(account, "avatar avatar-big")),
        )
        .child(Element::new("h2").text(&account.name))
        .child(Element::new("p").text(&account.email))
        .child(
            Element::new("div")
                .id("account-selection-indicator")
                .child(indicator.svg()),
        )
}

fn page_list(view: &ViewState) -> Element {
    let selected = view.page_id();
    Element::new("drawer-page-list")
        .attr("page", selected.map(ToString::to_string).unwrap_or_default())
        .flag("hidden", view.account_selector_opened)
        .children(
            view.pages
                .iter()
                .map(|page| page_item(page, selected == Some(&page.id))),
        )
}

fn page_item(page: &Page, selected: bool) -> Element {
    Element::new("a")
        .attr("class", "page-item")
        .attr("href", &page.path)
        .attr("data-page", page.id.as_str())
        .flag("selected", selected)
        .text(&page.title)
}

fn account_list(view: &ViewState) -> Element {
    Element::new("drawer-account-list")
        .flag("hidden", !view.account_selector_opened)
        .children(view.accounts.iter().map(account_item))
}

fn account_item(account: &Account) -> Element {
    Element::new("div")
        .attr("class", "account-item")
        .attr("data-email", &account.email)
        .child(avatar(account, "avatar"))
        .child(Element::new("span").attr("class", "account-name").text(&account.name))
        .child(Element::new("span").attr("class", "account-email").text(&account.email))
}

fn avatar(account: &Account, class: &str) -> Element {
    Element::new("div")
        .attr("class", class)
        .attr("style", format!("background-image: url('{}')", account.avatar))
}

fn header_layout(view: &ViewState) -> Element {
    let toolbar = Element::new("app-toolbar")
        .child(
            Element::new("div")
                .id("left-header-container")
                .child(
                    Element::new("paper-button")
                        .id("menu-btn")
                        .attr("class", "icon-btn")
                        .flag("hidden", !view.shows_menu_button())
                        .child(Icon::Menu.svg()),
                )
                .child(Element::new("h1").flag("main-title", true).text(view.title())),
        )
        .child(
            Element::new("div")
                .id("right-header-container")
                .child(Element::new("notifications-button")),
        );

    Element::new("app-header-layout")
        .child(
            Element::new("app-header")
                .flag("condenses", true)
                .flag("reveals", true)
                .attr("effects", "waterfall")
                .attr("slot", "header")
                .flag("hidden", !view.shows_header())
                .child(toolbar),
        )
        .child(Element::new("view-container").attr("page", view.page_id().map(ToString::to_string).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AccountState, AppState, DrawerState};

    fn view(page: Option<Page>, selector_opened: bool) -> ViewState {
        narrow_view(page, selector_opened, false)
    }

    fn narrow_view(page: Option<Page>, selector_opened: bool, narrow: bool) -> ViewState {
        ViewState::project(&AppState {
            page,
            pages: vec![Page::new("today", "/", "Today"), Page::new("upcoming", "/upcoming", "Upcoming")],
            drawer: DrawerState { opened: true, narrow },
            accounts: AccountState {
                active: Account::new("George Johnson", "george@example.com", "/img/avatars/128_6.jpg"),
                available: vec![Account::new("Jack Benton", "jack@example.com", "/img/avatars/128_10.jpg")],
                selector_opened,
            },
        })
    }

    fn element<'a>(tree: &'a Node, tag: &str) -> &'a Element {
        tree.find_by_tag(tag).unwrap()
    }

    #[test]
    fn full_page_shows_drawer_and_header() {
        let tree = render(&view(Some(Page::new("today", "/", "Today")), false), &RenderOptions::default());

        let layout = element(&tree, "app-drawer-layout");
        assert_eq!(layout.attribute("responsive-width"), Some("1150px"));
        assert!(!layout.has_attribute("force-narrow"));

        let drawer = element(&tree, "app-drawer");
        assert!(!drawer.is_hidden());
        assert!(drawer.has_attribute("opened"));
        assert!(!element(&tree, "app-header").is_hidden());
        assert_eq!(element(&tree, "h1").text_content(), "Today");
        assert_eq!(element(&tree, "view-container").attribute("page"), Some("today"));
    }

    #[test]
    fn chromeless_page_hides_drawer_and_header() {
        let login = Page::new("login", "/login", "Sign in")
            .with_drawer(false)
            .with_header(false);
        let tree = render(&view(Some(login), false), &RenderOptions::default());

        assert!(element(&tree, "app-drawer").is_hidden());
        assert!(element(&tree, "app-header").is_hidden());
        assert!(element(&tree, "app-drawer-layout").has_attribute("force-narrow"));
    }

    #[test]
    fn missing_page_renders_bare_shell() {
        let tree = render(&view(None, false), &RenderOptions::default());

        assert!(element(&tree, "app-drawer").is_hidden());
        assert!(element(&tree, "app-header").is_hidden());
        assert_eq!(element(&tree, "h1").text_content(), "");
        assert_eq!(element(&tree, "drawer-page-list").attribute("page"), Some(""));
    }

    #[test]
    fn selector_swaps_lists_and_indicator() {
        let closed = render(&view(None, false), &RenderOptions::default());
        assert!(!element(&closed, "drawer-page-list").is_hidden());
        assert!(element(&closed, "drawer-account-list").is_hidden());
        assert_eq!(
            closed.find_by_id("account-selection-indicator").unwrap().children[0]
                .as_element()
                .and_then(|svg| svg.attribute("icon")),
            Some("drop-down")
        );

        let open = render(&view(None, true), &RenderOptions::default());
        assert!(element(&open, "drawer-page-list").is_hidden());
        assert!(!element(&open, "drawer-account-list").is_hidden());
        assert_eq!(
            open.find_by_id("account-selection-indicator").unwrap().children[0]
                .as_element()
                .and_then(|svg| svg.attribute("icon")),
            Some("drop-up")
        );
    }

    #[test]
    fn page_list_marks_selected_page() {
        let tree = render(&view(Some(Page::new("upcoming", "/upcoming", "Upcoming")), false), &RenderOptions::default());

        let selected: Vec<_> = tree
            .find_all_by_tag("a")
            .into_iter()
            .filter(|item| item.has_attribute("selected"))
            .map(Element::text_content)
            .collect();
        assert_eq!(selected, ["Upcoming"]);
    }

    #[test]
    fn drawer_header_shows_active_account() {
        let tree = render(&view(None, false), &RenderOptions::default());
        let header = tree.find_by_id("drawer-header").unwrap();

        assert!(header.text_content().contains("George Johnson"));
        assert!(header.text_content().contains("george@example.com"));
        let html = tree.to_html();
        assert!(html.contains("background-image: url('/img/avatars/128_6.jpg')"));
        assert!(html.contains(r#"data-email="jack@example.com""#));
    }

    #[test]
    fn dark_theme_sets_host_attribute() {
        let light = render(&view(None, false), &RenderOptions::default());
        assert!(!light.as_element().unwrap().has_attribute("theme"));

        let options = RenderOptions {
            theme: Theme::Dark,
            responsive_width_px: 900,
            ..RenderOptions::default()
        };
        let dark = render(&view(None, false), &options);
        let host = dark.as_element().unwrap();
        assert_eq!(host.tag, HOST_TAG);
        assert_eq!(host.attribute("theme"), Some("dark"));
        assert!(host.attribute("style").unwrap().contains("#7e57c2"));
        assert_eq!(element(&dark, "app-drawer-layout").attribute("responsive-width"), Some("900px"));
    }

    #[test]
    fn menu_button_only_on_narrow_layout() {
        let today = Some(Page::new("today", "/", "Today"));

        let wide = render(&narrow_view(today.clone(), false, false), &RenderOptions::default());
        assert!(wide.find_by_id("menu-btn").unwrap().is_hidden());

        let narrow = render(&narrow_view(today, false, true), &RenderOptions::default());
        assert!(!narrow.find_by_id("menu-btn").unwrap().is_hidden());
    }

    #[test]
    fn responsive_variables_render_as_host_stylesheet() {
        let options = RenderOptions {
            responsive: vec![
                ResponsiveVariable::parse("(min-width: 377.8px)", "--app-drawer-width", "340px").unwrap(),
            ],
            ..RenderOptions::default()
        };

        let tree = render(&view(None, false), &options);
        assert_eq!(
            element(&tree, "style").text_content(),
            "@media (min-width: 377.8px) { todo-app { --app-drawer-width: 340px; } }"
        );
        assert!(render(&view(None, false), &RenderOptions::default()).find_by_tag("style").is_none());

        assert_eq!(options.variable_at("--app-drawer-width", 320.0), Some("290px"));
        assert_eq!(options.variable_at("--app-drawer-width", 1280.0), Some("340px"));
        assert_eq!(options.variable_at("--app-primary-color", 1280.0), Some("#039be5"));
    }
}
