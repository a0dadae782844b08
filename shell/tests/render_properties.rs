//! Property tests for the renderer.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use todo_shell::render::{apply, diff, render, RenderOptions};
use todo_shell::{Account, AccountState, AppState, DrawerState, Page, ShellConfig, Theme, ViewState};

fn arb_page() -> impl Strategy<Value = Page> {
    ("[a-z]{1,8}", "[A-Za-z &<>\"]{0,16}", any::<bool>(), any::<bool>()).prop_map(|(id, title, drawer, header)| {
        Page::new(id.clone(), format!("/{id}"), title)
            .with_drawer(drawer)
            .with_header(header)
    })
}

fn arb_account() -> impl Strategy<Value = Account> {
    ("[A-Za-z ]{1,12}", "[a-z]{1,8}", 1u32..20)
        .prop_map(|(name, user, n)| Account::new(name, format!("{user}@example.com"), format!("/img/avatars/128_{n}.jpg")))
}

prop_compose! {
    fn arb_state()(
        page in proptest::option::of(arb_page()),
        pages in proptest::collection::vec(arb_page(), 0..6),
        opened in any::<bool>(),
        narrow in any::<bool>(),
        active in arb_account(),
        available in proptest::collection::vec(arb_account(), 0..4),
        selector_opened in any::<bool>(),
    ) -> AppState {
        AppState {
            page,
            pages,
            drawer: DrawerState { opened, narrow },
            accounts: AccountState { active, available, selector_opened },
        }
    }
}

fn arb_options() -> impl Strategy<Value = RenderOptions> {
    (prop_oneof![Just(Theme::Light), Just(Theme::Dark)], 320u32..2000).prop_map(|(theme, responsive_width_px)| {
        RenderOptions {
            theme,
            responsive_width_px,
            ..ShellConfig::default().render_options().unwrap()
        }
    })
}

proptest! {
    #[test]
    fn drawer_visibility_follows_page(state in arb_state(), options in arb_options()) {
        let tree = render(&ViewState::project(&state), &options);
        let shows_drawer = state.page.as_ref().is_some_and(|p| p.drawer);

        let drawer = tree.find_by_tag("app-drawer").unwrap();
        let layout = tree.find_by_tag("app-drawer-layout").unwrap();
        prop_assert_eq!(drawer.is_hidden(), !shows_drawer);
        prop_assert_eq!(layout.has_attribute("force-narrow"), !shows_drawer);
        prop_assert_eq!(drawer.has_attribute("opened"), state.drawer.opened);
    }

    #[test]
    fn menu_button_follows_layout(state in arb_state(), options in arb_options()) {
        let tree = render(&ViewState::project(&state), &options);
        prop_assert_eq!(tree.find_by_id("menu-btn").unwrap().is_hidden(), !state.drawer.narrow);
    }

    #[test]
    fn header_visibility_follows_page(state in arb_state(), options in arb_options()) {
        let tree = render(&ViewState::project(&state), &options);
        let shows_header = state.page.as_ref().is_some_and(|p| p.header);

        prop_assert_eq!(tree.find_by_tag("app-header").unwrap().is_hidden(), !shows_header);
        let title = state.page.as_ref().map_or("", |p| p.title.as_str());
        prop_assert_eq!(tree.find_by_tag("h1").unwrap().text_content(), title);
    }

    #[test]
    fn exactly_one_drawer_list_visible(state in arb_state(), options in arb_options()) {
        let tree = render(&ViewState::project(&state), &options);

        let pages = tree.find_by_tag("drawer-page-list").unwrap();
        let accounts = tree.find_by_tag("drawer-account-list").unwrap();
        prop_assert_ne!(pages.is_hidden(), accounts.is_hidden());
        prop_assert_eq!(accounts.is_hidden(), !state.accounts.selector_opened);
        prop_assert_eq!(pages.children.len(), state.pages.len());
        prop_assert_eq!(accounts.children.len(), state.accounts.available.len());
    }

    #[test]
    fn patches_turn_old_tree_into_new(
        before in arb_state(),
        after in arb_state(),
        options in arb_options(),
    ) {
        let old = render(&ViewState::project(&before), &options);
        let new = render(&ViewState::project(&after), &options);

        let mut patched = old.clone();
        apply(&mut patched, &diff(&old, &new)).unwrap();
        prop_assert_eq!(patched.to_html(), new.to_html());
        prop_assert_eq!(patched, new);
    }

    #[test]
    fn rendering_is_deterministic(state in arb_state(), options in arb_options()) {
        let view = ViewState::project(&state);
        let first = render(&view, &options);
        prop_assert!(diff(&first, &render(&view, &options)).is_empty());
    }
}
