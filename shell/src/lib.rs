//! # Todo Shell
//!
//! The application shell of the todo app: a responsive drawer/header layout
//! driven entirely by the global store.
//!
//! - **State**: [`AppState`] snapshots and the [`AppAction`]s that change them
//! - **Reducer**: [`AppReducer`], the only writer of [`AppState`]
//! - **View**: [`ViewState`], rebuilt from every snapshot
//! - **Render**: [`render::render`], a pure function from view state to a
//!   [`render::Node`] tree
//! - **Shell**: [`AppShell`], which subscribes, renders, and maps user and
//!   host events to actions
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use todo_shell::{
//!     AppReducer, AppShell, AppStore, Document, HistoryRouter, ShellConfig, ShellHost, Viewport,
//! };
//!
//! # tokio_test::block_on(async {
//! let config = ShellConfig::default();
//! let store = AppStore::new(config.initial_state(), AppReducer::new(), config.environment());
//! let (dispatcher, mut queue) = todo_shell_runtime::dispatcher::channel();
//! let document = Document::new();
//!
//! let host = ShellHost {
//!     router: Arc::new(HistoryRouter::from_pages(&config.pages, config.not_found_page.clone(), "/upcoming")),
//!     media: Arc::new(Viewport::new(1280.0)),
//!     metadata: Arc::new(document.clone()),
//! };
//! let shell = AppShell::mount(&store, dispatcher, host, &config).await.unwrap();
//! queue.flush(&store).await.unwrap();
//!
//! assert_eq!(document.title(), "Todo App - Upcoming");
//! assert_eq!(shell.view().title(), "Upcoming");
//! # });
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod media;
pub mod reducer;
pub mod render;
pub mod router;
pub mod shell;
pub mod state;
pub mod theme;
pub mod view;

pub use config::ShellConfig;
pub use document::{Document, Metadata, MetadataSink};
pub use error::ShellError;
pub use media::{MediaQuery, MediaQueryWatcher, Viewport};
pub use reducer::{AppEnvironment, AppReducer, AppStore};
pub use router::{HistoryRouter, Router};
pub use shell::{AppShell, ShellHost};
pub use state::{Account, AccountState, AppAction, AppState, DrawerState, Page, PageId};
pub use theme::Theme;
pub use view::ViewState;
