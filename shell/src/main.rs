//! Demo binary: mounts the shell against an in-memory router and viewport,
//! replays a short session, and prints the final markup and snapshot.
//!
//! Environment:
//! - `TODO_SHELL_THEME`: `light` (default) or `dark`
//! - `TODO_SHELL_RESPONSIVE_WIDTH`: breakpoint in pixels (default 1150)
//! - `TODO_SHELL_VIEWPORT`: initial viewport width in pixels (default 1280)

use anyhow::Context;
use std::sync::Arc;
use todo_shell::{
    AppReducer, AppShell, AppStore, Document, HistoryRouter, ShellConfig, ShellHost, Viewport,
};
use todo_shell_runtime::{dispatcher, metrics::register_metrics, ActionQueue};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_shell=debug,todo_shell_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    register_metrics();

    let config = ShellConfig::from_env().context("loading shell configuration")?;
    let width = match std::env::var("TODO_SHELL_VIEWPORT") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("TODO_SHELL_VIEWPORT={raw} is not a width"))?,
        Err(_) => 1280.0,
    };
    let options = config.render_options().context("resolving render options")?;
    tracing::info!(
        width,
        drawer_width = options.variable_at("--app-drawer-width", width).unwrap_or("-"),
        "Viewport"
    );

    let store = AppStore::with_config(
        config.initial_state(),
        AppReducer::new(),
        config.environment(),
        config.store.clone(),
    );
    let (actions, mut queue) = dispatcher::channel();

    let router = HistoryRouter::from_pages(&config.pages, config.not_found_page.clone(), config.default_path());
    let viewport = Viewport::new(width);
    let document = Document::new();

    let shell = AppShell::mount(
        &store,
        actions,
        ShellHost {
            router: Arc::new(router.clone()),
            media: Arc::new(viewport.clone()),
            metadata: Arc::new(document.clone()),
        },
        &config,
    )
    .await
    .context("mounting shell")?;
    step(&mut queue, &store, &document, "mounted").await?;

    shell.menu_button_clicked();
    step(&mut queue, &store, &document, "menu button").await?;

    router.go("/upcoming");
    step(&mut queue, &store, &document, "route /upcoming").await?;

    viewport.resize(800.0);
    step(&mut queue, &store, &document, "viewport 800px").await?;

    shell.drawer_opened_changed(true);
    step(&mut queue, &store, &document, "drawer opened").await?;

    router.go("/settings");
    step(&mut queue, &store, &document, "route /settings").await?;

    shell.drawer_header_clicked();
    step(&mut queue, &store, &document, "drawer header").await?;

    shell.account_selected("the.kate.1993@gmail.com");
    step(&mut queue, &store, &document, "account selected").await?;

    router.go("/does-not-exist");
    step(&mut queue, &store, &document, "route /does-not-exist").await?;

    router.go("/login");
    step(&mut queue, &store, &document, "route /login").await?;

    println!("{}", shell.to_html());
    println!(
        "{}",
        serde_json::to_string_pretty(&*store.snapshot().await).context("serializing snapshot")?
    );

    tracing::info!(renders = shell.render_count(), "Session finished");
    shell.unmount();
    store.shutdown();
    Ok(())
}

/// Forwards queued actions and logs where the session stands
async fn step(
    queue: &mut ActionQueue<todo_shell::AppAction>,
    store: &AppStore,
    document: &Document,
    label: &str,
) -> anyhow::Result<()> {
    let sent = queue.flush(store).await?;
    let (page, opened, narrow) = store
        .state(|s| {
            (
                s.page.as_ref().map(|p| p.id.to_string()),
                s.drawer.opened,
                s.drawer.narrow,
            )
        })
        .await;

    tracing::info!(
        step = label,
        actions = sent,
        page = page.as_deref().unwrap_or("-"),
        drawer_opened = opened,
        narrow,
        title = %document.title(),
        "Step complete"
    );
    Ok(())
}
