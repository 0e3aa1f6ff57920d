//! Interactive CLI for the todo demo.
//!
//! Runs the application store over a line-based prompt: todo mutations,
//! a transient search filter, and the lifecycle demo toggle. State is
//! persisted under the data directory and mirrored into the terminal
//! title after every change.

use anyhow::Result;
use reflow_core::environment::SequenceIds;
use reflow_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use todo_demo::env::{FsKeyValueStore, TerminalTitle};
use todo_demo::{
    AppAction, AppEnvironment, AppReducer, AppState, LifecycleAction, LifecycleEnvironment,
    TimerStatus, TodoAction, TodoEnvironment, TodoId, view,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo_demo=info")),
        )
        .init();

    let data_dir = std::env::var("TODO_DEMO_DATA").unwrap_or_else(|_| ".todo-demo".to_string());
    let environment = AppEnvironment::new(
        TodoEnvironment::new(
            Arc::new(FsKeyValueStore::new(&data_dir)),
            Arc::new(TerminalTitle),
            Arc::new(SequenceIds::new()),
        ),
        LifecycleEnvironment::default(),
    );

    let store = Store::new(AppState::default(), AppReducer::new(), environment);
    tracing::info!(data_dir = %data_dir, "session started");

    // Seed from the persisted snapshot before taking input. Waiting
    // covers the read and the state seeding; the title mirror catches
    // up asynchronously.
    let mut handle = store.send(AppAction::Todo(TodoAction::Load)).await?;
    handle.wait().await;

    println!("Todo List");
    print_help();

    let mut search = String::new();
    render(&store, &search).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "add" => dispatch(&store, AppAction::Todo(TodoAction::Add { text: rest.to_string() })).await?,
            "toggle" => match parse_id(rest) {
                Some(id) => dispatch(&store, AppAction::Todo(TodoAction::Toggle { id })).await?,
                None => println!("usage: toggle <id>"),
            },
            "rm" => match parse_id(rest) {
                Some(id) => dispatch(&store, AppAction::Todo(TodoAction::Delete { id })).await?,
                None => println!("usage: rm <id>"),
            },
            "clear" => dispatch(&store, AppAction::Todo(TodoAction::ClearCompleted)).await?,
            "search" => {
                search = rest.to_string();
            },
            "demo" => {
                let status = store.state(|s| s.lifecycle.status).await;
                let action = match status {
                    TimerStatus::Inactive => LifecycleAction::Activate,
                    TimerStatus::Active => LifecycleAction::Deactivate,
                };
                // The timer effect outlives the send; waiting on it
                // would stall the prompt until the next tick.
                let _ = store.send(AppAction::Lifecycle(action)).await?;
            },
            "list" => {},
            "help" => {
                print_help();
                continue;
            },
            "quit" | "exit" => break,
            _ => {
                println!("unknown command: {command}");
                print_help();
                continue;
            },
        }

        render(&store, &search).await;
    }

    if let Err(error) = store.shutdown(Duration::from_secs(5)).await {
        tracing::warn!(%error, "shutdown did not finish cleanly");
    }
    tracing::info!("session ended");

    Ok(())
}

/// Sends an action and waits for its effects so the snapshot and title
/// land before the next render.
///
/// The handle covers the action's own effects only. Effects of feedback
/// actions (the persist/title pair triggered by `SnapshotLoaded` after
/// a `Load`) run under their own tracking and may still be in flight
/// when this returns; state itself is always current by then.
async fn dispatch(store: &AppStore, action: AppAction) -> Result<()> {
    let mut handle = store.send(action).await?;
    handle.wait().await;
    Ok(())
}

fn parse_id(raw: &str) -> Option<TodoId> {
    raw.parse::<u64>().ok().map(TodoId::new)
}

fn print_help() {
    println!("commands: add <text> | toggle <id> | rm <id> | clear | search [query] | demo | list | quit");
}

async fn render(store: &AppStore, search: &str) {
    let state = store.state(Clone::clone).await;
    let visible = view::filter(&state.todos.items, search);

    println!();
    if visible.is_empty() {
        if search.trim().is_empty() {
            println!("아직 할 일이 없어요. 첫 할 일을 추가해보세요!");
        } else {
            println!("\"{search}\"에 대한 검색 결과가 없습니다.");
        }
    } else {
        for item in visible.iter() {
            let mark = if item.completed { "✓" } else { " " };
            println!("  [{mark}] {:>3}  {}", item.id, item.text);
        }
    }

    if !state.todos.is_empty() {
        let completed = view::completed_count(&state.todos.items);
        println!("{}", view::summary(completed, state.todos.len()));
    }

    if state.lifecycle.status == TimerStatus::Active {
        println!("부모의 완료 개수: {}", state.lifecycle.observed_completed);
        println!("초 타이머: {}s", state.lifecycle.seconds);
    }
}
