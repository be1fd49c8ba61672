use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quarry::api::SearchClient;
use quarry::key_handlers::{handle_key, handle_mouse, InputAction};
use quarry::{chat_view, config, dispatch, logging, App};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::{io, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Mutex};

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    config::initialize_config().context("loading configuration")?;
    let cfg = config::get_config();
    let _logger = logging::init(&cfg).context("starting file logger")?;
    log::info!("quarry starting, search backend {}", cfg.search_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new()));
    let client = Arc::new(SearchClient::new(cfg.search_url.clone()));
    let res = run_app(&mut terminal, app, client).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Main loop: redraw, then wait for the next input event or tick. Searches
/// run as spawned tasks against the shared `App`.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: Arc<SearchClient>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Input reader: polls crossterm with a short timeout so ticks keep the
    // spinner animating even when no keys arrive.
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if tx.send(Event::Input(ev)).await.is_err() {
                        return;
                    }
                }
            } else if tx.send(Event::Tick).await.is_err() {
                return;
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| chat_view::draw(f, &mut guard))?;
        }

        let Some(event) = rx.recv().await else { break };
        match event {
            Event::Input(CEvent::Key(key)) => {
                let action = {
                    let mut guard = app.lock().await;
                    handle_key(&mut guard, key)
                };
                match action {
                    InputAction::Submit(query) => {
                        tokio::spawn(dispatch::run_search(app.clone(), client.clone(), query));
                    }
                    InputAction::OpenLink(url) => {
                        let mut guard = app.lock().await;
                        match open::that(&url) {
                            Ok(()) => guard.logs.add(format!("opened {}", url)),
                            Err(e) => guard.logs.add(format!("failed to open {}: {}", url, e)),
                        }
                    }
                    InputAction::Quit => break,
                    InputAction::None => {}
                }
            }
            Event::Input(CEvent::Mouse(mouse)) => {
                let mut guard = app.lock().await;
                handle_mouse(&mut guard, mouse);
            }
            Event::Input(_) => {}
            Event::Tick => {}
        }
    }

    log::info!("quarry exiting");
    Ok(())
}
