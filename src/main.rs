// ============================================================================
// LazyIndex - Sheet d'un token panier dans le terminal
// ============================================================================
// Affiche un token panier (ex : DPI), son graphique de prix, son bouton
// d'action et la composition "Underlying Assets" avec barres d'allocation.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread : rafraîchit le snapshot de marché sans bloquer l'UI
// 4. Arc<Mutex<App>> : état partagé entre l'UI et le worker
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazyindex::api::{fetch_market_snapshot, load_wallet_data};
use lazyindex::app::App;
use lazyindex::config::Config;
use lazyindex::models::MarketSnapshot;
use lazyindex::ui::{render, Event, EventHandler};

// ============================================================================
// AppCommand / AppResult : communication avec le worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Recharger le snapshot de marché depuis l'URL configurée
    RefreshMarket { url: String },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Nouveau snapshot : remplace l'ancien en bloc
    MarketLoaded(MarketSnapshot),

    /// Erreur lors du chargement (l'ancien snapshot reste affiché)
    LoadError(String),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log dans
// ./logs/lazyindex.log avec rotation quotidienne.
//
// ```bash
// tail -f logs/lazyindex.log
// RUST_LOG=lazyindex=trace cargo run
// ```
// ============================================================================

fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazyindex.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazyindex, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyindex=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

/// Verrouille l'état partagé
///
/// Un panic dans un autre thread ne doit pas bloquer l'UI : on récupère
/// l'état même si le mutex est empoisonné.
fn lock(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyIndex starting up");

    let config = Config::load()?;

    println!("📊 Chargement de {}...", config.data_path.display());
    let runtime = tokio::runtime::Runtime::new()?;
    let mut data = runtime.block_on(load_wallet_data(&config.data_path))?;

    // Snapshot distant optionnel : en cas d'échec on garde celui du fichier
    if let Some(url) = &config.market_url {
        match runtime.block_on(fetch_market_snapshot(url)) {
            Ok(snapshot) => {
                info!(assets = snapshot.len(), "Initial market snapshot fetched");
                data.market = snapshot.into_iter().collect();
            }
            Err(e) => warn!(error = ?e, "Initial market fetch failed, using file data"),
        }
    }
    drop(runtime);

    info!(basket = %data.basket.symbol, "Wallet data loaded");
    println!("✅ Données chargées !\n");

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let app = Arc::new(Mutex::new(App::new(
        data,
        config.native_currency,
        config.platform,
    )));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone());

    let events = EventHandler::default();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, &config, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// - Reçoit des AppCommand via command_rx
// - Exécute le fetch async dans son propre runtime tokio
// - Renvoie un AppResult via result_tx
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create worker runtime");
                let _ = result_tx.send(AppResult::LoadError(format!(
                    "Rafraîchissement indisponible : {}",
                    e
                )));
                return;
            }
        };

        // Le channel se ferme quand l'event loop se termine
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::RefreshMarket { url } => {
                    lock(&app).start_loading(Some("Rafraîchissement du marché...".to_string()));

                    match runtime.block_on(fetch_market_snapshot(&url)) {
                        Ok(snapshot) => {
                            info!(assets = snapshot.len(), "Market snapshot refreshed");
                            let _ = result_tx.send(AppResult::MarketLoaded(snapshot));
                        }
                        Err(e) => {
                            error!(error = ?e, "Failed to refresh market snapshot");
                            let _ = result_tx.send(AppResult::LoadError(e.to_string()));
                        }
                    }

                    lock(&app).stop_loading();
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker
//   1. Render
//   2. Input
//   3. Rafraîchissement automatique si l'intervalle est écoulé
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    config: &Config,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    let refresh_interval = config.refresh_interval();
    let mut last_refresh = Instant::now();

    loop {
        if !lock(&app).is_running() {
            break;
        }

        // 0. RÉSULTATS
        match result_rx.try_recv() {
            Ok(AppResult::MarketLoaded(snapshot)) => lock(&app).set_snapshot(snapshot),
            Ok(AppResult::LoadError(message)) => {
                warn!(error = %message, "Keeping previous market snapshot");
                lock(&app).set_error(message);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                // Pas de worker : l'app reste utilisable sans rafraîchissement
            }
        }

        // 1. RENDER
        terminal.draw(|frame| {
            let app_lock = lock(&app);
            render(frame, &app_lock);
        })?;

        // 2. INPUT
        match events.next() {
            Ok(event) => {
                let mut app_lock = lock(&app);
                if handle_event(&mut app_lock, event, config, &command_tx) {
                    last_refresh = Instant::now();
                }
            }
            Err(e) => debug!(error = ?e, "Failed to read terminal event"),
        }

        // 3. UPDATE
        if let (Some(interval), Some(url)) = (refresh_interval, &config.market_url) {
            if last_refresh.elapsed() >= interval {
                debug!("Automatic market refresh");
                let _ = command_tx.send(AppCommand::RefreshMarket { url: url.clone() });
                last_refresh = Instant::now();
            }
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement
///
/// Retourne true si un rafraîchissement du marché a été demandé
fn handle_event(
    app: &mut App,
    event: Event,
    config: &Config,
    command_tx: &mpsc::Sender<AppCommand>,
) -> bool {
    use lazyindex::ui::events::{
        is_action_event, is_back_event, is_collectibles_event, is_currency_event, is_down_event,
        is_enter_event, is_quit_event, is_refresh_event, is_up_event,
    };

    if matches!(event, Event::Tick) {
        return false;
    }

    // Two-step quit : première pression → confirmation
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return false;
    }

    // Toute autre touche annule la confirmation
    app.cancel_quit();

    if is_up_event(&event) {
        app.navigate_up();
    } else if is_down_event(&event) {
        app.navigate_down();
    } else if is_back_event(&event) {
        debug!("User went back");
        app.back();
    } else if is_enter_event(&event) && app.is_on_sheet() {
        if let Some(request) = app.open_selected() {
            app.navigate(request);
        }
    } else if is_action_event(&event) && app.is_on_sheet() {
        let request = app.sheet_action().press();
        app.navigate(request);
    } else if is_currency_event(&event) {
        app.cycle_currency();
        info!(currency = %app.currency, "User changed currency");
    } else if is_collectibles_event(&event) {
        app.show_collectibles();
    } else if is_refresh_event(&event) {
        return match &config.market_url {
            Some(url) => {
                info!("User requested market refresh");
                let _ = command_tx.send(AppCommand::RefreshMarket { url: url.clone() });
                true
            }
            None => {
                app.set_error("Aucune URL de marché configurée".to_string());
                false
            }
        };
    }

    false
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    // Alternate screen : l'écran précédent est restauré en quittant
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal (appelé même en cas d'erreur)
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
