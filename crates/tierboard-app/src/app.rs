//! Main application state and prompt loop.

use crate::action::UiAction;
use crate::cli::Cli;
use crate::help::HelpRegistry;
use crate::view;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tierboard_core::board::PosMeta;
use tierboard_core::storage::create_default_storage;
use tierboard_core::{
    AppState, Clipboard, Command, FileStorage, ImportSource, NOTICE_DURATION, Persistence,
    PlayerPatch, Storage, TierPatch,
};

/// File operations for import and export.
mod file_ops {
    use std::path::Path;
    use tierboard_core::Export;

    /// Write an exported board to `path`.
    pub fn write_export(path: &Path, export: &Export) -> bool {
        match std::fs::write(path, &export.json) {
            Ok(()) => {
                log::info!("Exported board to: {:?}", path);
                true
            }
            Err(e) => {
                log::error!("Failed to write {:?}: {}", path, e);
                false
            }
        }
    }

    /// Read a board file for import.
    pub fn read_import(path: &Path) -> std::io::Result<String> {
        let result = std::fs::read_to_string(path);
        if let Err(e) = &result {
            log::error!("Failed to read {:?}: {}", path, e);
        }
        result
    }
}

/// System clipboard backed by `arboard`.
#[cfg(feature = "native")]
pub struct SystemClipboard;

#[cfg(feature = "native")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> bool {
        let copied = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()));
        match copied {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Clipboard unavailable: {}", e);
                false
            }
        }
    }
}

/// Clipboard for builds without system integration; every copy fails.
#[cfg(not(feature = "native"))]
pub struct SystemClipboard;

#[cfg(not(feature = "native"))]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, _text: &str) -> bool {
        log::warn!("Clipboard support not compiled in");
        false
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Storage directory; `None` uses the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Where `export` writes when no file is given.
    pub export_dir: PathBuf,
    pub notice_duration: Duration,
    pub prompt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tierboard".to_string(),
            data_dir: None,
            export_dir: PathBuf::from("."),
            notice_duration: NOTICE_DURATION,
            prompt: "tierboard> ".to_string(),
        }
    }
}

/// The shell: core state plus its native collaborators.
pub struct App<S: Storage> {
    config: AppConfig,
    state: AppState,
    persistence: Persistence<S>,
    clipboard: Box<dyn Clipboard>,
}

impl<S: Storage> App<S> {
    /// Load the saved board and preferences, seeding the sample board when
    /// nothing usable is stored.
    pub async fn load(config: AppConfig, storage: Arc<S>, clipboard: Box<dyn Clipboard>) -> Self {
        let persistence = Persistence::new(storage);
        let board = persistence.load_board_or_sample().await;
        let preferences = persistence.load_preferences().await;
        let state = AppState::new(board, preferences).with_notice_duration(config.notice_duration);

        Self {
            config,
            state,
            persistence,
            clipboard,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Render the current tab.
    pub fn render(&self) -> String {
        view::render(&self.state, &self.config.title)
    }

    /// Apply one action, then persist whatever changed.
    pub async fn handle(&mut self, action: UiAction, now: Instant) {
        self.state.tick(now);
        self.apply(action, now);
        self.persist().await;
    }

    fn apply(&mut self, action: UiAction, now: Instant) {
        let board = self.state.board();
        let command = match action {
            UiAction::Show | UiAction::Help | UiAction::Quit => return,
            UiAction::SetTab(tab) => {
                self.state.set_tab(tab);
                return;
            }
            UiAction::ToggleTheme => {
                self.state.toggle_theme();
                return;
            }
            UiAction::AddTier => Command::AddTier,
            UiAction::DeleteTier(tier) => Command::DeleteTier {
                tier_id: tier.resolve(board),
            },
            UiAction::RenameTier(tier, title) => Command::UpdateTier {
                tier_id: tier.resolve(board),
                patch: TierPatch::title(title),
            },
            UiAction::SetTierNote(tier, note) => Command::UpdateTier {
                tier_id: tier.resolve(board),
                patch: TierPatch::note(note),
            },
            UiAction::AddPlayer(tier) => Command::AddPlayer {
                tier_id: tier.resolve(board),
            },
            UiAction::SetName(player, name) => Command::UpdatePlayer {
                player_id: player.resolve(board),
                patch: PlayerPatch::name(name),
            },
            UiAction::SetPosition(player, pos) => Command::UpdatePlayer {
                player_id: player.resolve(board),
                patch: PlayerPatch::pos(pos),
            },
            UiAction::SetNotes(player, notes) => Command::UpdatePlayer {
                player_id: player.resolve(board),
                patch: PlayerPatch::notes(notes),
            },
            UiAction::SetMeta(player, key, value) => {
                let player_id = player.resolve(board);
                let pos_meta = board
                    .player(&player_id)
                    .map(|p| p.pos_meta.with(key, value.clone()))
                    .unwrap_or_else(|| PosMeta::blank().with(key, value));
                Command::UpdatePlayer {
                    player_id,
                    patch: PlayerPatch::pos_meta(pos_meta),
                }
            }
            UiAction::DeletePlayer(player) => Command::DeletePlayer {
                player_id: player.resolve(board),
            },
            UiAction::Move(player, target) => {
                let source = player.resolve(board);
                let target = target.resolve(board);
                match Command::from_drop(board, &source, &target) {
                    Some(command) => command,
                    None => {
                        log::debug!("Drop of {} on {} changes nothing", source, target);
                        return;
                    }
                }
            }
            UiAction::Export(path) => {
                if let Some(export) = self.state.dispatch(Command::Export, now) {
                    let path =
                        path.unwrap_or_else(|| self.config.export_dir.join(&export.file_name));
                    file_ops::write_export(&path, &export);
                }
                return;
            }
            UiAction::Import(path) => {
                self.state.import_file(file_ops::read_import(&path), now);
                return;
            }
            UiAction::Copy => {
                self.state.copy_board(self.clipboard.as_mut(), now);
                return;
            }
            UiAction::Paste(text) => Command::Import {
                text,
                source: ImportSource::Paste,
            },
            UiAction::ResetBoard => Command::ResetBoard,
        };
        self.state.dispatch(command, now);
    }

    async fn persist(&mut self) {
        if self.state.take_board_dirty() {
            self.persistence.save_board(self.state.board()).await;
        }
        if self.state.take_preferences_dirty() {
            self.persistence.save_preferences(self.state.preferences()).await;
        }
    }

    /// Read actions from stdin until `quit` or end of input.
    pub async fn run_loop(&mut self) {
        println!("{}", self.render());
        println!("Type 'help' for commands.");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{}", self.config.prompt);
            if let Err(e) = io::stdout().flush() {
                log::error!("Failed to flush stdout: {}", e);
            }

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    log::error!("Failed to read input: {}", e);
                    break;
                }
                None => break,
            };

            match UiAction::parse(&line) {
                Ok(UiAction::Quit) => break,
                Ok(UiAction::Help) => HelpRegistry::print_all(),
                Ok(action) => {
                    self.handle(action, Instant::now()).await;
                    println!("{}", self.render());
                }
                Err(e) => println!("{}", e),
            }
        }
    }
}

impl App<FileStorage> {
    /// Run with configuration taken from the command line.
    pub async fn run() {
        Self::run_with_config(Cli::parse().into()).await;
    }

    pub async fn run_with_config(config: AppConfig) {
        let Some(storage) = open_storage(&config) else {
            return;
        };
        log::info!("Storing board in {:?}", storage.base_path());

        let mut app = Self::load(config, storage, Box::new(SystemClipboard)).await;
        app.run_loop().await;
    }
}

/// Open the configured storage directory, falling back to the temp dir.
fn open_storage(config: &AppConfig) -> Option<Arc<FileStorage>> {
    let primary = match &config.data_dir {
        Some(dir) => FileStorage::new(dir.clone()).map(Arc::new),
        None => create_default_storage(),
    };
    match primary {
        Ok(storage) => Some(storage),
        Err(e) => {
            let fallback = std::env::temp_dir().join("tierboard");
            log::error!("Storage unavailable ({}), falling back to {:?}", e, fallback);
            match FileStorage::new(fallback) {
                Ok(storage) => Some(Arc::new(storage)),
                Err(e) => {
                    log::error!("No usable storage directory: {}", e);
                    None
                }
            }
        }
    }
}
