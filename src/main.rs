mod app;
mod config;
mod detail;
mod error;
mod filter;
mod html;
mod listing;
mod loader;
mod logging;
mod overlay;
mod post;
mod share;
mod ui;

use app::{App, InputMode, View};
use clap::{Args, Parser, Subcommand};
use config::Config;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::SetTitle;
use filter::CategoryFilter;
use loader::PostSource;
use logging::LogTarget;
use overlay::DismissTrigger;
use ratatui::layout::{Position, Rect};
use share::{Launcher, Platform, SystemLauncher};
use std::path::PathBuf;
use std::time::Instant;

/// Terminal reader for a static blog feed
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Feed location: URL or path to posts.json (overrides the config file)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
struct RunArgs {
    /// Open an article page directly: an id or a link like article.html?id=3
    #[arg(long)]
    id: Option<String>,

    /// Start with this search term
    #[arg(long)]
    search: Option<String>,

    /// Start on this category ("all" for every category)
    #[arg(long)]
    category: Option<String>,
}

impl RunArgs {
    /// Fill the flags not given here from `fallback`.
    fn or(self, fallback: RunArgs) -> RunArgs {
        RunArgs {
            id: self.id.or(fallback.id),
            search: self.search.or(fallback.search),
            category: self.category.or(fallback.category),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the feed in the terminal (default)
    Run(RunArgs),
    /// Render the listing and every article page to static HTML
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Build the initial application state from the run flags.
fn build_app(config: &Config, args: RunArgs) -> App {
    let mut app = App::new(config);
    if let Some(id) = args.id {
        app = app.with_page(detail::parse_article_id(&id));
    }
    if let Some(term) = args.search {
        app.set_search(&term);
    }
    if let Some(category) = args.category {
        app.select_category(CategoryFilter::parse(&category));
    }
    app
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {} (using defaults)", e.user_message());
            Config::default()
        }
    };
    if let Some(source) = cli.source {
        config.source = source;
    }
    let source = PostSource::parse(&config.source);

    // Normalize command
    let command = match cli.command {
        Some(Commands::Run(args)) => Commands::Run(args.or(cli.run)),
        Some(command) => command,
        None => Commands::Run(cli.run),
    };

    match command {
        Commands::Export { out } => {
            logging::init(LogTarget::Stderr, &config.log_level);
            let posts = match loader::fetch_posts(&source).await {
                Ok(posts) => posts,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };
            let written = html::export(&posts, &out, &config.base_url, &config.site_name)?;
            eprintln!("Wrote index and {} article pages to {}", written, out.display());
        }
        Commands::Run(args) => {
            logging::init(LogTarget::File, &config.log_level);

            // Create app
            let mut app = build_app(&config, args);
            app.init(&source).await;

            // Init terminal
            let mut terminal = ratatui::init();
            crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

            let size = terminal.size()?;
            app.update_page_size(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app, &SystemLauncher);

            // Restore terminal
            let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    launcher: &dyn Launcher,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shown_title = String::new();
    loop {
        let title = app.window_title();
        if title != shown_title {
            crossterm::execute!(std::io::stdout(), SetTitle(&title))?;
            shown_title = title;
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key, launcher);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
}

fn handle_key(app: &mut App, key: KeyEvent, launcher: &dyn Launcher) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }
    if app.overlay.is_visible() {
        handle_overlay_key(app, key, launcher);
        return;
    }
    match app.view {
        View::List => handle_list_key(app, key),
        View::Article => handle_article_key(app, key, launcher),
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.pop_search_char();
        }
        KeyCode::Char(c) => {
            app.push_search_char(c);
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Char('g') => {
            app.list_first();
        }
        KeyCode::Char('G') => {
            app.list_last();
        }
        KeyCode::Right | KeyCode::Char(']') => {
            app.next_category();
        }
        KeyCode::Left | KeyCode::Char('[') => {
            app.prev_category();
        }
        KeyCode::Char('a') => {
            app.select_category(CategoryFilter::All);
        }
        KeyCode::Enter => {
            app.open_selected();
        }
        KeyCode::Esc => {
            app.clear_search();
        }
        _ => {}
    }
}

/// Keys shared by the article page and the overlay.
fn handle_reading_key(app: &mut App, key: KeyEvent, launcher: &dyn Launcher) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        KeyCode::Char('f') => {
            app.share(Platform::Facebook, launcher);
        }
        KeyCode::Char('t') => {
            app.share(Platform::Twitter, launcher);
        }
        KeyCode::Char('y') => {
            app.copy_link(launcher);
        }
        _ => {}
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent, launcher: &dyn Launcher) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_overlay(DismissTrigger::Escape);
        }
        _ => handle_reading_key(app, key, launcher),
    }
}

fn handle_article_key(app: &mut App, key: KeyEvent, launcher: &dyn Launcher) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.back_home();
        }
        _ => handle_reading_key(app, key, launcher),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, screen: Rect) {
    if !app.overlay.is_visible() {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let area = ui::overlay::overlay_area(screen);
            if !area.contains(Position::new(mouse.column, mouse.row)) {
                app.close_overlay(DismissTrigger::OutsideClick);
            }
        }
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        _ => {}
    }
}
