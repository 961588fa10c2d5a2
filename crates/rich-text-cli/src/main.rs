mod source;
mod views;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use rich_text_config::Config;
use rich_text_engine::{MarkdownSource, Point, RenderedText, RichTextObserver, RichTextView};
use std::{
    cell::{Cell, RefCell},
    env,
    fs::{self, File},
    io::stdout,
    path::{Path, PathBuf},
    process,
    rc::Rc,
};
use views::TerminalViews;

/// Links the view reported, oldest first, and how many copies were made.
#[derive(Default)]
struct LinkHistory {
    links: RefCell<Vec<String>>,
    copies: Cell<usize>,
}

impl LinkHistory {
    fn len(&self) -> usize {
        self.links.borrow().len()
    }
}

impl RichTextObserver for LinkHistory {
    fn did_tap_link(&self, link_id: &str) {
        log::info!("link tapped: {link_id}");
        self.links.borrow_mut().push(link_id.to_string());
    }

    fn copy_menu_item_tapped(&self) {
        self.copies.set(self.copies.get() + 1);
    }
}

struct App {
    document_path: PathBuf,
    input: String,
    config: Config,
    links: Rc<LinkHistory>,
    view: RichTextView<MarkdownSource, TerminalViews>,
    content_area: Rect,
    scroll: usize,
    /// Block under the last click; the copy key copies its text.
    selected: Option<usize>,
    status: String,
}

impl App {
    fn new(document_path: PathBuf, input: String, config: Config, content_area: Rect) -> Self {
        let links = Rc::new(LinkHistory::default());
        let view = Self::build_view(&input, &config, &links, content_area);
        Self {
            document_path,
            input,
            config,
            links,
            view,
            content_area,
            scroll: 0,
            selected: None,
            status: "Click a link to resolve it".to_string(),
        }
    }

    fn build_view(
        input: &str,
        config: &Config,
        links: &Rc<LinkHistory>,
        content_area: Rect,
    ) -> RichTextView<MarkdownSource, TerminalViews> {
        let views = TerminalViews::new(content_area.width.max(1) as usize, config.layout);
        let source = MarkdownSource::new(config.style.font.clone());
        RichTextView::new(input, source, views, config.style.clone()).with_observer(links.clone())
    }

    /// Wipes the composition and rebuilds it for the new content area.
    fn resize(&mut self, content_area: Rect) {
        if content_area == self.content_area {
            return;
        }
        log::debug!(
            "content area resized to {}x{}",
            content_area.width,
            content_area.height
        );
        self.content_area = content_area;
        self.view = Self::build_view(&self.input, &self.config, &self.links, content_area);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn total_rows(&self) -> usize {
        let layout = self.view.layout(self.views_width());
        (layout.total_height() / self.config.layout.cell_height).ceil() as usize
    }

    fn max_scroll(&self) -> usize {
        self.total_rows()
            .saturating_sub(self.content_area.height as usize)
    }

    fn views_width(&self) -> f32 {
        self.content_area.width.max(1) as f32 * self.config.layout.cell_width
    }

    fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Centre of the clicked cell in view coordinates, if it is in the content area.
    fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.content_area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let cells = self.config.layout;
        let col = (column - area.x) as f32;
        let row = (row - area.y) as usize + self.scroll;
        Some(Point::new(
            (col + 0.5) * cells.cell_width,
            (row as f32 + 0.5) * cells.cell_height,
        ))
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(point) = self.cell_to_point(column, row) else {
            return;
        };
        let width = self.views_width();
        self.selected = self.view.layout(width).hit(point).map(|(index, _)| index);
        self.status = match self.view.tap(point, width) {
            Some(link) => format!("Link: {link} ({} opened)", self.links.len()),
            None => format!("No link at column {column}, row {row}"),
        };
    }

    /// Copies the whole text block selected by the last click.
    fn copy(&mut self) {
        let Some(text) = self
            .selected
            .and_then(|index| self.view.blocks().get(index))
            .and_then(|block| block.as_text())
        else {
            self.status = "Click a text block to select it".to_string();
            return;
        };
        self.status = match text.copy(0..text.storage().char_len()) {
            Some(copied) => {
                log::info!("copied {copied:?}");
                format!(
                    "Copied {} characters ({} copies)",
                    copied.chars().count(),
                    self.links.copies.get()
                )
            }
            None => "Copying is turned off".to_string(),
        };
    }
}

/// Logs to `log_path` when `RUST_LOG` is set; stays silent otherwise so the
/// alternate screen is never written to.
fn init_logging(log_path: &Path) -> Result<()> {
    if env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(log_path)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Splits the screen into content, side panels and the status bar.
fn screen_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(rows[0]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(columns[1]);
    (columns[0], side[0], side[1], rows[1])
}

fn content_area(area: Rect) -> Rect {
    let (content, ..) = screen_layout(area);
    Block::default().borders(Borders::ALL).inner(content)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <document.md>", args[0]);
        process::exit(1);
    }
    let document_path = PathBuf::from(&args[1]);

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let input = match source::load_document(&document_path) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    init_logging(&config.log_path)?;
    log::info!("rich-text-cli starting with {}", document_path.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = content_area(Rect::new(0, 0, size.width, size.height));
    let mut app = App::new(document_path, input, config, area);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                KeyCode::Char('c') => app.copy(),
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => app.click(column, row),
            Event::Resize(width, height) => {
                app.resize(content_area(Rect::new(0, 0, width, height)));
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let (content, errors_area, accessibility_area, status_area) = screen_layout(f.area());
    // Layout may differ from the last resize event; keep taps and rendering in sync.
    app.resize(Block::default().borders(Borders::ALL).inner(content));

    // Content panel
    let width = app.views_width();
    let layout = app.view.layout(width);
    let lines = views::render_blocks(app.view.blocks(), &layout, app.view.generator());
    let title = app
        .document_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Content".to_string());
    let content_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((app.scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(content_widget, content);

    // Error panel
    let error_items: Vec<ListItem> = match app.view.errors() {
        Some(errors) => errors
            .iter()
            .map(|error| {
                ListItem::new(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )))
            })
            .collect(),
        None => vec![ListItem::new(Line::from("No errors"))],
    };
    let errors_list =
        List::new(error_items).block(Block::default().borders(Borders::ALL).title("Errors"));
    f.render_widget(errors_list, errors_area);

    // Accessibility panel
    let accessibility = Paragraph::new(app.view.accessibility_value().unwrap_or("(none)").to_string())
        .block(Block::default().borders(Borders::ALL).title("Accessibility"))
        .wrap(Wrap { trim: true });
    f.render_widget(accessibility, accessibility_area);

    // Status and instructions
    let status_text = vec![
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("↑/k: Scroll up | "),
            Span::raw("↓/j: Scroll down | "),
            Span::raw("Click: Resolve link | "),
            Span::raw("c: Copy block"),
        ]),
    ];
    let status = Paragraph::new(status_text).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, status_area);
}
