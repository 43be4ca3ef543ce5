use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamehub_core::{
    AppConfig, BestEffort, Catalog, CatalogCache, CatalogError, CatalogLoader, DisplayCapability,
    FilterTag, FullscreenChange, FullscreenState, InfoPanel, Launcher, ListingStatus, ListingView,
    PlaySurface, PlayerState, PlayerView, Route, Router,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::display::TerminalDisplay;

const TICK_RATE: Duration = Duration::from_millis(250);
// title line plus a two-line description
const CARD_HEIGHT: usize = 3;
const DESCRIPTION_LINES: usize = 2;
const AD_PLACEHOLDER: &str = "[ Advertisement Space ]";

#[derive(Debug, Clone)]
struct Theme {
    primary_bg: Color,
    primary_fg: Color,
    accent: Color,
    highlight: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_bg: Color::Black,
            primary_fg: Color::White,
            accent: Color::Magenta,
            highlight: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    CatalogLoaded {
        generation: u64,
        result: std::result::Result<Catalog, CatalogError>,
    },
}

enum Screen {
    Listing(ListingScreen),
    Player(PlayerScreen),
}

struct ListingScreen {
    view: ListingView,
    cursor: usize,
    offset: usize,
    page: usize,
}

impl ListingScreen {
    fn new() -> Self {
        Self {
            view: ListingView::new(),
            cursor: 0,
            offset: 0,
            page: 1,
        }
    }

    fn set_filter(&mut self, filter: FilterTag) -> bool {
        if !self.view.set_filter(filter) {
            return false;
        }
        self.cursor = 0;
        self.offset = 0;
        true
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        let last = self.view.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.view.is_empty() {
            return;
        }
        self.cursor = index.min(self.view.len() - 1);
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        let page = self.page.max(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
        let max_offset = self.view.len().saturating_sub(page);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

struct PlayerScreen {
    view: PlayerView,
    info_scroll: u16,
    info_expanded: bool,
}

impl PlayerScreen {
    fn new(id: String) -> Self {
        Self {
            view: PlayerView::new(id),
            info_scroll: 0,
            info_expanded: false,
        }
    }

    fn scroll_info(&mut self, delta: i32) {
        let next = (self.info_scroll as i32 + delta).max(0);
        self.info_scroll = next.min(u16::MAX as i32) as u16;
    }
}

/// Terminal frontend for the game hub.
pub struct HubApp {
    config: AppConfig,
    cache: CatalogCache,
    loader: CatalogLoader,
    launcher: Launcher,
    router: Router,
    screen: Screen,
    generation: u64,
    display: TerminalDisplay,
    display_rx: Option<mpsc::Receiver<FullscreenChange>>,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: Option<mpsc::Receiver<AppEvent>>,
    theme: Theme,
    status: String,
    should_quit: bool,
}

impl HubApp {
    pub fn new(
        config: AppConfig,
        cache: CatalogCache,
        loader: CatalogLoader,
        initial: Route,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(128);
        let (display_tx, display_rx) = mpsc::channel(16);
        let launcher = Launcher::new(config.open_command.clone());
        Self {
            config,
            cache,
            loader,
            launcher,
            router: Router::new(initial),
            screen: Screen::Listing(ListingScreen::new()),
            generation: 0,
            display: TerminalDisplay::new(display_tx),
            display_rx: Some(display_rx),
            event_tx,
            event_rx: Some(event_rx),
            theme: Theme::default(),
            status: "Loading games…".to_string(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut event_rx = self
            .event_rx
            .take()
            .context("event loop already running")?;
        let mut display_rx = self
            .display_rx
            .take()
            .context("event loop already running")?;
        self.mount();

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        spawn_input_thread(self.event_tx.clone());

        let result = self
            .event_loop(&mut terminal, &mut event_rx, &mut display_rx)
            .await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
        display_rx: &mut mpsc::Receiver<FullscreenChange>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    if !self.process_app_event(maybe_event) {
                        break;
                    }
                }
                Some(change) = display_rx.recv() => self.handle_display_change(change),
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.status = format!("Error: {err}");
                }
                true
            }
            Some(AppEvent::Tick) => true,
            Some(AppEvent::CatalogLoaded { generation, result }) => {
                self.apply_catalog(generation, result);
                true
            }
            None => false,
        }
    }

    /// Build the view for the active route and request its catalog.
    fn mount(&mut self) {
        self.leave_fullscreen();
        self.generation += 1;
        let route = self.router.current().clone();
        info!(route = %route, generation = self.generation, "Mounting view");
        self.screen = match route {
            Route::Listing => Screen::Listing(ListingScreen::new()),
            Route::Player { id } => Screen::Player(PlayerScreen::new(id)),
        };
        self.request_catalog();
    }

    fn request_catalog(&mut self) {
        let generation = self.generation;
        if let Some(catalog) = self.cache.get(self.loader.source()) {
            self.apply_catalog(generation, Ok(catalog));
            return;
        }

        self.status = "Loading games…".to_string();
        let cache = self.cache.clone();
        let loader = self.loader.clone();
        let sender = self.event_tx.clone();
        tokio::spawn(async move {
            let result = cache.get_or_load(&loader).await;
            if sender
                .send(AppEvent::CatalogLoaded { generation, result })
                .await
                .is_err()
            {
                debug!("Event loop closed before the catalog arrived");
            }
        });
    }

    fn apply_catalog(
        &mut self,
        generation: u64,
        result: std::result::Result<Catalog, CatalogError>,
    ) {
        if generation != self.generation {
            debug!(generation, "Discarding catalog for an unmounted view");
            return;
        }
        let redirect = match (&mut self.screen, result) {
            (Screen::Listing(listing), Ok(catalog)) => {
                listing.view.on_loaded(catalog);
                self.status = format!("Loaded {} games", listing.view.store().len());
                None
            }
            (Screen::Listing(listing), Err(err)) => {
                listing.view.on_failed(&err);
                None
            }
            (Screen::Player(player), Ok(catalog)) => {
                let redirect = player.view.resolve(&catalog);
                if let Some(game) = player.view.game() {
                    self.status = format!("Playing {}", game.title);
                }
                redirect
            }
            (Screen::Player(player), Err(err)) => player.view.fail(&err),
        };
        if let Some(route) = redirect {
            self.router.replace(route);
            self.mount();
        }
    }

    fn navigate(&mut self, route: Route) {
        if self.router.navigate(route) {
            self.mount();
        }
    }

    fn go_back(&mut self) {
        if self.router.back() {
            self.mount();
        }
    }

    fn leave_fullscreen(&mut self) {
        if self.display.is_fullscreen() {
            BestEffort::from_result("exit_fullscreen", self.display.exit_fullscreen());
        }
    }

    fn handle_display_change(&mut self, change: FullscreenChange) {
        if let Screen::Player(player) = &mut self.screen {
            if player.view.on_fullscreen_change(change) {
                self.status = if change.fullscreen {
                    "Full screen".to_string()
                } else {
                    "Left full screen".to_string()
                };
            }
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Key(_)
            | Event::Resize(_, _)
            | Event::Mouse(_)
            | Event::FocusGained
            | Event::FocusLost
            | Event::Paste(_) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        match self.screen {
            Screen::Listing(_) => self.handle_listing_key(key),
            Screen::Player(_) => self.handle_player_key(key),
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) -> Result<()> {
        let Screen::Listing(listing) = &mut self.screen else {
            return Ok(());
        };
        let mut target = None;
        let mut filter = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => listing.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => listing.move_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => listing.move_to(0),
            KeyCode::Char('G') | KeyCode::End => listing.move_to(usize::MAX),
            KeyCode::PageDown => listing.move_cursor(listing.page as isize),
            KeyCode::PageUp => listing.move_cursor(-(listing.page as isize)),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                filter = Some(listing.view.filter().next())
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                filter = Some(listing.view.filter().prev())
            }
            KeyCode::Char(ch @ '1'..='3') => {
                let idx = ch as usize - '1' as usize;
                filter = FilterTag::TAGS.get(idx).copied();
            }
            KeyCode::Enter | KeyCode::Char(' ') => target = listing.view.activate(listing.cursor),
            _ => {}
        }
        if let Some(tag) = filter {
            if listing.set_filter(tag) {
                self.status = format!("Showing {} ({})", tag.label(), listing.view.len());
            }
        }
        if let Some(route) = target {
            self.navigate(route);
        }
        Ok(())
    }

    fn handle_player_key(&mut self, key: KeyEvent) -> Result<()> {
        let Screen::Player(player) = &mut self.screen else {
            return Ok(());
        };
        let fullscreen = player.view.fullscreen().is_fullscreen();
        let mut back = false;
        let mut open = None;
        match key.code {
            // platform exit gesture; the player hears about it through the notification
            KeyCode::Esc if fullscreen => self.display.platform_exit(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => back = true,
            KeyCode::Char('q') if !fullscreen => self.should_quit = true,
            KeyCode::Char('f') => match player.view.toggle_fullscreen(&mut self.display) {
                Some(FullscreenState::Fullscreen) => {
                    self.status = "Full screen (Esc or f to leave)".to_string()
                }
                Some(FullscreenState::Normal) => self.status = "Left full screen".to_string(),
                None => self.status = "Full screen is only available for browser games".to_string(),
            },
            KeyCode::Enter | KeyCode::Char('o') => {
                open = player.view.surface().map(|surface| surface.url().to_string())
            }
            KeyCode::Char('i') if !fullscreen => {
                player.info_expanded = !player.info_expanded;
                player.info_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => player.scroll_info(1),
            KeyCode::Char('k') | KeyCode::Up => player.scroll_info(-1),
            _ => {}
        }
        if let Some(url) = open {
            self.open_link(&url)?;
        }
        if back {
            self.go_back();
        }
        Ok(())
    }

    fn open_link(&mut self, url: &str) -> Result<()> {
        let target = self.config.resolve_url(url);
        self.launcher
            .open(&target)
            .with_context(|| format!("could not open {target}"))?;
        self.status = format!("Opened {target}");
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(self.theme.primary_bg)
                    .fg(self.theme.primary_fg),
            ),
            area,
        );
        match &mut self.screen {
            Screen::Listing(listing) => {
                draw_listing(frame, area, listing, &self.theme, &self.config, &self.status)
            }
            Screen::Player(player) => {
                draw_player(frame, area, player, &self.theme, &self.config, &self.status)
            }
        }
    }
}

fn draw_listing(
    frame: &mut Frame,
    area: Rect,
    listing: &mut ListingScreen,
    theme: &Theme,
    config: &AppConfig,
    status: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT as u16 + 2),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            config.hub_title.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            config.tagline.clone(),
            Style::default().fg(theme.muted),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let selected = FilterTag::TAGS
        .iter()
        .position(|tag| *tag == listing.view.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(
        FilterTag::TAGS
            .iter()
            .enumerate()
            .map(|(idx, tag)| format!("{} {}", idx + 1, tag.label()))
            .collect::<Vec<_>>(),
    )
    .select(selected)
    .highlight_style(
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL).title("Filter"));
    frame.render_widget(tabs, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);
    render_cards(frame, body[0], listing, theme);
    render_card_details(frame, body[1], listing, theme);

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(status.to_string()),
            Span::styled(
                "   [Enter] Play  [Tab] Filter  [q] Quit",
                Style::default().fg(theme.muted),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "© {} {}. All rights reserved.",
                Local::now().year(),
                config.hub_title
            ),
            Style::default().fg(theme.muted),
        )),
    ])
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);
}

fn render_cards(frame: &mut Frame, area: Rect, listing: &mut ListingScreen, theme: &Theme) {
    listing.page = (area.height.saturating_sub(2) as usize / CARD_HEIGHT).max(1);
    listing.ensure_cursor_visible();

    let block = Block::default().borders(Borders::ALL).title("Games");
    if listing.view.status() != ListingStatus::Ready {
        // loading and failed loads both show an empty grid
        frame.render_widget(block, area);
        return;
    }

    let text_width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = listing
        .view
        .cards()
        .into_iter()
        .enumerate()
        .skip(listing.offset)
        .take(listing.page)
        .map(|(idx, card)| {
            let marker = if idx == listing.cursor {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let mut title = vec![
                marker,
                Span::styled(
                    card.title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", card.badge),
                    Style::default().fg(if card.badge == "Android" {
                        theme.success
                    } else {
                        theme.highlight
                    }),
                ),
            ];
            if card.is_new {
                title.push(Span::styled(
                    " NEW",
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let mut lines = vec![Line::from(title)];
            let mut description = clamp_lines(card.description, text_width, DESCRIPTION_LINES);
            description.resize(DESCRIPTION_LINES, String::new());
            lines.extend(description.into_iter().map(|line| {
                Line::from(Span::styled(
                    format!("    {line}"),
                    Style::default().fg(theme.muted),
                ))
            }));
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(listing.cursor.saturating_sub(listing.offset)));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection_bg));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_card_details(frame: &mut Frame, area: Rect, listing: &ListingScreen, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title("Game Details");
    let cards = listing.view.cards();
    let Some(card) = cards.get(listing.cursor) else {
        frame.render_widget(block, area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            card.title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", card.badge, card.play_label),
            Style::default().fg(theme.muted),
        )),
        Line::from(format!("Thumbnail: {}", card.thumbnail)),
        Line::from(""),
        Line::from(card.description.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Play Now",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_player(
    frame: &mut Frame,
    area: Rect,
    player: &PlayerScreen,
    theme: &Theme,
    config: &AppConfig,
    status: &str,
) {
    if !matches!(player.view.state(), PlayerState::Found(_)) {
        let loading = Paragraph::new("Loading...").alignment(Alignment::Center);
        frame.render_widget(loading, centered_rect(area.width, 1, area));
        return;
    }
    let Some(surface) = player.view.surface() else {
        return;
    };

    if !player.view.shows_header() {
        render_surface(frame, area, &surface, true, theme, config);
        return;
    }

    let surface_height = if player.info_expanded {
        Constraint::Length(8)
    } else {
        Constraint::Percentage(45)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            surface_height,
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let title = player
        .view
        .game()
        .map(|game| game.title.clone())
        .unwrap_or_default();
    let mut header = vec![
        Span::raw("← Back to Hub [Esc]   "),
        Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   [i] Game Info"),
    ];
    if player.view.offers_fullscreen() {
        header.push(Span::raw("   [f] Full Screen"));
    }
    let header = Paragraph::new(Line::from(header))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_surface(frame, chunks[1], &surface, false, theme, config);

    if let Some(panel) = player.view.info_panel() {
        let paragraph = Paragraph::new(info_lines(&panel, theme))
            .block(Block::default().borders(Borders::ALL).title("Game Info"))
            .wrap(Wrap { trim: true })
            .scroll((player.info_scroll, 0));
        frame.render_widget(paragraph, chunks[2]);
    }

    let status = Paragraph::new(Span::styled(
        status.to_string(),
        Style::default().fg(theme.muted),
    ));
    frame.render_widget(status, chunks[3]);
}

fn render_surface(
    frame: &mut Frame,
    area: Rect,
    surface: &PlaySurface<'_>,
    fullscreen: bool,
    theme: &Theme,
    config: &AppConfig,
) {
    match surface {
        PlaySurface::Embedded { url, title } => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "▶ Instant Play",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(config.resolve_url(url)),
                Line::from(""),
                Line::from("[Enter] Launch game"),
            ];
            if fullscreen {
                lines.push(Line::from(Span::styled(
                    "[Esc] Exit full screen",
                    Style::default().fg(theme.muted),
                )));
            }
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(format!(" {title} "));
            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        PlaySurface::Download {
            url,
            title,
            description,
            thumbnail,
        } => {
            let outer = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "));
            frame.render_widget(outer, area);

            let card_area = centered_rect(area.width.saturating_sub(4).min(60), 9, area);
            let mut lines = vec![
                Line::from(Span::styled(
                    title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(description.to_string()),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] Download on Play Store",
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(url.to_string(), Style::default().fg(theme.muted))),
                Line::from(Span::styled(
                    "Android Device Required",
                    Style::default().fg(theme.muted),
                )),
            ];
            if !thumbnail.is_empty() {
                lines.insert(
                    1,
                    Line::from(Span::styled(
                        thumbnail.to_string(),
                        Style::default().fg(theme.muted),
                    )),
                );
            }
            let card = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(Clear, card_area);
            frame.render_widget(card, card_area);
        }
    }
}

fn info_lines(panel: &InfoPanel<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let ad = || {
        Line::from(Span::styled(AD_PLACEHOLDER, Style::default().fg(theme.muted)))
            .alignment(Alignment::Center)
    };
    let mut lines = vec![
        ad(),
        Line::from(""),
        heading(&panel.heading),
        Line::from(panel.description.to_string()),
        Line::from(""),
        Line::from(format!("Author: {}", panel.author)),
        Line::from(format!("Updated: {}", panel.last_updated)),
        Line::from(format!("Platform: {}", panel.platform)),
        Line::from(""),
        heading("How to Play"),
        Line::from(panel.instructions.to_string()),
    ];
    if let Some(controls) = panel.controls {
        lines.push(Line::from(Span::styled(
            format!("Controls: {controls}"),
            Style::default().fg(theme.highlight),
        )));
    }
    lines.push(Line::from(""));
    lines.push(heading("Game Features"));
    lines.extend(
        panel
            .features
            .iter()
            .map(|feature| Line::from(format!("• {feature}"))),
    );
    lines.push(Line::from(""));
    lines.push(ad());
    lines
}

/// Word-wrap `text` to `width` columns, keeping at most `max_lines` and
/// marking a cut with an ellipsis.
fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if width == 0 || max_lines == 0 {
        return lines;
    }
    let mut current = String::new();
    let mut truncated = false;
    for word in text.split_whitespace() {
        let word: String = word.chars().take(width).collect();
        let current_len = current.chars().count();
        if current.is_empty() {
            current = word;
        } else if current_len + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
            if lines.len() == max_lines {
                truncated = true;
                current.clear();
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            let mut kept: String = last.chars().take(width.saturating_sub(1)).collect();
            kept.push('…');
            *last = kept;
        }
    }
    lines
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamehub_core::CatalogSource;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use tempfile::TempDir;

    fn catalog_json() -> String {
        json!([
            {
                "id": "a", "type": "html", "url": "/games/a.html", "title": "A",
                "description": "Arcade dodging game"
            },
            {
                "id": "b", "type": "android", "url": "https://play/b", "title": "B",
                "description": "Mobile puzzle", "isNew": true
            }
        ])
        .to_string()
    }

    async fn app_at(route: Route) -> Result<(HubApp, TempDir)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("games.json");
        std::fs::write(&path, catalog_json())?;

        let config = AppConfig {
            catalog_source: path.display().to_string(),
            site_root: "https://hub.example".to_string(),
            ..AppConfig::default()
        };
        let loader = CatalogLoader::new(CatalogSource::Path(path), config.request_timeout())?;
        let cache = CatalogCache::new();
        cache.get_or_load(&loader).await?;

        let mut app = HubApp::new(config, cache, loader, route);
        app.mount();
        Ok((app, dir))
    }

    fn render(app: &mut HubApp) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 40))?;
        terminal.draw(|frame| app.draw(frame))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn press(app: &mut HubApp, code: KeyCode) -> Result<()> {
        app.handle_input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn drain_display(app: &mut HubApp) {
        let mut changes = Vec::new();
        if let Some(rx) = app.display_rx.as_mut() {
            while let Ok(change) = rx.try_recv() {
                changes.push(change);
            }
        }
        for change in changes {
            app.handle_display_change(change);
        }
    }

    #[tokio::test]
    async fn android_filter_leads_to_download_card() -> Result<()> {
        let (mut app, _dir) = app_at(Route::Listing).await?;
        let screen = render(&mut app)?;
        assert!(screen.contains("Arcade dodging game"));

        press(&mut app, KeyCode::Char('2'))?;
        let screen = render(&mut app)?;
        assert!(screen.contains("B  [Android] NEW"));
        assert!(!screen.contains("Arcade dodging game"));

        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.router.current(), &Route::player("b"));
        let screen = render(&mut app)?;
        assert!(screen.contains("Download on Play Store"));
        assert!(screen.contains("https://play/b"));
        assert!(!screen.contains("[f] Full Screen"));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_game_redirects_to_listing() -> Result<()> {
        let (mut app, _dir) = app_at(Route::player("zzz")).await?;
        assert_eq!(app.router.current(), &Route::Listing);
        assert_eq!(app.router.depth(), 1);
        assert!(matches!(app.screen, Screen::Listing(_)));
        let screen = render(&mut app)?;
        assert!(!screen.contains("Loading..."));
        Ok(())
    }

    #[tokio::test]
    async fn fullscreen_hides_details_until_platform_exit() -> Result<()> {
        let (mut app, _dir) = app_at(Route::player("a")).await?;
        let screen = render(&mut app)?;
        assert!(screen.contains("About A"));
        assert!(screen.contains("https://hub.example/games/a.html"));
        assert!(screen.contains("[f] Full Screen"));

        assert!(screen.contains("Advertisement Space"));

        press(&mut app, KeyCode::Char('f'))?;
        drain_display(&mut app);
        let screen = render(&mut app)?;
        assert!(!screen.contains("About A"));
        assert!(!screen.contains("Advertisement Space"));
        assert!(!screen.contains("Back to Hub"));

        press(&mut app, KeyCode::Esc)?;
        drain_display(&mut app);
        assert_eq!(app.router.current(), &Route::player("a"));
        let screen = render(&mut app)?;
        assert!(screen.contains("About A"));
        assert!(screen.contains("Follow the on-screen instructions to play."));
        Ok(())
    }

    #[tokio::test]
    async fn back_returns_to_listing() -> Result<()> {
        let (mut app, _dir) = app_at(Route::Listing).await?;
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.router.current(), &Route::player("a"));

        press(&mut app, KeyCode::Esc)?;
        assert_eq!(app.router.current(), &Route::Listing);
        assert!(matches!(app.screen, Screen::Listing(_)));
        Ok(())
    }

    #[tokio::test]
    async fn stale_catalog_results_are_dropped() -> Result<()> {
        let (mut app, _dir) = app_at(Route::player("a")).await?;
        let stale = app.generation - 1;
        app.apply_catalog(stale, Ok(std::sync::Arc::from(Vec::new())));
        let Screen::Player(player) = &app.screen else {
            panic!("expected player screen");
        };
        assert!(player.view.game().is_some());
        Ok(())
    }

    #[test]
    fn info_panel_is_framed_by_ad_placeholders() {
        let record: gamehub_core::GameRecord = serde_json::from_value(json!({
            "id": "a", "type": "html", "url": "/a", "title": "A", "features": []
        }))
        .expect("valid record");
        let mut view = PlayerView::new("a");
        view.resolve(std::slice::from_ref(&record));
        let panel = view.info_panel().expect("panel");

        let text: Vec<String> = info_lines(&panel, &Theme::default())
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();
        assert_eq!(text.first().map(String::as_str), Some(AD_PLACEHOLDER));
        assert_eq!(text.last().map(String::as_str), Some(AD_PLACEHOLDER));
        assert!(!text.iter().any(|line| line.starts_with('•')));
    }

    #[test]
    fn clamps_descriptions_to_two_lines() {
        assert_eq!(clamp_lines("short", 20, 2), ["short"]);
        assert_eq!(
            clamp_lines("aaa bbb ccc ddd eee fff", 10, 2),
            ["aaa bbb", "ccc ddd…"]
        );
        assert_eq!(clamp_lines("aaa bbb ccc", 7, 2), ["aaa bbb", "ccc"]);
        assert!(clamp_lines("anything", 0, 2).is_empty());
    }
}
