//! Lobby controller: the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use derive_getters::Getters;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiClient, WordService};
use crate::hints::HintCredits;
use crate::lobby::screen::ScreenTransition;
use crate::lobby::screens::{
    MenuScreen, PlacementCommand, PlacementScreen, PlayCommand, PlayScreen, StatsViewScreen,
};
use crate::lobby::settings::GameSettings;
use crate::placement::PlacementFlow;
use crate::progress::ProgressTracker;
use crate::session::{GameSession, SessionMode};
use crate::store::AttemptStore;

/// Which screen the lobby opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Launch {
    /// Open on the menu.
    #[default]
    Menu,
    /// Jump straight into a free-play session.
    FreePlay,
    /// Jump straight into the placement exam.
    Placement,
}

/// Active screen in the lobby state machine.
///
/// The game modes are not listed here; they run their own loops and hand
/// back the screen to show afterwards.
#[derive(Debug)]
enum ActiveScreen {
    Menu(MenuScreen),
    Stats(StatsViewScreen),
}

/// What the player chose on a connection-failure prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryChoice {
    Retry,
    Menu,
    Quit,
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    api: ApiClient,
    store: AttemptStore,
    username: String,
    settings: GameSettings,
    tracker: ProgressTracker,
}

impl LobbyController {
    /// Creates a new lobby controller.
    #[instrument(skip(api, store))]
    pub fn new(api: ApiClient, store: AttemptStore, username: String, settings: GameSettings) -> Self {
        info!(username = %username, "Creating LobbyController");
        Self {
            api,
            store,
            username,
            settings,
            tracker: ProgressTracker::new(),
        }
    }

    /// Runs the lobby event loop until the player quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        launch: Launch,
    ) -> anyhow::Result<()> {
        info!(?launch, "Starting lobby event loop");

        let mut screen = match launch {
            Launch::Menu => self.menu_screen(),
            Launch::FreePlay => match self.run_free_play(terminal).await? {
                Some(next) => next,
                None => return Ok(()),
            },
            Launch::Placement => match self.run_placement(terminal).await? {
                Some(next) => next,
                None => return Ok(()),
            },
        };

        loop {
            terminal.draw(|f| {
                use crate::lobby::screen::Screen;
                match &screen {
                    ActiveScreen::Menu(s) => s.render(f),
                    ActiveScreen::Stats(s) => s.render(f),
                }
            })?;

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                use crate::lobby::screen::Screen;
                let transition = match &mut screen {
                    ActiveScreen::Menu(s) => s.handle_key(key),
                    ActiveScreen::Stats(s) => s.handle_key(key),
                };

                // Keep toggles made on the menu.
                if let Some(updated) = self.extract_settings(&screen) {
                    self.settings = updated;
                }

                // The game modes run their own loops before any other transition.
                if matches!(
                    transition,
                    ScreenTransition::StartFreePlay | ScreenTransition::StartPlacement
                ) {
                    let next = match transition {
                        ScreenTransition::StartFreePlay => self.run_free_play(terminal).await,
                        _ => self.run_placement(terminal).await,
                    };
                    match next {
                        Ok(Some(next_screen)) => {
                            screen = next_screen;
                            continue;
                        }
                        Ok(None) => {
                            info!("Lobby quitting");
                            return Ok(());
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Game mode failed");
                            screen = self.menu_screen();
                            continue;
                        }
                    }
                }

                screen = match self.apply_transition(transition, screen).await {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    async fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMenu => {
                info!("Navigating to menu");
                Some(self.menu_screen())
            }

            ScreenTransition::GoToStats => {
                info!("Navigating to statistics");
                let error = match self.tracker.refresh(&self.api).await {
                    Ok(()) => None,
                    Err(e) => Some(e.to_string()),
                };
                Some(ActiveScreen::Stats(StatsViewScreen::new(
                    self.username.clone(),
                    self.tracker.stats().cloned(),
                    error,
                )))
            }

            // Handled in the event loop, which owns the terminal.
            ScreenTransition::StartFreePlay | ScreenTransition::StartPlacement => Some(current),

            ScreenTransition::Quit => None,
        }
    }

    /// Extracts updated settings from the menu screen.
    fn extract_settings(&self, screen: &ActiveScreen) -> Option<GameSettings> {
        match screen {
            ActiveScreen::Menu(s) => Some(*s.settings()),
            _ => None,
        }
    }

    fn menu_screen(&self) -> ActiveScreen {
        ActiveScreen::Menu(MenuScreen::new(self.username.clone(), self.settings))
    }

    /// Runs free play until the player leaves or quits.
    ///
    /// Returns the screen to show next, or `None` to exit the application.
    #[instrument(skip(self, terminal))]
    async fn run_free_play<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<Option<ActiveScreen>> {
        info!(
            level = %self.settings.level,
            adaptive = self.settings.adaptive,
            "Starting free play"
        );

        // The hint balance lives server-side; seed it from the statistics.
        if let Err(e) = self.tracker.refresh(&self.api).await {
            warn!("Could not refresh statistics before play: {e}");
        }
        let credits = HintCredits::new(
            self.tracker
                .stats()
                .map(|s| *s.hint_credits())
                .unwrap_or_default(),
        );

        let word = loop {
            draw_loading(terminal, "Fetching a word…")?;
            match self
                .api
                .fetch_word(self.settings.level, self.settings.adaptive)
                .await
            {
                Ok(word) => break word,
                Err(e) => {
                    warn!("Word fetch failed: {e}");
                    match prompt_retry(terminal, &format!("Could not fetch a word: {e}")).await? {
                        RetryChoice::Retry => continue,
                        RetryChoice::Menu => return Ok(Some(self.menu_screen())),
                        RetryChoice::Quit => return Ok(None),
                    }
                }
            }
        };

        let session = GameSession::new(word, SessionMode::FreePlay);
        let mut screen = PlayScreen::new(session, credits, self.settings);

        match self.api.fetch_feedback().await {
            Ok(feedback) => screen.set_feedback(feedback),
            Err(e) => debug!("No coaching feedback: {e}"),
        }

        loop {
            terminal.draw(|f| screen.render(f))?;

            if screen.take_due_advance() {
                self.next_round(&mut screen).await;
            }

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match screen.map_key(key) {
                    PlayCommand::Guess(c) => {
                        screen.apply_guess(c);
                        self.finish_round_if_over(&mut screen).await;
                    }
                    PlayCommand::RequestHint => {
                        self.request_hint(&mut screen).await;
                        // A revealed letter can complete the word.
                        self.finish_round_if_over(&mut screen).await;
                    }
                    PlayCommand::NextRound => {
                        self.next_round(&mut screen).await;
                    }
                    PlayCommand::LeaveToMenu => {
                        info!("Leaving free play");
                        return Ok(Some(self.menu_screen()));
                    }
                    PlayCommand::Quit => return Ok(None),
                    PlayCommand::None => {}
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Fetches the next word and swaps the session, or surfaces the failure
    /// on the status line.
    #[instrument(skip(self, screen))]
    async fn next_round(&mut self, screen: &mut PlayScreen) {
        match self
            .api
            .fetch_word(self.settings.level, self.settings.adaptive)
            .await
        {
            Ok(word) => {
                screen.replace_session(GameSession::new(word, SessionMode::FreePlay));
            }
            Err(e) => {
                warn!("Next word fetch failed: {e}");
                screen.set_status(format!(
                    "Could not fetch the next word: {e}. Press Enter to retry."
                ));
            }
        }
    }

    /// Requests a hint from the server and applies the grant.
    #[instrument(skip(self, screen))]
    async fn request_hint(&mut self, screen: &mut PlayScreen) {
        let request = match screen.session().hint_request(screen.credits()) {
            Ok(request) => request,
            Err(e) => {
                debug!("Hint refused locally: {e}");
                screen.set_status(format!("Hint unavailable: {e}."));
                return;
            }
        };
        match self.api.consume_hint(request.word(), request.guessed()).await {
            Ok(grant) => {
                if screen.apply_hint(*request.tag(), grant).is_none() {
                    debug!("Hint grant arrived for a finished session");
                }
            }
            Err(e) => {
                warn!("Hint request failed: {e}");
                screen.set_status(format!("Hint failed: {e}."));
            }
        }
    }

    /// Reports a finished round once and schedules the next one.
    #[instrument(skip(self, screen))]
    async fn finish_round_if_over(&mut self, screen: &mut PlayScreen) {
        let Some(report) = screen.session_mut().take_end_report() else {
            return;
        };
        if *report.won() {
            screen.set_status(format!("Solved! The word was '{}'.", report.word()));
        } else {
            screen.set_status(format!("Out of tries. The word was '{}'.", report.word()));
        }
        if let Err(e) = self.api.log_result(&report).await {
            warn!("Could not log the round: {e}");
        }
        // A logged result can move the hint balance server-side.
        if self.tracker.refresh(&self.api).await.is_ok()
            && let Some(stats) = self.tracker.stats()
        {
            screen.credits_mut().replace(*stats.hint_credits());
        }
        screen.schedule_advance();
    }

    /// Runs the placement exam until it finishes or the player leaves.
    ///
    /// Returns the screen to show next, or `None` to exit the application.
    #[instrument(skip(self, terminal))]
    async fn run_placement<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<Option<ActiveScreen>> {
        info!(username = %self.username, "Starting placement exam");

        let mut flow = loop {
            draw_loading(terminal, "Loading placement questions…")?;
            match PlacementFlow::start(&self.username, &self.api, &self.store).await {
                Ok(flow) => break flow,
                Err(e) => {
                    warn!("Placement start failed: {e}");
                    let message = format!("Could not start the placement exam: {e}");
                    match prompt_retry(terminal, &message).await? {
                        RetryChoice::Retry => continue,
                        RetryChoice::Menu => return Ok(Some(self.menu_screen())),
                        RetryChoice::Quit => return Ok(None),
                    }
                }
            }
        };

        let mut screen = PlacementScreen::new(flow.progress());
        if flow.is_complete() {
            // A resumed attempt can already cover every question.
            self.submit_placement(&mut flow, &mut screen, terminal).await?;
        } else {
            hand_over_question(&flow, &mut screen);
        }

        loop {
            terminal.draw(|f| screen.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match screen.map_key(key) {
                    PlacementCommand::Guess(c) => {
                        screen.apply_guess(c);
                        self.finish_placement_round(&mut flow, &mut screen).await;
                    }
                    PlacementCommand::Acknowledge => {
                        if screen.is_done() {
                            return Ok(Some(self.menu_screen()));
                        }
                        if flow.is_complete() {
                            self.submit_placement(&mut flow, &mut screen, terminal).await?;
                        } else {
                            hand_over_question(&flow, &mut screen);
                        }
                    }
                    PlacementCommand::LeaveToMenu => {
                        info!("Leaving placement; progress is saved");
                        return Ok(Some(self.menu_screen()));
                    }
                    PlacementCommand::Quit => return Ok(None),
                    PlacementCommand::None => {}
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Records a finished placement question, logs it, and shows the result.
    #[instrument(skip(self, flow, screen))]
    async fn finish_placement_round(
        &mut self,
        flow: &mut PlacementFlow,
        screen: &mut PlacementScreen,
    ) {
        let Some(report) = screen.session_mut().and_then(GameSession::take_end_report) else {
            return;
        };
        // Persist the answer before anything slower can fail.
        if let Err(e) = flow.record_result(*report.won(), &self.store) {
            warn!("Could not persist placement progress: {e}");
        }
        if let Err(e) = self.api.log_result(&report).await {
            warn!("Could not log the round: {e}");
        }
        screen.show_result(&report, flow.progress());
    }

    /// Submits the completed exam and reflects the result on the screen.
    #[instrument(skip(self, flow, screen, terminal))]
    async fn submit_placement<B: Backend>(
        &mut self,
        flow: &mut PlacementFlow,
        screen: &mut PlacementScreen,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        screen.set_submitting(flow.progress());
        terminal.draw(|f| screen.render(f))?;
        match flow.submit(&self.api, &self.store).await {
            Ok(level) => {
                // Free play picks up the assigned level right away.
                self.settings.level = level;
                screen.show_done(level);
            }
            Err(e) => screen.show_submit_error(&e),
        }
        Ok(())
    }
}

/// Hands the flow's current question to the screen as a fresh session.
fn hand_over_question(flow: &PlacementFlow, screen: &mut PlacementScreen) {
    if let Some(word) = flow.current_question() {
        screen.begin_question(
            GameSession::new(word.clone(), SessionMode::Placement),
            flow.progress(),
        );
    }
}

/// Draws a full-screen notice while a fetch is in flight.
fn draw_loading<B: Backend>(terminal: &mut Terminal<B>, message: &str) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let paragraph = Paragraph::new(message.to_string())
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Wortspiel"));
        f.render_widget(paragraph, f.area());
    })?;
    Ok(())
}

/// Blocks on a connection-failure prompt until the player picks an option.
#[instrument(skip(terminal))]
async fn prompt_retry<B: Backend>(
    terminal: &mut Terminal<B>,
    message: &str,
) -> anyhow::Result<RetryChoice> {
    loop {
        terminal.draw(|f| {
            let text = format!("{message}\n\nr: Retry | Esc: Back to menu | q: Quit");
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Connection Problem"),
                );
            f.render_widget(paragraph, f.area());
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => return Ok(RetryChoice::Retry),
                KeyCode::Esc => return Ok(RetryChoice::Menu),
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(RetryChoice::Quit),
                _ => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}
