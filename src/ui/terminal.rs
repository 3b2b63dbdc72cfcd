use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::info;

use super::{view, Focus};
use crate::checker::TradeChecker;
use crate::client::TradeScorer;
use crate::notify::Notice;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Terminal host for the trade checker: turns key presses into checker
/// calls and shows notices as a modal alert.
pub struct TerminalApp<S> {
    checker: TradeChecker<S, mpsc::UnboundedSender<Notice>>,
    notices: mpsc::UnboundedReceiver<Notice>,
    alert: Option<Notice>,
    focus: Focus,
}

impl<S: TradeScorer> TerminalApp<S> {
    pub fn new(scorer: Arc<S>) -> Self {
        let (notice_tx, notices) = mpsc::unbounded_channel();
        Self {
            checker: TradeChecker::new(scorer, notice_tx),
            notices,
            alert: None,
            focus: Focus::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal).await;
        ratatui::restore();
        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut input_tick = tokio::time::interval(INPUT_POLL);
        terminal.draw(|frame| self.draw(frame))?;
        loop {
            tokio::select! {
                _ = input_tick.tick() => {
                    match self.poll_input()? {
                        Flow::Quit => {
                            info!("👋 Leaving trade checker");
                            return Ok(());
                        }
                        Flow::Redraw => {
                            terminal.draw(|frame| self.draw(frame))?;
                        }
                        Flow::Continue => {}
                    }
                }
                Some(completion) = self.checker.next_completion() => {
                    self.checker.complete(completion);
                    self.take_notice();
                    terminal.draw(|frame| self.draw(frame))?;
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        view::render(frame, self.checker.state(), self.focus, self.alert.as_ref());
    }

    fn poll_input(&mut self) -> Result<Flow> {
        let mut flow = Flow::Continue;
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.handle_key(key) {
                        Flow::Quit => return Ok(Flow::Quit),
                        Flow::Redraw => flow = Flow::Redraw,
                        Flow::Continue => {}
                    }
                }
                Event::Resize(_, _) => flow = Flow::Redraw,
                _ => {}
            }
        }
        Ok(flow)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        // Alerts block the form until acknowledged
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
                self.checker.dismiss();
                self.take_notice();
                return Flow::Redraw;
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => {
                self.checker.submit();
            }
            KeyCode::Char(' ') if self.focus == Focus::Submit => {
                self.checker.submit();
            }
            KeyCode::Char(c) => self.edit_focused(|value| value.push(c)),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            _ => return Flow::Continue,
        }
        self.take_notice();
        Flow::Redraw
    }

    fn edit_focused(&mut self, apply: impl FnOnce(&mut String)) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let mut value = self.checker.state().form.value(field).to_string();
        apply(&mut value);
        self.checker.edit(field, value);
    }

    fn take_notice(&mut self) {
        if self.alert.is_none() {
            if let Ok(notice) = self.notices.try_recv() {
                self.alert = Some(notice);
            }
        }
    }
}
