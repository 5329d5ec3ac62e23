use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use jobscan_core::{update, AppState, AppViewModel, Msg, Phase};
use jobscan_engine::{BrowserTabs, EngineEvent, KeyValueStore};
use jobscan_logging::{scan_debug, scan_info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::effects::{map_engine_event, EffectRunner};
use crate::ui::input::{parse_command, Command, HELP};
use crate::ui::render::render;

/// One controller instance: the state, its effect runner and the tab strip it watches.
pub struct Session<S> {
    state: AppState,
    runner: EffectRunner<S>,
    tabs: Arc<BrowserTabs>,
    events: mpsc::UnboundedReceiver<EngineEvent>,
}

enum Wake {
    Line(std::io::Result<Option<String>>),
    Msg(Msg),
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(
        state: AppState,
        runner: EffectRunner<S>,
        tabs: Arc<BrowserTabs>,
        events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> Self {
        Self {
            state,
            runner,
            tabs,
            events,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tabs(&self) -> &BrowserTabs {
        &self.tabs
    }

    pub fn runner(&self) -> &EffectRunner<S> {
        &self.runner
    }

    /// Restores the persisted keywords and opens the panel.
    pub fn start(&mut self) -> Option<AppViewModel> {
        self.restore_keywords();
        self.dispatch(Msg::Started)
    }

    fn restore_keywords(&mut self) {
        let keywords = self.runner.store().load();
        scan_info!("Restored {} keywords", keywords.len());
        self.dispatch(Msg::RestoreKeywords(keywords));
    }

    /// Applies `msg`, runs the resulting effects and returns the view if it changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        was_dirty.then_some(view)
    }

    fn apply(&mut self, msg: Msg, view: &mut Option<AppViewModel>) {
        if let Some(next) = self.dispatch(msg) {
            *view = Some(next);
        }
    }

    /// True when no check is running and no debounced check is pending.
    pub fn is_settled(&self) -> bool {
        !matches!(self.state.phase(), Phase::Checking { .. }) && self.state.next_deadline().is_none()
    }

    /// Executes one console command and returns the lines to print.
    pub fn handle_command(&mut self, command: Command) -> Vec<String> {
        let now = Instant::now();
        let mut output = Vec::new();
        let mut view = None;

        match command {
            Command::Open(url) => {
                let tab = self.tabs.open(url);
                output.push(format!("Tab {} opened: {}", tab.id, tab.url));
                self.apply(Msg::TabActivated { at: now }, &mut view);
                self.apply(Msg::TabLoadComplete { at: now }, &mut view);
            }
            Command::Navigate(url) => {
                let tab = self.tabs.navigate(url);
                output.push(format!("Tab {} loaded: {}", tab.id, tab.url));
                self.apply(Msg::TabLoadComplete { at: now }, &mut view);
            }
            Command::Switch(id) => match self.tabs.activate(id) {
                Some(tab) => {
                    output.push(format!("Tab {} active: {}", tab.id, tab.url));
                    self.apply(Msg::TabActivated { at: now }, &mut view);
                }
                None => output.push(format!("No tab {id}")),
            },
            Command::Close(id) => {
                if self.tabs.close(id) {
                    output.push(format!("Tab {id} closed"));
                    self.apply(Msg::TabActivated { at: now }, &mut view);
                } else {
                    output.push(format!("No tab {id}"));
                }
            }
            Command::Tabs => {
                let active = self.tabs.active().map(|t| t.id);
                let tabs = self.tabs.tabs();
                if tabs.is_empty() {
                    output.push("No open tabs".to_string());
                }
                for tab in tabs {
                    let marker = if Some(tab.id) == active { '*' } else { ' ' };
                    output.push(format!("{marker} {} {}", tab.id, tab.url));
                }
            }
            Command::Add(keyword) => {
                self.apply(Msg::KeywordInputChanged(keyword), &mut view);
                self.apply(Msg::AddKeywordClicked, &mut view);
            }
            Command::Remove(keyword) => self.apply(Msg::RemoveKeywordClicked(keyword), &mut view),
            Command::Check => self.apply(Msg::CheckClicked, &mut view),
            Command::Auto(enabled) => self.apply(Msg::AutoCheckToggled(enabled), &mut view),
            Command::List => view = Some(self.state.view()),
            Command::Help => output.extend(HELP.lines().map(str::to_string)),
            Command::Quit => {}
        }

        if let Some(view) = view {
            output.extend(render(&view));
        }
        output
    }

    /// Opens `url` and checks it once, with automatic re-checks off.
    pub async fn check_once(&mut self, url: &str) -> AppViewModel {
        self.restore_keywords();
        self.dispatch(Msg::AutoCheckToggled(false));
        self.tabs.open(url);
        self.dispatch(Msg::CheckClicked);
        while matches!(self.state.phase(), Phase::Checking { .. }) {
            match self.events.recv().await {
                Some(event) => {
                    self.dispatch(map_engine_event(event));
                }
                None => break,
            }
        }
        self.state.view()
    }

    /// Console loop. After end of input it keeps running until the session settles.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;
        write_lines(out, &render(&self.state.view()))?;

        loop {
            if !input_open && self.is_settled() {
                scan_debug!("Input closed and session settled");
                break;
            }
            let deadline = self.state.next_deadline();
            let due = deadline.unwrap_or_else(Instant::now);

            let wake = tokio::select! {
                line = lines.next_line(), if input_open => Wake::Line(line),
                Some(event) = self.events.recv() => Wake::Msg(map_engine_event(event)),
                msg = self.runner.next_content_change() => Wake::Msg(msg),
                _ = tokio::time::sleep_until(due.into()), if deadline.is_some() => {
                    // tokio's clock may resolve slightly ahead of std's.
                    Wake::Msg(Msg::Tick { now: Instant::now().max(due) })
                }
            };

            match wake {
                Wake::Line(line) => match line? {
                    Some(line) => match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => write_lines(out, &self.handle_command(command))?,
                        Ok(None) => {}
                        Err(err) => writeln!(out, "{err}")?,
                    },
                    None => input_open = false,
                },
                Wake::Msg(msg) => {
                    if let Some(view) = self.dispatch(msg) {
                        write_lines(out, &render(&view))?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
