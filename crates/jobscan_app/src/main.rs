mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jobscan_app::app::Session;
use jobscan_app::config::AppConfig;
use jobscan_app::effects::EffectRunner;
use jobscan_app::logging::{self, LogDestination};
use jobscan_app::persistence::{edit_keywords, load_keywords, open_keyword_store};
use jobscan_app::ui::render::render;
use jobscan_core::{AppState, Msg};
use jobscan_engine::{BrowserTabs, EngineHandle, JsonFileStore, KeywordStore, ReqwestFetcher};
use jobscan_logging::scan_info;
use log::LevelFilter;

use crate::cli::{Cli, Commands, KeywordAction};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(LogDestination::from_log_file(log_file), level);

    let store = open_keyword_store(&config.store_path);
    match cli.command {
        Commands::Keywords { action } => manage_keywords(&store, action),
        Commands::Check { url } => {
            let mut session = build_session(&config, store)?;
            let view = session.check_once(&url).await;
            for line in render(&view) {
                println!("{line}");
            }
            Ok(if view.error.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Watch { url } => {
            let mut session = build_session(&config, store)?;
            if let Some(url) = url {
                session.tabs().open(url);
            }
            if !config.auto_check {
                session.dispatch(Msg::AutoCheckToggled(false));
            }
            session.start();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin, &mut std::io::stdout()).await?;
            scan_info!("Session closed");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_session(
    config: &AppConfig,
    store: KeywordStore<JsonFileStore>,
) -> anyhow::Result<Session<JsonFileStore>> {
    let fetcher = ReqwestFetcher::new(config.fetch_settings()).context("http client setup")?;
    let tabs = Arc::new(BrowserTabs::new(Arc::new(fetcher)));
    let (engine, events) = EngineHandle::new(tabs.clone(), &config.engine_settings())
        .context("invalid engine settings")?;
    let state = AppState::with_delays(config.debounce_delays());
    Ok(Session::new(
        state,
        EffectRunner::new(engine, store),
        tabs,
        events,
    ))
}

fn manage_keywords(
    store: &KeywordStore<JsonFileStore>,
    action: KeywordAction,
) -> anyhow::Result<ExitCode> {
    let keywords = match action {
        KeywordAction::List => load_keywords(store),
        KeywordAction::Add { keywords } => edit_keywords(store, |list| {
            keywords.iter().fold(false, |changed, kw| list.add(kw) || changed)
        })?,
        KeywordAction::Remove { keywords } => edit_keywords(store, |list| {
            keywords.iter().fold(false, |changed, kw| list.remove(kw) || changed)
        })?,
    };
    if keywords.is_empty() {
        println!("No keywords.");
    }
    for keyword in keywords.iter() {
        println!("{keyword}");
    }
    Ok(ExitCode::SUCCESS)
}
