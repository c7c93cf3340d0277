//! Terminal battle client.
//!
//! Loads an encounter, runs it with the champion's turns read from stdin and
//! prints the final report as JSON.
//!
//! # Environment
//!
//! - `BATTLE_ENCOUNTER` - encounter RON file
//! - `BATTLE_SKILLS` - skill catalog RON file
//! - `BATTLE_CONFIG` - battle tunables TOML file
//! - `BATTLE_SEED` - RNG seed for a reproducible battle
//! - `RUST_LOG` - log filter (logs go to stderr)
mod config;
mod input;
mod presenter;

use std::collections::HashMap;

use anyhow::Result;
use game_content::{ConfigLoader, EncounterLoader, SkillLoader};
use game_core::{ActionMenu, BattleConfig, BattleOutcome};
use runtime::{Battle, BattleEvent, BattleHandle, Event, PromptEvent, Topic};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use config::CliConfig;
use input::{PlayerInput, parse_input};
use presenter::Presenter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::debug!(?config, "loaded cli config");

    let catalog = SkillLoader::load(&config.skills)?;
    let encounter = EncounterLoader::load(&config.encounter, &catalog)?;
    let battle_config = match &config.battle_config {
        Some(path) => ConfigLoader::load(path)?,
        None => BattleConfig::default(),
    };
    tracing::info!(
        skills = catalog.len(),
        hostiles = encounter.hostiles.len(),
        "content loaded"
    );

    let mut builder = Battle::builder()
        .battle_config(battle_config)
        .hostiles(encounter.hostiles);
    for player in encounter.players {
        builder = builder.player(player);
    }
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let mut battle = builder.build()?;

    let names: HashMap<_, _> = battle
        .state()
        .combatants()
        .map(|c| (c.id, c.name.clone()))
        .collect();
    let presenter = Presenter::new(names);
    // Subscribe before the battle starts so the first prompt is not missed.
    let handle = battle.handle();
    let feeds = Feeds::subscribe(&handle);
    let console_task = tokio::spawn(console(handle, feeds, presenter));

    let report = match battle.run().await {
        Ok(report) => report,
        Err(err) => {
            console_task.abort();
            return Err(err.into());
        }
    };
    if let Err(err) = console_task.await {
        tracing::warn!(error = %err, "console task failed");
    }

    println!("{}", report.to_json()?);
    Ok(())
}

/// One receiver per topic the console shows.
struct Feeds {
    battle: broadcast::Receiver<Event>,
    turn: broadcast::Receiver<Event>,
    action: broadcast::Receiver<Event>,
    prompt: broadcast::Receiver<Event>,
}

impl Feeds {
    fn drain(&mut self) -> Vec<Event> {
        let mut queued = Vec::new();
        for rx in [&mut self.turn, &mut self.action] {
            while let Ok(event) = rx.try_recv() {
                queued.push(event);
            }
        }
        queued
    }

    fn subscribe(handle: &BattleHandle) -> Self {
        Self {
            battle: handle.subscribe(Topic::Battle),
            turn: handle.subscribe(Topic::Turn),
            action: handle.subscribe(Topic::Action),
            prompt: handle.subscribe(Topic::Prompt),
        }
    }
}

/// Prints events and answers prompts from stdin.
///
/// Prompts are only handled once the other topics are drained, so the menu
/// always follows the turn it belongs to.
async fn console(handle: BattleHandle, mut feeds: Feeds, presenter: Presenter) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let event = tokio::select! {
            biased;
            event = recv(&mut feeds.battle) => event,
            event = recv(&mut feeds.turn) => event,
            event = recv(&mut feeds.action) => event,
            event = recv(&mut feeds.prompt) => event,
        };
        let Some(event) = event else {
            return;
        };

        if let Event::Battle(BattleEvent::Ended { .. }) = event {
            // The last action is still queued behind the end notice.
            for queued in feeds.drain() {
                show(&presenter, &queued);
            }
            show(&presenter, &event);
            return;
        }
        show(&presenter, &event);

        if let Event::Prompt(PromptEvent::AwaitingDecision { menu, .. }) = event
            && let Err(err) = answer(&handle, &menu, &mut lines).await
        {
            tracing::error!(error = %err, "input failed, retreating");
            if handle.force_end(BattleOutcome::PlayerDefeat).await.is_err() {
                return;
            }
        }
    }
}

fn show(presenter: &Presenter, event: &Event) {
    if let Some(line) = presenter.describe(event) {
        println!("{line}");
    }
}

/// Reads lines until one parses, then hands it to the battle.
async fn answer<R>(
    handle: &BattleHandle,
    menu: &ActionMenu,
    lines: &mut tokio::io::Lines<R>,
) -> Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        let Some(line) = lines.next_line().await? else {
            // stdin closed: nobody can answer, so the champion retreats.
            handle.force_end(BattleOutcome::PlayerDefeat).await?;
            return Ok(());
        };
        match parse_input(&line, menu) {
            Ok(PlayerInput::Decide(decision)) => {
                handle.submit_decision(decision).await?;
                return Ok(());
            }
            Ok(PlayerInput::Retreat) => {
                handle.force_end(BattleOutcome::PlayerDefeat).await?;
                return Ok(());
            }
            Err(err) => println!("{err}. Try again:"),
        }
    }
}

/// Receives the next event, skipping over lag; `None` once the bus is gone.
async fn recv(rx: &mut broadcast::Receiver<Event>) -> Option<Event> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "console fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
