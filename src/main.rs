use anyhow::{Context, Result};
use clap::Parser;
use monster_tower::species::SpeciesCard;
use monster_tower::{
    spawn_team, Battle, BattleTower, EffectivenessTable, Element, GameState, SpeciesTable,
    TowerConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "monster-tower",
    version,
    about = "Runs a monster battle tower to completion"
)]
struct Cli {
    /// Path to a RON tower config
    config: Option<PathBuf>,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured verbosity (1 prints battle events, 2 adds
    /// tower progress, 3 adds engine debug output)
    #[arg(short, long)]
    verbosity: Option<u8>,

    /// Print the species roster and exit
    #[arg(long)]
    list_species: bool,
}

#[derive(Serialize)]
struct BattleSummary {
    battle: usize,
    result: GameState,
    turns: u32,
    player_team: String,
    enemy_team: String,
    player_lives: u32,
    enemy_lives: u32,
}

#[derive(Serialize)]
struct TowerSummary {
    seed: u64,
    battles: Vec<BattleSummary>,
    player_lives: u32,
    out_of_meta: Vec<Element>,
}

// `log` records are forwarded into the subscriber by its `tracing-log` bridge.
// RUST_LOG overrides the configured level when set.
fn init_logging(level: log::LevelFilter) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
    let initialised = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if initialised.is_err() {
        log::warn!("a global logger was already installed");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TowerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TowerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(verbosity) = cli.verbosity {
        config.verbosity = verbosity;
    }
    config.validate().context("Invalid tower config")?;
    init_logging(config.log_level());

    let loaded_species;
    let species = match &config.species_path {
        Some(path) => {
            loaded_species = SpeciesTable::load(path)
                .with_context(|| format!("Failed to load species {}", path.display()))?;
            &loaded_species
        }
        None => SpeciesTable::builtin(),
    };
    let loaded_effectiveness;
    let effectiveness = match &config.effectiveness_path {
        Some(path) => {
            loaded_effectiveness = EffectivenessTable::load(path)
                .with_context(|| format!("Failed to load effectiveness {}", path.display()))?;
            &loaded_effectiveness
        }
        None => EffectivenessTable::builtin(),
    };

    if cli.list_species {
        for data in species.iter() {
            println!("{}\n", SpeciesCard(data));
        }
        return Ok(());
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let player = spawn_team(
        config.player.options(),
        &config.player.selection,
        species,
        &mut rng,
    )
    .context("Failed to build the player team")?;

    let battle = Battle::new(species, effectiveness).with_verbosity(config.verbosity);
    let mut tower = BattleTower::new(battle, rng)
        .with_lives_range(config.min_lives, config.max_lives)?
        .with_enemy_options(config.enemy.options());
    let lives = tower.set_my_team(player);
    tower.generate_teams(config.enemy_teams)?;

    if config.verbosity > 0 {
        if let Some(team) = tower.player_team() {
            println!("Player: {} with {} lives", team, lives);
        }
        for (position, entry) in tower.enemies().enumerate() {
            println!("Enemy {}: {} with {} lives", position + 1, entry.team, entry.lives);
        }
    }

    let mut battles = Vec::new();
    while let Some(outcome) = tower.next_battle()? {
        let number = battles.len() + 1;
        if config.verbosity > 0 {
            outcome
                .report
                .events
                .print_formatted_with_message(&format!("--- Battle {} ---", number));
        }
        battles.push(BattleSummary {
            battle: number,
            result: outcome.result,
            turns: outcome.report.turns,
            player_team: outcome.player_team.to_string(),
            enemy_team: outcome.enemy_team.to_string(),
            player_lives: outcome.player_lives,
            enemy_lives: outcome.enemy_lives,
        });
    }

    let summary = TowerSummary {
        seed: config.seed,
        battles,
        player_lives: tower.player_lives(),
        out_of_meta: tower.out_of_meta(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
