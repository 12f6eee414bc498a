//! Headless session: play the demo level for a fixed number of turns and
//! print what happened.
use anyhow::Result;
use tracing::{info, warn};

use delve_core::{EntityId, GameState, MessageLog, World};
use delve_runtime::{ContentOracles, TurnRunner};

use crate::config::CliConfig;
use crate::scenario::{self, PlayerScript};

pub fn run(config: &CliConfig) -> Result<()> {
    let oracles = match &config.config_path {
        Some(path) => ContentOracles::with_config_file(path)?,
        None => ContentOracles::load_embedded()?,
    };
    info!(
        items = oracles.items().item_count(),
        recipes = oracles.items().recipe_count(),
        seed = config.seed,
        "content loaded"
    );

    let mut state = scenario::demo_level(oracles.config())?;
    let mut runner = TurnRunner::new(config.seed);
    let mut script = PlayerScript::demo();
    let mut log = MessageLog::with_capacity(config.message_capacity);

    for _ in 0..config.turns {
        let mut world = World::new(&mut state, oracles.game_env()).with_narrator(&mut log);
        let turn = world.turn_number();
        let busy = runner.manager().is_busy(EntityId::PLAYER);

        if let Err(error) = runner.play_turn(script.next_request(busy), &mut world) {
            if !error.is_recoverable() {
                return Err(error.into());
            }
            warn!(turn, %error, "hero request refused; passing the turn");
            runner.play_turn(None, &mut world)?;
        }
        drop(world);

        for message in log.drain() {
            println!("[turn {turn:>3}] {message}");
        }
        if state.entities.living_player().is_none() {
            println!("[turn {turn:>3}] The hero has fallen.");
            break;
        }
    }

    print_epilogue(&state, &runner);
    Ok(())
}

fn print_epilogue(state: &GameState, runner: &TurnRunner) {
    let summary = runner.manager().summary();
    println!();
    println!("After {} turns:", state.turn.turn_number - 1);
    if let Some(hero) = state.entities.actor(EntityId::PLAYER) {
        println!(
            "  {} at {} with {}/{} HP, {} items carried",
            hero.name,
            hero.position,
            hero.hp.current,
            hero.hp.maximum,
            hero.inventory.items.len()
        );
    }
    for id in state.entities.npc_ids() {
        if let Some(npc) = state.entities.actor(id) {
            let mode = npc
                .roaming
                .map(|roaming| roaming.sub_state.to_string())
                .unwrap_or_else(|| "idle".into());
            println!("  {} {} at {} ({mode})", npc.name, npc.id, npc.position);
        }
    }
    println!(
        "  activities in flight: {} running, {} paused",
        summary.running, summary.paused
    );
}
