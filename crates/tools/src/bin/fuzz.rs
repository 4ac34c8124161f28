use anyhow::{Result, bail, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use zero_hour_core::content::resolve_turn_or_fallback;
use zero_hour_core::content::scripted::ScriptedSource;
use zero_hour_core::state::MAX_HEALTH;
use zero_hour_core::{HealthStatus, Phase, PlayerAction, Session};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20_000)]
    frames: u32,
    /// Chance per combat frame of pulling the trigger, in percent
    #[arg(long, default_value_t = 30)]
    trigger_percent: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} frames...", args.seed, args.frames);
    let source = ScriptedSource::new(args.seed);
    let mut session = Session::new(args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let boot = session.boot();
    session.resolve_scene(boot.ticket, false);

    let mut turns = 0u32;
    let mut shots = 0u32;
    for frame in 0..args.frames {
        match session.phase() {
            Phase::Exploring => {
                let request = session.submit_action(choose(&mut rng, &PlayerAction::ALL))?;
                let response = resolve_turn_or_fallback(&source, &request.action, &request.context);
                session.apply_turn(request.ticket, response);
                turns += 1;
            }
            Phase::InCombat if rng.next_u32() % 100 < args.trigger_percent => {
                let target = session.enemies().and_then(|enemies| {
                    let ids: Vec<_> = enemies.keys().collect();
                    (!ids.is_empty()).then(|| choose(&mut rng, &ids))
                });
                let ammo_before = session.player().ammo;
                let outcome = session.fire(target)?;
                let spent = ammo_before - session.player().ammo;
                ensure!(
                    spent == u32::from(outcome.consumed_ammo()),
                    "Invariant failed: fire spent {spent} rounds for {outcome:?} at frame {frame}"
                );
                shots += 1;
            }
            Phase::InCombat => {}
            Phase::Loading => {
                bail!("Invariant failed: stuck loading at frame {frame}");
            }
            Phase::GameOver => {
                println!(
                    "Died at frame {frame} in {} after {turns} turns, {shots} shots, {} areas cleared",
                    session.player().location,
                    session.encounters_cleared()
                );
                break;
            }
        }

        session.frame(16.0);

        let player = session.player();
        ensure!(player.health() <= MAX_HEALTH, "Invariant failed: health above max");
        ensure!(
            player.status() == HealthStatus::for_health(player.health()),
            "Invariant failed: status out of sync with health"
        );
        if let Some(enemies) = session.enemies() {
            for enemy in enemies.values() {
                ensure!(enemy.hp > 0, "Invariant failed: dead enemy still in the set");
                ensure!(enemy.scale < 1.5, "Invariant failed: enemy past the attack threshold");
            }
        }
    }

    println!(
        "Fuzz finished: phase {:?}, {turns} turns, {shots} shots, health {}, ammo {}",
        session.phase(),
        session.player().health(),
        session.player().ammo
    );
    Ok(())
}
