//! Orb Arena headless driver
//!
//! Plays one match with a scripted local agent and prints the outcome as JSON.
//! Usage: `orb-arena [seed] [timeboxed|extended]`

mod headless {
    use glam::Vec2;

    use orb_arena::consts::*;
    use orb_arena::sim::{Catalog, MatchOutcome, MatchRunner, MatchSnapshot};
    use orb_arena::{ConfigError, MatchMode, MatchSettings};

    const DEFAULT_SEED: u64 = 42;
    /// Frames before giving up; the countdown ends a match well before this
    const MAX_FRAMES: u32 = 10 * 60 * 60;

    /// Optional seed and scoring mode from the command line
    pub fn settings_from_args() -> MatchSettings {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring non-numeric seed {:?}, using {}", arg, DEFAULT_SEED);
                DEFAULT_SEED
            }),
            None => DEFAULT_SEED,
        };
        let mode = match args.next() {
            Some(arg) => MatchMode::from_str(&arg).unwrap_or_else(|| {
                log::warn!("Unknown mode {:?}, using {}", arg, MatchMode::default().as_str());
                MatchMode::default()
            }),
            None => MatchMode::default(),
        };
        MatchSettings {
            mode,
            ..MatchSettings::with_seed(seed)
        }
    }

    /// Head for the target pillar while the local agent has the orb, otherwise
    /// for whoever carries it
    fn steer(snapshot: &MatchSnapshot, me: Vec2, has_orb: bool) -> Vec2 {
        let goal = if has_orb {
            snapshot
                .pillars
                .iter()
                .find(|p| p.is_target)
                .map(|p| Vec2::new(p.x, p.y))
        } else {
            snapshot.orb_holder().map(|a| Vec2::new(a.x, a.y))
        };
        goal.map_or(Vec2::ZERO, |g| (g - me).normalize_or_zero())
    }

    /// Closest live rival, used as the aim point for every ability slot
    fn nearest_rival(snapshot: &MatchSnapshot, me: Vec2) -> Option<Vec2> {
        snapshot
            .agents
            .iter()
            .filter(|a| !a.is_local && !a.is_dead)
            .map(|a| Vec2::new(a.x, a.y))
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
    }

    pub fn run(settings: MatchSettings) -> Result<Option<MatchOutcome>, ConfigError> {
        let mut runner = MatchRunner::new(settings, Catalog::standard())?;

        for _ in 0..MAX_FRAMES {
            let snapshot = runner.snapshot();
            let Some(me) = snapshot.local() else {
                break;
            };
            let pos = Vec2::new(me.x, me.y);

            runner.set_movement(steer(&snapshot, pos, me.has_orb));
            if let Some(aim) = nearest_rival(&snapshot, pos) {
                for slot in 0..3 {
                    runner.request_ability(slot, aim);
                }
            }

            if let Some(outcome) = runner.advance(SIM_DT) {
                return Ok(Some(outcome));
            }
        }

        runner.teardown();
        Ok(runner.outcome())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        eprintln!("Logger init failed: {}", e);
    }
}

fn main() {
    init_logging();
    let settings = headless::settings_from_args();
    log::info!(
        "Orb Arena (headless) starting with seed {} ({})",
        settings.seed,
        settings.mode.as_str()
    );

    match headless::run(settings) {
        Ok(Some(outcome)) => match outcome.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not encode outcome: {}", e),
        },
        Ok(None) => log::warn!("Match did not finish"),
        Err(e) => {
            log::error!("Invalid match settings: {}", e);
            std::process::exit(1);
        }
    }
}
