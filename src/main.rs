//! Headless pattern driver
//!
//! Runs a pattern set without a window, feeding frame times through the fixed
//! clock the same way a render loop would.
//!
//! Usage: `danmaku-sim [settings.json] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use std::error::Error;

    use danmaku_core::consts::SIM_DT;
    use danmaku_core::cube::CubeModel;
    use danmaku_core::sim::{Hitbox, PatternCommand, SimState, TickInput, tick};
    use danmaku_core::{FixedClock, Settings};
    use glam::DVec2;

    const DEFAULT_TICKS: u64 = 600;
    /// Scripted "key press" cadence: one pattern toggle every two seconds
    const TOGGLE_EVERY: u64 = 120;
    const TICKS_PER_SECOND: u64 = 60;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };
        let ticks: u64 = match args.next() {
            Some(raw) => raw.parse()?,
            None => DEFAULT_TICKS,
        };

        let mut state = SimState::new(&settings)?;
        let toggle_order: Vec<String> = settings
            .toggle_order()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut clock = FixedClock::default();
        let mut cube = CubeModel::default();
        let field = settings.playfield;
        let hitbox = Hitbox::circle(DVec2::new(field.width / 2.0, field.height * 0.85), 3.0);

        log::info!("Running {} ticks", ticks);

        let mut frame: u64 = 0;
        let mut next_toggle = 0usize;
        while state.time_ticks < ticks {
            // Uneven frame pacing, like a real display loop
            let elapsed = SIM_DT * if frame % 5 == 0 { 1.5 } else { 0.9 };
            frame += 1;
            cube.update(elapsed);

            for _ in 0..clock.advance(elapsed) {
                if state.time_ticks >= ticks {
                    break;
                }
                let t = state.time_ticks as f64 * SIM_DT;
                let player = hitbox.center() + DVec2::new((t * 0.8).sin() * field.width * 0.3, 0.0);
                let mut input = TickInput::with_hitbox(hitbox.with_center(player));

                if state.time_ticks > 0
                    && state.time_ticks % TOGGLE_EVERY == 0
                    && !toggle_order.is_empty()
                {
                    let name = toggle_order[next_toggle % toggle_order.len()].clone();
                    next_toggle += 1;
                    log::info!("Toggling `{}`", name);
                    input.commands.push(PatternCommand::Toggle(name));
                }

                tick(&mut state, &input);

                if state.time_ticks % TICKS_PER_SECOND == 0 {
                    let active: Vec<&str> = state
                        .patterns
                        .names()
                        .filter(|n| state.patterns.is_enabled(n))
                        .collect();
                    log::info!(
                        "t={}s tick={} live={} hits={} active={:?} cube={:.1}",
                        state.time_ticks / TICKS_PER_SECOND,
                        state.time_ticks,
                        state.live_count(),
                        state.hit_ticks,
                        active,
                        cube.half_size(clock.total_ticks() as f64 * SIM_DT),
                    );
                }
            }
        }

        let snapshot = state.snapshot();
        log::info!(
            "Finished after {} frames: {} live, {} hit ticks",
            frame,
            snapshot.live_count,
            state.hit_ticks
        );
        println!("{}", serde_json::to_string(&snapshot)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Danmaku (headless) starting...");

    if let Err(e) = driver::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
