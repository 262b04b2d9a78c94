//! Squish Ball entry point
//!
//! Drops a few balls from seeded heights and prints their motion tick by
//! tick until everything rests on the ground.
//!
//! Usage: `squish-ball [settings.json]` (set `RUST_LOG` for log output)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Squish Ball starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("squish-ball: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native host on wasm; embed the library instead
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> squish_ball::Result<()> {
    use squish_ball::sim::{LogObserver, PhaseObserver};
    use squish_ball::{Scene, Settings};

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path)?,
        None => Settings::default(),
    };

    let mut scene = Scene::new(settings.physics)?;
    let run = &settings.run;
    scene.scatter(
        run.ball_count,
        run.seed,
        run.spread,
        run.min_height,
        run.max_height,
    )?;

    for _ in 0..run.ticks {
        if settings.trace_phases {
            scene.tick_with(|id, step| LogObserver::for_object(id).on_step(step));
        } else {
            scene.tick();
        }

        for object in scene.objects() {
            if let Some(record) = scene.record(object.id) {
                println!(
                    "t={:6.2} ball={} phase={:<8} height={:8.4} speed={:8.4} energy={:8.4}",
                    scene.time(),
                    object.id,
                    record.phase,
                    record.state.height,
                    record.state.vertical_speed,
                    record.state.stored_energy,
                );
            }
        }

        if scene.all_resting() {
            println!("All balls at rest after {:.1}s", scene.time());
            return Ok(());
        }
    }

    log::warn!(
        "Stopped after {} ticks with balls still moving",
        scene.time_ticks()
    );
    Ok(())
}
