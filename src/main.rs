//! Wandering Worm headless driver
//!
//! Runs the worm on a real timer for a fixed number of ticks, logging the
//! head as it goes. Useful for eyeballing the walk without a UI host.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::sync::mpsc::{self, RecvTimeoutError};
    use std::time::Duration;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use wandering_worm::scheduler::ThreadScheduler;
    use wandering_worm::sim::{Segment, SeededTurns, WormSimulator};
    use wandering_worm::{WormConfig, WormController};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Wandering worm simulation", long_about = None)]
    struct Args {
        /// JSON config file (missing fields use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed for turns and leg lengths
        #[arg(short, long, default_value_t = 2020)]
        seed: u64,

        /// Field width in pixels
        #[arg(long, default_value_t = 390.0)]
        width: f32,

        /// Field height in pixels
        #[arg(long, default_value_t = 760.0)]
        height: f32,

        /// Ticks to run before stopping
        #[arg(short, long, default_value_t = 200)]
        ticks: u64,

        /// Swap width and height after this many ticks, like a device rotation
        #[arg(long)]
        rotate_at: Option<u64>,

        /// Print the default config as JSON and exit
        #[arg(long)]
        dump_config: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let config = match &args.config {
            Some(path) => WormConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => WormConfig::default(),
        };

        if args.dump_config {
            println!("{}", config.to_json()?);
            return Ok(());
        }

        log::info!("Wandering worm starting (seed {})", args.seed);

        let (frames_tx, frames_rx) = mpsc::channel::<(u64, Segment)>();
        let mut sim = WormSimulator::new(config, SeededTurns::new(args.seed))
            .context("Invalid worm config")?;
        let mut frame_no = 0u64;
        sim.subscribe(move |segments: &[Segment]| {
            frame_no += 1;
            if let Some(head) = segments.first() {
                // Receiver gone means the run is over
                let _ = frames_tx.send((frame_no, *head));
            }
        });

        let pace = sim.config().pace();
        let mut controller = WormController::new(sim, ThreadScheduler::new());
        controller.on_field_resize(args.width, args.height);

        if !controller.start() {
            bail!("Could not start the tick scheduler");
        }
        println!("Tap to pause/resume {}", controller.run_state());

        // Generous per-frame timeout so a stalled ticker fails loudly
        let timeout = pace * 10 + Duration::from_secs(1);
        loop {
            let (frame, head) = match frames_rx.recv_timeout(timeout) {
                Ok(received) => received,
                Err(RecvTimeoutError::Timeout) => {
                    controller.stop();
                    bail!("No tick arrived within {:?}, ticker stalled", timeout);
                }
                Err(RecvTimeoutError::Disconnected) => bail!("Tick observer dropped mid-run"),
            };
            log::info!("tick {:>5}: head ({:7.2}, {:7.2})", frame, head.center.x, head.center.y);

            if args.rotate_at == Some(frame) {
                log::info!("Rotating field to {}x{}", args.height, args.width);
                controller.on_field_resize(args.height, args.width);
            }
            if frame >= args.ticks {
                break;
            }
        }

        controller.stop();
        println!("Tap to pause/resume {}", controller.run_state());

        let (ticks, head) = controller.with_simulator(|sim| (sim.state().time_ticks, sim.head()));
        println!("Ran {} ticks, head at ({:.2}, {:.2})", ticks, head.x, head.y);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No standalone wasm entry point; embed the library in a host instead
}
