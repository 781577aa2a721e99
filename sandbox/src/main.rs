use std::time::{Duration, Instant};

use whiteboard_sandbox::config::RuntimeConfig;
use whiteboard_sandbox::source::FrameSource;
use whiteboard_sandbox::sync_loop::Never;
use whiteboard_sandbox::{MonotonicClock, QuitSignal, RapierWorld, SyncLoop, TickBudget};
use whiteboard_shared::Frame;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Holds frames back so ticks happen at roughly `tick_rate_hz`, the way a
/// camera delivers them.
struct Paced<S> {
    inner: S,
    interval: Option<Duration>,
    last: Option<Instant>,
}

impl<S: FrameSource> Paced<S> {
    fn new(inner: S, tick_rate_hz: u32) -> Self {
        let interval = (tick_rate_hz > 0).then(|| Duration::from_secs_f64(1.0 / tick_rate_hz as f64));
        Self {
            inner,
            interval,
            last: None,
        }
    }
}

impl<S: FrameSource> FrameSource for Paced<S> {
    fn frame_size(&self) -> (u32, u32) {
        self.inner.frame_size()
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if let (Some(interval), Some(last)) = (self.interval, self.last) {
            if let Some(rest) = interval.checked_sub(last.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        self.last = Some(Instant::now());
        self.inner.next_frame()
    }
}

fn main() {
    init_tracing();

    let config = match RuntimeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid sandbox configuration: {}", e);
            std::process::exit(1);
        }
    };

    let source = match config.source.open() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to open frame source: {}", e);
            std::process::exit(1);
        }
    };
    let (width, height) = source.frame_size();

    let world = RapierWorld::new(config.sandbox.gravity);
    let mut sync = match SyncLoop::new(world, MonotonicClock::default(), width, height, config.sandbox) {
        Ok(sync) => sync,
        Err(e) => {
            eprintln!("Failed to start sync loop: {}", e);
            std::process::exit(1);
        }
    };

    let quit: Box<dyn QuitSignal> = match config.max_ticks {
        Some(ticks) => Box::new(TickBudget::new(ticks)),
        None => Box::new(Never),
    };

    let mut paced = Paced::new(source, config.tick_rate_hz);
    match sync.run(&mut paced, quit.as_ref()) {
        Ok(reason) => {
            let cleared = sync.clear_obstacles();
            tracing::info!(
                ?reason,
                ticks = sync.ticks(),
                resets = sync.actor().resets(),
                cleared,
                "Sync loop ended"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, tick = sync.ticks(), "sync loop failed");
            std::process::exit(1);
        }
    }
}
