use std::io;
use std::time::{Duration, Instant};

use terrain_core::{ConfigError, GenerationConfig, World, generate};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub struct Finished {
    pub ticket: u64,
    pub config: GenerationConfig,
    pub world: Result<World, ConfigError>,
    pub elapsed: Duration,
}

// Runs generation off the UI thread. At most one job is in flight; the newest
// request waiting behind it replaces any older waiting one, and a finished job
// is only handed out if no newer request was made meanwhile.
pub struct Generator {
    runtime: Runtime,
    latest: u64,
    running: Option<JoinHandle<Finished>>,
    queued: Option<(u64, GenerationConfig)>,
}

impl Generator {
    pub fn new() -> io::Result<Self> {
        let runtime = Builder::new_current_thread()
            .thread_name("terrain-worker")
            .build()?;
        Ok(Self {
            runtime,
            latest: 0,
            running: None,
            queued: None,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    // Ask for a new world; returns the ticket of this request
    pub fn request(&mut self, config: GenerationConfig) -> u64 {
        self.latest += 1;
        let ticket = self.latest;
        if self.running.is_some() {
            debug!(ticket, "generation queued behind running job");
            self.queued = Some((ticket, config));
        } else {
            self.spawn(ticket, config);
        }
        ticket
    }

    fn spawn(&mut self, ticket: u64, config: GenerationConfig) {
        debug!(ticket, seed = config.seed, "generation started");
        self.running = Some(self.runtime.spawn_blocking(move || {
            let start = Instant::now();
            let world = generate(&config);
            Finished {
                ticket,
                config,
                world,
                elapsed: start.elapsed(),
            }
        }));
    }

    // Non-blocking; call once per frame
    pub fn poll(&mut self) -> Option<Finished> {
        if !self.running.as_ref().is_some_and(|h| h.is_finished()) {
            return None;
        }
        let handle = self.running.take()?;
        let joined = self.runtime.block_on(handle);

        if let Some((ticket, config)) = self.queued.take() {
            self.spawn(ticket, config);
        }

        match joined {
            Ok(finished) if finished.ticket == self.latest => Some(finished),
            Ok(stale) => {
                debug!(ticket = stale.ticket, latest = self.latest, "discarding stale world");
                None
            }
            Err(err) => {
                error!("generation job failed: {}", err);
                None
            }
        }
    }
}
