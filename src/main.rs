use anyhow::{Context, Result};
use clap::Parser;
use protosoup_core::{
    init_logging, Atom, Entity, Molecule, Position, SharedSoup, Soup, SoupConfig,
};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Headless driver: runs the soup on a dedicated simulation thread and
/// reports per-second statistics from this one, reading only snapshots
/// and atomic counters.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Ticks to simulate (0 runs until interrupted)
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Override the RNG seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Override the soup width
    #[arg(long)]
    width: Option<u32>,

    /// Override the soup height
    #[arg(long)]
    height: Option<u32>,

    /// Override the temperature in Kelvin
    #[arg(long)]
    temperature: Option<f64>,

    /// Water/methane pairs scattered into the soup at startup
    #[arg(long, default_value_t = 50)]
    ambient_molecules: u32,

    /// Simulation ticks per second (0 = unpaced)
    #[arg(long, default_value_t = 0)]
    tick_rate: u64,
}

fn load_config(path: &str) -> Result<SoupConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            SoupConfig::from_toml(&content).with_context(|| format!("invalid config file {path}"))
        }
        // Missing config file is fine; defaults carry the canonical constants.
        Err(_) => Ok(SoupConfig::default()),
    }
}

fn water() -> Molecule {
    let mut molecule = Molecule::new("H2O", 1.0);
    molecule.add_atom(Atom::hydrogen());
    molecule.add_atom(Atom::hydrogen());
    molecule.add_atom(Atom::oxygen());
    molecule
}

fn methane() -> Molecule {
    let mut molecule = Molecule::new("CH4", 1.5);
    molecule.add_atom(Atom::carbon());
    for _ in 0..4 {
        molecule.add_atom(Atom::hydrogen());
    }
    molecule
}

fn scatter_ambient_molecules(soup: &SharedSoup, pairs: u32) {
    let (width, height) = soup.dimensions();
    let mut rng = rand::thread_rng();
    let mut random_position = move || {
        Position::new(
            rng.gen::<f64>() * f64::from(width),
            rng.gen::<f64>() * f64::from(height),
        )
    };
    for _ in 0..pairs {
        let mut water = water();
        water.position = random_position();
        soup.add_entity(Entity::Plain(water));

        let mut methane = methane();
        methane.position = random_position();
        soup.add_entity(Entity::Plain(methane));
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(temperature) = args.temperature {
        config.world.temperature = temperature;
    }

    let soup = SharedSoup::new(Soup::new(config)?);
    scatter_ambient_molecules(&soup, args.ambient_molecules);

    let running = Arc::new(AtomicBool::new(true));
    let sim = {
        let soup = soup.clone();
        let running = Arc::clone(&running);
        let total_ticks = args.ticks;
        let pace = (args.tick_rate > 0)
            .then(|| Duration::from_secs_f64(1.0 / args.tick_rate as f64));
        thread::spawn(move || {
            let mut tick = 0u64;
            while total_ticks == 0 || tick < total_ticks {
                soup.advance();
                tick += 1;
                if let Some(pace) = pace {
                    thread::sleep(pace);
                }
            }
            running.store(false, Ordering::Relaxed);
        })
    };

    let metrics = soup.metrics();
    let mut last_tick = 0u64;
    while running.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_secs(1));
        let tick = metrics.tick_count();
        tracing::info!(
            tick,
            tps = tick - last_tick,
            entities = metrics.entity_count(),
            chains = metrics.chain_count(),
            mutations = metrics.mutation_count(),
            crossovers = metrics.crossover_count(),
            pattern_hits = metrics.pattern_hits(),
            "soup status"
        );
        last_tick = tick;
    }

    sim.join()
        .map_err(|_| anyhow::anyhow!("simulation thread panicked"))?;

    tracing::info!(
        ticks = metrics.tick_count(),
        entities = metrics.entity_count(),
        chains = metrics.chain_count(),
        pattern_hits = metrics.pattern_hits(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(())
}
