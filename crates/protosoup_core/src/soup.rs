//! The step engine: owns the population and advances it one tick at a time.
//!
//! Each [`Soup::advance`] call runs the full pipeline in strict order:
//! counter reset, chain generation, the mutation pass, the crossover pass,
//! the optional reaction extensions, movement, and the pattern scan. The
//! mutation and degradation passes rebuild the collection instead of
//! editing chains in place, so no pass ever aliases the sequence data it is
//! iterating.

use crate::chain::AminoAcidChain;
use crate::config::SoupConfig;
use crate::metrics::SoupMetrics;
use crate::molecule::{Atom, Entity, Molecule, Position};
use crate::population::Population;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// The sequence watched for spontaneous emergence.
pub const TARGET_PATTERN: &str = "METHINKS";

/// Reference temperature at which movement runs at base speed.
const BASE_TEMPERATURE: f64 = 300.0;

fn random_position<R: Rng>(rng: &mut R, width: u32, height: u32) -> Position {
    Position::new(
        rng.gen::<f64>() * f64::from(width),
        rng.gen::<f64>() * f64::from(height),
    )
}

/// A bounded 2D soup of molecules and amino-acid chains.
pub struct Soup {
    config: SoupConfig,
    population: Population,
    temperature: f64,
    ph: f64,
    rng: ChaCha8Rng,
    metrics: Arc<SoupMetrics>,
    tick: u64,
    reactions_this_tick: u32,
    total_reactions: u64,
}

impl Soup {
    /// Builds a soup from a validated configuration and scatters the
    /// initial batch of random chains across it.
    pub fn new(config: SoupConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut population = Population::new(config.world.width, config.world.height);
        for _ in 0..config.world.initial_chains {
            let mut chain = AminoAcidChain::generate_random(
                config.kinetics.spawn_min_len,
                config.kinetics.spawn_max_len,
                &mut rng,
            );
            chain.set_position(random_position(
                &mut rng,
                config.world.width,
                config.world.height,
            ));
            population.push(Entity::Chain(chain));
        }

        Ok(Self {
            temperature: config.world.temperature,
            ph: config.world.ph,
            population,
            rng,
            metrics: Arc::new(SoupMetrics::new()),
            config,
            tick: 0,
            reactions_this_tick: 0,
            total_reactions: 0,
        })
    }

    /// Advances the simulation by one tick.
    pub fn advance(&mut self) {
        self.reactions_this_tick = 0;
        self.tick += 1;

        self.generate_chains();
        self.mutation_pass();
        self.crossover_pass();
        if self.config.extensions.degradation {
            self.degradation_pass();
        }
        if self.config.extensions.synthesis {
            self.synthesis_pass();
        }
        self.movement_pass();
        self.pattern_scan();

        self.metrics
            .record_tick(self.population.len(), self.population.chain_count());
    }

    /// Synthesizes one new random chain at a uniform position, if the chain
    /// population is below the cap and the generation draw fires.
    fn generate_chains(&mut self) {
        let kinetics = &self.config.kinetics;
        if self.population.chain_count() < kinetics.max_chains
            && self.rng.gen::<f64>() < kinetics.generation_rate
        {
            let mut chain = AminoAcidChain::generate_random(
                kinetics.spawn_min_len,
                kinetics.spawn_max_len,
                &mut self.rng,
            );
            chain.set_position(random_position(
                &mut self.rng,
                self.population.width(),
                self.population.height(),
            ));
            self.population.push(Entity::Chain(chain));
        }
    }

    /// Gives every chain an independent chance to mutate, picking one of
    /// the three operators with equal probability. The collection is
    /// rebuilt wholesale; replacements keep their prior position exactly.
    fn mutation_pass(&mut self) {
        let mutation_rate = self.config.kinetics.mutation_rate;
        let entities = self.population.take_entities();
        let mut next = Vec::with_capacity(entities.len());
        for entity in entities {
            match entity {
                Entity::Chain(chain) => {
                    if self.rng.gen::<f64>() < mutation_rate {
                        let mut mutated = match self.rng.gen_range(0..3) {
                            0 => chain.substitute(&mut self.rng),
                            1 => chain.insert(&mut self.rng),
                            _ => chain.delete(&mut self.rng),
                        };
                        mutated.set_position(*chain.position());
                        self.metrics.record_mutation();
                        next.push(Entity::Chain(mutated));
                    } else {
                        next.push(Entity::Chain(chain));
                    }
                }
                other => next.push(other),
            }
        }
        self.population.set_entities(next);
    }

    /// Samples up to `max_combinations` pairs from a pre-pass snapshot.
    /// Each successful crossover appends a child at the parents' midpoint.
    /// The chain cap is checked before each attempt, not after.
    fn crossover_pass(&mut self) {
        let snapshot = self.population.snapshot();
        if snapshot.len() < 2 {
            return;
        }
        for _ in 0..self.config.kinetics.max_combinations {
            if self.population.chain_count() >= self.config.kinetics.max_chains {
                break;
            }
            let i = self.rng.gen_range(0..snapshot.len());
            let j = self.rng.gen_range(0..snapshot.len());
            if i == j {
                continue;
            }
            if let (Entity::Chain(a), Entity::Chain(b)) = (&snapshot[i], &snapshot[j]) {
                if self.rng.gen::<f64>() < self.config.kinetics.combination_rate {
                    let mut child = a.crossover(b, &mut self.rng);
                    child.set_position(a.position().midpoint(b.position()));
                    self.population.push(Entity::Chain(child));
                    self.metrics.record_crossover();
                }
            }
        }
    }

    /// Extension pass: long chains fall apart, keeping a random prefix.
    fn degradation_pass(&mut self) {
        let base_rate = self.config.extensions.degradation_rate;
        let entities = self.population.take_entities();
        let mut next = Vec::with_capacity(entities.len());
        for entity in entities {
            match entity {
                Entity::Chain(chain) => {
                    if self.rng.gen::<f64>() < chain.degradation_probability(base_rate) {
                        if let Some(mut fragment) = chain.degrade(&mut self.rng) {
                            fragment.set_position(*chain.position());
                            self.reactions_this_tick += 1;
                            self.total_reactions += 1;
                            next.push(Entity::Chain(fragment));
                            continue;
                        }
                    }
                    next.push(Entity::Chain(chain));
                }
                other => next.push(other),
            }
        }
        self.population.set_entities(next);
    }

    /// Extension pass: one water + methane pair close enough and energetic
    /// enough is consumed and replaced by methanol at their midpoint.
    fn synthesis_pass(&mut self) {
        let radius = self.config.extensions.reaction_radius;
        let threshold = self.config.extensions.reaction_threshold;

        let mut pair = None;
        'search: for (i, entity) in self.population.iter().enumerate() {
            let Entity::Plain(water) = entity else {
                continue;
            };
            if water.name != "H2O" || water.energy <= threshold {
                continue;
            }
            for (j, candidate) in self.population.iter().enumerate() {
                let Entity::Plain(methane) = candidate else {
                    continue;
                };
                if methane.name != "CH4" || methane.energy <= threshold {
                    continue;
                }
                if water.position.distance_to(&methane.position) <= radius {
                    pair = Some((i, j));
                    break 'search;
                }
            }
        }

        let Some((i, j)) = pair else {
            return;
        };
        let mut entities = self.population.take_entities();
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        let second = entities.swap_remove(hi);
        let first = entities.swap_remove(lo);

        let mut methanol = Molecule::new("CH3OH", first.energy() + second.energy() - 0.5);
        methanol.add_atom(Atom::carbon());
        methanol.add_atom(Atom::hydrogen());
        methanol.add_atom(Atom::hydrogen());
        methanol.add_atom(Atom::hydrogen());
        methanol.add_atom(Atom::oxygen());
        methanol.add_atom(Atom::hydrogen());
        methanol.position = first.position().midpoint(second.position());
        entities.push(Entity::Plain(methanol));
        self.population.set_entities(entities);

        self.reactions_this_tick += 1;
        self.total_reactions += 1;
        tracing::debug!(tick = self.tick, "abiotic synthesis produced CH3OH");
    }

    /// Displaces every entity by a temperature-scaled random step per axis
    /// and clamps it back into the plane.
    fn movement_pass(&mut self) {
        let scale = self.config.kinetics.movement_speed * (self.temperature / BASE_TEMPERATURE);
        let width = f64::from(self.population.width());
        let height = f64::from(self.population.height());
        let rng = &mut self.rng;
        for entity in self.population.iter_mut() {
            let position = entity.position_mut();
            let dx = rng.gen_range(-0.5..0.5) * scale;
            let dy = rng.gen_range(-0.5..0.5) * scale;
            position.x = (position.x + dx).clamp(0.0, width);
            position.y = (position.y + dy).clamp(0.0, height);
        }
    }

    /// Reports every chain containing the target pattern. Detection is an
    /// observability signal only; state is untouched.
    fn pattern_scan(&self) {
        for entity in self.population.iter() {
            if let Entity::Chain(chain) = entity {
                if chain.sequence().contains(TARGET_PATTERN) {
                    self.metrics.record_pattern_hit(chain.sequence());
                }
            }
        }
    }

    /// Best-effort insert, silently ignored when out of bounds.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        self.population.insert(entity)
    }

    #[must_use]
    pub fn snapshot_entities(&self) -> Vec<Entity> {
        self.population.snapshot()
    }

    #[must_use]
    pub fn metrics(&self) -> Arc<SoupMetrics> {
        Arc::clone(&self.metrics)
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.population.len()
    }

    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.population.chain_count()
    }

    #[must_use]
    pub fn reactions_this_tick(&self) -> u32 {
        self.reactions_this_tick
    }

    #[must_use]
    pub fn total_reactions(&self) -> u64 {
        self.total_reactions
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.population.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.population.height()
    }

    /// Changes the width, rescaling every x-coordinate proportionally.
    pub fn set_width(&mut self, width: u32) {
        self.population.set_width(width);
    }

    /// Changes the height, rescaling every y-coordinate proportionally.
    pub fn set_height(&mut self, height: u32) {
        self.population.set_height(height);
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    #[must_use]
    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn set_ph(&mut self, ph: f64) {
        self.ph = ph;
    }
}
