//! # Protosoup Core
//!
//! The simulation engine for Protosoup - a discrete-time stochastic model
//! of a prebiotic soup.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The entity model (atoms, molecules, amino-acid chains)
//! - Stochastic mutation and recombination operators over residue sequences
//! - The per-tick step pipeline (generation, mutation, crossover, movement)
//! - Pattern-emergence detection for the target sequence
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! The engine owns its population and advances it one tick at a time:
//! - **Tagged entities**: plain molecules and chains as one sum type
//! - **Replace-don't-mutate passes**: each rewrite pass rebuilds the
//!   collection instead of editing sequences in place
//! - **Deterministic simulation**: seeded ChaCha8 RNG for reproducible runs
//! - **Snapshot reads**: presentation threads read through [`SharedSoup`]
//!
//! ## Example
//!
//! ```
//! use protosoup_core::{Soup, SoupConfig};
//!
//! let mut config = SoupConfig::default();
//! config.world.seed = Some(42);
//!
//! let mut soup = Soup::new(config).unwrap();
//! for _ in 0..100 {
//!     soup.advance();
//! }
//! assert!(soup.chain_count() <= 50);
//! ```

/// Amino-acid chains and their mutation/recombination operators
pub mod chain;
/// Configuration management for simulation parameters
pub mod config;
/// Counters and structured logging
pub mod metrics;
/// Atoms, positions, molecules and the entity sum type
pub mod molecule;
/// The live entity collection and its spatial bounds
pub mod population;
/// Cross-thread handle for the two-thread read model
pub mod shared;
/// The per-tick step engine
pub mod soup;

pub use chain::{AminoAcidChain, AMINO_ACIDS};
pub use config::{ExtensionsConfig, KineticsConfig, SoupConfig, WorldConfig};
pub use metrics::{init_logging, SoupMetrics};
pub use molecule::{Atom, Entity, Molecule, Position};
pub use population::Population;
pub use shared::SharedSoup;
pub use soup::{Soup, TARGET_PATTERN};
