//! Amino-acid chains and their stochastic operators.
//!
//! A chain is a molecule whose name and atomic backbone are fully derived
//! from its residue sequence. The sequence never changes in place: every
//! operator returns a fresh chain and the engine swaps the old one out,
//! carrying the spatial position over. All randomness comes through an
//! injected [`Rng`] so runs are reproducible under a fixed seed.

use crate::molecule::{Atom, Molecule, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The 20 standard amino acids, as single-letter codes.
pub const AMINO_ACIDS: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W', 'Y',
    'V',
];

/// Fixed energy cost paid when two chains combine or cross over.
const COMBINATION_COST: f64 = 0.5;

/// Energy retained by the surviving fragment of a degraded chain.
const DEGRADATION_ENERGY_FACTOR: f64 = 0.6;

fn random_residue<R: Rng>(rng: &mut R) -> char {
    AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())]
}

/// A polypeptide: an ordered residue sequence over [`AMINO_ACIDS`].
///
/// The wrapped molecule is derived state. Its name is `"AA{len}"` and its
/// atom list holds exactly one C, N, O, H per residue, in that order, so
/// the atom count is always `4 * len`. The sequence is immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoAcidChain {
    molecule: Molecule,
    sequence: String,
}

impl AminoAcidChain {
    #[must_use]
    pub fn new(sequence: impl Into<String>, energy: f64) -> Self {
        let sequence = sequence.into();
        let mut molecule = Molecule::new(format!("AA{}", sequence.chars().count()), energy);
        for _ in sequence.chars() {
            molecule.add_atom(Atom::carbon());
            molecule.add_atom(Atom::nitrogen());
            molecule.add_atom(Atom::oxygen());
            molecule.add_atom(Atom::hydrogen());
        }
        Self { molecule, sequence }
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.molecule.name
    }

    #[must_use]
    pub fn energy(&self) -> f64 {
        self.molecule.energy
    }

    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.molecule.atoms
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.molecule.position
    }

    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.molecule.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.molecule.position = position;
    }

    /// Generates a chain with a length drawn uniformly from
    /// `[min_len, max_len]` and residues drawn uniformly from the alphabet.
    /// Energy scales with length: `1.0 + 0.1 * len`.
    ///
    /// # Panics
    /// Invalid bounds (`min_len == 0` or `min_len > max_len`) are a caller
    /// contract violation and panic.
    #[must_use]
    pub fn generate_random<R: Rng>(min_len: usize, max_len: usize, rng: &mut R) -> Self {
        assert!(
            min_len >= 1 && min_len <= max_len,
            "invalid chain length bounds: [{min_len}, {max_len}]"
        );
        let length = rng.gen_range(min_len..=max_len);
        let sequence: String = (0..length).map(|_| random_residue(rng)).collect();
        Self::new(sequence, 1.0 + 0.1 * length as f64)
    }

    /// Concatenates two chains. Energy is summed minus the reaction cost,
    /// with no lower clamp.
    #[must_use]
    pub fn combine(a: &Self, b: &Self) -> Self {
        Self::new(
            format!("{}{}", a.sequence, b.sequence),
            a.energy() + b.energy() - COMBINATION_COST,
        )
    }

    /// Replaces one uniformly-chosen residue with a uniformly-drawn one
    /// (which may be identical). Identity on an empty sequence.
    #[must_use]
    pub fn substitute<R: Rng>(&self, rng: &mut R) -> Self {
        if self.sequence.is_empty() {
            return self.clone();
        }
        let mut residues: Vec<char> = self.sequence.chars().collect();
        let pos = rng.gen_range(0..residues.len());
        residues[pos] = random_residue(rng);
        Self::new(residues.into_iter().collect::<String>(), self.energy())
    }

    /// Inserts a uniformly-drawn residue at a uniformly-chosen position in
    /// `[0, len]`.
    #[must_use]
    pub fn insert<R: Rng>(&self, rng: &mut R) -> Self {
        let mut residues: Vec<char> = self.sequence.chars().collect();
        let pos = rng.gen_range(0..=residues.len());
        residues.insert(pos, random_residue(rng));
        Self::new(residues.into_iter().collect::<String>(), self.energy())
    }

    /// Removes the residue at a uniformly-chosen position. A chain of
    /// length 1 or less is returned unchanged.
    #[must_use]
    pub fn delete<R: Rng>(&self, rng: &mut R) -> Self {
        let mut residues: Vec<char> = self.sequence.chars().collect();
        if residues.len() <= 1 {
            return self.clone();
        }
        let pos = rng.gen_range(0..residues.len());
        residues.remove(pos);
        Self::new(residues.into_iter().collect::<String>(), self.energy())
    }

    /// Recombines with another chain: own prefix up to a uniform cut point
    /// plus the other's suffix from its own independent cut point. Energy
    /// is the arithmetic mean of the parents. Identity if either sequence
    /// is empty.
    #[must_use]
    pub fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        if self.sequence.is_empty() || other.sequence.is_empty() {
            return self.clone();
        }
        let own: Vec<char> = self.sequence.chars().collect();
        let theirs: Vec<char> = other.sequence.chars().collect();
        let cut_own = rng.gen_range(0..own.len());
        let cut_theirs = rng.gen_range(0..theirs.len());
        let sequence: String = own[..cut_own]
            .iter()
            .chain(theirs[cut_theirs..].iter())
            .collect();
        Self::new(sequence, (self.energy() + other.energy()) / 2.0)
    }

    /// Splits off and keeps a prefix of the chain, losing the rest and part
    /// of the energy. `None` for chains of length 1 or less, which cannot
    /// degrade further.
    #[must_use]
    pub fn degrade<R: Rng>(&self, rng: &mut R) -> Option<Self> {
        let residues: Vec<char> = self.sequence.chars().collect();
        if residues.len() <= 1 {
            return None;
        }
        let split = rng.gen_range(1..residues.len());
        Some(Self::new(
            residues[..split].iter().collect::<String>(),
            self.energy() * DEGRADATION_ENERGY_FACTOR,
        ))
    }

    /// Degradation likelihood grows with chain length.
    #[must_use]
    pub fn degradation_probability(&self, base_rate: f64) -> f64 {
        base_rate * (1.0 + 0.05 * self.len() as f64)
    }

    /// Both partners need energy above the threshold to react.
    #[must_use]
    pub fn can_react_with(&self, other: &Self, threshold: f64) -> bool {
        self.energy() > threshold && other.energy() > threshold
    }
}
