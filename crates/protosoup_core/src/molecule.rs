//! Base entity model: atoms, positions, molecules and the entity sum type.

use crate::chain::AminoAcidChain;
use serde::{Deserialize, Serialize};

/// A single atom, identified by value only. Owned by exactly one molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    pub atomic_number: u32,
    pub atomic_mass: f64,
}

impl Atom {
    #[must_use]
    pub fn new(element: impl Into<String>, atomic_number: u32, atomic_mass: f64) -> Self {
        Self {
            element: element.into(),
            atomic_number,
            atomic_mass,
        }
    }

    #[must_use]
    pub fn hydrogen() -> Self {
        Self::new("H", 1, 1.008)
    }

    #[must_use]
    pub fn carbon() -> Self {
        Self::new("C", 6, 12.011)
    }

    #[must_use]
    pub fn nitrogen() -> Self {
        Self::new("N", 7, 14.007)
    }

    #[must_use]
    pub fn oxygen() -> Self {
        Self::new("O", 8, 15.999)
    }
}

/// World position of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A generic chemical molecule: a named bag of atoms with an energy value
/// and a position in the soup. Energy is a free real and may go negative
/// after reactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub name: String,
    pub energy: f64,
    pub atoms: Vec<Atom>,
    pub position: Position,
}

impl Molecule {
    /// Creates a molecule with no atoms at the origin. Atoms are appended
    /// afterwards; the position is set by whoever places it in the soup.
    #[must_use]
    pub fn new(name: impl Into<String>, energy: f64) -> Self {
        Self {
            name: name.into(),
            energy,
            atoms: Vec::new(),
            position: Position::default(),
        }
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }
}

/// Everything that lives in the soup: either a plain molecule or an
/// amino-acid chain. The engine matches on the variant explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Plain(Molecule),
    Chain(AminoAcidChain),
}

impl Entity {
    #[must_use]
    pub fn position(&self) -> &Position {
        match self {
            Entity::Plain(molecule) => &molecule.position,
            Entity::Chain(chain) => chain.position(),
        }
    }

    pub fn position_mut(&mut self) -> &mut Position {
        match self {
            Entity::Plain(molecule) => &mut molecule.position,
            Entity::Chain(chain) => chain.position_mut(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Entity::Plain(molecule) => &molecule.name,
            Entity::Chain(chain) => chain.name(),
        }
    }

    #[must_use]
    pub fn energy(&self) -> f64 {
        match self {
            Entity::Plain(molecule) => molecule.energy,
            Entity::Chain(chain) => chain.energy(),
        }
    }

    #[must_use]
    pub fn is_chain(&self) -> bool {
        matches!(self, Entity::Chain(_))
    }

    #[must_use]
    pub fn as_chain(&self) -> Option<&AminoAcidChain> {
        match self {
            Entity::Chain(chain) => Some(chain),
            Entity::Plain(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_midpoint() {
        let a = Position::new(2.0, 8.0);
        let b = Position::new(4.0, 0.0);
        assert_eq!(a.midpoint(&b), Position::new(3.0, 4.0));
    }

    #[test]
    fn test_atoms_compare_by_value() {
        assert_eq!(Atom::carbon(), Atom::new("C", 6, 12.011));
        assert_ne!(Atom::carbon(), Atom::nitrogen());
    }

    #[test]
    fn test_molecule_starts_empty_at_origin() {
        let mut water = Molecule::new("H2O", 1.0);
        assert!(water.atoms.is_empty());
        assert_eq!(water.position, Position::default());
        water.add_atom(Atom::hydrogen());
        water.add_atom(Atom::hydrogen());
        water.add_atom(Atom::oxygen());
        assert_eq!(water.atoms.len(), 3);
    }
}
