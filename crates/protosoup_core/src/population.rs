//! The live entity collection and its spatial bounds.

use crate::molecule::{Entity, Position};

/// An unordered collection of entities inside a bounded plane. Owned
/// exclusively by the engine; external readers get owned snapshots.
#[derive(Debug, Clone)]
pub struct Population {
    width: u32,
    height: u32,
    entities: Vec<Entity>,
}

impl Population {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        position.x >= 0.0
            && position.x < f64::from(self.width)
            && position.y >= 0.0
            && position.y < f64::from(self.height)
    }

    /// Best-effort insert: entities outside `[0,width) x [0,height)` are
    /// silently dropped. Returns whether the entity was kept; callers that
    /// need feedback check bounds themselves first.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.contains(entity.position()) {
            self.entities.push(entity);
            true
        } else {
            false
        }
    }

    /// Unvalidated append for engine-internal spawns whose positions are
    /// derived from entities already inside the soup.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_chain()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Owned copy for external readers.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    /// Moves the collection out for a rebuild pass.
    pub fn take_entities(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.entities)
    }

    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }

    /// Changes the width, rescaling every x-coordinate by `new/old` when
    /// both extents are positive and differ. Entities that end up out of
    /// range are left alone.
    pub fn set_width(&mut self, width: u32) {
        if self.width > 0 && width > 0 && self.width != width {
            let scale = f64::from(width) / f64::from(self.width);
            for entity in &mut self.entities {
                entity.position_mut().x *= scale;
            }
        }
        self.width = width;
    }

    /// Height counterpart of [`Population::set_width`].
    pub fn set_height(&mut self, height: u32) {
        if self.height > 0 && height > 0 && self.height != height {
            let scale = f64::from(height) / f64::from(self.height);
            for entity in &mut self.entities {
                entity.position_mut().y *= scale;
            }
        }
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::Molecule;

    fn plain_at(x: f64, y: f64) -> Entity {
        let mut molecule = Molecule::new("H2O", 1.0);
        molecule.position = Position::new(x, y);
        Entity::Plain(molecule)
    }

    #[test]
    fn test_insert_accepts_interior_points() {
        let mut population = Population::new(100, 50);
        assert!(population.insert(plain_at(0.0, 0.0)));
        assert!(population.insert(plain_at(99.9, 49.9)));
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_insert_rejects_boundary_and_beyond() {
        let mut population = Population::new(100, 50);
        assert!(!population.insert(plain_at(100.0, 10.0)));
        assert!(!population.insert(plain_at(10.0, 50.0)));
        assert!(!population.insert(plain_at(-0.1, 10.0)));
        assert!(population.is_empty());
    }

    #[test]
    fn test_set_width_rescales_x_only() {
        let mut population = Population::new(100, 50);
        population.insert(plain_at(40.0, 25.0));
        population.set_width(200);
        let entity = &population.entities()[0];
        assert_eq!(entity.position().x, 80.0);
        assert_eq!(entity.position().y, 25.0);
        assert_eq!(population.width(), 200);
    }

    #[test]
    fn test_set_height_rescales_y_only() {
        let mut population = Population::new(100, 50);
        population.insert(plain_at(40.0, 25.0));
        population.set_height(25);
        let entity = &population.entities()[0];
        assert_eq!(entity.position().x, 40.0);
        assert_eq!(entity.position().y, 12.5);
    }

    #[test]
    fn test_resize_from_zero_extent_skips_rescale() {
        let mut population = Population::new(100, 50);
        population.insert(plain_at(40.0, 25.0));
        population.set_width(0);
        population.set_width(100);
        assert_eq!(population.entities()[0].position().x, 40.0);
    }

    #[test]
    fn test_chain_count_ignores_plain_molecules() {
        let mut population = Population::new(100, 50);
        population.insert(plain_at(1.0, 1.0));
        population.push(Entity::Chain(crate::chain::AminoAcidChain::new("MK", 1.2)));
        assert_eq!(population.len(), 2);
        assert_eq!(population.chain_count(), 1);
    }
}
