//! シグネチャ: エンティティ集合と局所性の極性

use fukurow_dl::{
    DataPropertyExpression, Entity, EntityKind, Expression, ObjectPropertyExpression, OwlIri,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which truth value excluded entities take during a locality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locality {
    /// Excluded concepts and roles behave as top
    Top,
    /// Excluded concepts and roles behave as bottom
    Bottom,
}

impl Locality {
    pub fn opposite(self) -> Self {
        match self {
            Locality::Top => Locality::Bottom,
            Locality::Bottom => Locality::Top,
        }
    }

    /// Position of the locality in two-element tables
    pub fn index(self) -> usize {
        match self {
            Locality::Top => 0,
            Locality::Bottom => 1,
        }
    }
}

/// Set of named entities plus the concept and role polarity bits.
///
/// Equality, ordering and hashing look at the entity set only; the
/// polarity is extraction state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    entities: BTreeSet<Entity>,
    top_concepts: bool,
    top_roles: bool,
}

impl Signature {
    /// Empty, bottom-local signature
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locality(locality: Locality) -> Self {
        let mut sig = Self::new();
        sig.set_locality(locality);
        sig
    }

    pub fn set_locality(&mut self, locality: Locality) {
        let top = locality == Locality::Top;
        self.top_concepts = top;
        self.top_roles = top;
    }

    pub fn top_concepts(&self) -> bool {
        self.top_concepts
    }

    pub fn top_roles(&self) -> bool {
        self.top_roles
    }

    pub fn set_top_concepts(&mut self, top: bool) {
        self.top_concepts = top;
    }

    pub fn set_top_roles(&mut self, top: bool) {
        self.top_roles = top;
    }

    /// True if both polarities match (entities are not compared)
    pub fn same_polarity(&self, other: &Signature) -> bool {
        self.top_concepts == other.top_concepts && self.top_roles == other.top_roles
    }

    /// Add an entity; returns true if it was not present
    pub fn add(&mut self, entity: Entity) -> bool {
        self.entities.insert(entity)
    }

    pub fn remove(&mut self, entity: &Entity) -> bool {
        self.entities.remove(entity)
    }

    /// Union in place
    pub fn extend(&mut self, other: &Signature) {
        self.entities.extend(other.entities.iter().cloned());
    }

    /// Union keeping the polarity of `self`
    pub fn union(&self, other: &Signature) -> Signature {
        let mut result = self.clone();
        result.extend(other);
        result
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.contains(entity)
    }

    pub fn contains_named(&self, kind: EntityKind, iri: &OwlIri) -> bool {
        self.entities.contains(&Entity { kind, iri: iri.clone() })
    }

    /// True for a name (or the inverse of a role name) in the signature
    pub fn contains_expr(&self, expr: Expression<'_>) -> bool {
        match expr {
            Expression::Class(fukurow_dl::ClassExpression::Named(iri)) => {
                self.contains_named(EntityKind::Concept, iri)
            }
            Expression::ObjectProperty(role) => self.contains_role(role),
            Expression::DataProperty(DataPropertyExpression::DataProperty(iri)) => {
                self.contains_named(EntityKind::DataRole, iri)
            }
            _ => false,
        }
    }

    fn contains_role(&self, role: &ObjectPropertyExpression) -> bool {
        match role {
            ObjectPropertyExpression::ObjectProperty(iri) => {
                self.contains_named(EntityKind::ObjectRole, iri)
            }
            ObjectPropertyExpression::InverseOf(inner) => self.contains_role(inner),
            _ => false,
        }
    }

    pub fn intersects(&self, other: &Signature) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.entities.iter().any(|e| large.entities.contains(e))
    }

    pub fn is_subset(&self, other: &Signature) -> bool {
        self.entities.is_subset(&other.entities)
    }

    pub fn entities(&self) -> &BTreeSet<Entity> {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for Signature {}

impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Signature {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.entities.cmp(&other.entities)
    }
}

impl std::hash::Hash for Signature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entities.hash(state);
    }
}

impl FromIterator<Entity> for Signature {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Extend<Entity> for Signature {
    fn extend<I: IntoIterator<Item = Entity>>(&mut self, iter: I) {
        self.entities.extend(iter);
    }
}

impl From<BTreeSet<Entity>> for Signature {
    fn from(entities: BTreeSet<Entity>) -> Self {
        Self {
            entities,
            ..Self::default()
        }
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a Entity;
    type IntoIter = std::collections::btree_set::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
