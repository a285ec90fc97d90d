//! シグネチャインデックス: エンティティ → 公理の逆引き
//!
//! 空シグネチャの下で非局所な公理を極性ごとに前計算しておく。

use crate::checker::LocalityChecker;
use crate::signature::{Locality, Signature};
use crate::ModularityError;
use fukurow_dl::{AxiomId, Entity, OntologyAxiom, OwlDlOntology};
use std::collections::{BTreeSet, HashMap};

/// Reverse index from entities to the axioms mentioning them
#[derive(Debug, Clone, Default)]
pub struct SigIndex {
    base: HashMap<Entity, BTreeSet<AxiomId>>,
    /// Axioms non-local w.r.t. the empty signature, indexed by `Locality::index`
    non_local: [BTreeSet<AxiomId>; 2],
    registered: BTreeSet<AxiomId>,
}

impl SigIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over all axioms of the ontology that are in use
    pub fn build<C>(ontology: &OwlDlOntology, checker: &mut C) -> Result<Self, ModularityError>
    where
        C: LocalityChecker + ?Sized,
    {
        let mut index = Self::new();
        index.process_range(ontology, &ontology.ids(), checker)?;
        Ok(index)
    }

    pub fn register<C>(&mut self, entry: &OntologyAxiom, checker: &mut C) -> Result<(), ModularityError>
    where
        C: LocalityChecker + ?Sized,
    {
        for entity in entry.entities() {
            self.base.entry(entity.clone()).or_default().insert(entry.id);
        }
        for locality in [Locality::Top, Locality::Bottom] {
            let empty = Signature::with_locality(locality);
            if !checker.local(&entry.axiom, &empty)? {
                self.non_local[locality.index()].insert(entry.id);
            }
        }
        self.registered.insert(entry.id);
        Ok(())
    }

    pub fn unregister(&mut self, entry: &OntologyAxiom) {
        for entity in entry.entities() {
            if let Some(axioms) = self.base.get_mut(entity) {
                axioms.remove(&entry.id);
                if axioms.is_empty() {
                    self.base.remove(entity);
                }
            }
        }
        for set in &mut self.non_local {
            set.remove(&entry.id);
        }
        self.registered.remove(&entry.id);
    }

    /// Register a used axiom, unregister a retracted one
    pub fn process_ax<C>(&mut self, entry: &OntologyAxiom, checker: &mut C) -> Result<(), ModularityError>
    where
        C: LocalityChecker + ?Sized,
    {
        if entry.is_used() {
            self.register(entry, checker)
        } else {
            self.unregister(entry);
            Ok(())
        }
    }

    pub fn process_range<C>(
        &mut self,
        ontology: &OwlDlOntology,
        ids: &[AxiomId],
        checker: &mut C,
    ) -> Result<(), ModularityError>
    where
        C: LocalityChecker + ?Sized,
    {
        for &id in ids {
            let entry = ontology.get(id).ok_or(ModularityError::UnknownAxiom(id))?;
            self.process_ax(entry, checker)?;
        }
        Ok(())
    }

    /// Axioms mentioning `entity`
    pub fn get_axioms(&self, entity: &Entity) -> impl Iterator<Item = AxiomId> + '_ {
        self.base.get(entity).into_iter().flat_map(|set| set.iter().copied())
    }

    /// Axioms that are non-local for any signature under the given polarity
    pub fn non_local(&self, locality: Locality) -> &BTreeSet<AxiomId> {
        &self.non_local[locality.index()]
    }

    pub fn contains(&self, id: AxiomId) -> bool {
        self.registered.contains(&id)
    }

    /// Number of registered axioms
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn clear(&mut self) {
        self.base.clear();
        self.non_local = Default::default();
        self.registered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::SyntacticLocalityChecker;
    use fukurow_dl::{Axiom, ClassExpression, Individual};

    fn sample() -> (OwlDlOntology, Vec<AxiomId>) {
        let mut ontology = OwlDlOntology::new();
        let ids = vec![
            ontology.add_axiom(Axiom::SubClassOf(ClassExpression::named("A"), ClassExpression::named("B"))),
            ontology.add_axiom(Axiom::SubClassOf(ClassExpression::named("B"), ClassExpression::named("C"))),
            ontology.add_axiom(Axiom::SubClassOf(ClassExpression::Thing, ClassExpression::named("D"))),
            ontology.add_axiom(Axiom::SameIndividual(vec![Individual::new("a"), Individual::new("b")])),
        ];
        (ontology, ids)
    }

    #[test]
    fn test_entity_lookup() {
        let (ontology, ids) = sample();
        let mut checker = SyntacticLocalityChecker::new();
        let index = SigIndex::build(&ontology, &mut checker).unwrap();

        let with_b: Vec<AxiomId> = index.get_axioms(&Entity::concept("B")).collect();
        assert_eq!(with_b, vec![ids[0], ids[1]]);
        assert_eq!(index.get_axioms(&Entity::concept("Z")).count(), 0);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_non_local_under_empty_signature() {
        let (ontology, ids) = sample();
        let mut checker = SyntacticLocalityChecker::new();
        let index = SigIndex::build(&ontology, &mut checker).unwrap();

        // ⊤ ⊑ D is non-local for bottom polarity; individual equality never local
        let bottom = index.non_local(Locality::Bottom);
        assert!(bottom.contains(&ids[2]));
        assert!(bottom.contains(&ids[3]));
        assert!(!bottom.contains(&ids[0]));

        let top = index.non_local(Locality::Top);
        assert!(!top.contains(&ids[2]));
        assert!(top.contains(&ids[3]));
    }

    #[test]
    fn test_retracted_axiom_is_unregistered() {
        let (mut ontology, ids) = sample();
        let mut checker = SyntacticLocalityChecker::new();
        let mut index = SigIndex::build(&ontology, &mut checker).unwrap();

        ontology.retract(ids[0]).unwrap();
        index.process_ax(&ontology[ids[0]], &mut checker).unwrap();

        assert!(!index.contains(ids[0]));
        assert_eq!(index.get_axioms(&Entity::concept("A")).count(), 0);
        assert_eq!(index.get_axioms(&Entity::concept("B")).collect::<Vec<_>>(), vec![ids[1]]);
    }

    #[test]
    fn test_unknown_axiom_in_range() {
        let (ontology, _) = sample();
        let mut checker = SyntacticLocalityChecker::new();
        let mut index = SigIndex::new();
        let err = index.process_range(&ontology, &[AxiomId(42)], &mut checker).unwrap_err();
        assert!(matches!(err, ModularityError::UnknownAxiom(AxiomId(42))));
    }
}
