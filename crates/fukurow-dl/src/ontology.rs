//! オントロジー: 公理の格納と識別子
//!
//! 公理は追加順に `AxiomId` を割り当てられ、以後その識別子で参照される。
//! 各公理はシグネチャ (出現する名前付きエンティティ) をキャッシュし、
//! 「使用中」フラグを持つ。

use crate::model::{Axiom, Entity};
use crate::OwlDlError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier of an axiom inside one ontology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AxiomId(pub usize);

impl AxiomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AxiomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axiom stored in an ontology together with its bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyAxiom {
    pub id: AxiomId,
    pub axiom: Axiom,
    entities: BTreeSet<Entity>,
    used: bool,
}

impl OntologyAxiom {
    /// Cached signature of the axiom
    pub fn entities(&self) -> &BTreeSet<Entity> {
        &self.entities
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self.axiom, Axiom::Declaration(_))
    }
}

/// OWL DL Ontology
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwlDlOntology {
    pub iri: Option<String>,
    axioms: Vec<OntologyAxiom>,
}

impl OwlDlOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iri(iri: impl Into<String>) -> Self {
        Self {
            iri: Some(iri.into()),
            axioms: Vec::new(),
        }
    }

    /// Add an axiom; it starts out in use
    pub fn add_axiom(&mut self, axiom: Axiom) -> AxiomId {
        let id = AxiomId(self.axioms.len());
        let entities = axiom.entities();
        self.axioms.push(OntologyAxiom {
            id,
            axiom,
            entities,
            used: true,
        });
        id
    }

    pub fn get(&self, id: AxiomId) -> Option<&OntologyAxiom> {
        self.axioms.get(id.0)
    }

    pub fn axiom(&self, id: AxiomId) -> Option<&Axiom> {
        self.get(id).map(|entry| &entry.axiom)
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// All axioms, used or not
    pub fn iter(&self) -> impl Iterator<Item = &OntologyAxiom> {
        self.axioms.iter()
    }

    /// Identifiers of all axioms currently in use, in insertion order
    pub fn ids(&self) -> Vec<AxiomId> {
        self.axioms
            .iter()
            .filter(|entry| entry.used)
            .map(|entry| entry.id)
            .collect()
    }

    pub fn is_used(&self, id: AxiomId) -> bool {
        self.get(id).map(|entry| entry.used).unwrap_or(false)
    }

    pub fn set_used(&mut self, id: AxiomId, used: bool) -> Result<(), OwlDlError> {
        let entry = self
            .axioms
            .get_mut(id.0)
            .ok_or_else(|| OwlDlError::UnknownAxiom(id.to_string()))?;
        entry.used = used;
        Ok(())
    }

    /// Mark an axiom as no longer part of the ontology
    pub fn retract(&mut self, id: AxiomId) -> Result<(), OwlDlError> {
        self.set_used(id, false)
    }

    /// Union of the signatures of all axioms in use
    pub fn used_signature(&self) -> BTreeSet<Entity> {
        self.axioms
            .iter()
            .filter(|entry| entry.used)
            .flat_map(|entry| entry.entities.iter().cloned())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, OwlDlError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, OwlDlError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::ops::Index<AxiomId> for OwlDlOntology {
    type Output = OntologyAxiom;

    fn index(&self, id: AxiomId) -> &Self::Output {
        &self.axioms[id.0]
    }
}
