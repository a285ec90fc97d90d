//! モジュール抽出 (TOP / BOTTOM / STAR)
//!
//! 線形走査による不動点計算と、SigIndex を使う差分的な探索の 2 通りを
//! 持つ。どちらも同じモジュールを返す。

use crate::checker::{LocalityChecker, SyntacticLocalityChecker};
use crate::sig_index::SigIndex;
use crate::signature::{Locality, Signature};
use crate::ModularityError;
use fukurow_dl::{AxiomId, Entity, OntologyAxiom, OwlDlOntology};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Locality direction of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Top,
    #[default]
    Bottom,
    /// Alternate top and bottom passes until the module is stable
    Star,
}

impl ModuleType {
    /// Polarity of the first extraction pass
    pub fn initial_locality(self) -> Locality {
        match self {
            ModuleType::Top | ModuleType::Star => Locality::Top,
            ModuleType::Bottom => Locality::Bottom,
        }
    }
}

/// Counters of a single extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Locality checks performed
    pub checks: usize,
    /// Axioms found non-local, including those taken from the index
    pub non_local: usize,
    /// Extraction passes (more than one only for star modules)
    pub passes: usize,
}

/// Counters accumulated over the lifetime of a modularizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModularizerStats {
    pub extractions: usize,
    pub checks: usize,
    pub non_local: usize,
}

impl ModularizerStats {
    fn record(&mut self, stats: &ExtractionStats) {
        self.extractions += 1;
        self.checks += stats.checks;
        self.non_local += stats.non_local;
    }
}

/// Result of an extraction: axioms in the order they joined the module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    axioms: Vec<AxiomId>,
    members: BTreeSet<AxiomId>,
    signature: Signature,
    stats: ExtractionStats,
}

impl Module {
    pub fn axioms(&self) -> &[AxiomId] {
        &self.axioms
    }

    pub fn axiom_set(&self) -> &BTreeSet<AxiomId> {
        &self.members
    }

    pub fn contains(&self, id: AxiomId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Signature of the final pass (seed plus every module axiom's entities)
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    pub fn into_axioms(self) -> Vec<AxiomId> {
        self.axioms
    }
}

/// Locality-based module extractor
pub struct Modularizer<C = SyntacticLocalityChecker> {
    checker: C,
    sig: Signature,
    sig_index: Option<SigIndex>,
    module: Vec<AxiomId>,
    in_module: HashSet<AxiomId>,
    in_scratch: HashSet<AxiomId>,
    pending: Vec<Entity>,
    current: ExtractionStats,
    stats: ModularizerStats,
}

impl Modularizer<SyntacticLocalityChecker> {
    /// Modularizer using plain syntactic locality
    pub fn syntactic() -> Self {
        Self::new(SyntacticLocalityChecker::new())
    }
}

impl Default for Modularizer<SyntacticLocalityChecker> {
    fn default() -> Self {
        Self::syntactic()
    }
}

impl<C: LocalityChecker> Modularizer<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            sig: Signature::new(),
            sig_index: None,
            module: Vec::new(),
            in_module: HashSet::new(),
            in_scratch: HashSet::new(),
            pending: Vec::new(),
            current: ExtractionStats::default(),
            stats: ModularizerStats::default(),
        }
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn checker_mut(&mut self) -> &mut C {
        &mut self.checker
    }

    /// Signature of the last extraction pass
    pub fn signature(&self) -> &Signature {
        &self.sig
    }

    pub fn stats(&self) -> ModularizerStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ModularizerStats::default();
    }

    pub fn sig_index(&self) -> Option<&SigIndex> {
        self.sig_index.as_ref()
    }

    /// Install (or remove) the index used by later extractions
    pub fn set_sig_index(&mut self, index: Option<SigIndex>) {
        self.sig_index = index;
    }

    pub fn take_sig_index(&mut self) -> Option<SigIndex> {
        self.sig_index.take()
    }

    /// Index every axiom of the ontology currently in use
    pub fn build_sig_index(&mut self, ontology: &OwlDlOntology) -> Result<(), ModularityError> {
        let index = SigIndex::build(ontology, &mut self.checker)?;
        self.sig_index = Some(index);
        Ok(())
    }

    pub fn preprocess_ontology(&mut self, ontology: &OwlDlOntology) -> Result<(), ModularityError> {
        self.checker.preprocess_ontology(ontology)
    }

    /// True if the axiom is local w.r.t. its own signature; for star
    /// modules locality under either polarity suffices
    pub fn is_tautology(&mut self, entry: &OntologyAxiom, module_type: ModuleType) -> Result<bool, ModularityError> {
        let mut sig: Signature = entry.entities().clone().into();
        let localities: &[Locality] = match module_type {
            ModuleType::Top => &[Locality::Top],
            ModuleType::Bottom => &[Locality::Bottom],
            ModuleType::Star => &[Locality::Top, Locality::Bottom],
        };
        for &locality in localities {
            sig.set_locality(locality);
            if self.checker.local(&entry.axiom, &sig)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Module of `seed` over every axiom of the ontology in use
    pub fn extract_ontology(
        &mut self,
        ontology: &OwlDlOntology,
        seed: &Signature,
        module_type: ModuleType,
    ) -> Result<Module, ModularityError> {
        let range = ontology.ids();
        self.extract(ontology, &range, seed, module_type)
    }

    /// Module of `seed` within the given axiom range
    pub fn extract(
        &mut self,
        ontology: &OwlDlOntology,
        range: &[AxiomId],
        seed: &Signature,
        module_type: ModuleType,
    ) -> Result<Module, ModularityError> {
        if let Some(&missing) = range.iter().find(|id| ontology.get(**id).is_none()) {
            return Err(ModularityError::UnknownAxiom(missing));
        }

        self.current = ExtractionStats::default();
        let mut locality = module_type.initial_locality();
        self.run_pass(ontology, range, seed, locality)?;

        if module_type == ModuleType::Star {
            loop {
                let size = self.module.len();
                let previous = std::mem::take(&mut self.module);
                locality = locality.opposite();
                self.run_pass(ontology, &previous, seed, locality)?;
                trace!(
                    "Star pass {} ({:?}): {} -> {} axioms",
                    self.current.passes,
                    locality,
                    size,
                    self.module.len()
                );
                if self.module.len() == size {
                    break;
                }
            }
        }

        let stats = self.current;
        self.stats.record(&stats);
        debug!(
            "Extracted {:?} module: {} axioms from {} ({} checks, {} non-local)",
            module_type,
            self.module.len(),
            range.len(),
            stats.checks,
            stats.non_local
        );

        Ok(Module {
            axioms: self.module.clone(),
            members: self.module.iter().copied().collect(),
            signature: self.sig.clone(),
            stats,
        })
    }

    fn run_pass(
        &mut self,
        ontology: &OwlDlOntology,
        range: &[AxiomId],
        seed: &Signature,
        locality: Locality,
    ) -> Result<(), ModularityError> {
        self.sig = seed.clone();
        self.sig.set_locality(locality);
        self.module.clear();
        self.in_module.clear();
        self.pending.clear();
        self.current.passes += 1;

        let index = match self.sig_index.take() {
            Some(index) if covers(&index, ontology, range) => index,
            other => {
                self.sig_index = other;
                return self.extract_linear(ontology, range);
            }
        };
        let result = self.extract_indexed(ontology, range, &index, locality);
        self.sig_index = Some(index);
        result
    }

    /// Rescan the range until a full scan leaves the signature unchanged
    fn extract_linear(&mut self, ontology: &OwlDlOntology, range: &[AxiomId]) -> Result<(), ModularityError> {
        loop {
            let size = self.sig.len();
            for &id in range {
                if self.in_module.contains(&id) {
                    continue;
                }
                let entry = &ontology[id];
                if entry.is_used() && self.is_non_local(entry)? {
                    self.add_to_module(entry);
                }
            }
            if self.sig.len() == size {
                return Ok(());
            }
        }
    }

    /// Start from the axioms that are non-local for any signature, then
    /// re-examine only the axioms of newly added entities
    fn extract_indexed(
        &mut self,
        ontology: &OwlDlOntology,
        range: &[AxiomId],
        index: &SigIndex,
        locality: Locality,
    ) -> Result<(), ModularityError> {
        self.in_scratch.clear();
        self.in_scratch.extend(range.iter().copied());

        for &id in index.non_local(locality) {
            if !self.in_scratch.contains(&id) || self.in_module.contains(&id) {
                continue;
            }
            let entry = &ontology[id];
            if entry.is_used() {
                self.current.non_local += 1;
                self.add_to_module(entry);
            }
        }

        self.pending.extend(self.sig.iter().cloned());
        while let Some(entity) = self.pending.pop() {
            for id in index.get_axioms(&entity) {
                if !self.in_scratch.contains(&id) || self.in_module.contains(&id) {
                    continue;
                }
                let entry = &ontology[id];
                if entry.is_used() && self.is_non_local(entry)? {
                    self.add_to_module(entry);
                }
            }
        }
        Ok(())
    }

    fn is_non_local(&mut self, entry: &OntologyAxiom) -> Result<bool, ModularityError> {
        self.current.checks += 1;
        let local = self.checker.local(&entry.axiom, &self.sig)?;
        if !local {
            self.current.non_local += 1;
        }
        Ok(!local)
    }

    fn add_to_module(&mut self, entry: &OntologyAxiom) {
        self.in_module.insert(entry.id);
        self.module.push(entry.id);
        for entity in entry.entities() {
            if self.sig.add(entity.clone()) {
                self.pending.push(entity.clone());
            }
        }
    }
}

/// The index can drive an extraction only if it knows every used axiom of the range
fn covers(index: &SigIndex, ontology: &OwlDlOntology, range: &[AxiomId]) -> bool {
    range.iter().all(|&id| index.contains(id) || !ontology.is_used(id))
}
