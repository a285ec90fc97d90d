//! 原子分解 (Atomic Decomposition)
//!
//! オントロジーを「原子」に分割する。原子とは、どのモジュールにも常に
//! まとめて含まれる公理の極大集合である。原子間の依存関係は、ある原子の
//! モジュールが別の原子を含むことを表し、非巡回グラフをなす。
//!
//! 自身のシグネチャに対して局所的な公理 (構造的トートロジー) は分解の間
//! 一時的に無効化され、どの原子にも属さない。

use crate::checker::{LocalityChecker, SyntacticLocalityChecker};
use crate::modularizer::{Modularizer, ModularizerStats, ModuleType};
use crate::progress::{Progress, ProgressIndicator};
use crate::signature::Signature;
use crate::ModularityError;
use fukurow_dl::{AxiomId, OwlDlOntology};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use tracing::{debug, info};

/// Index of an atom inside its `AOStructure`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AtomId(pub usize);

impl AtomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AtomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "atom {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    /// Module of the axioms of this atom
    pub module: BTreeSet<AxiomId>,
    pub axioms: BTreeSet<AxiomId>,
    /// Atoms whose axioms appear in `module`
    pub dependencies: BTreeSet<AtomId>,
    pub all_dependencies: BTreeSet<AtomId>,
    /// Dependencies not implied by another dependency
    pub reduced_dependencies: BTreeSet<AtomId>,
}

impl Atom {
    fn new(id: AtomId, module: BTreeSet<AxiomId>) -> Self {
        Self {
            id,
            module,
            axioms: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            all_dependencies: BTreeSet::new(),
            reduced_dependencies: BTreeSet::new(),
        }
    }
}

/// Atoms of an ontology and the dependencies between them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AOStructure {
    atoms: Vec<Atom>,
    atom_of: BTreeMap<AxiomId, AtomId>,
    bottom: Option<AtomId>,
    tautologies: BTreeSet<AxiomId>,
    stats: ModularizerStats,
}

impl AOStructure {
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.0)
    }

    /// Atom containing the axiom; `None` for tautologies and unused axioms
    pub fn atom_of(&self, axiom: AxiomId) -> Option<AtomId> {
        self.atom_of.get(&axiom).copied()
    }

    pub fn axioms(&self, id: AtomId) -> Option<&BTreeSet<AxiomId>> {
        self.atom(id).map(|atom| &atom.axioms)
    }

    pub fn module(&self, id: AtomId) -> Option<&BTreeSet<AxiomId>> {
        self.atom(id).map(|atom| &atom.module)
    }

    pub fn dependencies(&self, id: AtomId) -> Option<&BTreeSet<AtomId>> {
        self.atom(id).map(|atom| &atom.dependencies)
    }

    pub fn all_dependencies(&self, id: AtomId) -> Option<&BTreeSet<AtomId>> {
        self.atom(id).map(|atom| &atom.all_dependencies)
    }

    pub fn reduced_dependencies(&self, id: AtomId) -> Option<&BTreeSet<AtomId>> {
        self.atom(id).map(|atom| &atom.reduced_dependencies)
    }

    /// Atoms depending directly on `id`
    pub fn dependents(&self, id: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms
            .iter()
            .filter(move |atom| atom.dependencies.contains(&id))
            .map(|atom| atom.id)
    }

    /// Atom of the axioms required by every module, if there are any
    pub fn bottom_atom(&self) -> Option<AtomId> {
        self.bottom
    }

    /// Atoms in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Axioms left out of the decomposition as local w.r.t. their own signature
    pub fn tautologies(&self) -> &BTreeSet<AxiomId> {
        &self.tautologies
    }

    pub fn stats(&self) -> ModularizerStats {
        self.stats
    }

    fn new_atom(&mut self, module: BTreeSet<AxiomId>) -> AtomId {
        let id = AtomId(self.atoms.len());
        self.atoms.push(Atom::new(id, module));
        id
    }

    fn assign(&mut self, axiom: AxiomId, atom: AtomId) {
        self.atom_of.insert(axiom, atom);
        self.atoms[atom.0].axioms.insert(axiom);
    }

    fn add_dependency(&mut self, atom: AtomId, dependency: AtomId) {
        if atom != dependency {
            self.atoms[atom.0].dependencies.insert(dependency);
        }
    }

    /// Fill the transitive closure and the reduced edge set of every atom
    fn reduce(&mut self) {
        // Dependencies always have strictly smaller modules
        let mut order: Vec<usize> = (0..self.atoms.len()).collect();
        order.sort_by_key(|&i| self.atoms[i].module.len());

        for i in order {
            let mut all = BTreeSet::new();
            let mut implied = BTreeSet::new();
            for dep in &self.atoms[i].dependencies {
                let closure = &self.atoms[dep.0].all_dependencies;
                assert!(
                    self.atoms[dep.0].module.len() < self.atoms[i].module.len(),
                    "{} depends on {} with a module that is not smaller",
                    self.atoms[i].id,
                    dep
                );
                all.insert(*dep);
                all.extend(closure.iter().copied());
                implied.extend(closure.iter().copied());
            }
            let reduced = self.atoms[i].dependencies.difference(&implied).copied().collect();
            let atom = &mut self.atoms[i];
            atom.all_dependencies = all;
            atom.reduced_dependencies = reduced;
        }
    }
}

/// Pending children of an atom under construction
struct Frame {
    atom: AtomId,
    axiom: AxiomId,
    range: Rc<[AxiomId]>,
    next: usize,
}

pub struct AtomicDecomposer<C = SyntacticLocalityChecker> {
    modularizer: Modularizer<C>,
    use_sig_index: bool,
    progress: Option<Progress<Box<dyn ProgressIndicator>>>,
}

impl AtomicDecomposer<SyntacticLocalityChecker> {
    pub fn syntactic() -> Self {
        Self::new(SyntacticLocalityChecker::new())
    }
}

impl Default for AtomicDecomposer<SyntacticLocalityChecker> {
    fn default() -> Self {
        Self::syntactic()
    }
}

impl<C: LocalityChecker> AtomicDecomposer<C> {
    pub fn new(checker: C) -> Self {
        Self::with_modularizer(Modularizer::new(checker))
    }

    pub fn with_modularizer(modularizer: Modularizer<C>) -> Self {
        Self {
            modularizer,
            use_sig_index: true,
            progress: None,
        }
    }

    pub fn set_use_sig_index(&mut self, use_sig_index: bool) {
        self.use_sig_index = use_sig_index;
    }

    pub fn set_progress_indicator(&mut self, indicator: Box<dyn ProgressIndicator>) {
        self.progress = Some(Progress::new(indicator));
    }

    pub fn modularizer(&self) -> &Modularizer<C> {
        &self.modularizer
    }

    pub fn modularizer_mut(&mut self) -> &mut Modularizer<C> {
        &mut self.modularizer
    }

    /// Decompose the used axioms of the ontology.
    ///
    /// Tautologies are switched off for the duration of the call and are
    /// switched back on before returning, also on error.
    pub fn decompose(
        &mut self,
        ontology: &mut OwlDlOntology,
        module_type: ModuleType,
    ) -> Result<AOStructure, ModularityError> {
        self.modularizer.preprocess_ontology(ontology)?;
        self.modularizer.reset_stats();

        let mut tautologies = BTreeSet::new();
        for id in ontology.ids() {
            if self.modularizer.is_tautology(&ontology[id], module_type)? {
                tautologies.insert(id);
            }
        }
        for &id in &tautologies {
            set_used(ontology, id, false)?;
        }
        debug!("Deactivated {} tautologies", tautologies.len());

        // The caller's index is parked while the decomposition builds its own
        let installed = self.modularizer.take_sig_index();
        let result = self.decompose_active(ontology, module_type);

        self.modularizer.set_sig_index(installed);
        for &id in &tautologies {
            set_used(ontology, id, true)?;
        }

        let mut aos = result?;
        aos.tautologies = tautologies;
        Ok(aos)
    }

    fn decompose_active(
        &mut self,
        ontology: &OwlDlOntology,
        module_type: ModuleType,
    ) -> Result<AOStructure, ModularityError> {
        let mut aos = AOStructure::default();
        let range: Rc<[AxiomId]> = ontology.ids().into();

        if self.use_sig_index {
            self.modularizer.build_sig_index(ontology)?;
        } else {
            self.modularizer.set_sig_index(None);
        }

        let bottom = self.modularizer.extract(ontology, &range, &Signature::new(), module_type)?;
        if !bottom.is_empty() {
            let atom = aos.new_atom(bottom.axiom_set().clone());
            for &id in bottom.axioms() {
                aos.assign(id, atom);
            }
            aos.bottom = Some(atom);
        }

        if let Some(progress) = self.progress.as_mut() {
            progress.set_limit(range.len() as u64);
        }
        for &id in range.iter() {
            if aos.atom_of(id).is_none() {
                self.build_atoms(ontology, &mut aos, id, &range, module_type)?;
            }
            if let Some(progress) = self.progress.as_mut() {
                progress.inc_indicator(1);
            }
        }

        aos.reduce();
        aos.stats = self.modularizer.stats();
        info!(
            "There were {} non-local axioms out of {} totally checked",
            aos.stats.non_local, aos.stats.checks
        );
        debug!("Decomposition produced {} atoms", aos.len());
        Ok(aos)
    }

    /// Create the atom of `root` and, depth first, the atoms of every axiom in its module
    fn build_atoms(
        &mut self,
        ontology: &OwlDlOntology,
        aos: &mut AOStructure,
        root: AxiomId,
        range: &Rc<[AxiomId]>,
        module_type: ModuleType,
    ) -> Result<(), ModularityError> {
        let module = self.self_module(ontology, root, range, module_type)?;
        let atom = aos.new_atom(module.iter().copied().collect());
        aos.assign(root, atom);

        let mut stack = vec![Frame {
            atom,
            axiom: root,
            range: module,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&axiom) = frame.range.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            if axiom == frame.axiom {
                continue;
            }
            let parent = frame.atom;
            let range = Rc::clone(&frame.range);

            let dependency = match aos.atom_of(axiom) {
                Some(existing) => existing,
                None => {
                    let module = self.self_module(ontology, axiom, &range, module_type)?;
                    if module.len() == range.len() {
                        debug_assert_eq!(
                            module.iter().copied().collect::<BTreeSet<_>>(),
                            aos.atoms[parent.0].module,
                            "equal-sized modules must coincide"
                        );
                        aos.assign(axiom, parent);
                        parent
                    } else {
                        let child = aos.new_atom(module.iter().copied().collect());
                        aos.assign(axiom, child);
                        stack.push(Frame {
                            atom: child,
                            axiom,
                            range: module,
                            next: 0,
                        });
                        child
                    }
                }
            };
            aos.add_dependency(parent, dependency);
        }
        Ok(())
    }

    /// Module of the axiom's own signature within `range`
    fn self_module(
        &mut self,
        ontology: &OwlDlOntology,
        axiom: AxiomId,
        range: &[AxiomId],
        module_type: ModuleType,
    ) -> Result<Rc<[AxiomId]>, ModularityError> {
        let seed: Signature = ontology[axiom].entities().clone().into();
        let module = self.modularizer.extract(ontology, range, &seed, module_type)?;
        assert!(
            module.contains(axiom),
            "axiom {} is missing from the module of its own signature",
            axiom
        );
        Ok(module.into_axioms().into())
    }
}

fn set_used(ontology: &mut OwlDlOntology, id: AxiomId, used: bool) -> Result<(), ModularityError> {
    ontology.set_used(id, used).map_err(|_| ModularityError::UnknownAxiom(id))
}
