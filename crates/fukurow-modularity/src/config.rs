//! モジュール抽出・原子分解の設定

use crate::checker::{LocalityChecker, SyntacticLocalityChecker};
use crate::decomposer::AtomicDecomposer;
use crate::locality::{LocalityOracle, SemanticLocalityChecker};
use crate::modularizer::{Modularizer, ModuleType};
use crate::progress::TracingProgress;
use crate::ModularityError;
use fukurow_dl::OwlDlOntology;
use serde::{Deserialize, Serialize};

/// Locality notion used by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalityKind {
    #[default]
    Syntactic,
    ExtendedSyntactic,
    /// Requires a reasoning oracle
    Semantic,
}

/// モジュール化の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModularityConfig {
    pub locality: LocalityKind,
    pub module_type: ModuleType,
    /// 抽出に SigIndex を使うか
    pub use_sig_index: bool,
    /// 分解の進捗を tracing で報告するか
    pub report_progress: bool,
}

impl Default for ModularityConfig {
    fn default() -> Self {
        Self {
            locality: LocalityKind::Syntactic,
            module_type: ModuleType::Bottom,
            use_sig_index: true,
            report_progress: false,
        }
    }
}

impl ModularityConfig {
    pub fn from_json(json: &str) -> Result<Self, ModularityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checker for the syntactic locality kinds
    pub fn build_checker(&self) -> Result<Box<dyn LocalityChecker>, ModularityError> {
        match self.locality {
            LocalityKind::Syntactic => Ok(Box::new(SyntacticLocalityChecker::new())),
            LocalityKind::ExtendedSyntactic => Ok(Box::new(SyntacticLocalityChecker::extended())),
            LocalityKind::Semantic => Err(ModularityError::Config(
                "semantic locality requires an oracle".to_string(),
            )),
        }
    }

    /// Checker for any locality kind; the oracle is used only for `Semantic`
    pub fn build_checker_with_oracle<O>(&self, oracle: O) -> Box<dyn LocalityChecker>
    where
        O: LocalityOracle + 'static,
    {
        match self.locality {
            LocalityKind::Semantic => Box::new(SemanticLocalityChecker::new(oracle)),
            LocalityKind::ExtendedSyntactic => Box::new(SyntacticLocalityChecker::extended()),
            LocalityKind::Syntactic => Box::new(SyntacticLocalityChecker::new()),
        }
    }

    /// Modularizer with the configured checker, indexed over the ontology if enabled
    pub fn modularizer(
        &self,
        ontology: &OwlDlOntology,
    ) -> Result<Modularizer<Box<dyn LocalityChecker>>, ModularityError> {
        let mut modularizer = Modularizer::new(self.build_checker()?);
        modularizer.preprocess_ontology(ontology)?;
        if self.use_sig_index {
            modularizer.build_sig_index(ontology)?;
        }
        Ok(modularizer)
    }

    pub fn decomposer(&self) -> Result<AtomicDecomposer<Box<dyn LocalityChecker>>, ModularityError> {
        Ok(self.configure(AtomicDecomposer::new(self.build_checker()?)))
    }

    pub fn decomposer_with_oracle<O>(&self, oracle: O) -> AtomicDecomposer<Box<dyn LocalityChecker>>
    where
        O: LocalityOracle + 'static,
    {
        self.configure(AtomicDecomposer::new(self.build_checker_with_oracle(oracle)))
    }

    fn configure<C: LocalityChecker>(&self, mut decomposer: AtomicDecomposer<C>) -> AtomicDecomposer<C> {
        decomposer.set_use_sig_index(self.use_sig_index);
        if self.report_progress {
            decomposer.set_progress_indicator(Box::new(TracingProgress::new("Atomic decomposition")));
        }
        decomposer
    }
}
