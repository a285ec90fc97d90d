//! 局所性に基づくモジュール抽出と原子分解
//!
//! このクレートは OWL DL オントロジーに対して以下を提供します:
//! - シグネチャ (エンティティ集合 + 局所性の極性)
//! - 構文的 / 拡張構文的 / 意味的な局所性判定
//! - エンティティから公理への逆引きインデックス (SigIndex)
//! - TOP / BOTTOM / STAR モジュール抽出
//! - 原子分解 (AOStructure) と依存グラフの簡約

pub mod checker;
pub mod config;
pub mod decomposer;
pub mod locality;
pub mod modularizer;
pub mod progress;
pub mod sig_index;
pub mod signature;

pub use checker::{ExtendedSyntacticLocalityChecker, LocalityChecker, SyntacticLocalityChecker};
pub use config::{LocalityKind, ModularityConfig};
pub use decomposer::{AOStructure, Atom, AtomId, AtomicDecomposer};
pub use locality::{
    Bound, BoundMode, EquivalenceEvaluator, ExtendedSyntacticEvaluator, LocalityOracle,
    RoleCharacteristic, SemanticLocalityChecker, SyntacticEvaluator,
};
pub use modularizer::{ExtractionStats, Modularizer, ModularizerStats, Module, ModuleType};
pub use progress::{Progress, ProgressIndicator, TracingProgress};
pub use sig_index::SigIndex;
pub use signature::{Locality, Signature};

use fukurow_dl::AxiomId;
use thiserror::Error;

/// Failure reported by a reasoning oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Ontology is inconsistent")]
    Inconsistent,

    #[error("Oracle timed out after {0} ms")]
    Timeout(u64),

    #[error("Unsupported by oracle: {0}")]
    Unsupported(String),

    #[error("Reasoning error: {0}")]
    Reasoning(String),
}

#[derive(Error, Debug)]
pub enum ModularityError {
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Unknown axiom: {0}")]
    UnknownAxiom(AxiomId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
