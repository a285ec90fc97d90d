//! OWL DL オントロジーモデル
//!
//! このクレートは OWL DL の構文レベルの表現を提供します:
//! - クラス式・プロパティ式・データ範囲の閉じた和型
//! - 公理とそのシグネチャ (出現エンティティ) の計算
//! - 公理識別子と使用中フラグを持つオントロジー

pub mod model;
pub mod ontology;

pub use model::{
    Axiom, ClassExpression, DataPropertyExpression, DataRange, Entity, EntityKind, Expression,
    Facet, FacetKind, Individual, Literal, ObjectPropertyExpression, OwlIri,
};
pub use ontology::{AxiomId, OntologyAxiom, OwlDlOntology};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwlDlError {
    #[error("Unknown axiom: {0}")]
    UnknownAxiom(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
