//! 局所性評価器
//!
//! 式がシグネチャの下で ⊤ / ⊥ と同値かを判定する。
//! - `syntactic`: 構文規則のみ
//! - `extended`: 濃度の上下界を使う拡張構文的評価
//! - `semantic`: 推論オラクルに委譲する公理レベルの判定

pub mod extended;
pub mod semantic;
pub mod syntactic;

pub use extended::{Bound, BoundMode, ExtendedSyntacticEvaluator};
pub use semantic::{LocalityOracle, RoleCharacteristic, SemanticLocalityChecker};
pub use syntactic::SyntacticEvaluator;

use crate::signature::Signature;
use fukurow_dl::Expression;

/// Decides top / bottom equivalence of expressions under a signature.
///
/// Implementations are pure: equal inputs give equal answers.
pub trait EquivalenceEvaluator {
    fn is_top_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool;

    fn is_bot_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool;

    /// Top-equivalence for top-local roles, bottom-equivalence otherwise
    fn is_role_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool {
        if sig.top_roles() {
            self.is_top_equivalent(expr, sig)
        } else {
            self.is_bot_equivalent(expr, sig)
        }
    }
}
