//! 拡張構文的局所性: 濃度の上界・下界による評価
//!
//! 4 つの評価モード (直接上界, 直接下界, 補集合上界, 補集合下界) を
//! 1 つの関数 `bound` にまとめ、モードを引数で切り替えて再帰する。
//! ドメインは無限と仮定する。

use super::EquivalenceEvaluator;
use crate::signature::Signature;
use fukurow_dl::{
    ClassExpression, DataPropertyExpression, DataRange, EntityKind, Expression,
    ObjectPropertyExpression,
};
use serde::{Deserialize, Serialize};

/// Cardinality bound of an expression (or of its complement).
///
/// For upper modes `Finite(n)` reads "at most n elements" and `Infinite`
/// means no bound is known. For lower modes `Finite(n)` reads "at least n
/// elements", `Finite(0)` carries no information and `Infinite` means the
/// extension is infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bound {
    Finite(u32),
    Infinite,
}

impl Bound {
    pub const ZERO: Bound = Bound::Finite(0);

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    /// Saturating sum; `Infinite` absorbs everything
    pub fn plus(self, other: Bound) -> Bound {
        match (self, other) {
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(a.saturating_add(b)),
            _ => Bound::Infinite,
        }
    }

    fn count(n: usize) -> Bound {
        Bound::Finite(u32::try_from(n).unwrap_or(u32::MAX))
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Finite(n) => write!(f, "{}", n),
            Bound::Infinite => write!(f, "∞"),
        }
    }
}

/// Which of the four bounds is being computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundMode {
    /// |C| ≤ n
    UpperDirect,
    /// |C| ≥ n
    LowerDirect,
    /// |¬C| ≤ n
    UpperComplement,
    /// |¬C| ≥ n
    LowerComplement,
}

impl BoundMode {
    /// Mode to use on the operand of a negation
    pub fn complement(self) -> Self {
        match self {
            BoundMode::UpperDirect => BoundMode::UpperComplement,
            BoundMode::UpperComplement => BoundMode::UpperDirect,
            BoundMode::LowerDirect => BoundMode::LowerComplement,
            BoundMode::LowerComplement => BoundMode::LowerDirect,
        }
    }
}

/// Bound-based equivalence: bottom iff the direct upper bound is zero, top
/// iff the complement upper bound is zero.
///
/// Every expression the syntactic evaluator classifies is classified the
/// same way here; cardinality restrictions over enumerations and counted
/// fillers are additionally recognised.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedSyntacticEvaluator;

/// Bounds of an expression that is known to be top, bottom or neither
fn from_equivalence(mode: BoundMode, top: bool, bot: bool) -> Bound {
    match mode {
        BoundMode::UpperDirect if bot => Bound::ZERO,
        BoundMode::UpperComplement if top => Bound::ZERO,
        BoundMode::LowerDirect if top => Bound::Infinite,
        BoundMode::LowerComplement if bot => Bound::Infinite,
        BoundMode::UpperDirect | BoundMode::UpperComplement => Bound::Infinite,
        BoundMode::LowerDirect | BoundMode::LowerComplement => Bound::ZERO,
    }
}

/// Bounds of a finite enumeration with `n` members
fn enumeration(mode: BoundMode, n: usize) -> Bound {
    match mode {
        BoundMode::UpperDirect => Bound::count(n),
        BoundMode::LowerDirect => Bound::count(n.min(1)),
        BoundMode::UpperComplement => Bound::Infinite,
        BoundMode::LowerComplement => Bound::Infinite,
    }
}

fn sum(bounds: impl Iterator<Item = Bound>) -> Bound {
    bounds.fold(Bound::ZERO, Bound::plus)
}

fn meet(bounds: impl Iterator<Item = Bound>) -> Bound {
    bounds.min().unwrap_or(Bound::Infinite)
}

fn join(bounds: impl Iterator<Item = Bound>) -> Bound {
    bounds.max().unwrap_or(Bound::ZERO)
}

impl ExtendedSyntacticEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the bound of `expr` in the given mode
    pub fn bound(&self, mode: BoundMode, expr: Expression<'_>, sig: &Signature) -> Bound {
        match expr {
            Expression::Class(c) => self.class_bound(mode, c, sig),
            Expression::ObjectProperty(r) => {
                from_equivalence(mode, self.top_role(r, sig), self.bot_role(r, sig))
            }
            Expression::DataProperty(r) => {
                from_equivalence(mode, self.top_data_role(r, sig), self.bot_data_role(r, sig))
            }
            Expression::DataRange(d) => self.range_bound(mode, d),
        }
    }

    /// Intersection: upper bound is the tightest conjunct, the complement
    /// is a union of complements.
    fn conjunction<T>(&self, mode: BoundMode, items: &[T], eval: impl Fn(BoundMode, &T) -> Bound) -> Bound {
        match mode {
            BoundMode::UpperDirect => meet(items.iter().map(|c| eval(mode, c))),
            BoundMode::UpperComplement => sum(items.iter().map(|c| eval(mode, c))),
            BoundMode::LowerDirect => {
                if items.iter().all(|c| eval(BoundMode::UpperComplement, c).is_zero()) {
                    Bound::Infinite
                } else {
                    Bound::ZERO
                }
            }
            BoundMode::LowerComplement => join(items.iter().map(|c| eval(mode, c))),
        }
    }

    fn disjunction<T>(&self, mode: BoundMode, items: &[T], eval: impl Fn(BoundMode, &T) -> Bound) -> Bound {
        match mode {
            BoundMode::UpperDirect => sum(items.iter().map(|c| eval(mode, c))),
            BoundMode::UpperComplement => meet(items.iter().map(|c| eval(mode, c))),
            BoundMode::LowerDirect => join(items.iter().map(|c| eval(mode, c))),
            BoundMode::LowerComplement => {
                if items.iter().all(|c| eval(BoundMode::UpperDirect, c).is_zero()) {
                    Bound::Infinite
                } else {
                    Bound::ZERO
                }
            }
        }
    }

    fn class_bound(&self, mode: BoundMode, expr: &ClassExpression, sig: &Signature) -> Bound {
        let class = |m: BoundMode, c: &ClassExpression| self.class_bound(m, c, sig);
        match expr {
            ClassExpression::Thing => from_equivalence(mode, true, false),
            ClassExpression::Nothing => from_equivalence(mode, false, true),
            ClassExpression::Named(iri) => {
                if sig.contains_named(EntityKind::Concept, iri) {
                    from_equivalence(mode, false, false)
                } else {
                    let top = sig.top_concepts();
                    from_equivalence(mode, top, !top)
                }
            }
            ClassExpression::ComplementOf(c) => self.class_bound(mode.complement(), c, sig),
            ClassExpression::IntersectionOf(cs) => self.conjunction(mode, cs, class),
            ClassExpression::UnionOf(cs) => self.disjunction(mode, cs, class),
            ClassExpression::OneOf(individuals) => enumeration(mode, individuals.len()),
            _ => {
                let (top, bot) = self.restriction(expr, sig);
                from_equivalence(mode, top, bot)
            }
        }
    }

    /// (top, bottom) verdict for a restriction class
    fn restriction(&self, expr: &ClassExpression, sig: &Signature) -> (bool, bool) {
        let ud = |c: &ClassExpression| self.class_bound(BoundMode::UpperDirect, c, sig);
        let ld = |c: &ClassExpression| self.class_bound(BoundMode::LowerDirect, c, sig);
        let uc = |c: &ClassExpression| self.class_bound(BoundMode::UpperComplement, c, sig);
        let lc = |c: &ClassExpression| self.class_bound(BoundMode::LowerComplement, c, sig);

        match expr {
            ClassExpression::HasSelf(r) | ClassExpression::HasValue { property: r, .. } => {
                (self.top_role(r, sig), self.bot_role(r, sig))
            }
            ClassExpression::SomeValuesFrom { property, class } => {
                self.at_least(1, self.top_role(property, sig), self.bot_role(property, sig), ud(class), ld(class))
            }
            ClassExpression::MinCardinality { cardinality, property, class } => self.at_least(
                *cardinality,
                self.top_role(property, sig),
                self.bot_role(property, sig),
                ud(class),
                ld(class),
            ),
            ClassExpression::MaxCardinality { cardinality, property, class } => self.at_most(
                *cardinality,
                self.top_role(property, sig),
                self.bot_role(property, sig),
                ud(class),
                ld(class),
            ),
            ClassExpression::ExactCardinality { cardinality, property, class } => {
                let (r_top, r_bot) = (self.top_role(property, sig), self.bot_role(property, sig));
                let min = self.at_least(*cardinality, r_top, r_bot, ud(class), ld(class));
                let max = self.at_most(*cardinality, r_top, r_bot, ud(class), ld(class));
                (min.0 && max.0, min.1 || max.1)
            }
            ClassExpression::AllValuesFrom { property, class } => {
                let top = self.bot_role(property, sig) || uc(class).is_zero();
                let bot = self.top_role(property, sig) && lc(class) >= Bound::Finite(1);
                (top, bot)
            }
            ClassExpression::DataHasValue { property, .. } => {
                (self.top_data_role(property, sig), self.bot_data_role(property, sig))
            }
            ClassExpression::DataSomeValuesFrom { property, range } => self.at_least(
                1,
                self.top_data_role(property, sig),
                self.bot_data_role(property, sig),
                self.range_bound(BoundMode::UpperDirect, range),
                self.range_bound(BoundMode::LowerDirect, range),
            ),
            ClassExpression::DataMinCardinality { cardinality, property, range } => self.at_least(
                *cardinality,
                self.top_data_role(property, sig),
                self.bot_data_role(property, sig),
                self.range_bound(BoundMode::UpperDirect, range),
                self.range_bound(BoundMode::LowerDirect, range),
            ),
            ClassExpression::DataMaxCardinality { cardinality, property, range } => self.at_most(
                *cardinality,
                self.top_data_role(property, sig),
                self.bot_data_role(property, sig),
                self.range_bound(BoundMode::UpperDirect, range),
                self.range_bound(BoundMode::LowerDirect, range),
            ),
            ClassExpression::DataExactCardinality { cardinality, property, range } => {
                let (r_top, r_bot) = (self.top_data_role(property, sig), self.bot_data_role(property, sig));
                let upper = self.range_bound(BoundMode::UpperDirect, range);
                let lower = self.range_bound(BoundMode::LowerDirect, range);
                let min = self.at_least(*cardinality, r_top, r_bot, upper, lower);
                let max = self.at_most(*cardinality, r_top, r_bot, upper, lower);
                (min.0 && max.0, min.1 || max.1)
            }
            ClassExpression::DataAllValuesFrom { property, range } => {
                let top = self.bot_data_role(property, sig)
                    || self.range_bound(BoundMode::UpperComplement, range).is_zero();
                let bot = self.top_data_role(property, sig)
                    && self.range_bound(BoundMode::LowerComplement, range) >= Bound::Finite(1);
                (top, bot)
            }
            ClassExpression::Thing
            | ClassExpression::Nothing
            | ClassExpression::Named(_)
            | ClassExpression::ComplementOf(_)
            | ClassExpression::IntersectionOf(_)
            | ClassExpression::UnionOf(_)
            | ClassExpression::OneOf(_) => {
                let ud = self.class_bound(BoundMode::UpperDirect, expr, sig);
                let uc = self.class_bound(BoundMode::UpperComplement, expr, sig);
                (uc.is_zero(), ud.is_zero())
            }
        }
    }

    /// ≥m R.C given the role verdict and the filler bounds
    fn at_least(&self, m: u32, role_top: bool, role_bot: bool, filler_upper: Bound, filler_lower: Bound) -> (bool, bool) {
        let top = m == 0 || (role_top && filler_lower >= Bound::Finite(m));
        let bot = m > 0 && (role_bot || filler_upper < Bound::Finite(m));
        (top, bot)
    }

    /// ≤m R.C given the role verdict and the filler bounds
    fn at_most(&self, m: u32, role_top: bool, role_bot: bool, filler_upper: Bound, filler_lower: Bound) -> (bool, bool) {
        let top = role_bot || filler_upper <= Bound::Finite(m);
        let bot = role_top && filler_lower > Bound::Finite(m);
        (top, bot)
    }

    fn range_bound(&self, mode: BoundMode, expr: &DataRange) -> Bound {
        let range = |m: BoundMode, d: &DataRange| self.range_bound(m, d);
        match expr {
            DataRange::TopDatatype => from_equivalence(mode, true, false),
            DataRange::BottomDatatype => from_equivalence(mode, false, true),
            DataRange::Datatype(_) | DataRange::DatatypeRestriction { .. } => {
                from_equivalence(mode, false, false)
            }
            DataRange::Value(_) => enumeration(mode, 1),
            DataRange::OneOf(values) => enumeration(mode, values.len()),
            DataRange::ComplementOf(d) => self.range_bound(mode.complement(), d),
            DataRange::IntersectionOf(ds) => self.conjunction(mode, ds, range),
            DataRange::UnionOf(ds) => self.disjunction(mode, ds, range),
        }
    }

    fn top_role(&self, expr: &ObjectPropertyExpression, sig: &Signature) -> bool {
        match expr {
            ObjectPropertyExpression::TopObjectProperty => true,
            ObjectPropertyExpression::BottomObjectProperty => false,
            ObjectPropertyExpression::ObjectProperty(iri) => {
                sig.top_roles() && !sig.contains_named(EntityKind::ObjectRole, iri)
            }
            ObjectPropertyExpression::InverseOf(r) => self.top_role(r, sig),
            ObjectPropertyExpression::Chain(chain) => chain.iter().all(|r| self.top_role(r, sig)),
            ObjectPropertyExpression::ProjectionFrom { property, class }
            | ObjectPropertyExpression::ProjectionInto { property, class } => {
                self.top_role(property, sig)
                    && self.class_bound(BoundMode::UpperComplement, class, sig).is_zero()
            }
        }
    }

    fn bot_role(&self, expr: &ObjectPropertyExpression, sig: &Signature) -> bool {
        match expr {
            ObjectPropertyExpression::TopObjectProperty => false,
            ObjectPropertyExpression::BottomObjectProperty => true,
            ObjectPropertyExpression::ObjectProperty(iri) => {
                !sig.top_roles() && !sig.contains_named(EntityKind::ObjectRole, iri)
            }
            ObjectPropertyExpression::InverseOf(r) => self.bot_role(r, sig),
            ObjectPropertyExpression::Chain(chain) => chain.iter().any(|r| self.bot_role(r, sig)),
            ObjectPropertyExpression::ProjectionFrom { property, class }
            | ObjectPropertyExpression::ProjectionInto { property, class } => {
                self.bot_role(property, sig)
                    || self.class_bound(BoundMode::UpperDirect, class, sig).is_zero()
            }
        }
    }

    fn top_data_role(&self, expr: &DataPropertyExpression, sig: &Signature) -> bool {
        match expr {
            DataPropertyExpression::TopDataProperty => true,
            DataPropertyExpression::BottomDataProperty => false,
            DataPropertyExpression::DataProperty(iri) => {
                sig.top_roles() && !sig.contains_named(EntityKind::DataRole, iri)
            }
        }
    }

    fn bot_data_role(&self, expr: &DataPropertyExpression, sig: &Signature) -> bool {
        match expr {
            DataPropertyExpression::TopDataProperty => false,
            DataPropertyExpression::BottomDataProperty => true,
            DataPropertyExpression::DataProperty(iri) => {
                !sig.top_roles() && !sig.contains_named(EntityKind::DataRole, iri)
            }
        }
    }
}

impl EquivalenceEvaluator for ExtendedSyntacticEvaluator {
    fn is_top_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool {
        self.bound(BoundMode::UpperComplement, expr, sig).is_zero()
    }

    fn is_bot_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool {
        self.bound(BoundMode::UpperDirect, expr, sig).is_zero()
    }
}
