//! 構文的局所性: ⊤/⊥ 同値性の構造的な規則

use super::EquivalenceEvaluator;
use crate::signature::Signature;
use fukurow_dl::{
    ClassExpression, DataPropertyExpression, DataRange, EntityKind, Expression,
    ObjectPropertyExpression,
};

/// Purely structural top/bottom equivalence.
///
/// A name outside the signature is top-equivalent under top polarity and
/// bottom-equivalent under bottom polarity. Concept names follow the
/// concept polarity, object and data role names follow the role polarity.
/// Datatypes and literals are never part of a signature and are judged by
/// their shape alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticEvaluator;

impl SyntacticEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn top_class(&self, expr: &ClassExpression, sig: &Signature) -> bool {
        match expr {
            ClassExpression::Thing => true,
            ClassExpression::Nothing => false,
            ClassExpression::Named(iri) => {
                sig.top_concepts() && !sig.contains_named(EntityKind::Concept, iri)
            }
            ClassExpression::ComplementOf(c) => self.bot_class(c, sig),
            ClassExpression::IntersectionOf(cs) => cs.iter().all(|c| self.top_class(c, sig)),
            ClassExpression::UnionOf(cs) => cs.iter().any(|c| self.top_class(c, sig)),
            ClassExpression::OneOf(_) => false,
            ClassExpression::HasSelf(r) | ClassExpression::HasValue { property: r, .. } => {
                self.top_role(r, sig)
            }
            ClassExpression::SomeValuesFrom { property, class } => {
                self.top_role(property, sig) && self.top_class(class, sig)
            }
            ClassExpression::AllValuesFrom { property, class } => {
                self.top_class(class, sig) || self.bot_role(property, sig)
            }
            ClassExpression::MinCardinality { cardinality, property, class } => {
                *cardinality == 0 || (self.top_role(property, sig) && self.top_class(class, sig))
            }
            ClassExpression::MaxCardinality { property, class, .. } => {
                self.bot_class(class, sig) || self.bot_role(property, sig)
            }
            ClassExpression::ExactCardinality { cardinality, property, class } => {
                *cardinality == 0 && (self.bot_class(class, sig) || self.bot_role(property, sig))
            }
            ClassExpression::DataHasValue { property, .. } => self.top_data_role(property, sig),
            ClassExpression::DataSomeValuesFrom { property, range } => {
                self.top_data_role(property, sig) && self.top_range(range)
            }
            ClassExpression::DataAllValuesFrom { property, range } => {
                self.top_range(range) || self.bot_data_role(property, sig)
            }
            ClassExpression::DataMinCardinality { cardinality, property, range } => {
                *cardinality == 0 || (self.top_data_role(property, sig) && self.top_range(range))
            }
            ClassExpression::DataMaxCardinality { property, range, .. } => {
                self.bot_range(range) || self.bot_data_role(property, sig)
            }
            ClassExpression::DataExactCardinality { cardinality, property, range } => {
                *cardinality == 0 && (self.bot_range(range) || self.bot_data_role(property, sig))
            }
        }
    }

    fn bot_class(&self, expr: &ClassExpression, sig: &Signature) -> bool {
        match expr {
            ClassExpression::Thing => false,
            ClassExpression::Nothing => true,
            ClassExpression::Named(iri) => {
                !sig.top_concepts() && !sig.contains_named(EntityKind::Concept, iri)
            }
            ClassExpression::ComplementOf(c) => self.top_class(c, sig),
            ClassExpression::IntersectionOf(cs) => cs.iter().any(|c| self.bot_class(c, sig)),
            ClassExpression::UnionOf(cs) => cs.iter().all(|c| self.bot_class(c, sig)),
            ClassExpression::OneOf(individuals) => individuals.is_empty(),
            ClassExpression::HasSelf(r) | ClassExpression::HasValue { property: r, .. } => {
                self.bot_role(r, sig)
            }
            ClassExpression::SomeValuesFrom { property, class } => {
                self.bot_role(property, sig) || self.bot_class(class, sig)
            }
            ClassExpression::AllValuesFrom { property, class } => {
                self.top_role(property, sig) && self.bot_class(class, sig)
            }
            ClassExpression::MinCardinality { cardinality, property, class } => {
                *cardinality > 0 && (self.bot_role(property, sig) || self.bot_class(class, sig))
            }
            ClassExpression::MaxCardinality { property, class, .. } => {
                self.top_role(property, sig) && self.top_class(class, sig)
            }
            ClassExpression::ExactCardinality { cardinality, property, class } => {
                (*cardinality > 0 && (self.bot_role(property, sig) || self.bot_class(class, sig)))
                    || (self.top_role(property, sig) && self.top_class(class, sig))
            }
            ClassExpression::DataHasValue { property, .. } => self.bot_data_role(property, sig),
            ClassExpression::DataSomeValuesFrom { property, range } => {
                self.bot_data_role(property, sig) || self.bot_range(range)
            }
            ClassExpression::DataAllValuesFrom { property, range } => {
                self.top_data_role(property, sig) && self.bot_range(range)
            }
            ClassExpression::DataMinCardinality { cardinality, property, range } => {
                *cardinality > 0 && (self.bot_data_role(property, sig) || self.bot_range(range))
            }
            ClassExpression::DataMaxCardinality { property, range, .. } => {
                self.top_data_role(property, sig) && self.top_range(range)
            }
            ClassExpression::DataExactCardinality { cardinality, property, range } => {
                (*cardinality > 0 && (self.bot_data_role(property, sig) || self.bot_range(range)))
                    || (self.top_data_role(property, sig) && self.top_range(range))
            }
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
                self.top_role(property, sig) && self.top_class(class, sig)
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
                self.bot_role(property, sig) || self.bot_class(class, sig)
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

    fn top_range(&self, expr: &DataRange) -> bool {
        match expr {
            DataRange::TopDatatype => true,
            DataRange::BottomDatatype
            | DataRange::Datatype(_)
            | DataRange::DatatypeRestriction { .. }
            | DataRange::Value(_)
            | DataRange::OneOf(_) => false,
            DataRange::ComplementOf(d) => self.bot_range(d),
            DataRange::IntersectionOf(ds) => ds.iter().all(|d| self.top_range(d)),
            DataRange::UnionOf(ds) => ds.iter().any(|d| self.top_range(d)),
        }
    }

    fn bot_range(&self, expr: &DataRange) -> bool {
        match expr {
            DataRange::BottomDatatype => true,
            DataRange::TopDatatype
            | DataRange::Datatype(_)
            | DataRange::DatatypeRestriction { .. }
            | DataRange::Value(_) => false,
            DataRange::OneOf(values) => values.is_empty(),
            DataRange::ComplementOf(d) => self.top_range(d),
            DataRange::IntersectionOf(ds) => ds.iter().any(|d| self.bot_range(d)),
            DataRange::UnionOf(ds) => ds.iter().all(|d| self.bot_range(d)),
        }
    }
}

impl EquivalenceEvaluator for SyntacticEvaluator {
    fn is_top_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool {
        match expr {
            Expression::Class(c) => self.top_class(c, sig),
            Expression::ObjectProperty(r) => self.top_role(r, sig),
            Expression::DataProperty(r) => self.top_data_role(r, sig),
            Expression::DataRange(d) => self.top_range(d),
        }
    }

    fn is_bot_equivalent(&self, expr: Expression<'_>, sig: &Signature) -> bool {
        match expr {
            Expression::Class(c) => self.bot_class(c, sig),
            Expression::ObjectProperty(r) => self.bot_role(r, sig),
            Expression::DataProperty(r) => self.bot_data_role(r, sig),
            Expression::DataRange(d) => self.bot_range(d),
        }
    }
}
