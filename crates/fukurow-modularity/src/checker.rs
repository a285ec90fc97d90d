//! 公理の局所性判定
//!
//! 公理の種類ごとの局所性条件を評価器の上に組み立てる。

use crate::locality::{EquivalenceEvaluator, ExtendedSyntacticEvaluator, SyntacticEvaluator};
use crate::signature::Signature;
use crate::ModularityError;
use fukurow_dl::{Axiom, ClassExpression, Expression, OwlDlOntology};

/// Decides whether an axiom is local with respect to a signature
pub trait LocalityChecker {
    fn local(&mut self, axiom: &Axiom, sig: &Signature) -> Result<bool, ModularityError>;

    /// Prepare for a (possibly changed) ontology before a batch of checks
    fn preprocess_ontology(&mut self, _ontology: &OwlDlOntology) -> Result<(), ModularityError> {
        Ok(())
    }
}

impl<C: LocalityChecker + ?Sized> LocalityChecker for Box<C> {
    fn local(&mut self, axiom: &Axiom, sig: &Signature) -> Result<bool, ModularityError> {
        (**self).local(axiom, sig)
    }

    fn preprocess_ontology(&mut self, ontology: &OwlDlOntology) -> Result<(), ModularityError> {
        (**self).preprocess_ontology(ontology)
    }
}

/// Axiom locality built from a top/bottom equivalence evaluator
#[derive(Debug, Clone, Default)]
pub struct SyntacticLocalityChecker<E = SyntacticEvaluator> {
    evaluator: E,
}

/// Locality checker on top of the cardinality-bound evaluator
pub type ExtendedSyntacticLocalityChecker = SyntacticLocalityChecker<ExtendedSyntacticEvaluator>;

impl SyntacticLocalityChecker<SyntacticEvaluator> {
    pub fn new() -> Self {
        Self { evaluator: SyntacticEvaluator }
    }
}

impl SyntacticLocalityChecker<ExtendedSyntacticEvaluator> {
    pub fn extended() -> Self {
        Self { evaluator: ExtendedSyntacticEvaluator }
    }
}

impl<E: EquivalenceEvaluator> SyntacticLocalityChecker<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    fn top<'a>(&self, expr: impl Into<Expression<'a>>, sig: &Signature) -> bool {
        self.evaluator.is_top_equivalent(expr.into(), sig)
    }

    fn bot<'a>(&self, expr: impl Into<Expression<'a>>, sig: &Signature) -> bool {
        self.evaluator.is_bot_equivalent(expr.into(), sig)
    }

    /// Local iff all members are bottom-equivalent or all are top-equivalent
    fn all_equivalent<'a, T>(&self, items: &'a [T], sig: &Signature) -> bool
    where
        &'a T: Into<Expression<'a>>,
    {
        if items.len() <= 1 {
            return true;
        }
        items.iter().all(|x| self.bot(x, sig)) || items.iter().all(|x| self.top(x, sig))
    }

    /// At most one member is not bottom-equivalent
    fn at_most_one_not_bot<'a, T>(&self, items: &'a [T], sig: &Signature) -> bool
    where
        &'a T: Into<Expression<'a>>,
    {
        items.iter().filter(|x| !self.bot(*x, sig)).take(2).count() <= 1
    }

    fn disjoint_union(&self, class: &ClassExpression, parts: &[ClassExpression], sig: &Signature) -> bool {
        // (A ≡ ⊥ and every Ci ≡ ⊥) or (A ≡ ⊤, exactly one Ci ≡ ⊤, the rest ≡ ⊥)
        let lhs_top = if self.top(class, sig) {
            true
        } else if self.bot(class, sig) {
            false
        } else {
            return false;
        };

        let mut top_part = false;
        for part in parts {
            if self.bot(part, sig) {
                continue;
            }
            if !lhs_top || top_part || !self.top(part, sig) {
                return false;
            }
            top_part = true;
        }
        !lhs_top || top_part
    }

    /// Locality of a single axiom; syntactic checks cannot fail
    pub fn is_local(&self, axiom: &Axiom, sig: &Signature) -> bool {
        match axiom {
            Axiom::Declaration(_) => true,
            Axiom::EquivalentClasses(classes) => self.all_equivalent(classes, sig),
            Axiom::DisjointClasses(classes) => self.at_most_one_not_bot(classes, sig),
            Axiom::DisjointUnion(class, parts) => self.disjoint_union(class, parts, sig),
            // Roles follow the class rule: all bottom- or all top-equivalent,
            // not the polarity-dependent role equivalence
            Axiom::EquivalentObjectProperties(roles) => self.all_equivalent(roles, sig),
            Axiom::EquivalentDataProperties(roles) => self.all_equivalent(roles, sig),
            Axiom::DisjointObjectProperties(roles) => {
                !sig.top_roles()
                    && roles
                        .iter()
                        .filter(|r| !self.evaluator.is_role_equivalent((*r).into(), sig))
                        .take(2)
                        .count()
                        <= 1
            }
            Axiom::DisjointDataProperties(roles) => {
                !sig.top_roles()
                    && roles
                        .iter()
                        .filter(|r| !self.evaluator.is_role_equivalent((*r).into(), sig))
                        .take(2)
                        .count()
                        <= 1
            }
            Axiom::SameIndividual(_) | Axiom::DifferentIndividuals(_) => false,
            Axiom::FairnessConstraint(_) => true,
            Axiom::InverseObjectProperties(r, s) => {
                (self.bot(r, sig) && self.bot(s, sig)) || (self.top(r, sig) && self.top(s, sig))
            }
            Axiom::SubObjectPropertyOf(sub, sup) => self.top(sup, sig) || self.bot(sub, sig),
            Axiom::SubDataPropertyOf(sub, sup) => self.top(sup, sig) || self.bot(sub, sig),
            Axiom::ObjectPropertyDomain(r, c) | Axiom::ObjectPropertyRange(r, c) => {
                self.top(c, sig) || self.bot(r, sig)
            }
            Axiom::DataPropertyDomain(r, c) => self.top(c, sig) || self.bot(r, sig),
            Axiom::DataPropertyRange(r, d) => self.top(d, sig) || self.bot(r, sig),
            Axiom::TransitiveProperty(r) | Axiom::SymmetricProperty(r) => {
                self.evaluator.is_role_equivalent(r.into(), sig)
            }
            Axiom::ReflexiveProperty(r) => self.top(r, sig),
            Axiom::IrreflexiveProperty(r)
            | Axiom::AsymmetricProperty(r)
            | Axiom::FunctionalProperty(r)
            | Axiom::InverseFunctionalProperty(r) => self.bot(r, sig),
            Axiom::FunctionalDataProperty(r) => self.bot(r, sig),
            Axiom::SubClassOf(sub, sup) => self.bot(sub, sig) || self.top(sup, sig),
            Axiom::ClassAssertion(c, _) => self.top(c, sig),
            Axiom::ObjectPropertyAssertion(r, _, _) => self.top(r, sig),
            Axiom::NegativeObjectPropertyAssertion(r, _, _) => self.bot(r, sig),
            Axiom::DataPropertyAssertion(r, _, _) => self.top(r, sig),
            Axiom::NegativeDataPropertyAssertion(r, _, _) => self.bot(r, sig),
        }
    }
}

impl<E: EquivalenceEvaluator> LocalityChecker for SyntacticLocalityChecker<E> {
    fn local(&mut self, axiom: &Axiom, sig: &Signature) -> Result<bool, ModularityError> {
        Ok(self.is_local(axiom, sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Locality;
    use fukurow_dl::{
        DataPropertyExpression, DataRange, Entity, Individual, Literal, ObjectPropertyExpression,
        OwlIri,
    };

    fn sig(locality: Locality, entities: &[Entity]) -> Signature {
        let mut sig: Signature = entities.iter().cloned().collect();
        sig.set_locality(locality);
        sig
    }

    fn named(name: &str) -> ClassExpression {
        ClassExpression::named(name)
    }

    fn role(name: &str) -> ObjectPropertyExpression {
        ObjectPropertyExpression::named(name)
    }

    #[test]
    fn test_declaration_and_fairness_always_local() {
        let checker = SyntacticLocalityChecker::new();
        let s = sig(Locality::Bottom, &[Entity::concept("A")]);
        assert!(checker.is_local(&Axiom::Declaration(Entity::concept("A")), &s));
        assert!(checker.is_local(&Axiom::FairnessConstraint(vec![named("A")]), &s));
    }

    #[test]
    fn test_individual_equalities_never_local() {
        let checker = SyntacticLocalityChecker::new();
        let s = sig(Locality::Top, &[]);
        let ab = vec![Individual::new("a"), Individual::new("b")];
        assert!(!checker.is_local(&Axiom::SameIndividual(ab.clone()), &s));
        assert!(!checker.is_local(&Axiom::DifferentIndividuals(ab), &s));
    }

    #[test]
    fn test_equivalent_classes() {
        let checker = SyntacticLocalityChecker::new();
        let axiom = Axiom::EquivalentClasses(vec![named("X"), named("Y")]);

        // both names excluded: top-equivalent under top polarity
        assert!(checker.is_local(&axiom, &sig(Locality::Top, &[])));
        assert!(checker.is_local(&axiom, &sig(Locality::Bottom, &[])));
        assert!(!checker.is_local(&axiom, &sig(Locality::Top, &[Entity::concept("X")])));

        let single = Axiom::EquivalentClasses(vec![named("X")]);
        assert!(checker.is_local(&single, &sig(Locality::Top, &[Entity::concept("X")])));
    }

    #[test]
    fn test_equivalent_roles_use_class_rule() {
        let checker = SyntacticLocalityChecker::new();
        let roles = Axiom::EquivalentObjectProperties(vec![role("r"), role("s")]);

        // excluded roles are bottom-equivalent under bottom polarity and
        // top-equivalent under top polarity
        assert!(checker.is_local(&roles, &sig(Locality::Bottom, &[])));
        assert!(checker.is_local(&roles, &sig(Locality::Top, &[])));
        assert!(!checker.is_local(&roles, &sig(Locality::Bottom, &[Entity::object_role("r")])));
        assert!(!checker.is_local(&roles, &sig(Locality::Top, &[Entity::object_role("s")])));

        // one top and one bottom member is not local
        let mixed = Axiom::EquivalentObjectProperties(vec![
            ObjectPropertyExpression::TopObjectProperty,
            ObjectPropertyExpression::BottomObjectProperty,
        ]);
        assert!(!checker.is_local(&mixed, &sig(Locality::Bottom, &[])));

        let data = Axiom::EquivalentDataProperties(vec![
            DataPropertyExpression::named("t"),
            DataPropertyExpression::named("u"),
        ]);
        assert!(checker.is_local(&data, &sig(Locality::Top, &[])));
        assert!(!checker.is_local(&data, &sig(Locality::Bottom, &[Entity::data_role("u")])));
    }

    #[test]
    fn test_disjoint_classes() {
        let checker = SyntacticLocalityChecker::new();
        let axiom = Axiom::DisjointClasses(vec![named("A"), named("B"), named("C")]);

        assert!(checker.is_local(&axiom, &sig(Locality::Bottom, &[Entity::concept("A")])));
        assert!(!checker.is_local(
            &axiom,
            &sig(Locality::Bottom, &[Entity::concept("A"), Entity::concept("B")])
        ));
        assert!(!checker.is_local(&axiom, &sig(Locality::Top, &[])));
    }

    #[test]
    fn test_disjoint_union() {
        let checker = SyntacticLocalityChecker::new();
        let axiom = Axiom::DisjointUnion(named("A"), vec![named("B"), named("C")]);

        assert!(checker.is_local(&axiom, &sig(Locality::Bottom, &[])));
        assert!(!checker.is_local(&axiom, &sig(Locality::Bottom, &[Entity::concept("B")])));
        // A and both parts top-equivalent: two top parts
        assert!(!checker.is_local(&axiom, &sig(Locality::Top, &[])));

        let with_bottom = Axiom::DisjointUnion(named("A"), vec![named("B"), ClassExpression::Nothing]);
        assert!(checker.is_local(&with_bottom, &sig(Locality::Top, &[])));
    }

    #[test]
    fn test_disjoint_roles_need_bottom_polarity() {
        let checker = SyntacticLocalityChecker::new();
        let axiom = Axiom::DisjointObjectProperties(vec![role("r"), role("s")]);

        assert!(checker.is_local(&axiom, &sig(Locality::Bottom, &[Entity::object_role("r")])));
        assert!(!checker.is_local(
            &axiom,
            &sig(Locality::Bottom, &[Entity::object_role("r"), Entity::object_role("s")])
        ));
        assert!(!checker.is_local(&axiom, &sig(Locality::Top, &[])));
    }

    #[test]
    fn test_role_axioms() {
        let checker = SyntacticLocalityChecker::new();
        let bottom = sig(Locality::Bottom, &[]);
        let top = sig(Locality::Top, &[]);

        assert!(checker.is_local(&Axiom::TransitiveProperty(role("r")), &bottom));
        assert!(checker.is_local(&Axiom::TransitiveProperty(role("r")), &top));
        assert!(!checker.is_local(&Axiom::ReflexiveProperty(role("r")), &bottom));
        assert!(checker.is_local(&Axiom::ReflexiveProperty(role("r")), &top));
        assert!(checker.is_local(&Axiom::FunctionalProperty(role("r")), &bottom));
        assert!(!checker.is_local(&Axiom::FunctionalProperty(role("r")), &top));
        assert!(!checker.is_local(&Axiom::AsymmetricProperty(role("r")), &top));

        let sub = Axiom::SubObjectPropertyOf(role("r"), role("s"));
        assert!(checker.is_local(&sub, &bottom));
        assert!(checker.is_local(&sub, &top));
        assert!(!checker.is_local(
            &sub,
            &sig(Locality::Bottom, &[Entity::object_role("r"), Entity::object_role("s")])
        ));

        let inverse = Axiom::InverseObjectProperties(role("r"), role("s"));
        assert!(!checker.is_local(&inverse, &sig(Locality::Bottom, &[Entity::object_role("r")])));
    }

    #[test]
    fn test_domain_and_range() {
        let checker = SyntacticLocalityChecker::new();
        let domain = Axiom::ObjectPropertyDomain(role("r"), named("A"));

        assert!(checker.is_local(&domain, &sig(Locality::Bottom, &[Entity::concept("A")])));
        assert!(!checker.is_local(&domain, &sig(Locality::Bottom, &[Entity::object_role("r")])));

        let range = Axiom::DataPropertyRange(
            DataPropertyExpression::named("age"),
            DataRange::Datatype(OwlIri::new("xsd:integer")),
        );
        assert!(!checker.is_local(&range, &sig(Locality::Top, &[])));
        assert!(checker.is_local(&range, &sig(Locality::Bottom, &[])));
    }

    #[test]
    fn test_assertions() {
        let checker = SyntacticLocalityChecker::new();
        let a = Individual::new("a");
        let b = Individual::new("b");
        let top = sig(Locality::Top, &[]);
        let bottom = sig(Locality::Bottom, &[]);

        let instance = Axiom::ClassAssertion(named("A"), a.clone());
        assert!(checker.is_local(&instance, &top));
        assert!(!checker.is_local(&instance, &bottom));

        let related = Axiom::ObjectPropertyAssertion(role("r"), a.clone(), b.clone());
        assert!(checker.is_local(&related, &top));
        assert!(!checker.is_local(&related, &bottom));

        let not_related = Axiom::NegativeObjectPropertyAssertion(role("r"), a.clone(), b);
        assert!(checker.is_local(&not_related, &bottom));
        assert!(!checker.is_local(&not_related, &top));

        let value = Axiom::DataPropertyAssertion(
            DataPropertyExpression::named("age"),
            a,
            Literal::new("42", "xsd:integer"),
        );
        assert!(checker.is_local(&value, &top));
        assert!(!checker.is_local(&value, &bottom));
    }

    #[test]
    fn test_extended_checker_is_more_precise() {
        let syntactic = SyntacticLocalityChecker::new();
        let extended = SyntacticLocalityChecker::extended();
        let axiom = Axiom::SubClassOf(
            named("A"),
            ClassExpression::max(
                2,
                role("r"),
                ClassExpression::OneOf(vec![Individual::new("a"), Individual::new("b")]),
            ),
        );
        let s = sig(Locality::Bottom, &[Entity::concept("A"), Entity::object_role("r")]);

        assert!(!syntactic.is_local(&axiom, &s));
        assert!(extended.is_local(&axiom, &s));
    }

    #[test]
    fn test_boxed_checker_delegates() {
        let mut checker: Box<dyn LocalityChecker> = Box::new(SyntacticLocalityChecker::new());
        let axiom = Axiom::SubClassOf(named("A"), named("B"));
        let s = sig(Locality::Bottom, &[Entity::concept("A")]);
        assert!(!checker.local(&axiom, &s).unwrap());
    }
}
