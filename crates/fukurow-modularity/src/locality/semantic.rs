//! 意味的局所性: 推論オラクルへの問い合わせ
//!
//! シグネチャ外のエンティティを ⊤ / ⊥ に置き換えた上で、公理が
//! トートロジーかどうかをオラクルに問い合わせる。オラクルは
//! オントロジーのシグネチャが変わるたびに再初期化される。

use crate::checker::LocalityChecker;
use crate::signature::Signature;
use crate::{ModularityError, OracleError};
use fukurow_dl::{
    Axiom, ClassExpression, DataRange, Entity, Expression, Individual, ObjectPropertyExpression,
    OwlDlOntology,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Role characteristics an oracle can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCharacteristic {
    Transitive,
    Reflexive,
    Irreflexive,
    Symmetric,
    Asymmetric,
    Functional,
    InverseFunctional,
}

/// Reasoning oracle used by semantic locality.
///
/// The oracle answers queries with every entity outside the current
/// signature replaced by top or bottom according to the signature's
/// polarity. Any query may fail, for instance on an inconsistent ontology.
pub trait LocalityOracle {
    /// Reset the oracle to an empty knowledge base over the given entities
    fn preprocess(&mut self, ontology_signature: &BTreeSet<Entity>) -> Result<(), OracleError>;

    /// Signature used to translate excluded entities in later queries
    fn set_signature(&mut self, sig: &Signature) -> Result<(), OracleError>;

    fn is_subsumed_by(&mut self, sub: &ClassExpression, sup: &ClassExpression) -> Result<bool, OracleError>;

    fn is_satisfiable(&mut self, class: &ClassExpression) -> Result<bool, OracleError>;

    fn is_equivalent(&mut self, c: &ClassExpression, d: &ClassExpression) -> Result<bool, OracleError> {
        Ok(self.is_subsumed_by(c, d)? && self.is_subsumed_by(d, c)?)
    }

    fn is_disjoint(&mut self, c: &ClassExpression, d: &ClassExpression) -> Result<bool, OracleError> {
        let both = ClassExpression::IntersectionOf(vec![c.clone(), d.clone()]);
        Ok(!self.is_satisfiable(&both)?)
    }

    /// Role subsumption between two object or two data role expressions
    fn is_sub_role(&mut self, sub: Expression<'_>, sup: Expression<'_>) -> Result<bool, OracleError>;

    fn is_sub_chain(
        &mut self,
        chain: &[ObjectPropertyExpression],
        sup: &ObjectPropertyExpression,
    ) -> Result<bool, OracleError>;

    fn are_disjoint_roles(&mut self, roles: &[Expression<'_>]) -> Result<bool, OracleError>;

    fn has_characteristic(
        &mut self,
        role: Expression<'_>,
        characteristic: RoleCharacteristic,
    ) -> Result<bool, OracleError>;

    fn is_instance(&mut self, individual: &Individual, class: &ClassExpression) -> Result<bool, OracleError>;
}

impl<O: LocalityOracle + ?Sized> LocalityOracle for Box<O> {
    fn preprocess(&mut self, ontology_signature: &BTreeSet<Entity>) -> Result<(), OracleError> {
        (**self).preprocess(ontology_signature)
    }

    fn set_signature(&mut self, sig: &Signature) -> Result<(), OracleError> {
        (**self).set_signature(sig)
    }

    fn is_subsumed_by(&mut self, sub: &ClassExpression, sup: &ClassExpression) -> Result<bool, OracleError> {
        (**self).is_subsumed_by(sub, sup)
    }

    fn is_satisfiable(&mut self, class: &ClassExpression) -> Result<bool, OracleError> {
        (**self).is_satisfiable(class)
    }

    fn is_equivalent(&mut self, c: &ClassExpression, d: &ClassExpression) -> Result<bool, OracleError> {
        (**self).is_equivalent(c, d)
    }

    fn is_disjoint(&mut self, c: &ClassExpression, d: &ClassExpression) -> Result<bool, OracleError> {
        (**self).is_disjoint(c, d)
    }

    fn is_sub_role(&mut self, sub: Expression<'_>, sup: Expression<'_>) -> Result<bool, OracleError> {
        (**self).is_sub_role(sub, sup)
    }

    fn is_sub_chain(
        &mut self,
        chain: &[ObjectPropertyExpression],
        sup: &ObjectPropertyExpression,
    ) -> Result<bool, OracleError> {
        (**self).is_sub_chain(chain, sup)
    }

    fn are_disjoint_roles(&mut self, roles: &[Expression<'_>]) -> Result<bool, OracleError> {
        (**self).are_disjoint_roles(roles)
    }

    fn has_characteristic(
        &mut self,
        role: Expression<'_>,
        characteristic: RoleCharacteristic,
    ) -> Result<bool, OracleError> {
        (**self).has_characteristic(role, characteristic)
    }

    fn is_instance(&mut self, individual: &Individual, class: &ClassExpression) -> Result<bool, OracleError> {
        (**self).is_instance(individual, class)
    }
}

/// Locality decided by asking a dedicated oracle whether the axiom is a
/// tautology once excluded entities are replaced
pub struct SemanticLocalityChecker<O> {
    oracle: O,
    ontology_signature: Option<BTreeSet<Entity>>,
    last_signature: Option<Signature>,
}

impl<O: LocalityOracle> SemanticLocalityChecker<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            ontology_signature: None,
            last_signature: None,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn into_oracle(self) -> O {
        self.oracle
    }

    fn sync_signature(&mut self, sig: &Signature) -> Result<(), OracleError> {
        let unchanged = self
            .last_signature
            .as_ref()
            .map(|last| last == sig && last.same_polarity(sig))
            .unwrap_or(false);
        if !unchanged {
            self.oracle.set_signature(sig)?;
            self.last_signature = Some(sig.clone());
        }
        Ok(())
    }

    fn all_equivalent(&mut self, classes: &[ClassExpression]) -> Result<bool, OracleError> {
        let Some((first, rest)) = classes.split_first() else {
            return Ok(true);
        };
        for other in rest {
            if !self.oracle.is_equivalent(first, other)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn pairwise_disjoint(&mut self, classes: &[ClassExpression]) -> Result<bool, OracleError> {
        for (i, c) in classes.iter().enumerate() {
            for d in &classes[i + 1..] {
                if !self.oracle.is_disjoint(c, d)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn mutual_sub_roles<'a>(&mut self, roles: &[Expression<'a>]) -> Result<bool, OracleError> {
        let Some((first, rest)) = roles.split_first() else {
            return Ok(true);
        };
        for other in rest {
            if !(self.oracle.is_sub_role(*first, *other)? && self.oracle.is_sub_role(*other, *first)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn sub_object_role(
        &mut self,
        sub: &ObjectPropertyExpression,
        sup: &ObjectPropertyExpression,
    ) -> Result<bool, OracleError> {
        match sub {
            ObjectPropertyExpression::Chain(chain) => self.oracle.is_sub_chain(chain, sup),
            // projections are contained in R: R ⊑ S is sufficient
            ObjectPropertyExpression::ProjectionFrom { property, .. }
            | ObjectPropertyExpression::ProjectionInto { property, .. } => {
                self.oracle.is_sub_role(Expression::ObjectProperty(property), sup.into())
            }
            _ => self.oracle.is_sub_role(sub.into(), sup.into()),
        }
    }

    fn characteristic(
        &mut self,
        role: Expression<'_>,
        characteristic: RoleCharacteristic,
    ) -> Result<bool, OracleError> {
        self.oracle.has_characteristic(role, characteristic)
    }

    fn axiom_is_tautology(&mut self, axiom: &Axiom) -> Result<bool, OracleError> {
        match axiom {
            Axiom::Declaration(_) | Axiom::FairnessConstraint(_) => Ok(true),
            Axiom::SameIndividual(_) | Axiom::DifferentIndividuals(_) => Ok(false),
            Axiom::EquivalentClasses(classes) => self.all_equivalent(classes),
            Axiom::DisjointClasses(classes) => self.pairwise_disjoint(classes),
            Axiom::DisjointUnion(class, parts) => {
                let union = ClassExpression::UnionOf(parts.clone());
                Ok(self.oracle.is_equivalent(class, &union)? && self.pairwise_disjoint(parts)?)
            }
            Axiom::EquivalentObjectProperties(roles) => {
                let roles: Vec<Expression<'_>> = roles.iter().map(Expression::from).collect();
                self.mutual_sub_roles(&roles)
            }
            Axiom::EquivalentDataProperties(roles) => {
                let roles: Vec<Expression<'_>> = roles.iter().map(Expression::from).collect();
                self.mutual_sub_roles(&roles)
            }
            Axiom::DisjointObjectProperties(roles) => {
                let roles: Vec<Expression<'_>> = roles.iter().map(Expression::from).collect();
                self.oracle.are_disjoint_roles(&roles)
            }
            Axiom::DisjointDataProperties(roles) => {
                let roles: Vec<Expression<'_>> = roles.iter().map(Expression::from).collect();
                self.oracle.are_disjoint_roles(&roles)
            }
            Axiom::InverseObjectProperties(r, s) => {
                let s_inv = s.clone().inverse();
                let r_inv = r.clone().inverse();
                Ok(self.oracle.is_sub_role(r.into(), (&s_inv).into())?
                    && self.oracle.is_sub_role(s.into(), (&r_inv).into())?)
            }
            Axiom::SubObjectPropertyOf(sub, sup) => self.sub_object_role(sub, sup),
            Axiom::SubDataPropertyOf(sub, sup) => self.oracle.is_sub_role(sub.into(), sup.into()),
            Axiom::ObjectPropertyDomain(r, domain) => {
                let exists = ClassExpression::some(r.clone(), ClassExpression::Thing);
                self.oracle.is_subsumed_by(&exists, domain)
            }
            Axiom::DataPropertyDomain(r, domain) => {
                let exists = ClassExpression::DataSomeValuesFrom {
                    property: r.clone(),
                    range: DataRange::TopDatatype,
                };
                self.oracle.is_subsumed_by(&exists, domain)
            }
            Axiom::ObjectPropertyRange(r, range) => {
                let outside = ClassExpression::some(r.clone(), ClassExpression::not(range.clone()));
                Ok(!self.oracle.is_satisfiable(&outside)?)
            }
            Axiom::DataPropertyRange(r, range) => {
                let outside = ClassExpression::DataSomeValuesFrom {
                    property: r.clone(),
                    range: DataRange::ComplementOf(Box::new(range.clone())),
                };
                Ok(!self.oracle.is_satisfiable(&outside)?)
            }
            Axiom::TransitiveProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Transitive),
            Axiom::ReflexiveProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Reflexive),
            Axiom::IrreflexiveProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Irreflexive),
            Axiom::SymmetricProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Symmetric),
            Axiom::AsymmetricProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Asymmetric),
            Axiom::FunctionalProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Functional),
            Axiom::FunctionalDataProperty(r) => self.characteristic(r.into(), RoleCharacteristic::Functional),
            Axiom::InverseFunctionalProperty(r) => {
                self.characteristic(r.into(), RoleCharacteristic::InverseFunctional)
            }
            Axiom::SubClassOf(sub, sup) => self.oracle.is_subsumed_by(sub, sup),
            Axiom::ClassAssertion(class, individual) => self.oracle.is_instance(individual, class),
            Axiom::ObjectPropertyAssertion(r, i, j) => {
                let value = ClassExpression::HasValue { property: r.clone(), individual: j.clone() };
                self.oracle.is_subsumed_by(&ClassExpression::OneOf(vec![i.clone()]), &value)
            }
            Axiom::NegativeObjectPropertyAssertion(r, i, j) => {
                let value = ClassExpression::HasValue { property: r.clone(), individual: j.clone() };
                self.oracle.is_subsumed_by(&ClassExpression::OneOf(vec![i.clone()]), &ClassExpression::not(value))
            }
            Axiom::DataPropertyAssertion(r, i, v) => {
                let value = ClassExpression::DataHasValue { property: r.clone(), value: v.clone() };
                self.oracle.is_subsumed_by(&ClassExpression::OneOf(vec![i.clone()]), &value)
            }
            Axiom::NegativeDataPropertyAssertion(r, i, v) => {
                let value = ClassExpression::DataHasValue { property: r.clone(), value: v.clone() };
                self.oracle.is_subsumed_by(&ClassExpression::OneOf(vec![i.clone()]), &ClassExpression::not(value))
            }
        }
    }
}

impl<O: LocalityOracle> LocalityChecker for SemanticLocalityChecker<O> {
    fn local(&mut self, axiom: &Axiom, sig: &Signature) -> Result<bool, ModularityError> {
        self.sync_signature(sig)?;
        Ok(self.axiom_is_tautology(axiom)?)
    }

    fn preprocess_ontology(&mut self, ontology: &OwlDlOntology) -> Result<(), ModularityError> {
        let signature = ontology.used_signature();
        if self.ontology_signature.as_ref() == Some(&signature) {
            return Ok(());
        }
        debug!("Re-initialising locality oracle over {} entities", signature.len());
        self.oracle.preprocess(&signature)?;
        self.ontology_signature = Some(signature);
        self.last_signature = None;
        Ok(())
    }
}
