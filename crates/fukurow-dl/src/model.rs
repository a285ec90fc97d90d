//! OWL DL データモデル
//!
//! 式と公理の閉じた和型。局所性判定はこれらの型に対する網羅的な
//! パターンマッチとして書かれる。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// OWL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwlIri(pub String);

impl OwlIri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwlIri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a named entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EntityKind {
    Concept,
    ObjectRole,
    DataRole,
    Individual,
}

/// Named entity: the unit a signature is made of
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: OwlIri,
}

impl Entity {
    pub fn new(kind: EntityKind, iri: impl Into<String>) -> Self {
        Self { kind, iri: OwlIri::new(iri) }
    }

    pub fn concept(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::Concept, iri)
    }

    pub fn object_role(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::ObjectRole, iri)
    }

    pub fn data_role(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::DataRole, iri)
    }

    pub fn individual(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::Individual, iri)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            EntityKind::Concept => "C",
            EntityKind::ObjectRole => "R",
            EntityKind::DataRole => "D",
            EntityKind::Individual => "I",
        };
        write!(f, "{}:{}", prefix, self.iri)
    }
}

/// OWL Individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Individual(pub OwlIri);

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(OwlIri::new(iri))
    }

    pub fn entity(&self) -> Entity {
        Entity { kind: EntityKind::Individual, iri: self.0.clone() }
    }
}

/// Typed literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: OwlIri,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: OwlIri::new(datatype),
        }
    }
}

/// OWL DL Class Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    /// owl:Thing (⊤)
    Thing,

    /// owl:Nothing (⊥)
    Nothing,

    /// Named class
    Named(OwlIri),

    /// Complement of class: ¬C
    ComplementOf(Box<ClassExpression>),

    /// Intersection of classes: C1 ⊓ C2 ⊓ ... ⊓ Cn
    IntersectionOf(Vec<ClassExpression>),

    /// Union of classes: C1 ⊔ C2 ⊔ ... ⊔ Cn
    UnionOf(Vec<ClassExpression>),

    /// Enumeration of individuals: {i1, i2, ..., in}
    OneOf(Vec<Individual>),

    /// Local reflexivity: ∃R.Self
    HasSelf(ObjectPropertyExpression),

    /// Has value: ∃R.{i}
    HasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },

    /// Existential restriction: ∃R.C
    SomeValuesFrom {
        property: ObjectPropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Universal restriction: ∀R.C
    AllValuesFrom {
        property: ObjectPropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Minimum cardinality: ≥n R.C
    MinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Maximum cardinality: ≤n R.C
    MaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Exact cardinality: =n R.C
    ExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Data has value: ∃T.{v}
    DataHasValue {
        property: DataPropertyExpression,
        value: Literal,
    },

    /// Data existential restriction: ∃T.D
    DataSomeValuesFrom {
        property: DataPropertyExpression,
        range: DataRange,
    },

    /// Data universal restriction: ∀T.D
    DataAllValuesFrom {
        property: DataPropertyExpression,
        range: DataRange,
    },

    /// ≥n T.D
    DataMinCardinality {
        cardinality: u32,
        property: DataPropertyExpression,
        range: DataRange,
    },

    /// ≤n T.D
    DataMaxCardinality {
        cardinality: u32,
        property: DataPropertyExpression,
        range: DataRange,
    },

    /// =n T.D
    DataExactCardinality {
        cardinality: u32,
        property: DataPropertyExpression,
        range: DataRange,
    },
}

impl ClassExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        ClassExpression::Named(OwlIri::new(iri))
    }

    pub fn not(class: ClassExpression) -> Self {
        ClassExpression::ComplementOf(Box::new(class))
    }

    pub fn some(property: ObjectPropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom { property, class: Box::new(class) }
    }

    pub fn all(property: ObjectPropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::AllValuesFrom { property, class: Box::new(class) }
    }

    pub fn min(cardinality: u32, property: ObjectPropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::MinCardinality { cardinality, property, class: Box::new(class) }
    }

    pub fn max(cardinality: u32, property: ObjectPropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::MaxCardinality { cardinality, property, class: Box::new(class) }
    }

    pub fn exactly(cardinality: u32, property: ObjectPropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::ExactCardinality { cardinality, property, class: Box::new(class) }
    }
}

/// OWL DL Object Property Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectPropertyExpression {
    /// owl:topObjectProperty
    TopObjectProperty,

    /// owl:bottomObjectProperty
    BottomObjectProperty,

    /// Named object property
    ObjectProperty(OwlIri),

    /// Inverse property: R⁻
    InverseOf(Box<ObjectPropertyExpression>),

    /// Property chain R1 ∘ ... ∘ Rn (sub-property position only)
    Chain(Vec<ObjectPropertyExpression>),

    /// Projection of R from C: R ∩ (C × ⊤)
    ProjectionFrom {
        property: Box<ObjectPropertyExpression>,
        class: Box<ClassExpression>,
    },

    /// Projection of R into C: R ∩ (⊤ × C)
    ProjectionInto {
        property: Box<ObjectPropertyExpression>,
        class: Box<ClassExpression>,
    },
}

impl ObjectPropertyExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        ObjectPropertyExpression::ObjectProperty(OwlIri::new(iri))
    }

    pub fn inverse(self) -> Self {
        ObjectPropertyExpression::InverseOf(Box::new(self))
    }
}

/// OWL DL Data Property Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataPropertyExpression {
    /// owl:topDataProperty
    TopDataProperty,

    /// owl:bottomDataProperty
    BottomDataProperty,

    /// Named data property
    DataProperty(OwlIri),
}

impl DataPropertyExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        DataPropertyExpression::DataProperty(OwlIri::new(iri))
    }
}

/// Facet kind of a datatype restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetKind {
    MinInclusive,
    MinExclusive,
    MaxInclusive,
    MaxExclusive,
}

/// Single facet restriction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facet {
    pub kind: FacetKind,
    pub value: Literal,
}

/// OWL DL Data Range
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataRange {
    /// rdfs:Literal (top datatype)
    TopDatatype,

    /// Empty data range
    BottomDatatype,

    /// Named datatype
    Datatype(OwlIri),

    /// Datatype with facets
    DatatypeRestriction {
        datatype: OwlIri,
        facets: Vec<Facet>,
    },

    /// Single literal value
    Value(Literal),

    ComplementOf(Box<DataRange>),

    IntersectionOf(Vec<DataRange>),

    UnionOf(Vec<DataRange>),

    OneOf(Vec<Literal>),
}

/// Borrowed view over any expression the locality evaluators can judge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression<'a> {
    Class(&'a ClassExpression),
    ObjectProperty(&'a ObjectPropertyExpression),
    DataProperty(&'a DataPropertyExpression),
    DataRange(&'a DataRange),
}

impl<'a> From<&'a ClassExpression> for Expression<'a> {
    fn from(expr: &'a ClassExpression) -> Self {
        Expression::Class(expr)
    }
}

impl<'a> From<&'a ObjectPropertyExpression> for Expression<'a> {
    fn from(expr: &'a ObjectPropertyExpression) -> Self {
        Expression::ObjectProperty(expr)
    }
}

impl<'a> From<&'a DataPropertyExpression> for Expression<'a> {
    fn from(expr: &'a DataPropertyExpression) -> Self {
        Expression::DataProperty(expr)
    }
}

impl<'a> From<&'a DataRange> for Expression<'a> {
    fn from(expr: &'a DataRange) -> Self {
        Expression::DataRange(expr)
    }
}

/// OWL DL Axiom
///
/// Each variant corresponds to one row of the locality table: concept
/// inclusion is `SubClassOf`, role subsumption is `SubObjectPropertyOf` /
/// `SubDataPropertyOf`, instance-of is `ClassAssertion`, related-to is
/// `ObjectPropertyAssertion` and value-of is `DataPropertyAssertion`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// Entity declaration
    Declaration(Entity),

    /// SubClassOf(C1 C2)
    SubClassOf(ClassExpression, ClassExpression),

    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<ClassExpression>),

    /// DisjointUnion(A C1 ... Cn)
    DisjointUnion(ClassExpression, Vec<ClassExpression>),

    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),

    EquivalentDataProperties(Vec<DataPropertyExpression>),

    DisjointObjectProperties(Vec<ObjectPropertyExpression>),

    DisjointDataProperties(Vec<DataPropertyExpression>),

    /// Same individual
    SameIndividual(Vec<Individual>),

    /// Different individuals
    DifferentIndividuals(Vec<Individual>),

    /// Fairness constraint over the given classes (reasoner extension)
    FairnessConstraint(Vec<ClassExpression>),

    /// InverseObjectProperties(R S)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),

    /// SubObjectPropertyOf(sub sup); `sub` may be a chain or a projection
    SubObjectPropertyOf(ObjectPropertyExpression, ObjectPropertyExpression),

    SubDataPropertyOf(DataPropertyExpression, DataPropertyExpression),

    ObjectPropertyDomain(ObjectPropertyExpression, ClassExpression),

    DataPropertyDomain(DataPropertyExpression, ClassExpression),

    ObjectPropertyRange(ObjectPropertyExpression, ClassExpression),

    DataPropertyRange(DataPropertyExpression, DataRange),

    TransitiveProperty(ObjectPropertyExpression),

    ReflexiveProperty(ObjectPropertyExpression),

    IrreflexiveProperty(ObjectPropertyExpression),

    SymmetricProperty(ObjectPropertyExpression),

    AsymmetricProperty(ObjectPropertyExpression),

    FunctionalProperty(ObjectPropertyExpression),

    FunctionalDataProperty(DataPropertyExpression),

    InverseFunctionalProperty(ObjectPropertyExpression),

    /// Class assertion: C(i)
    ClassAssertion(ClassExpression, Individual),

    /// Object property assertion: R(i, j)
    ObjectPropertyAssertion(ObjectPropertyExpression, Individual, Individual),

    /// Negative object property assertion: ¬R(i, j)
    NegativeObjectPropertyAssertion(ObjectPropertyExpression, Individual, Individual),

    /// Data property assertion: T(i, v)
    DataPropertyAssertion(DataPropertyExpression, Individual, Literal),

    /// Negative data property assertion: ¬T(i, v)
    NegativeDataPropertyAssertion(DataPropertyExpression, Individual, Literal),
}

impl Axiom {
    /// Every entity the axiom mentions textually.
    ///
    /// Datatypes and literals are not entities and never appear here.
    pub fn entities(&self) -> BTreeSet<Entity> {
        let mut collector = EntityCollector::default();
        collector.axiom(self);
        collector.entities
    }

    /// Short name of the axiom kind, used in log output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Axiom::Declaration(_) => "Declaration",
            Axiom::SubClassOf(..) => "SubClassOf",
            Axiom::EquivalentClasses(_) => "EquivalentClasses",
            Axiom::DisjointClasses(_) => "DisjointClasses",
            Axiom::DisjointUnion(..) => "DisjointUnion",
            Axiom::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Axiom::EquivalentDataProperties(_) => "EquivalentDataProperties",
            Axiom::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Axiom::DisjointDataProperties(_) => "DisjointDataProperties",
            Axiom::SameIndividual(_) => "SameIndividual",
            Axiom::DifferentIndividuals(_) => "DifferentIndividuals",
            Axiom::FairnessConstraint(_) => "FairnessConstraint",
            Axiom::InverseObjectProperties(..) => "InverseObjectProperties",
            Axiom::SubObjectPropertyOf(..) => "SubObjectPropertyOf",
            Axiom::SubDataPropertyOf(..) => "SubDataPropertyOf",
            Axiom::ObjectPropertyDomain(..) => "ObjectPropertyDomain",
            Axiom::DataPropertyDomain(..) => "DataPropertyDomain",
            Axiom::ObjectPropertyRange(..) => "ObjectPropertyRange",
            Axiom::DataPropertyRange(..) => "DataPropertyRange",
            Axiom::TransitiveProperty(_) => "TransitiveProperty",
            Axiom::ReflexiveProperty(_) => "ReflexiveProperty",
            Axiom::IrreflexiveProperty(_) => "IrreflexiveProperty",
            Axiom::SymmetricProperty(_) => "SymmetricProperty",
            Axiom::AsymmetricProperty(_) => "AsymmetricProperty",
            Axiom::FunctionalProperty(_) => "FunctionalProperty",
            Axiom::FunctionalDataProperty(_) => "FunctionalDataProperty",
            Axiom::InverseFunctionalProperty(_) => "InverseFunctionalProperty",
            Axiom::ClassAssertion(..) => "ClassAssertion",
            Axiom::ObjectPropertyAssertion(..) => "ObjectPropertyAssertion",
            Axiom::NegativeObjectPropertyAssertion(..) => "NegativeObjectPropertyAssertion",
            Axiom::DataPropertyAssertion(..) => "DataPropertyAssertion",
            Axiom::NegativeDataPropertyAssertion(..) => "NegativeDataPropertyAssertion",
        }
    }
}

/// Walks axioms and expressions, collecting the named entities
#[derive(Debug, Default)]
pub struct EntityCollector {
    pub entities: BTreeSet<Entity>,
}

impl EntityCollector {
    pub fn axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::Declaration(entity) => {
                self.entities.insert(entity.clone());
            }
            Axiom::SubClassOf(sub, sup) => {
                self.class(sub);
                self.class(sup);
            }
            Axiom::EquivalentClasses(classes)
            | Axiom::DisjointClasses(classes)
            | Axiom::FairnessConstraint(classes) => {
                classes.iter().for_each(|c| self.class(c));
            }
            Axiom::DisjointUnion(class, parts) => {
                self.class(class);
                parts.iter().for_each(|c| self.class(c));
            }
            Axiom::EquivalentObjectProperties(properties)
            | Axiom::DisjointObjectProperties(properties) => {
                properties.iter().for_each(|p| self.object_property(p));
            }
            Axiom::EquivalentDataProperties(properties)
            | Axiom::DisjointDataProperties(properties) => {
                properties.iter().for_each(|p| self.data_property(p));
            }
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                individuals.iter().for_each(|i| self.individual(i));
            }
            Axiom::InverseObjectProperties(p1, p2) | Axiom::SubObjectPropertyOf(p1, p2) => {
                self.object_property(p1);
                self.object_property(p2);
            }
            Axiom::SubDataPropertyOf(p1, p2) => {
                self.data_property(p1);
                self.data_property(p2);
            }
            Axiom::ObjectPropertyDomain(p, c) | Axiom::ObjectPropertyRange(p, c) => {
                self.object_property(p);
                self.class(c);
            }
            Axiom::DataPropertyDomain(p, c) => {
                self.data_property(p);
                self.class(c);
            }
            Axiom::DataPropertyRange(p, _) | Axiom::FunctionalDataProperty(p) => {
                self.data_property(p);
            }
            Axiom::TransitiveProperty(p)
            | Axiom::ReflexiveProperty(p)
            | Axiom::IrreflexiveProperty(p)
            | Axiom::SymmetricProperty(p)
            | Axiom::AsymmetricProperty(p)
            | Axiom::FunctionalProperty(p)
            | Axiom::InverseFunctionalProperty(p) => {
                self.object_property(p);
            }
            Axiom::ClassAssertion(c, i) => {
                self.individual(i);
                self.class(c);
            }
            Axiom::ObjectPropertyAssertion(p, i1, i2)
            | Axiom::NegativeObjectPropertyAssertion(p, i1, i2) => {
                self.individual(i1);
                self.object_property(p);
                self.individual(i2);
            }
            Axiom::DataPropertyAssertion(p, i, _) | Axiom::NegativeDataPropertyAssertion(p, i, _) => {
                self.individual(i);
                self.data_property(p);
            }
        }
    }

    pub fn class(&mut self, expr: &ClassExpression) {
        match expr {
            ClassExpression::Thing | ClassExpression::Nothing => {}
            ClassExpression::Named(iri) => {
                self.entities.insert(Entity { kind: EntityKind::Concept, iri: iri.clone() });
            }
            ClassExpression::ComplementOf(c) => self.class(c),
            ClassExpression::IntersectionOf(classes) | ClassExpression::UnionOf(classes) => {
                classes.iter().for_each(|c| self.class(c));
            }
            ClassExpression::OneOf(individuals) => {
                individuals.iter().for_each(|i| self.individual(i));
            }
            ClassExpression::HasSelf(p) => self.object_property(p),
            ClassExpression::HasValue { property, individual } => {
                self.object_property(property);
                self.individual(individual);
            }
            ClassExpression::SomeValuesFrom { property, class }
            | ClassExpression::AllValuesFrom { property, class }
            | ClassExpression::MinCardinality { property, class, .. }
            | ClassExpression::MaxCardinality { property, class, .. }
            | ClassExpression::ExactCardinality { property, class, .. } => {
                self.object_property(property);
                self.class(class);
            }
            ClassExpression::DataHasValue { property, .. }
            | ClassExpression::DataSomeValuesFrom { property, .. }
            | ClassExpression::DataAllValuesFrom { property, .. }
            | ClassExpression::DataMinCardinality { property, .. }
            | ClassExpression::DataMaxCardinality { property, .. }
            | ClassExpression::DataExactCardinality { property, .. } => {
                self.data_property(property);
            }
        }
    }

    pub fn object_property(&mut self, expr: &ObjectPropertyExpression) {
        match expr {
            ObjectPropertyExpression::TopObjectProperty
            | ObjectPropertyExpression::BottomObjectProperty => {}
            ObjectPropertyExpression::ObjectProperty(iri) => {
                self.entities.insert(Entity { kind: EntityKind::ObjectRole, iri: iri.clone() });
            }
            ObjectPropertyExpression::InverseOf(p) => self.object_property(p),
            ObjectPropertyExpression::Chain(chain) => {
                chain.iter().for_each(|p| self.object_property(p));
            }
            ObjectPropertyExpression::ProjectionFrom { property, class }
            | ObjectPropertyExpression::ProjectionInto { property, class } => {
                self.object_property(property);
                self.class(class);
            }
        }
    }

    pub fn data_property(&mut self, expr: &DataPropertyExpression) {
        if let DataPropertyExpression::DataProperty(iri) = expr {
            self.entities.insert(Entity { kind: EntityKind::DataRole, iri: iri.clone() });
        }
    }

    fn individual(&mut self, individual: &Individual) {
        self.entities.insert(individual.entity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_of_subclass_axiom() {
        let axiom = Axiom::SubClassOf(
            ClassExpression::named("http://example.org/Student"),
            ClassExpression::some(
                ObjectPropertyExpression::named("http://example.org/attends"),
                ClassExpression::named("http://example.org/School"),
            ),
        );

        let entities = axiom.entities();
        assert_eq!(entities.len(), 3);
        assert!(entities.contains(&Entity::concept("http://example.org/Student")));
        assert!(entities.contains(&Entity::concept("http://example.org/School")));
        assert!(entities.contains(&Entity::object_role("http://example.org/attends")));
    }

    #[test]
    fn test_entities_skip_constants_and_datatypes() {
        let axiom = Axiom::DataPropertyRange(
            DataPropertyExpression::named("http://example.org/age"),
            DataRange::Datatype(OwlIri::new("http://www.w3.org/2001/XMLSchema#integer")),
        );
        let entities = axiom.entities();
        assert_eq!(entities.len(), 1);
        assert!(entities.contains(&Entity::data_role("http://example.org/age")));

        let axiom = Axiom::SubClassOf(ClassExpression::Thing, ClassExpression::Nothing);
        assert!(axiom.entities().is_empty());
    }

    #[test]
    fn test_entities_of_inverse_and_chain() {
        let r = ObjectPropertyExpression::named("http://example.org/r");
        let s = ObjectPropertyExpression::named("http://example.org/s");
        let axiom = Axiom::SubObjectPropertyOf(
            ObjectPropertyExpression::Chain(vec![r.clone().inverse(), s.clone()]),
            r,
        );
        let entities = axiom.entities();
        assert_eq!(entities.len(), 2);
        assert!(entities.contains(&Entity::object_role("http://example.org/s")));
    }

    #[test]
    fn test_assertion_mentions_individuals() {
        let axiom = Axiom::ObjectPropertyAssertion(
            ObjectPropertyExpression::named("http://example.org/knows"),
            Individual::new("http://example.org/john"),
            Individual::new("http://example.org/mary"),
        );
        let entities = axiom.entities();
        assert!(entities.contains(&Entity::individual("http://example.org/john")));
        assert!(entities.contains(&Entity::individual("http://example.org/mary")));
        assert_eq!(axiom.kind_name(), "ObjectPropertyAssertion");
    }
}
