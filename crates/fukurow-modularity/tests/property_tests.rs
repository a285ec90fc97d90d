use fukurow_dl::{Axiom, AxiomId, ClassExpression, Entity, Individual, ObjectPropertyExpression, OwlDlOntology};
use fukurow_modularity::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn role() -> impl Strategy<Value = ObjectPropertyExpression> {
    prop_oneof![
        4 => (0..2usize).prop_map(|i| ObjectPropertyExpression::named(format!("r{}", i))),
        1 => (0..2usize).prop_map(|i| ObjectPropertyExpression::named(format!("r{}", i)).inverse()),
    ]
}

fn class_expr() -> impl Strategy<Value = ClassExpression> {
    let leaf = prop_oneof![
        6 => (0..5usize).prop_map(|i| ClassExpression::named(format!("C{}", i))),
        1 => Just(ClassExpression::Thing),
        1 => Just(ClassExpression::Nothing),
    ];
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(ClassExpression::not),
            prop::collection::vec(inner.clone(), 2).prop_map(ClassExpression::IntersectionOf),
            prop::collection::vec(inner.clone(), 2).prop_map(ClassExpression::UnionOf),
            (role(), inner.clone()).prop_map(|(r, c)| ClassExpression::some(r, c)),
            (role(), inner.clone()).prop_map(|(r, c)| ClassExpression::all(r, c)),
            (0..3u32, role(), inner).prop_map(|(n, r, c)| ClassExpression::max(n, r, c)),
        ]
    })
}

fn axiom() -> impl Strategy<Value = Axiom> {
    prop_oneof![
        5 => (class_expr(), class_expr()).prop_map(|(a, b)| Axiom::SubClassOf(a, b)),
        1 => prop::collection::vec(class_expr(), 2).prop_map(Axiom::EquivalentClasses),
        1 => prop::collection::vec(class_expr(), 2).prop_map(Axiom::DisjointClasses),
        1 => (role(), class_expr()).prop_map(|(r, c)| Axiom::ObjectPropertyDomain(r, c)),
        1 => role().prop_map(Axiom::TransitiveProperty),
        1 => (class_expr(), 0..3usize)
            .prop_map(|(c, i)| Axiom::ClassAssertion(c, Individual::new(format!("i{}", i)))),
        1 => (0..5usize).prop_map(|i| Axiom::Declaration(Entity::concept(format!("C{}", i)))),
    ]
}

fn ontology() -> impl Strategy<Value = OwlDlOntology> {
    prop::collection::vec(axiom(), 1..10).prop_map(|axioms| {
        let mut ontology = OwlDlOntology::new();
        for axiom in axioms {
            ontology.add_axiom(axiom);
        }
        ontology
    })
}

fn rich_role() -> impl Strategy<Value = ObjectPropertyExpression> {
    prop_oneof![
        6 => role(),
        1 => Just(ObjectPropertyExpression::TopObjectProperty),
        1 => Just(ObjectPropertyExpression::BottomObjectProperty),
    ]
}

prop_compose! {
    fn restriction(inner: BoxedStrategy<ClassExpression>)(
        kind in 0..4usize,
        n in 0..3u32,
        r in rich_role(),
        c in inner,
    ) -> ClassExpression {
        match kind {
            0 => ClassExpression::min(n, r, c),
            1 => ClassExpression::exactly(n, r, c),
            2 => ClassExpression::max(n, r, c),
            _ => ClassExpression::some(r, c),
        }
    }
}

fn rich_class_expr() -> impl Strategy<Value = ClassExpression> {
    let leaf = prop_oneof![
        6 => (0..5usize).prop_map(|i| ClassExpression::named(format!("C{}", i))),
        1 => Just(ClassExpression::Thing),
        1 => Just(ClassExpression::Nothing),
        1 => prop::collection::vec((0..3usize).prop_map(|i| Individual::new(format!("i{}", i))), 0..3)
            .prop_map(ClassExpression::OneOf),
        1 => rich_role().prop_map(ClassExpression::HasSelf),
    ];
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(ClassExpression::not),
            prop::collection::vec(inner.clone(), 2).prop_map(ClassExpression::IntersectionOf),
            prop::collection::vec(inner.clone(), 2).prop_map(ClassExpression::UnionOf),
            (rich_role(), inner.clone()).prop_map(|(r, c)| ClassExpression::all(r, c)),
            restriction(inner.boxed()),
        ]
    })
}

fn rich_axiom() -> impl Strategy<Value = Axiom> {
    prop_oneof![
        5 => (rich_class_expr(), rich_class_expr()).prop_map(|(a, b)| Axiom::SubClassOf(a, b)),
        1 => prop::collection::vec(rich_class_expr(), 2).prop_map(Axiom::EquivalentClasses),
        1 => prop::collection::vec(rich_class_expr(), 2).prop_map(Axiom::DisjointClasses),
        1 => (rich_role(), rich_class_expr()).prop_map(|(r, c)| Axiom::ObjectPropertyRange(r, c)),
        1 => (rich_role(), rich_role()).prop_map(|(r, s)| Axiom::SubObjectPropertyOf(r, s)),
        1 => rich_role().prop_map(Axiom::FunctionalProperty),
        1 => (rich_class_expr(), 0..3usize)
            .prop_map(|(c, i)| Axiom::ClassAssertion(c, Individual::new(format!("i{}", i)))),
    ]
}

fn rich_ontology() -> impl Strategy<Value = OwlDlOntology> {
    prop::collection::vec(rich_axiom(), 1..10).prop_map(|axioms| {
        let mut ontology = OwlDlOntology::new();
        for axiom in axioms {
            ontology.add_axiom(axiom);
        }
        ontology
    })
}

fn seed() -> impl Strategy<Value = Signature> {
    (
        prop::collection::btree_set(0..5usize, 0..3),
        prop::collection::btree_set(0..2usize, 0..2),
    )
        .prop_map(|(concepts, roles)| {
            concepts
                .into_iter()
                .map(|i| Entity::concept(format!("C{}", i)))
                .chain(roles.into_iter().map(|i| Entity::object_role(format!("r{}", i))))
                .collect()
        })
}

fn module_type() -> impl Strategy<Value = ModuleType> {
    prop_oneof![Just(ModuleType::Top), Just(ModuleType::Bottom), Just(ModuleType::Star)]
}

fn partition(aos: &AOStructure) -> BTreeSet<BTreeSet<AxiomId>> {
    aos.iter().map(|atom| atom.axioms.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_locality_is_pure(ontology in ontology(), seed in seed(), top in any::<bool>()) {
        let mut sig = seed;
        sig.set_locality(if top { Locality::Top } else { Locality::Bottom });
        let plain = SyntacticLocalityChecker::new();
        let extended = SyntacticLocalityChecker::extended();
        for entry in ontology.iter() {
            let first = plain.is_local(&entry.axiom, &sig);
            prop_assert_eq!(first, plain.is_local(&entry.axiom, &sig));
            let ext = extended.is_local(&entry.axiom, &sig);
            prop_assert_eq!(ext, extended.is_local(&entry.axiom, &sig));
            // Extended locality never rejects what plain locality accepts
            prop_assert!(!first || ext);
        }
    }

    #[test]
    fn prop_linear_and_indexed_paths_agree(ontology in ontology(), seed in seed(), module_type in module_type()) {
        let mut linear = Modularizer::syntactic();
        let expected = linear.extract_ontology(&ontology, &seed, module_type).unwrap();

        let mut indexed = Modularizer::syntactic();
        indexed.build_sig_index(&ontology).unwrap();
        let actual = indexed.extract_ontology(&ontology, &seed, module_type).unwrap();

        prop_assert_eq!(expected.axiom_set(), actual.axiom_set());
        prop_assert!(seed.is_subset(actual.signature()));
    }

    #[test]
    fn prop_star_module_is_stable(ontology in ontology(), seed in seed()) {
        let mut modularizer = Modularizer::syntactic();
        let module = modularizer.extract_ontology(&ontology, &seed, ModuleType::Star).unwrap();
        let again = modularizer
            .extract(&ontology, module.axioms(), module.signature(), ModuleType::Star)
            .unwrap();
        prop_assert_eq!(module.axiom_set(), again.axiom_set());
    }

    #[test]
    fn prop_atoms_partition_used_axioms(mut ontology in ontology(), module_type in module_type()) {
        init_tracing();
        let aos = AtomicDecomposer::syntactic().decompose(&mut ontology, module_type).unwrap();

        let mut covered = BTreeSet::new();
        for atom in aos.iter() {
            prop_assert!(!atom.axioms.is_empty());
            for id in &atom.axioms {
                prop_assert!(covered.insert(*id));
            }
        }
        for id in aos.tautologies() {
            prop_assert!(covered.insert(*id));
        }
        prop_assert_eq!(covered, ontology.ids().into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn prop_dependency_graph_is_acyclic(mut ontology in ontology(), module_type in module_type()) {
        let aos = AtomicDecomposer::syntactic().decompose(&mut ontology, module_type).unwrap();
        for atom in aos.iter() {
            prop_assert!(!atom.all_dependencies.contains(&atom.id));
            prop_assert!(atom.reduced_dependencies.is_subset(&atom.dependencies));
            prop_assert!(atom.dependencies.is_subset(&atom.all_dependencies));
            for dep in &atom.all_dependencies {
                let module = aos.module(*dep).unwrap();
                prop_assert!(module.is_subset(&atom.module));
            }
        }
    }

    #[test]
    fn prop_tautologies_do_not_change_partition(mut ontology in ontology(), module_type in module_type()) {
        let mut decomposer = AtomicDecomposer::syntactic();
        let used_before: Vec<AxiomId> = ontology.ids();
        let with = decomposer.decompose(&mut ontology, module_type).unwrap();
        prop_assert_eq!(ontology.ids(), used_before);

        let mut stripped = ontology.clone();
        for id in with.tautologies() {
            stripped.retract(*id).unwrap();
        }
        let without = decomposer.decompose(&mut stripped, module_type).unwrap();

        prop_assert!(without.tautologies().is_empty());
        prop_assert_eq!(partition(&with), partition(&without));
    }

    #[test]
    fn prop_indexed_decomposition_matches_linear(mut ontology in ontology()) {
        let indexed = AtomicDecomposer::syntactic().decompose(&mut ontology, ModuleType::Bottom).unwrap();

        let mut linear = AtomicDecomposer::syntactic();
        linear.set_use_sig_index(false);
        let plain = linear.decompose(&mut ontology, ModuleType::Bottom).unwrap();

        prop_assert_eq!(partition(&indexed), partition(&plain));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_extended_locality_accepts_plain_local(ontology in rich_ontology(), seed in seed(), top in any::<bool>()) {
        let mut sig = seed;
        sig.set_locality(if top { Locality::Top } else { Locality::Bottom });
        let plain = SyntacticLocalityChecker::new();
        let extended = SyntacticLocalityChecker::extended();
        for entry in ontology.iter() {
            if plain.is_local(&entry.axiom, &sig) {
                prop_assert!(extended.is_local(&entry.axiom, &sig), "{:?}", entry.axiom);
            }
        }
    }

    #[test]
    fn prop_extended_linear_and_indexed_paths_agree(
        ontology in rich_ontology(),
        seed in seed(),
        module_type in module_type(),
    ) {
        let mut linear = Modularizer::new(SyntacticLocalityChecker::extended());
        let expected = linear.extract_ontology(&ontology, &seed, module_type).unwrap();

        let mut indexed = Modularizer::new(SyntacticLocalityChecker::extended());
        indexed.build_sig_index(&ontology).unwrap();
        let actual = indexed.extract_ontology(&ontology, &seed, module_type).unwrap();

        prop_assert_eq!(expected.axiom_set(), actual.axiom_set());
    }

    #[test]
    fn prop_extended_decomposition_is_acyclic_partition(
        mut ontology in rich_ontology(),
        module_type in module_type(),
    ) {
        let aos = AtomicDecomposer::new(SyntacticLocalityChecker::extended())
            .decompose(&mut ontology, module_type)
            .unwrap();

        let mut covered = BTreeSet::new();
        for atom in aos.iter() {
            prop_assert!(!atom.axioms.is_empty());
            for id in &atom.axioms {
                prop_assert!(covered.insert(*id));
            }
            prop_assert!(!atom.all_dependencies.contains(&atom.id));
            for dep in &atom.all_dependencies {
                prop_assert!(aos.module(*dep).unwrap().is_subset(&atom.module));
            }
        }
        for id in aos.tautologies() {
            prop_assert!(covered.insert(*id));
        }
        prop_assert_eq!(covered, ontology.ids().into_iter().collect::<BTreeSet<_>>());
    }
}

#[test]
fn test_decomposition_serializes() -> anyhow::Result<()> {
    init_tracing();
    let mut ontology = OwlDlOntology::new();
    ontology.add_axiom(Axiom::SubClassOf(ClassExpression::named("A"), ClassExpression::named("B")));
    ontology.add_axiom(Axiom::SubClassOf(ClassExpression::named("B"), ClassExpression::named("C")));

    let aos = AtomicDecomposer::syntactic().decompose(&mut ontology, ModuleType::Bottom)?;
    let json = serde_json::to_string(&aos)?;
    let restored: AOStructure = serde_json::from_str(&json)?;

    assert_eq!(partition(&aos), partition(&restored));
    assert_eq!(restored.len(), 2);
    Ok(())
}
