//! Checks the shipped `data/` directory against the built-in layout.

use std::path::PathBuf;

use sheet_content::{Content, ContentFactory};
use sheet_core::schema::SliverwareSet;
use sheet_core::{
    Breed, CatalogOracle, CharacterRecord, LifestyleRung, NodeGraph, NoteKind, SheetEngine,
};
use strum::IntoEnumIterator;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn content() -> Content {
    ContentFactory::new(data_dir())
        .load_all()
        .expect("shipped data loads")
}

#[test]
fn shipped_rules_match_defaults() {
    let content = content();
    assert_eq!(content.rules, sheet_core::RulesConfig::default());
    assert!(content.graph.is_none());
    assert_eq!(content.graph().len(), NodeGraph::standard().len());
}

#[test]
fn every_breed_grant_is_in_the_catalog() {
    let content = content();
    for breed in Breed::iter() {
        for grant in breed.grants() {
            assert!(
                content.catalog.contains(grant.mod_id),
                "{breed} grants missing mod {}",
                grant.mod_id
            );
            assert!(
                content.graph().contains(grant.location),
                "{breed} grants into missing location {}",
                grant.location
            );
        }
    }
}

#[test]
fn every_lifestyle_rung_has_a_mod() {
    let content = content();
    for rung in LifestyleRung::iter() {
        assert!(content.catalog.contains(&rung.mod_id()), "no mod for {rung}");
    }
}

#[test]
fn every_mod_fits_some_location() {
    let content = content();
    let graph = content.graph();
    for candidate in content.catalog.iter() {
        assert!(
            graph.nodes().any(|node| node.accepts(candidate)),
            "{} ({}, {}) has nowhere to go",
            candidate.id,
            candidate.category,
            candidate.kind
        );
    }
}

#[test]
fn implant_sets_with_implants_have_a_completion_mod() {
    let content = content();
    for set in SliverwareSet::iter() {
        let implants = content
            .catalog
            .iter()
            .filter(|candidate| candidate.kind == set.kind())
            .count();
        if implants > 0 {
            assert!(content.catalog.contains(&set.complete_mod()), "{set}");
        }
    }
}

/// Choosing a breed from the shipped catalog fills its template.
#[test]
fn hulk_from_shipped_data() {
    let content = content();
    let engine = SheetEngine::new(&content.catalog)
        .with_graph(content.graph())
        .with_rules(&content.rules);
    let mut character = CharacterRecord::new(1, "Brick", 1, content.graph())
        .with_creation_points(content.rules.creation_talent_points);
    let mut live = engine.rebuild(&mut character);

    assert!(engine.apply_breed(&mut character, &mut live, Breed::Hulk));
    assert_eq!(live.text("breed"), "Hulk");
    assert_eq!(live.int("physical"), 2);
    assert_eq!(live.int("impact_armour"), 1);
    assert_eq!(live.list("languages"), ["Common".to_string()]);
    assert_eq!(character.talent.breed_bonus, 4);
    assert_eq!(live.int("tp_total"), 26);
    assert!(
        live.notes(NoteKind::Warnings)
            .iter()
            .any(|note| note.contains("may learn 1"))
    );
}
