use sheet_core::{
    ApplyRequest, Breed, CharacterRecord, EffectValue, LiveSheet, Mod, ModCategory, NodeGraph,
    NoteKind, Requirement, SheetEngine, StaticCatalog,
};

fn catalog() -> StaticCatalog {
    let mut mods = vec![
        Mod::new("b_hulk", "Hulk", ModCategory::Breed, "brd")
            .with_effect("breed", EffectValue::Text("Hulk".into()))
            .with_int("physical", 2)
            .with_int("wyld_cancer", 4),
        Mod::new("e_gigantic", "Gigantic", ModCategory::Edge, "edg").with_int("impact_armour", 1),
        Mod::new("t_thick_skinned", "Thick Skinned", ModCategory::Trait, "trt")
            .with_int("ballistic_armour", 2),
        Mod::new("l_common", "Common", ModCategory::Language, "lng")
            .with_effect("languages", EffectValue::List(vec!["Common".into()])),
        Mod::new("l_cant", "Cant", ModCategory::Language, "lng")
            .with_effect("languages", EffectValue::List(vec!["Cant".into()])),
        Mod::new("s_middle", "Middle Class", ModCategory::Social, "soc")
            .with_effect("social_class", EffectValue::Text("Middle Class".into())),
        Mod::new("ls_downtown", "Downtown", ModCategory::Lifestyle, "lsf"),
        Mod::new("ls_midtown", "Midtown", ModCategory::Lifestyle, "lsf"),
        Mod::new("ls_suburbs", "Suburbs", ModCategory::Lifestyle, "lsf"),
        Mod::new("ls_slums", "Slums", ModCategory::Lifestyle, "lsf"),
        Mod::new("sk_athletics_1", "Athletics 1", ModCategory::Skill, "skl")
            .with_int("athletics", 1)
            .with_cost(1),
        Mod::new("sk_athletics_2", "Athletics 2", ModCategory::Skill, "skl")
            .with_int("athletics", 1)
            .with_prerequisites(Requirement::any(["sk_athletics_1"]))
            .with_cost(1),
        Mod::new("e_steel_skin", "Steel Skin", ModCategory::Edge, "edg")
            .with_int("ballistic_armour", 5)
            .with_int("impact_armour", 9)
            .with_cost(2),
        Mod::new("i_scarred", "Scarred", ModCategory::Injury, "inj")
            .with_int("lifestyle_change", 1),
    ];
    for (primary, rank) in [("physical", 4), ("smarts", 3), ("resources", 5), ("influence", 3)] {
        for step in 1..=rank {
            mods.push(
                Mod::new(
                    format!("sk_{primary}_{step}"),
                    format!("{primary} {step}"),
                    ModCategory::Skill,
                    "pri",
                )
                .with_int(primary, 1),
            );
        }
    }
    StaticCatalog::new(mods).expect("fixture catalog is valid")
}

fn place(
    engine: &SheetEngine<'_>,
    character: &mut CharacterRecord,
    live: &mut LiveSheet,
    mod_id: &str,
    location: &str,
) {
    let outcome = engine.apply_mod(character, live, &ApplyRequest::new(mod_id, location));
    assert!(outcome.is_placed(), "{mod_id} at {location}: {outcome:?}");
}

/// Builds a character step by step and checks every derived block of the
/// sheet after the final rebuild.
#[test]
fn full_character_build() {
    let catalog = catalog();
    let engine = SheetEngine::new(&catalog);
    let mut character =
        CharacterRecord::new(1, "Brick", 1, NodeGraph::standard()).with_creation_points(30);
    let mut live = engine.rebuild(&mut character);

    // ================================================================
    // Breed and background
    // ================================================================
    assert!(engine.apply_breed(&mut character, &mut live, Breed::Hulk));
    place(&engine, &mut character, &mut live, "s_middle", "social_n0");
    place(&engine, &mut character, &mut live, "l_cant", "language_n1");

    // ================================================================
    // Skills
    // ================================================================
    for (primary, rank) in [("physical", 4), ("smarts", 3), ("resources", 5), ("influence", 3)] {
        for step in 1..=rank {
            place(
                &engine,
                &mut character,
                &mut live,
                &format!("sk_{primary}_{step}"),
                &format!("{primary}_skill_n{}", step - 1),
            );
        }
    }
    place(&engine, &mut character, &mut live, "sk_athletics_1", "athletics_skill_n0");
    place(&engine, &mut character, &mut live, "sk_athletics_2", "athletics_skill_n1");

    // ================================================================
    // Derived values
    // ================================================================
    assert_eq!(live.text("breed"), "Hulk");
    assert_eq!(live.int("physical"), 6);
    assert_eq!(live.int("athletics"), 2);

    // 6 + 3 + 5 = 14 -> 5
    assert_eq!(live.int("initiative"), 5);

    // physical: 6 + 1 (endurance floor) - 1 = 6 -> 3
    assert_eq!(live.int("physical_wt"), 3);
    // smarts: 3 + 1 - 1 = 3 -> 2
    assert_eq!(live.int("smarts_wt"), 2);
    // wyld: 0 + 0 - 0 -> 1
    assert_eq!(live.int("wyld_wt"), 1);
    // bases 6 + 3 + 5 + 0 + 0 = 14 -> 2
    assert_eq!(live.int("mook_wt"), 2);

    // resources 5 + influence 3 = 8, Middle Class -> Downtown
    assert_eq!(live.text("lifestyle"), "Downtown");
    assert_eq!(character.nodes.get("lifestyle_n0"), Some("ls_downtown"));

    assert_eq!(live.list("languages"), ["Common".to_string(), "Cant".to_string()]);
    assert_eq!(live.notes(NoteKind::Info), ["Knows all 2 languages".to_string()]);

    // Hulk Wyld Cancer 4 is below the injury threshold.
    assert_eq!(live.int("permanent_injuries_expected"), 0);

    assert_eq!(live.int("tp_total"), 26);
    assert_eq!(live.int("tp_spent"), 2);
    assert_eq!(live.int("tp_unspent"), 24);
    assert!(live.notes(NoteKind::Warnings).is_empty(), "{:?}", live.notes(NoteKind::Warnings));

    // ================================================================
    // An injury pushes the lifestyle down and is flagged
    // ================================================================
    place(&engine, &mut character, &mut live, "i_scarred", "injury_n0");
    assert_eq!(live.text("lifestyle"), "Midtown");
    assert_eq!(character.nodes.get("lifestyle_n0"), Some("ls_midtown"));
    assert_eq!(live.notes(NoteKind::Warnings).len(), 1);
}

/// Replaying the same record always yields the same sheet.
#[test]
fn rebuilds_are_deterministic() {
    let catalog = catalog();
    let engine = SheetEngine::new(&catalog);
    let mut character =
        CharacterRecord::new(2, "Twice", 1, NodeGraph::standard()).with_creation_points(30);
    let mut live = engine.rebuild(&mut character);
    let _ = engine.apply_breed(&mut character, &mut live, Breed::Hulk);
    place(&engine, &mut character, &mut live, "sk_athletics_1", "athletics_skill_n0");

    let first = engine.rebuild(&mut character);
    let second = engine.rebuild(&mut character);
    assert_eq!(first, second);
    assert_eq!(first, live);
}

/// Armour and floor-1 skills stay in range whatever was summed into them.
#[test]
fn clamps_survive_stacked_effects() {
    let catalog = catalog();
    let engine = SheetEngine::new(&catalog);
    let mut character =
        CharacterRecord::new(3, "Tank", 1, NodeGraph::standard()).with_creation_points(30);
    let mut live = engine.rebuild(&mut character);
    let _ = engine.apply_breed(&mut character, &mut live, Breed::Hulk);
    place(&engine, &mut character, &mut live, "e_steel_skin", "melee_edge_n0");

    // 2 (thick skin) + 5 = 7, capped at 6
    assert_eq!(live.actual("ballistic_armour"), 7);
    assert_eq!(live.int("ballistic_armour"), 6);
    // 1 (gigantic) + 9 = 10, capped at 6
    assert_eq!(live.int("impact_armour"), 6);
    assert_eq!(live.int("smarts"), 1);
    assert_eq!(live.actual("smarts"), 0);

    for schema_spec in engine.schema().iter() {
        if let Some(clamp) = schema_spec.clamp {
            let public = live.int(&schema_spec.name);
            assert_eq!(public, clamp.apply(public), "{} escaped its clamp", schema_spec.name);
        }
    }
}

/// Free locations open up as their neighbours are filled.
#[test]
fn free_locations_follow_the_build() {
    let catalog = catalog();
    let engine = SheetEngine::new(&catalog);
    let mut character =
        CharacterRecord::new(4, "Path", 1, NodeGraph::standard()).with_creation_points(30);
    let mut live = engine.rebuild(&mut character);

    let free = engine.graph().free_locations(&character);
    assert!(free.contains("physical_skill_n0"));
    assert!(free.contains("breed_n0"));
    assert!(!free.contains("athletics_skill_n0"));
    assert!(!free.contains("lifestyle_n0"));
    assert!(!free.contains("soulweaving_n0"));

    place(&engine, &mut character, &mut live, "sk_physical_1", "physical_skill_n0");
    let free = engine.graph().free_locations(&character);
    assert!(free.contains("athletics_skill_n0"));
    assert!(free.contains("physical_skill_n1"));
    assert!(!free.contains("physical_skill_n0"));
    assert!(!free.contains("athletics_edge_n0"));
}
