//! Service scenarios against an on-disk SQLite database.

use sheet_content::Content;
use sheet_core::{ApplyRequest, Breed, EffectValue, Mod, ModCategory, RulesConfig, StaticCatalog};
use sheet_runtime::{
    CharacterService, ImportError, Repositories, Repository, ServiceError, SqliteStore,
};
use tempfile::TempDir;

fn content() -> Content {
    let catalog = StaticCatalog::new([
        Mod::new("b_tinker", "Tinker", ModCategory::Breed, "brd")
            .with_effect("breed", EffectValue::Text("Tinker".into()))
            .with_int("smarts", 1),
        Mod::new("e_jury_rig", "Jury Rig", ModCategory::Edge, "edg").with_int("tech", 1),
        Mod::new("l_common", "Common", ModCategory::Language, "lng")
            .with_effect("languages", EffectValue::List(vec!["Common".into()])),
        Mod::new("l_cant", "Cant", ModCategory::Language, "lng")
            .with_effect("languages", EffectValue::List(vec!["Cant".into()])),
        Mod::new("sk_tech_1", "Tech 1", ModCategory::Skill, "skl")
            .with_int("tech", 1)
            .with_cost(1),
    ])
    .expect("fixture catalog is valid");
    Content {
        catalog,
        rules: RulesConfig::default(),
        graph: None,
    }
}

fn open(dir: &TempDir) -> (SqliteStore, CharacterService) {
    let store = SqliteStore::open(dir.path().join("db").join("sheet.sqlite3"))
        .expect("database opens");
    let service = CharacterService::new(content(), Repositories::sqlite(&store));
    (store, service)
}

/// Records written by one process are read back unchanged by the next.
#[test]
fn characters_survive_reopening() {
    let dir = TempDir::new().unwrap();

    // ================================================================
    // First session: build a character
    // ================================================================
    let (character_id, live) = {
        let (_, service) = open(&dir);
        let player = service.create_player("Ash").unwrap();
        let (character, _) = service
            .create_character(player.id, "Sprocket", Some(Breed::Tinker))
            .unwrap();
        let outcome = service
            .add_mod(character.id, &ApplyRequest::new("sk_tech_1", "tech_skill_n0"))
            .unwrap();
        assert!(outcome.is_placed());
        (character.id, service.load_live(character.id).unwrap())
    };
    assert_eq!(live.int("tech"), 2);

    // ================================================================
    // Second session: everything is still there
    // ================================================================
    let (store, service) = open(&dir);
    assert_eq!(service.load_live(character_id).unwrap(), live);
    let character = service.load_character(character_id).unwrap();
    assert_eq!(character.nodes.get("tech_skill_n0"), Some("sk_tech_1"));
    assert_eq!(character.breed, Some(Breed::Tinker));

    // A rebuild of the stored record reproduces the stored live sheet.
    assert_eq!(service.rebuild(character_id).unwrap(), live);
    assert_eq!(store.live_characters().list_ids().unwrap(), [character_id]);
}

/// An import naming a mod the catalog lacks writes nothing.
#[test]
fn import_with_unknown_mod_leaves_database_untouched() {
    let dir = TempDir::new().unwrap();
    let (store, service) = open(&dir);
    let player = service.create_player("Ash").unwrap();
    let (character, _) = service
        .create_character(player.id, "Sprocket", Some(Breed::Tinker))
        .unwrap();

    let document = service.export_character(character.id).unwrap();
    let tampered = document.replace("\"e_jury_rig\"", "\"e_does_not_exist\"");
    assert_ne!(document, tampered);

    let before = store.characters().list_ids().unwrap();
    let err = service.import_character(&tampered, None).unwrap_err();
    match err {
        ServiceError::Import(ImportError::UnknownMods(ids)) => {
            assert_eq!(ids, ["e_does_not_exist".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.characters().list_ids().unwrap(), before);
    assert_eq!(store.live_characters().list_ids().unwrap(), before);

    // The untouched document still imports.
    let (copy, _) = service.import_character(&document, None).unwrap();
    assert_eq!(copy.player_id, player.id);
    assert_eq!(store.characters().list_ids().unwrap().len(), 2);
}
