use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use tallgrass_core::{Event, SpeciesId};
use tallgrass_persistence::{
    default_seed, load_or_seed, save_collection, sync_events, JsonFileStore, ListStore,
    MemoryStore, StoreError, PARTY_KEY, POKEDEX_KEY,
};

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir(label: &str) -> PathBuf {
    let index = SCRATCH_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "tallgrass-persistence-{label}-{}-{index}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn species(names: &[&str]) -> Vec<SpeciesId> {
    names.iter().copied().map(SpeciesId::new).collect()
}

#[test]
fn empty_store_is_seeded_with_starters() {
    let mut store = MemoryStore::new();
    let collection = load_or_seed(&mut store).expect("memory store never fails");

    assert_eq!(collection.party, default_seed());
    assert_eq!(collection.pokedex, default_seed());
    assert_eq!(
        store.load_list(PARTY_KEY).expect("load"),
        default_seed(),
        "seeding should be written back"
    );
}

#[test]
fn stored_lists_win_over_the_seed() {
    let mut store = MemoryStore::new();
    store
        .save_list(PARTY_KEY, &species(&["mew"]))
        .expect("save");
    let collection = load_or_seed(&mut store).expect("load");

    assert_eq!(collection.party, species(&["mew"]));
    assert_eq!(collection.pokedex, default_seed());
}

#[test]
fn change_events_are_saved() {
    let mut store = MemoryStore::new();
    let saved = sync_events(
        &mut store,
        &[
            Event::SaveRequested,
            Event::PartyChanged {
                members: species(&["pikachu"]),
            },
            Event::PokedexChanged {
                species: species(&["eevee", "pikachu"]),
            },
        ],
    )
    .expect("sync");

    assert_eq!(saved, 2);
    assert_eq!(store.load_list(PARTY_KEY).expect("load"), species(&["pikachu"]));
    assert_eq!(
        store.load_list(POKEDEX_KEY).expect("load"),
        species(&["eevee", "pikachu"])
    );
}

#[test]
fn json_store_reads_missing_files_as_empty() {
    let store = JsonFileStore::new(scratch_dir("missing"));
    assert!(store.load_list(PARTY_KEY).expect("missing file").is_empty());
}

#[test]
fn json_store_persists_between_instances() {
    let dir = scratch_dir("reopen");
    let mut store = JsonFileStore::new(&dir);
    save_collection(&mut store, &species(&["abra"]), &species(&["abra", "zubat"]))
        .expect("save");

    let reopened = JsonFileStore::new(&dir);
    assert_eq!(reopened.load_list(PARTY_KEY).expect("load"), species(&["abra"]));
    assert_eq!(
        reopened.load_list(POKEDEX_KEY).expect("load"),
        species(&["abra", "zubat"])
    );
    assert!(dir.join("party.json").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_store_reports_malformed_files() {
    let dir = scratch_dir("malformed");
    fs::create_dir_all(&dir).expect("create scratch dir");
    fs::write(dir.join("party.json"), "{ not a list").expect("write");

    let store = JsonFileStore::new(&dir);
    let error = store.load_list(PARTY_KEY).expect_err("malformed data must fail");
    assert!(matches!(error, StoreError::Json { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn keys_cannot_escape_the_directory() {
    let mut store = JsonFileStore::new(scratch_dir("escape"));
    let error = store
        .save_list("../party", &species(&["mew"]))
        .expect_err("path separators are rejected");
    assert!(matches!(error, StoreError::InvalidKey(_)));
}

#[test]
fn stored_names_are_normalised_on_load() {
    let dir = scratch_dir("normalise");
    fs::create_dir_all(&dir).expect("create scratch dir");
    fs::write(dir.join("pokedex.json"), r#"["  Mew ", "ZUBAT"]"#).expect("write");

    let store = JsonFileStore::new(&dir);
    assert_eq!(
        store.load_list(POKEDEX_KEY).expect("load"),
        species(&["mew", "zubat"])
    );

    let _ = fs::remove_dir_all(&dir);
}
