//! Loading challenge catalogs and configuration from disk.

use std::fs;

use css_quest_validator::Error;
use css_quest_validator::prelude::*;

const SELECTORS: &str = r#"[
    {
        "id": "sel-1",
        "title": "Select the apples",
        "instruction": "Select every apple on the table.",
        "html": "<div class=\"table\"><plate><div class=\"apple\"></div></plate><div class=\"apple\"></div><div class=\"orange\"></div></div>",
        "cssStarter": "/* Write your selector here */\n",
        "solution": {"type": "selector", "selector": ".apple"}
    }
]"#;

const FLEXBOX: &str = r#"{
    "name": "Flexbox Fleet",
    "challenges": [
        {
            "id": "flex-1",
            "title": "Center the items",
            "instruction": "Center the items along the main axis.",
            "htmlMarkup": "<div class=\"box\"><div class=\"item\"></div></div>",
            "cssStarter": ".box {\n}\n",
            "solution": {"kind": "style", "selector": ".box", "properties": {"justify-content": "center", "flex-direction": "column"}}
        }
    ]
}"#;

fn catalog_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("selectors.json"), SELECTORS).unwrap();
    fs::write(dir.path().join("flexbox.json"), FLEXBOX).unwrap();
    fs::write(dir.path().join("aaa-extras.json"), "[]").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a module").unwrap();
    dir
}

#[test]
fn modules_follow_configured_order() {
    let dir = catalog_dir();
    let catalog = Catalog::load_dir(dir.path(), &CatalogConfig::default()).unwrap();

    let titles: Vec<_> = catalog.titles().collect();
    assert_eq!(
        titles,
        [
            ("selectors", "The Selector Garden"),
            ("flexbox", "Flexbox Fleet"),
            ("aaa-extras", "aaa-extras"),
        ]
    );
    assert_eq!(catalog.challenge_count(), 2);
}

#[test]
fn loaded_challenges_can_be_played() {
    let dir = catalog_dir();
    let config = QuestConfig::default();
    let catalog = Catalog::load_dir(dir.path(), &config.catalog).unwrap();

    let challenge = catalog.challenge("selectors", "sel-1").unwrap().clone();
    let mut session = ChallengeSession::new(challenge, &config).unwrap();
    assert_eq!(session.check(), Feedback::KeepTrying);

    session.set_learner_css(".apple { background-color: rgb(173, 255, 47); }");
    assert_eq!(session.check(), Feedback::Success);

    session.set_learner_css("plate .apple { background-color: rgb(173, 255, 47); }");
    assert_eq!(session.check(), Feedback::KeepTrying);

    let challenge = catalog.challenge("flexbox", "flex-1").unwrap().clone();
    let mut session = ChallengeSession::new(challenge, &config).unwrap();
    session.set_learner_css(".box { flex-flow: column; justify-content: center }");
    assert_eq!(session.check(), Feedback::Success);
}

#[test]
fn malformed_module_names_its_file() {
    let dir = catalog_dir();
    fs::write(dir.path().join("grid.json"), r#"[{"id": "g-1"}]"#).unwrap();

    let err = Catalog::load_dir(dir.path(), &CatalogConfig::default()).unwrap_err();
    let Error::Json { path, .. } = err else {
        panic!("expected a JSON error, got {err:?}");
    };
    assert!(path.ends_with("grid.json"));
}

#[test]
fn duplicate_ids_fail_the_load() {
    let dir = catalog_dir();
    let doubled = format!("[{0}, {0}]", SELECTORS.trim().trim_start_matches('[').trim_end_matches(']'));
    fs::write(dir.path().join("selectors.json"), doubled).unwrap();

    let err = Catalog::load_dir(dir.path(), &CatalogConfig::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateChallenge { ref module, .. } if module == "selectors"));
}

#[test]
fn missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load_dir(dir.path().join("missing"), &CatalogConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn config_file_drives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let css_path = dir.path().join("arena.css");
    fs::write(&css_path, ".box { width: 64px }").unwrap();
    fs::write(
        dir.path().join("quest.toml"),
        format!(
            "[validator]\nmarker-property = \"color\"\nsentinel-value = \"rgb(255, 0, 255)\"\n\n[arena]\nbase-css-path = {:?}\n",
            css_path.display().to_string()
        ),
    )
    .unwrap();

    let config = QuestConfig::load(dir.path().join("quest.toml")).unwrap();
    assert_eq!(config.validator.marker_property, "color");

    let challenge = Challenge {
        id: "magenta".into(),
        title: "Magenta".into(),
        instruction: "Color the box text magenta.".into(),
        html_markup: "<div class=\"box\"></div><p></p>".into(),
        css_starter: String::new(),
        solution: Solution::selector(".box"),
    };
    let mut session = ChallengeSession::new(challenge, &config).unwrap();
    let node = session.arena().query_selector(".box").unwrap().unwrap();
    assert_eq!(session.arena().computed_value(node, "width").unwrap(), "64px");

    session.set_learner_css(".box { color: magenta }");
    assert!(session.validate().unwrap().passed);
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = QuestConfig::load(dir.path().join("quest.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
