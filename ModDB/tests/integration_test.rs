use moddb::modtools::prelude::*;
use moddb::schemas::progressions;
use moddb::{Mod, ProjectManifest};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MODIFIERS: &str = "modifier type \"PassiveData\"
modifier \"DisplayName\",\"TranslatedString\"
modifier \"Boosts\",\"StatsFunctors\"
modifier type \"SpellData\"
modifier \"SpellType\",\"SpellType\"
";

const VALUELISTS: &str = "valuelist \"SpellType\"
value \"Target\"
value \"Shout\"
valuelist \"StatsFunctors\"
";

fn progression_xml(uuid: &str, selectors: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<save>
    <version major="4" minor="0" revision="9" build="331" />
    <region id="Progressions">
        <node id="root">
            <children>
                <node id="Progression">
                    <attribute id="Level" type="uint8" value="3" />
                    <attribute id="Name" type="LSString" value="Paladin" />
                    <attribute id="Selectors" type="LSString" value="{selectors}" />
                    <attribute id="UUID" type="guid" value="{uuid}" />
                </node>
            </children>
        </node>
    </region>
</save>
"#
    )
}

fn project(dir: &Path) -> Mod {
    fs::write(dir.join("Modifiers.txt"), MODIFIERS).unwrap();
    fs::write(dir.join("ValueLists.txt"), VALUELISTS).unwrap();

    let mut manifest = ProjectManifest::new("Oath of the Tide", "Me", "A paladin subclass");
    manifest.project.uuid = "7a1e3c55-2f4b-4d6a-9c8e-0b1d2e3f4a5b".to_string();
    manifest.schema.modifiers = Some("Modifiers.txt".into());
    manifest.schema.valuelists = Some("ValueLists.txt".into());
    manifest.build.base_data = Some("base".into());
    manifest.save(dir.join(moddb::MANIFEST_FILE)).unwrap();

    Mod::open(dir).unwrap()
}

#[test]
fn test_build_writes_output_tree() {
    let dir = tempdir().unwrap();
    let mut m = project(dir.path());

    let name = m.loca("Tide_DisplayName", [("en", "Tidal Oath")]).unwrap();
    m.add_entity(
        Entity::new("Passive_TidalOath", EntityKind::PassiveData)
            .with("DisplayName", format!("{name};1"))
            .with("Boosts", "AC(1)"),
    )
    .unwrap();
    m.add_entity(Entity::new("Shout_Tide", EntityKind::SpellData).with("SpellType", "Shout"))
        .unwrap();

    let report = m.build().unwrap();
    assert_eq!(report.folder, "Oath_of_the_Tide");
    assert_eq!(report.entities, 2);
    assert_eq!(report.strings, 1);

    let out = dir.path().join("build");
    let meta = fs::read_to_string(out.join("Mods/Oath_of_the_Tide/meta.lsx")).unwrap();
    assert!(meta.contains("value=\"7a1e3c55-2f4b-4d6a-9c8e-0b1d2e3f4a5b\""));

    let loca = fs::read_to_string(out.join("Mods/Oath_of_the_Tide/Localization/English/English.loca.xml")).unwrap();
    assert!(loca.contains(&name));
    assert!(loca.contains("Tidal Oath"));

    let data = out.join("Public/Oath_of_the_Tide/Stats/Generated/Data");
    let passive = fs::read_to_string(data.join("Passive.txt")).unwrap();
    assert!(passive.contains("new entry \"Passive_TidalOath\""));
    assert!(data.join("Spell_Shout.txt").is_file());

    for file in &report.files {
        assert!(file.is_file(), "{} missing", file.display());
    }
}

#[test]
fn test_ensure_entity_is_idempotent() {
    let dir = tempdir().unwrap();
    let mut m = project(dir.path());

    let mut built = 0;
    for _ in 0..3 {
        let name = m
            .ensure_entity("tide_passive", |m| {
                built += 1;
                let handle = m.loca("Tide_Passive", [("en", "Tide")])?;
                Ok(Entity::new("Passive_Tide", EntityKind::PassiveData).with("DisplayName", format!("{handle};1")))
            })
            .unwrap();
        assert_eq!(name, "Passive_Tide");
    }

    assert_eq!(built, 1);
    assert_eq!(m.stats().unwrap().len(), 1);
    assert_eq!(m.localization().len(), 1);
}

#[test]
fn test_load_base_applies_dev_override() {
    let dir = tempdir().unwrap();
    let m = project(dir.path());

    let relative = "Public/Shared/Progressions/Progressions.lsx";
    let base = dir.path().join("base").join(relative);
    fs::create_dir_all(base.parent().unwrap()).unwrap();
    let uuid = "0c0ffee0-0000-4000-8000-000000000003";
    fs::write(&base, progression_xml(uuid, "SelectSkills(a,2)")).unwrap();
    fs::write(
        base.with_file_name("Progressions.dev.lsx"),
        progression_xml(uuid, "SelectSkills(a,2);AddSpells(b)"),
    )
    .unwrap();

    let doc = m.load_base(relative, &progressions().document, by_key).unwrap();
    assert_eq!(doc.children().len(), 1);
    assert_eq!(
        doc.children().get(0).unwrap().list_value("Selectors").unwrap(),
        ["SelectSkills(a,2)", "AddSpells(b)"]
    );
}

#[test]
fn test_load_base_without_override() {
    let dir = tempdir().unwrap();
    let m = project(dir.path());

    let relative = "Progressions.lsx";
    fs::create_dir_all(dir.path().join("base")).unwrap();
    fs::write(dir.path().join("base").join(relative), progression_xml("0c0ffee0-0000-4000-8000-000000000004", "")).unwrap();

    let doc = m.load_base(relative, &progressions().document, by_key).unwrap();
    assert!(doc.children().get(0).unwrap().list_value("Selectors").unwrap().is_empty());
}
