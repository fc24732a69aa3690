use modtools::formats::stats::{parse_stats, read_stats};
use modtools::gamedata::{DEFAULT_PROLOGUE, Modifiers, ValueLists};
use modtools::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn every_type_schema() -> (Arc<DocumentSchema>, Arc<Schema>, Arc<Schema>) {
    let leaf = Schema::builder("Leaf")
        .attribute("Name", DataType::FixedString)
        .build();
    let kind = Schema::builder("Everything")
        .key("UUID", DataType::Guid)
        .attribute("U8", DataType::UInt8)
        .attribute("I8", DataType::Int8)
        .attribute("U16", DataType::UInt16)
        .attribute("I16", DataType::Int16)
        .attribute("U32", DataType::UInt32)
        .attribute("I32", DataType::Int32)
        .attribute("U64", DataType::UInt64)
        .attribute("I64", DataType::Int64)
        .attribute("F", DataType::Float)
        .attribute("D", DataType::Double)
        .attribute("B", DataType::Bool)
        .attribute("IV3", DataType::IVec3)
        .attribute("FV4", DataType::FVec4)
        .attribute("Fixed", DataType::FixedString)
        .attribute("LS", DataType::LSString)
        .attribute("S", DataType::String)
        .attribute("Semi", DataType::StringList)
        .attribute("Comma", DataType::CommaList)
        .attribute("Text", DataType::TranslatedString)
        .child(&leaf)
        .build();
    let doc = DocumentSchema::new("Things", "root", &[Arc::clone(&kind)]);
    (doc, kind, leaf)
}

#[test]
fn test_roundtrip_every_type() {
    let (doc_schema, kind, leaf) = every_type_schema();
    let node = Node::builder(&kind)
        .attr("UUID", name_uuid(&uuid::Uuid::nil(), "everything"))
        .attr("U8", 255u8)
        .attr("I8", -3i8)
        .attr("U16", 65535u16)
        .attr("I16", -300i16)
        .attr("U32", 7u32)
        .attr("I32", -7i32)
        .attr("U64", u64::MAX)
        .attr("I64", i64::MIN)
        .attr("F", 1.5f32)
        .attr("D", 0.25f64)
        .attr("B", true)
        .attr("IV3", "1 2 3")
        .attr("FV4", "0.5 0.5 0.5 1")
        .attr("Fixed", "Fixed")
        .attr("LS", "Some <text> & \"quotes\"")
        .attr("S", "plain")
        .attr("Semi", vec!["a", "b", "c"])
        .attr("Comma", vec!["x", "y", "z"])
        .attr("Text", AttrValue::handle("h00000000g0000g0000g0000g000000000000", 3))
        .child(Node::builder(&leaf).attr("Name", "leaf").build().unwrap())
        .build()
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("Public/Mod/Things/Things.lsx");
    let doc = Document::with_nodes(&doc_schema, [node.clone()]).unwrap();
    doc.save(&path).unwrap();

    let reloaded = Document::load(&doc_schema, &path).unwrap();
    assert_eq!(reloaded.children().len(), 1);
    assert_eq!(reloaded.children().get(0).unwrap(), &node);

    let xml = fs::read_to_string(&path).unwrap();
    assert!(xml.contains("value=\"a;b;c\""));
    assert!(xml.contains("value=\"x,y,z\""));
}

#[test]
fn test_list_delimiters_differ_between_formats() {
    let (_, kind, _) = every_type_schema();
    let node = Node::builder(&kind)
        .attr("UUID", "u")
        .attr("Comma", "a,b,c")
        .build()
        .unwrap();

    let comma = node.get("Comma").unwrap();
    assert_eq!(comma.to_lsx("Comma").value, "a,b,c");
    assert_eq!(comma.to_stats_line("Comma"), "data \"Comma\" \"a;b;c\"");
}

#[test]
fn test_schema_rejects_extension() {
    let (_, kind, _) = every_type_schema();
    assert!(Node::builder(&kind).attr("UUID", "u").attr("Extra", "1").build().is_err());

    let stranger = Schema::builder("Stranger").build();
    let child = Node::builder(&stranger).build().unwrap();
    assert!(Node::builder(&kind).attr("UUID", "u").child(child).build().is_err());
}

#[test]
fn test_update_upserts_for_every_ordering() {
    let item = Schema::builder("Item")
        .key("Key", DataType::Int32)
        .attribute("V", DataType::LSString)
        .build();
    let make = |k: i32, v: &str| Node::builder(&item).attr("Key", k).attr("V", v).build().unwrap();

    let incoming_orders = [
        vec![make(1, "new"), make(3, "c")],
        vec![make(3, "c"), make(1, "new")],
    ];
    for incoming in incoming_orders {
        let mut children = Children::new("root", &[Arc::clone(&item)]);
        children.extend([make(1, "old"), make(2, "b")]).unwrap();
        children.update(incoming, by_key).unwrap();

        assert_eq!(children.len(), 3);
        let mut pairs: Vec<_> = children
            .iter()
            .map(|n| (n.str_value("Key").unwrap().to_string(), n.str_value("V").unwrap().to_string()))
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [("1".into(), "new".into()), ("2".into(), "b".into()), ("3".into(), "c".into())]
        );
    }
}

#[test]
fn test_unique_keeps_last() {
    let x = Schema::builder("X")
        .attribute("k", DataType::Int32)
        .attribute("v", DataType::Int32)
        .build();
    let mut children = Children::new("root", &[Arc::clone(&x)]);
    children
        .extend([
            Node::builder(&x).attr("k", 1).attr("v", 1).build().unwrap(),
            Node::builder(&x).attr("k", 1).attr("v", 2).build().unwrap(),
        ])
        .unwrap();

    children.unique(|n| n.str_value("k").map(str::to_string));
    assert_eq!(children.len(), 1);
    assert_eq!(children.get(0).unwrap().str_value("v"), Some("2"));
}

fn armor_schema() -> StatsSchema {
    let modifiers = Modifiers::parse("modifier type \"Armor\"\nmodifier \"Rarity\",\"RarityList\"\n", "Modifiers.txt").unwrap();
    let valuelists = ValueLists::parse(
        "valuelist \"RarityList\"\nvalue \"Legendary\"\nvalue \"Common\"\n",
        "ValueLists.txt",
    )
    .unwrap();
    StatsSchema::new(modifiers, valuelists)
}

#[test]
fn test_rarity_valuelist() {
    let mut data = GameData::new(Arc::new(armor_schema()));

    let err = data
        .add(Entity::new("ARM_Mythic", EntityKind::Armor).with("Rarity", "Mythical"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));

    data.add(Entity::new("ARM_Legend", EntityKind::Armor).with("Rarity", "Legendary"))
        .unwrap();
    assert_eq!(data.len(), 1);
}

#[test]
fn test_unconstrained_valuelist_from_files() {
    let dir = tempdir().unwrap();
    let modifiers = dir.path().join("Modifiers.txt");
    let valuelists = dir.path().join("ValueLists.txt");
    fs::write(&modifiers, "modifier type \"PassiveData\"\r\nmodifier \"Boosts\",\"StatsFunctors\"\r\n").unwrap();
    fs::write(&valuelists, "valuelist \"StatsFunctors\"\r\n").unwrap();

    let schema = StatsSchema::load(&modifiers, &valuelists).unwrap();
    let entity = Entity::new("Passive_Tide", EntityKind::PassiveData).with("Boosts", "AC(1);Resistance(Cold,Resistant)");
    assert!(schema.validate(&entity).is_ok());
}

#[test]
fn test_localization_completeness_and_determinism() {
    let mod_uuid = uuid::Uuid::parse_str("5f1c3f7e-8a2b-4c9d-9e0f-112233445566").unwrap();

    let mut first = Localization::new(mod_uuid);
    first.add_language("en", "English");
    first.add_language("fr", "French");
    assert!(first.insert("X", [("en", "hi")]).is_err());

    let handle = first.insert("X", [("en", "hello"), ("fr", "salut")]).unwrap();
    assert_eq!(handle, loca_handle(&mod_uuid, "X"));

    let mut second = Localization::new(mod_uuid);
    second.add_language("en", "English");
    assert_eq!(second.insert("X", [("en", "hello")]).unwrap(), handle);
}

#[test]
fn test_spell_files_by_type() {
    let modifiers = Modifiers::parse(
        "modifier type \"SpellData\"\nmodifier \"SpellType\",\"SpellType\"\nmodifier \"Icon\",\"FixedString\"\n",
        "Modifiers.txt",
    )
    .unwrap();
    let valuelists = ValueLists::parse("valuelist \"SpellType\"\nvalue \"Target\"\nvalue \"Shout\"\n", "ValueLists.txt").unwrap();
    let mut data = GameData::new(Arc::new(StatsSchema::new(modifiers, valuelists)));

    data.add(Entity::new("Target_Wave", EntityKind::SpellData).with("SpellType", "Target").with("Icon", "Spell_Wave"))
        .unwrap();
    data.add(Entity::new("Shout_Tide", EntityKind::SpellData).with("SpellType", "Shout"))
        .unwrap();

    let dir = tempdir().unwrap();
    let written = data.build(dir.path(), DEFAULT_PROLOGUE).unwrap();
    assert_eq!(written.len(), 2);

    let target = fs::read_to_string(dir.path().join("Spell_Target.txt")).unwrap();
    let shout = fs::read_to_string(dir.path().join("Spell_Shout.txt")).unwrap();
    assert!(target.starts_with(DEFAULT_PROLOGUE));
    assert!(shout.starts_with(DEFAULT_PROLOGUE));

    let target_entities = read_stats(dir.path().join("Spell_Target.txt")).unwrap();
    assert_eq!(target_entities.len(), 1);
    assert_eq!(target_entities[0].name(), "Target_Wave");
    assert_eq!(parse_stats(&shout, "Spell_Shout.txt").unwrap()[0].name(), "Shout_Tide");
}
