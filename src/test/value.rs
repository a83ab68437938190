use super::builder::Builder;
use crate::de::from_bytes;
use crate::error::{ErrorKind, Result};
use crate::{NamedTag, NbtString, Tag, Value};

#[test]
fn find_three_compounds_deep() -> Result<()> {
    let payload = Builder::new()
        .start_compound("root")
        .byte("a", 1)
        .start_compound("one")
        .start_compound("two")
        .start_compound("three")
        .int("deep", 99)
        .end_compound()
        .end_compound()
        .end_compound()
        .end_compound()
        .build();

    let root = from_bytes(&payload)?;
    assert_eq!(root.find("deep").unwrap().value, Value::Int(99));
    assert_eq!(root.find("three").unwrap().tag(), Tag::Compound);
    Ok(())
}

#[test]
fn find_returns_first_in_preorder() -> Result<()> {
    let payload = Builder::new()
        .start_compound("root")
        .start_compound("first")
        .start_compound("nested")
        .byte("dup", 1)
        .end_compound()
        .end_compound()
        .byte("dup", 2)
        .end_compound()
        .build();

    let root = from_bytes(&payload)?;

    // the deeper tag comes first when walking the tree in order.
    assert_eq!(root.find("dup").unwrap().value, Value::Byte(1));
    Ok(())
}

#[test]
fn find_shallow_tag_seen_first() -> Result<()> {
    let payload = Builder::new()
        .start_compound("root")
        .byte("dup", 2)
        .start_compound("nested")
        .byte("dup", 1)
        .end_compound()
        .end_compound()
        .build();

    let root = from_bytes(&payload)?;
    assert_eq!(root.find("dup").unwrap().value, Value::Byte(2));
    Ok(())
}

#[test]
fn find_matches_root() {
    let root = NamedTag::new("Schematic", Value::Compound(vec![]));
    assert_eq!(root.find("Schematic"), Some(&root));
}

#[test]
fn find_missing() {
    let root = NamedTag::new(
        "root",
        Value::Compound(vec![NamedTag::new("a", Value::Byte(1))]),
    );
    assert!(root.find("b").is_none());
    assert!(NamedTag::new("x", Value::Int(1)).find("y").is_none());
}

#[test]
fn find_does_not_look_in_lists() -> Result<()> {
    let payload = Builder::new()
        .start_compound("root")
        .start_list("list", Tag::Compound, 1)
        .start_anon_compound()
        .byte("hidden", 1)
        .end_compound()
        .end_compound()
        .build();

    let root = from_bytes(&payload)?;
    assert!(root.find("list").is_some());
    assert!(root.find("hidden").is_none());
    Ok(())
}

#[test]
fn integers_coerce() -> Result<()> {
    assert_eq!(NamedTag::new("b", Value::Byte(255)).as_integer()?, 255);
    assert_eq!(NamedTag::new("s", Value::Short(65535)).as_integer()?, 65535);
    assert_eq!(NamedTag::new("i", Value::Int(u32::MAX)).as_integer()?, u32::MAX as u64);
    assert_eq!(NamedTag::new("l", Value::Long(u64::MAX)).as_integer()?, u64::MAX);
    Ok(())
}

#[test]
fn non_integers_do_not_coerce() {
    let non_numeric = vec![
        Value::Float(1.0),
        Value::Double(1.0),
        Value::ByteArray(vec![1]),
        Value::String("1".into()),
        Value::Compound(vec![]),
    ];

    for value in non_numeric {
        let tag = value.tag();
        let err = NamedTag::new("Width", value).as_integer().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::NotNumeric {
                name: "Width".to_owned(),
                tag
            }
        );
        assert!(err.to_string().contains("Width"));
    }
}

#[test]
fn string_lossy() {
    assert_eq!(NbtString::from("Schematic").to_str_lossy(), "Schematic");

    // Java encodes NUL as two bytes.
    assert_eq!(NbtString::from(vec![0xc0, 0x80]).to_str_lossy(), "\0");

    assert_eq!(NbtString::from(vec![b'a', 0xff]).to_str_lossy(), "a\u{fffd}");
}

#[test]
fn serializes_to_json() {
    let root = NamedTag::new(
        "root",
        Value::Compound(vec![
            NamedTag::new("w", Value::Short(2)),
            NamedTag::new("b", Value::ByteArray(vec![0, 5])),
        ]),
    );

    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "root",
            "value": {
                "Compound": [
                    { "name": "w", "value": { "Short": 2 } },
                    { "name": "b", "value": { "ByteArray": [0, 5] } }
                ]
            }
        })
    );
}
