//! Loading `runtimeconfig.json` documents and encoding them.

use std::io::Write;

use configmeta::{encode, encode_to_file, ConfigMapping, EncoderConfig, Error, Format};

const RUNTIMECONFIG: &str = r#"{
  "runtimeOptions": {
    "tfm": "net8.0",
    "framework": { "name": "Microsoft.NETCore.App", "version": "8.0.0" }
  },
  // properties copied into the artifact
  "configProperties": {
    "System.GC.Server": "true",
    "System.Globalization.Invariant": "true", /* duplicated value */
    "System.Runtime.TieredPGO": "false",
  }
}"#;

#[test]
fn document_order_is_kept() {
    let mapping = ConfigMapping::from_json_str(RUNTIMECONFIG).unwrap();

    let keys: Vec<&str> = mapping.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        [
            "System.GC.Server",
            "System.Globalization.Invariant",
            "System.Runtime.TieredPGO"
        ]
    );
}

#[test]
fn file_to_blob() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(RUNTIMECONFIG.as_bytes()).unwrap();

    let mapping = ConfigMapping::from_path(input.path()).unwrap();
    let blob = encode(&mapping, &EncoderConfig::new()).unwrap();

    assert_eq!(blob[0], 0x03);
    assert_eq!(blob[1] as usize, "System.GC.Server".len());
    assert_eq!(&blob[2..18], b"System.GC.Server");
}

#[test]
fn file_to_metadata_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("app.runtimeconfig.json");
    let output = dir.path().join("runtimeconfig.bin");
    std::fs::write(&input, RUNTIMECONFIG).unwrap();

    let mapping = ConfigMapping::from_path(&input).unwrap();
    let config = EncoderConfig::new().with_format(Format::MetadataRoot);
    encode_to_file(&mapping, &config, &output).unwrap();

    let data = std::fs::read(&output).unwrap();
    assert_eq!(&data[..4], b"BSJB");
    assert!(data.windows(17).any(|w| w == b"System.GC.Server\0"));
}

#[test]
fn missing_properties() {
    let result = ConfigMapping::from_json_str(r#"{ "runtimeOptions": { "tfm": "net8.0" } }"#);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn rejected_documents() {
    for text in [
        r#"{ "configProperties": { "a": 1 } }"#,
        r#"{ "configProperties": { "a": "1", "a": "2" } }"#,
        r#"{ "configProperties": ["a"] }"#,
        r#"{ "configProperties": "#,
        r#"{ "configProperties": {,} }"#,
        r#"{ "x": [,], "configProperties": { "a": "1" } }"#,
        "{,}",
        "[,]",
    ] {
        assert!(
            matches!(ConfigMapping::from_json_str(text), Err(Error::Json(_))),
            "{text}"
        );
    }
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigMapping::from_path(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::FileError(_))));
}
