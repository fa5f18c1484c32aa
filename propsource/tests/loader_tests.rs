use propsource::{
    ByteResource, Error, FileResource, LoaderRegistry, Location, OriginLookup,
    PropertiesPropertySourceLoader, PropertySource, PropertySourceLoader,
};
use std::fs;
use std::path::Path;

fn load_bytes(name: &str, filename: &str, content: &str) -> Vec<PropertySource> {
    let resource = ByteResource::new(content).with_filename(filename);
    PropertiesPropertySourceLoader::new()
        .load(name, &resource)
        .expect("load should succeed")
}

fn write_file(dir: &Path, filename: &str, content: &str) -> FileResource {
    let path = dir.join(filename);
    fs::write(&path, content).expect("Failed to write test file");
    FileResource::new(path)
}

#[test]
fn test_scenario_two_keys() {
    let sources = load_bytes("test", "app.properties", "k1=v1\nk2=v2");
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name(), "test");
    let pairs: Vec<_> = sources[0].iter().map(|e| (e.key, e.value)).collect();
    assert_eq!(pairs, vec![("k1", "v1"), ("k2", "v2")]);
}

#[test]
fn test_duplicate_key_last_wins() {
    let sources = load_bytes("test", "app.properties", "a=1\na=2");
    assert_eq!(sources[0].get("a"), Some("2"));
    assert_eq!(sources[0].len(), 1);
}

#[test]
fn test_line_continuation() {
    let sources = load_bytes("test", "app.properties", "a=1\\\n2");
    assert_eq!(sources[0].get("a"), Some("12"));
}

#[test]
fn test_comment_lines() {
    let sources = load_bytes("test", "app.properties", "# comment\na=1");
    assert_eq!(sources[0].properties().len(), 1);
    assert_eq!(sources[0].get("a"), Some("1"));
}

#[test]
fn test_empty_resources_produce_no_source() {
    for (filename, content) in [
        ("app.properties", ""),
        ("app.properties", "\n\n# just comments\n! and more\n"),
        ("app.xml", "<?xml version=\"1.0\"?><properties></properties>"),
    ] {
        let sources = load_bytes("test", filename, content);
        assert!(sources.is_empty(), "{filename}: {content:?}");
    }
}

#[test]
fn test_extension_dispatch() {
    let xml = r#"<properties><entry key="a">1</entry></properties>"#;

    let as_xml = load_bytes("test", "app.xml", xml);
    assert_eq!(as_xml[0].get("a"), Some("1"));
    assert!(!as_xml[0].is_origin_tracked());

    let as_properties = load_bytes("test", "app.properties", "a=1");
    assert!(as_properties[0].is_origin_tracked());

    let other_extension = load_bytes("test", "app.conf", "a=1");
    assert!(other_extension[0].is_origin_tracked());
}

#[test]
fn test_file_resource_origins() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_file(
        dir.path(),
        "application.properties",
        "# server\nserver.port=8080\n  server.host : example.org\nlist=a,\\\n     b\n",
    );

    let sources = PropertiesPropertySourceLoader::new()
        .load("applicationConfig", &resource)
        .unwrap();
    let source = &sources[0];

    assert_eq!(source.get("list"), Some("a,b"));
    assert_eq!(
        source.origin("server.port").unwrap().location,
        Location::new(2, 13)
    );
    assert_eq!(
        source.origin("server.host").unwrap().location,
        Location::new(3, 17)
    );
    assert_eq!(source.origin("list").unwrap().location, Location::new(4, 6));

    let origin = source.origin("server.port").unwrap().to_string();
    assert!(origin.starts_with("file ["), "{origin}");
    assert!(origin.ends_with("application.properties] - 2:13"), "{origin}");
}

#[test]
fn test_every_entry_has_an_origin() {
    let sources = load_bytes("test", "app.properties", "a=1\nb\nc:\nd = \\u0041");
    assert!(sources[0].iter().all(|entry| entry.origin.is_some()));
}

#[test]
fn test_file_resource_xml() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_file(
        dir.path(),
        "application.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
<properties>
  <entry key="db.url">jdbc:h2:mem:test</entry>
</properties>
"#,
    );
    let sources = PropertiesPropertySourceLoader::new()
        .load("xmlConfig", &resource)
        .unwrap();
    assert_eq!(sources[0].get("db.url"), Some("jdbc:h2:mem:test"));
    assert!(sources[0].iter().all(|entry| entry.origin.is_none()));
}

#[test]
fn test_missing_file_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let resource = FileResource::new(dir.path().join("absent.properties"));
    let err = PropertiesPropertySourceLoader::new()
        .load("missing", &resource)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_xml_produces_no_partial_result() {
    let resource = ByteResource::new(r#"<properties><entry key="a">1</entry><entry>"#)
        .with_filename("app.xml");
    assert!(
        PropertiesPropertySourceLoader::new()
            .load("broken", &resource)
            .is_err()
    );
}

#[test]
fn test_stray_xml_content_is_rejected() {
    let loader = PropertiesPropertySourceLoader::new();
    for content in [
        r#"junk text<properties><entry key="a">1</entry></properties>"#,
        r#"<properties><![CDATA[junk]]><entry key="a">1</entry></properties>"#,
        r#"<properties><entry key="a">1</entry></properties>junk"#,
    ] {
        let resource = ByteResource::new(content).with_filename("app.xml");
        let err = loader.load("broken", &resource).unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)), "{content}: {err:?}");
    }
}

#[test]
fn test_registry_loads_files() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoaderRegistry::default();

    let props = write_file(dir.path(), "a.properties", "x=1");
    let xml = write_file(
        dir.path(),
        "b.xml",
        r#"<properties><entry key="y">2</entry></properties>"#,
    );
    let yaml = write_file(dir.path(), "c.yml", "z: 3");

    assert_eq!(registry.load("a", &props).unwrap()[0].get("x"), Some("1"));
    assert_eq!(registry.load("b", &xml).unwrap()[0].get("y"), Some("2"));
    assert!(matches!(
        registry.load("c", &yaml),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_concurrent_loads_share_one_loader() {
    let loader = PropertiesPropertySourceLoader::new();
    let resources: Vec<_> = (0..8)
        .map(|i| ByteResource::new(format!("index={i}\nshared=yes")).with_filename("t.properties"))
        .collect();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = resources
            .iter()
            .enumerate()
            .map(|(i, resource)| {
                let loader = &loader;
                scope.spawn(move || loader.load(&format!("source-{i}"), resource))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    for (i, sources) in results.iter().enumerate() {
        let expected = i.to_string();
        assert_eq!(sources[0].name(), format!("source-{i}"));
        assert_eq!(sources[0].get("index"), Some(expected.as_str()));
    }
}
