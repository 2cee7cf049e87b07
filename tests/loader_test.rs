use std::fs;
use std::path::Path;
use tempfile::TempDir;
use thread_extract::*;

fn write(dir: &Path, name: &str, content: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert!(corpus.is_empty_corpus());
    assert!(corpus.skipped.is_empty());
    assert!(corpus.empty.is_empty());
}

#[test]
fn test_only_other_extensions() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.md", b"From: jane@x.com");
    write(dir.path(), "mail.eml", b"From: jane@x.com");
    write(dir.path(), "nested/data.csv", b"a,b,c");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert!(corpus.is_empty_corpus());
    assert!(corpus.sources.is_empty());
}

#[test]
fn test_missing_root_is_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let corpus = load_corpus(&dir.path().join("does-not-exist"), "txt").unwrap();

    assert!(corpus.is_empty_corpus());
}

#[test]
fn test_recursive_discovery_and_trim() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", b"\n\n  From: a@x.com  \n\n");
    write(dir.path(), "inbox/2024/b.txt", b"From: b@x.com");
    write(dir.path(), "inbox/skip.log", b"From: c@x.com");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert_eq!(corpus.sources.len(), 2);
    let texts: Vec<&str> = corpus.sources.iter().map(|s| s.text.as_str()).collect();
    assert!(texts.contains(&"From: a@x.com"));
    assert!(texts.contains(&"From: b@x.com"));
}

#[test]
fn test_blank_files_listed_as_empty() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "full.txt", b"From: a@x.com");
    write(dir.path(), "blank.txt", b"   \n\t\n");
    write(dir.path(), "zero.txt", b"");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert_eq!(corpus.sources.len(), 1);
    assert_eq!(corpus.empty.len(), 2);
    assert!(corpus.skipped.is_empty());
}

#[test]
fn test_invalid_utf8_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.txt", &[0x46, 0x72, 0xff, 0xfe, 0x6f]);
    write(dir.path(), "good.txt", b"From: a@x.com");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert_eq!(corpus.sources.len(), 1);
    assert_eq!(corpus.skipped.len(), 1);
    assert!(corpus.skipped[0].path.ends_with("bad.txt"));
    assert!(matches!(
        corpus.skipped[0].reason,
        SourceError::Undecodable(_)
    ));
}

#[test]
fn test_directory_named_like_source_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("folder.txt")).unwrap();
    write(dir.path(), "folder.txt/inner.txt", b"From: a@x.com");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert_eq!(corpus.sources.len(), 1);
    assert!(corpus.sources[0].path.ends_with("inner.txt"));
    assert!(corpus.skipped.is_empty());
}

#[test]
fn test_hidden_files_and_directories_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "visible.txt", b"From: a@x.com");
    write(dir.path(), ".hidden.txt", b"From: b@x.com");
    write(dir.path(), ".git/COMMIT.txt", b"From: c@x.com");
    write(dir.path(), "inbox/.draft.txt", b"From: d@x.com");
    write(dir.path(), "inbox/kept.txt", b"From: e@x.com");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    let names: Vec<String> = corpus
        .sources
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"visible.txt".to_string()));
    assert!(names.contains(&"kept.txt".to_string()));
    assert!(corpus.skipped.is_empty());
}

#[test]
fn test_only_hidden_sources_is_empty_corpus() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".hidden.txt", b"From: b@x.com");

    let corpus = load_corpus(dir.path(), "txt").unwrap();

    assert!(corpus.is_empty_corpus());
}

#[test]
fn test_root_with_glob_metacharacters() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("exports [2024]");
    write(&root, "a.txt", b"From: a@x.com");

    let corpus = load_corpus(&root, "txt").unwrap();

    assert_eq!(corpus.sources.len(), 1);
}

#[test]
fn test_enumeration_order_is_stable() {
    let dir = TempDir::new().unwrap();
    for name in ["c.txt", "a.txt", "b.txt"] {
        write(dir.path(), name, name.as_bytes());
    }

    let first: Vec<_> = load_corpus(dir.path(), "txt")
        .unwrap()
        .sources
        .into_iter()
        .map(|s| s.path)
        .collect();
    let second: Vec<_> = load_corpus(dir.path(), "txt")
        .unwrap()
        .sources
        .into_iter()
        .map(|s| s.path)
        .collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn test_read_source_strips_bom() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bom.txt", "\u{feff}From: a@x.com\n".as_bytes());

    let text = read_source(&dir.path().join("bom.txt")).unwrap();
    assert_eq!(text, "From: a@x.com");
}

#[test]
fn test_read_source_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_source(&dir.path().join("gone.txt")).unwrap_err();

    assert!(matches!(err, SourceError::Unreadable(_)));
}

#[test]
fn test_custom_extension() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", b"From: a@x.com");
    write(dir.path(), "b.eml", b"From: b@x.com");

    let corpus = load_corpus(dir.path(), "eml").unwrap();

    assert_eq!(corpus.sources.len(), 1);
    assert_eq!(corpus.sources[0].text, "From: b@x.com");
}
