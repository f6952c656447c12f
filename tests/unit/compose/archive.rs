use super::*;
use std::io::Read as _;

fn artifact(name: &str, bytes: &[u8]) -> Artifact {
    Artifact {
        name: name.to_owned(),
        mime: "image/png".to_owned(),
        bytes: bytes.to_vec(),
    }
}

#[test]
fn archive_holds_every_artifact_in_order() {
    let parts = vec![
        artifact("square.png", b"first"),
        artifact("story.png", &[7u8; 2048]),
    ];
    let zip = build_archive(&parts).expect("archive");
    assert_eq!(zip.name, ARCHIVE_NAME);
    assert_eq!(zip.mime, ARCHIVE_MIME);

    let mut reader = zip::ZipArchive::new(Cursor::new(zip.bytes)).expect("readable");
    assert_eq!(reader.len(), 2);
    for (i, part) in parts.iter().enumerate() {
        let mut entry = reader.by_index(i).expect("entry");
        assert_eq!(entry.name(), part.name);
        let mut body = Vec::new();
        entry.read_to_end(&mut body).expect("read");
        assert_eq!(body, part.bytes);
    }
}

#[test]
fn archive_bytes_are_stable() {
    let parts = vec![artifact("a.png", b"abc"), artifact("b.webp", b"defg")];
    let a = build_archive(&parts).expect("archive");
    let b = build_archive(&parts).expect("archive");
    assert_eq!(a.bytes, b.bytes);
}
