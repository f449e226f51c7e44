use std::fs;

use wings_core::outputs::{to_json_bytes, write_json_array};

#[test]
fn writes_compact_array_and_hashes_the_bytes() {
    let out = tempfile::tempdir().expect("tempdir");
    let rows = vec!["a", "b"];

    let artifact = write_json_array(out.path(), "letters", &rows).expect("write failed");

    assert_eq!(artifact.path, out.path().join("letters.json"));
    assert_eq!(artifact.rows, 2);
    assert_eq!(fs::read_to_string(&artifact.path).expect("read"), r#"["a","b"]"#);
    let bytes = to_json_bytes(&rows).expect("serialise");
    assert_eq!(artifact.hash, blake3::hash(&bytes).to_hex().to_string());
    assert!(!out.path().join("letters.json.tmp").exists());
}

#[test]
fn failed_rename_leaves_no_temporary_file() {
    let out = tempfile::tempdir().expect("tempdir");
    // A non-empty directory in the way makes the final rename fail.
    let blocker = out.path().join("letters.json");
    fs::create_dir(&blocker).expect("create blocker");
    fs::write(blocker.join("keep"), "x").expect("fill blocker");

    let result = write_json_array(out.path(), "letters", &["a"]);

    assert!(result.is_err());
    assert!(!out.path().join("letters.json.tmp").exists());
    assert!(blocker.join("keep").exists());
}
