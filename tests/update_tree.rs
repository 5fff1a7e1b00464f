use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};
use verstamp::{Category, FileStatus, UpdaterOptions, VersionUpdater};

const CODE_INIT: &str = "\"\"\"cogent3\"\"\"\n__author__ = \"Gavin Huttley\"\n__version__ = \"2.9\"\n";
const TESTS_INIT: &str = "__version__ = \"2.9\"\n";
const DOCS_CONF: &str = "project = \"cogent3\"\nversion = \"2.9\"\nrelease = \"2.9.0\"\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "src/cogent3/__init__.py", CODE_INIT);
    write(root, "src/cogent3/align/_align.pyx", "__version__ = \"('2', '9')\"\n");
    write(root, "src/cogent3/align/_align.c", "#include <Python.h>\n#define PYCOGENT_VERSION \"2.9\"\n");
    write(root, "src/cogent3/util/misc.py", "def f():\n    return 1\n");
    write(root, "src/cogent3/data/blosum62.txt", "__version__ = \"2.9\"\n");
    write(root, "tests/__init__.py", TESTS_INIT);
    write(root, "tests/test_app.py", "# __version__ mentioned here\n__version__ = \"2.9\"\n");
    write(root, "doc/conf.py", DOCS_CONF);
    write(root, "src/include/array_interface.h", "#ifndef AI\n#define PYCOGENT_VERSION \"2.9\"\n#endif\n");
    write(root, "src/include/numerical.pyx", "cdef int x\n");
    dir
}

fn options(root: &Path, mock_run: bool) -> UpdaterOptions {
    UpdaterOptions {
        rootdir: Some(root.display().to_string()),
        version: "3.0a2".to_string(),
        version_short: Some("3.0".to_string()),
        is_release: false,
        verbose: false,
        mock_run,
    }
}

fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    walk(root, root)
}

fn walk(root: &Path, dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(walk(root, &path));
        } else {
            let rel = path.strip_prefix(root).unwrap().display().to_string();
            files.insert(rel, fs::read(&path).unwrap());
        }
    }
    files
}

#[test]
fn full_run_rewrites_every_category() {
    let dir = project();
    let root = dir.path();

    let updater = VersionUpdater::new(options(root, false)).unwrap();
    let run = updater.update_all().unwrap();

    assert_eq!(
        read(root, "src/cogent3/__init__.py"),
        "\"\"\"cogent3\"\"\"\n__author__ = \"Gavin Huttley\"\n__version__ = \"3.0a2\"\n"
    );
    assert_eq!(
        read(root, "src/cogent3/align/_align.pyx"),
        "__version__ = \"('3', '0a2')\"\n"
    );
    assert_eq!(
        read(root, "src/cogent3/align/_align.c"),
        "#include <Python.h>\n#define PYCOGENT_VERSION \"3.0a2\"\n"
    );
    assert_eq!(read(root, "tests/__init__.py"), "__version__ = \"3.0a2\"\n");
    assert_eq!(
        read(root, "doc/conf.py"),
        "project = \"cogent3\"\nversion = \"3.0\"\nrelease = \"3.0a2\"\n"
    );
    assert_eq!(
        read(root, "src/include/array_interface.h"),
        "#ifndef AI\n#define PYCOGENT_VERSION \"3.0a2\"\n#endif\n"
    );

    let categories: Vec<Category> = run.categories.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Code,
            Category::Tests,
            Category::Docs,
            Category::Includes,
            Category::Index
        ]
    );
    // misc.py and numerical.pyx have no marker
    assert_eq!(run.summary.not_found, 2);
    assert_eq!(run.summary.written, 7);
    assert_eq!(run.summary.would_write, 0);
}

#[test]
fn files_without_marker_and_unknown_suffixes_are_untouched() {
    let dir = project();
    let root = dir.path();

    VersionUpdater::new(options(root, false))
        .unwrap()
        .update_all()
        .unwrap();

    assert_eq!(read(root, "src/cogent3/util/misc.py"), "def f():\n    return 1\n");
    assert_eq!(read(root, "src/include/numerical.pyx"), "cdef int x\n");
    assert_eq!(
        read(root, "src/cogent3/data/blosum62.txt"),
        "__version__ = \"2.9\"\n"
    );
}

#[test]
fn first_real_marker_wins_over_comment_mention() {
    let dir = project();
    let root = dir.path();

    let report = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_test_files()
        .unwrap();

    assert_eq!(
        read(root, "tests/test_app.py"),
        "# __version__ mentioned here\n__version__ = \"3.0a2\"\n"
    );
    let outcome = report.file("test_app.py").unwrap();
    assert_eq!(outcome.edits.len(), 1);
    assert_eq!(outcome.edits[0].line, 2);
}

#[test]
fn mock_run_leaves_tree_byte_identical_but_reports_edits() {
    let dir = project();
    let root = dir.path();
    let before = snapshot(root);

    let run = VersionUpdater::new(options(root, true))
        .unwrap()
        .update_all()
        .unwrap();

    assert_eq!(snapshot(root), before);
    assert!(run.mock_run);
    assert_eq!(run.summary.written, 0);
    assert_eq!(run.summary.would_write, 7);

    let docs = &run.categories[2];
    let conf = &docs.files[0];
    assert_eq!(conf.status, FileStatus::WouldWrite);
    assert_eq!(conf.edits[0].after, "version = \"3.0\"");
    assert_eq!(conf.edits[1].after, "release = \"3.0a2\"");
}

#[test]
fn second_run_is_byte_identical_to_first() {
    let dir = project();
    let root = dir.path();

    VersionUpdater::new(options(root, false))
        .unwrap()
        .update_all()
        .unwrap();
    let once = snapshot(root);

    let run = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_all()
        .unwrap();

    assert_eq!(snapshot(root), once);
    assert!(run
        .categories
        .iter()
        .flat_map(|r| &r.files)
        .flat_map(|f| &f.edits)
        .all(|e| !e.changed()));
}

#[test]
fn docs_conf_missing_version_still_updates_release() {
    let dir = project();
    let root = dir.path();
    write(root, "doc/conf.py", "project = \"cogent3\"\nrelease = \"2.9.0\"\n");

    let report = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_doc_files()
        .unwrap();

    assert_eq!(
        read(root, "doc/conf.py"),
        "project = \"cogent3\"\nrelease = \"3.0a2\"\n"
    );
    assert_eq!(report.written, 1);
    assert_eq!(report.files[0].missing, vec!["version".to_string()]);
}

#[test]
fn docs_conf_without_keys_is_not_rewritten() {
    let dir = project();
    let root = dir.path();
    write(root, "doc/conf.py", "project = \"cogent3\"\n");

    let report = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_doc_files()
        .unwrap();

    assert_eq!(report.not_found, 1);
    assert_eq!(read(root, "doc/conf.py"), "project = \"cogent3\"\n");
}

#[test]
fn missing_docs_conf_fails_before_any_write() {
    let dir = project();
    let root = dir.path();
    fs::remove_file(root.join("doc/conf.py")).unwrap();
    let before = snapshot(root);

    let err = VersionUpdater::new(options(root, false)).unwrap_err();

    assert_eq!(err.code.as_str(), "layout.marker_missing");
    assert_eq!(err.message, "Could not locate doc/conf.py");
    assert_eq!(snapshot(root), before);
}

#[test]
fn configured_index_file_gets_new_tarball_name() {
    let dir = project();
    let root = dir.path();
    write(
        root,
        "verstamp.json",
        r#"{"index": {"files": ["doc/cogent3-requirements.txt"]}}"#,
    );
    write(
        root,
        "doc/cogent3-requirements.txt",
        "numpy\nhttps://pypi.org/packages/source/c/cogent3/PyCogent-2.9.tgz\n",
    );

    let report = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_index_files()
        .unwrap();

    assert_eq!(report.written, 1);
    assert_eq!(
        read(root, "doc/cogent3-requirements.txt"),
        "numpy\nhttps://pypi.org/packages/source/c/cogent3/PyCogent-3.0a2.tgz\n"
    );
}

#[test]
fn custom_layout_and_macro_from_config() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "verstamp.json",
        r#"{
            "layout": {"codeDir": "lib/pkg", "includesDir": "lib/include"},
            "markers": {"versionMacro": "PKG_VERSION"}
        }"#,
    );
    write(root, "lib/pkg/__init__.py", "__version__ = \"1.0\"\n");
    write(root, "tests/__init__.py", "");
    write(root, "doc/conf.py", "");
    write(root, "lib/include/pkg.h", "#define PKG_VERSION \"1.0\"\n");

    let updater = VersionUpdater::new(options(root, false)).unwrap();
    updater.update_code_files().unwrap();
    updater.update_include_files().unwrap();

    assert_eq!(read(root, "lib/pkg/__init__.py"), "__version__ = \"3.0a2\"\n");
    assert_eq!(read(root, "lib/include/pkg.h"), "#define PKG_VERSION \"3.0a2\"\n");
}

#[test]
fn version_values_are_written_as_given() {
    let dir = project();
    let root = dir.path();

    let updater = VersionUpdater::new(UpdaterOptions {
        version: " 3.0a2 ".to_string(),
        version_short: Some(" 3.0 ".to_string()),
        ..options(root, false)
    })
    .unwrap();
    updater.update_code_files().unwrap();
    updater.update_doc_files().unwrap();

    assert_eq!(
        read(root, "src/cogent3/__init__.py"),
        "\"\"\"cogent3\"\"\"\n__author__ = \"Gavin Huttley\"\n__version__ = \" 3.0a2 \"\n"
    );
    assert_eq!(
        read(root, "doc/conf.py"),
        "project = \"cogent3\"\nversion = \" 3.0 \"\nrelease = \" 3.0a2 \"\n"
    );
}

#[test]
fn crlf_source_file_keeps_crlf_endings() {
    let dir = project();
    let root = dir.path();
    write(root, "tests/__init__.py", "__version__ = \"2.9\"\r\nx = 1\r\n");

    VersionUpdater::new(options(root, false))
        .unwrap()
        .update_test_files()
        .unwrap();

    assert_eq!(
        read(root, "tests/__init__.py"),
        "__version__ = \"3.0a2\"\r\nx = 1\r\n"
    );
}

#[test]
fn unreadable_source_file_aborts_category() {
    let dir = project();
    let root = dir.path();
    // Invalid UTF-8 cannot be read as text lines.
    fs::write(root.join("src/cogent3/binary.py"), [0xff, 0xfe, 0x00]).unwrap();

    let err = VersionUpdater::new(options(root, false))
        .unwrap()
        .update_code_files()
        .unwrap_err();

    assert_eq!(err.code.as_str(), "internal.io_error");
}
