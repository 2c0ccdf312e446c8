use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use loopcast::generate::LoopCount;
use loopcast::status::RecordingReporter;
use loopcast::{Catalog, Error, GenerateOptions, Session, SilentReporter};

fn options() -> GenerateOptions {
    GenerateOptions {
        prefix: "Streamer".to_string(),
        loop_count: LoopCount::Infinite,
        executable_name: "ffmpeg.exe".to_string(),
        keys_extension: ".txt".to_string(),
        script_extension: ".bat".to_string(),
        ingest_url: "rtmp://a.rtmp.youtube.com/live2".to_string(),
    }
}

/// Layout:
///   root/
///     keys.txt
///     a.mp4
///     b.mkv
///     tools/ffmpeg.exe
fn create_stream_tree(root: &Path, keys: &str) {
    fs::create_dir_all(root.join("tools")).unwrap();
    fs::write(root.join("keys.txt"), keys).unwrap();
    fs::write(root.join("a.mp4"), "video a").unwrap();
    fs::write(root.join("b.mkv"), "video b").unwrap();
    fs::write(root.join("tools").join("ffmpeg.exe"), "binary").unwrap();
}

fn script_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".bat"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_scan_classifies_every_regular_file_once() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("nested").join("deeper")).unwrap();
    fs::create_dir_all(root.join("looks_like.mp4")).unwrap();
    fs::write(root.join("one.MP4"), "x").unwrap();
    fs::write(root.join("nested").join("two.mp4"), "x").unwrap();
    fs::write(root.join("nested").join("deeper").join("keys.TXT"), "k").unwrap();
    fs::write(root.join("nested").join("README"), "r").unwrap();
    fs::write(root.join("notes.md"), "n").unwrap();

    let catalog = Catalog::scan(root).unwrap();

    assert_eq!(catalog.len(), 5);
    let bucket_total: usize = catalog.extensions().map(|ext| catalog.bucket_len(ext)).sum();
    assert_eq!(bucket_total, catalog.len());
    assert_eq!(catalog.bucket_len(".mp4"), 2);
    assert_eq!(catalog.bucket_len(".txt"), 1);
    assert_eq!(catalog.bucket_len(""), 1);
    assert_eq!(catalog.video_files().len(), 2);
}

#[test]
fn test_scan_missing_root_is_io_error() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("does_not_exist");
    assert!(matches!(Catalog::scan(&missing), Err(Error::Io(_))));
}

#[test]
fn test_rescan_replaces_catalog() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\n");

    let mut session = Session::new();
    session.open(root, &SilentReporter).unwrap();
    assert_eq!(session.catalog().len(), 4);

    fs::remove_file(root.join("b.mkv")).unwrap();
    session.scan(&SilentReporter).unwrap();
    assert_eq!(session.catalog().len(), 3);
    assert_eq!(session.catalog().bucket_len(".mkv"), 0);
}

#[test]
fn test_generate_two_keys_two_videos() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let catalog = Catalog::scan(root).unwrap();
    let report = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap();

    assert!(report.is_success());
    assert_eq!(report.written.len(), 2);
    assert!(report.unmatched.is_empty());
    assert_eq!(script_names(root), vec!["Streamer 1.bat", "Streamer 2.bat"]);

    let exe = root.join("tools").join("ffmpeg.exe");
    let first = fs::read_to_string(root.join("Streamer 1.bat")).unwrap();
    assert_eq!(
        first,
        format!(
            "\"{}\" -stream_loop -1 -re -i \"{}\" -c copy -f flv -flvflags no_duration_filesize rtmp://a.rtmp.youtube.com/live2/key1",
            exe.display(),
            root.join("a.mp4").display()
        )
    );

    let second = fs::read_to_string(root.join("Streamer 2.bat")).unwrap();
    assert!(second.contains(&format!("-i \"{}\"", root.join("b.mkv").display())));
    assert!(second.ends_with("/live2/key2"));
}

#[test]
fn test_generate_with_loop_count() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let catalog = Catalog::scan(root).unwrap();
    let opts = options().with_loop_count(LoopCount::from(Some(3)));
    let report = loopcast::generate::generate(&catalog, root, &opts, &SilentReporter).unwrap();

    for script in &report.written {
        let contents = fs::read_to_string(&script.path).unwrap();
        assert!(contents.contains(" -stream_loop 3 "));
        assert!(!contents.contains("-stream_loop -1"));
    }
}

#[test]
fn test_generate_fewer_keys_than_videos() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\n\n   \nkey2\n");
    fs::write(root.join("c.mov"), "video c").unwrap();

    let catalog = Catalog::scan(root).unwrap();
    let report = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap();

    assert_eq!(report.written.len(), 2);
    let videos: Vec<String> = report
        .written
        .iter()
        .map(|s| fs::read_to_string(&s.path).unwrap())
        .collect();
    assert_ne!(videos[0], videos[1]);
    assert!(!videos.iter().any(|v| v.contains("c.mov")));
}

#[test]
fn test_generate_more_keys_than_videos_reports_unmatched() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\nkey3\nkey4\n");

    let reporter = RecordingReporter::new();
    let catalog = Catalog::scan(root).unwrap();
    let report = loopcast::generate::generate(&catalog, root, &options(), &reporter).unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(report.unmatched, vec![3, 4]);
    assert!(report.is_success());
    assert!(reporter
        .lines()
        .contains(&"Error: Video file for Streamer 3 not found".to_string()));
    assert!(reporter.error_count() >= 1);
}

#[test]
fn test_generate_requires_executable() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\n");
    fs::remove_file(root.join("tools").join("ffmpeg.exe")).unwrap();

    let catalog = Catalog::scan(root).unwrap();
    let err = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap_err();

    assert!(matches!(err, Error::NoExecutable(_)));
    assert!(script_names(root).is_empty());
}

#[test]
fn test_generate_matches_executable_name_case_insensitively() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\n");
    fs::rename(
        root.join("tools").join("ffmpeg.exe"),
        root.join("tools").join("FFMPEG.EXE"),
    )
    .unwrap();

    let catalog = Catalog::scan(root).unwrap();
    let report = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap();
    assert_eq!(report.written.len(), 1);
}

#[test]
fn test_write_failure_does_not_stop_other_jobs() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");
    // A directory where the first script should go makes that write fail.
    fs::create_dir_all(root.join("Streamer 1.bat")).unwrap();

    let catalog = Catalog::scan(root).unwrap();
    let report = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0], Error::WriteFailure { .. }));
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].index, 2);
    assert!(report.is_success());
}

#[test]
fn test_session_generate_records_scripts() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let mut session = Session::new();
    session.open(root, &SilentReporter).unwrap();
    let report = session.generate(&options(), &SilentReporter).unwrap();

    let generated: Vec<PathBuf> = session.generated().iter().map(|s| s.path.clone()).collect();
    let written: Vec<PathBuf> = report.written.iter().map(|s| s.path.clone()).collect();
    assert_eq!(generated, written);
    assert_eq!(generated.len(), 2);
}

#[test]
fn test_reset_clears_session() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let mut session = Session::new();
    session.open(root, &SilentReporter).unwrap();
    session.generate(&options(), &SilentReporter).unwrap();

    session.reset(&SilentReporter);
    assert!(session.root().is_none());
    assert!(session.catalog().is_empty());
    assert!(session.generated().is_empty());

    // Scripts stay on disk.
    assert_eq!(script_names(root).len(), 2);

    let err = session.generate(&options(), &SilentReporter).unwrap_err();
    assert!(matches!(err, Error::MissingRoot));

    // Reset drops the root too, so only re-selecting it without a scan reaches NoKeysFile.
    session.set_root(root);
    let err = session.generate(&options(), &SilentReporter).unwrap_err();
    assert!(matches!(err, Error::NoKeysFile(_)));
}

#[test]
fn test_failed_rescan_does_not_keep_previous_catalog() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let mut session = Session::new();
    session.open(root, &SilentReporter).unwrap();
    session.generate(&options(), &SilentReporter).unwrap();
    assert_eq!(session.catalog().len(), 4);

    let missing = root.join("nope");
    assert!(matches!(
        session.open(&missing, &SilentReporter),
        Err(Error::Io(_))
    ));
    assert!(session.root().is_none());
    assert!(session.catalog().is_empty());
    assert!(session.generated().is_empty());

    let err = session.generate(&options(), &SilentReporter).unwrap_err();
    assert!(matches!(err, Error::MissingRoot));
}

#[test]
fn test_failed_generate_keeps_previous_scripts() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_stream_tree(root, "key1\nkey2\n");

    let mut session = Session::new();
    session.open(root, &SilentReporter).unwrap();
    session.generate(&options(), &SilentReporter).unwrap();
    assert_eq!(session.generated().len(), 2);

    fs::remove_file(root.join("tools").join("ffmpeg.exe")).unwrap();
    session.scan(&SilentReporter).unwrap();
    let err = session.generate(&options(), &SilentReporter).unwrap_err();

    assert!(matches!(err, Error::NoExecutable(_)));
    assert_eq!(session.generated().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_scan_records_symlinked_files() {
    use std::os::unix::fs::symlink;

    let real = tempdir().unwrap();
    fs::create_dir_all(real.path().join("clips")).unwrap();
    fs::write(real.path().join("ffmpeg.exe"), "binary").unwrap();
    fs::write(real.path().join("c.mp4"), "video c").unwrap();
    fs::write(real.path().join("clips").join("d.mp4"), "video d").unwrap();

    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("keys.txt"), "key1\n").unwrap();
    symlink(real.path().join("ffmpeg.exe"), root.join("ffmpeg.exe")).unwrap();
    symlink(real.path().join("c.mp4"), root.join("c.mp4")).unwrap();
    symlink(real.path().join("clips"), root.join("linked_clips")).unwrap();
    symlink(root.join("gone.mp4"), root.join("broken.mp4")).unwrap();

    let catalog = Catalog::scan(root).unwrap();

    // keys.txt, ffmpeg.exe and c.mp4; the linked directory and the dangling link are skipped.
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.video_files().len(), 1);

    let report = loopcast::generate::generate(&catalog, root, &options(), &SilentReporter).unwrap();
    assert_eq!(report.written.len(), 1);
    let contents = fs::read_to_string(&report.written[0].path).unwrap();
    assert!(contents.contains(&format!("\"{}\"", root.join("ffmpeg.exe").display())));
    assert!(contents.contains(&format!("-i \"{}\"", root.join("c.mp4").display())));
}
