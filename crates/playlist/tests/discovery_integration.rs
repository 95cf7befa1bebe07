//! End-to-end discovery tests against a real temporary folder. No mocks.

use std::fs;
use std::path::Path;

use gif::{Encoder, Repeat};
use playlist::{discover, PlaylistError};
use tempfile::TempDir;

const W: u16 = 4;
const H: u16 = 4;

fn write_gif(path: &Path, frame_count: usize) {
    let mut file = fs::File::create(path).expect("create fixture");
    let mut encoder = Encoder::new(&mut file, W, H, &[]).expect("gif encoder");
    encoder.set_repeat(Repeat::Infinite).expect("set repeat");
    for i in 0..frame_count {
        let shade = (i * 60 % 256) as u8;
        let pixels: Vec<u8> = (0..usize::from(W) * usize::from(H))
            .flat_map(|_| [shade, shade, shade])
            .collect();
        let mut frame = gif::Frame::from_rgb(W, H, &pixels);
        frame.delay = 10;
        encoder.write_frame(&frame).expect("write frame");
    }
}

#[test]
fn test_discovery_keeps_exactly_the_qualifying_files() {
    let dir = TempDir::new().unwrap();
    write_gif(&dir.path().join("b.gif"), 3);
    write_gif(&dir.path().join("a.gif"), 2);
    write_gif(&dir.path().join("still.gif"), 1); // single frame: out
    write_gif(&dir.path().join("._sidecar.gif"), 4); // dot-prefixed: out
    fs::write(dir.path().join("notes.txt"), "hi").unwrap(); // wrong ext: out
    fs::write(dir.path().join("broken.gif"), b"not a gif").unwrap(); // undecodable: out
    fs::create_dir(dir.path().join("sub.gif")).unwrap(); // a directory: out

    let pl = discover(dir.path()).unwrap();
    let names: Vec<String> = pl
        .entries()
        .iter()
        .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.gif", "b.gif"]);
}

#[test]
fn test_discovery_accepts_uppercase_extension() {
    let dir = TempDir::new().unwrap();
    write_gif(&dir.path().join("LOUD.GIF"), 2);

    let pl = discover(dir.path()).unwrap();
    assert_eq!(pl.len(), 1);
}

#[test]
fn test_discovery_order_is_stable_by_name() {
    let dir = TempDir::new().unwrap();
    // Created out of order on purpose.
    for name in ["zebra.gif", "alpha.gif", "middle.gif"] {
        write_gif(&dir.path().join(name), 2);
    }

    let first = discover(dir.path()).unwrap();
    let second = discover(dir.path()).unwrap();
    let order = |pl: &playlist::Playlist| -> Vec<String> {
        pl.entries()
            .iter()
            .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    };
    assert_eq!(order(&first), vec!["alpha.gif", "middle.gif", "zebra.gif"]);
    assert_eq!(order(&first), order(&second));
}

#[test]
fn test_discovery_caches_probe_metadata() {
    let dir = TempDir::new().unwrap();
    write_gif(&dir.path().join("a.gif"), 3);

    let pl = discover(dir.path()).unwrap();
    let meta = pl.current().meta;
    assert_eq!(meta.frame_count, 3);
    assert_eq!(meta.loop_count, 0); // encoded with Repeat::Infinite
    assert_eq!(meta.default_duration_ms, 100);
}

#[test]
fn test_empty_folder_is_fatal() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        discover(dir.path()),
        Err(PlaylistError::NoResources { .. })
    ));
}

#[test]
fn test_folder_with_only_disqualified_files_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_gif(&dir.path().join("still.gif"), 1);
    fs::write(dir.path().join("readme.md"), "x").unwrap();

    assert!(matches!(
        discover(dir.path()),
        Err(PlaylistError::NoResources { .. })
    ));
}

#[test]
fn test_missing_folder_is_io_error() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("nope");
    assert!(matches!(discover(&gone), Err(PlaylistError::Io { .. })));
}

#[test]
fn test_advance_and_back_cycle_discovered_entries() {
    let dir = TempDir::new().unwrap();
    for name in ["a.gif", "b.gif", "c.gif"] {
        write_gif(&dir.path().join(name), 2);
    }

    let mut pl = discover(dir.path()).unwrap();
    assert_eq!(pl.index(), 0);
    pl.advance();
    pl.advance();
    pl.advance();
    assert_eq!(pl.index(), 0); // wrapped
    pl.back();
    assert_eq!(pl.index(), 2); // wrapped backwards
}
