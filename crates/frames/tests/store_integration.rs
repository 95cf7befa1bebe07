//! End-to-end frame-store tests: encode a real GIF to a temp file, then
//! probe and load it back through the public API. No mocks.

use std::fs;
use std::path::Path;

use frames::{probe, FrameStore, ResourceError};
use gif::{Encoder, Repeat};
use tempfile::TempDir;

const W: u16 = 8;
const H: u16 = 8;

/// Write a GIF of `frame_delays_cs.len()` solid frames. Delays are in
/// hundredths of a second (native GIF units).
fn write_gif(path: &Path, frame_delays_cs: &[u16], repeat: Option<Repeat>) {
    let mut file = fs::File::create(path).expect("create fixture");
    let mut encoder = Encoder::new(&mut file, W, H, &[]).expect("gif encoder");
    if let Some(r) = repeat {
        encoder.set_repeat(r).expect("set repeat");
    }
    for (i, delay) in frame_delays_cs.iter().enumerate() {
        let shade = (i * 40 % 256) as u8;
        let pixels: Vec<u8> = (0..usize::from(W) * usize::from(H))
            .flat_map(|_| [shade, 0, 255 - shade])
            .collect();
        let mut frame = gif::Frame::from_rgb(W, H, &pixels);
        frame.delay = *delay;
        encoder.write_frame(&frame).expect("write frame");
    }
}

#[test]
fn test_probe_counts_frames_and_default_delay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("three.gif");
    write_gif(&path, &[10, 20, 30], Some(Repeat::Infinite));

    let meta = probe(&path).unwrap();
    assert_eq!(meta.frame_count, 3);
    assert_eq!(meta.default_duration_ms, 100);
}

#[test]
fn test_probe_absent_loop_metadata_means_play_once() {
    // Locked-in convention: no Netscape extension = exactly one pass.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("once.gif");
    write_gif(&path, &[10, 10], None);

    let meta = probe(&path).unwrap();
    assert_eq!(meta.loop_count, 1);
}

#[test]
fn test_probe_infinite_loop_maps_to_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forever.gif");
    write_gif(&path, &[10, 10], Some(Repeat::Infinite));

    let meta = probe(&path).unwrap();
    assert_eq!(meta.loop_count, 0);
}

#[test]
fn test_probe_finite_loop_count_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("five.gif");
    write_gif(&path, &[10, 10], Some(Repeat::Finite(5)));

    let meta = probe(&path).unwrap();
    assert_eq!(meta.loop_count, 5);
}

#[test]
fn test_load_rejects_single_frame() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("still.gif");
    write_gif(&path, &[10], None);

    let store = FrameStore::new(32, 32);
    match store.load(&path) {
        Err(ResourceError::NotAnimated { frame_count, .. }) => assert_eq!(frame_count, 1),
        other => panic!("expected NotAnimated, got {other:?}"),
    }
}

#[test]
fn test_load_rejects_garbage_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.gif");
    fs::write(&path, b"definitely not a gif").unwrap();

    let store = FrameStore::new(32, 32);
    assert!(matches!(store.load(&path), Err(ResourceError::Probe { .. })));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.gif");

    let store = FrameStore::new(32, 32);
    assert!(matches!(store.load(&path), Err(ResourceError::Io { .. })));
}

#[test]
fn test_load_fits_every_frame_to_target() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[10, 10, 10], Some(Repeat::Infinite));

    let store = FrameStore::new(32, 24);
    let set = store.load(&path).unwrap();
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
    for frame in set.frames() {
        assert_eq!(frame.image.width(), 32);
        assert_eq!(frame.image.height(), 24);
    }
}

#[test]
fn test_load_durations_follow_authored_delays() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timed.gif");
    write_gif(&path, &[10, 20, 30], Some(Repeat::Infinite));

    let store = FrameStore::new(8, 8);
    let set = store.load(&path).unwrap();
    let durations: Vec<u32> = set.frames().iter().map(|f| f.duration_ms).collect();
    assert_eq!(durations, vec![100, 200, 300]);
}

#[test]
fn test_load_zero_delay_inherits_resource_default() {
    // Frames without their own delay fall back to the first frame's.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaulted.gif");
    write_gif(&path, &[15, 0, 0], Some(Repeat::Infinite));

    let store = FrameStore::new(8, 8);
    let set = store.load(&path).unwrap();
    let durations: Vec<u32> = set.frames().iter().map(|f| f.duration_ms).collect();
    assert_eq!(durations, vec![150, 150, 150]);
}

#[test]
fn test_loop_count_carried_onto_frame_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.gif");
    write_gif(&path, &[10, 10], Some(Repeat::Finite(2)));

    let store = FrameStore::new(8, 8);
    let set = store.load(&path).unwrap();
    assert_eq!(set.loop_count(), 2);
}
