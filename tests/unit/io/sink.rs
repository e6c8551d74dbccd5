use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 3,
        height: 2,
        fps: 30.0,
    }
}

#[test]
fn in_memory_sink_captures_frames_and_end() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(Tick(0), &Frame::filled(3, 2, [9, 9, 9])).unwrap();
    sink.push_frame(Tick(1), &Frame::new(3, 2)).unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[0].0, Tick(0));
    assert_eq!(sink.frames()[0].1.pixel(2, 1), Some([9, 9, 9]));
}

#[test]
fn null_sink_counts() {
    let mut sink = NullSink::default();
    sink.begin(cfg()).unwrap();
    for t in 0..4 {
        sink.push_frame(Tick(t), &Frame::new(3, 2)).unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.frames, 4);
}

#[test]
fn png_sink_writes_numbered_files() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_png_sink");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(Tick(7), &Frame::filled(3, 2, [10, 20, 30])).unwrap();
    sink.end().unwrap();

    let path = sink.path_for(Tick(7));
    assert!(path.ends_with("frame_000007.png"));
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30]);
    assert_eq!(sink.written(), 1);
}
