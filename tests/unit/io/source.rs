use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_frame_source")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32, color: [u8; 3]) {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb(color));
    img.save(path).unwrap();
}

#[test]
fn vec_source_yields_in_order_then_ends() {
    let mut src = VecSource::new([Frame::filled(2, 2, [1, 1, 1]), Frame::filled(2, 2, [2, 2, 2])]);
    assert_eq!(src.next_frame().unwrap().unwrap().pixel(0, 0), Some([1, 1, 1]));
    assert_eq!(src.remaining(), 1);
    assert_eq!(src.next_frame().unwrap().unwrap().pixel(0, 0), Some([2, 2, 2]));
    assert!(src.next_frame().unwrap().is_none());
}

#[test]
fn test_pattern_respects_limit_and_size() {
    let canvas = Canvas::new(16, 8).unwrap();
    let mut src = TestPatternSource::new(canvas).with_limit(2);
    let a = src.next_frame().unwrap().unwrap();
    let b = src.next_frame().unwrap().unwrap();
    assert_eq!(a.canvas(), canvas);
    assert_ne!(a, b);
    assert!(src.next_frame().unwrap().is_none());
}

#[test]
fn image_sequence_reads_sorted_frames() {
    let dir = scratch_dir("sorted");
    write_png(&dir.join("002.png"), 4, 3, [0, 0, 200]);
    write_png(&dir.join("001.png"), 4, 3, [200, 0, 0]);
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let mut src = ImageSequenceSource::open(&dir).unwrap();
    assert_eq!(src.probe_canvas().unwrap(), Canvas::new(4, 3).unwrap());
    let first = src.next_frame().unwrap().unwrap();
    assert_eq!(first.pixel(0, 0), Some([200, 0, 0]));
    assert_eq!(src.canvas(), Some(Canvas::new(4, 3).unwrap()));
    let second = src.next_frame().unwrap().unwrap();
    assert_eq!(second.pixel(3, 2), Some([0, 0, 200]));
    assert!(src.next_frame().unwrap().is_none());
}

#[test]
fn image_sequence_rejects_resolution_change() {
    let dir = scratch_dir("resize");
    write_png(&dir.join("a.png"), 4, 3, [1, 2, 3]);
    write_png(&dir.join("b.png"), 5, 3, [1, 2, 3]);

    let mut src = ImageSequenceSource::open(&dir).unwrap();
    src.next_frame().unwrap();
    let err = src.next_frame().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().starts_with("frame source error:"));
}

#[test]
fn image_sequence_requires_images() {
    let dir = scratch_dir("empty");
    let err = ImageSequenceSource::open(&dir).unwrap_err();
    assert!(err.to_string().contains("no images"));
    assert!(ImageSequenceSource::open(dir.join("missing")).is_err());
}
