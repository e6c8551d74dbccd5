use super::*;

const WHITE: Rgb8 = [255, 255, 255];

fn lit(f: &Frame) -> usize {
    f.as_bytes().chunks_exact(3).filter(|p| p != &[0, 0, 0]).count()
}

#[test]
fn pixel_aligned_rect_is_exact() {
    let mut layer = Layer::new(10, 10).unwrap();
    layer.fill_rect(2.0, 3.0, 6.0, 5.0, [10, 200, 30]);
    let px = layer.finish();
    let f = px.to_frame().unwrap();
    assert_eq!(f.pixel(2, 3), Some([10, 200, 30]));
    assert_eq!(f.pixel(5, 4), Some([10, 200, 30]));
    assert_eq!(f.pixel(6, 4), Some([0, 0, 0]));
    assert_eq!(f.pixel(2, 5), Some([0, 0, 0]));
    assert_eq!(px.alpha(3, 3), Some(255));
    assert_eq!(px.alpha(0, 0), Some(0));
    assert_eq!(px.alpha(10, 0), None);
}

#[test]
fn circle_covers_center_and_antialiases_edge() {
    let mut layer = Layer::new(20, 20).unwrap();
    layer.fill_circle(Point::new(10.5, 10.5), 4.0, WHITE);
    let px = layer.finish();
    assert_eq!(px.alpha(10, 10), Some(255));
    assert_eq!(px.alpha(0, 0), Some(0));
    let partial = (0..20)
        .flat_map(|y| (0..20).map(move |x| (x, y)))
        .filter(|&(x, y)| matches!(px.alpha(x, y), Some(a) if a > 0 && a < 255))
        .count();
    assert!(partial > 0);
}

#[test]
fn stroked_circle_leaves_center_empty() {
    let mut layer = Layer::new(40, 40).unwrap();
    layer.stroke_circle(Point::new(20.5, 20.5), 10.0, 4.0, WHITE);
    let px = layer.finish();
    assert_eq!(px.alpha(20, 20), Some(0));
    assert_eq!(px.alpha(30, 20), Some(255));
    assert_eq!(px.alpha(35, 20), Some(0));
}

#[test]
fn shapes_past_the_edge_are_clipped() {
    let mut layer = Layer::new(16, 16).unwrap();
    layer.fill_circle(Point::new(0.0, 0.0), 6.0, WHITE);
    layer.fill_circle(Point::new(8.0, 8.0), 60_000.0, [0, 0, 255]);
    let f = layer.finish().to_frame().unwrap();
    assert_eq!(f.pixel(15, 15), Some([0, 0, 255]));
    assert_eq!(lit(&f), 16 * 16);
}

#[test]
fn degenerate_shapes_draw_nothing() {
    let mut layer = Layer::new(8, 8).unwrap();
    layer.fill_circle(Point::new(4.0, 4.0), 0.0, WHITE);
    layer.fill_circle(Point::new(4.0, 4.0), f64::NAN, WHITE);
    layer.stroke_circle(Point::new(4.0, 4.0), 3.0, -1.0, WHITE);
    assert_eq!(lit(&layer.finish().to_frame().unwrap()), 0);
}

#[test]
fn draw_over_blends_by_coverage() {
    let mut layer = Layer::new(4, 1).unwrap();
    layer.fill_rect(0.0, 0.0, 2.0, 1.0, [200, 0, 0]);
    let px = layer.finish();
    let mut f = Frame::filled(4, 1, [10, 20, 30]);
    px.draw_over(&mut f).unwrap();
    assert_eq!(f.pixel(0, 0), Some([200, 0, 0]));
    assert_eq!(f.pixel(3, 0), Some([10, 20, 30]));

    let mut wrong = Frame::new(3, 1);
    assert!(px.draw_over(&mut wrong).is_err());
}

#[test]
fn oversized_layers_are_rejected() {
    assert!(Layer::new(70_000, 10).is_err());
    assert!(Layer::new(10, 0).is_err());
}
