use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use crate::coords::{Affine2, Vec2};
use crate::scene::{
    AssetRef2D, BoundsProvider, Drawable2D, DrawableAsset, DrawingSink2D, Model2D, Primitive2D,
    RecordBuffer, RefHandle, StreamError, Tag2D, TransformedSink2D,
};
use crate::style::{Color, ColorStyle, LineCap, LineStyle, SpriteStyle};

use super::{drawable_bounds, with_scratch_model, ELLIPSE_SEGMENTS};

const EPS: f32 = 1e-4;

fn approx_v(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() <= EPS && (a.y - b.y).abs() <= EPS
}

fn fill() -> ColorStyle {
    ColorStyle::solid(Color::white())
}

fn outlined(width: f32) -> ColorStyle {
    ColorStyle::new(Color::white(), Color::black(), width)
}

fn line() -> LineStyle {
    LineStyle::new(Color::black(), LineCap::Butt)
}

/// Half-transparent red with a thick black outline; no field at its default.
fn tinted() -> ColorStyle {
    ColorStyle::new(Color::from_premul(0.5, 0.0, 0.0, 0.5), Color::black(), 0.25)
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Polygon(Vec<Vec2>, ColorStyle),
    Lines(Vec<Vec2>, f32, LineStyle),
    Ellipse(Vec2, f32, f32, ColorStyle),
    Sprite(Affine2, SpriteStyle),
    Asset(Affine2, usize, ColorStyle),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl DrawingSink2D for Recorder {
    fn draw_polygon(&mut self, points: &[Vec2], style: &ColorStyle) {
        self.calls.push(Call::Polygon(points.to_vec(), *style));
    }

    fn draw_lines(&mut self, points: &[Vec2], diameter: f32, style: &LineStyle) {
        self.calls.push(Call::Lines(points.to_vec(), diameter, *style));
    }

    fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, style: &ColorStyle) {
        self.calls.push(Call::Ellipse(center, width, height, *style));
    }

    fn draw_sprite(&mut self, transform: &Affine2, style: &SpriteStyle) {
        self.calls.push(Call::Sprite(*transform, *style));
    }

    fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, style: &ColorStyle) {
        self.calls.push(Call::Asset(*transform, asset.identity(), *style));
    }
}

/// A unit square drawn as a polygon; stands in for a text run or widget.
#[derive(Debug)]
struct Square;

impl Drawable2D for Square {
    fn draw(&self, sink: &mut dyn DrawingSink2D) {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        sink.draw_polygon(&pts, &ColorStyle::solid(Color::white()));
    }
}

/// Measures another drawable while itself being measured.
#[derive(Debug)]
struct Nested;

impl Drawable2D for Nested {
    fn draw(&self, sink: &mut dyn DrawingSink2D) {
        let inner = drawable_bounds(&Square);
        sink.draw_ellipse(inner.aabb.center(), 4.0, 2.0, &ColorStyle::solid(Color::white()));
    }
}

// ── bounds ────────────────────────────────────────────────────────────────

#[test]
fn empty_model_reports_sentinels() {
    let m = Model2D::new();
    assert!(m.is_empty());
    assert_eq!(m.bounding_sphere().radius, -1.0);
    assert!(m.bounding_box().is_empty());
    assert_eq!(m.try_bounding_sphere(), None);
}

#[test]
fn polygon_points_grow_by_outline() {
    let mut m = Model2D::new();
    let tri = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 2.0)];
    m.draw_polygon(&tri, &outlined(0.5));

    let b = m.bounding_box();
    assert!(approx_v(b.min, Vec2::new(-0.5, -0.5)));
    assert!(approx_v(b.max, Vec2::new(4.5, 2.5)));
}

#[test]
fn lines_points_grow_by_half_diameter_and_outline() {
    let mut m = Model2D::new();
    let style = line().with_outline(Color::white(), 1.0);
    m.draw_lines(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)], 2.0, &style);

    let b = m.bounding_box();
    assert!(approx_v(b.min, Vec2::new(-2.0, -2.0)));
    assert!(approx_v(b.max, Vec2::new(12.0, 2.0)));
}

#[test]
fn ellipse_uses_its_rectangle_corners() {
    let mut m = Model2D::new();
    m.draw_ellipse(Vec2::new(5.0, 5.0), 4.0, 2.0, &fill());

    let b = m.bounding_box();
    assert!(approx_v(b.min, Vec2::new(3.0, 4.0)));
    assert!(approx_v(b.max, Vec2::new(7.0, 6.0)));
    let s = m.bounding_sphere();
    for corner in b.corners() {
        assert!(s.contains_point(corner, EPS));
    }
}

#[test]
fn sprite_covers_the_transformed_unit_square() {
    let mut m = Model2D::new();
    let t = Affine2::scale(2.0, 3.0).then(&Affine2::translation(Vec2::new(1.0, 1.0)));
    m.draw_sprite(&t, &SpriteStyle::default());

    let b = m.bounding_box();
    assert!(approx_v(b.min, Vec2::new(1.0, 1.0)));
    assert!(approx_v(b.max, Vec2::new(3.0, 4.0)));
    assert_eq!(m.center_of(0), Some(Vec2::new(2.0, 2.5)));
}

#[test]
fn empty_polygon_and_lines_have_no_center() {
    let mut m = Model2D::new();
    m.draw_polygon(&[], &fill());
    let second = m.byte_len();
    m.draw_lines(&[], 1.0, &line());

    assert_eq!(m.center_of(0), None);
    assert_eq!(m.center_of(second), None);
    assert!(m.bounds().is_empty());
}

#[test]
fn nested_model_box_follows_transform() {
    let mut inner = Model2D::new();
    inner.draw_ellipse(Vec2::zero(), 2.0, 2.0, &fill());

    let mut outer = Model2D::new();
    outer.draw_model(&Affine2::translation(Vec2::new(10.0, -5.0)), &Arc::new(inner), &fill());

    let b = outer.bounding_box();
    assert!(approx_v(b.min, Vec2::new(9.0, -6.0)));
    assert!(approx_v(b.max, Vec2::new(11.0, -4.0)));
}

// ── drawables / scratch pool ──────────────────────────────────────────────

#[test]
fn drawable_asset_measures_through_the_scratch_model() {
    let asset = DrawableAsset::new(Square);
    let b = asset.try_bounding_box().unwrap();
    assert_eq!(b.min, Vec2::new(0.0, 0.0));
    assert_eq!(b.max, Vec2::new(1.0, 1.0));

    let mut m = Model2D::new();
    let handle: AssetRef2D = Arc::new(asset);
    m.draw_asset(&Affine2::translation(Vec2::new(2.0, 0.0)), &handle, &fill());
    assert!(approx_v(m.bounding_box().max, Vec2::new(3.0, 1.0)));
}

#[test]
fn scratch_model_is_handed_out_empty() {
    with_scratch_model(|m| {
        assert!(m.is_empty());
        m.draw_ellipse(Vec2::zero(), 1.0, 1.0, &fill());
    });
    with_scratch_model(|m| assert!(m.is_empty()));
}

#[test]
fn scratch_model_tolerates_reentrant_use() {
    let b = drawable_bounds(&Nested);
    assert!(approx_v(b.aabb.min, Vec2::new(-1.5, -0.5)));
    assert!(approx_v(b.aabb.max, Vec2::new(2.5, 1.5)));
}

#[test]
fn scratch_model_drops_handles_after_use() {
    let handle: AssetRef2D = Arc::new(DrawableAsset::new(Square));
    with_scratch_model(|m| m.draw_asset(&Affine2::IDENTITY, &handle, &fill()));
    assert_eq!(Arc::strong_count(&handle), 1);
}

#[test]
fn scratch_models_are_per_thread() {
    let sizes: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                s.spawn(move || {
                    with_scratch_model(|m| {
                        for _ in 0..=i {
                            m.draw_ellipse(Vec2::zero(), 1.0, 1.0, &fill());
                        }
                        m.record_count()
                    })
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sizes, vec![1, 2, 3, 4]);
}

// ── replay ────────────────────────────────────────────────────────────────

#[test]
fn replay_forwards_recorded_arguments() {
    let tri = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    let sprite = Affine2::translation(Vec2::new(3.0, 3.0));
    let handle: AssetRef2D = Arc::new(DrawableAsset::new(Square));
    let stroke = LineStyle::new(Color::from_premul(0.0, 0.3, 0.6, 0.6), LineCap::Round)
        .with_outline(Color::white(), 0.125);
    let ring = ColorStyle::new(Color::transparent(), Color::from_srgb_u8(255, 128, 0, 255), 3.0);
    let decal = SpriteStyle {
        tint: Color::from_premul(0.4, 0.4, 0.4, 0.4),
        source: [0.25, 0.25, 0.5, 0.5],
        flags: SpriteStyle::NEAREST,
    };

    let mut m = Model2D::new();
    m.draw_polygon(&tri, &outlined(1.5));
    m.draw_lines(&tri, 0.5, &stroke);
    m.draw_ellipse(Vec2::new(1.0, 2.0), 3.0, 4.0, &ring);
    m.draw_sprite(&sprite, &decal);
    m.draw_asset(&Affine2::IDENTITY, &handle, &tinted());

    let mut rec = Recorder::default();
    m.draw_to(&mut rec, false);
    assert_eq!(
        rec.calls,
        vec![
            Call::Polygon(tri.to_vec(), outlined(1.5)),
            Call::Lines(tri.to_vec(), 0.5, stroke),
            Call::Ellipse(Vec2::new(1.0, 2.0), 3.0, 4.0, ring),
            Call::Sprite(sprite, decal),
            Call::Asset(Affine2::IDENTITY, handle.identity(), tinted()),
        ]
    );
}

#[test]
fn collapse_draws_the_drawable_in_place() {
    let handle: AssetRef2D = Arc::new(DrawableAsset::new(Square));
    let mut m = Model2D::new();
    m.draw_asset(&Affine2::translation(Vec2::new(10.0, 0.0)), &handle, &tinted());

    let mut rec = Recorder::default();
    m.draw_to(&mut rec, false);
    let t = Affine2::translation(Vec2::new(10.0, 0.0));
    assert_eq!(rec.calls, vec![Call::Asset(t, handle.identity(), tinted())]);

    // The drawable paints with its own style, not the record's.
    let mut rec = Recorder::default();
    m.draw_to(&mut rec, true);
    assert_eq!(
        rec.calls,
        vec![Call::Polygon(
            vec![
                Vec2::new(10.0, 0.0),
                Vec2::new(11.0, 0.0),
                Vec2::new(11.0, 1.0),
                Vec2::new(10.0, 1.0),
            ],
            fill(),
        )]
    );
}

#[test]
fn transformed_sink_scales_axis_aligned_ellipses() {
    let mut rec = Recorder::default();
    let t = Affine2::scale(2.0, 3.0).then(&Affine2::translation(Vec2::new(1.0, 1.0)));
    TransformedSink2D::new(&mut rec, t).draw_ellipse(Vec2::new(1.0, 1.0), 2.0, 2.0, &tinted());
    assert_eq!(rec.calls, vec![Call::Ellipse(Vec2::new(3.0, 4.0), 4.0, 6.0, tinted())]);
}

#[test]
fn transformed_sink_flattens_rotated_ellipses() {
    let mut rec = Recorder::default();
    TransformedSink2D::new(&mut rec, Affine2::rotation(FRAC_PI_2))
        .draw_ellipse(Vec2::zero(), 4.0, 2.0, &tinted());

    let [Call::Polygon(points, style)] = rec.calls.as_slice() else {
        panic!("expected one polygon, got {:?}", rec.calls);
    };
    assert_eq!(*style, tinted());
    assert_eq!(points.len(), ELLIPSE_SEGMENTS);
    // The long axis now runs along y.
    let max_y = points.iter().map(|p| p.y.abs()).fold(0.0, f32::max);
    let max_x = points.iter().map(|p| p.x.abs()).fold(0.0, f32::max);
    assert!((max_y - 2.0).abs() <= EPS);
    assert!((max_x - 1.0).abs() <= EPS);
}

#[test]
fn transformed_sink_scales_line_diameter_and_composes_sprites() {
    let mut rec = Recorder::default();
    let t = Affine2::scale(2.0, 2.0);
    let inner = Affine2::translation(Vec2::new(1.0, 0.0));
    {
        let mut sink = TransformedSink2D::new(&mut rec, t);
        sink.draw_lines(&[Vec2::new(1.0, 1.0)], 0.5, &line());
        sink.draw_sprite(&inner, &SpriteStyle::default());
    }
    assert_eq!(
        rec.calls,
        vec![
            Call::Lines(vec![Vec2::new(2.0, 2.0)], 1.0, line()),
            Call::Sprite(inner.then(&t), SpriteStyle::default()),
        ]
    );
}

#[test]
fn replaying_into_a_model_reproduces_the_stream() {
    let mut src = Model2D::new();
    src.draw_polygon(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)], &outlined(1.0));
    src.draw_ellipse(Vec2::zero(), 1.0, 2.0, &fill());
    src.draw_sprite(&Affine2::rotation(0.3), &SpriteStyle::default());

    let mut dst = Model2D::new();
    src.draw_to(&mut dst, false);
    assert_eq!(dst.as_bytes(), src.as_bytes());
    assert_eq!(dst.validate(), Ok(3));
}

// ── ordering / cache ──────────────────────────────────────────────────────

#[test]
fn order_by_sorts_ascending_with_stable_ties() {
    let mut m = Model2D::new();
    for x in [2.0, 0.0, 2.0, 1.0] {
        m.draw_ellipse(Vec2::new(x, 0.0), 1.0, 1.0, &fill());
    }
    let offsets: Vec<usize> = m.offsets().collect();
    assert_eq!(m.order_by(|c| c.x), vec![offsets[1], offsets[3], offsets[0], offsets[2]]);
}

#[test]
fn mutation_invalidates_cached_bounds() {
    let mut m = Model2D::new();
    m.draw_ellipse(Vec2::zero(), 2.0, 2.0, &fill());
    let key = m.key();
    let before = m.bounds();
    assert_eq!(m.bounds_for(key), Some(before));

    m.draw_ellipse(Vec2::new(10.0, 0.0), 2.0, 2.0, &fill());
    assert_eq!(m.bounds_for(key), None);
    assert!(approx_v(m.bounding_box().max, Vec2::new(11.0, 1.0)));
}

// ── integrity ─────────────────────────────────────────────────────────────

#[test]
fn decode_rejects_unknown_tags() {
    let mut buf = RecordBuffer::new();
    buf.append(0, |_| {});
    let record = buf.records().next().unwrap().unwrap();
    assert_eq!(Primitive2D::decode(record), Err(StreamError::UnknownTag { offset: 0, tag: 0 }));
}

#[test]
fn decode_rejects_negative_counts() {
    let mut buf = RecordBuffer::new();
    buf.append(Tag2D::Polygon.raw(), |w| {
        w.i32(-1);
        w.pod(&fill());
    });
    let record = buf.records().next().unwrap().unwrap();
    assert!(matches!(Primitive2D::decode(record), Err(StreamError::LengthMismatch { .. })));
}

#[test]
#[should_panic(expected = "corrupt command stream")]
fn offset_past_end_panics() {
    let m = Model2D::new();
    let _ = m.primitive_at(0);
}

#[test]
fn display_describes_records() {
    let mut m = Model2D::new();
    m.draw_lines(&[Vec2::zero(); 3], 2.0, &line());
    let (_, p) = m.records().next().unwrap();
    assert_eq!(p.tag(), Tag2D::Lines);
    assert_eq!(p.to_string(), "lines with 3 points diameter 2");
}
