use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use scrawl_engine::coords::{Affine2, Mat4, Vec2, Vec3};
use scrawl_engine::logging::{init_logging, LoggingConfig};
use scrawl_engine::scene::{
    AssetRef2D, AssetRef3D, Drawable2D, DrawableAsset, DrawingSink2D, DrawingSink3D, Model2D,
    Model3D,
};
use scrawl_engine::style::{Color, ColorStyle, LineCap, LineStyle, SpriteStyle, SurfaceStyle};

const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, -20.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let eye = parse_eye(std::env::args().skip(1).collect())?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          SCRAWL STUDIO v0.1            ║");
    println!("  ║   command streams  ·  replay console   ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    // ── 3D ────────────────────────────────────────────────────────────────
    let scene = build_scene();
    let records = scene.validate().context("3d scene failed validation")?;
    scene.log_records();

    let bounds = scene.bounds();
    let (bytes, assets) = (scene.byte_len(), scene.asset_count());
    println!("  [3D] {records} records, {bytes} bytes, {assets} assets");
    println!("  [3D] box    {} .. {}", bounds.aabb.min, bounds.aabb.max);
    println!("  [3D] sphere {} r={}", bounds.sphere.center, bounds.sphere.radius);
    println!("  [3D] key    {:?}  hash {:#018x}", scene.key(), scene.content_hash());
    println!();

    println!("  [3D] back-to-front from eye {eye}:");
    let order = scene.order_by(|c| -c.distance(eye));
    scene.draw_ordered(&mut PrintSink, &order, true);
    println!();

    // ── 2D ────────────────────────────────────────────────────────────────
    let overlay = build_overlay();
    let records = overlay.validate().context("2d overlay failed validation")?;
    overlay.log_records();

    let bounds = overlay.bounds();
    println!("  [2D] {records} records, {} bytes", overlay.byte_len());
    println!("  [2D] box    {} .. {}", bounds.aabb.min, bounds.aabb.max);
    println!();

    println!("  [2D] replay (assets forwarded):");
    overlay.draw_to(&mut PrintSink, false);
    println!();

    Ok(())
}

/// `[x y z]`; no arguments means [`DEFAULT_EYE`].
fn parse_eye(args: Vec<String>) -> Result<Vec3> {
    match args.as_slice() {
        [] => Ok(DEFAULT_EYE),
        [x, y, z] => Ok(Vec3::new(parse_axis("x", x)?, parse_axis("y", y)?, parse_axis("z", z)?)),
        other => bail!(
            "expected no arguments or an eye position `x y z`, got {} arguments",
            other.len()
        ),
    }
}

fn parse_axis(name: &str, value: &str) -> Result<f32> {
    value.parse().with_context(|| format!("eye {name} is not a number: {value:?}"))
}

fn build_scene() -> Model3D {
    let axis = |c: Color| LineStyle::new(c, LineCap::Round);
    let red = Color::from_srgb_u8(220, 60, 60, 255);
    let green = Color::from_srgb_u8(60, 200, 90, 255);
    let blue = Color::from_srgb_u8(70, 110, 230, 255);

    let mut atom = Model3D::new();
    atom.draw_sphere(Vec3::zero(), 1.0, &ColorStyle::solid(red));
    atom.draw_segment(Vec3::zero(), Vec3::new(0.0, 1.5, 0.0), 0.1, &axis(Color::white()));
    let atom: AssetRef3D = Arc::new(atom);

    let mut scene = Model3D::with_capacity(1024, 8);
    scene.draw_segment(Vec3::zero(), Vec3::new(5.0, 0.0, 0.0), 0.05, &axis(red));
    scene.draw_segment(Vec3::zero(), Vec3::new(0.0, 5.0, 0.0), 0.05, &axis(green));
    scene.draw_segment(Vec3::zero(), Vec3::new(0.0, 0.0, 5.0), 0.05, &axis(blue));
    scene.draw_surface(
        &[Vec3::new(-3.0, 0.0, -3.0), Vec3::new(3.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 3.0)],
        &SurfaceStyle::two_sided(Color::from_straight(0.8, 0.8, 0.8, 0.5)),
    );
    for i in 0..4 {
        let t = Mat4::rotation_z(i as f32 * FRAC_PI_4)
            .then(&Mat4::translation(Vec3::new(i as f32 * 2.0, 1.0, i as f32 * 3.0)));
        scene.draw_asset(&t, &atom, &ColorStyle::solid(blue));
    }
    scene
}

/// A framed caption; draws only its outline so bounds come from the scratch model.
#[derive(Debug)]
struct Badge {
    origin: Vec2,
    width: f32,
}

impl Drawable2D for Badge {
    fn draw(&self, sink: &mut dyn DrawingSink2D) {
        let Vec2 { x, y } = self.origin;
        let frame = [
            Vec2::new(x, y),
            Vec2::new(x + self.width, y),
            Vec2::new(x + self.width, y + 24.0),
            Vec2::new(x, y + 24.0),
            Vec2::new(x, y),
        ];
        sink.draw_lines(&frame, 2.0, &LineStyle::new(Color::white(), LineCap::Square));
    }
}

fn build_overlay() -> Model2D {
    let panel = ColorStyle::new(Color::from_straight(0.1, 0.1, 0.12, 0.9), Color::white(), 1.0);
    let badge = Badge { origin: Vec2::zero(), width: 120.0 };
    let badge: AssetRef2D = Arc::new(DrawableAsset::new(badge));

    let mut overlay = Model2D::new();
    let frame = [
        Vec2::new(0.0, 0.0),
        Vec2::new(320.0, 0.0),
        Vec2::new(320.0, 180.0),
        Vec2::new(0.0, 180.0),
    ];
    overlay.draw_polygon(&frame, &panel);
    overlay.draw_ellipse(Vec2::new(280.0, 40.0), 24.0, 24.0, &ColorStyle::solid(Color::white()));
    overlay.draw_lines(
        &[Vec2::new(16.0, 160.0), Vec2::new(120.0, 120.0), Vec2::new(200.0, 150.0)],
        3.0,
        &LineStyle::new(Color::from_srgb_u8(90, 200, 250, 255), LineCap::Round),
    );
    overlay.draw_sprite(
        &Affine2::scale(64.0, 64.0).then(&Affine2::translation(Vec2::new(16.0, 16.0))),
        &SpriteStyle::default(),
    );
    overlay.draw_asset(&Affine2::translation(Vec2::new(16.0, 96.0)), &badge, &panel);
    overlay
}

/// Prints every call it receives.
struct PrintSink;

impl DrawingSink3D for PrintSink {
    fn draw_segment(&mut self, a: Vec3, b: Vec3, diameter: f32, _style: &LineStyle) {
        println!("    segment  {a} -> {b}  d={diameter}");
    }

    fn draw_sphere(&mut self, center: Vec3, diameter: f32, _style: &ColorStyle) {
        println!("    sphere   {center}  d={diameter}");
    }

    fn draw_surface(&mut self, vertices: &[Vec3], _style: &SurfaceStyle) {
        println!("    surface  {} vertices", vertices.len());
    }

    fn draw_asset(&mut self, transform: &Mat4, _asset: &AssetRef3D, _style: &ColorStyle) {
        println!("    asset    {transform}");
    }
}

impl DrawingSink2D for PrintSink {
    fn draw_polygon(&mut self, points: &[Vec2], _style: &ColorStyle) {
        println!("    polygon  {} points", points.len());
    }

    fn draw_lines(&mut self, points: &[Vec2], diameter: f32, _style: &LineStyle) {
        println!("    lines    {} points  d={diameter}", points.len());
    }

    fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, _style: &ColorStyle) {
        println!("    ellipse  {center}  {width}x{height}");
    }

    fn draw_sprite(&mut self, transform: &Affine2, _style: &SpriteStyle) {
        println!("    sprite   {transform}");
    }

    fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, _style: &ColorStyle) {
        println!("    asset    {transform}  {asset:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn eye_defaults_when_no_arguments() {
        assert_eq!(parse_eye(vec![]).unwrap(), DEFAULT_EYE);
    }

    #[test]
    fn eye_parses_three_numbers() {
        assert_eq!(parse_eye(args(&["1", "-2.5", "3"])).unwrap(), Vec3::new(1.0, -2.5, 3.0));
    }

    #[test]
    fn eye_rejects_bad_input() {
        let err = parse_eye(args(&["1", "up", "3"])).unwrap_err();
        assert!(err.to_string().contains("eye y"));
        assert!(parse_eye(args(&["1", "2"])).is_err());
    }

    #[test]
    fn demo_models_validate() {
        assert_eq!(build_scene().validate(), Ok(8));
        assert_eq!(build_overlay().validate(), Ok(5));
    }
}
