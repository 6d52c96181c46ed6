//! Opaque 2D drawables and the per-thread scratch model used to measure them.

use std::cell::RefCell;
use std::fmt;
use std::sync::OnceLock;

use crate::coords::{Aabb, Sphere, Vec2};
use crate::scene::{BoundsContext, BoundsProvider};
use crate::style::ColorStyle;

use super::{Asset2D, DrawingSink2D, Model2D};

/// Something that can draw itself into a 2D sink but exposes no bounds of
/// its own (a text run, a widget, a procedural pattern).
pub trait Drawable2D: fmt::Debug + Send + Sync {
    fn draw(&self, sink: &mut dyn DrawingSink2D);
}

thread_local! {
    static SCRATCH: RefCell<Model2D> = RefCell::new(Model2D::new());
}

/// Runs `f` with an empty scratch model owned by the current thread.
///
/// The model is cleared before and after `f`, so no asset handles outlive
/// the call. A nested call made while the pool is in use gets a fresh
/// temporary model instead.
pub fn with_scratch_model<R>(f: impl FnOnce(&mut Model2D) -> R) -> R {
    SCRATCH.with(|cell| match cell.try_borrow_mut() {
        Ok(mut model) => {
            model.clear();
            let out = f(&mut *model);
            model.clear();
            out
        }
        Err(_) => {
            log::trace!("scratch model busy; using a temporary one");
            f(&mut Model2D::new())
        }
    })
}

/// Records `drawable` into the scratch model and returns what it covers.
pub fn drawable_bounds(drawable: &dyn Drawable2D) -> BoundsContext<Vec2> {
    with_scratch_model(|model| {
        drawable.draw(model);
        model.bounds()
    })
}

/// Adapts a [`Drawable2D`] to [`Asset2D`] so it can be referenced from a
/// stream. Bounds are measured once, on first request.
pub struct DrawableAsset<D> {
    drawable: D,
    bounds: OnceLock<BoundsContext<Vec2>>,
}

impl<D: Drawable2D> DrawableAsset<D> {
    pub fn new(drawable: D) -> Self {
        Self { drawable, bounds: OnceLock::new() }
    }

    #[inline]
    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn bounds(&self) -> BoundsContext<Vec2> {
        *self.bounds.get_or_init(|| drawable_bounds(&self.drawable))
    }
}

impl<D: fmt::Debug> fmt::Debug for DrawableAsset<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawableAsset")
            .field("drawable", &self.drawable)
            .field("measured", &self.bounds.get().is_some())
            .finish()
    }
}

impl<D: Drawable2D> BoundsProvider<Vec2> for DrawableAsset<D> {
    fn try_bounding_box(&self) -> Option<Aabb<Vec2>> {
        let b = self.bounds();
        (!b.is_empty()).then_some(b.aabb)
    }

    fn try_bounding_sphere(&self) -> Option<Sphere<Vec2>> {
        let b = self.bounds();
        (!b.is_empty()).then_some(b.sphere)
    }
}

/// The drawable paints with its own styles; the record's style is ignored.
impl<D: Drawable2D> Asset2D for DrawableAsset<D> {
    fn expand(&self, sink: &mut dyn DrawingSink2D, _style: &ColorStyle) {
        self.drawable.draw(sink);
    }
}
