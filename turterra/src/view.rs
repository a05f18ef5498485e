use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use turterra_types::Bounds;

/// Size of a world tile in pixels at zoom 0.
const TILE_SIZE: f64 = 512.0;
/// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Camera of the map: geographic center and zoom level.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// `[lon, lat]` of the view center.
    center: [f64; 2],
    zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(0.0, 20.0, 2.0)
    }
}

impl MapView {
    /// Creates a new view.
    pub fn new(lon: f64, lat: f64, zoom: f64) -> Self {
        Self {
            center: [lon, lat],
            zoom,
        }
    }

    /// Longitude of the view center.
    pub fn lon(&self) -> f64 {
        self.center[0]
    }

    /// Latitude of the view center.
    pub fn lat(&self) -> f64 {
        self.center[1]
    }

    /// Zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns a copy of the view with the given zoom.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self { zoom, ..*self }
    }

    /// Computes the view that shows the whole `bounds` inside the `viewport`, leaving `padding`
    /// pixels at every side. The zoom never exceeds `max_zoom`, so a point or a tiny island is
    /// shown at `max_zoom` instead of the closest possible zoom.
    pub fn fit(bounds: &Bounds, padding: f64, max_zoom: f64, viewport: Viewport) -> Self {
        let (x0, y0) = project(bounds.min_lon, bounds.max_lat);
        let (x1, y1) = project(bounds.max_lon, bounds.min_lat);

        let available_width = (viewport.width - 2.0 * padding).max(1.0);
        let available_height = (viewport.height - 2.0 * padding).max(1.0);

        let zoom_x = zoom_for_span(x1 - x0, available_width, max_zoom);
        let zoom_y = zoom_for_span(y1 - y0, available_height, max_zoom);
        let zoom = zoom_x.min(zoom_y).min(max_zoom).max(0.0);

        let (lon, lat) = unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        Self::new(lon, lat, zoom)
    }
}

/// Size of the map surface in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

fn zoom_for_span(span: f64, available: f64, max_zoom: f64) -> f64 {
    if span.abs() <= f64::EPSILON {
        max_zoom
    } else {
        (available / (span.abs() * TILE_SIZE)).log2()
    }
}

/// Projects geographic coordinates into the unit Web Mercator square, `y` growing southwards.
fn project(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0;
    (x, y)
}

fn unproject(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn projection_round_trip() {
        let (x, y) = project(-102.5, 23.6);
        let (lon, lat) = unproject(x, y);
        assert_abs_diff_eq!(lon, -102.5, epsilon = 1e-9);
        assert_abs_diff_eq!(lat, 23.6, epsilon = 1e-9);
    }

    #[test]
    fn point_is_shown_at_max_zoom() {
        let view = MapView::fit(&Bounds::from_point(10.0, 45.0), 20.0, 5.0, Viewport::default());
        assert_abs_diff_eq!(view.zoom(), 5.0);
        assert_abs_diff_eq!(view.lon(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(view.lat(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn fitted_view_contains_bounds() {
        let bounds = Bounds::new(-118.4, 14.5, -86.7, 32.7);
        let viewport = Viewport::new(800.0, 600.0);
        let padding = 20.0;
        let view = MapView::fit(&bounds, padding, 20.0, viewport);

        let (x0, y0) = project(bounds.min_lon, bounds.max_lat);
        let (x1, y1) = project(bounds.max_lon, bounds.min_lat);
        let world = TILE_SIZE * 2f64.powf(view.zoom());

        assert!((x1 - x0) * world <= viewport.width - 2.0 * padding + 1e-6);
        assert!((y1 - y0) * world <= viewport.height - 2.0 * padding + 1e-6);

        let (cx, cy) = project(view.lon(), view.lat());
        assert_abs_diff_eq!(cx, (x0 + x1) / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cy, (y0 + y1) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn large_regions_are_capped_by_max_zoom_only_from_above() {
        let world = Bounds::new(-180.0, -85.0, 180.0, 85.0);
        let view = MapView::fit(&world, 0.0, 5.0, Viewport::new(1024.0, 768.0));
        assert!(view.zoom() > 0.0);
        assert!(view.zoom() < 1.0);

        let small = Bounds::new(-61.9, 17.0, -61.7, 17.2);
        let view = MapView::fit(&small, 20.0, 5.0, Viewport::default());
        assert_abs_diff_eq!(view.zoom(), 5.0);
    }
}
