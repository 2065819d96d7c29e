//! Web Mercator projection and the tile layout of a fixed-size view.

use std::f64::consts::PI;

use super::TileId;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude at which Web Mercator becomes square; inputs beyond are clamped.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Geographic bounding box of a view, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

/// A tile to fetch and where its top-left corner lands in the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    pub id: TileId,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// A `width`×`height` pixel window centered on a coordinate at one zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: u8,
    width: u32,
    height: u32,
    center_px: (f64, f64),
    origin: (i64, i64),
}

fn world_size(zoom: u8) -> f64 {
    f64::from(TILE_SIZE) * 2f64.powi(i32::from(zoom))
}

/// Projects a coordinate to global pixel space at `zoom`.
pub fn project(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lon + 180.0) / 360.0 * size;
    let y = (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`]; returns `(lat, lon)`.
pub fn unproject(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

impl Viewport {
    pub fn new(lat: f64, lon: f64, zoom: u8, width: u32, height: u32) -> Self {
        let (cx, cy) = project(lat, lon, zoom);
        let origin = (
            (cx - f64::from(width) / 2.0).floor() as i64,
            (cy - f64::from(height) / 2.0).floor() as i64,
        );
        Self {
            zoom,
            width,
            height,
            center_px: (cx, cy),
            origin,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel position of the center coordinate inside the output image.
    pub fn marker_position(&self) -> (f64, f64) {
        (
            self.center_px.0 - self.origin.0 as f64,
            self.center_px.1 - self.origin.1 as f64,
        )
    }

    /// Tiles intersecting the view, row by row.
    ///
    /// Columns wrap across the antimeridian. Rows above or below the world
    /// are skipped, leaving that area to the background fill.
    pub fn tiles(&self) -> Vec<PlacedTile> {
        let tile = i64::from(TILE_SIZE);
        let count = 1i64 << self.zoom;
        let (ox, oy) = self.origin;
        let (x0, x1) = (
            ox.div_euclid(tile),
            (ox + i64::from(self.width) - 1).div_euclid(tile),
        );
        let (y0, y1) = (
            oy.div_euclid(tile),
            (oy + i64::from(self.height) - 1).div_euclid(tile),
        );

        let mut out = Vec::new();
        for ty in (y0..=y1).filter(|ty| (0..count).contains(ty)) {
            for tx in x0..=x1 {
                out.push(PlacedTile {
                    id: TileId {
                        z: self.zoom,
                        x: tx.rem_euclid(count) as u32,
                        y: ty as u32,
                    },
                    offset_x: tx * tile - ox,
                    offset_y: ty * tile - oy,
                });
            }
        }
        out
    }

    /// Geographic bounds of the view (longitudes are not wrapped).
    pub fn extent(&self) -> Extent {
        let (ox, oy) = (self.origin.0 as f64, self.origin.1 as f64);
        let (lat_max, lon_min) = unproject(ox, oy, self.zoom);
        let (lat_min, lon_max) = unproject(
            ox + f64::from(self.width),
            oy + f64::from(self.height),
            self.zoom,
        );
        Extent {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn project_origin_is_world_center() {
        let (x, y) = project(0.0, 0.0, 0);
        assert!(close(x, 128.0) && close(y, 128.0));
        let (x, y) = project(0.0, -180.0, 1);
        assert!(close(x, 0.0) && close(y, 256.0));
    }

    #[test]
    fn project_clamps_poles() {
        let (_, top) = project(90.0, 0.0, 0);
        let (_, bottom) = project(-90.0, 0.0, 0);
        assert!(close(top, 0.0), "top = {top}");
        assert!(close(bottom, 256.0), "bottom = {bottom}");
    }

    #[test]
    fn unproject_inverts_project() {
        for (lat, lon) in [(51.5074, -0.1278), (-23.55, -46.63), (64.1466, -21.9426)] {
            let (x, y) = project(lat, lon, 11);
            let (lat2, lon2) = unproject(x, y, 11);
            assert!(close(lat, lat2) && close(lon, lon2), "{lat},{lon} -> {lat2},{lon2}");
        }
    }

    #[test]
    fn equator_view_covers_four_tiles() {
        let vp = Viewport::new(0.0, 0.0, 11, 512, 512);
        let tiles = vp.tiles();
        let ids: Vec<(u32, u32)> = tiles.iter().map(|t| (t.id.x, t.id.y)).collect();
        assert_eq!(ids, vec![(1023, 1023), (1024, 1023), (1023, 1024), (1024, 1024)]);
        assert_eq!((tiles[0].offset_x, tiles[0].offset_y), (0, 0));
        assert_eq!((tiles[3].offset_x, tiles[3].offset_y), (256, 256));
        assert_eq!(vp.marker_position(), (256.0, 256.0));
    }

    #[test]
    fn fractional_center_covers_whole_view() {
        let vp = Viewport::new(-23.55, -46.63, 11, 512, 512);
        let (mx, my) = vp.marker_position();
        assert!((256.0..257.0).contains(&mx), "mx = {mx}");
        assert!((256.0..257.0).contains(&my), "my = {my}");
        let tiles = vp.tiles();
        assert_eq!(tiles.len(), 9);
        assert!(tiles.iter().all(|t| t.offset_x > -256 && t.offset_x < 512));
        assert!(tiles.iter().all(|t| t.offset_y > -256 && t.offset_y < 512));
    }

    #[test]
    fn zoom_zero_wraps_columns_and_skips_rows_outside_world() {
        let vp = Viewport::new(0.0, 0.0, 0, 512, 512);
        let tiles = vp.tiles();
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|t| t.id == TileId { z: 0, x: 0, y: 0 }));
        let offsets: Vec<i64> = tiles.iter().map(|t| t.offset_x).collect();
        assert_eq!(offsets, vec![-128, 128, 384]);
        assert!(tiles.iter().all(|t| t.offset_y == 128));
    }

    #[test]
    fn antimeridian_wraps_to_column_zero() {
        let vp = Viewport::new(0.0, 179.99, 3, 256, 256);
        let xs: Vec<u32> = vp.tiles().iter().map(|t| t.id.x).collect();
        assert!(xs.contains(&7));
        assert!(xs.contains(&0));
    }

    #[test]
    fn extent_is_symmetric_at_equator() {
        let vp = Viewport::new(0.0, 0.0, 11, 512, 512);
        let e = vp.extent();
        assert!(close(e.lon_min, -e.lon_max));
        assert!(close(e.lat_min, -e.lat_max));
        assert!(e.lon_min < 0.0 && e.lat_max > 0.0);
        // 512 px at zoom 11 spans 512 / (256 * 2048) of 360 degrees.
        assert!(close(e.lon_max - e.lon_min, 360.0 / 1024.0));
    }
}
