use std::collections::HashMap;

pub const MARGIN_MIN: i32 = 0;
pub const MARGIN_MAX: i32 = 10;
pub const GRID_SIZE_MIN: i32 = 1;
pub const GRID_SIZE_MAX: i32 = 64;

/// Live-editable slicing settings. The UI clamps these before every
/// reload; `clamped` is also applied inside `SpriteSheet::slice` so an
/// out-of-range value can never produce a degenerate stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetParams {
    pub margin: i32,
    pub grid_size: i32,
}

impl SheetParams {
    pub fn new(margin: i32, grid_size: i32) -> Self {
        Self { margin, grid_size }.clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            margin: self.margin.clamp(MARGIN_MIN, MARGIN_MAX),
            grid_size: self.grid_size.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX),
        }
    }

    /// Cell stride in both axes: one cell plus the gap that follows it.
    /// Always >= 1 after clamping.
    pub fn stride(&self) -> u32 {
        (self.grid_size + self.margin) as u32
    }
}

impl Default for SheetParams {
    fn default() -> Self {
        Self { margin: 1, grid_size: 16 }
    }
}

/// A rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The sliced grid of one source image. Recomputed wholesale on every
/// load or parameter change, never patched in place.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub params: SheetParams,
    pub sprites: HashMap<String, SpriteRect>,
}

impl SpriteSheet {
    /// Slices an image of the given dimensions into a uniform grid of
    /// named cells. Cells whose origin lies inside the image are always
    /// emitted; a trailing cell that runs past the edge is clipped to
    /// the image bounds rather than dropped. A zero-dimension image
    /// yields an empty sprite map.
    pub fn slice(width: u32, height: u32, params: SheetParams) -> Self {
        let params = params.clamped();
        let stride = params.stride();
        let cell = params.grid_size as u32;

        let cols = width.div_ceil(stride);
        let rows = height.div_ceil(stride);

        let mut sprites = HashMap::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let x = col * stride;
                let y = row * stride;
                let rect = SpriteRect {
                    x,
                    y,
                    width: cell.min(width - x),
                    height: cell.min(height - y),
                };
                sprites.insert(format!("sprite_{}_{}", row, col), rect);
            }
        }

        Self { width, height, params, sprites }
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects_overlap(a: &SpriteRect, b: &SpriteRect) -> bool {
        a.x < b.x + b.width
            && b.x < a.x + a.width
            && a.y < b.y + b.height
            && b.y < a.y + a.height
    }

    #[test]
    fn test_64x32_grid16_no_margin() {
        let sheet = SpriteSheet::slice(64, 32, SheetParams::new(0, 16));
        assert_eq!(sheet.sprite_count(), 8);

        for row in 0..2 {
            for col in 0..4 {
                let rect = sheet.sprites[&format!("sprite_{}_{}", row, col)];
                assert_eq!(rect.x, col * 16);
                assert_eq!(rect.y, row * 16);
                assert_eq!(rect.width, 16);
                assert_eq!(rect.height, 16);
            }
        }
    }

    #[test]
    fn test_exact_multiple_with_margin() {
        // stride 18, 54 = 3 * 18, so every cell is full-size
        let sheet = SpriteSheet::slice(54, 54, SheetParams::new(2, 16));
        assert_eq!(sheet.sprite_count(), 9);
        for rect in sheet.sprites.values() {
            assert_eq!(rect.width, 16);
            assert_eq!(rect.height, 16);
        }
    }

    #[test]
    fn test_trailing_cells_clipped_not_dropped() {
        let sheet = SpriteSheet::slice(65, 33, SheetParams::new(0, 16));
        assert_eq!(sheet.sprite_count(), 5 * 3);

        let right = sheet.sprites["sprite_0_4"];
        assert_eq!(right.x, 64);
        assert_eq!(right.width, 1);

        let bottom = sheet.sprites["sprite_2_0"];
        assert_eq!(bottom.y, 32);
        assert_eq!(bottom.height, 1);
    }

    #[test]
    fn test_image_smaller_than_one_cell() {
        let sheet = SpriteSheet::slice(10, 7, SheetParams::new(0, 16));
        assert_eq!(sheet.sprite_count(), 1);
        let rect = sheet.sprites["sprite_0_0"];
        assert_eq!(rect, SpriteRect { x: 0, y: 0, width: 10, height: 7 });
    }

    #[test]
    fn test_zero_dimension_yields_no_sprites() {
        let sheet = SpriteSheet::slice(0, 32, SheetParams::new(0, 16));
        assert_eq!(sheet.sprite_count(), 0);
    }

    #[test]
    fn test_params_are_clamped() {
        assert_eq!(SheetParams::new(15, 100), SheetParams { margin: 10, grid_size: 64 });
        assert_eq!(SheetParams::new(-3, 0), SheetParams { margin: 0, grid_size: 1 });

        // Out-of-range values passed straight to slice get the same treatment.
        let sheet = SpriteSheet::slice(64, 64, SheetParams { margin: 15, grid_size: 100 });
        assert_eq!(sheet.params, SheetParams { margin: 10, grid_size: 64 });
        assert_eq!(sheet.sprite_count(), 1);
    }

    #[test]
    fn test_rects_in_bounds_and_disjoint() {
        let sheet = SpriteSheet::slice(50, 37, SheetParams::new(3, 7));
        let rects: Vec<_> = sheet.sprites.values().copied().collect();
        for rect in &rects {
            assert!(rect.width > 0 && rect.height > 0);
            assert!(rect.x + rect.width <= 50);
            assert!(rect.y + rect.height <= 37);
        }
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!rects_overlap(a, b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_slice_is_idempotent() {
        let params = SheetParams::new(1, 16);
        let a = SpriteSheet::slice(100, 80, params);
        let b = SpriteSheet::slice(100, 80, params);
        assert_eq!(a.sprites, b.sprites);
    }
}
