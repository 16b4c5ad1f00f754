/// Screen-space region the sprite grid is drawn into, in egui points.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Vertical scroll position of the sprite grid, kept inside
/// `[0, max_scroll]` after every adjustment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    pub offset: f32,
}

impl ScrollState {
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Re-clamps after the content or viewport changed size.
    pub fn clamp_to(&mut self, content_height: f32, viewport_height: f32) {
        self.offset = self
            .offset
            .clamp(0.0, max_scroll(content_height, viewport_height));
    }
}

pub fn max_scroll(content_height: f32, viewport_height: f32) -> f32 {
    (content_height - viewport_height).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll_zero_when_content_fits() {
        assert_eq!(max_scroll(300.0, 500.0), 0.0);
        assert_eq!(max_scroll(500.0, 500.0), 0.0);
    }

    #[test]
    fn test_clamp_upper_bound() {
        let mut scroll = ScrollState { offset: 900.0 };
        scroll.clamp_to(800.0, 500.0);
        assert_eq!(scroll.offset, 300.0);
    }

    #[test]
    fn test_clamp_negative_offset() {
        let mut scroll = ScrollState::default();
        scroll.scroll_by(-120.0);
        scroll.clamp_to(800.0, 500.0);
        assert_eq!(scroll.offset, 0.0);
    }

    #[test]
    fn test_in_range_offset_untouched() {
        let mut scroll = ScrollState { offset: 150.0 };
        scroll.clamp_to(800.0, 500.0);
        assert_eq!(scroll.offset, 150.0);
    }
}
