use crate::geom::Point;

/// All arena parameters in one struct.
///
/// The playfield is the arena rectangle inset by the four margins; the
/// initial open region is seeded from its corners.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    // -- Arena --
    /// Arena width in pixels.
    pub width: i32,
    /// Arena height in pixels.
    pub height: i32,

    // -- Playfield inset --
    /// Gap between the arena's left edge and the playfield.
    pub left_margin: i32,
    /// Gap between the arena's right edge and the playfield.
    pub right_margin: i32,
    /// Gap between the arena's top edge and the playfield.
    pub top_margin: i32,
    /// Gap between the arena's bottom edge and the playfield.
    pub bottom_margin: i32,
}

impl ArenaConfig {
    /// The playfield's top-left and bottom-right corners.
    pub fn playfield(&self) -> (Point, Point) {
        (
            Point::new(self.left_margin, self.top_margin),
            Point::new(self.width - self.right_margin, self.height - self.bottom_margin),
        )
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            left_margin: 5,
            right_margin: 5,
            top_margin: 5,
            bottom_margin: 5,
        }
    }
}
