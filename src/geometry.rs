//! Playfield geometry: vectors, axis-aligned rectangles, the bounds test
//! and the pixel → terminal-cell mapping used by the renderer.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// Axis-aligned rectangle in playfield pixels, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a rectangle of the given size centred on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment of `rect` inside the `width` × `height` playfield.
///
/// Returns `(inside_x, inside_y)`.  Either flag being `false` means the
/// rectangle pokes out of the playfield on that axis.
pub fn in_bounds(rect: &Rect, width: f32, height: f32) -> (bool, bool) {
    let inside_x = rect.left() >= 0.0 && rect.right() <= width;
    let inside_y = rect.top() >= 0.0 && rect.bottom() <= height;
    (inside_x, inside_y)
}

/// Convenience wrapper: true when both axes of [`in_bounds`] pass.
pub fn fully_inside(rect: &Rect, width: f32, height: f32) -> bool {
    in_bounds(rect, width, height) == (true, true)
}

/// Unit vector pointing from the centre of `from` to the centre of `to`.
///
/// `None` when both centres coincide.
pub fn direction(from: &Rect, to: &Rect) -> Option<Vec2> {
    let a = from.center();
    let b = to.center();
    let diff = Vec2::new(b.x - a.x, b.y - a.y);
    let norm = diff.length();
    if norm <= f32::EPSILON {
        return None;
    }
    Some(diff.scale(1.0 / norm))
}

// ── Terminal mapping ─────────────────────────────────────────────────────────

/// Maps playfield pixels onto a `cols` × `rows` terminal area whose top-left
/// cell is `(origin_col, origin_row)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub origin_col: u16,
    pub origin_row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        let col = (p.x / self.width * self.cols as f32) as u16;
        let row = (p.y / self.height * self.rows as f32) as u16;
        Some((
            self.origin_col + col.min(self.cols - 1),
            self.origin_row + row.min(self.rows - 1),
        ))
    }
}
