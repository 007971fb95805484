use crate::constants::{HEIGHT, WIDTH};

/// A point in logical surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned box in logical coordinates. Constructing one never draws it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<Point> for Rect {
    fn from(point: Point) -> Self {
        Rect::new(point.x, point.y, 1, 1)
    }
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the interiors overlap; touching edges do not count.
    /// Against a 1x1 area this is half-open point containment.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Projection between the fixed logical surface and the terminal's cell grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols: cols.max(1), rows: rows.max(1) }
    }

    /// Cell span `(col0, row0, col1, row1)` covered by `rect`, end-exclusive.
    /// A cell is covered exactly when `rect` intersects its `cell_span`.
    pub fn to_cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        let (col0, col1) = project_span(rect.x, rect.right(), WIDTH, self.cols)?;
        let (row0, row1) = project_span(rect.y, rect.bottom(), HEIGHT, self.rows)?;
        Some((col0, row0, col1, row1))
    }

    /// Logical area a cell stands for, rounded outward like `to_cells`.
    pub fn cell_span(&self, col: u16, row: u16) -> Rect {
        let (x0, x1) = cell_bounds(col, WIDTH, self.cols);
        let (y0, y1) = cell_bounds(row, HEIGHT, self.rows);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Cell holding the given logical point, clamped to the grid.
    pub fn cell_of(&self, point: Point) -> (u16, u16) {
        let col = (i64::from(point.x) * i64::from(self.cols)).div_euclid(i64::from(WIDTH));
        let row = (i64::from(point.y) * i64::from(self.rows)).div_euclid(i64::from(HEIGHT));
        (
            col.clamp(0, i64::from(self.cols) - 1) as u16,
            row.clamp(0, i64::from(self.rows) - 1) as u16,
        )
    }
}

fn project_span(start: i32, end: i32, extent: i32, cells: u16) -> Option<(u16, u16)> {
    let cells = i64::from(cells);
    let extent = i64::from(extent);
    let first = (i64::from(start) * cells).div_euclid(extent);
    let last = (i64::from(end) * cells + extent - 1).div_euclid(extent);
    let first = first.clamp(0, cells);
    let last = last.clamp(0, cells);
    if last <= first {
        return None;
    }
    Some((first as u16, last as u16))
}

fn cell_bounds(index: u16, extent: i32, cells: u16) -> (i32, i32) {
    let cells = i64::from(cells);
    let extent = i64::from(extent);
    let index = i64::from(index);
    let start = (index * extent).div_euclid(cells);
    let end = ((index + 1) * extent + cells - 1).div_euclid(cells);
    (start as i32, end as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_area_is_half_open() {
        let rect = Rect::new(10, 20, 32, 32);
        let hits = |x, y| rect.intersects(&Rect::from(Point::new(x, y)));
        assert!(hits(10, 20));
        assert!(hits(41, 51));
        assert!(!hits(42, 30));
        assert!(!hits(20, 52));
        assert!(!hits(9, 30));
    }

    #[test]
    fn test_intersects_requires_overlap() {
        let player = Rect::new(400, 550, 50, 50);
        // Bottom edge touching the player's top edge
        assert!(!Rect::new(400, 518, 32, 32).intersects(&player));
        assert!(Rect::new(400, 519, 32, 32).intersects(&player));
        // Right edge touching the player's left edge
        assert!(!Rect::new(368, 560, 32, 32).intersects(&player));
        assert!(Rect::new(369, 560, 32, 32).intersects(&player));
        assert!(player.intersects(&Rect::new(369, 560, 32, 32)));
    }

    #[test]
    fn test_viewport_covers_full_surface() {
        let viewport = Viewport::new(80, 24);
        let full = Rect::new(0, 0, WIDTH, HEIGHT);
        assert_eq!(viewport.to_cells(&full), Some((0, 0, 80, 24)));
    }

    #[test]
    fn test_viewport_small_rect_gets_a_cell() {
        let viewport = Viewport::new(10, 10);
        // 32x32 is smaller than one 80x60 cell but still visible
        let (c0, r0, c1, r1) = viewport.to_cells(&Rect::new(0, 0, 32, 32)).unwrap();
        assert_eq!((c0, r0), (0, 0));
        assert!(c1 > c0 && r1 > r0);
    }

    #[test]
    fn test_viewport_clips_offscreen() {
        let viewport = Viewport::new(80, 24);
        assert_eq!(viewport.to_cells(&Rect::new(0, HEIGHT, 32, 32)), None);
        assert_eq!(viewport.to_cells(&Rect::new(0, 0, 0, 10)), None);
        let (_, _, _, r1) = viewport.to_cells(&Rect::new(0, 590, 32, 32)).unwrap();
        assert_eq!(r1, 24);
    }

    #[test]
    fn test_viewport_offscreen_above_is_not_drawn() {
        let viewport = Viewport::new(80, 24);
        assert_eq!(viewport.to_cells(&Rect::new(300, -40, 32, 32)), None);
    }

    #[test]
    fn test_cell_span() {
        let viewport = Viewport::new(80, 24);
        assert_eq!(viewport.cell_span(0, 0), Rect::new(0, 0, 10, 25));
        assert_eq!(viewport.cell_span(40, 17), Rect::new(400, 425, 10, 25));
        // Uneven division rounds outward, so neighbouring spans share an edge pixel
        let uneven = Viewport::new(7, 7);
        assert_eq!(uneven.cell_span(0, 0), Rect::new(0, 0, 115, 86));
        assert_eq!(uneven.cell_span(1, 1), Rect::new(114, 85, 115, 87));
    }

    #[test]
    fn test_painted_cells_match_cell_spans() {
        for viewport in [Viewport::new(80, 24), Viewport::new(7, 7), Viewport::new(133, 41)] {
            for rect in [Rect::new(208, 20, 32, 32), Rect::new(599, 577, 32, 32), Rect::new(400, 550, 50, 50)] {
                let (c0, r0, c1, r1) = viewport.to_cells(&rect).unwrap();
                for row in 0..viewport.rows {
                    for col in 0..viewport.cols {
                        let painted = (c0..c1).contains(&col) && (r0..r1).contains(&row);
                        assert_eq!(
                            painted,
                            rect.intersects(&viewport.cell_span(col, row)),
                            "{:?} cell ({}, {}) on {:?}",
                            rect, col, row, viewport
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_cell_of_lands_inside_its_span() {
        let viewport = Viewport::new(80, 24);
        for (col, row) in [(0, 0), (40, 17), (79, 23), (12, 5)] {
            let span = viewport.cell_span(col, row);
            let centre = Point::new(span.x + span.width / 2, span.y + span.height / 2);
            assert_eq!(viewport.cell_of(centre), (col, row));
        }
    }
}
