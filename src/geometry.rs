//! Pixel geometry for the wall: points, sizes and clamping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        self - origin
    }
}

// Pointer and stored coordinates are unbounded input, so arithmetic saturates
// and the wall clamp decides the final position.

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::str::FromStr for Point {
    type Err = String;

    /// Parses `"x,y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("Invalid point '{}': expected x,y", s))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| format!("Invalid x coordinate: {}", x))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| format!("Invalid y coordinate: {}", y))?;
        Ok(Point::new(x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, origin: Point, point: Point) -> bool {
        point.x >= origin.x
            && point.y >= origin.y
            && point.x < origin.x.saturating_add(self.width)
            && point.y < origin.y.saturating_add(self.height)
    }
}

/// Pin `value` into `[min, max]`. When `max < min` the result is `min`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

/// Largest top-left corner that keeps an item of `item` size inside `wall`.
///
/// Collapses to `(0, 0)` on an axis where the wall is smaller than the item.
pub fn max_origin(wall: Size, item: Size) -> Point {
    Point::new(
        wall.width.saturating_sub(item.width).max(0),
        wall.height.saturating_sub(item.height).max(0),
    )
}

/// Clamp a top-left corner so an item of `item` size stays inside `wall`.
pub fn clamp_origin(origin: Point, wall: Size, item: Size) -> Point {
    Point::new(
        clamp(origin.x, 0, wall.width.saturating_sub(item.width)),
        clamp(origin.y, 0, wall.height.saturating_sub(item.height)),
    )
}
