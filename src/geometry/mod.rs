//! Geometric primitives for layout analysis.
//!
//! This module provides basic geometric types and operations used throughout
//! the layout analysis algorithms.

/// A 2D point in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let center = rect.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this rectangle intersects with another.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let r3 = Rect::new(200.0, 200.0, 100.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if this rectangle contains a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::{Rect, Point};
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let p1 = Point::new(50.0, 50.0);
    /// let p2 = Point::new(150.0, 150.0);
    ///
    /// assert!(rect.contains_point(&p1));
    /// assert!(!rect.contains_point(&p2));
    /// ```
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.x, 0.0);
    /// assert_eq!(union.y, 0.0);
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Compute the area of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.area(), 5000.0);
    /// ```
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// A 2D size (width/height pair) in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Size {
    /// Create a new size.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Area of the size (`w * h`).
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// A size is empty if either dimension is below `min_item_size`.
    pub fn is_empty(&self, min_item_size: f32) -> bool {
        self.w < min_item_size || self.h < min_item_size
    }

    /// Scale both dimensions by `factor`, returning a new size.
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            w: self.w * factor,
            h: self.h * factor,
        }
    }
}

/// Alias used by the layout-analysis pipeline, where "bounding box" is the
/// more natural name than "rect" for an item's extent.
pub type BoundingBox = Rect;

impl Rect {
    /// Construct from a top-left origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.w, size.h)
    }

    /// This rectangle's size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rectangle is degenerate: either dimension below
    /// `min_item_size`.
    pub fn is_empty(&self, min_item_size: f32) -> bool {
        self.size().is_empty(min_item_size)
    }

    /// Signed horizontal overlap with `other`. Positive when the rectangles
    /// overlap horizontally; negative is the horizontal gap between them
    /// (not clamped to zero — callers rely on the signed value, e.g. to
    /// compare a gap against `-2 * mean_char_height`).
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        self.right().min(other.right()) - self.left().max(other.left())
    }

    /// Signed vertical overlap with `other`, analogous to
    /// [`horizontal_overlap`](Self::horizontal_overlap).
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        self.bottom().min(other.bottom()) - self.top().max(other.top())
    }

    /// Horizontal overlap expressed as a ratio of the narrower of the two
    /// rectangles' widths. Zero if either rectangle has zero width.
    pub fn horizontal_overlap_ratio(&self, other: &Rect) -> f32 {
        let min_width = self.width.min(other.width);
        if min_width <= 0.0 {
            0.0
        } else {
            self.horizontal_overlap(other) / min_width
        }
    }

    /// Vertical overlap expressed as a ratio of the shorter of the two
    /// rectangles' heights. Zero if either rectangle has zero height.
    pub fn vertical_overlap_ratio(&self, other: &Rect) -> f32 {
        let min_height = self.height.min(other.height);
        if min_height <= 0.0 {
            0.0
        } else {
            self.vertical_overlap(other) / min_height
        }
    }

    /// Whether the two rectangles intersect by at least `min_item_size` on
    /// both axes. Distinct from [`intersects`](Self::intersects), which
    /// uses a strict zero tolerance.
    pub fn has_intersection(&self, other: &Rect, min_item_size: f32) -> bool {
        self.horizontal_overlap(other) > min_item_size
            && self.vertical_overlap(other) > min_item_size
    }

    /// Intersection rectangle, or `None` if the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::from_points(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// Subtract `other` from `self`, trimming one axis of `self` when
    /// `other` fully spans it.
    ///
    /// Mirrors the reference algorithm's rectangle-subtraction rule used
    /// while carving whitespace-cover candidates out of obstacle blobs: if
    /// `other` spans `self` horizontally, `self` is trimmed vertically to
    /// whichever side of `other` is larger; symmetrically for a vertical
    /// span. Both trims can apply in sequence when `other` spans `self` on
    /// both axes. Returns a degenerate (zero-sized, zero-origin) rectangle
    /// when the result would be empty.
    pub fn minus(&self, other: &Rect, min_item_size: f32) -> Rect {
        let mut result = *self;

        if other.left() < result.left() + min_item_size
            && other.right() > result.right() - min_item_size
        {
            let top_remainder = other.top() - result.top();
            let bottom_remainder = result.bottom() - other.bottom();
            if top_remainder >= bottom_remainder {
                result.height = (other.top() - result.top()).max(0.0);
            } else {
                let new_top = other.bottom();
                result.height = (result.bottom() - new_top).max(0.0);
                result.y = new_top;
            }
        }

        if other.top() < result.top() + min_item_size
            && other.bottom() > result.bottom() - min_item_size
        {
            let left_remainder = other.left() - result.left();
            let right_remainder = result.right() - other.right();
            if left_remainder >= right_remainder {
                result.width = (other.left() - result.left()).max(0.0);
            } else {
                let new_left = other.right();
                result.width = (result.right() - new_left).max(0.0);
                result.x = new_left;
            }
        }

        if result.is_empty(min_item_size) {
            Rect::new(0.0, 0.0, 0.0, 0.0)
        } else {
            result
        }
    }

    /// Whether `self` fully contains `other` (inclusive of shared edges).
    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Scale the rectangle about its origin by `factor`.
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(self.x * factor, self.y * factor, self.width * factor, self.height * factor)
    }

    /// Grow (or shrink, for negative `amount`) the rectangle by `amount` on
    /// every side, keeping the same center.
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            (self.width + 2.0 * amount).max(0.0),
            (self.height + 2.0 * amount).max(0.0),
        )
    }

    /// Whether this rectangle qualifies as a horizontal ruler: thin in
    /// height, thick and elongated in width.
    pub fn is_horizontal_ruler(
        &self,
        max_thin_size: f32,
        min_thick_size: f32,
        min_aspect_ratio: f32,
    ) -> bool {
        self.height < max_thin_size
            && self.width > min_thick_size.max(min_aspect_ratio * self.height)
    }

    /// Whether this rectangle qualifies as a vertical ruler: thin in width,
    /// thick and elongated in height.
    pub fn is_vertical_ruler(
        &self,
        max_thin_size: f32,
        min_thick_size: f32,
        min_aspect_ratio: f32,
    ) -> bool {
        self.width < max_thin_size
            && self.height > min_thick_size.max(min_aspect_ratio * self.width)
    }
}

/// Compute the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use pdf_oxide::geometry::{Point, euclidean_distance};
///
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(euclidean_distance(&p1, &p2), 5.0);
/// ```
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f32 {
    ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt()
}
