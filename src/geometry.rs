//! Recursive branch generation for binary fractal trees.
//!
//! Every drawable branch emits one segment and splits into a left child
//! (turned -30°, 0.75 of the length) and a right child (turned +50°, 0.66 of
//! the length). Recursion ends once a branch is shorter than the minimum
//! length; the depth-limited variant also stops once its descent counter
//! passes the requested depth.

use crate::colors::{HueCursor, Rgb};
use crate::config::constants::{
    LEFT_DECAY, LEFT_TURN, MIN_LENGTH, RIGHT_DECAY, RIGHT_TURN, TRUNK_LENGTH,
};

/// A pixel position on the logical canvas (y grows downward)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One drawn line. `color` is `None` for plain trees, which use the canvas'
/// ambient color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Option<Rgb>,
}

/// Anything segments can be drawn onto
pub trait SegmentSink {
    fn draw_segment(&mut self, segment: Segment);
}

impl SegmentSink for Vec<Segment> {
    fn draw_segment(&mut self, segment: Segment) {
        self.push(segment);
    }
}

/// A branch waiting to be drawn: where it starts, where it points (degrees)
/// and how long it is
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub origin: Point,
    pub angle: i32,
    pub length: f64,
}

impl Branch {
    pub fn new(origin: Point, angle: i32, length: f64) -> Self {
        Self { origin, angle, length }
    }

    /// A full-length trunk
    pub fn trunk(origin: Point, angle: i32) -> Self {
        Self::new(origin, angle, TRUNK_LENGTH)
    }

    pub fn is_drawable(&self) -> bool {
        self.length >= MIN_LENGTH
    }

    /// End of the branch, truncated to whole pixels
    pub fn end_point(&self) -> Point {
        let radians = (self.angle as f64).to_radians();
        let x = radians.cos() * self.length + self.origin.x as f64;
        let y = radians.sin() * self.length + self.origin.y as f64;
        Point::new(x as i32, y as i32)
    }

    /// Left and right children, both rooted at `end`
    pub fn children(&self, end: Point) -> [Branch; 2] {
        [
            Branch::new(end, self.angle + LEFT_TURN, self.length * LEFT_DECAY),
            Branch::new(end, self.angle + RIGHT_TURN, self.length * RIGHT_DECAY),
        ]
    }
}

/// Counts recursive calls of a depth-limited draw.
///
/// The counter is shared by the whole traversal, not tracked per path: every
/// call that reaches the depth check bumps it, whether or not the check
/// admits the call. A check admits while the count before bumping is at most
/// the depth, so `depth + 1` calls get through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescentCounter {
    calls: u32,
}

impl DescentCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.calls = 0;
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Bump the counter, returning whether this call may still draw
    pub fn admit(&mut self, depth: u32) -> bool {
        let current = self.calls;
        self.calls = self.calls.saturating_add(1);
        current <= depth
    }
}

struct Grower<'a> {
    hue: Option<&'a mut HueCursor>,
    limit: Option<(&'a mut DescentCounter, u32)>,
}

impl Grower<'_> {
    fn admits(&mut self) -> bool {
        match self.limit.as_mut() {
            Some((counter, depth)) => counter.admit(*depth),
            None => true,
        }
    }

    fn grow<S: SegmentSink + ?Sized>(&mut self, sink: &mut S, branch: Branch) {
        // Length first: a short branch never touches the descent counter
        if !branch.is_drawable() || !self.admits() {
            return;
        }

        let end = branch.end_point();
        let color = self.hue.as_mut().map(|hue| hue.next_color());
        sink.draw_segment(Segment { start: branch.origin, end, color });

        for child in branch.children(end) {
            self.grow(sink, child);
        }
    }
}

/// Draw a plain tree in the canvas' ambient color
pub fn draw_tree<S: SegmentSink + ?Sized>(sink: &mut S, branch: Branch) {
    Grower { hue: None, limit: None }.grow(sink, branch);
}

/// Draw a tree whose segments take successive hues from `hue`
pub fn draw_tree_with_colors<S: SegmentSink + ?Sized>(
    sink: &mut S,
    hue: &mut HueCursor,
    branch: Branch,
) {
    Grower { hue: Some(hue), limit: None }.grow(sink, branch);
}

/// Draw a colorful tree that also stops once `counter` passes `depth`
pub fn draw_tree_to_depth_with_colors<S: SegmentSink + ?Sized>(
    sink: &mut S,
    hue: &mut HueCursor,
    counter: &mut DescentCounter,
    branch: Branch,
    depth: u32,
) {
    Grower {
        hue: Some(hue),
        limit: Some((counter, depth)),
    }
    .grow(sink, branch);
}

/// Collect the segments of a plain tree
#[cfg(test)]
pub fn generate_tree(origin: Point, angle: i32, length: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    draw_tree(&mut segments, Branch::new(origin, angle, length));
    segments
}
