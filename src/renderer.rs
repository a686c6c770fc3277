use crate::colors::HueCursor;
use crate::config::constants::{COLORFUL_ORIGIN, PLAIN_ORIGIN, SLOW_ORIGIN, TRUNK_DOWN, TRUNK_UP};
use crate::config::DrawMode;
use crate::geometry::{self, Branch, DescentCounter, Point, SegmentSink};

/// Whether the depth-reveal timer has been started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Running,
}

/// Render-side state. Only the paint path mutates it; the timing thread
/// reaches it through `TreeRenderer::queue_depth` on the render loop.
#[derive(Debug)]
pub struct AnimationState {
    phase: AnimationPhase,
    pending_depth: Option<u32>,
    hue: HueCursor,
    descent: DescentCounter,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            phase: AnimationPhase::Idle,
            pending_depth: None,
            hue: HueCursor::new(),
            descent: DescentCounter::new(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn pending_depth(&self) -> Option<u32> {
        self.pending_depth
    }

    /// Queue a depth, replacing one that has not been painted yet
    pub fn set_pending_depth(&mut self, depth: u32) {
        self.pending_depth = Some(depth);
    }

    pub fn take_pending_depth(&mut self) -> Option<u32> {
        self.pending_depth.take()
    }

    pub fn descent_calls(&self) -> u32 {
        self.descent.calls()
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Paints the trees for one frame and tracks which depth the animated tree
/// is at
#[derive(Debug)]
pub struct TreeRenderer {
    mode: DrawMode,
    state: AnimationState,
    paints: u64,
}

impl TreeRenderer {
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            state: AnimationState::new(),
            paints: 0,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn paints(&self) -> u64 {
        self.paints
    }

    /// Record a depth level handed over by the timing thread
    pub fn queue_depth(&mut self, depth: u32) {
        if let Some(skipped) = self.state.pending_depth() {
            log::trace!("depth {} replaced by {} before painting", skipped, depth);
        }
        self.state.set_pending_depth(depth);
    }

    /// Move from `Idle` to `Running`. Returns true exactly once, telling the
    /// caller to start the timing thread.
    pub fn begin_animation(&mut self) -> bool {
        match self.state.phase() {
            AnimationPhase::Idle => {
                self.state.phase = AnimationPhase::Running;
                true
            }
            AnimationPhase::Running => false,
        }
    }

    /// Draw one frame onto a freshly cleared canvas
    pub fn paint<S: SegmentSink + ?Sized>(&mut self, canvas: &mut S) {
        self.paints += 1;
        self.state.hue.reset();

        if self.mode.draws_static_trees() {
            let plain = Point::from(PLAIN_ORIGIN);
            geometry::draw_tree(canvas, Branch::trunk(plain, TRUNK_UP));
            geometry::draw_tree(canvas, Branch::trunk(plain, TRUNK_DOWN));

            // both colorful halves share one hue run
            let colorful = Point::from(COLORFUL_ORIGIN);
            geometry::draw_tree_with_colors(canvas, &mut self.state.hue, Branch::trunk(colorful, TRUNK_UP));
            geometry::draw_tree_with_colors(canvas, &mut self.state.hue, Branch::trunk(colorful, TRUNK_DOWN));
        }

        if let Some(depth) = self.state.take_pending_depth() {
            self.paint_to_depth(canvas, depth);
        }
    }

    /// Draw both halves of the slowly drawn tree to `depth`. The hue cursor
    /// and descent counter are reset once and carry over from the upper half
    /// into the lower one.
    fn paint_to_depth<S: SegmentSink + ?Sized>(&mut self, canvas: &mut S, depth: u32) {
        self.state.descent.reset();
        self.state.hue.reset();

        let origin = Point::from(SLOW_ORIGIN);
        for angle in [TRUNK_UP, TRUNK_DOWN] {
            geometry::draw_tree_to_depth_with_colors(
                canvas,
                &mut self.state.hue,
                &mut self.state.descent,
                Branch::trunk(origin, angle),
                depth,
            );
        }
        log::trace!("painted depth {} ({} calls)", depth, self.state.descent_calls());
    }
}
