/// Fixed drawing constants. None of these are exposed on the command line.
pub mod constants {
    use std::time::Duration;

    /// Branches shorter than this are not drawn
    pub const MIN_LENGTH: f64 = 5.0;

    /// How often the slowly drawn tree grows by one level
    pub const SLOW_DRAW_INTERVAL: Duration = Duration::from_millis(50);
    /// Scheduler steps evaluated per timer tick
    pub const STEPS_PER_TICK: u32 = 2;

    /// Logical canvas size in pixels
    pub const CANVAS_WIDTH: i32 = 900;
    pub const CANVAS_HEIGHT: i32 = 900;

    /// Length of the first branch of every tree
    pub const TRUNK_LENGTH: f64 = 100.0;
    /// Trunk directions: one tree grows up, its mirror grows down
    pub const TRUNK_UP: i32 = -90;
    pub const TRUNK_DOWN: i32 = 90;

    /// Left child: turn and length decay
    pub const LEFT_TURN: i32 = -30;
    pub const LEFT_DECAY: f64 = 0.75;
    /// Right child: turn and length decay
    pub const RIGHT_TURN: i32 = 50;
    pub const RIGHT_DECAY: f64 = 0.66;

    /// Tree origins (x, y)
    pub const PLAIN_ORIGIN: (i32, i32) = (225, 450);
    pub const COLORFUL_ORIGIN: (i32, i32) = (675, 450);
    pub const SLOW_ORIGIN: (i32, i32) = (450, 450);

    /// HSB saturation and brightness of colorful branches
    pub const SATURATION: f32 = 1.0;
    pub const BRIGHTNESS: f32 = 0.75;

    /// Print mode fallback when stdout is not a terminal
    pub const FALLBACK_COLS: u16 = 80;
    pub const FALLBACK_ROWS: u16 = 40;
}

/// Which trees a paint cycle draws
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    /// Only the animated, slowly drawn tree
    SlowOnly,
    /// Plain and colorful static pairs plus the animated tree
    All,
}

impl DrawMode {
    pub fn from_flag(all: bool) -> Self {
        if all {
            DrawMode::All
        } else {
            DrawMode::SlowOnly
        }
    }

    pub fn draws_static_trees(self) -> bool {
        self == DrawMode::All
    }
}

/// Configuration for the interactive animated canvas
#[derive(Clone, Debug)]
pub struct ShowConfig {
    pub mode: DrawMode,
    pub steps_per_tick: u32,
}

/// Configuration for a single painted frame (print and export)
#[derive(Clone, Debug)]
pub struct FrameConfig {
    pub mode: DrawMode,
    /// Depth limit of the slowly drawn tree; `None` draws it completely
    pub depth: Option<u32>,
}

impl FrameConfig {
    /// The depth handed to the renderer. An unbounded frame uses the largest
    /// depth, which the descent counter never exceeds.
    pub fn effective_depth(&self) -> u32 {
        self.depth.unwrap_or(u32::MAX)
    }
}

/// Size of the print mode canvas in terminal cells
#[derive(Clone, Copy, Debug)]
pub struct PrintSize {
    pub cols: Option<u16>,
    pub rows: Option<u16>,
}
