pub const FOLLOW_FACTOR: f64 = 0.1;
pub const MIN_VIEWPORT_WIDTH: f64 = 768.0;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

pub fn enabled_for_viewport(width: f64) -> bool {
    width > MIN_VIEWPORT_WIDTH
}

/// Decorative cursor marker trailing the pointer with exponential smoothing.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerFollower {
    pointer: Point,
    follower: Point,
}

impl PointerFollower {
    pub fn for_viewport(width: f64) -> Option<Self> {
        enabled_for_viewport(width).then(|| Self {
            pointer: Point::default(),
            follower: Point::default(),
        })
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    pub fn step(&mut self) -> Point {
        self.follower.x += (self.pointer.x - self.follower.x) * FOLLOW_FACTOR;
        self.follower.y += (self.pointer.y - self.follower.y) * FOLLOW_FACTOR;
        self.follower
    }

    pub fn lag(&self) -> f64 {
        self.follower.distance_to(self.pointer)
    }
}
