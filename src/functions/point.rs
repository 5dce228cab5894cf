use serde::{
    Deserialize,
    Serialize
};

/// 單一取樣點 (x, y)，值語意。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Slope of the chord between two samples. A zero-width chord has slope 0.
    pub fn slope(lhs_pt: &Point, rhs_pt: &Point) -> f64 {
        let run = rhs_pt.x - lhs_pt.x;
        if run == 0.0 {
            0.0
        } else {
            (rhs_pt.y - lhs_pt.y) / run
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}
