use std::fmt;

// set up enums and structs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
    Z,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    pub fn to_usize(&self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }
}

/// Extent of a 3D index space, one length per axis.
///
/// Displayed as a tuple, `(10, 10, 20)`, which is how the figure titles
/// print image and chunk shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape3(pub [usize; 3]);

impl Shape3 {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self([x, y, z])
    }

    /// Number of cells in the index space.
    pub fn volume(&self) -> usize {
        self.0.iter().product()
    }

    /// Per-axis ceiling division, used both for counting chunks and for
    /// downsampling by a bin factor.
    pub fn div_ceil(&self, divisor: Shape3) -> Shape3 {
        Shape3([
            self.0[0].div_ceil(divisor.0[0]),
            self.0[1].div_ceil(divisor.0[1]),
            self.0[2].div_ceil(divisor.0[2]),
        ])
    }

    pub fn splat(n: usize) -> Self {
        Self([n, n, n])
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for Shape3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_prints_as_tuple() {
        assert_eq!(Shape3::new(10, 10, 20).to_string(), "(10, 10, 20)");
    }

    #[test]
    fn div_ceil_rounds_up_per_axis() {
        let shape = Shape3::new(10, 10, 20).div_ceil(Shape3::new(2, 2, 3));
        assert_eq!(shape, Shape3::new(5, 5, 7));
        assert_eq!(Shape3::new(10, 10, 20).div_ceil(Shape3::splat(4)), Shape3::new(3, 3, 5));
    }

    #[test]
    fn volume_multiplies_axes() {
        assert_eq!(Shape3::new(10, 10, 20).volume(), 2000);
    }
}
