//! Camera and face extraction for voxel layers.

use nalgebra::{Matrix3, Point3, Vector3};

use crate::common::Direction;
use crate::grid::OccupancyGrid;

/// Fixed orbit camera with an orthographic projection. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub elevation: f64,
    pub azimuth: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
        }
    }
}

impl Camera {
    /// Rows are screen right, screen up and the direction towards the viewer.
    ///
    /// The z axis of the grid is vertical on screen. Elevations of exactly
    /// ±90° have no defined screen right.
    pub fn basis(&self) -> Matrix3<f64> {
        let (elev, azim) = (self.elevation.to_radians(), self.azimuth.to_radians());
        let toward_viewer = Vector3::new(
            elev.cos() * azim.cos(),
            elev.cos() * azim.sin(),
            elev.sin(),
        );
        let right = Vector3::z().cross(&toward_viewer).normalize();
        let up = toward_viewer.cross(&right);
        Matrix3::from_rows(&[
            right.transpose(),
            up.transpose(),
            toward_viewer.transpose(),
        ])
    }

    /// Screen position and depth of a world point. Larger depth is nearer.
    pub fn project(basis: &Matrix3<f64>, p: &Point3<f64>) -> (f64, f64, f64) {
        let v = basis * p.coords;
        (v.x, v.y, v.z)
    }
}

/// One unit square on the surface of a voxel layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub corners: [Point3<f64>; 4],
    pub normal: Vector3<f64>,
}

impl Face {
    fn new(cell: [usize; 3], axis: Direction, positive: bool) -> Self {
        let d = axis.to_usize();
        let (a, b) = ((d + 1) % 3, (d + 2) % 3);
        let mut origin = Vector3::new(cell[0] as f64, cell[1] as f64, cell[2] as f64);
        if positive {
            origin[d] += 1.0;
        }
        let ea = Vector3::ith(a, 1.0);
        let eb = Vector3::ith(b, 1.0);
        let sign = if positive { 1.0 } else { -1.0 };
        Self {
            corners: [
                Point3::from(origin),
                Point3::from(origin + ea),
                Point3::from(origin + ea + eb),
                Point3::from(origin + eb),
            ],
            normal: Vector3::ith(d, sign),
        }
    }

    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .corners
            .iter()
            .fold(Vector3::zeros(), |acc, c| acc + c.coords);
        Point3::from(sum / 4.0)
    }
}

/// Faces of set cells whose neighbour across the face is empty or outside
/// the grid. Faces shared by two set cells are never drawn.
pub fn exposed_faces(grid: &OccupancyGrid) -> Vec<Face> {
    let shape = grid.shape();
    let mut faces = Vec::new();
    for ((x, y, z), &filled) in grid.cells().indexed_iter() {
        if !filled {
            continue;
        }
        let cell = [x, y, z];
        for axis in Direction::ALL {
            let d = axis.to_usize();
            for positive in [false, true] {
                let neighbour = if positive {
                    Some(cell[d] + 1).filter(|&n| n < shape.0[d])
                } else {
                    cell[d].checked_sub(1)
                };
                let hidden = neighbour.map_or(false, |n| {
                    let mut c = cell;
                    c[d] = n;
                    grid.get(c[0], c[1], c[2])
                });
                if !hidden {
                    faces.push(Face::new(cell, axis, positive));
                }
            }
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Shape3;
    use crate::grid::Region;

    #[test]
    fn lone_voxel_has_six_faces() {
        let grid = OccupancyGrid::from_region(Shape3::splat(3), &Region::new(1..2, 1..2, 1..2));
        let faces = exposed_faces(&grid);
        assert_eq!(faces.len(), 6);
        let centre = Point3::new(1.5, 1.5, 1.5);
        for f in &faces {
            let offset = f.centroid() - centre;
            assert!((offset - f.normal * 0.5).norm() < 1e-12);
        }
    }

    #[test]
    fn buried_voxel_is_hidden() {
        let grid = OccupancyGrid::full(Shape3::splat(3));
        let faces = exposed_faces(&grid);
        // only the outer hull: 6 sides of 3x3
        assert_eq!(faces.len(), 6 * 9);
        let centre = Point3::new(1.5, 1.5, 1.5);
        assert!(faces.iter().all(|f| (f.centroid() - centre).norm() > 1.0));
    }

    #[test]
    fn camera_basis_is_orthonormal() {
        let b = Camera::default().basis();
        let identity = b * b.transpose();
        assert!((identity - Matrix3::identity()).norm() < 1e-12);
        // z points up on screen
        assert!(b[(1, 2)] > 0.0);
    }

    #[test]
    fn nearer_corner_has_larger_depth() {
        let b = Camera::default().basis();
        // viewer sits at +x, -y, +z
        let (_, _, near) = Camera::project(&b, &Point3::new(1.0, 0.0, 1.0));
        let (_, _, far) = Camera::project(&b, &Point3::new(0.0, 1.0, 0.0));
        assert!(near > far);
    }
}
