//! The six cube faces and the grid patch that covers each one.

use planetfall_math::Vector3;

use crate::GridPatch;

/// The six faces of the unit cube, named by their outward normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Outward-pointing unit normal.
    #[must_use]
    pub fn normal(self) -> Vector3 {
        match self {
            CubeFace::PosX => Vector3::X,
            CubeFace::NegX => -Vector3::X,
            CubeFace::PosY => Vector3::Y,
            CubeFace::NegY => -Vector3::Y,
            CubeFace::PosZ => Vector3::Z,
            CubeFace::NegZ => -Vector3::Z,
        }
    }

    /// Grid patch spanning this face edge to edge.
    ///
    /// `start = normal - across/2 - up/2`, and `up x across` points along the
    /// outward normal on every face.
    #[must_use]
    pub fn patch(self) -> GridPatch {
        let (start, across, up) = match self {
            CubeFace::PosX => ((1.0, -1.0, 1.0), (0.0, 2.0, 0.0), (0.0, 0.0, -2.0)),
            CubeFace::NegX => ((-1.0, -1.0, -1.0), (0.0, 2.0, 0.0), (0.0, 0.0, 2.0)),
            CubeFace::PosY => ((1.0, 1.0, -1.0), (0.0, 0.0, 2.0), (-2.0, 0.0, 0.0)),
            CubeFace::NegY => ((-1.0, -1.0, -1.0), (0.0, 0.0, 2.0), (2.0, 0.0, 0.0)),
            CubeFace::PosZ => ((-1.0, 1.0, 1.0), (2.0, 0.0, 0.0), (0.0, -2.0, 0.0)),
            CubeFace::NegZ => ((-1.0, -1.0, -1.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0)),
        };
        GridPatch::new(
            Vector3::new(start.0, start.1, start.2),
            Vector3::new(across.0, across.1, across.2),
            Vector3::new(up.0, up.1, up.2),
        )
    }

    /// Short label used for GPU resource names and logs.
    pub fn label(self) -> &'static str {
        match self {
            CubeFace::PosX => "+X",
            CubeFace::NegX => "-X",
            CubeFace::PosY => "+Y",
            CubeFace::NegY => "-Y",
            CubeFace::PosZ => "+Z",
            CubeFace::NegZ => "-Z",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_pos_x_patch_is_exact() {
        let p = CubeFace::PosX.patch();
        assert_eq!(p.start, Vector3::new(1.0, -1.0, 1.0));
        assert_eq!(p.across, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(p.up, Vector3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_patches_are_centered_on_face_normal() {
        for face in CubeFace::ALL {
            let p = face.patch();
            let center = p.start + p.across * 0.5 + p.up * 0.5;
            assert!(
                (center - face.normal()).length() < EPSILON,
                "{face:?} centered at {center}"
            );
        }
    }

    #[test]
    fn test_up_cross_across_points_outward() {
        for face in CubeFace::ALL {
            let p = face.patch();
            let n = p.up.cross(p.across).normalize().unwrap();
            assert!(
                (n - face.normal()).length() < EPSILON,
                "{face:?} winding normal {n} is not outward"
            );
        }
    }

    #[test]
    fn test_patches_span_full_face() {
        for face in CubeFace::ALL {
            let p = face.patch();
            assert_eq!(p.across.length(), 2.0, "{face:?}");
            assert_eq!(p.up.length(), 2.0, "{face:?}");
            assert_eq!(p.across.dot(p.up), 0.0, "{face:?}");
            assert_eq!(p.across.dot(face.normal()), 0.0, "{face:?}");
        }
    }

    #[test]
    fn test_corners_lie_on_cube() {
        for face in CubeFace::ALL {
            let p = face.patch();
            for corner in [p.start, p.start + p.across, p.start + p.up, p.start + p.across + p.up] {
                for c in [corner.x, corner.y, corner.z] {
                    assert_eq!(c.abs(), 1.0, "{face:?} corner {corner} is off the cube");
                }
            }
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = CubeFace::ALL.iter().map(|f| f.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 6);
    }
}
