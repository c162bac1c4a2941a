use cairn_geom::Vec3;

/// Axis-aligned cube face. Discriminants follow the order faces are tested
/// and emitted in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosZ = 0,
    NegZ = 1,
    PosY = 2,
    NegY = 3,
    PosX = 4,
    NegX = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosZ,
        Face::NegZ,
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
    ];

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosZ => Vec3::UP,
            Face::NegZ => Vec3::DOWN,
            Face::PosY => Vec3::FORWARD,
            Face::NegY => Vec3::BACKWARD,
            Face::PosX => Vec3::RIGHT,
            Face::NegX => Vec3::LEFT,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
        }
    }

    /// Corner offsets from the cell center for a cell of half-extent `h`,
    /// wound counter-clockwise when seen from outside the cube.
    #[inline]
    pub fn corners(self, h: f32) -> [Vec3; 4] {
        let v = Vec3::new;
        match self {
            Face::PosZ => [v(-h, -h, h), v(h, -h, h), v(h, h, h), v(-h, h, h)],
            Face::NegZ => [v(-h, h, -h), v(h, h, -h), v(h, -h, -h), v(-h, -h, -h)],
            Face::PosY => [v(-h, h, -h), v(-h, h, h), v(h, h, h), v(h, h, -h)],
            Face::NegY => [v(h, -h, -h), v(h, -h, h), v(-h, -h, h), v(-h, -h, -h)],
            Face::PosX => [v(h, -h, -h), v(h, h, -h), v(h, h, h), v(h, -h, h)],
            Face::NegX => [v(-h, h, -h), v(-h, -h, -h), v(-h, -h, h), v(-h, h, h)],
        }
    }
}

/// Per-vertex UVs, in the same order as [`Face::corners`].
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_wind_along_normal() {
        for face in Face::ALL {
            let c = face.corners(0.5);
            let e1 = c[1] - c[0];
            let e2 = c[2] - c[0];
            let n = e1.cross(e2).normalized();
            assert!((n - face.normal()).length() < 1e-6, "{face:?} winds against its normal");
            for p in c {
                assert!((p.dot(face.normal()) - 0.5).abs() < 1e-6, "{face:?} corner off plane");
            }
        }
    }

    #[test]
    fn delta_matches_normal() {
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            assert_eq!(Vec3::new(dx as f32, dy as f32, dz as f32), face.normal());
        }
    }
}
