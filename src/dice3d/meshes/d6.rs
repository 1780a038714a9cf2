use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Outward face normals of a cube and the value printed on each face.
///
/// Opposite faces sum to seven: +X/-X = 1/6, +Y/-Y = 2/5, +Z/-Z = 3/4.
/// Order matters: when two faces point up equally, the earlier one wins.
pub const D6_FACE_NORMALS: [(Vec3, u32); 6] = [
    (Vec3::X, 1),
    (Vec3::NEG_X, 6),
    (Vec3::Y, 2),
    (Vec3::NEG_Y, 5),
    (Vec3::Z, 3),
    (Vec3::NEG_Z, 4),
];

const CORNER: f32 = 0.5;

/// Pip centers on a face, in face-local coordinates where the face spans [-1, 1]
pub fn pip_layout(value: u32) -> &'static [Vec2] {
    const ONE: [Vec2; 1] = [Vec2::ZERO];
    const TWO: [Vec2; 2] = [Vec2::new(-CORNER, -CORNER), Vec2::new(CORNER, CORNER)];
    const THREE: [Vec2; 3] = [
        Vec2::new(-CORNER, -CORNER),
        Vec2::ZERO,
        Vec2::new(CORNER, CORNER),
    ];
    const FOUR: [Vec2; 4] = [
        Vec2::new(-CORNER, -CORNER),
        Vec2::new(CORNER, -CORNER),
        Vec2::new(-CORNER, CORNER),
        Vec2::new(CORNER, CORNER),
    ];
    const FIVE: [Vec2; 5] = [
        Vec2::new(-CORNER, -CORNER),
        Vec2::ZERO,
        Vec2::new(-CORNER, CORNER),
        Vec2::new(CORNER, CORNER),
        Vec2::new(CORNER, -CORNER),
    ];
    const SIX: [Vec2; 6] = [
        Vec2::new(-CORNER, -CORNER),
        Vec2::new(CORNER, -CORNER),
        Vec2::new(-CORNER, 0.0),
        Vec2::new(CORNER, 0.0),
        Vec2::new(-CORNER, CORNER),
        Vec2::new(CORNER, CORNER),
    ];

    match value {
        1 => &ONE,
        2 => &TWO,
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        6 => &SIX,
        _ => &[],
    }
}

/// One pip on the die surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipPlacement {
    /// Position relative to the die center
    pub position: Vec3,
    /// Normal of the face the pip sits on
    pub normal: Vec3,
    /// Value of that face
    pub value: u32,
}

/// Every pip on a die of edge length `size`
pub fn pip_positions(size: f32) -> Vec<PipPlacement> {
    let half = size / 2.0;
    let mut positions = Vec::with_capacity(21);

    for (normal, value) in D6_FACE_NORMALS {
        let (u, v) = normal.any_orthonormal_pair();
        for pip in pip_layout(value) {
            let offset = (u * pip.x + v * pip.y) * half;
            positions.push(PipPlacement {
                position: normal * half + offset,
                normal,
                value,
            });
        }
    }

    positions
}

pub fn d6_mesh(size: f32) -> Mesh {
    Mesh::from(Cuboid::new(size, size, size))
}

pub fn d6_collider(size: f32) -> Collider {
    Collider::cuboid(size / 2.0, size / 2.0, size / 2.0)
}
