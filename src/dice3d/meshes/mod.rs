pub mod d6;

pub use d6::{d6_collider, d6_mesh, pip_layout, pip_positions, PipPlacement, D6_FACE_NORMALS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d6_has_6_faces() {
        assert_eq!(D6_FACE_NORMALS.len(), 6, "D6 should have 6 face normals");
        for (_, value) in &D6_FACE_NORMALS {
            assert!(*value >= 1 && *value <= 6, "D6 face values should be 1-6");
        }
    }

    #[test]
    fn test_opposite_faces_sum_to_seven() {
        for (normal, value) in D6_FACE_NORMALS {
            let (_, opposite) = D6_FACE_NORMALS
                .iter()
                .find(|(n, _)| *n == -normal)
                .expect("every face has an opposite");
            assert_eq!(value + opposite, 7);
        }
    }

    #[test]
    fn test_pip_counts_match_values() {
        for value in 1..=6 {
            assert_eq!(pip_layout(value).len(), value as usize);
        }
        assert!(pip_layout(7).is_empty());
    }

    #[test]
    fn test_pips_sit_on_their_faces() {
        let size = 2.5;
        let pips = pip_positions(size);
        assert_eq!(pips.len(), 21);

        for pip in pips {
            assert!((pip.position.dot(pip.normal) - size / 2.0).abs() < 1e-5);
            // Pips stay inside the face
            let tangent = pip.position - pip.normal * pip.position.dot(pip.normal);
            assert!(tangent.abs().max_element() < size / 2.0);
        }
    }
}
