use cairn_voxel::{MAX_WATER_LEVEL, OPAQUE_ALPHA, VoxelRecord, VoxelType};
use proptest::prelude::*;

fn arb_type() -> impl Strategy<Value = VoxelType> {
    (0u8..10).prop_map(|id| VoxelType::from_id(id).unwrap())
}

#[test]
fn solid_types_are_opaque_and_water_is_translucent() {
    for t in VoxelType::ALL {
        let [_, _, _, a] = t.color();
        if t.is_water() {
            assert!(a < OPAQUE_ALPHA, "{t} should be translucent");
        } else {
            assert_eq!(a, OPAQUE_ALPHA, "{t} should be opaque");
        }
    }
    assert_ne!(VoxelType::Water.color(), VoxelType::WaterSource.color());
}

proptest! {
    // Unknown ids never decode; known ids decode to the matching discriminant.
    #[test]
    fn from_id_is_partial_inverse(id in any::<u8>()) {
        match VoxelType::from_id(id) {
            Some(t) => prop_assert_eq!(t.id(), id),
            None => prop_assert!(id >= 10),
        }
    }

    // Any sequence of retypes keeps the water-level invariants.
    #[test]
    fn retype_sequence_preserves_level_invariants(seq in prop::collection::vec(arb_type(), 1..16)) {
        let mut r = VoxelRecord::default();
        for t in seq {
            r.retype(t);
            prop_assert_eq!(r.ty, t);
            if !r.is_water() {
                prop_assert_eq!(r.water_level, 0);
            }
            if r.ty == VoxelType::WaterSource {
                prop_assert_eq!(r.water_level, MAX_WATER_LEVEL);
            }
            if r.ty == VoxelType::Water {
                prop_assert!(r.water_level >= 1 && r.water_level <= MAX_WATER_LEVEL);
            }
        }
    }

    #[test]
    fn water_constructor_clamps(level in any::<u8>()) {
        let r = VoxelRecord::water(level);
        prop_assert_eq!(r.ty, VoxelType::Water);
        prop_assert!(r.water_level >= 1 && r.water_level <= MAX_WATER_LEVEL);
    }
}
