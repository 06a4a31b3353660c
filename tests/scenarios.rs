use lazy_vecmath::register::Scalar128;
use lazy_vecmath::{
    packed_vector, ChunkKind, DefaultRegister, Float2, Float3, Float4, Float4x4, Packed, Register,
    RegisterPolicy, EPSILON,
};

packed_vector! {
    struct Float1 { rows: 1, columns: 1, column_align: 4, align: 4, storage: 1 }
}

packed_vector! {
    struct Packed2 { rows: 2, columns: 1, column_align: 8, align: 4, storage: 2 }
}

packed_vector! {
    struct Packed3 { rows: 3, columns: 1, column_align: 16, align: 4, storage: 3 }
}

packed_vector! {
    struct Padded2 { rows: 2, columns: 1, column_align: 16, align: 16, storage: 4 }
}

packed_vector! {
    struct Packed4 { rows: 4, columns: 1, column_align: 16, align: 4, storage: 4 }
}

packed_vector! {
    struct Float2x2 { rows: 2, columns: 2, column_align: 16, align: 16, storage: 8 }
}

packed_vector! {
    struct Packed4x4 { rows: 4, columns: 4, column_align: 16, align: 4, storage: 16 }
}

packed_vector! {
    struct Float3x3 { rows: 3, columns: 3, column_align: 16, align: 16, storage: 12 }
}

#[test]
fn dot_cross_and_sign() {
    let a = Float3::new(1.0, 3.0, 5.0);
    let b = Float3::new(2.0, 4.0, 6.0);
    assert_eq!(a.dot(&b), 44.0);
    assert_eq!(a.cross(&b), Float3::new(-2.0, 4.0, -2.0));
    assert_eq!(Float3::new(-3.0, 0.0, 7.0).sign(), Float3::new(-1.0, 0.0, 1.0));
}

#[test]
fn three_lane_sum_is_exact() {
    // the padding lane takes no part in the three-lane fold
    let v = Float3::new(1.0e-3, 2.0e-3, 4.0e-3);
    assert_eq!(v.sum(), 1.0e-3 + 2.0e-3 + 4.0e-3);
    let v = Packed3::from_array([1.0, 2.0, 3.0]);
    assert_eq!(v.sum(), 6.0);
    let v = Float4::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(v.sum(), 10.0);
}

/// Loads every chunk into a register and stores it into a zeroed value.
fn round_trip<T, R>(value: &T) -> ChunkKind
where
    T: Packed + PartialEq + core::fmt::Debug,
    R: Register,
{
    let mut out = T::zeroed();
    for chunk in 0..RegisterPolicy::<T, R>::REGISTER_COUNT {
        let register = RegisterPolicy::<T, R>::load_chunk(value, chunk);
        RegisterPolicy::<T, R>::store_chunk(&mut out, chunk, register);
    }
    assert_eq!(&out, value);
    assert_eq!(out.storage(), value.storage());
    RegisterPolicy::<T, R>::CHUNK
}

fn sequence<const N: usize>(scale: f32) -> [f32; N] {
    core::array::from_fn(|i| (i as f32 + 1.0) * scale)
}

fn round_trip_all<R: Register>() {
    let kinds = [
        round_trip::<_, R>(&Float1::from_array([-1.5])),
        round_trip::<_, R>(&Float2::new(1.0, -2.0)),
        round_trip::<_, R>(&Packed2::from_array([3.0, 4.0])),
        round_trip::<_, R>(&Padded2::from_array([5.0, -6.0])),
        round_trip::<_, R>(&Float3::new(1.0, 2.0, 3.0)),
        round_trip::<_, R>(&Packed3::from_array([5.0, 6.0, 7.0])),
        round_trip::<_, R>(&Float4::new(1.0, 2.0, 3.0, 4.0)),
        round_trip::<_, R>(&Packed4::from_array(sequence(-1.0))),
        round_trip::<_, R>(&Float2x2::from_array(sequence(2.0))),
        round_trip::<_, R>(&Float3x3::from_array(sequence(1.0))),
        round_trip::<_, R>(&Packed4x4::from_array(sequence(0.5))),
        round_trip::<_, R>(&Float4x4::from_array(sequence(1.0))),
    ];
    for kind in [
        ChunkKind::Aligned,
        ChunkKind::Unaligned,
        ChunkKind::Triple,
        ChunkKind::Pair,
        ChunkKind::Single,
    ] {
        assert!(kinds.contains(&kind), "{kind:?} not exercised");
    }
}

#[test]
fn load_store_round_trips_every_layout() {
    round_trip_all::<DefaultRegister>();
    round_trip_all::<Scalar128>();
}

#[test]
fn partial_stores_stay_inside_the_value() {
    // a value sandwiched between sentinels: narrow chunk stores must not touch them
    #[repr(C)]
    struct Guarded {
        before: [f32; 4],
        value: Packed3,
        after: [f32; 4],
    }

    let mut guarded = Guarded {
        before: [9.0; 4],
        value: Packed3::ZERO,
        after: [9.0; 4],
    };
    let register = <DefaultRegister as Register>::splat(1.0);
    RegisterPolicy::<Packed3>::store::<0>(&mut guarded.value, register);
    assert_eq!(guarded.value.to_array(), [1.0; 3]);
    assert_eq!(guarded.before, [9.0; 4]);
    assert_eq!(guarded.after, [9.0; 4]);
}

#[test]
fn reciprocal_and_exact_division() {
    let x = Float4::new(0.1, 1.0, 3.0, 250.0);
    let product = x.reciprocal() * x;
    assert!(product.approx_eq(&Float4::ONE, lazy_vecmath::APPROX_EPSILON));

    let quotient = (x / x).to_array();
    for q in quotient {
        assert!((q - 1.0).abs() <= EPSILON);
    }
}

#[test]
fn bitfield_bytes_follow_lane_order() {
    let m = Float4x4::from_array(core::array::from_fn(|i| if i % 3 == 0 { 1.0 } else { 0.0 }));
    let bits = m.simd_gt(&Float4x4::ZERO);
    let bytes: Vec<u8> = bits.bytes().collect();
    // lanes 0, 3, 6, 9, 12, 15
    assert_eq!(bytes, [0b0100_1001, 0b1001_0010]);
    assert_eq!(bits.count_true(), 6);
}

#[test]
fn operator_sugar() {
    let mut v = Float3::new(1.0, 2.0, 3.0);
    v += Float3::ONE;
    v *= 2.0;
    v -= 1.0;
    v /= Float3::splat(1.0);
    assert_eq!(v, Float3::new(3.0, 5.0, 7.0));
    assert_eq!(2.0 * v - v, v);
    assert_eq!(v.iter().sum::<f32>(), 15.0);

    use num_traits::{Inv, MulAdd, One, Zero};
    assert!(Float4::zero().is_zero());
    assert_eq!(Float4::one(), Float4::ONE);
    assert!(!Float4::ONE.is_zero());
    assert_eq!(Float4::ONE.mul_add(Float4::splat(2.0), Float4::ONE), Float4::splat(3.0));
    assert!(Float4::splat(4.0).inv().approx_eq(&Float4::splat(0.25), 1e-3));
}
