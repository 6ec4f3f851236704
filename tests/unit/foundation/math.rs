use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"vitrine");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'v');
    b.write_bytes(b"itrine");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_str_is_length_prefixed() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unpremul_inverts_opaque_and_zero() {
    assert_eq!(unpremul_u8(200, 255), 200);
    assert_eq!(unpremul_u8(10, 0), 0);
    let premul = mul_div255_u8(200, 128);
    assert!((i32::from(unpremul_u8(premul, 128)) - 200).abs() <= 1);
}
