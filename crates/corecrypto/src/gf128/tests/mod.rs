// Copyright (C) Microsoft Corporation. All rights reserved.

use rand::RngCore;
use test_with_tracing::test;

use super::*;

fn random_block() -> Gf128Block {
    let mut bytes = [0u8; GF128_BLOCK_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    Gf128Block::from_bytes(bytes)
}

fn be(hex_str: &str) -> Gf128Block {
    Gf128Block::load_be(&hex::decode(hex_str).expect("valid hex"))
}

/// The multiplicative identity: x^0, i.e. the leftmost bit of a GCM block.
fn one() -> Gf128Block {
    be("80000000000000000000000000000000")
}

#[test]
fn test_gf128_load_store_be_reverses_bytes() {
    let input: Vec<u8> = (0u8..16).collect();
    let block = Gf128Block::load_be(&input);
    assert_eq!(block.as_bytes()[15], 0);
    assert_eq!(block.as_bytes()[0], 15);

    let mut out = [0u8; 16];
    block.store_be(&mut out);
    assert_eq!(out.as_slice(), input.as_slice());
}

#[test]
fn test_gf128_load_be_short_input_zero_pads() {
    let block = Gf128Block::load_be(&[0xAA, 0xBB]);
    let mut out = [0xFFu8; 16];
    block.store_be(&mut out);
    assert_eq!(out[..2], [0xAA, 0xBB]);
    assert!(out[2..].iter().all(|&b| b == 0));
}

#[test]
fn test_gf128_store_be_truncates() {
    let block = be("0102030405060708090a0b0c0d0e0f10");
    let mut out = [0u8; 4];
    block.store_be(&mut out);
    assert_eq!(out, [1, 2, 3, 4]);
}

#[test]
fn test_gf128_bit_addresses_integer_view() {
    let block = one();
    assert_eq!(block.bit(127), 1);
    assert_eq!(block.bit(0), 0);

    let last = be("00000000000000000000000000000001");
    assert_eq!(last.bit(0), 1);
    assert_eq!(last.bit(127), 0);
}

#[test]
fn test_gf128_shift_right_once() {
    let mut block = one();
    block.shift_right_once();
    assert_eq!(block, be("40000000000000000000000000000000"));

    let mut last = be("00000000000000000000000000000001");
    last.shift_right_once();
    assert_eq!(last, Gf128Block::zero());
}

#[test]
fn test_gf128_mul_identity_and_zero() {
    for _ in 0..16 {
        let a = random_block();
        assert_eq!(a.mul(&one()), a);
        assert_eq!(one().mul(&a), a);
        assert_eq!(a.mul(&Gf128Block::zero()), Gf128Block::zero());
    }
}

#[test]
fn test_gf128_mul_reduction() {
    // x^127 * x = x^128 = x^7 + x^2 + x + 1, i.e. 0xE1 in the leading byte.
    let x127 = be("00000000000000000000000000000001");
    let x = be("40000000000000000000000000000000");
    assert_eq!(x127.mul(&x), be("e1000000000000000000000000000000"));
}

#[test]
fn test_gf128_mul_commutative() {
    for _ in 0..64 {
        let a = random_block();
        let b = random_block();
        assert_eq!(a.mul(&b), b.mul(&a));
    }
}

#[test]
fn test_gf128_mul_distributes_over_xor() {
    for _ in 0..64 {
        let a = random_block();
        let b = random_block();
        let c = random_block();
        let lhs = a.mul(&b.xor(&c));
        let rhs = a.mul(&b).xor(&a.mul(&c));
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn test_gf128_mul_associative() {
    for _ in 0..16 {
        let a = random_block();
        let b = random_block();
        let c = random_block();
        assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
    }
}

#[test]
fn test_gf128_ghash_known_answer() {
    // GCM test case 2: H = E(K, 0) for the all-zero key, one ciphertext block.
    let h = be("66e94bd4ef8a2c3b884cfa59ca342b2e");
    let c = be("0388dace60b6a392f328c2b971b2fe78");
    let lengths = be("00000000000000000000000000000080");

    let x1 = c.mul(&h);
    let x2 = x1.xor(&lengths).mul(&h);
    assert_eq!(x2, be("f38cbb1ad69223dcc3457ae5b6b0f885"));
}

#[test]
fn test_gf128_lsw_increment_leaves_high_bits() {
    for _ in 0..32 {
        let mut block = random_block();
        let before = block.clone();
        block.lsw_increment();

        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        before.store_be(&mut a);
        block.store_be(&mut b);
        assert_eq!(a[..12], b[..12]);

        let low_before = u32::from_be_bytes([a[12], a[13], a[14], a[15]]);
        let low_after = u32::from_be_bytes([b[12], b[13], b[14], b[15]]);
        assert_eq!(low_after, low_before.wrapping_add(1));
    }
}

#[test]
fn test_gf128_lsw_increment_wraps() {
    let mut block = be("0102030405060708090a0b0cffffffff");
    block.lsw_increment();
    assert_eq!(block, be("0102030405060708090a0b0c00000000"));
}

#[test]
fn test_gf128_lsbits_msbits() {
    let block = be("ffffffffffffffffffffffffffffffff");
    assert_eq!(block.msbits(32), be("ffffffff000000000000000000000000"));
    assert_eq!(block.lsbits(32), be("000000000000000000000000ffffffff"));
    assert_eq!(block.msbits(0), Gf128Block::zero());
    assert_eq!(block.lsbits(128), block);
    assert_eq!(block.msbits(128), block);

    let a = random_block();
    assert_eq!(a.msbits(40).xor(&a.lsbits(88)), a);
}

#[test]
fn test_gf128_xts_double() {
    let mut t = Gf128Block::from_bytes([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    t.xts_double();
    assert_eq!(t.as_bytes()[0], 2);

    let mut top = [0u8; 16];
    top[15] = 0x80;
    let mut t = Gf128Block::from_bytes(top);
    t.xts_double();
    let mut expected = [0u8; 16];
    expected[0] = 0x87;
    assert_eq!(t.as_bytes(), &expected);
}
