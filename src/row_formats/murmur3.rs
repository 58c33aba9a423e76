//! 32 bit Murmur3 (x86 variant) over a row's bytes, taken four bytes at a time as little
//! endian integers. Any trailing bytes are mixed in one at a time as sign extended integers.
use crate::memory::platform;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

fn mix_h1(h1: u32, k1: u32) -> u32 {
    (h1 ^ k1)
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

fn fmix(mut h1: u32, length: usize) -> u32 {
    h1 ^= length as u32;
    h1 ^= h1 >> 16;
    h1 = h1.wrapping_mul(0x85eb_ca6b);
    h1 ^= h1 >> 13;
    h1 = h1.wrapping_mul(0xc2b2_ae35);
    h1 ^= h1 >> 16;
    h1
}

pub fn hash_bytes(data: &[u8], seed: u32) -> i32 {
    let aligned = data.len() - data.len() % 4;

    let mut h1 = seed;
    for offset in (0..aligned).step_by(4) {
        h1 = mix_h1(h1, mix_k1(platform::get_int(data, offset) as u32));
    }
    for offset in aligned..data.len() {
        h1 = mix_h1(h1, mix_k1(platform::get_byte(data, offset) as i32 as u32));
    }

    fmix(h1, data.len()) as i32
}
