//! Little endian reads and writes at absolute byte offsets of a region.
//!
//! This is the only place row code touches raw offsets, everything above goes through
//! the row view. Out of range offsets panic through slice indexing, there is no
//! unchecked access.
use bytes::{Buf, BufMut};
use std::mem::size_of;

pub fn get_boolean(data: &[u8], offset: usize) -> bool {
    data[offset] != 0
}

pub fn get_byte(data: &[u8], offset: usize) -> i8 {
    data[offset] as i8
}

pub fn get_short(data: &[u8], offset: usize) -> i16 {
    (&data[offset..offset + size_of::<i16>()]).get_i16_le()
}

pub fn get_int(data: &[u8], offset: usize) -> i32 {
    (&data[offset..offset + size_of::<i32>()]).get_i32_le()
}

pub fn get_long(data: &[u8], offset: usize) -> i64 {
    (&data[offset..offset + size_of::<i64>()]).get_i64_le()
}

pub fn get_float(data: &[u8], offset: usize) -> f32 {
    (&data[offset..offset + size_of::<f32>()]).get_f32_le()
}

pub fn get_double(data: &[u8], offset: usize) -> f64 {
    (&data[offset..offset + size_of::<f64>()]).get_f64_le()
}

pub fn put_boolean(data: &mut [u8], offset: usize, value: bool) {
    data[offset] = value as u8;
}

pub fn put_byte(data: &mut [u8], offset: usize, value: i8) {
    data[offset] = value as u8;
}

pub fn put_short(data: &mut [u8], offset: usize, value: i16) {
    (&mut data[offset..offset + size_of::<i16>()]).put_i16_le(value);
}

pub fn put_int(data: &mut [u8], offset: usize, value: i32) {
    (&mut data[offset..offset + size_of::<i32>()]).put_i32_le(value);
}

pub fn put_long(data: &mut [u8], offset: usize, value: i64) {
    (&mut data[offset..offset + size_of::<i64>()]).put_i64_le(value);
}

pub fn put_float(data: &mut [u8], offset: usize, value: f32) {
    (&mut data[offset..offset + size_of::<f32>()]).put_f32_le(value);
}

pub fn put_double(data: &mut [u8], offset: usize, value: f64) {
    (&mut data[offset..offset + size_of::<f64>()]).put_f64_le(value);
}

/// Copies `length` bytes between two regions, which may be the same allocation only
/// through separate borrows.
pub fn copy_memory(
    src: &[u8],
    src_offset: usize,
    dest: &mut [u8],
    dest_offset: usize,
    length: usize,
) {
    dest[dest_offset..dest_offset + length].copy_from_slice(&src[src_offset..src_offset + length]);
}
