//! Structural hash over a block's property types.
//!
//! Persisted slot links and values are keyed by this hash. When the set or
//! order of property type ids changes the hash changes, and stale slot data
//! must be discarded. Changes inside a semantic type's implementation are not
//! detected.

use crate::model::Property;

const CRC32_TABLE: [u32; 256] = crc32_table();

const fn crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

/// CRC-32 (IEEE) of the UTF-8 bytes of `s`, reinterpreted as `i32`.
pub fn string_hash(s: &str) -> i32 {
    let mut crc = !0u32;
    for &byte in s.as_bytes() {
        crc = CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    (!crc) as i32
}

/// `hash = hash * 3 ^ string_hash(type id)` over properties, in order.
pub fn compute_slot_hash(properties: &[Property]) -> i32 {
    properties.iter().fold(0i32, |hash, property| {
        hash.wrapping_mul(3) ^ string_hash(property.semantics.as_str())
    })
}
