//! Legacy SHA-1 digest engine for password breach checking.
//!
//! The range-query provider indexes passwords by the SHA-1 of the bytes its
//! reference clients produce, and those clients encode text with a legacy
//! scheme rather than real UTF-8: CRLF pairs fold to LF, and each UTF-16
//! code unit is encoded on its own with a three-case variable-width layout.
//! For everything in the Basic Multilingual Plane this matches UTF-8, but a
//! supplementary-plane character becomes two 3-byte surrogate encodings
//! (CESU-8) instead of one 4-byte sequence. Swapping in a stock SHA-1 over
//! UTF-8 bytes would silently change those digests, so the whole pipeline is
//! implemented here, bit for bit.
//!
//! No I/O and no retained state: text in, digest out.

/// Initial SHA-1 state words (h0..h4).
const H: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// Hex lookup table for digest formatting.
const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Length of a hex-encoded digest (20 bytes = 40 hex characters).
pub const DIGEST_HEX_LEN: usize = 40;

/// SHA-1 round constant for step `t`.
#[inline]
fn k(t: usize) -> u32 {
    match t {
        0..=19 => 0x5A827999,
        20..=39 => 0x6ED9EBA1,
        40..=59 => 0x8F1BBCDC,
        _ => 0xCA62C1D6,
    }
}

/// SHA-1 nonlinear function for step `t`: choice, parity, majority, parity.
#[inline]
fn f(t: usize, b: u32, c: u32, d: u32) -> u32 {
    match t {
        0..=19 => (b & c) | (!b & d),
        40..=59 => (b & c) | (b & d) | (c & d),
        _ => b ^ c ^ d,
    }
}

/// Encodes `text` the way the provider's reference clients do.
///
/// CRLF pairs fold to LF before encoding. Each UTF-16 code unit then maps to
/// one byte below 0x80, two bytes (`110xxxxx 10xxxxxx`) below 0x800, and
/// three bytes (`1110xxxx 10xxxxxx 10xxxxxx`) otherwise. Surrogate halves
/// are encoded individually, so a supplementary-plane character yields six
/// bytes, not four.
fn encode_legacy(text: &str) -> Vec<u8> {
    let folded;
    let text = if text.contains("\r\n") {
        folded = text.replace("\r\n", "\n");
        folded.as_str()
    } else {
        text
    };

    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0..=0x7F => out.push(unit as u8),
            0x80..=0x7FF => {
                out.push((unit >> 6) as u8 | 0xC0);
                out.push((unit & 0x3F) as u8 | 0x80);
            }
            _ => {
                out.push((unit >> 12) as u8 | 0xE0);
                out.push(((unit >> 6) & 0x3F) as u8 | 0x80);
                out.push((unit & 0x3F) as u8 | 0x80);
            }
        }
    }

    out
}

/// Appends Merkle–Damgård padding: a single 0x80 marker byte, zeros to
/// 56 mod 64, then the message length in bits as a big-endian u64.
fn pad(mut msg: Vec<u8>) -> Vec<u8> {
    let bit_len = (msg.len() as u64) * 8;
    msg.push(0x80);
    while msg.len() % 64 != 56 {
        msg.push(0);
    }
    msg.extend_from_slice(&bit_len.to_be_bytes());

    msg
}

/// Computes the 20-byte digest of `text` under the legacy encoding.
pub fn digest(text: &str) -> [u8; 20] {
    let msg = pad(encode_legacy(text));

    let mut h = H;
    let mut w = [0u32; 80];

    for block in msg.chunks_exact(64) {
        for (i, word) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes(word.try_into().unwrap());
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let (mut a, mut b, mut c, mut d, mut e) = (h[0], h[1], h[2], h[3], h[4]);

        for t in 0..80 {
            let step = a
                .rotate_left(5)
                .wrapping_add(f(t, b, c, d))
                .wrapping_add(e)
                .wrapping_add(w[t])
                .wrapping_add(k(t));
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = step;
        }

        h[0] = h[0].wrapping_add(a);
        h[1] = h[1].wrapping_add(b);
        h[2] = h[2].wrapping_add(c);
        h[3] = h[3].wrapping_add(d);
        h[4] = h[4].wrapping_add(e);
    }

    let mut out = [0u8; 20];
    for (i, word) in h.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
    }

    out
}

/// Returns the digest of `text` as a 40-character uppercase hex string.
pub fn hex_digest(text: &str) -> String {
    let mut out = String::with_capacity(DIGEST_HEX_LEN);
    for byte in digest(text) {
        out.push(HEX_CHARS[(byte >> 4) as usize] as char);
        out.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
    }

    out
}
