//! Table-driven CRC32 over a caller-chosen reflected polynomial.
//!
//! Used for content ids, never for integrity or authentication.

/// Reflected IEEE 802.3 polynomial.
pub const IEEE_POLY: u32 = 0xEDB8_8320;

/// Polynomial used for post and reply content ids.
pub const CONTENT_ID_POLY: u32 = 0xD582_8281;

/// A 256-entry lookup table for one polynomial.
pub struct Crc32Table([u32; 256]);

impl Crc32Table {
    pub const fn new(poly: u32) -> Self {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut bit = 0;
            while bit < 8 {
                crc = if crc & 1 == 1 { (crc >> 1) ^ poly } else { crc >> 1 };
                bit += 1;
            }
            table[i] = crc;
            i += 1;
        }
        Self(table)
    }

    pub fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = !0u32;
        for &byte in data {
            crc = self.0[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        !crc
    }
}

static CONTENT_ID_TABLE: Crc32Table = Crc32Table::new(CONTENT_ID_POLY);

/// CRC32 of `data` under [`CONTENT_ID_POLY`].
pub fn crc32_content(data: &[u8]) -> u32 {
    CONTENT_ID_TABLE.checksum(data)
}
