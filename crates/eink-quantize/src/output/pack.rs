//! MSB-first N-bit packing of index rows.

use thiserror::Error;

/// Error type for bit packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("unsupported bit depth {0} (expected 1, 2, 4 or 8)")]
    UnsupportedBitDepth(u8),

    #[error("value {value} does not fit in {bits} bits")]
    ValueOverflow { value: u8, bits: u8 },

    #[error("{len} values do not form rows of width {width}")]
    RaggedRows { len: usize, width: usize },
}

/// Pack values into N-bit rows (1, 2, 4 or 8 bits per pixel).
///
/// The first pixel of a byte occupies its most significant bits; each row
/// starts on a fresh byte, so the last byte of a row may be padded with
/// zero bits.
pub fn pack_nbits(values: &[u8], width: usize, bits: u8) -> Result<Vec<u8>, PackError> {
    if !matches!(bits, 1 | 2 | 4 | 8) {
        return Err(PackError::UnsupportedBitDepth(bits));
    }
    if width == 0 || values.len() % width != 0 {
        return Err(PackError::RaggedRows {
            len: values.len(),
            width,
        });
    }
    if bits < 8 {
        let limit = 1u16 << bits;
        if let Some(&value) = values.iter().find(|&&v| v as u16 >= limit) {
            return Err(PackError::ValueOverflow { value, bits });
        }
    } else {
        return Ok(values.to_vec());
    }

    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let mut packed = Vec::with_capacity(bytes_per_row * (values.len() / width));

    for row in values.chunks(width) {
        let mut byte = 0u8;
        for (i, &value) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= value << shift;

            if i % pixels_per_byte == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    Ok(packed)
}

/// Smallest supported bit depth that holds `max_value`.
pub fn min_bit_depth(max_value: u8) -> u8 {
    match max_value {
        0..=1 => 1,
        2..=3 => 2,
        4..=15 => 4,
        _ => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_1bit() {
        let values = [1, 0, 1, 1, 0, 0, 0, 1, 1];
        // 9 pixels, one row: 10110001 1_______
        assert_eq!(pack_nbits(&values, 9, 1).unwrap(), vec![0b1011_0001, 0b1000_0000]);
    }

    #[test]
    fn test_pack_4bit_rows_padded() {
        let values = [6, 1, 2, 3, 4, 5];
        // Two rows of three: [6,1][2,_] [3,4][5,_]
        assert_eq!(pack_nbits(&values, 3, 4).unwrap(), vec![0x61, 0x20, 0x34, 0x50]);
    }

    #[test]
    fn test_pack_2bit() {
        assert_eq!(pack_nbits(&[3, 2, 1, 0], 4, 2).unwrap(), vec![0b1110_0100]);
    }

    #[test]
    fn test_pack_8bit_is_copy() {
        assert_eq!(pack_nbits(&[200, 7], 2, 8).unwrap(), vec![200, 7]);
    }

    #[test]
    fn test_pack_errors() {
        assert_eq!(pack_nbits(&[0], 1, 3), Err(PackError::UnsupportedBitDepth(3)));
        assert_eq!(
            pack_nbits(&[2], 1, 1),
            Err(PackError::ValueOverflow { value: 2, bits: 1 })
        );
        assert_eq!(
            pack_nbits(&[0, 0, 0], 2, 1),
            Err(PackError::RaggedRows { len: 3, width: 2 })
        );
    }

    #[test]
    fn test_min_bit_depth() {
        assert_eq!(min_bit_depth(1), 1);
        assert_eq!(min_bit_depth(3), 2);
        assert_eq!(min_bit_depth(6), 4);
        assert_eq!(min_bit_depth(16), 8);
    }
}
