//! Bit-packed dot bitmap carried by matrix packets

use crate::packet::PacketError;

/// Number of dot rows on the surface
pub const MATRIX_ROWS: usize = 20;

/// Number of dot columns on the surface
pub const MATRIX_COLS: usize = 96;

/// Packed bytes per row (96 dots, one bit each)
pub const PACKED_ROW_BYTES: usize = MATRIX_COLS / 8;

/// Total payload size of a matrix packet
pub const MATRIX_PAYLOAD_BYTES: usize = MATRIX_ROWS * PACKED_ROW_BYTES;

/// The 20×96 binary dot bitmap
///
/// Stored bit-packed exactly as it travels on the wire: 12 bytes per row,
/// MSB first, so bit 7 of a row's first byte is column 0. Dimensions are
/// fixed by the type; a payload of any other shape is rejected before a
/// `DotMatrix` can exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotMatrix {
    rows: [[u8; PACKED_ROW_BYTES]; MATRIX_ROWS],
}

impl Default for DotMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl DotMatrix {
    /// Create an all-dark matrix
    pub const fn new() -> Self {
        Self {
            rows: [[0; PACKED_ROW_BYTES]; MATRIX_ROWS],
        }
    }

    /// Unpack a matrix from a wire payload
    ///
    /// The payload must be exactly [`MATRIX_PAYLOAD_BYTES`] long.
    pub fn from_payload(payload: &[u8]) -> Result<Self, PacketError> {
        if payload.len() != MATRIX_PAYLOAD_BYTES {
            return Err(PacketError::PayloadLength);
        }

        let mut matrix = Self::new();
        for (row, chunk) in matrix.rows.iter_mut().zip(payload.chunks_exact(PACKED_ROW_BYTES)) {
            row.copy_from_slice(chunk);
        }
        Ok(matrix)
    }

    /// Read one dot
    ///
    /// Out-of-range coordinates read as dark, so iteration mistakes can
    /// never turn into out-of-bounds access.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= MATRIX_ROWS || col >= MATRIX_COLS {
            return false;
        }
        let byte = self.rows[row][col / 8];
        byte & (0x80 >> (col % 8)) != 0
    }

    /// Set one dot
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, lit: bool) {
        if row >= MATRIX_ROWS || col >= MATRIX_COLS {
            return;
        }
        let mask = 0x80 >> (col % 8);
        if lit {
            self.rows[row][col / 8] |= mask;
        } else {
            self.rows[row][col / 8] &= !mask;
        }
    }

    /// Write this matrix into a wire payload buffer
    ///
    /// The buffer must be at least [`MATRIX_PAYLOAD_BYTES`] long. Returns
    /// the number of bytes written.
    pub fn write_payload(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        if buffer.len() < MATRIX_PAYLOAD_BYTES {
            return Err(PacketError::BufferTooSmall);
        }
        for (row, chunk) in self.rows.iter().zip(buffer.chunks_exact_mut(PACKED_ROW_BYTES)) {
            chunk.copy_from_slice(row);
        }
        Ok(MATRIX_PAYLOAD_BYTES)
    }

    /// Count of lit dots
    pub fn lit_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_is_dark() {
        let matrix = DotMatrix::new();
        assert_eq!(matrix.lit_count(), 0);
        assert!(!matrix.get(0, 0));
        assert!(!matrix.get(19, 95));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut matrix = DotMatrix::new();
        matrix.set(3, 17, true);
        assert!(matrix.get(3, 17));
        assert!(!matrix.get(3, 16));
        assert!(!matrix.get(3, 18));
        assert!(!matrix.get(4, 17));

        matrix.set(3, 17, false);
        assert_eq!(matrix.lit_count(), 0);
    }

    #[test]
    fn test_msb_first_bit_order() {
        // Bit 7 of a row's first payload byte is column 0
        let mut payload = [0u8; MATRIX_PAYLOAD_BYTES];
        payload[0] = 0b1000_0000;
        payload[1] = 0b0000_0001; // column 15

        let matrix = DotMatrix::from_payload(&payload).unwrap();
        assert!(matrix.get(0, 0));
        assert!(matrix.get(0, 15));
        assert!(!matrix.get(0, 1));
        assert_eq!(matrix.lit_count(), 2);
    }

    #[test]
    fn test_payload_roundtrip() {
        let mut matrix = DotMatrix::new();
        matrix.set(0, 0, true);
        matrix.set(7, 42, true);
        matrix.set(19, 95, true);

        let mut payload = [0u8; MATRIX_PAYLOAD_BYTES];
        let written = matrix.write_payload(&mut payload).unwrap();
        assert_eq!(written, MATRIX_PAYLOAD_BYTES);

        let parsed = DotMatrix::from_payload(&payload).unwrap();
        assert_eq!(parsed, matrix);
    }

    #[test]
    fn test_wrong_payload_length_rejected() {
        let short = [0u8; MATRIX_PAYLOAD_BYTES - 1];
        assert_eq!(DotMatrix::from_payload(&short), Err(PacketError::PayloadLength));

        let long = [0u8; MATRIX_PAYLOAD_BYTES + 1];
        assert_eq!(DotMatrix::from_payload(&long), Err(PacketError::PayloadLength));
    }

    #[test]
    fn test_out_of_range_access_is_guarded() {
        let mut matrix = DotMatrix::new();
        matrix.set(MATRIX_ROWS, 0, true);
        matrix.set(0, MATRIX_COLS, true);
        assert_eq!(matrix.lit_count(), 0);
        assert!(!matrix.get(MATRIX_ROWS, 0));
        assert!(!matrix.get(0, MATRIX_COLS));
    }
}
