//! Monochrome bitmaps
//!
//! Rows are stored top to bottom, most significant bit first. Each row is
//! padded to a whole byte.

/// A 1-bit image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap {
    /// Width in pixels
    pub width: u8,
    /// Height in pixels
    pub height: u8,
    /// Packed rows, [`Bitmap::stride`] bytes each
    pub data: &'static [u8],
}

impl Bitmap {
    /// Wrap packed row data
    pub const fn new(width: u8, height: u8, data: &'static [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Bytes per row
    pub const fn stride(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Whether pixel `(x, y)` is lit; missing data reads as unlit
    pub fn get(&self, x: u8, y: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.stride() + (x / 8) as usize;
        self.data
            .get(idx)
            .is_some_and(|b| b & (0x80 >> (x % 8)) != 0)
    }
}

/// Battery icon, 16x8, rows 2..=5 carry the charge bars
const fn accum(bars_lo: u8, bars_hi: u8) -> [u8; 16] {
    [
        0xFF, 0xFE, //
        0x80, 0x02, //
        bars_lo, bars_hi, //
        bars_lo, bars_hi, //
        bars_lo, bars_hi, //
        bars_lo, bars_hi, //
        0x80, 0x02, //
        0xFF, 0xFE, //
    ]
}

static ACCUM_0: [u8; 16] = accum(0x80, 0x03);
static ACCUM_1: [u8; 16] = accum(0xB0, 0x03);
static ACCUM_2: [u8; 16] = accum(0xB6, 0x03);
static ACCUM_3: [u8; 16] = accum(0xB6, 0xC3);
static ACCUM_4: [u8; 16] = accum(0xB6, 0xDB);

/// Battery icons indexed by charge level, empty to full
pub static ACCUM: [Bitmap; 5] = [
    Bitmap::new(16, 8, &ACCUM_0),
    Bitmap::new(16, 8, &ACCUM_1),
    Bitmap::new(16, 8, &ACCUM_2),
    Bitmap::new(16, 8, &ACCUM_3),
    Bitmap::new(16, 8, &ACCUM_4),
];
