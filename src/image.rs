use std::ops::Range;

use crate::binary_stream::read_unsigned_le;
use crate::error::Error;
use crate::Result;

pub mod accessor;
pub mod decoder;
pub mod describe;
pub mod transformer;

/// size of the file header preceding the DIB header
pub const FILE_HEADER_SIZE: usize = 14;
/// size of the BITMAPINFOHEADER, the smallest DIB header this crate reads
pub const MIN_DIB_HEADER_SIZE: u32 = 40;
/// file header plus the smallest DIB header
pub const MIN_BITMAP_SIZE: usize = FILE_HEADER_SIZE + MIN_DIB_HEADER_SIZE as usize;

const BITMAP_SIGNATURE: [u8; 2] = *b"BM";
const DEFAULT_PIXELS_PER_METER: u32 = 2835;

/// A half-open byte range `[start, start + length)` inside a bitmap buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Channel layout of a pixel that can be read and mutated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 24 bits: blue, green, red
    Bgr,
    /// 32 bits: blue, green, red, alpha
    Bgra,
}

impl PixelLayout {
    pub fn from_bits_per_pixel(bits_per_pixel: u16) -> Result<Self> {
        match bits_per_pixel {
            24 => Ok(Self::Bgr),
            32 => Ok(Self::Bgra),
            other => Err(Error::UnsupportedPixelFormat(other)),
        }
    }

    pub fn bits_per_pixel(&self) -> u16 {
        match self {
            Self::Bgr => 24,
            Self::Bgra => 32,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr => 3,
            Self::Bgra => 4,
        }
    }
}

/// A decoded bitmap: the complete file buffer plus the metadata parsed from it.
///
/// The pixel array is never copied out of the buffer. All pixel access goes
/// through offsets into `data`, which is only replaced wholesale by
/// [`Bitmap::deep_copy`].
#[derive(Debug)]
pub struct Bitmap {
    data: Vec<u8>,
    header: Span,
    dib_header: Span,
    palette: Span,
    data_offset: usize,
    width: u32,
    height: u32,
    planes: u16,
    bits_per_pixel: u16,
    compression: u32,
    image_size: u32,
    x_pixels_per_meter: u32,
    y_pixels_per_meter: u32,
    colors_used: u32,
    important_colors: u32,
}

impl Bitmap {
    /// Create a black, uncompressed bitmap with a 40 byte DIB header.
    pub fn blank(width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        let pixel_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(layout.bytes_per_pixel()))
            .filter(|&bytes| bytes <= (u32::MAX as usize - MIN_BITMAP_SIZE))
            .ok_or_else(|| {
                Error::UnsupportedVariant(format!("{}x{} pixels do not fit", width, height))
            })?;
        let file_size = MIN_BITMAP_SIZE + pixel_bytes;
        let mut data = Vec::with_capacity(file_size);
        data.extend_from_slice(&BITMAP_SIGNATURE);
        data.extend_from_slice(&(file_size as u32).to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&(MIN_BITMAP_SIZE as u32).to_le_bytes());
        data.extend_from_slice(&MIN_DIB_HEADER_SIZE.to_le_bytes());
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data.extend_from_slice(&1_u16.to_le_bytes());
        data.extend_from_slice(&layout.bits_per_pixel().to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
        data.extend_from_slice(&DEFAULT_PIXELS_PER_METER.to_le_bytes());
        data.extend_from_slice(&DEFAULT_PIXELS_PER_METER.to_le_bytes());
        data.extend_from_slice(&[0; 8]);
        data.resize(file_size, 0);
        Self::decode(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// the two identifying bytes, usually `BM`
    pub fn identifier(&self) -> [u8; 2] {
        [self.data[0], self.data[1]]
    }

    pub fn has_bitmap_signature(&self) -> bool {
        self.identifier() == BITMAP_SIGNATURE
    }

    pub fn file_size(&self) -> u32 {
        read_unsigned_le(&self.data[2..6])
    }

    pub fn reserved(&self) -> (u16, u16) {
        (
            read_unsigned_le(&self.data[6..8]) as u16,
            read_unsigned_le(&self.data[8..10]) as u16,
        )
    }

    pub fn header_span(&self) -> Span {
        self.header
    }

    pub fn dib_header_span(&self) -> Span {
        self.dib_header
    }

    pub fn palette_span(&self) -> Span {
        self.palette
    }

    pub fn palette_bytes(&self) -> &[u8] {
        &self.data[self.palette.range()]
    }

    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    pub fn dib_header_size(&self) -> u32 {
        self.dib_header.length as u32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn planes(&self) -> u16 {
        self.planes
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// whole bytes per pixel, 0 for depths below 8 bits
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel / 8)
    }

    pub fn compression(&self) -> u32 {
        self.compression
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn x_pixels_per_meter(&self) -> u32 {
        self.x_pixels_per_meter
    }

    pub fn y_pixels_per_meter(&self) -> u32 {
        self.y_pixels_per_meter
    }

    pub fn colors_used(&self) -> u32 {
        self.colors_used
    }

    pub fn important_colors(&self) -> u32 {
        self.important_colors
    }

    /// Duplicate the buffer and decode the copy again.
    ///
    /// The copy shares nothing with `self`, so transforms applied to one of
    /// them never show up in the other.
    pub fn deep_copy(&self) -> Result<Bitmap> {
        Self::decode(self.data.clone())
    }
}
