use super::{Bitmap, PixelLayout, Span, FILE_HEADER_SIZE, MIN_BITMAP_SIZE, MIN_DIB_HEADER_SIZE};
use crate::binary_stream::FieldReader;
use crate::error::Error;
use crate::Result;

const DATA_OFFSET_FIELD: usize = 10;
const DIB_HEADER_SIZE_FIELD: usize = 14;
const WIDTH_FIELD: usize = 18;
const HEIGHT_FIELD: usize = 22;
const PLANES_FIELD: usize = 26;
const BITS_PER_PIXEL_FIELD: usize = 28;
const COMPRESSION_FIELD: usize = 30;
const IMAGE_SIZE_FIELD: usize = 34;
const X_PIXELS_PER_METER_FIELD: usize = 38;
const Y_PIXELS_PER_METER_FIELD: usize = 42;
const COLORS_USED_FIELD: usize = 46;
const IMPORTANT_COLORS_FIELD: usize = 50;

const NO_COMPRESSION: u32 = 0;

impl Bitmap {
    /// Parse the file header and DIB header of `data`.
    ///
    /// Either every field is decoded and checked, or an error is returned;
    /// there is no partially initialized bitmap. The `BM` identifier is not
    /// checked, see [`Bitmap::has_bitmap_signature`].
    pub fn decode(data: Vec<u8>) -> Result<Bitmap> {
        let reader = FieldReader::new(&data);
        reader.require(0, MIN_BITMAP_SIZE)?;

        let dib_header_size = reader.u32_at(DIB_HEADER_SIZE_FIELD)?;
        if dib_header_size < MIN_DIB_HEADER_SIZE {
            return Err(Error::InvalidDibHeader(dib_header_size));
        }
        let dib_header = Span::new(FILE_HEADER_SIZE, dib_header_size as usize);
        reader.require(dib_header.start, dib_header.length)?;
        let palette = Span::new(MIN_BITMAP_SIZE, dib_header.end() - MIN_BITMAP_SIZE);

        let data_offset = reader.u32_at(DATA_OFFSET_FIELD)?;
        if (data_offset as usize) < dib_header.end() {
            return Err(Error::InvalidDataOffset {
                data_offset,
                header_end: dib_header.end(),
            });
        }
        let data_offset = data_offset as usize;
        reader.require(data_offset, 0)?;

        let width = read_dimension(&reader, WIDTH_FIELD, "width")?;
        let height = read_dimension(&reader, HEIGHT_FIELD, "height")?;
        let bits_per_pixel = reader.u16_at(BITS_PER_PIXEL_FIELD)?;
        let compression = reader.u32_at(COMPRESSION_FIELD)?;

        if compression == NO_COMPRESSION {
            if let Ok(layout) = PixelLayout::from_bits_per_pixel(bits_per_pixel) {
                let pixel_array_length =
                    pixel_array_length(width, height, layout).unwrap_or(usize::MAX);
                reader.require(data_offset, pixel_array_length)?;
            }
        }

        Ok(Bitmap {
            header: Span::new(0, FILE_HEADER_SIZE),
            dib_header,
            palette,
            data_offset,
            width,
            height,
            planes: reader.u16_at(PLANES_FIELD)?,
            bits_per_pixel,
            compression,
            image_size: reader.u32_at(IMAGE_SIZE_FIELD)?,
            x_pixels_per_meter: reader.u32_at(X_PIXELS_PER_METER_FIELD)?,
            y_pixels_per_meter: reader.u32_at(Y_PIXELS_PER_METER_FIELD)?,
            colors_used: reader.u32_at(COLORS_USED_FIELD)?,
            important_colors: reader.u32_at(IMPORTANT_COLORS_FIELD)?,
            data,
        })
    }
}

/// Width and height are stored signed; only positive values are supported.
/// A negative height marks a top-down bitmap.
fn read_dimension(reader: &FieldReader, offset: usize, name: &str) -> Result<u32> {
    let value = reader.i32_at(offset)?;
    match value {
        v if v > 0 => Ok(v as u32),
        0 => Err(Error::UnsupportedVariant(format!("{} is zero", name))),
        v if name == "height" => Err(Error::UnsupportedVariant(format!(
            "top-down bitmap with height {}",
            v
        ))),
        v => Err(Error::UnsupportedVariant(format!("{} is negative ({})", name, v))),
    }
}

/// tightly packed rows, `None` on overflow
fn pixel_array_length(width: u32, height: u32, layout: PixelLayout) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(layout.bytes_per_pixel())
}
