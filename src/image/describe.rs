use std::fmt::{self, Display};

use super::Bitmap;
use crate::color::RGBColorFormat;

/// Human readable listing of the file header, DIB header and palette
pub struct HeaderReport<'a> {
    bitmap: &'a Bitmap,
}

impl<'a> HeaderReport<'a> {
    pub fn new(bitmap: &'a Bitmap) -> Self {
        Self { bitmap }
    }

    fn write_file_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bitmap = self.bitmap;
        let (first_reserved, second_reserved) = bitmap.reserved();
        writeln!(f, "=========== Header ===========")?;
        writeln!(
            f,
            "identifier: {}",
            String::from_utf8_lossy(&bitmap.identifier())
        )?;
        writeln!(f, "size: {}", bitmap.file_size())?;
        writeln!(f, "reserved 1: {}", first_reserved)?;
        writeln!(f, "reserved 2: {}", second_reserved)?;
        writeln!(f, "data offset: {}", bitmap.data_offset())
    }

    fn write_dib_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bitmap = self.bitmap;
        writeln!(f, "=========== DIB Header ===========")?;
        writeln!(f, "header size: {}", bitmap.dib_header_size())?;
        writeln!(f, "width: {}", bitmap.width())?;
        writeln!(f, "height: {}", bitmap.height())?;
        writeln!(f, "planes: {}", bitmap.planes())?;
        writeln!(f, "bits per pixel: {}", bitmap.bits_per_pixel())?;
        writeln!(f, "compression: {}", bitmap.compression())?;
        writeln!(f, "compressed image size: {}", bitmap.image_size())?;
        writeln!(
            f,
            "horizontal pixels per meter: {}",
            bitmap.x_pixels_per_meter()
        )?;
        writeln!(
            f,
            "vertical pixels per meter: {}",
            bitmap.y_pixels_per_meter()
        )?;
        writeln!(f, "colors used: {}", bitmap.colors_used())?;
        writeln!(f, "important colors: {}", bitmap.important_colors())
    }

    fn write_palette(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "=========== Color Palette ===========")?;
        for entry in self.bitmap.palette_bytes().chunks_exact(3) {
            let color = RGBColorFormat::from_bgr(entry);
            write!(
                f,
                "\nred: {}, green: {}, blue: {}",
                color.red, color.green, color.blue
            )?;
        }
        Ok(())
    }
}

impl Display for HeaderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_file_header(f)?;
        self.write_dib_header(f)?;
        self.write_palette(f)
    }
}

impl Bitmap {
    pub fn describe(&self) -> String {
        HeaderReport::new(self).to_string()
    }
}
