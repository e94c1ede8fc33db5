use std::sync::mpsc;
use std::sync::Arc;

use threadpool::ThreadPool;

use super::{Bitmap, PixelLayout};
use crate::error::Error;
use crate::Result;

impl Bitmap {
    /// Byte offset of the pixel at image coordinates `(x, y)`.
    ///
    /// `(0, 0)` is the top left pixel. Rows are stored bottom to top, so the
    /// row is flipped before the offset is computed. Both coordinates must be
    /// strictly smaller than the image dimensions, and the bitmap must hold
    /// uncompressed 24 or 32 bit pixels, whose pixel array the decoder has
    /// already bounds checked.
    pub fn pixel_offset(&self, x: u32, y: u32) -> Result<usize> {
        let layout = self.pixel_layout()?;
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let storage_row = (self.height - y - 1) as usize;
        let pixel_index = storage_row * self.width as usize + x as usize;
        Ok(self.data_offset + pixel_index * layout.bytes_per_pixel())
    }

    /// Checks that pixels can be read and mutated, before anything is touched.
    pub fn pixel_layout(&self) -> Result<PixelLayout> {
        let layout = PixelLayout::from_bits_per_pixel(self.bits_per_pixel)?;
        if self.compression != 0 {
            return Err(Error::UnsupportedCompression(self.compression));
        }
        Ok(layout)
    }

    /// the channels of one pixel, blue first
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[u8]> {
        let offset = self.pixel_offset(x, y)?;
        Ok(&self.data[offset..offset + self.bytes_per_pixel()])
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Result<&mut [u8]> {
        let offset = self.pixel_offset(x, y)?;
        let bytes_per_pixel = self.bytes_per_pixel();
        Ok(&mut self.data[offset..offset + bytes_per_pixel])
    }

    /// Visit every pixel once, row by row from the top left.
    ///
    /// The visitor receives the pixel's channels in blue, green, red (, alpha)
    /// order. Unsupported pixel formats and compressed bitmaps are rejected
    /// before the first pixel is visited.
    pub fn for_each_pixel<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut [u8]),
    {
        let bytes_per_pixel = self.pixel_layout()?.bytes_per_pixel();
        for y in 0..self.height {
            for x in 0..self.width {
                let offset = self.pixel_offset(x, y)?;
                visit(&mut self.data[offset..offset + bytes_per_pixel]);
            }
        }
        Ok(())
    }

    /// Visit every pixel once, spreading bands of whole rows over `threadpool`.
    ///
    /// Each band is processed on a private copy and all bands are written
    /// back only after every one of them came back, so a panicking visitor
    /// leaves the bitmap unchanged. Pixels are not visited in any particular
    /// order.
    pub fn for_each_pixel_parallel<F>(&mut self, threadpool: &ThreadPool, visit: F) -> Result<()>
    where
        F: Fn(&mut [u8]) + Send + Sync + 'static,
    {
        let bytes_per_pixel = self.pixel_layout()?.bytes_per_pixel();
        let row_length = self.width as usize * bytes_per_pixel;
        let height = self.height as usize;
        let workers = threadpool.max_count().max(1);
        let band_length = height.div_ceil(workers) * row_length;
        let pixel_array = self.data_offset..self.data_offset + height * row_length;

        let visit = Arc::new(visit);
        let (sender, receiver) = mpsc::channel();
        let mut expected = 0;
        for (index, band) in self.data[pixel_array.clone()]
            .chunks(band_length)
            .enumerate()
        {
            let mut band = band.to_vec();
            let visit = Arc::clone(&visit);
            let sender = sender.clone();
            threadpool.execute(move || {
                band.chunks_exact_mut(bytes_per_pixel)
                    .for_each(|pixel| (*visit)(pixel));
                // the receiver only disappears if the caller is gone
                let _ = sender.send((index, band));
            });
            expected += 1;
        }
        drop(sender);

        let bands: Vec<(usize, Vec<u8>)> = receiver.iter().collect();
        if bands.len() != expected {
            return Err(Error::IncompleteTraversal {
                completed: bands.len(),
                expected,
            });
        }
        for (index, band) in bands {
            let start = pixel_array.start + index * band_length;
            self.data[start..start + band.len()].copy_from_slice(&band);
        }
        Ok(())
    }
}
