use clap::builder::PossibleValue;
use clap::ValueEnum;
use threadpool::ThreadPool;

use super::Bitmap;
use crate::color::{GrayscaleMethod, RGBColorFormat, BLUE_INDEX, GREEN_INDEX, RED_INDEX};
use crate::Result;

/// A per-pixel color transform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTransform {
    /// keep red only
    IsolateRed,
    /// keep green only
    IsolateGreen,
    /// keep blue only
    IsolateBlue,
    /// set all three color channels to one gray intensity
    Grayscale(GrayscaleMethod),
}

impl ValueEnum for ColorTransform {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::IsolateRed,
            Self::IsolateGreen,
            Self::IsolateBlue,
            Self::Grayscale(GrayscaleMethod::Luminosity),
            Self::Grayscale(GrayscaleMethod::Average),
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::IsolateRed => Some(PossibleValue::new("red")),
            Self::IsolateGreen => Some(PossibleValue::new("green")),
            Self::IsolateBlue => Some(PossibleValue::new("blue")),
            Self::Grayscale(GrayscaleMethod::Luminosity) => Some(PossibleValue::new("gray")),
            Self::Grayscale(GrayscaleMethod::Average) => {
                Some(PossibleValue::new("gray-average"))
            }
        }
    }
}

impl ColorTransform {
    pub const ALL: [ColorTransform; 4] = [
        Self::IsolateRed,
        Self::IsolateGreen,
        Self::IsolateBlue,
        Self::Grayscale(GrayscaleMethod::Luminosity),
    ];

    /// appended to the input file stem when naming the output
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::IsolateRed => "red",
            Self::IsolateGreen => "green",
            Self::IsolateBlue => "blue",
            Self::Grayscale(GrayscaleMethod::Luminosity) => "gray",
            Self::Grayscale(GrayscaleMethod::Average) => "gray_average",
        }
    }

    /// Mutate one pixel given in blue, green, red (, alpha) order.
    /// The alpha channel is never touched.
    pub fn apply(&self, pixel: &mut [u8]) {
        match self {
            Self::IsolateRed => {
                pixel[BLUE_INDEX] = 0;
                pixel[GREEN_INDEX] = 0;
            }
            Self::IsolateGreen => {
                pixel[BLUE_INDEX] = 0;
                pixel[RED_INDEX] = 0;
            }
            Self::IsolateBlue => {
                pixel[GREEN_INDEX] = 0;
                pixel[RED_INDEX] = 0;
            }
            Self::Grayscale(method) => {
                let gray = method.intensity(&RGBColorFormat::from_bgr(pixel));
                pixel[BLUE_INDEX] = gray;
                pixel[GREEN_INDEX] = gray;
                pixel[RED_INDEX] = gray;
            }
        }
    }
}

pub struct TransformationOptions {
    pub number_of_threads: usize,
}

impl Default for TransformationOptions {
    fn default() -> Self {
        Self {
            number_of_threads: 1,
        }
    }
}

/// Applies color transforms to independent copies of a bitmap
pub struct BitmapTransformer<'a> {
    options: &'a TransformationOptions,
    threadpool: Option<&'a ThreadPool>,
}

impl<'a> BitmapTransformer<'a> {
    pub fn new(options: &'a TransformationOptions, threadpool: Option<&'a ThreadPool>) -> Self {
        BitmapTransformer {
            options,
            threadpool,
        }
    }

    fn parallel_threadpool(&self) -> Option<&'a ThreadPool> {
        if self.options.number_of_threads > 1 {
            self.threadpool.filter(|pool| pool.max_count() > 1)
        } else {
            None
        }
    }

    /// Returns a transformed deep copy, `bitmap` itself is left untouched.
    pub fn transform(&self, bitmap: &Bitmap, transform: ColorTransform) -> Result<Bitmap> {
        let mut output = bitmap.deep_copy()?;
        match self.parallel_threadpool() {
            Some(threadpool) => {
                output.for_each_pixel_parallel(threadpool, move |pixel| transform.apply(pixel))?
            }
            None => output.for_each_pixel(|pixel| transform.apply(pixel))?,
        }
        Ok(output)
    }
}

fn transform_sequentially(bitmap: &Bitmap, transform: ColorTransform) -> Result<Bitmap> {
    let options = TransformationOptions::default();
    BitmapTransformer::new(&options, None).transform(bitmap, transform)
}

pub fn isolate_red(bitmap: &Bitmap) -> Result<Bitmap> {
    transform_sequentially(bitmap, ColorTransform::IsolateRed)
}

pub fn isolate_green(bitmap: &Bitmap) -> Result<Bitmap> {
    transform_sequentially(bitmap, ColorTransform::IsolateGreen)
}

pub fn isolate_blue(bitmap: &Bitmap) -> Result<Bitmap> {
    transform_sequentially(bitmap, ColorTransform::IsolateBlue)
}

pub fn grayscale(bitmap: &Bitmap, method: GrayscaleMethod) -> Result<Bitmap> {
    transform_sequentially(bitmap, ColorTransform::Grayscale(method))
}

#[cfg(test)]
mod test {
    use clap::ValueEnum;
    use threadpool::ThreadPool;

    use super::{
        grayscale, isolate_blue, isolate_green, isolate_red, BitmapTransformer, ColorTransform,
        TransformationOptions,
    };
    use crate::color::GrayscaleMethod;
    use crate::error::Error;
    use crate::image::decoder::test::TestHeader;
    use crate::image::{Bitmap, PixelLayout};

    fn colorful(layout: PixelLayout) -> Bitmap {
        let mut bitmap = Bitmap::blank(3, 2, layout).unwrap();
        let mut value = 10_u8;
        for y in 0..2 {
            for x in 0..3 {
                let pixel = bitmap.pixel_mut(x, y).unwrap();
                for channel in pixel.iter_mut() {
                    *channel = value;
                    value += 10;
                }
            }
        }
        bitmap
    }

    #[test]
    fn isolate_red_clears_blue_and_green() {
        let output = isolate_red(&colorful(PixelLayout::Bgr)).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[0, 0, 30]);
        assert_eq!(output.pixel(2, 1).unwrap(), &[0, 0, 180]);
    }

    #[test]
    fn isolate_green_clears_blue_and_red() {
        let output = isolate_green(&colorful(PixelLayout::Bgr)).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[0, 20, 0]);
    }

    #[test]
    fn isolate_blue_clears_green_and_red() {
        let output = isolate_blue(&colorful(PixelLayout::Bgr)).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[10, 0, 0]);
    }

    #[test]
    fn isolate_keeps_alpha() {
        let output = isolate_red(&colorful(PixelLayout::Bgra)).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[0, 0, 30, 40]);
    }

    #[test]
    fn isolate_red_twice_equals_once() {
        let once = isolate_red(&colorful(PixelLayout::Bgr)).unwrap();
        let twice = isolate_red(&once).unwrap();
        assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn luminosity_grayscale_of_known_pixel() {
        let output = grayscale(&colorful(PixelLayout::Bgr), GrayscaleMethod::Luminosity).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[21, 21, 21]);
    }

    #[test]
    fn average_grayscale_of_known_pixel() {
        let output = grayscale(&colorful(PixelLayout::Bgra), GrayscaleMethod::Average).unwrap();
        assert_eq!(output.pixel(0, 0).unwrap(), &[20, 20, 20, 40]);
    }

    #[test]
    fn transforms_leave_source_unchanged() {
        let source = colorful(PixelLayout::Bgr);
        let before = source.as_bytes().to_vec();
        for transform in ColorTransform::value_variants() {
            let output = BitmapTransformer::new(&TransformationOptions::default(), None)
                .transform(&source, *transform)
                .unwrap();
            assert_ne!(output.as_bytes(), before.as_slice());
            assert_eq!(output.as_bytes().len(), before.len());
            assert_eq!(&output.as_bytes()[..54], &before[..54]);
        }
        assert_eq!(source.as_bytes(), before.as_slice());
    }

    #[test]
    fn transforms_leave_headers_and_palette_unchanged() {
        let header = TestHeader {
            dib_header_size: 52,
            data_offset: 66,
            ..Default::default()
        };
        #[rustfmt::skip]
        let pixels = [
            10, 20, 30,    40, 50, 60,
            70, 80, 90,    100, 110, 120,
        ];
        let source = Bitmap::decode(header.build(&pixels)).unwrap();
        assert_eq!(source.palette_span().length, 12);
        let before = source.as_bytes()[..66].to_vec();
        for transform in ColorTransform::value_variants() {
            let output = BitmapTransformer::new(&TransformationOptions::default(), None)
                .transform(&source, *transform)
                .unwrap();
            assert_eq!(
                &output.as_bytes()[..output.data_offset()],
                before.as_slice(),
                "{:?} changed bytes before the pixel array",
                transform
            );
            assert_ne!(&output.as_bytes()[66..], &pixels[..]);
        }
    }

    #[test]
    fn pooled_transform_matches_sequential() {
        let threadpool = ThreadPool::new(4);
        let options = TransformationOptions {
            number_of_threads: 4,
        };
        let source = colorful(PixelLayout::Bgra);
        let pooled = BitmapTransformer::new(&options, Some(&threadpool))
            .transform(&source, ColorTransform::Grayscale(GrayscaleMethod::Luminosity))
            .unwrap();
        let sequential = grayscale(&source, GrayscaleMethod::Luminosity).unwrap();
        assert_eq!(pooled.as_bytes(), sequential.as_bytes());
    }

    #[test]
    fn transform_rejects_palette_bitmap() {
        let header = TestHeader {
            bits_per_pixel: 8,
            ..Default::default()
        };
        let source = Bitmap::decode(header.build(&[1, 2, 3, 4])).unwrap();
        assert!(matches!(
            isolate_blue(&source),
            Err(Error::UnsupportedPixelFormat(8))
        ));
    }

    #[test]
    fn transform_names() {
        let gray = ColorTransform::from_str("gray", false).unwrap();
        assert_eq!(gray, ColorTransform::Grayscale(GrayscaleMethod::Luminosity));
        let average = ColorTransform::from_str("gray-average", false).unwrap();
        assert_eq!(average.file_suffix(), "gray_average");
        assert!(ColorTransform::from_str("purple", false).is_err());
    }
}
