use clap::builder::PossibleValue;
use clap::ValueEnum;

/// Index of each color channel inside a stored pixel
pub const BLUE_INDEX: usize = 0;
pub const GREEN_INDEX: usize = 1;
pub const RED_INDEX: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

impl RGBColorFormat<u8> {
    /// read the color of a stored pixel in blue, green, red (, alpha) order
    pub fn from_bgr(pixel: &[u8]) -> Self {
        RGBColorFormat {
            red: pixel[RED_INDEX],
            green: pixel[GREEN_INDEX],
            blue: pixel[BLUE_INDEX],
        }
    }
}

/// How a color is reduced to a single gray intensity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrayscaleMethod {
    /// 0.3 red, 0.59 green and 0.11 blue, following the eye's sensitivity
    #[default]
    Luminosity,
    /// every channel weighted equally
    Average,
}

impl ValueEnum for GrayscaleMethod {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Luminosity, Self::Average]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Luminosity => Some(PossibleValue::new("luminosity")),
            Self::Average => Some(PossibleValue::new("average")),
        }
    }
}

impl GrayscaleMethod {
    pub fn intensity(&self, color: &RGBColorFormat<u8>) -> u8 {
        match self {
            Self::Luminosity => luminosity_grayscale(color),
            Self::Average => average_grayscale(color),
        }
    }
}

// weights in hundredths, they sum to 100 so the quotient never exceeds 255
const LUMINOSITY_RED_WEIGHT: u32 = 30;
const LUMINOSITY_GREEN_WEIGHT: u32 = 59;
const LUMINOSITY_BLUE_WEIGHT: u32 = 11;

fn luminosity_grayscale(color: &RGBColorFormat<u8>) -> u8 {
    let weighted = LUMINOSITY_RED_WEIGHT * u32::from(color.red)
        + LUMINOSITY_GREEN_WEIGHT * u32::from(color.green)
        + LUMINOSITY_BLUE_WEIGHT * u32::from(color.blue);
    (weighted / 100) as u8
}

fn average_grayscale(color: &RGBColorFormat<u8>) -> u8 {
    let sum = u32::from(color.red) + u32::from(color.green) + u32::from(color.blue);
    (sum / 3) as u8
}
