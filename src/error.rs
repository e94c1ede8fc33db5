use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    TruncatedHeader {
        needed: usize,
        actual: usize,
    },
    InvalidDibHeader(u32),
    InvalidDataOffset {
        data_offset: u32,
        header_end: usize,
    },
    UnsupportedVariant(String),
    UnsupportedPixelFormat(u16),
    UnsupportedCompression(u32),
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    IncompleteTraversal {
        completed: usize,
        expected: usize,
    },
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToReadInputFile(String, std::io::Error),
    UnableToCreateOutputDirectory(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToWriteOutputFile(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruncatedHeader { needed, actual } => {
                write!(
                    f,
                    "Bitmap is truncated: declared layout needs {} bytes, but buffer has {}",
                    needed, actual
                )
            }
            Self::InvalidDibHeader(size) => {
                write!(
                    f,
                    "DIB header size of {} bytes is smaller than the minimum of 40",
                    size
                )
            }
            Self::InvalidDataOffset {
                data_offset,
                header_end,
            } => {
                write!(
                    f,
                    "Pixel data offset {} points into the headers ending at {}",
                    data_offset, header_end
                )
            }
            Self::UnsupportedVariant(reason) => {
                write!(f, "Unsupported bitmap variant: {}", reason)
            }
            Self::UnsupportedPixelFormat(bits_per_pixel) => {
                write!(
                    f,
                    "Pixel access requires 24 or 32 bits per pixel, but bitmap has {}",
                    bits_per_pixel
                )
            }
            Self::UnsupportedCompression(compression) => {
                write!(
                    f,
                    "Pixel access requires uncompressed data, but compression is {}",
                    compression
                )
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({}, {}) is outside of the {}x{} image",
                    x, y, width, height
                )
            }
            Self::IncompleteTraversal {
                completed,
                expected,
            } => {
                write!(
                    f,
                    "Only {} of {} row bands were processed, bitmap left unchanged",
                    completed, expected
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToReadInputFile(path, error) => {
                write!(f, "Unable to read input file '{}': {}", path, error)
            }
            Self::UnableToCreateOutputDirectory(path, error) => {
                write!(
                    f,
                    "Unable to create output directory '{}': {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToWriteOutputFile(path, error) => {
                write!(f, "Unable to write output file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
