use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use error::Error;
use image::{
    transformer::{BitmapTransformer, ColorTransform, TransformationOptions},
    Bitmap,
};
use threadpool::ThreadPool;

pub mod binary_stream;
mod cli;
pub mod color;
pub mod error;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_directory: PathBuf,
    transforms: Vec<ColorTransform>,
    number_of_threads: usize,
    describe: bool,
}

impl From<&Arguments> for TransformationOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            number_of_threads: value.number_of_threads.max(1),
        }
    }
}

fn path_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_name(file_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_name(file_path), e))
}

fn create_output_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .map_err(|e| Error::UnableToCreateOutputDirectory(path_name(directory), e))
}

/// Read a whole file into memory.
pub fn read_bytes(file_path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input_file(file_path)?
        .read_to_end(&mut data)
        .map_err(|e| Error::UnableToReadInputFile(path_name(file_path), e))?;
    log::debug!("Read {} bytes from '{}'", data.len(), file_path.display());
    Ok(data)
}

/// Write `data` to a file, creating its parent directories first.
pub fn write_bytes(file_path: &Path, data: &[u8]) -> Result<()> {
    if let Some(directory) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_output_directory(directory)?;
    }
    let mut writer = BufWriter::new(open_output_file(file_path)?);
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::UnableToWriteOutputFile(path_name(file_path), e))?;
    log::debug!("Wrote {} bytes to '{}'", data.len(), file_path.display());
    Ok(())
}

/// 24 bit rows are stored padded to 4 bytes, which pixel offsets do not account for
fn has_padded_rows(bitmap: &Bitmap) -> bool {
    bitmap.bits_per_pixel() == 24 && (bitmap.width() as usize * 3) % 4 != 0
}

fn output_file_path(arguments: &Arguments, transform: ColorTransform) -> PathBuf {
    let stem = arguments
        .input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bitmap".to_owned());
    arguments
        .output_directory
        .join(format!("{}_{}.bmp", stem, transform.file_suffix()))
}

/// Write one transformed copy of the input bitmap per selected transform.
///
/// Returns the paths of the written files in the order of the transforms.
pub fn split_bitmap_file(arguments: &Arguments) -> Result<Vec<PathBuf>> {
    let bitmap = Bitmap::decode(read_bytes(&arguments.input_file)?)?;
    log::info!(
        "Decoded {}x{} bitmap with {} bits per pixel from '{}'",
        bitmap.width(),
        bitmap.height(),
        bitmap.bits_per_pixel(),
        arguments.input_file.display()
    );
    if has_padded_rows(&bitmap) {
        log::warn!(
            "Rows of '{}' are padded to 4 bytes, pixels are addressed as if they were packed",
            arguments.input_file.display()
        );
    }
    if arguments.describe {
        logger::log_bitmap_header(&bitmap);
    }

    create_output_directory(&arguments.output_directory)?;
    let transformation_options = TransformationOptions::from(arguments);
    let threadpool = ThreadPool::new(transformation_options.number_of_threads);
    let transformer = BitmapTransformer::new(&transformation_options, Some(&threadpool));

    let mut written = Vec::with_capacity(arguments.transforms.len());
    for &transform in &arguments.transforms {
        let output_image = transformer.transform(&bitmap, transform)?;
        let output_path = output_file_path(arguments, transform);
        write_bytes(&output_path, output_image.as_bytes())?;
        log::info!("Wrote {:?} copy to '{}'", transform, output_path.display());
        written.push(output_path);
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{has_padded_rows, output_file_path, read_bytes, write_bytes, Arguments};
    use crate::color::GrayscaleMethod;
    use crate::error::Error;
    use crate::image::transformer::{ColorTransform, TransformationOptions};
    use crate::image::{Bitmap, PixelLayout};

    fn arguments(input_file: &str, number_of_threads: usize) -> Arguments {
        Arguments {
            input_file: PathBuf::from(input_file),
            output_directory: PathBuf::from("/tmp/out"),
            transforms: ColorTransform::ALL.to_vec(),
            number_of_threads,
            describe: false,
        }
    }

    #[test]
    fn output_file_named_after_input_stem() {
        let arguments = arguments("/pictures/sample_file.bmp", 1);
        let path = output_file_path(
            &arguments,
            ColorTransform::Grayscale(GrayscaleMethod::Average),
        );
        assert_eq!(path, PathBuf::from("/tmp/out/sample_file_gray_average.bmp"));
        let path = output_file_path(&arguments, ColorTransform::IsolateRed);
        assert_eq!(path, PathBuf::from("/tmp/out/sample_file_red.bmp"));
    }

    #[test]
    fn transformation_options_need_one_thread() {
        let options = TransformationOptions::from(&arguments("a.bmp", 0));
        assert_eq!(options.number_of_threads, 1);
        let options = TransformationOptions::from(&arguments("a.bmp", 6));
        assert_eq!(options.number_of_threads, 6);
    }

    #[test]
    fn padded_rows_only_for_24_bit_widths_off_four_bytes() {
        assert!(has_padded_rows(&Bitmap::blank(3, 2, PixelLayout::Bgr).unwrap()));
        assert!(has_padded_rows(&Bitmap::blank(1, 1, PixelLayout::Bgr).unwrap()));
        assert!(!has_padded_rows(&Bitmap::blank(4, 2, PixelLayout::Bgr).unwrap()));
        assert!(!has_padded_rows(&Bitmap::blank(3, 2, PixelLayout::Bgra).unwrap()));
    }

    #[test]
    fn write_then_read_bytes() {
        let directory = std::env::temp_dir().join(format!(
            "bmp-channel-splitter-bytes-{}",
            std::process::id()
        ));
        let path = directory.join("nested").join("copy.bmp");
        let bitmap = Bitmap::blank(2, 2, PixelLayout::Bgra).unwrap();
        write_bytes(&path, bitmap.as_bytes()).unwrap();
        assert_eq!(read_bytes(&path).unwrap(), bitmap.as_bytes());
        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn read_bytes_reports_missing_file() {
        let path = PathBuf::from("/nonexistent/bmp-channel-splitter/missing.bmp");
        match read_bytes(&path) {
            Err(Error::UnableToOpenInputFileForReading(name, _)) => {
                assert_eq!(name, "/nonexistent/bmp-channel-splitter/missing.bmp")
            }
            other => panic!("Unexpected result: {:?}", other.map(|data| data.len())),
        }
    }
}
