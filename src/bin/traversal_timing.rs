use std::time::{Duration, Instant};

use bmp_channel_splitter::color::GrayscaleMethod;
use bmp_channel_splitter::image::transformer::ColorTransform;
use bmp_channel_splitter::image::{Bitmap, PixelLayout};
use threadpool::ThreadPool;

const IMAGE_WIDTH: u32 = 3840;
const IMAGE_HEIGHT: u32 = 2160;
const NUMBER_OF_ROUNDS: u32 = 10;
const TRANSFORM: ColorTransform = ColorTransform::Grayscale(GrayscaleMethod::Luminosity);

fn create_test_image() -> Bitmap {
    let mut bitmap = Bitmap::blank(IMAGE_WIDTH, IMAGE_HEIGHT, PixelLayout::Bgr)
        .expect("Test image could not be created");
    let mut index: u32 = 0;
    bitmap
        .for_each_pixel(|pixel| {
            let x = index % IMAGE_WIDTH;
            let y = index / IMAGE_WIDTH;
            pixel[0] = (x % 256) as u8;
            pixel[1] = (y % 256) as u8;
            pixel[2] = ((x + y * 8) % 256) as u8;
            index += 1;
        })
        .expect("Test image has an unsupported pixel format");
    bitmap
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn report(name: &str, durations: &[Duration]) {
    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn measure<F>(name: &str, source: &Bitmap, mut traverse: F)
where
    F: FnMut(&mut Bitmap),
{
    let mut durations: Vec<Duration> = Vec::new();
    for round in 1..=NUMBER_OF_ROUNDS {
        let mut bitmap = source.deep_copy().expect("Copy of test image failed");
        let start = Instant::now();
        traverse(&mut bitmap);
        let duration = start.elapsed();
        println!(
            "{}: finished round {} after {} microseconds",
            name,
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }
    report(name, &durations);
}

fn main() {
    println!("Creating test image");
    let test_image = create_test_image();
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threadpool = ThreadPool::new(threads);

    measure("sequential", &test_image, |bitmap| {
        bitmap
            .for_each_pixel(|pixel| TRANSFORM.apply(pixel))
            .expect("Sequential traversal failed");
    });
    measure(&format!("{} threads", threads), &test_image, |bitmap| {
        bitmap
            .for_each_pixel_parallel(&threadpool, |pixel| TRANSFORM.apply(pixel))
            .expect("Parallel traversal failed");
    });
}
