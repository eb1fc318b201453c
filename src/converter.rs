use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use threadpool::ThreadPool;

use crate::error::Error;
use crate::remap;
use crate::Result;

const PNG_FILE_SUFFIX: &str = ".png";

/// Remaps orange, brown and beige pixels of raster images to blue tones.
///
/// The per-pixel transform depends only on the pixel's own original value,
/// so the pixel buffer is split across the borrowed thread pool's workers
/// and reassembled in order. The output is identical to a sequential pass.
pub struct HueRemapper<'a> {
    threadpool: &'a ThreadPool,
}

impl<'a> HueRemapper<'a> {
    pub fn new(threadpool: &'a ThreadPool) -> Self {
        HueRemapper { threadpool }
    }

    /// Converts a single raster file and writes the result as PNG.
    ///
    /// Single-channel grayscale images carry no hue to classify and are
    /// written back unmodified. Exotic color modes are normalized to
    /// four-channel RGBA before processing.
    pub fn convert(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let output_image = match decode_image(input_path)? {
            grayscale @ DynamicImage::ImageLuma8(_) => grayscale,
            DynamicImage::ImageRgb8(buffer) => {
                DynamicImage::ImageRgb8(self.remap_rgb_image(buffer)?)
            }
            other => DynamicImage::ImageRgba8(self.remap_rgba_image(other.into_rgba8())?),
        };
        write_image_as_png(&output_image, output_path)?;
        log::info!("Converted: {}", display_file_name(input_path));
        Ok(())
    }

    /// Converts every `.png` file in the directory in place.
    ///
    /// Entries are sorted by name so batch runs are deterministic. There is
    /// no per-file guard: the first failure aborts the remaining batch and
    /// prior conversions stay written.
    pub fn convert_directory(&self, directory: &Path) -> Result<()> {
        for path in collect_png_paths(directory)? {
            self.convert(&path, &path)?;
        }
        Ok(())
    }

    fn remap_rgb_image(&self, buffer: RgbImage) -> Result<RgbImage> {
        let (width, height) = buffer.dimensions();
        let pixels = self.remap_pixel_buffer(buffer.into_raw(), 3, remap_rgb_run);
        RgbImage::from_raw(width, height, pixels).ok_or(Error::RemappedBufferSizeMismatch)
    }

    fn remap_rgba_image(&self, buffer: RgbaImage) -> Result<RgbaImage> {
        let (width, height) = buffer.dimensions();
        let pixels = self.remap_pixel_buffer(buffer.into_raw(), 4, remap_rgba_run);
        RgbaImage::from_raw(width, height, pixels).ok_or(Error::RemappedBufferSizeMismatch)
    }

    /// Splits the raw buffer at pixel boundaries into one run per worker,
    /// remaps the runs on the pool and stitches them back together in order.
    fn remap_pixel_buffer(
        &self,
        pixels: Vec<u8>,
        bytes_per_pixel: usize,
        remap_run: fn(&mut [u8]),
    ) -> Vec<u8> {
        let number_of_workers = self.threadpool.max_count().max(1);
        let number_of_pixels = pixels.len() / bytes_per_pixel;
        let run_length = number_of_pixels.div_ceil(number_of_workers) * bytes_per_pixel;

        let (sender, receiver) = channel();
        let mut number_of_runs = 0;
        let mut rest = pixels;
        loop {
            let tail = if rest.len() > run_length {
                rest.split_off(run_length)
            } else {
                Vec::new()
            };
            let mut run = rest;
            rest = tail;
            let run_sender = sender.clone();
            let run_index = number_of_runs;
            self.threadpool.execute(move || {
                remap_run(&mut run);
                let _ = run_sender.send((run_index, run));
            });
            number_of_runs += 1;
            if rest.is_empty() {
                break;
            }
        }
        drop(sender);

        let mut runs: Vec<(usize, Vec<u8>)> = receiver.iter().collect();
        runs.sort_by_key(|(index, _)| *index);
        runs.into_iter().flat_map(|(_, run)| run).collect()
    }
}

fn remap_rgb_run(run: &mut [u8]) {
    for pixel in run.chunks_exact_mut(3) {
        if let Some((red, green, blue)) = remap::remap_pixel(pixel[0], pixel[1], pixel[2]) {
            pixel[0] = red;
            pixel[1] = green;
            pixel[2] = blue;
        }
    }
}

fn remap_rgba_run(run: &mut [u8]) {
    for pixel in run.chunks_exact_mut(4) {
        // Fully transparent pixels are invisible, skip them untouched.
        if pixel[3] == 0 {
            continue;
        }
        if let Some((red, green, blue)) = remap::remap_pixel(pixel[0], pixel[1], pixel[2]) {
            pixel[0] = red;
            pixel[1] = green;
            pixel[2] = blue;
        }
    }
}

fn decode_image(input_path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(input_path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| Error::UnableToReadInputFile(display_path(input_path), e))?;
    reader
        .decode()
        .map_err(|e| Error::UnableToDecodeInputFile(display_path(input_path), e))
}

fn write_image_as_png(image: &DynamicImage, output_path: &Path) -> Result<()> {
    let output_file = open_output_file(output_path)?;
    image
        .write_to(&mut BufWriter::new(output_file), ImageFormat::Png)
        .map_err(|e| Error::UnableToEncodeOutputFile(display_path(output_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(display_path(file_path), e))
}

fn collect_png_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory)
        .map_err(|e| Error::UnableToReadDirectory(display_path(directory), e))?;
    let mut png_paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::UnableToReadDirectory(display_path(directory), e))?;
        let path = entry.path();
        if display_file_name(&path).ends_with(PNG_FILE_SUFFIX) {
            png_paths.push(path);
        }
    }
    png_paths.sort();
    Ok(png_paths)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_path(path))
}

#[cfg(test)]
mod test {
    use image::{Rgba, RgbaImage};
    use threadpool::ThreadPool;

    use super::{remap_rgb_run, HueRemapper};

    const CANONICAL_ORANGE: [u8; 3] = [238, 121, 0];

    fn is_blue_dominant(pixel: &[u8]) -> bool {
        pixel[2] > pixel[0] && pixel[2] > pixel[1]
    }

    #[test]
    fn remap_rgb_run_converts_orange_and_keeps_green() {
        let mut run = [238, 121, 0, 0, 128, 0];
        remap_rgb_run(&mut run);
        assert!(
            is_blue_dominant(&run[0..3]),
            "orange pixel was not remapped to blue: {:?}",
            &run[0..3]
        );
        assert_eq!(&run[3..6], &[0, 128, 0], "green pixel must stay untouched");
    }

    #[test]
    fn fully_transparent_pixels_stay_byte_identical() {
        let threadpool = ThreadPool::new(2);
        let remapper = HueRemapper::new(&threadpool);
        let [red, green, blue] = CANONICAL_ORANGE;
        let image = RgbaImage::from_pixel(3, 3, Rgba([red, green, blue, 0]));
        let result = remapper
            .remap_rgba_image(image)
            .expect("remap must preserve buffer size");
        for pixel in result.pixels() {
            assert_eq!(
                pixel.0,
                [red, green, blue, 0],
                "transparent pixel was modified"
            );
        }
    }

    #[test]
    fn opaque_orange_pixels_keep_their_alpha() {
        let threadpool = ThreadPool::new(2);
        let remapper = HueRemapper::new(&threadpool);
        let [red, green, blue] = CANONICAL_ORANGE;
        let image = RgbaImage::from_pixel(2, 2, Rgba([red, green, blue, 180]));
        let result = remapper
            .remap_rgba_image(image)
            .expect("remap must preserve buffer size");
        for pixel in result.pixels() {
            assert!(
                is_blue_dominant(&pixel.0),
                "orange pixel was not remapped to blue: {:?}",
                pixel.0
            );
            assert_eq!(pixel.0[3], 180, "alpha channel was modified");
        }
    }

    #[test]
    fn parallel_remap_matches_single_worker_remap() {
        let width = 31;
        let height = 17;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let red = (x * 8 % 256) as u8;
            let green = (y * 15 % 256) as u8;
            let blue = ((x + y) * 5 % 256) as u8;
            Rgba([red, green, blue, 255])
        });

        let single_pool = ThreadPool::new(1);
        let sequential = HueRemapper::new(&single_pool)
            .remap_rgba_image(image.clone())
            .expect("remap must preserve buffer size");

        let parallel_pool = ThreadPool::new(4);
        let parallel = HueRemapper::new(&parallel_pool)
            .remap_rgba_image(image)
            .expect("remap must preserve buffer size");

        assert_eq!(
            sequential.into_raw(),
            parallel.into_raw(),
            "worker count must not change the output"
        );
    }

    #[test]
    fn remap_preserves_dimensions() {
        let threadpool = ThreadPool::new(3);
        let remapper = HueRemapper::new(&threadpool);
        let image = RgbaImage::new(7, 5);
        let result = remapper
            .remap_rgba_image(image)
            .expect("remap must preserve buffer size");
        assert_eq!(result.dimensions(), (7, 5), "dimensions changed");
    }
}
