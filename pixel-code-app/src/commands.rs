use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use clap::ArgMatches;
use image::{imageops::FilterType, GenericImageView, RgbaImage};
use log::{info, warn};
use rust_pixel_code::{
    extract::{extract, row_keys},
    raster::recommend_size,
    DecodeOptions, PixelGrid, Raster,
};

/// Everything that can stop a command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Codec(#[from] rust_pixel_code::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image is {width}x{height}, expected {size}x{size} (drop --no-resize to resize it)")]
    WrongSize {
        width: u32,
        height: u32,
        size: usize,
    },
}

pub fn run(options: &ArgMatches) -> Result<PathBuf, AppError> {
    match options.subcommand() {
        Some(("encode", args)) => encode(args),
        Some(("decode", args)) => decode(args),
        Some(("extract", args)) => extract_codes(args),
        Some(("keys", args)) => keys(args),
        // clap enforces a subcommand
        _ => unreachable!(),
    }
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> &'a Path {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .unwrap_or_else(|| Path::new(""))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pixels".to_string())
}

fn output_or(args: &ArgMatches, default: impl FnOnce() -> String) -> PathBuf {
    args.get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(default()))
}

fn read_grid(path: &Path) -> Result<PixelGrid, AppError> {
    info!("Reading {:?}", path);
    Ok(PixelGrid::from_reader(BufReader::new(File::open(path)?))?)
}

fn encode(args: &ArgMatches) -> Result<PathBuf, AppError> {
    let input = path_arg(args, "image");
    let img = image::open(input)?;
    let (width, height) = img.dimensions();
    info!("Image dimensions {}x{}", width, height);

    let size = if args.get_flag("recommend") {
        let size = recommend_size(width as usize, height as usize);
        info!("Using recommended size {}", size);
        size
    } else {
        *args.get_one::<usize>("size").unwrap_or(&32)
    };

    let mut rgba = img.to_rgba8();
    if (width as usize, height as usize) != (size, size) {
        if args.get_flag("no-resize") {
            return Err(AppError::WrongSize {
                width,
                height,
                size,
            });
        }
        info!("Resizing to {}x{}", size, size);
        rgba = image::imageops::resize(&rgba, size as u32, size as u32, FilterType::Nearest);
    }

    let raster = Raster::from_rgba(size, rgba.into_raw())?;
    let grid = PixelGrid::from_raster(&raster)?;

    let output = output_or(args, || {
        format!("{}_pixels_codes_{}x{}.json", stem(input), size, size)
    });
    grid.to_writer(BufWriter::new(File::create(&output)?))?;
    Ok(output)
}

fn decode(args: &ArgMatches) -> Result<PathBuf, AppError> {
    let input = path_arg(args, "json");
    let grid = read_grid(input)?;

    let options = if args.get_flag("strict") {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };
    let raster = grid.to_raster(&options)?;

    let side = raster.size as u32;
    let img = match RgbaImage::from_raw(side, side, raster.data) {
        Some(img) => img,
        None => {
            warn!("Raster buffer does not match its size, writing a blank image");
            RgbaImage::new(side, side)
        }
    };

    let output = output_or(args, || format!("{}.png", stem(input)));
    img.save(&output)?;
    Ok(output)
}

fn extract_codes(args: &ArgMatches) -> Result<PathBuf, AppError> {
    let input = path_arg(args, "json");
    let grid = read_grid(input)?;

    let source = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extracted = extract(&grid, &source);
    info!("Extracted {} codes", extracted.count);

    let output = output_or(args, || format!("{}_codes.json", stem(input)));
    serde_json::to_writer_pretty(BufWriter::new(File::create(&output)?), &extracted)?;
    Ok(output)
}

/// Default output of `keys`, placed next to the input document.
fn keys_path(input: &Path) -> PathBuf {
    input.with_file_name("codes.json")
}

fn keys(args: &ArgMatches) -> Result<PathBuf, AppError> {
    let input = path_arg(args, "json");
    let grid = read_grid(input)?;
    let keys = row_keys(&grid);
    info!("Generated {} keys", keys.len());

    let output = args
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| keys_path(input));
    serde_json::to_writer_pretty(BufWriter::new(File::create(&output)?), &keys)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_written_next_to_the_input() {
        assert_eq!(
            keys_path(Path::new("art/cat_pixels_codes_32x32.json")),
            Path::new("art/codes.json")
        );
        assert_eq!(keys_path(Path::new("cat.json")), Path::new("codes.json"));
    }

    #[test]
    fn keys_honours_explicit_output() {
        let matches = crate::cmd_args::create_cmd_args()
            .try_get_matches_from(["pixel-code", "keys", "in/doc.json", "-o", "elsewhere.json"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(path_arg(args, "json"), Path::new("in/doc.json"));
        assert_eq!(
            args.get_one::<PathBuf>("output"),
            Some(&PathBuf::from("elsewhere.json"))
        );
    }
}
