use crate::{
    color::Rgba,
    error::{Error, Result},
    label::MAX_ROWS,
};

/// Grid sizes offered when picking a size for an arbitrary image.
pub const SUPPORTED_SIZES: [usize; 4] = [8, 16, 24, 32];

/// Bytes per pixel. Always RGBA
pub const CHANNELS: usize = 4;

/// A square RGBA bitmap, stored row-major.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width and height of the image
    pub size: usize,
    /// The raw RGBA data
    pub data: Vec<u8>,
}

impl Raster {
    /// Creates a fully transparent raster.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            data: vec![0; size * size * CHANNELS],
        })
    }

    /// Wraps existing RGBA data of a `size`x`size` image.
    pub fn from_rgba(size: usize, data: Vec<u8>) -> Result<Self> {
        check_size(size)?;
        if data.len() != size * size * CHANNELS {
            return Err(Error::Range {
                what: "raster length",
                value: data.len(),
                max: size * size * CHANNELS + 1,
            });
        }
        Ok(Self { size, data })
    }

    /// Color at column `x` of row `y`, `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let index = self.index(x, y)?;
        let mut channels = [0; CHANNELS];
        channels.copy_from_slice(self.data.get(index..index + CHANNELS)?);
        Some(Rgba::from(channels))
    }

    /// Paints one pixel. Returns false if the position lies outside the image or its buffer.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> bool {
        let pixel = self
            .index(x, y)
            .and_then(|index| self.data.get_mut(index..index + CHANNELS));
        match pixel {
            Some(pixel) => {
                pixel.copy_from_slice(&color.to_array());
                true
            }
            None => false,
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some((y * self.size + x) * CHANNELS)
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_ROWS {
        return Err(Error::Range {
            what: "size",
            value: size,
            max: MAX_ROWS + 1,
        });
    }
    Ok(())
}

/// Suggests a grid size for a `width`x`height` image.
///
/// Square images that already have a supported size keep it. Anything else gets the
/// supported size closest to its longer side, the smaller one on a tie.
pub fn recommend_size(width: usize, height: usize) -> usize {
    if width == height && SUPPORTED_SIZES.contains(&width) {
        return width;
    }
    let target = width.max(height);
    let mut best = SUPPORTED_SIZES[0];
    for &size in &SUPPORTED_SIZES[1..] {
        if size.abs_diff(target) < best.abs_diff(target) {
            best = size;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_raster_is_transparent() {
        let raster = Raster::new(3).unwrap();
        assert_eq!(raster.data.len(), 36);
        assert_eq!(raster.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(3, 0), None);
    }

    #[test]
    fn set_and_get() {
        let mut raster = Raster::new(4).unwrap();
        let color = Rgba::new(1, 2, 3, 4);
        assert!(raster.set_pixel(3, 1, color));
        assert!(!raster.set_pixel(0, 4, color));
        assert_eq!(raster.pixel(3, 1), Some(color));
        assert_eq!(&raster.data[(4 + 3) * 4..(4 + 3) * 4 + 4], &[1, 2, 3, 4]);
    }

    #[test]
    fn short_buffer_is_not_indexed() {
        let mut raster = Raster {
            size: 2,
            data: vec![0; 4],
        };
        assert_eq!(raster.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(raster.pixel(1, 0), None);
        assert!(!raster.set_pixel(1, 1, Rgba::FALLBACK));
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(Raster::new(0).is_err());
        assert!(Raster::new(33).is_err());
        assert!(Raster::from_rgba(2, vec![0; 15]).is_err());
        assert!(Raster::from_rgba(2, vec![0; 16]).is_ok());
    }

    #[test]
    fn size_recommendation() {
        assert_eq!(recommend_size(16, 16), 16);
        assert_eq!(recommend_size(32, 32), 32);
        assert_eq!(recommend_size(640, 480), 32);
        assert_eq!(recommend_size(10, 20), 16);
        assert_eq!(recommend_size(12, 12), 8);
        assert_eq!(recommend_size(20, 5), 16);
        assert_eq!(recommend_size(1, 1), 8);
    }
}
