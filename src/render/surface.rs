use crate::assets::store::PreparedImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::composite::{blit_over, over_in_place};

/// Premultiplied RGBA8 canvas, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// Transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> BrandframeResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            data: vec![0; canvas.byte_len()],
        })
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul(canvas: Canvas, data: Vec<u8>) -> BrandframeResult<Self> {
        canvas.validate()?;
        if data.len() != canvas.byte_len() {
            return Err(BrandframeError::validation(format!(
                "surface byte length {} does not match {}x{}",
                data.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.canvas.width || y >= self.canvas.height {
            return [0; 4];
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Composite a full-surface premultiplied layer on top.
    pub fn over(&mut self, layer: &[u8]) -> BrandframeResult<()> {
        over_in_place(&mut self.data, layer)
    }

    /// Composite `image` with its top-left corner at `(x, y)`.
    pub fn blit_over(&mut self, image: &PreparedImage, x: i32, y: i32) -> BrandframeResult<()> {
        blit_over(
            &mut self.data,
            self.canvas.width,
            self.canvas.height,
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
            x,
            y,
        )
    }

    /// Straight-alpha RGBA8 copy, as written to PNG.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
