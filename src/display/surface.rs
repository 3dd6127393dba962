// Surface - View over caller-owned 16-bit screen memory
//
// The LCD framebuffer belongs to whoever brought the display up. The scaler
// only needs its physical size and pitch; rows may be padded, so the pitch
// (in bytes, as display drivers report it) can exceed `width * 2`.

/// Mutable view over a 16-bit destination framebuffer
pub struct Surface<'a> {
    pixels: &'a mut [u16],
    width: usize,
    height: usize,
    /// Row stride in pixels
    stride: usize,
}

impl<'a> Surface<'a> {
    /// Wrap screen memory
    ///
    /// # Arguments
    /// * `pixels` - Screen memory, at least `height` rows of `pitch` bytes
    /// * `width` - Physical width in pixels
    /// * `height` - Physical height in pixels
    /// * `pitch` - Row stride in bytes
    ///
    /// # Panics
    /// Panics if a dimension is zero, the pitch is odd or narrower than a
    /// row, or the memory is too small
    pub fn new(pixels: &'a mut [u16], width: usize, height: usize, pitch: usize) -> Self {
        assert!(width > 0 && height > 0, "Surface dimensions must be non-zero");
        assert!(pitch % 2 == 0, "Surface pitch {} is not a whole pixel", pitch);
        let stride = pitch / 2;
        assert!(
            stride >= width,
            "Surface pitch {} is narrower than {} pixels",
            pitch,
            width
        );
        assert!(
            pixels.len() >= (height - 1) * stride + width,
            "Surface memory too small for {}x{} with pitch {}",
            width,
            height,
            pitch
        );

        Self {
            pixels,
            width,
            height,
            stride,
        }
    }

    /// Wrap tightly packed screen memory (pitch = `width * 2`)
    pub fn packed(pixels: &'a mut [u16], width: usize, height: usize) -> Self {
        Self::new(pixels, width, height, width * 2)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes
    #[inline]
    pub fn pitch(&self) -> usize {
        self.stride * 2
    }

    /// Visible pixels of row `y`, padding excluded
    #[inline]
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width]
    }

    /// Mutable visible pixels of row `y`, padding excluded
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        let start = y * self.stride;
        &mut self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u16 {
        self.row(y)[x]
    }

    /// Zero every row; padding is left alone
    pub fn clear(&mut self) {
        for y in 0..self.height {
            self.row_mut(y).fill(0);
        }
    }
}
