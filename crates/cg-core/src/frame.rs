use crate::color::Color;
use crate::error::CoreError;

/// Buffer de pixels RGBA possédé, row-major, 4 octets par pixel, sans padding.
///
/// La taille du stockage vaut toujours `width * height * 4` : les
/// dimensions déclarées ne divergent jamais du stockage réel.
///
/// # Example
/// ```
/// use cg_core::frame::PixelBuffer;
/// let buf = PixelBuffer::new(10, 10);
/// assert_eq!(buf.data().len(), 400);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Number of bytes needed for `width × height` RGBA pixels.
#[inline(always)]
#[must_use]
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

impl PixelBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use cg_core::frame::PixelBuffer;
    /// let buf = PixelBuffer::new(100, 50);
    /// assert_eq!(buf.width(), 100);
    /// assert_eq!(buf.height(), 50);
    /// assert_eq!(buf.data().len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; rgba_len(width, height)],
            width,
            height,
        }
    }

    /// Wrap decoded RGBA bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferSize`] if `data.len()` is not `width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use cg_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::from_raw(1, 1, vec![0; 4]).is_ok());
    /// assert!(PixelBuffer::from_raw(2, 1, vec![0; 4]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != rgba_len(width, height) {
            return Err(CoreError::BufferSize {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Fill every pixel with `color`.
    ///
    /// # Example
    /// ```
    /// use cg_core::color::Color;
    /// use cg_core::frame::PixelBuffer;
    /// let red = Color::new(255, 0, 0, 255);
    /// let buf = PixelBuffer::filled(2, 2, red);
    /// assert_eq!(buf.pixel(1, 1), red);
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        buf
    }

    /// Width in pixels.
    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline(always)]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes. The length cannot change through this slice.
    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// True when there is no backing storage (0×0 buffer).
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Accès au pixel (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is outside the buffer.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Color::from_rgba(&self.data[idx..idx + 4])
    }

    /// Replace storage and dimensions in one step; the previous storage is dropped.
    ///
    /// # Example
    /// ```
    /// use cg_core::frame::PixelBuffer;
    /// let mut buf = PixelBuffer::new(4, 4);
    /// buf.replace(PixelBuffer::new(2, 2));
    /// assert_eq!((buf.width(), buf.height(), buf.data().len()), (2, 2, 16));
    /// ```
    pub fn replace(&mut self, other: PixelBuffer) {
        *self = other;
    }
}
