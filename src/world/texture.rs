// Format-agnostic repository of decoded RGBA textures.
// The renderer and scene interact through `TextureId` only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::color::Color;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// CPU-side storage: RGBA8, row-major, stride 4.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u8>,
}

/// Things that can go wrong when loading or using the bank.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel vector does not hold `w * h` RGBA texels.
    #[error("texture `{name}`: expected {expected} bytes, got {actual}")]
    BadSize {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The image file could not be opened or decoded.
    #[error("cannot decode `{}`: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl Texture {
    pub fn new(
        name: impl Into<String>,
        w: usize,
        h: usize,
        pixels: Vec<u8>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        let expected = w * h * 4;
        if w == 0 || h == 0 || pixels.len() != expected {
            return Err(TextureError::BadSize {
                name,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Single-colour texture, handy for tests and placeholders.
    pub fn solid(
        name: impl Into<String>,
        w: usize,
        h: usize,
        rgba: [u8; 4],
    ) -> Result<Self, TextureError> {
        Self::new(name, w, h, rgba.repeat(w * h))
    }

    /// Decode an image file (PNG) into RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (w, h) = img.dimensions();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, w as usize, h as usize, img.into_raw())
    }

    #[inline(always)]
    pub fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.w + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Nearest texel for normalised `(u, v)`; `floor(u * w)` clamped to the
    /// last column/row so `u == 1.0` stays in range.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> [u8; 4] {
        let tx = ((u * self.w as f64).floor().max(0.0) as usize).min(self.w - 1);
        let ty = ((v * self.h as f64).floor().max(0.0) as usize).min(self.h - 1);
        self.texel(tx, ty)
    }

    /// Average colour; the minimap paints textured cells with it.
    pub fn mean_color(&self) -> Color {
        let mut sum = [0u64; 4];
        for px in self.pixels.chunks_exact(4) {
            for (s, &c) in sum.iter_mut().zip(px) {
                *s += c as u64;
            }
        }
        let n = (self.w * self.h) as f64 * 255.0;
        Color::new(
            sum[0] as f64 / n,
            sum[1] as f64 / n,
            sum[2] as f64 / n,
            sum[3] as f64 / n,
        )
    }
}

/// Content of a texture slot: a decoded texture, or the flat colour that
/// stands in for it (also used when loading failed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Flat(Color),
    Textured(TextureId),
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about files beyond [`TextureBank::load_or`].
/// * Stores exactly one copy of every name.
/// * Immutable once the render loop starts; share it by reference.
#[derive(Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Obtain the id for a *loaded* texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Load `path` under `name`, substituting `fallback` when the file is
    /// missing or undecodable. Never fails: the scene is built either way.
    pub fn load_or<P: AsRef<Path>>(&mut self, name: &str, path: P, fallback: Color) -> Paint {
        if let Some(id) = self.id(name) {
            return Paint::Textured(id);
        }
        let loaded = Texture::from_file(path.as_ref()).and_then(|tex| self.insert(name, tex));
        match loaded {
            Ok(id) => {
                debug!("texture `{name}` loaded as id {id}");
                Paint::Textured(id)
            }
            Err(err) => {
                warn!("{err}; using flat fallback for `{name}`");
                Paint::Flat(fallback)
            }
        }
    }
}
