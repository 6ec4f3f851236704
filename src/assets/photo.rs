use std::{path::Path, sync::Arc, time::UNIX_EPOCH};

use anyhow::Context;

use crate::{
    assets::decode::DecodedPhoto,
    foundation::{
        core::NormalizedRect,
        error::{VitrineError, VitrineResult},
        math::Fnv1a64,
    },
    layout::solver::LayoutSolution,
};

/// Most photos a poster carries.
pub const MAX_PHOTOS: usize = 4;

/// Stable frame identity: file identity plus ordinal position.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameId(pub u64);

impl FrameId {
    /// Hash `(name, byte length, modification stamp, ordinal)`.
    ///
    /// Re-deriving for the same file at the same position gives the same id; the
    /// same file uploaded twice gets two ids.
    pub fn derive(source: &PhotoSource, ordinal: usize) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_str(&source.name);
        h.write_u64(source.bytes.len() as u64);
        match source.modified {
            Some(stamp) => {
                h.write_u8(1);
                h.write_u64(stamp);
            }
            None => h.write_u8(0),
        }
        h.write_u64(ordinal as u64);
        Self(h.finish())
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Encoded photo bytes plus the file identity they came from.
///
/// Cloning shares the byte buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoSource {
    pub name: String,
    pub bytes: Arc<[u8]>,
    /// Modification time in seconds since the Unix epoch, if known.
    pub modified: Option<u64>,
}

impl PhotoSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: u64) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Read a photo file, taking its name and modification time from the filesystem.
    pub fn from_path(path: &Path) -> VitrineResult<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read photo {}", path.display()))?;
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            bytes: bytes.into(),
            modified,
        })
    }
}

/// One accepted photo and its placement in the photo region.
///
/// The frame owns its source bytes and decoded pixels; dropping it releases both.
#[derive(Clone, Debug)]
pub struct PhotoFrame {
    pub id: FrameId,
    /// Position in the accepted batch; solver rects map to frames in this order.
    pub ordinal: usize,
    pub source: PhotoSource,
    pub photo: DecodedPhoto,
    pub aspect_ratio: f64,
    pub natural_width: u32,
    pub natural_height: u32,
    pub layout: NormalizedRect,
}

impl PhotoFrame {
    pub fn new(source: PhotoSource, ordinal: usize, photo: DecodedPhoto) -> Self {
        Self {
            id: FrameId::derive(&source, ordinal),
            ordinal,
            aspect_ratio: photo.aspect_ratio(),
            natural_width: photo.width,
            natural_height: photo.height,
            source,
            photo,
            layout: NormalizedRect::full(),
        }
    }
}

/// The frames of one poster, kept in render order (last paints on top).
#[derive(Clone, Debug, Default)]
pub struct FrameSet {
    frames: Vec<PhotoFrame>,
}

impl FrameSet {
    pub fn new(frames: Vec<PhotoFrame>) -> VitrineResult<Self> {
        if frames.len() > MAX_PHOTOS {
            return Err(VitrineError::validation(format!(
                "at most {MAX_PHOTOS} photos are supported, got {}",
                frames.len()
            )));
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in render order.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoFrame> {
        self.frames.iter()
    }

    pub fn get(&self, id: FrameId) -> Option<&PhotoFrame> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut PhotoFrame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    /// Frames sorted by ordinal, independent of render order.
    pub fn by_ordinal(&self) -> Vec<&PhotoFrame> {
        let mut out: Vec<&PhotoFrame> = self.frames.iter().collect();
        out.sort_by_key(|f| f.ordinal);
        out
    }

    /// Aspect ratios in ordinal order, as fed to the solver.
    pub fn aspect_ratios(&self) -> Vec<f64> {
        self.by_ordinal().iter().map(|f| f.aspect_ratio).collect()
    }

    /// Current layouts in render order.
    pub fn layouts(&self) -> Vec<(FrameId, NormalizedRect)> {
        self.frames.iter().map(|f| (f.id, f.layout)).collect()
    }

    /// Move `id` to the end of render order. Geometry is untouched.
    pub fn focus(&mut self, id: FrameId) -> bool {
        let Some(pos) = self.frames.iter().position(|f| f.id == id) else {
            return false;
        };
        let frame = self.frames.remove(pos);
        self.frames.push(frame);
        true
    }

    pub fn remove(&mut self, id: FrameId) -> Option<PhotoFrame> {
        let pos = self.frames.iter().position(|f| f.id == id)?;
        Some(self.frames.remove(pos))
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Write a solver result back as normalized layouts.
    ///
    /// Rects are normalized against `used_width × container_height`, so the photo
    /// region is expected to be exactly `used_width` wide.
    pub fn apply_solution(&mut self, solution: &LayoutSolution, container_height: f64) {
        let width = solution.used_width;
        let mut order: Vec<usize> = (0..self.frames.len()).collect();
        order.sort_by_key(|&i| self.frames[i].ordinal);

        for rect in &solution.rects {
            let Some(&slot) = order.get(rect.index) else {
                continue;
            };
            let layout = if width > 0.0 && container_height > 0.0 {
                NormalizedRect::new(
                    rect.x / width,
                    rect.y / container_height,
                    rect.width / width,
                    rect.height / container_height,
                )
            } else {
                NormalizedRect::default()
            };
            self.frames[slot].layout = layout.normalized().clamped();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/photo.rs"]
mod tests;
