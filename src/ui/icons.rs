use crate::data::catalog::EventCategory;
use crate::{MapError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Category icons decoded once and kept as egui textures
///
/// A category whose PNG cannot be loaded is remembered as missing and drawn
/// with its emoji glyph instead.
pub struct IconCache {
    asset_dir: PathBuf,
    textures: HashMap<&'static str, Option<egui::TextureHandle>>,
}

impl IconCache {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            textures: HashMap::new(),
        }
    }

    /// Texture for `category`, or `None` when the glyph should be drawn
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        category: &'static EventCategory,
    ) -> Option<&egui::TextureHandle> {
        let asset_dir = &self.asset_dir;
        self.textures
            .entry(category.id)
            .or_insert_with(|| {
                let path = category.icon_path(asset_dir);
                match load_color_image(&path) {
                    Ok(image) => Some(ctx.load_texture(
                        format!("icon_{}", category.id),
                        image,
                        egui::TextureOptions::LINEAR,
                    )),
                    Err(e) => {
                        log::warn!(
                            "Icon for {} unavailable, using glyph {}: {}",
                            category.id,
                            category.glyph,
                            e
                        );
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl std::fmt::Debug for IconCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCache")
            .field("asset_dir", &self.asset_dir)
            .field("loaded", &self.textures.len())
            .finish()
    }
}

fn load_color_image(path: &Path) -> Result<egui::ColorImage> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| MapError::InvalidConfig(format!("{}: {e}", path.display())))?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
