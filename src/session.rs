use std::path::PathBuf;

use egui_glow::Painter;

use crate::natural::natural_cmp;
use crate::sheet::{SheetParams, SpriteSheet};
use crate::textures::Texture;
use crate::viewport::ScrollState;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("No sprites found in sheet")]
    NoSprites,

    #[error("Failed to create texture: {0}")]
    Texture(String),
}

/// A successfully loaded sheet: the sliced grid together with its GPU
/// texture and the egui id it is drawn with. Replaced wholesale on the
/// next successful reload and only then; the texture is freed through
/// the glow painter, which owns the GL-side deletion.
pub struct LoadedSheet {
    pub sheet: SpriteSheet,
    pub texture: Texture,
    pub tex_id: egui::TextureId,
}

/// All per-session viewer state: the current file, the live-edited
/// parameters, the loaded sheet (if any) and its naturally sorted
/// sprite names, plus the status and error lines shown in the UI.
pub struct ViewerSession {
    pub params: SheetParams,
    pub current_file: Option<PathBuf>,
    pub loaded: Option<LoadedSheet>,
    pub sprite_names: Vec<String>,
    pub scroll: ScrollState,
    pub load_error: Option<String>,
    pub status: String,
    needs_reload: bool,
}

impl ViewerSession {
    pub fn new(params: SheetParams, initial_file: Option<PathBuf>) -> Self {
        let needs_reload = initial_file.is_some();
        Self {
            params: params.clamped(),
            current_file: initial_file,
            loaded: None,
            sprite_names: Vec::new(),
            scroll: ScrollState::default(),
            load_error: None,
            status: String::new(),
            needs_reload,
        }
    }

    /// Switches to a new sheet file. The actual load happens on the
    /// next `maybe_reload`, once a GL context and painter are in hand.
    pub fn request_open(&mut self, path: PathBuf) {
        self.current_file = Some(path);
        self.needs_reload = true;
    }

    /// Applies new settings from the UI; a changed value schedules a
    /// reslice of the current sheet.
    pub fn set_params(&mut self, params: SheetParams) {
        let params = params.clamped();
        if params != self.params {
            self.params = params;
            self.needs_reload = true;
        }
    }

    /// Runs a pending reload, if any. Called once per frame from the
    /// GUI; on failure the previously loaded sheet stays visible and
    /// only the error line changes.
    pub fn maybe_reload(&mut self, gl: &glow::Context, painter: &mut Painter) {
        if !std::mem::take(&mut self.needs_reload) {
            return;
        }
        let Some(path) = self.current_file.clone() else {
            return;
        };

        match self.reload(gl, painter) {
            Ok(()) => {
                let count = self.sprite_names.len();
                self.status = format!("Loaded {} sprites", count);
                self.load_error = None;
                self.scroll.reset();
                log::info!(
                    "loaded {}: {} sprites (grid {}, margin {})",
                    path.display(),
                    count,
                    self.params.grid_size,
                    self.params.margin
                );
            }
            Err(err) => {
                log::warn!("failed to load {}: {}", path.display(), err);
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn reload(&mut self, gl: &glow::Context, painter: &mut Painter) -> Result<(), LoadError> {
        let Some(path) = self.current_file.clone() else {
            return Ok(());
        };

        let img = image::open(&path)?.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyImage);
        }

        let sheet = SpriteSheet::slice(width, height, self.params);
        if sheet.sprites.is_empty() {
            return Err(LoadError::NoSprites);
        }

        let texture = Texture::from_image(gl, &img).map_err(LoadError::Texture)?;
        let tex_id = painter.register_native_texture(texture.texture);

        if let Some(old) = self.loaded.take() {
            painter.free_texture(old.tex_id);
        }

        self.sprite_names = sorted_names(&sheet);
        self.loaded = Some(LoadedSheet { sheet, texture, tex_id });
        Ok(())
    }
}

/// Sprite names in natural order, the order they are displayed in.
fn sorted_names(sheet: &SpriteSheet) -> Vec<String> {
    let mut names: Vec<String> = sheet.sprites.keys().cloned().collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_sorted_row_major() {
        let sheet = SpriteSheet::slice(64, 32, SheetParams::new(0, 16));
        let names = sorted_names(&sheet);
        assert_eq!(
            names,
            vec![
                "sprite_0_0", "sprite_0_1", "sprite_0_2", "sprite_0_3",
                "sprite_1_0", "sprite_1_1", "sprite_1_2", "sprite_1_3",
            ]
        );
    }

    #[test]
    fn test_double_digit_indices_sort_after_single() {
        // 11 columns: sprite_0_10 must come after sprite_0_9, not after sprite_0_1
        let sheet = SpriteSheet::slice(176, 16, SheetParams::new(0, 16));
        let names = sorted_names(&sheet);
        assert_eq!(names.len(), 11);
        assert_eq!(names[1], "sprite_0_1");
        assert_eq!(names[9], "sprite_0_9");
        assert_eq!(names[10], "sprite_0_10");
    }

    #[test]
    fn test_set_params_clamps() {
        let mut session = ViewerSession::new(SheetParams::new(1, 16), None);
        session.set_params(SheetParams { margin: 15, grid_size: 100 });
        assert_eq!(session.params, SheetParams { margin: 10, grid_size: 64 });
    }
}
