use glow::HasContext;

/// A sprite sheet uploaded to the GPU, addressable from egui through the
/// texture id handed out by the glow painter.
pub struct Texture {
    pub texture: glow::NativeTexture,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Uploads a decoded RGBA8 image. Nearest-neighbor filtering keeps
    /// pixel-art sheets crisp when cells are scaled up for display;
    /// clamp-to-edge keeps clipped trailing cells from sampling the
    /// opposite edge of the sheet.
    pub fn from_image(gl: &glow::Context, img: &image::RgbaImage) -> Result<Self, String> {
        let (width, height) = img.dimensions();

        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(img.as_raw())),
            );

            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Texture { texture, width, height })
        }
    }
}
