//! The scene image behind the HUD.

use macroquad::prelude::{FilterMode, Image, Texture2D};
use zero_hour_core::SceneImage;

#[derive(Default)]
pub struct Backdrop {
    texture: Option<Texture2D>,
}

impl Backdrop {
    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    /// Swap in a new scene. An image that fails to decode leaves the current
    /// one in place.
    pub fn replace(&mut self, image: &SceneImage) {
        // The format is sniffed from the bytes; the mime type is only logged.
        match Image::from_file_with_format(&image.bytes, None) {
            Ok(decoded) => {
                let texture = Texture2D::from_image(&decoded);
                texture.set_filter(FilterMode::Linear);
                self.texture = Some(texture);
            }
            Err(err) => log::warn!("scene image ({}) could not be decoded: {err}", image.mime_type),
        }
    }
}
