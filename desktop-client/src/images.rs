use std::path::{Path, PathBuf};

use common::{log, log_warn};
use eframe::egui;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// Every puzzle image is scaled to this square.
pub const IMAGE_SIZE: u32 = 600;
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const FALLBACK_NAME: &str = "default";
const FALLBACK_BACKGROUND: Rgba<u8> = Rgba([176, 224, 230, 255]);
const FALLBACK_PANEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FALLBACK_MARGIN: u32 = 50;

pub struct LibraryImage {
    pub name: String,
    pub pixels: RgbaImage,
    texture: Option<egui::TextureHandle>,
}

impl LibraryImage {
    fn new(name: String, pixels: RgbaImage) -> Self {
        Self {
            name,
            pixels,
            texture: None,
        }
    }

    /// File stem cut down to fit a sidebar button.
    pub fn short_name(&self) -> String {
        self.name.chars().take(12).collect()
    }
}

/// Images available to the sliding and jigsaw puzzles. Never empty: when the
/// directory holds nothing usable a generated placeholder is served instead.
pub struct ImageLibrary {
    dir: PathBuf,
    images: Vec<LibraryImage>,
    uses_fallback: bool,
}

impl ImageLibrary {
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut images = Vec::new();

        match list_image_files(&dir) {
            Ok(paths) => {
                for path in paths {
                    match load_image(&path) {
                        Ok(pixels) => images.push(LibraryImage::new(stem_of(&path), pixels)),
                        Err(e) => log_warn!("Skipping image: {}", e),
                    }
                }
            }
            Err(e) => log_warn!("{}", e),
        }

        let uses_fallback = images.is_empty();
        if uses_fallback {
            log_warn!("No images found in {}, using placeholder", dir.display());
            images.push(LibraryImage::new(FALLBACK_NAME.to_string(), fallback_image()));
        } else {
            log!("Loaded {} images from {}", images.len(), dir.display());
        }

        Self {
            dir,
            images,
            uses_fallback,
        }
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn get(&self, index: usize) -> Option<&LibraryImage> {
        self.images.get(index)
    }

    pub fn images(&self) -> &[LibraryImage] {
        &self.images
    }

    pub fn uses_fallback(&self) -> bool {
        self.uses_fallback
    }

    /// Uploads the image at `index` on first use and returns its texture id.
    pub fn texture_id(&mut self, ctx: &egui::Context, index: usize) -> Option<egui::TextureId> {
        let image = self.images.get_mut(index)?;
        if image.texture.is_none() {
            let size = [image.pixels.width() as usize, image.pixels.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.pixels.as_raw());
            image.texture = Some(ctx.load_texture(&image.name, color_image, egui::TextureOptions::LINEAR));
        }
        image.texture.as_ref().map(|texture| texture.id())
    }

    /// Asks the user for an image file and imports it. `None` when the dialog was cancelled.
    pub fn upload_with_dialog(&mut self) -> Option<Result<usize, String>> {
        let path = rfd::FileDialog::new()
            .add_filter("Images", &SUPPORTED_EXTENSIONS)
            .pick_file()?;
        Some(self.import(&path))
    }

    /// Copies `source` into the library directory under the next free
    /// `image{n}` name, loads it and returns its index.
    pub fn import(&mut self, source: &Path) -> Result<usize, String> {
        let pixels = load_image(source)?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create {}: {}", self.dir.display(), e))?;

        let extension = normalized_extension(source);
        let mut count = self.real_image_count();
        let target = loop {
            let candidate = self.dir.join(next_file_name(count, extension));
            if !candidate.exists() {
                break candidate;
            }
            count += 1;
        };
        std::fs::copy(source, &target)
            .map_err(|e| format!("Failed to copy {}: {}", source.display(), e))?;

        if self.uses_fallback {
            self.images.clear();
            self.uses_fallback = false;
        }
        self.images.push(LibraryImage::new(stem_of(&target), pixels));
        log!("Imported {} as {}", source.display(), target.display());
        Ok(self.images.len() - 1)
    }

    fn real_image_count(&self) -> usize {
        if self.uses_fallback { 0 } else { self.images.len() }
    }
}

/// Solid panel with a white inner square.
pub fn fallback_image() -> RgbaImage {
    let inner = FALLBACK_MARGIN..IMAGE_SIZE - FALLBACK_MARGIN;
    RgbaImage::from_fn(IMAGE_SIZE, IMAGE_SIZE, |x, y| {
        if inner.contains(&x) && inner.contains(&y) {
            FALLBACK_PANEL
        } else {
            FALLBACK_BACKGROUND
        }
    })
}

/// Name for the upload that follows `count` existing images.
pub fn next_file_name(count: usize, extension: &str) -> String {
    format!("image{}.{}", count + 1, extension)
}

fn normalized_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "png",
        Some("jpeg") => "jpeg",
        _ => "jpg",
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read image directory {}: {}", dir.display(), e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn load_image(path: &Path) -> Result<RgbaImage, String> {
    let image = image::open(path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    Ok(image
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}
