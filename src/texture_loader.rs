use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use ::image::metadata::Orientation;
use log::debug;
use raylib::prelude::*;

use crate::constants::*;
use crate::error::LoadError;

/// Pixels decoded off the main thread, ready to be uploaded to the GPU.
#[derive(Debug)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()))
}

pub fn is_image_path(path: &Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

pub fn is_audio_path(path: &Path) -> bool {
    has_extension(path, AUDIO_EXTENSIONS)
}

// --- Helper: Load and Sort Image Paths ---
fn sorted_images_in(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_error = |source| LoadError::Read {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Expands directories (sorted by file name, not recursive) and keeps files
/// in the order given. Explicit files are kept whatever their extension;
/// the decoder decides whether they are images.
pub fn collect_image_paths(inputs: &[PathBuf]) -> (Vec<PathBuf>, Vec<LoadError>) {
    let mut paths = Vec::new();
    let mut errors = Vec::new();
    for input in inputs {
        if input.is_dir() {
            match sorted_images_in(input) {
                Ok(found) if found.is_empty() => errors.push(LoadError::NoImages { path: input.clone() }),
                Ok(found) => paths.extend(found),
                Err(e) => errors.push(e),
            }
        } else {
            paths.push(input.clone());
        }
    }
    (paths, errors)
}

fn exif_orientation(file_bytes: &[u8]) -> Option<Orientation> {
    // Only the primary image's tag matters; anything unreadable means "as stored"
    let exif = Reader::new().read_from_container(&mut Cursor::new(file_bytes)).ok()?;
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    match &field.value {
        Value::Short(values) => values.first().and_then(|&v| u8::try_from(v).ok()).and_then(Orientation::from_exif),
        _ => None,
    }
}

// --- Load Image, Apply EXIF Orientation, Convert to RGBA ---
pub fn decode_image(image_path: &Path) -> Result<DecodedImage, LoadError> {
    let file_bytes = fs::read(image_path).map_err(|source| LoadError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    let mut image = ::image::load_from_memory(&file_bytes).map_err(|source| LoadError::Decode {
        path: image_path.to_path_buf(),
        source,
    })?;

    if let Some(orientation) = exif_orientation(&file_bytes) {
        if orientation != Orientation::NoTransforms {
            debug!("Applying EXIF orientation {:?} to {}", orientation, image_path.display());
            image.apply_orientation(orientation);
        }
    }

    let rgba = image.into_rgba8();
    Ok(DecodedImage {
        path: image_path.to_path_buf(),
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

// --- Create Texture from decoded pixels (main thread only) ---
pub fn upload_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    decoded: &DecodedImage,
) -> Result<Texture2D, LoadError> {
    let texture_error = |reason: String| LoadError::Texture {
        path: decoded.path.clone(),
        reason,
    };

    let width = i32::try_from(decoded.width).map_err(|_| texture_error("image too wide".into()))?;
    let height = i32::try_from(decoded.height).map_err(|_| texture_error("image too tall".into()))?;

    // Blank RGBA8 image of the right size, then copy the decoded pixels in
    let blank = Image::gen_image_color(width, height, Color::BLANK);
    let mut texture = rl
        .load_texture_from_image(thread, &blank)
        .map_err(|e| texture_error(e.to_string()))?;
    drop(blank);

    texture
        .update_texture(&decoded.rgba)
        .map_err(|e| texture_error(e.to_string()))?;
    texture.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_BILINEAR);

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("slideshow-player-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn classifies_by_extension() {
        assert!(is_image_path(Path::new("a/b/photo.JPG")));
        assert!(is_image_path(Path::new("x.webp")));
        assert!(!is_image_path(Path::new("song.mp3")));
        assert!(is_audio_path(Path::new("song.mp3")));
        assert!(is_audio_path(Path::new("loop.OGG")));
        assert!(!is_audio_path(Path::new("noext")));
    }

    #[test]
    fn directories_expand_sorted_and_files_keep_order() {
        let dir = scratch_dir("collect");
        for name in ["b.png", "a.jpg", "notes.txt"] {
            fs::write(dir.join(name), b"x").expect("write file");
        }
        let loose = PathBuf::from("z-first.png");

        let (paths, errors) = collect_image_paths(&[loose.clone(), dir.clone()]);
        assert!(errors.is_empty());
        assert_eq!(paths, vec![loose, dir.join("a.jpg"), dir.join("b.png")]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_without_images_is_reported() {
        let dir = scratch_dir("empty");
        fs::write(dir.join("readme.txt"), b"x").expect("write file");

        let (paths, errors) = collect_image_paths(&[dir.clone()]);
        assert!(paths.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::NoImages { path } if *path == dir));
        assert!(errors[0].notice().ends_with(": no images found"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn decodes_png_to_rgba() {
        let dir = scratch_dir("decode");
        let path = dir.join("pixel.png");
        let mut img = ::image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, ::image::Rgba([10, 20, 30, 255]));
        img.save(&path).expect("save png");

        let decoded = decode_image(&path).expect("png should decode");
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
        assert_eq!(&decoded.rgba[(1 * 3 + 2) * 4..][..4], &[10, 20, 30, 255]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_fails_to_decode() {
        let dir = scratch_dir("garbage");
        let path = dir.join("broken.jpg");
        fs::write(&path, b"definitely not a jpeg").expect("write file");
        assert!(matches!(decode_image(&path), Err(LoadError::Decode { .. })));
        assert!(matches!(decode_image(&dir.join("missing.png")), Err(LoadError::Read { .. })));
        let _ = fs::remove_dir_all(&dir);
    }
}
