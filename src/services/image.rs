// src/services/image.rs

//! Progressive image fallback.

use std::path::Path;

/// How far down the fallback chain an image has gone.
///
/// Each failed load advances one stage; `Placeholder` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFallback {
    Primary,
    TriedJpg,
    TriedPng,
    Placeholder,
}

impl ImageFallback {
    /// Stage to move to after the current candidate failed to load.
    pub fn next(self) -> Self {
        match self {
            ImageFallback::Primary => ImageFallback::TriedJpg,
            ImageFallback::TriedJpg => ImageFallback::TriedPng,
            ImageFallback::TriedPng | ImageFallback::Placeholder => ImageFallback::Placeholder,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ImageFallback::Placeholder
    }

    /// Image path to attempt at this stage.
    pub fn candidate(self, primary: &str, placeholder: &str) -> String {
        match self {
            ImageFallback::Primary => primary.to_string(),
            ImageFallback::TriedJpg => with_extension(primary, "jpg"),
            ImageFallback::TriedPng => with_extension(primary, "png"),
            ImageFallback::Placeholder => placeholder.to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFallback::Primary => "primary",
            ImageFallback::TriedJpg => "jpg",
            ImageFallback::TriedPng => "png",
            ImageFallback::Placeholder => "placeholder",
        }
    }
}

/// An image path with the fallback stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub src: String,
    pub stage: ImageFallback,
}

/// Walk the fallback chain against files under `image_dir`.
///
/// `primary` is a site path such as `/img/2024/foo.webp`; a candidate
/// "fails to load" when the matching file under `image_dir` is missing.
/// Without an image directory, or for paths outside `/img/`, the primary
/// path is returned untouched.
pub fn resolve_image(primary: &str, image_dir: Option<&Path>, placeholder: &str) -> ResolvedImage {
    let Some(dir) = image_dir else {
        return ResolvedImage {
            src: primary.to_string(),
            stage: ImageFallback::Primary,
        };
    };
    if primary == placeholder || !primary.starts_with("/img/") {
        return ResolvedImage {
            src: primary.to_string(),
            stage: ImageFallback::Primary,
        };
    }

    let mut stage = ImageFallback::Primary;
    loop {
        let src = stage.candidate(primary, placeholder);
        if stage.is_terminal() || exists_under(dir, &src) {
            return ResolvedImage { src, stage };
        }
        log::debug!("Image {} missing, falling back", src);
        stage = stage.next();
    }
}

fn exists_under(dir: &Path, site_path: &str) -> bool {
    let Some(relative) = site_path.strip_prefix("/img/") else {
        return false;
    };
    if relative.split('/').any(|seg| seg == "..") {
        return false;
    }
    dir.join(relative).is_file()
}

fn with_extension(path: &str, ext: &str) -> String {
    let stem_end = path
        .rfind('.')
        .filter(|&dot| path.rfind('/').is_none_or(|slash| dot > slash))
        .unwrap_or(path.len());
    format!("{}.{}", &path[..stem_end], ext)
}
