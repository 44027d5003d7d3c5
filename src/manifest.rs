use crate::gallery::ImageRef;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Ordered image list for the gallery. One entry per line: `source` or `source | label`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageManifest {
    pub images: Vec<ImageRef>,
}

impl ImageManifest {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut images = Vec::new();
        for (line_idx, raw) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (source, label) = match line.split_once('|') {
                Some((s, l)) => (s.trim(), l.trim()),
                None => (line, ""),
            };
            if source.is_empty() {
                return Err(ManifestError::Parse {
                    line: line_no,
                    message: "expected <source> or <source> | <label>".to_string(),
                });
            }
            images.push(ImageRef::labeled(source, label));
        }
        Ok(Self { images })
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::Io(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for img in &self.images {
            if img.label.is_empty() {
                out.push_str(&img.source);
            } else {
                out.push_str(&img.source);
                out.push_str(" | ");
                out.push_str(&img.label);
            }
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> Vec<ImageRef> {
        self.images
    }
}

/// Catalog shown when no manifest is given.
pub fn builtin_manifest() -> ImageManifest {
    const ENTRIES: &[(&str, &str)] = &[
        ("/brazilian-coffee-beans-quarter-kg-package.jpg", "Brazilian Beans - Quarter Package"),
        ("/brazilian-coffee-beans-one-kg-package.jpg", "Brazilian Beans - Family Size"),
        ("/premium-coffee-shop-hoodie-earth-tones.jpg", "Hoodie - Earth Tones"),
        ("/coffee-shop-t-shirt-minimalist-design.jpg", "T-Shirt - Minimalist Design"),
        ("/coffee-shop-baseball-cap-earth-tones.jpg", "Cap - Embroidered Logo"),
        ("/minimalist-jewelry-set-coffee-inspired.jpg", "Jewelry Set - Coffee Inspired"),
        ("/premium-coffee-magazine-cover-minimalist-design.jpg", "Magazine - Coffee Culture"),
    ];
    ImageManifest {
        images: ENTRIES
            .iter()
            .map(|(src, label)| ImageRef::labeled(*src, *label))
            .collect(),
    }
}
