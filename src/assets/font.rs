use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::foundation::error::{BannerError, BannerResult};

/// What the info band label asks for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontRequest {
    /// Preferred family; `None` accepts any face.
    pub family: Option<String>,
}

/// A font database ready for SVG text layout, plus the family to select from it.
#[derive(Clone, Debug)]
pub struct FontResource {
    pub(crate) fontdb: Arc<usvg::fontdb::Database>,
    pub(crate) family: String,
}

impl FontResource {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }
}

/// Source of fonts for label text.
pub trait FontProvider {
    fn resolve(&self, request: &FontRequest) -> BannerResult<FontResource>;
}

/// Loads a single font file (TTF/OTF/TTC).
#[derive(Clone, Debug)]
pub struct FileFontProvider {
    path: PathBuf,
}

impl FileFontProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FontProvider for FileFontProvider {
    fn resolve(&self, _request: &FontRequest) -> BannerResult<FontResource> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read font file '{}'", self.path.display()))
            .map_err(|e| BannerError::font(format!("{e:#}")))?;

        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes);
        let family = first_family(&db).ok_or_else(|| {
            BannerError::font(format!(
                "'{}' does not contain a usable font face",
                self.path.display()
            ))
        })?;

        Ok(FontResource {
            fontdb: Arc::new(db),
            family,
        })
    }
}

/// Uses whatever fonts the operating system provides.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemFontProvider;

impl FontProvider for SystemFontProvider {
    fn resolve(&self, request: &FontRequest) -> BannerResult<FontResource> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let requested = request.family.as_deref().and_then(|name| {
            db.faces()
                .flat_map(|f| f.families.iter())
                .find(|(family, _)| family.eq_ignore_ascii_case(name))
                .map(|(family, _)| family.clone())
        });
        let sans = || {
            let query = usvg::fontdb::Query {
                families: &[usvg::fontdb::Family::SansSerif],
                weight: usvg::fontdb::Weight::NORMAL,
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            db.query(&query)
                .and_then(|id| db.face(id))
                .and_then(|f| f.families.first())
                .map(|(family, _)| family.clone())
        };

        let family = requested
            .or_else(sans)
            .or_else(|| first_family(&db))
            .ok_or_else(|| BannerError::font("no system fonts available"))?;

        Ok(FontResource {
            fontdb: Arc::new(db),
            family,
        })
    }
}

fn first_family(db: &usvg::fontdb::Database) -> Option<String> {
    db.faces()
        .find_map(|f| f.families.first())
        .map(|(family, _)| family.clone())
}

/// Select the requested family and fall back to any loaded face.
pub(crate) fn svg_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
