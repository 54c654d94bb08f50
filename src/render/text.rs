use std::{path::Path, sync::Arc};

use crate::foundation::error::{HeartError, HeartResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Raw font file contents plus the face index inside it.
#[derive(Clone)]
pub struct FontBytes {
    pub data: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBytes")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Find a caption font.
///
/// An explicit `font_path` must be readable. Without one, installed system fonts are searched for
/// a bold sans-serif face, then any face at all; `Ok(None)` means the machine has no fonts.
pub fn resolve_caption_font(font_path: Option<&Path>) -> HeartResult<Option<FontBytes>> {
    if let Some(path) = font_path {
        let data = std::fs::read(path).map_err(|e| HeartError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "loaded caption font");
        return Ok(Some(FontBytes {
            data: Arc::new(data),
            index: 0,
        }));
    }

    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = [
        usvg::fontdb::Family::SansSerif,
        usvg::fontdb::Family::Serif,
        usvg::fontdb::Family::Monospace,
    ];
    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::BOLD,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let Some(id) = db.query(&query).or_else(|| db.faces().next().map(|f| f.id)) else {
        return Ok(None);
    };
    let font = db.with_face_data(id, |data, index| FontBytes {
        data: Arc::new(data.to_vec()),
        index,
    });
    if let Some(f) = &font {
        tracing::debug!(faces = db.len(), bytes = f.data.len(), "resolved system caption font");
    }
    Ok(font)
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: None,
        }
    }

    /// Register `font` and remember its family for later layouts.
    pub fn register(&mut self, font: &FontBytes) -> HeartResult<String> {
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HeartError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HeartError::render("registered font family has no name"))?
            .to_string();
        self.family_name = Some(family_name.clone());
        Ok(family_name)
    }

    /// Shape a single unwrapped line of text in the registered family.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> HeartResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HeartError::invalid_argument(
                "text size must be finite and > 0",
            ));
        }
        let family_name = self
            .family_name
            .clone()
            .ok_or_else(|| HeartError::render("no font registered for text layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
