//! A font's worth of glyphs sharing one shrink context
//!
//! Changing the zoom level means every cached shrunk image is stale. The
//! table owns the context, so it is the one place where the shrink factor
//! can change, and it clears all caches when it does.

use std::sync::Arc;

use crate::context::{validate_shrink_factor, ShrinkContext};
use crate::error::{GlyphError, Result};
use crate::glyph::Glyph;
use crate::types::ShrunkImage;

/// Character codes 0..=255, as in TeX fonts
pub const DEFAULT_TABLE_SIZE: usize = 256;

/// Glyphs indexed by character code
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: Vec<Option<Glyph>>,
    context: ShrinkContext,
}

impl GlyphTable {
    pub fn new(context: ShrinkContext) -> Self {
        Self::with_size(context, DEFAULT_TABLE_SIZE)
    }

    /// A table accepting character codes `0..size`
    pub fn with_size(context: ShrinkContext, size: usize) -> Self {
        Self {
            glyphs: vec![None; size],
            context,
        }
    }

    pub fn context(&self) -> &ShrinkContext {
        &self.context
    }

    /// Number of character codes the table can hold
    pub fn size(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of glyphs present
    pub fn len(&self) -> usize {
        self.glyphs.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `glyph` under `code`, returning the glyph it replaces
    pub fn insert(&mut self, code: u32, glyph: Glyph) -> Result<Option<Glyph>> {
        let slot = self.slot_mut(code)?;
        Ok(slot.replace(glyph))
    }

    pub fn remove(&mut self, code: u32) -> Option<Glyph> {
        self.glyphs.get_mut(code as usize).and_then(Option::take)
    }

    pub fn get(&self, code: u32) -> Option<&Glyph> {
        self.glyphs.get(code as usize).and_then(Option::as_ref)
    }

    /// Codes that have a glyph, ascending
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .filter(|(_, glyph)| glyph.is_some())
            .map(|(code, _)| code as u32)
    }

    /// Shrunk image for `code` at the table's current shrink factor
    ///
    /// `Ok(None)` when the code has no glyph.
    pub fn shrunk_character(&mut self, code: u32) -> Result<Option<Arc<ShrunkImage>>> {
        let context = &self.context;
        match self.glyphs.get_mut(code as usize) {
            Some(Some(glyph)) => glyph.shrunk_character(context).map(Some),
            _ => Ok(None),
        }
    }

    /// Switch to a new zoom level, invalidating every cached image
    ///
    /// Setting the factor the table already has keeps the caches.
    pub fn set_shrink_factor(&mut self, shrink_factor: f64) -> Result<()> {
        validate_shrink_factor(shrink_factor)?;
        if shrink_factor.to_bits() == self.context.shrink_factor().to_bits() {
            return Ok(());
        }

        log::debug!(
            "Shrink factor {} -> {}, clearing {} cached glyphs",
            self.context.shrink_factor(),
            shrink_factor,
            self.cached_count()
        );
        self.context.set_shrink_factor(shrink_factor)?;
        self.clear_shrunk_characters();
        Ok(())
    }

    /// Drop every cached shrunk image
    pub fn clear_shrunk_characters(&mut self) {
        for glyph in self.glyphs.iter_mut().flatten() {
            glyph.clear_shrunk_character();
        }
    }

    /// Number of glyphs holding a cached shrunk image
    pub fn cached_count(&self) -> usize {
        self.glyphs.iter().flatten().filter(|g| g.is_shrunk()).count()
    }

    fn slot_mut(&mut self, code: u32) -> Result<&mut Option<Glyph>> {
        let size = self.glyphs.len();
        self.glyphs
            .get_mut(code as usize)
            .ok_or(GlyphError::CodeOutOfRange { code, size })
    }
}
