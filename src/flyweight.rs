// Flyweight Pattern - one shared glyph per character code
// The factory creates a glyph the first time a code is asked for and hands
// out the same Arc on every later lookup.

use crate::error::CatalogError;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub type CharacterCode = u32;

// ============================================================================
// Templates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTemplate {
    pub symbol: char,
    pub width: u32,
    pub height: u32,
}

const TEMPLATES: [(CharacterCode, GlyphTemplate); 3] = [
    (1, GlyphTemplate { symbol: 'A', width: 10, height: 20 }),
    (2, GlyphTemplate { symbol: 'B', width: 20, height: 30 }),
    (3, GlyphTemplate { symbol: 'C', width: 40, height: 50 }),
];

pub fn template_for(code: CharacterCode) -> Option<GlyphTemplate> {
    TEMPLATES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, template)| *template)
}

pub fn known_codes() -> impl Iterator<Item = CharacterCode> {
    TEMPLATES.iter().map(|(code, _)| *code)
}

// ============================================================================
// Glyph
// ============================================================================

/// Intrinsic glyph state plus an identity token assigned at construction.
#[derive(Debug)]
pub struct Glyph {
    symbol: char,
    width: u32,
    height: u32,
    id: Uuid,
}

impl Glyph {
    fn from_template(template: GlyphTemplate) -> Self {
        Self {
            symbol: template.symbol,
            width: template.width,
            height: template.height,
            id: Uuid::new_v4(),
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn same_instance(a: &Arc<Glyph>, b: &Arc<Glyph>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "symbol = {} width = {} height = {} id = {}",
            self.symbol, self.width, self.height, self.id
        )
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Unbounded, never evicts. Safe to share between threads.
#[derive(Debug, Default)]
pub struct GlyphFactory {
    glyphs: DashMap<CharacterCode, Arc<Glyph>>,
}

impl GlyphFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached glyph for `code`, created on first use. Unknown codes return
    /// `None` and leave the cache untouched.
    pub fn get(&self, code: CharacterCode) -> Option<Arc<Glyph>> {
        if let Some(glyph) = self.glyphs.get(&code).map(|g| Arc::clone(g.value())) {
            return Some(glyph);
        }

        let template = template_for(code)?;

        // entry() holds the shard lock, so racing callers build one glyph
        let entry = self.glyphs.entry(code).or_insert_with(|| {
            debug!(code, symbol = %template.symbol, "creating glyph");
            Arc::new(Glyph::from_template(template))
        });
        Some(Arc::clone(entry.value()))
    }

    pub fn lookup(&self, code: CharacterCode) -> Result<Arc<Glyph>, CatalogError> {
        self.get(code).ok_or(CatalogError::UnknownCharacterCode(code))
    }

    pub fn contains(&self, code: CharacterCode) -> bool {
        self.glyphs.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
