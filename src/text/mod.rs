//! Text placement over an injected glyph-outline source.

pub(crate) mod glyphs;
pub(crate) mod skrifa_source;
