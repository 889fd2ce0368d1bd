//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use std::collections::HashMap;

use crate::{FontError, TextMeasure};
use fontdue::{Font, FontSettings};

/// [`TextMeasure`] backed by real font metrics rasterized through `fontdue`.
///
/// Glyph images live in an atlas owned by the renderer. The host registers where each
/// glyph was packed with [`FontdueMeasure::set_glyph_uv`]; glyphs that were never
/// registered, or that have an empty bitmap, produce no quad.
pub struct FontdueMeasure {
    font: Font,
    size: f32,
    line_height: f32,
    uvs: HashMap<char, [f32; 4]>,
}

impl FontdueMeasure {
    /// Parses a TTF/OTF font and measures it at `size` pixels.
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self, FontError> {
        if !(size > 0.0) {
            return Err(FontError::InvalidSize(size));
        }
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| FontError::InvalidFont(e.to_string()))?;
        let line_height = match font.horizontal_line_metrics(size) {
            Some(metrics) => metrics.new_line_size,
            None => size,
        };
        Ok(Self { font, size, line_height, uvs: HashMap::new() })
    }

    /// Pixel size the font is measured at.
    pub fn size(&self) -> f32 { self.size }

    /// Records the atlas rectangle `[u0, v0, u1, v1]` holding the image of `c`.
    pub fn set_glyph_uv(&mut self, c: char, uv: [f32; 4]) { self.uvs.insert(c, uv); }

    /// Pixel size of the bitmap `fontdue` rasterizes for `c`, for packing it into an atlas.
    pub fn glyph_bitmap_size(&self, c: char) -> (usize, usize) {
        let metrics = self.font.metrics(c, self.size);
        (metrics.width, metrics.height)
    }
}

impl TextMeasure for FontdueMeasure {
    fn char_advance(&self, c: char) -> f32 { self.font.metrics(c, self.size).advance_width }

    fn line_height(&self) -> f32 { self.line_height }

    fn glyph_uv(&self, c: char) -> Option<[f32; 4]> {
        let (w, h) = self.glyph_bitmap_size(c);
        if w == 0 || h == 0 {
            return None;
        }
        self.uvs.get(&c).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_font_data() {
        assert!(matches!(FontdueMeasure::from_bytes(b"definitely not a font", 16.0), Err(FontError::InvalidFont(_))));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(FontdueMeasure::from_bytes(&[], 0.0).err(), Some(FontError::InvalidSize(0.0)));
        assert!(matches!(FontdueMeasure::from_bytes(&[], f32::NAN), Err(FontError::InvalidSize(_))));
    }
}
