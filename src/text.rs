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
//! Text measurement is an external service: the context is configured with a
//! [`TextMeasure`] implementation and asks it for glyph advances and line height.

/// Capability the context uses to measure text for layout and glyph placement.
pub trait TextMeasure {
    /// Horizontal advance of a single character, in pixels.
    fn char_advance(&self, c: char) -> f32;

    /// Height of one line of text, in pixels.
    fn line_height(&self) -> f32;

    /// Texture coordinates `[u0, v0, u1, v1]` of a glyph inside the font atlas, if the
    /// glyph has a visible image. Whitespace and unknown glyphs return `None`.
    fn glyph_uv(&self, c: char) -> Option<[f32; 4]> {
        if c.is_whitespace() { None } else { Some([0.0, 0.0, 1.0, 1.0]) }
    }

    /// Width and height of a (possibly multi-line) string.
    fn text_size(&self, text: &str) -> (f32, f32) {
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for line in text.split('\n') {
            let w: f32 = line.chars().map(|c| self.char_advance(c)).sum();
            width = width.max(w);
            lines += 1;
        }
        (width, lines as f32 * self.line_height())
    }
}

/// Part of a label that is displayed; anything after `##` only contributes to the ID.
pub fn visible_label(label: &str) -> &str {
    match label.find("##") {
        Some(end) => &label[..end],
        None => label,
    }
}

#[derive(Copy, Clone, Debug)]
/// Monospace metrics used when no real font is configured.
pub struct FixedWidthFont {
    /// Advance of every glyph.
    pub advance: f32,
    /// Line height.
    pub line_height: f32,
}

impl Default for FixedWidthFont {
    fn default() -> Self { Self { advance: 7.0, line_height: 13.0 } }
}

impl TextMeasure for FixedWidthFont {
    fn char_advance(&self, _c: char) -> f32 { self.advance }

    fn line_height(&self) -> f32 { self.line_height }
}
