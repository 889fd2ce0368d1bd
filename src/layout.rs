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
use super::*;
use std::cmp::max;

/// Pen state driving automatic item placement inside a window.
#[derive(Clone, Copy, Default)]
pub struct LayoutCursor {
    origin: Vec2i,
    pos: Vec2i,
    prev_line_end: Vec2i,
    line_height: i32,
    prev_line_height: i32,
    indent: i32,
    max: Vec2i,
}

impl LayoutCursor {
    /// Creates a cursor whose lines start at `origin`.
    pub fn new(origin: Vec2i) -> Self {
        Self {
            origin,
            pos: origin,
            prev_line_end: origin,
            line_height: 0,
            prev_line_height: 0,
            indent: 0,
            max: origin,
        }
    }

    /// Position the next item will be placed at.
    pub fn pos(&self) -> Vec2i { self.pos }

    /// Moves the pen. Subsequent lines still start at the origin plus indent.
    pub fn set_pos(&mut self, pos: Vec2i) {
        self.pos = pos;
        self.grow_extent(pos);
    }

    /// Start of every line, before indentation.
    pub fn origin(&self) -> Vec2i { self.origin }

    /// Height of the tallest item on the current line so far.
    pub fn line_height(&self) -> i32 { self.line_height }

    /// Accumulated indentation.
    pub fn indent_width(&self) -> i32 { self.indent }

    /// Bottom-right corner of everything placed so far.
    pub fn extent(&self) -> Vec2i { self.max }

    /// Content size measured from the origin.
    pub fn content_size(&self) -> Vec2i { vec2(self.max.x - self.origin.x, self.max.y - self.origin.y) }

    fn line_start_x(&self) -> i32 { self.origin.x + self.indent }

    fn grow_extent(&mut self, p: Vec2i) {
        self.max.x = max(self.max.x, p.x);
        self.max.y = max(self.max.y, p.y);
    }

    /// Records an item of `size` at the pen and moves the pen to the next line.
    pub fn item_size(&mut self, size: Dimensioni, spacing: Vec2i) {
        let line_height = max(self.line_height, size.height);
        self.prev_line_end = vec2(self.pos.x + size.width, self.pos.y);
        self.prev_line_height = line_height;
        let end = vec2(self.pos.x + size.width, self.pos.y + line_height);
        self.grow_extent(end);

        self.pos = vec2(self.line_start_x(), self.pos.y + line_height + spacing.y);
        self.line_height = 0;
    }

    /// Places the pen right after the previous item, on its line.
    pub fn same_line(&mut self, spacing_x: i32) {
        self.pos = vec2(self.prev_line_end.x + spacing_x, self.prev_line_end.y);
        self.line_height = self.prev_line_height;
    }

    /// Terminates the current line; an empty line advances by `default_height`.
    pub fn new_line(&mut self, default_height: i32, spacing: Vec2i) {
        let height = if self.line_height > 0 { 0 } else { default_height };
        self.item_size(Dimensioni::new(0, height), spacing);
    }

    /// Increases the indentation and moves the pen to the indented line start.
    pub fn indent(&mut self, width: i32) {
        self.indent += width;
        self.pos.x = self.line_start_x();
    }

    /// Decreases the indentation (never below zero).
    pub fn unindent(&mut self, width: i32) {
        self.indent = max(0, self.indent - width);
        self.pos.x = self.line_start_x();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(c: &LayoutCursor) -> (i32, i32) { (c.pos().x, c.pos().y) }

    #[test]
    fn items_stack_vertically() {
        let mut c = LayoutCursor::new(vec2(10, 20));
        c.item_size(Dimensioni::new(50, 16), vec2(8, 4));
        assert_eq!(pos(&c), (10, 40));
        c.item_size(Dimensioni::new(30, 10), vec2(8, 4));
        assert_eq!(pos(&c), (10, 54));
        assert_eq!((c.content_size().x, c.content_size().y), (50, 30));
    }

    #[test]
    fn same_line_uses_tallest_item() {
        let mut c = LayoutCursor::new(vec2(0, 0));
        c.item_size(Dimensioni::new(40, 10), vec2(8, 4));
        c.same_line(8);
        assert_eq!(pos(&c), (48, 0));
        c.item_size(Dimensioni::new(20, 30), vec2(8, 4));
        assert_eq!(pos(&c), (0, 34));
        c.same_line(8);
        // the shorter first item does not shrink the line
        c.item_size(Dimensioni::new(10, 5), vec2(8, 4));
        assert_eq!(pos(&c), (0, 34));
    }

    #[test]
    fn indent_shifts_line_start() {
        let mut c = LayoutCursor::new(vec2(5, 5));
        c.indent(21);
        assert_eq!(pos(&c), (26, 5));
        c.item_size(Dimensioni::new(10, 10), vec2(0, 0));
        assert_eq!(pos(&c), (26, 15));
        c.unindent(100);
        assert_eq!(c.indent_width(), 0);
        assert_eq!(pos(&c), (5, 15));
    }

    #[test]
    fn new_line_on_empty_line_advances_default_height() {
        let mut c = LayoutCursor::new(vec2(0, 0));
        c.new_line(13, vec2(8, 4));
        assert_eq!(pos(&c), (0, 17));
    }
}
