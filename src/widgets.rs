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
//! Reference widgets composed from [`Context::item_add`] and [`Context::button_behavior`].

use std::cmp::max;

use crate::{Context, Corners, Dimensioni, DrawList, StyleColor, TextMeasure, rect, rect_corners, vec2f, visible_label};

impl Context {
    fn draw_in_window(&mut self, f: impl FnOnce(&mut DrawList, &dyn TextMeasure)) {
        let Some(handle) = self.current_window() else {
            return;
        };
        if let Some(window) = self.windows.get_mut(handle) {
            f(&mut window.draw_list, self.text.as_ref());
        }
    }

    /// Displays a line of text. Returns `false` when no visible window is current.
    pub fn text(&mut self, text: &str) -> bool {
        let size = self.calc_text_size(text);
        let Some(bb) = self.item_add(size, None) else {
            return false;
        };
        let color = self.style.color(StyleColor::Text);
        self.draw_in_window(|list, font| list.add_text(font, vec2f(bb.x as f32, bb.y as f32), color, text));
        true
    }

    /// Push button sized to its label. Returns `true` on the frame it is clicked.
    pub fn button(&mut self, label: &str) -> bool {
        let id = self.get_id(label);
        let shown = visible_label(label);
        let text_size = self.calc_text_size(shown);
        let pad = self.style.frame_padding;
        let size = Dimensioni::new(text_size.width + pad.x * 2, text_size.height + pad.y * 2);
        let Some(bb) = self.item_add(size, Some(id)) else {
            return false;
        };
        let state = self.button_behavior(bb, id);

        let role = match (state.held, state.hovered) {
            (true, _) => StyleColor::ButtonActive,
            (false, true) => StyleColor::ButtonHovered,
            _ => StyleColor::Button,
        };
        let fill = self.style.color(role);
        let text_color = self.style.color(StyleColor::Text);
        let rounding = self.style.frame_rounding;
        let slack = (bb.width - pad.x * 2 - text_size.width) as f32;
        let text_pos = vec2f(bb.x as f32 + pad.x as f32 + slack * self.style.button_text_align, (bb.y + pad.y) as f32);
        self.draw_in_window(|list, font| {
            let (a, b) = rect_corners(bb);
            list.add_rect_filled(a, b, fill, rounding, Corners::ALL);
            list.add_text(font, text_pos, text_color, shown);
        });
        state.pressed
    }

    /// Check box followed by its label. Toggles `value` and returns `true` when clicked.
    pub fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let id = self.get_id(label);
        let shown = visible_label(label);
        let text_size = self.calc_text_size(shown);
        let pad = self.style.frame_padding;
        let square = text_size.height + pad.y * 2;
        let label_width = if shown.is_empty() { 0 } else { self.style.item_inner_spacing.x + text_size.width };
        let Some(bb) = self.item_add(Dimensioni::new(square + label_width, square), Some(id)) else {
            return false;
        };
        let state = self.button_behavior(bb, id);
        if state.pressed {
            *value = !*value;
        }

        let role = match (state.held, state.hovered) {
            (true, _) => StyleColor::FrameBgActive,
            (false, true) => StyleColor::FrameBgHovered,
            _ => StyleColor::FrameBg,
        };
        let frame = self.style.color(role);
        let mark = self.style.color(StyleColor::CheckMark);
        let text_color = self.style.color(StyleColor::Text);
        let rounding = self.style.frame_rounding;
        let thickness = self.style.check_mark_thickness;
        let checked = *value;
        let text_x = (bb.x + square + self.style.item_inner_spacing.x) as f32;
        self.draw_in_window(|list, font| {
            let (a, b) = rect_corners(rect(bb.x, bb.y, square, square));
            list.add_rect_filled(a, b, frame, rounding, Corners::ALL);
            if checked {
                let s = square as f32;
                let inset = max(square / 6, 1) as f32;
                let points = [vec2f(a.x + inset, a.y + s * 0.5), vec2f(a.x + s * 0.45, b.y - inset * 1.5), vec2f(b.x - inset, a.y + inset)];
                list.add_polyline(&points, mark, false, thickness);
            }
            if !shown.is_empty() {
                list.add_text(font, vec2f(text_x, (bb.y + pad.y) as f32), text_color, shown);
            }
        });
        state.pressed
    }
}
