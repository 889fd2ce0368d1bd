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
//! The hit-test primitive every stateful widget is built from, plus item placement.

use crate::{Context, Dimensioni, Id, MouseButton, Recti, point_in_rect, rect};
use crate::context::LastItem;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
/// Interaction outcome of [`Context::button_behavior`].
pub struct ControlState {
    /// The mouse is over the widget and nothing else holds the mouse.
    pub hovered: bool,
    /// The widget is active and the button is still down.
    pub held: bool,
    /// The button was released over the widget after being pressed on it.
    pub pressed: bool,
}

impl Context {
    // the mouse must be over the current window's clip rect, which is the whole window
    // while the title bar is handled and the content rect once widgets are placed
    fn current_window_hoverable(&self) -> bool {
        let Some(current) = self.current_window() else {
            return false;
        };
        if self.hovered_window.is_some_and(|hovered| hovered != current) {
            return false;
        }
        self.windows.get(current).is_some_and(|w| point_in_rect(self.input.mouse_pos(), w.draw_list.clip_rect()))
    }

    /// Generic click behavior for the widget `id` occupying `bb`.
    ///
    /// A press over the widget makes it active and consumes the click edge; the
    /// release that follows clears the active id and counts as a press only when
    /// the mouse is still over the widget. Releasing outside cancels.
    pub fn button_behavior(&mut self, bb: Recti, id: Id) -> ControlState {
        let mouse = self.input.mouse_pos();
        let hovered = self.current_window_hoverable() && point_in_rect(mouse, bb) && self.active_id.is_none_or(|active| active == id);

        if hovered {
            self.hovered_id = Some(id);
            if self.input.mouse_clicked(MouseButton::LEFT) {
                self.active_id = Some(id);
                self.input.consume_click(MouseButton::LEFT);
            }
        }

        let mut state = ControlState { hovered, held: false, pressed: false };
        if self.active_id == Some(id) {
            self.active_id_alive = true;
            if self.input.mouse_released(MouseButton::LEFT) {
                state.pressed = hovered;
                self.active_id = None;
                self.input.consume_release(MouseButton::LEFT);
            } else if self.input.mouse_down(MouseButton::LEFT) {
                state.held = true;
            } else {
                self.active_id = None;
            }
        }

        self.last_item.hovered = hovered;
        state
    }

    /// Reserves `size` pixels at the layout cursor of the current window and returns
    /// the item rectangle. Returns `None` when no visible window is current.
    pub fn item_add(&mut self, size: Dimensioni, id: Option<Id>) -> Option<Recti> {
        let spacing = self.style.item_spacing;
        let window = self.current_window_mut()?;
        if window.is_hidden() || window.is_collapsed() {
            return None;
        }
        let pos = window.cursor.pos();
        window.cursor.item_size(size, spacing);
        let bb = rect(pos.x, pos.y, size.width, size.height);
        let hovered = self.current_window_hoverable() && point_in_rect(self.input.mouse_pos(), bb);
        self.last_item = LastItem { id, rect: bb, hovered };
        Some(bb)
    }

    /// Rectangle of the last placed item.
    pub fn last_item_rect(&self) -> Recti { self.last_item.rect }

    /// Whether the last item is under the mouse.
    pub fn is_item_hovered(&self) -> bool { self.last_item.hovered }

    /// Whether the last item holds the mouse.
    pub fn is_item_active(&self) -> bool { self.active_id.is_some() && self.active_id == self.last_item.id }
}
