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
use std::{cmp::max, collections::HashMap};

use super::*;

/// A named, persistent window. Created by the first `begin` with its name and kept
/// until the context drops it or [`Context::remove_window`] frees it.
pub struct Window {
    id: Id,
    name: String,
    pub(crate) pos: Vec2i,
    pub(crate) size_full: Dimensioni,
    pub(crate) size: Dimensioni,
    pub(crate) scroll: Vec2i,
    pub(crate) content_size: Dimensioni,
    pub(crate) title_bar_height: i32,
    pub(crate) has_close_button: bool,
    pub(crate) active: bool,
    pub(crate) was_active: bool,
    pub(crate) hidden: bool,
    pub(crate) collapsed: bool,
    pub(crate) flags: WindowFlags,
    pub(crate) last_frame_active: u64,
    pub(crate) cursor: LayoutCursor,
    pub(crate) draw_list: DrawList,
}

impl Window {
    pub(crate) fn new(id: Id, name: &str, pos: Vec2i, size: Dimensioni) -> Self {
        Self {
            id,
            name: name.to_string(),
            pos,
            size_full: size,
            size,
            scroll: Vec2i::default(),
            content_size: Dimensioni::new(0, 0),
            title_bar_height: 0,
            has_close_button: false,
            active: false,
            was_active: false,
            hidden: false,
            collapsed: false,
            flags: WindowFlags::NONE,
            last_frame_active: 0,
            cursor: LayoutCursor::default(),
            draw_list: DrawList::new(),
        }
    }

    /// Identity derived from the window name.
    pub fn id(&self) -> Id { self.id }

    /// Name given to `begin`.
    pub fn name(&self) -> &str { &self.name }

    /// Top-left corner in screen space.
    pub fn pos(&self) -> Vec2i { self.pos }

    /// Size when expanded.
    pub fn size_full(&self) -> Dimensioni { self.size_full }

    /// Size as drawn this frame (title bar only when collapsed).
    pub fn size(&self) -> Dimensioni { self.size }

    /// Screen rectangle as drawn this frame.
    pub fn rect(&self) -> Recti { rect(self.pos.x, self.pos.y, self.size.width, self.size.height) }

    /// Title bar rectangle; empty when the window has no title bar.
    pub fn title_bar_rect(&self) -> Recti { rect(self.pos.x, self.pos.y, self.size.width, self.title_bar_height) }

    /// Scroll offset of the content.
    pub fn scroll(&self) -> Vec2i { self.scroll }

    /// Extent of the content submitted during the last completed `begin`/`end` pair.
    pub fn content_size(&self) -> Dimensioni { self.content_size }

    /// Whether `begin` was called for this window in the current frame.
    pub fn is_active(&self) -> bool { self.active }

    /// Whether `begin` was called for this window in the previous frame.
    pub fn was_active(&self) -> bool { self.was_active }

    /// Whether the caller's open flag was false.
    pub fn is_hidden(&self) -> bool { self.hidden }

    /// Whether only the title bar is shown.
    pub fn is_collapsed(&self) -> bool { self.collapsed }

    /// Flags passed to the last `begin`.
    pub fn flags(&self) -> WindowFlags { self.flags }

    /// Frame counter value of the last `begin`.
    pub fn last_frame_active(&self) -> u64 { self.last_frame_active }

    /// Private draw list holding this window's widget geometry.
    pub fn draw_list(&self) -> &DrawList { &self.draw_list }

    pub(crate) fn is_visible(&self) -> bool { self.active && !self.hidden }

    /// Rectangle content is laid out and clipped in.
    pub(crate) fn content_rect(&self, padding: Vec2i) -> Recti {
        rect(
            self.pos.x + padding.x,
            self.pos.y + self.title_bar_height + padding.y,
            max(self.size.width - padding.x * 2, 0),
            max(self.size.height - self.title_bar_height - padding.y * 2, 0),
        )
    }

    pub(crate) fn max_scroll(&self, padding: Vec2i) -> Vec2i {
        let visible = self.content_rect(padding);
        vec2(max(self.content_size.width - visible.width, 0), max(self.content_size.height - visible.height, 0))
    }

    pub(crate) fn clamp_scroll(&mut self, padding: Vec2i) {
        let limit = self.max_scroll(padding);
        self.scroll.x = self.scroll.x.clamp(0, limit.x);
        self.scroll.y = self.scroll.y.clamp(0, limit.y);
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// Stable handle into the [`WindowRegistry`]. A handle outlives the window it names;
/// once the window is removed the handle resolves to `None`, even if the slot is reused.
pub struct WindowHandle {
    index: u32,
    generation: u32,
}

impl WindowHandle {
    /// Slot index inside the registry.
    pub fn index(&self) -> usize { self.index as usize }
}

struct Slot {
    generation: u32,
    window: Option<Window>,
}

#[derive(Default)]
/// Arena owning every window of a context, addressed by [`WindowHandle`] and looked up by name hash.
pub struct WindowRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_id: HashMap<Id, WindowHandle>,
    order: Vec<WindowHandle>,
}

impl WindowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Number of live windows.
    pub fn len(&self) -> usize { self.by_id.len() }

    /// Returns `true` when no window is alive.
    pub fn is_empty(&self) -> bool { self.by_id.is_empty() }

    /// Finds the window registered under `id`.
    pub fn find(&self, id: Id) -> Option<WindowHandle> { self.by_id.get(&id).copied() }

    /// Finds the window registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<WindowHandle> { self.find(Id::from_str(name)) }

    /// Stores `window` and returns its handle. A window with the same id is replaced.
    pub fn insert(&mut self, window: Window) -> WindowHandle {
        if let Some(old) = self.find(window.id()) {
            self.remove(old);
        }
        let id = window.id();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.window = Some(window);
                WindowHandle { index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, window: Some(window) });
                WindowHandle { index: (self.slots.len() - 1) as u32, generation: 0 }
            }
        };
        self.by_id.insert(id, handle);
        self.order.push(handle);
        handle
    }

    /// Returns the window behind `handle`, or `None` if it was removed.
    pub fn get(&self, handle: WindowHandle) -> Option<&Window> {
        match self.slots.get(handle.index()) {
            Some(slot) if slot.generation == handle.generation => slot.window.as_ref(),
            _ => None,
        }
    }

    /// Mutable variant of [`WindowRegistry::get`].
    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.generation == handle.generation => slot.window.as_mut(),
            _ => None,
        }
    }

    /// Frees the window behind `handle` and returns it.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<Window> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let window = slot.window.take()?;
        self.by_id.remove(&window.id());
        self.order.retain(|h| *h != handle);
        self.free.push(handle.index);
        Some(window)
    }

    /// Handles in display order, back to front.
    pub fn display_order(&self) -> &[WindowHandle] { &self.order }

    /// Moves `handle` to the front of the display order.
    pub fn bring_to_front(&mut self, handle: WindowHandle) {
        if let Some(pos) = self.order.iter().position(|h| *h == handle) {
            self.order.remove(pos);
            self.order.push(handle);
        }
    }

    /// Iterates live windows in display order, back to front.
    pub fn iter(&self) -> impl Iterator<Item = (WindowHandle, &Window)> + '_ {
        self.order.iter().filter_map(move |h| self.get(*h).map(|w| (*h, w)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> + '_ { self.slots.iter_mut().filter_map(|slot| slot.window.as_mut()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(name: &str) -> Window { Window::new(Id::from_str(name), name, vec2(10, 20), Dimensioni::new(100, 80)) }

    #[test]
    fn lookup_by_name() {
        let mut reg = WindowRegistry::new();
        let a = reg.insert(window("A"));
        let b = reg.insert(window("B"));
        assert_eq!(reg.find_by_name("A"), Some(a));
        assert_eq!(reg.find_by_name("B"), Some(b));
        assert_eq!(reg.find_by_name("C"), None);
        assert_eq!(reg.get(a).map(|w| w.name()), Some("A"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn stale_handle_after_slot_reuse() {
        let mut reg = WindowRegistry::new();
        let a = reg.insert(window("A"));
        assert!(reg.remove(a).is_some());
        assert!(reg.get(a).is_none());
        assert!(reg.remove(a).is_none());

        let b = reg.insert(window("B"));
        assert_eq!(a.index(), b.index());
        assert!(reg.get(a).is_none());
        assert_eq!(reg.get(b).map(|w| w.name()), Some("B"));
        assert!(reg.find_by_name("A").is_none());
    }

    #[test]
    fn bring_to_front_reorders() {
        let mut reg = WindowRegistry::new();
        let a = reg.insert(window("A"));
        let b = reg.insert(window("B"));
        reg.bring_to_front(a);
        assert_eq!(reg.display_order(), &[b, a]);
        let names: Vec<&str> = reg.iter().map(|(_, w)| w.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut w = window("A");
        w.title_bar_height = 20;
        w.content_size = Dimensioni::new(50, 200);
        w.scroll = vec2(30, 500);
        w.clamp_scroll(vec2(8, 8));
        // visible content height: 80 - 20 - 16 = 44
        assert_eq!((w.scroll.x, w.scroll.y), (0, 156));
        w.scroll = vec2(0, -10);
        w.clamp_scroll(vec2(8, 8));
        assert_eq!(w.scroll.y, 0);
    }
}
