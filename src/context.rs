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
use std::cmp::max;

use tracing::{debug, trace, warn};

use crate::{
    Cond, Corners, Dimensioni, DrawCmd, DrawIdx, DrawList, FixedWidthFont, Id, IdStack, Input, LayoutCursor, MouseButton, Recti, Style,
    StyleColor, StylePreset, TextMeasure, UNCLIPPED_RECT, UiError, Vec2i, Vertex, Window, WindowFlags, WindowHandle, WindowRegistry, point_in_rect,
    rect, rect_corners, vec2, vec2f, visible_label,
};

/// Consumer of the flattened draw data, usually a GPU backend.
///
/// The renderer uploads the buffers and issues one draw call per command, applying
/// the command's clip rectangle as a scissor and binding its texture.
pub trait Renderer {
    /// Starts a pass over a display of the given size.
    fn begin(&mut self, display: Dimensioni);
    /// Draws the triangles of one command. `indices` is the command's slice of the index buffer.
    fn draw_elements(&mut self, vertices: &[Vertex], indices: &[DrawIdx], cmd: &DrawCmd);
    /// Finishes the pass.
    fn end(&mut self);
}

#[derive(Copy, Clone)]
/// Construction-time settings of a [`Context`].
pub struct ContextConfig {
    /// Report contract violations (unbalanced stacks, frame misuse) as errors instead of only logging them.
    pub strict: bool,
    /// Position given to a window the first time it is begun.
    pub default_window_pos: Vec2i,
    /// Size given to a window the first time it is begun.
    pub default_window_size: Dimensioni,
    /// Multiplier applied to [`Style::mouse_wheel_step`].
    pub scroll_speed: f32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            strict: false,
            default_window_pos: vec2(60, 60),
            default_window_size: Dimensioni::new(400, 400),
            scroll_speed: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Whether the context is between `new_frame` and `end_frame`.
pub enum FrameState {
    /// No frame is running.
    Idle,
    /// Widgets may be submitted.
    Active,
}

#[derive(Copy, Clone)]
struct StackEntry {
    handle: WindowHandle,
    // id stack depth right after the window's own scope was pushed
    id_depth: usize,
}

#[derive(Default)]
struct NextWindowData {
    pos: Option<(Vec2i, Cond)>,
    size: Option<(Dimensioni, Cond)>,
}

#[derive(Copy, Clone)]
pub(crate) struct LastItem {
    pub(crate) id: Option<Id>,
    pub(crate) rect: Recti,
    pub(crate) hovered: bool,
}

impl Default for LastItem {
    fn default() -> Self { Self { id: None, rect: rect(0, 0, 0, 0), hovered: false } }
}

/// Owner of all UI state: style, input, windows, the ID stack and the interaction identities.
///
/// A frame is driven as `new_frame` → `begin`/widgets/`end` → `end_frame` → `render`.
pub struct Context {
    config: ContextConfig,
    pub(crate) style: Style,
    pub(crate) text: Box<dyn TextMeasure>,
    pub(crate) input: Input,
    pub(crate) id_stack: IdStack,
    pub(crate) windows: WindowRegistry,
    window_stack: Vec<StackEntry>,
    background: DrawList,
    draw_data: DrawList,
    frame_state: FrameState,
    frame_count: u64,
    next_window: NextWindowData,
    pub(crate) hovered_window: Option<WindowHandle>,
    pub(crate) hovered_id: Option<Id>,
    pub(crate) active_id: Option<Id>,
    pub(crate) active_id_alive: bool,
    active_id_previous_frame: Option<Id>,
    pub(crate) last_item: LastItem,
}

impl Default for Context {
    fn default() -> Self { Self::new() }
}

impl Context {
    /// Creates a lenient context measuring text with [`FixedWidthFont`].
    pub fn new() -> Self { Self::with_config(ContextConfig::default()) }

    /// Creates a context with the given settings and [`FixedWidthFont`] metrics.
    pub fn with_config(config: ContextConfig) -> Self { Self::with_text_measure(config, Box::new(FixedWidthFont::default())) }

    /// Creates a context measuring text with `text`.
    pub fn with_text_measure(config: ContextConfig, text: Box<dyn TextMeasure>) -> Self {
        Self {
            config,
            style: Style::default(),
            text,
            input: Input::default(),
            id_stack: IdStack::new(),
            windows: WindowRegistry::new(),
            window_stack: Vec::new(),
            background: DrawList::new(),
            draw_data: DrawList::new(),
            frame_state: FrameState::Idle,
            frame_count: 0,
            next_window: NextWindowData::default(),
            hovered_window: None,
            hovered_id: None,
            active_id: None,
            active_id_alive: false,
            active_id_previous_frame: None,
            last_item: LastItem::default(),
        }
    }

    /// Settings the context was created with.
    pub fn config(&self) -> &ContextConfig { &self.config }

    /// Current style.
    pub fn style(&self) -> &Style { &self.style }

    /// Mutable access to the style, e.g. to tweak a single color.
    pub fn style_mut(&mut self) -> &mut Style { &mut self.style }

    /// Replaces the style.
    pub fn set_style(&mut self, style: Style) { self.style = style; }

    /// Switches to a built-in preset.
    pub fn set_style_preset(&mut self, preset: StylePreset) { self.style = Style::from_preset(preset); }

    /// Text measurement service in use.
    pub fn text_measure(&self) -> &dyn TextMeasure { self.text.as_ref() }

    /// Replaces the text measurement service.
    pub fn set_text_measure(&mut self, text: Box<dyn TextMeasure>) { self.text = text; }

    /// Pixel size of `text`, rounded up.
    pub fn calc_text_size(&self, text: &str) -> Dimensioni {
        let (w, h) = self.text.text_size(text);
        Dimensioni::new(w.ceil() as i32, h.ceil() as i32)
    }

    /// Height of one line of text, rounded up.
    pub fn text_line_height(&self) -> i32 { self.text.line_height().ceil() as i32 }

    /// Height of window title bars.
    pub fn title_bar_height(&self) -> i32 { self.text_line_height() + self.style.frame_padding.y * 2 }

    /// Input snapshot.
    pub fn input(&self) -> &Input { &self.input }

    /// Mutable input snapshot, for hosts that prefer feeding it directly.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Sets the display size used for clipping and hit testing.
    pub fn set_display_size(&mut self, width: i32, height: i32) { self.input.set_display_size(width, height); }

    /// Sets the mouse position in screen pixels.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) { self.input.set_mouse_pos(x, y); }

    /// Records a mouse button transition.
    pub fn set_mouse_button(&mut self, btn: MouseButton, down: bool) { self.input.set_mouse_button(btn, down); }

    /// Adds wheel notches (positive scrolls up).
    pub fn set_mouse_wheel(&mut self, wheel: f32) { self.input.set_mouse_wheel(wheel); }

    /// Records a key transition.
    pub fn set_key_down(&mut self, key: usize, down: bool) { self.input.set_key_down(key, down); }

    /// Sets the modifier state.
    pub fn set_key_modifiers(&mut self, ctrl: bool, shift: bool, alt: bool, super_key: bool) { self.input.set_key_modifiers(ctrl, shift, alt, super_key); }

    /// Queues a typed character; codepoints outside 1..=127 are dropped.
    pub fn add_input_character(&mut self, codepoint: u32) { self.input.add_input_character(codepoint); }

    /// Current lifecycle state.
    pub fn frame_state(&self) -> FrameState { self.frame_state }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u64 { self.frame_count }

    fn misuse(&self, err: UiError) -> Result<(), UiError> {
        if self.config.strict {
            debug!(%err, "ui contract violation");
            Err(err)
        } else {
            warn!(%err, "ignoring ui contract violation");
            Ok(())
        }
    }

    fn display_rect(&self) -> Recti {
        let size = self.input.display_size();
        if size.width <= 0 || size.height <= 0 { UNCLIPPED_RECT } else { rect(0, 0, size.width, size.height) }
    }

    /// Starts a frame: applies latched input, resets the hovered id, promotes the active id
    /// and clears the background draw list.
    pub fn new_frame(&mut self) -> Result<(), UiError> {
        let mut result = Ok(());
        if self.frame_state == FrameState::Active {
            result = self.misuse(UiError::FrameAlreadyActive);
            // close the dangling frame so its stacks do not leak into this one
            if let Err(err) = self.finish_frame() {
                warn!(%err, "dangling frame closed with unbalanced stacks");
            }
        }

        self.frame_count += 1;
        self.frame_state = FrameState::Active;
        trace!(frame = self.frame_count, "new frame");

        self.input.prelude();
        self.active_id_previous_frame = self.active_id;
        self.active_id_alive = false;
        self.hovered_id = None;
        self.last_item = LastItem::default();

        let display = self.display_rect();
        self.background.set_full_clip_rect(display);
        self.background.clear();

        for window in self.windows.iter_mut() {
            window.was_active = window.active;
            window.active = false;
        }
        self.hovered_window = self.find_hovered_window();
        result
    }

    /// Ends the frame: checks stack balance, releases an active id whose widget
    /// disappeared, and clears the typed characters.
    pub fn end_frame(&mut self) -> Result<(), UiError> {
        if self.frame_state != FrameState::Active {
            return self.misuse(UiError::FrameNotActive);
        }
        self.finish_frame()
    }

    fn finish_frame(&mut self) -> Result<(), UiError> {
        let mut result = Ok(());
        if !self.window_stack.is_empty() {
            result = self.misuse(UiError::UnbalancedWindowStack(self.window_stack.len()));
            self.window_stack.clear();
            self.id_stack.clear();
        } else if self.id_stack.depth() > 0 {
            result = self.misuse(UiError::UnbalancedIdStack(self.id_stack.depth()));
            self.id_stack.clear();
        }

        if self.active_id.is_some() && !self.active_id_alive {
            trace!("active widget was not submitted, releasing it");
            self.active_id = None;
        }
        self.next_window = NextWindowData::default();
        self.input.epilogue();
        self.frame_state = FrameState::Idle;
        result
    }

    fn find_hovered_window(&self) -> Option<WindowHandle> {
        let mouse = self.input.mouse_pos();
        self.windows
            .display_order()
            .iter()
            .rev()
            .copied()
            .find(|h| self.windows.get(*h).is_some_and(|w| w.was_active && !w.hidden && point_in_rect(mouse, w.rect())))
    }

    /// Flattens the background list and every visible window (frame, title bar, then
    /// the window's own geometry) into one draw list, back to front.
    pub fn render(&mut self) -> &DrawList {
        let display = self.display_rect();
        self.draw_data.set_full_clip_rect(display);
        self.draw_data.clear();
        self.draw_data.append(&self.background);

        let focused = self.windows.iter().filter(|(_, w)| w.is_visible()).last().map(|(h, _)| h);
        for (handle, window) in self.windows.iter().filter(|(_, w)| w.is_visible()) {
            draw_window_frame(&mut self.draw_data, window, &self.style, self.text.as_ref(), focused == Some(handle));
            self.draw_data.append(&window.draw_list);
        }
        &self.draw_data
    }

    /// Draw data produced by the last [`Context::render`].
    pub fn draw_data(&self) -> &DrawList { &self.draw_data }

    /// Renders and hands every non-empty command to `renderer`.
    pub fn render_to<R: Renderer>(&mut self, renderer: &mut R) {
        let display = self.input.display_size();
        let list = self.render();
        renderer.begin(display);
        let mut offset = 0;
        for cmd in list.commands() {
            let count = cmd.elem_count as usize;
            if count > 0 {
                renderer.draw_elements(list.vtx_buffer(), &list.idx_buffer()[offset..offset + count], cmd);
            }
            offset += count;
        }
        renderer.end();
    }

    /// ID of a string label in the current scope.
    pub fn get_id(&mut self, label: &str) -> Id { self.id_stack.get_id_from_str(label) }

    /// ID of an object's address in the current scope.
    pub fn get_id_from_ptr<T: ?Sized>(&mut self, value: &T) -> Id { self.id_stack.get_id_from_ptr(value) }

    /// ID of an integer in the current scope.
    pub fn get_id_from_int(&mut self, value: i64) -> Id { self.id_stack.get_id_from_int(value) }

    /// Opens an ID scope named by a string.
    pub fn push_id(&mut self, label: &str) { self.id_stack.push_id_from_str(label); }

    /// Opens an ID scope named by an object's address.
    pub fn push_id_from_ptr<T: ?Sized>(&mut self, value: &T) { self.id_stack.push_id_from_ptr(value); }

    /// Opens an ID scope named by an integer.
    pub fn push_id_from_int(&mut self, value: i64) { self.id_stack.push_id_from_int(value); }

    /// Closes the innermost ID scope. Scopes opened by `begin` are only closed by `end`.
    pub fn pop_id(&mut self) -> Result<(), UiError> {
        let floor = self.window_stack.last().map_or(0, |e| e.id_depth);
        if self.id_stack.depth() <= floor {
            return self.misuse(UiError::IdStackUnderflow);
        }
        self.id_stack.pop_id();
        Ok(())
    }

    /// ID scope depth, including the scopes opened by `begin`.
    pub fn id_stack_depth(&self) -> usize { self.id_stack.depth() }

    /// Widget under the mouse this frame, if any.
    pub fn hovered_id(&self) -> Option<Id> { self.hovered_id }

    /// Widget capturing the mouse, if any.
    pub fn active_id(&self) -> Option<Id> { self.active_id }

    /// Active widget at the start of this frame.
    pub fn active_id_previous_frame(&self) -> Option<Id> { self.active_id_previous_frame }

    /// Window registry.
    pub fn windows(&self) -> &WindowRegistry { &self.windows }

    /// Looks up a window by name.
    pub fn find_window(&self, name: &str) -> Option<WindowHandle> { self.windows.find_by_name(name) }

    /// Resolves a handle; `None` once the window has been removed.
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> { self.windows.get(handle) }

    /// Window at the top of the window stack.
    pub fn current_window(&self) -> Option<WindowHandle> { self.window_stack.last().map(|e| e.handle) }

    /// Number of windows currently between `begin` and `end`.
    pub fn window_stack_depth(&self) -> usize { self.window_stack.len() }

    pub(crate) fn current_window_mut(&mut self) -> Option<&mut Window> {
        let handle = self.current_window()?;
        self.windows.get_mut(handle)
    }

    /// Draw list of the current window.
    pub fn window_draw_list(&mut self) -> Option<&mut DrawList> { self.current_window_mut().map(|w| &mut w.draw_list) }

    /// Draw list rendered behind every window.
    pub fn background_draw_list(&mut self) -> &mut DrawList { &mut self.background }

    /// Frees a window and its draw list. Windows currently being built cannot be removed.
    pub fn remove_window(&mut self, name: &str) -> bool {
        let Some(handle) = self.windows.find_by_name(name) else {
            return false;
        };
        if self.window_stack.iter().any(|e| e.handle == handle) {
            warn!(name, "cannot remove a window between begin() and end()");
            return false;
        }
        if self.hovered_window == Some(handle) {
            self.hovered_window = None;
        }
        debug!(name, "removing window");
        self.windows.remove(handle).is_some()
    }

    /// Sets the position used by the next `begin`.
    pub fn set_next_window_pos(&mut self, pos: Vec2i, cond: Cond) { self.next_window.pos = Some((pos, cond)); }

    /// Sets the size used by the next `begin`.
    pub fn set_next_window_size(&mut self, size: Dimensioni, cond: Cond) { self.next_window.size = Some((size, cond)); }

    /// Pushes the window `name` (creating it on first use) and makes it current.
    ///
    /// When `open` is supplied and `false` the window is hidden; the title bar close box
    /// sets it to `false`. Returns `false` when the window is hidden or collapsed, in
    /// which case the body should be skipped. `end` must be called either way.
    pub fn begin(&mut self, name: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        if self.frame_state != FrameState::Active {
            warn!(name, "begin() called outside of a frame");
        }
        let id = Id::from_str(name);
        let (handle, created) = match self.windows.find(id) {
            Some(handle) => (handle, false),
            None => {
                debug!(name, "creating window");
                let window = Window::new(id, name, self.config.default_window_pos, self.config.default_window_size);
                (self.windows.insert(window), true)
            }
        };

        let next = std::mem::take(&mut self.next_window);
        let title_bar_height = if flags.has_no_title() { 0 } else { self.title_bar_height() };
        let frame = self.frame_count;
        let hidden = open.as_deref().is_some_and(|o| !*o);

        let Some(window) = self.windows.get_mut(handle) else {
            return false;
        };
        let first_begin = !window.active || window.last_frame_active != frame;
        window.flags = flags;
        window.hidden = hidden;
        window.title_bar_height = title_bar_height;
        window.has_close_button = open.is_some();
        if title_bar_height == 0 {
            window.collapsed = false;
        }
        if let Some((pos, cond)) = next.pos {
            if cond == Cond::Always || created {
                window.pos = pos;
            }
        }
        if let Some((size, cond)) = next.size {
            if cond == Cond::Always || created {
                window.size_full = size;
            }
        }
        if first_begin {
            window.active = true;
            window.last_frame_active = frame;
        }

        self.id_stack.push(id);
        self.window_stack.push(StackEntry { handle, id_depth: self.id_stack.depth() });
        if hidden {
            return false;
        }

        if first_begin && self.update_window(handle) {
            if let Some(open) = open {
                *open = false;
            }
        }
        self.last_item = LastItem::default();
        self.windows.get(handle).is_some_and(|w| !w.collapsed)
    }

    fn is_window_hovered(&self, handle: WindowHandle) -> bool {
        match self.hovered_window {
            Some(hovered) => hovered == handle,
            None => self.windows.get(handle).is_some_and(|w| point_in_rect(self.input.mouse_pos(), w.rect())),
        }
    }

    // title bar interaction, sizing, scrolling and per-frame reset; returns whether the close box was pressed
    fn update_window(&mut self, handle: WindowHandle) -> bool {
        let hovered = self.is_window_hovered(handle);
        if hovered && self.input.mouse_clicked(MouseButton::LEFT) {
            self.windows.bring_to_front(handle);
        }

        let display = self.display_rect();
        let Some((flags, title_bar, has_close)) = self.windows.get_mut(handle).map(|w| {
            let frame = w.rect();
            w.draw_list.set_full_clip_rect(display);
            w.draw_list.clear();
            w.draw_list.push_clip_rect(frame);
            (w.flags, w.title_bar_rect(), w.has_close_button)
        }) else {
            return false;
        };
        let mut close_pressed = false;
        if title_bar.height > 0 {
            let h = title_bar.height;
            if !flags.has_no_collapse() {
                let id = self.get_id("#COLLAPSE");
                if self.button_behavior(rect(title_bar.x, title_bar.y, h, h), id).pressed {
                    if let Some(window) = self.windows.get_mut(handle) {
                        window.collapsed = !window.collapsed;
                    }
                }
            }
            if has_close {
                let id = self.get_id("#CLOSE");
                close_pressed = self.button_behavior(rect(title_bar.x + title_bar.width - h, title_bar.y, h, h), id).pressed;
            }
            if !flags.is_fixed() {
                let id = self.get_id("#MOVE");
                if self.button_behavior(title_bar, id).held {
                    let delta = self.input.mouse_delta();
                    if let Some(window) = self.windows.get_mut(handle) {
                        window.pos.x += delta.x;
                        window.pos.y += delta.y;
                    }
                }
            }
        }

        let padding = self.style.window_padding;
        let min_size = self.style.window_min_size;
        let scroll_step = self.style.mouse_wheel_step as f32 * self.config.scroll_speed;
        let wheel = self.input.mouse_wheel();
        let Some(window) = self.windows.get_mut(handle) else {
            return close_pressed;
        };

        if flags.is_auto_sizing() && window.was_active {
            window.size_full = Dimensioni::new(
                window.content_size.width + padding.x * 2,
                window.content_size.height + padding.y * 2 + window.title_bar_height,
            );
        }
        window.size_full = Dimensioni::new(max(window.size_full.width, min_size.x), max(window.size_full.height, min_size.y));
        window.size = if window.collapsed { Dimensioni::new(window.size_full.width, window.title_bar_height) } else { window.size_full };

        if hovered && wheel != 0.0 && !flags.has_no_scroll() && !window.collapsed {
            window.scroll.y -= (wheel * scroll_step) as i32;
            self.input.consume_wheel();
        }
        window.clamp_scroll(padding);

        let content = window.content_rect(padding);
        window.draw_list.push_clip_rect(content);
        window.cursor = LayoutCursor::new(vec2(content.x - window.scroll.x, content.y - window.scroll.y));
        close_pressed
    }

    /// Pops the current window. With an empty stack this is a no-op reported as
    /// [`UiError::WindowStackUnderflow`] in strict mode.
    pub fn end(&mut self) -> Result<(), UiError> {
        let Some(entry) = self.window_stack.pop() else {
            return self.misuse(UiError::WindowStackUnderflow);
        };
        let leaked = self.id_stack.depth().saturating_sub(entry.id_depth);
        self.id_stack.truncate(entry.id_depth.saturating_sub(1));

        if let Some(window) = self.windows.get_mut(entry.handle) {
            if !window.hidden && !window.collapsed {
                let size = window.cursor.content_size();
                window.content_size = Dimensioni::new(size.x, size.y);
            }
        }
        if leaked > 0 {
            return self.misuse(UiError::UnbalancedIdStack(leaked));
        }
        Ok(())
    }

    /// Layout cursor of the current window.
    pub fn layout_cursor(&self) -> Option<&LayoutCursor> {
        let handle = self.current_window()?;
        self.windows.get(handle).map(|w| &w.cursor)
    }

    /// Places the next item on the same line as the previous one, `spacing` pixels
    /// after it (default: the style's horizontal item spacing).
    pub fn same_line(&mut self, spacing: Option<i32>) {
        let spacing = spacing.unwrap_or(self.style.item_spacing.x);
        if let Some(window) = self.current_window_mut() {
            window.cursor.same_line(spacing);
        }
    }

    /// Ends the current line; on an empty line, advances by one text line.
    pub fn new_line(&mut self) {
        let (height, spacing) = (self.text_line_height(), self.style.item_spacing);
        if let Some(window) = self.current_window_mut() {
            window.cursor.new_line(height, spacing);
        }
    }

    /// Adds vertical spacing.
    pub fn spacing(&mut self) {
        let spacing = self.style.item_spacing;
        if let Some(window) = self.current_window_mut() {
            window.cursor.item_size(Dimensioni::new(0, 0), spacing);
        }
    }

    /// Indents subsequent lines by `width` (or the style's indent spacing when `width <= 0`).
    pub fn indent(&mut self, width: i32) {
        let width = if width > 0 { width } else { self.style.indent_spacing };
        if let Some(window) = self.current_window_mut() {
            window.cursor.indent(width);
        }
    }

    /// Reverts an [`Context::indent`].
    pub fn unindent(&mut self, width: i32) {
        let width = if width > 0 { width } else { self.style.indent_spacing };
        if let Some(window) = self.current_window_mut() {
            window.cursor.unindent(width);
        }
    }

    /// Cursor position relative to the window, scroll included.
    pub fn get_cursor_pos(&self) -> Option<Vec2i> {
        let window = self.windows.get(self.current_window()?)?;
        let p = window.cursor.pos();
        Some(vec2(p.x - window.pos.x + window.scroll.x, p.y - window.pos.y + window.scroll.y))
    }

    /// Moves the cursor to a window-relative position.
    pub fn set_cursor_pos(&mut self, local: Vec2i) {
        if let Some(window) = self.current_window_mut() {
            let p = vec2(window.pos.x - window.scroll.x + local.x, window.pos.y - window.scroll.y + local.y);
            window.cursor.set_pos(p);
        }
    }

    /// Cursor position in screen space.
    pub fn get_cursor_screen_pos(&self) -> Option<Vec2i> { self.layout_cursor().map(|c| c.pos()) }
}

fn draw_window_frame(list: &mut DrawList, window: &Window, style: &Style, font: &dyn TextMeasure, focused: bool) {
    let (a, b) = rect_corners(window.rect());
    let flags = window.flags();
    let title_h = window.title_bar_height as f32;
    let rounding = style.window_rounding;

    if !flags.has_no_background() && !window.is_collapsed() {
        let corners = if title_h > 0.0 { Corners::BOTTOM } else { Corners::ALL };
        list.add_rect_filled(vec2f(a.x, a.y + title_h), b, style.color(StyleColor::WindowBg), rounding, corners);
    }

    if title_h > 0.0 {
        let title = window.title_bar_rect();
        let (ta, tb) = rect_corners(title);
        let (bg, corners) = match (window.is_collapsed(), focused) {
            (true, _) => (StyleColor::TitleBgCollapsed, Corners::ALL),
            (false, true) => (StyleColor::TitleBgActive, Corners::TOP),
            (false, false) => (StyleColor::TitleBg, Corners::TOP),
        };
        list.add_rect_filled(ta, tb, style.color(bg), rounding, corners);

        let pad = vec2f(style.frame_padding.x as f32, style.frame_padding.y as f32);
        let mut text_start = ta.x + pad.x;
        let mut text_end = tb.x - pad.x;
        let (cx, cy, r) = (ta.x + title_h * 0.5, ta.y + title_h * 0.5, title_h * 0.25);
        if !flags.has_no_collapse() {
            let text_color = style.color(StyleColor::Text);
            if window.is_collapsed() {
                list.add_triangle_filled(vec2f(cx - r * 0.75, cy - r), vec2f(cx + r, cy), vec2f(cx - r * 0.75, cy + r), text_color);
            } else {
                list.add_triangle_filled(vec2f(cx - r, cy - r * 0.75), vec2f(cx + r, cy - r * 0.75), vec2f(cx, cy + r), text_color);
            }
            text_start = ta.x + title_h;
        }
        if window.has_close_button {
            let cx = tb.x - title_h * 0.5;
            let color = style.color(StyleColor::CloseButton);
            list.add_line(vec2f(cx - r, cy - r), vec2f(cx + r, cy + r), color, 1.0);
            list.add_line(vec2f(cx + r, cy - r), vec2f(cx - r, cy + r), color, 1.0);
            text_end = tb.x - title_h;
        }

        let label = visible_label(window.name());
        let (text_w, _) = font.text_size(label);
        let x = text_start + ((text_end - text_start - text_w) * style.window_title_align).max(0.0);
        list.push_clip_rect(title);
        list.add_text(font, vec2f(x, ta.y + pad.y), style.color(StyleColor::TitleText), label);
        list.pop_clip_rect();
    }

    if !flags.has_no_background() && style.window_border_size > 0.0 {
        list.add_rect(a, b, style.color(StyleColor::Border), rounding, Corners::ALL, style.window_border_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{same_rect, vec2};

    fn strict() -> Context { Context::with_config(ContextConfig { strict: true, ..ContextConfig::default() }) }

    fn place_window(ctx: &mut Context, name: &str, pos: Vec2i, size: Dimensioni, flags: WindowFlags) -> bool {
        ctx.set_next_window_pos(pos, Cond::Always);
        ctx.set_next_window_size(size, Cond::Always);
        ctx.begin(name, None, flags)
    }

    #[test]
    fn ids_are_deterministic_per_scope() {
        let mut ctx = Context::new();
        ctx.new_frame().unwrap();
        let a = ctx.get_id("label");
        assert_eq!(a, ctx.get_id("label"));
        ctx.push_id("scope");
        let b = ctx.get_id("label");
        assert_ne!(a, b);
        ctx.pop_id().unwrap();
        assert_eq!(a, ctx.get_id("label"));

        ctx.begin("W", None, WindowFlags::NONE);
        assert_ne!(a, ctx.get_id("label"));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn lenient_mode_tolerates_misuse() {
        let mut ctx = Context::new();
        assert_eq!(ctx.end_frame(), Ok(()));
        ctx.new_frame().unwrap();
        assert_eq!(ctx.end(), Ok(()));
        assert_eq!(ctx.pop_id(), Ok(()));
        ctx.begin("W", None, WindowFlags::NONE);
        assert_eq!(ctx.end_frame(), Ok(()));
        assert_eq!(ctx.window_stack_depth(), 0);
        assert_eq!(ctx.id_stack_depth(), 0);
        assert_eq!(ctx.frame_state(), FrameState::Idle);
    }

    #[test]
    fn strict_mode_reports_misuse() {
        let mut ctx = strict();
        assert_eq!(ctx.end_frame(), Err(UiError::FrameNotActive));
        ctx.new_frame().unwrap();
        assert_eq!(ctx.new_frame(), Err(UiError::FrameAlreadyActive));
        assert_eq!(ctx.frame_state(), FrameState::Active);
        assert_eq!(ctx.frame_count(), 2);

        assert_eq!(ctx.end(), Err(UiError::WindowStackUnderflow));
        assert_eq!(ctx.pop_id(), Err(UiError::IdStackUnderflow));

        ctx.begin("W", None, WindowFlags::NONE);
        // the window's own scope is closed by end(), not pop_id()
        assert_eq!(ctx.pop_id(), Err(UiError::IdStackUnderflow));
        ctx.push_id("leak");
        assert_eq!(ctx.end(), Err(UiError::UnbalancedIdStack(1)));
        assert_eq!(ctx.id_stack_depth(), 0);

        ctx.begin("W", None, WindowFlags::NONE);
        assert_eq!(ctx.end_frame(), Err(UiError::UnbalancedWindowStack(1)));
        assert_eq!(ctx.window_stack_depth(), 0);
        assert_eq!(ctx.frame_state(), FrameState::Idle);
    }

    #[test]
    fn strict_restart_repairs_the_dangling_frame() {
        let mut ctx = strict();
        ctx.new_frame().unwrap();
        ctx.begin("W", None, WindowFlags::NONE);
        ctx.push_id("leak");
        assert_eq!(ctx.new_frame(), Err(UiError::FrameAlreadyActive));
        assert_eq!(ctx.window_stack_depth(), 0);
        assert_eq!(ctx.id_stack_depth(), 0);
        assert_eq!(ctx.current_window(), None);
        assert_eq!(ctx.frame_state(), FrameState::Active);
        ctx.end_frame().unwrap();
    }

    #[test]
    fn new_frame_resets_hover_and_promotes_active() {
        let mut ctx = Context::new();
        ctx.set_mouse_pos(20, 20);
        ctx.set_mouse_button(MouseButton::LEFT, true);
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(100, 100), WindowFlags::NO_TITLE_BAR);
        let id = ctx.get_id("item");
        ctx.button_behavior(rect(10, 10, 20, 20), id);
        assert_eq!(ctx.hovered_id(), Some(id));
        assert_eq!(ctx.active_id_previous_frame(), None);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        ctx.new_frame().unwrap();
        assert_eq!(ctx.hovered_id(), None);
        assert_eq!(ctx.active_id_previous_frame(), Some(id));
        ctx.end_frame().unwrap();
    }

    #[test]
    fn nested_windows_keep_their_own_cursor() {
        let mut ctx = Context::new();
        ctx.new_frame().unwrap();
        ctx.begin("Outer", None, WindowFlags::NONE);
        ctx.text("one");
        let resume = ctx.get_cursor_screen_pos().unwrap();

        ctx.begin("Inner", None, WindowFlags::NONE);
        ctx.text("inner");
        ctx.text("inner");
        ctx.end().unwrap();

        assert_eq!(ctx.current_window(), ctx.find_window("Outer"));
        ctx.text("two");
        let placed = ctx.last_item_rect();
        assert_eq!((placed.x, placed.y), (resume.x, resume.y));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn layout_helpers_move_the_cursor() {
        let mut ctx = Context::new();
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(300, 300), WindowFlags::NO_TITLE_BAR);
        assert_eq!(ctx.get_cursor_pos().map(|p| (p.x, p.y)), Some((8, 8)));

        ctx.text("ab");
        ctx.same_line(None);
        ctx.text("cd");
        let r = ctx.last_item_rect();
        assert_eq!((r.x, r.y), (8 + 14 + 8, 8));

        ctx.indent(0);
        ctx.text("x");
        assert_eq!(ctx.last_item_rect().x, 8 + ctx.style().indent_spacing);
        ctx.unindent(0);

        ctx.set_cursor_pos(vec2(100, 120));
        ctx.text("y");
        let r = ctx.last_item_rect();
        assert_eq!((r.x, r.y), (100, 120));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn content_is_clipped_to_the_window() {
        let mut ctx = Context::new();
        ctx.set_display_size(640, 480);
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(10, 20), Dimensioni::new(200, 100), WindowFlags::NONE);
        ctx.text("clip me");
        let title_h = ctx.title_bar_height();
        let clip = ctx.window_draw_list().unwrap().commands()[0].clip_rect;
        assert!(same_rect(clip, rect(18, 20 + title_h + 8, 184, 100 - title_h - 16)));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn title_bar_drag_moves_window() {
        let mut ctx = Context::new();
        ctx.set_mouse_pos(100, 65);
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(60, 60), Dimensioni::new(200, 200), WindowFlags::NONE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        ctx.set_mouse_button(MouseButton::LEFT, true);
        ctx.new_frame().unwrap();
        ctx.begin("W", None, WindowFlags::NONE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        ctx.set_mouse_pos(130, 85);
        ctx.new_frame().unwrap();
        ctx.begin("W", None, WindowFlags::NONE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        let window = ctx.window(ctx.find_window("W").unwrap()).unwrap();
        assert_eq!((window.pos().x, window.pos().y), (90, 80));

        let mut ctx = Context::new();
        ctx.set_mouse_pos(100, 65);
        ctx.set_mouse_button(MouseButton::LEFT, true);
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "Fixed", vec2(60, 60), Dimensioni::new(200, 200), WindowFlags::NO_MOVE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        ctx.set_mouse_pos(130, 85);
        ctx.new_frame().unwrap();
        ctx.begin("Fixed", None, WindowFlags::NO_MOVE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        let window = ctx.window(ctx.find_window("Fixed").unwrap()).unwrap();
        assert_eq!((window.pos().x, window.pos().y), (60, 60));
    }

    #[test]
    fn close_box_clears_open_flag() {
        let mut ctx = Context::new();
        let mut open = true;
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(200, 200), WindowFlags::NONE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        let title = ctx.window(ctx.find_window("W").unwrap()).unwrap().title_bar_rect();
        ctx.set_mouse_pos(title.x + title.width - 3, title.y + 3);
        ctx.set_mouse_button(MouseButton::LEFT, true);
        ctx.new_frame().unwrap();
        assert!(ctx.begin("W", Some(&mut open), WindowFlags::NONE));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(open);

        ctx.set_mouse_button(MouseButton::LEFT, false);
        ctx.new_frame().unwrap();
        ctx.begin("W", Some(&mut open), WindowFlags::NONE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(!open);

        ctx.new_frame().unwrap();
        assert!(!ctx.begin("W", Some(&mut open), WindowFlags::NONE));
        assert!(!ctx.text("not shown"));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(ctx.window(ctx.find_window("W").unwrap()).unwrap().is_hidden());
        assert!(ctx.render().is_empty());
    }

    #[test]
    fn wheel_scroll_is_clamped_to_content() {
        let mut ctx = Context::new();
        ctx.set_mouse_pos(50, 50);
        for frame in 0..2 {
            if frame == 1 {
                ctx.set_mouse_wheel(-10.0);
            }
            ctx.new_frame().unwrap();
            place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(200, 100), WindowFlags::NO_TITLE_BAR);
            for _ in 0..10 {
                ctx.text("line");
            }
            ctx.end().unwrap();
            ctx.end_frame().unwrap();
        }
        // ten 13px lines with 4px spacing against an 84px viewport
        let window = ctx.window(ctx.find_window("W").unwrap()).unwrap();
        assert_eq!(window.content_size().height, 166);
        assert_eq!(window.scroll().y, 166 - 84);
        assert_eq!(ctx.input().mouse_wheel(), 0.0);
    }

    #[test]
    fn auto_resize_follows_content() {
        let mut ctx = Context::new();
        for _ in 0..2 {
            ctx.new_frame().unwrap();
            ctx.begin("Auto", None, WindowFlags::ALWAYS_AUTO_RESIZE | WindowFlags::NO_TITLE_BAR);
            ctx.text("abcdefghij");
            ctx.end().unwrap();
            ctx.end_frame().unwrap();
        }
        let window = ctx.window(ctx.find_window("Auto").unwrap()).unwrap();
        assert_eq!((window.size().width, window.size().height), (70 + 16, 32));
    }

    #[test]
    fn removed_window_handles_go_stale() {
        let mut ctx = Context::new();
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(5, 5), Dimensioni::new(100, 100), WindowFlags::NONE);
        let handle = ctx.current_window().unwrap();
        assert!(!ctx.remove_window("W"));
        ctx.end().unwrap();
        assert!(ctx.remove_window("W"));
        assert!(!ctx.remove_window("W"));
        assert!(ctx.window(handle).is_none());
        assert!(ctx.find_window("W").is_none());

        ctx.begin("W", None, WindowFlags::NONE);
        let again = ctx.current_window().unwrap();
        let pos = ctx.window(again).unwrap().pos();
        assert_eq!((pos.x, pos.y), (60, 60));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    struct WideFont;

    impl TextMeasure for WideFont {
        fn char_advance(&self, _c: char) -> f32 { 10.0 }

        fn line_height(&self) -> f32 { 20.5 }
    }

    #[test]
    fn injected_text_measure_drives_layout() {
        let mut ctx = Context::with_text_measure(ContextConfig::default(), Box::new(WideFont));
        let pad = ctx.style().frame_padding;
        assert_eq!(ctx.text_line_height(), 21);
        assert_eq!(ctx.title_bar_height(), 21 + pad.y * 2);
        let size = ctx.calc_text_size("abc\nd");
        assert_eq!((size.width, size.height), (30, 41));

        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(300, 300), WindowFlags::NONE);
        ctx.text("ab");
        let r = ctx.last_item_rect();
        assert!(same_rect(r, rect(8, 21 + pad.y * 2 + 8, 20, 21)));
        let second_glyph = ctx.window_draw_list().unwrap().vtx_buffer()[4].position();
        assert_eq!(second_glyph.x, 18.0);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        ctx.set_text_measure(Box::new(FixedWidthFont { advance: 4.0, line_height: 6.0 }));
        assert_eq!(ctx.title_bar_height(), 6 + pad.y * 2);
        ctx.new_frame().unwrap();
        ctx.begin("W", None, WindowFlags::NONE);
        let window = ctx.window(ctx.current_window().unwrap()).unwrap();
        assert_eq!(window.title_bar_rect().height, 6 + pad.y * 2);
        ctx.text("ab");
        let r = ctx.last_item_rect();
        assert_eq!((r.width, r.height), (8, 6));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn no_background_window_draws_no_frame() {
        let mut ctx = Context::new();
        ctx.set_display_size(800, 600);
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "Bare", vec2(10, 10), Dimensioni::new(100, 100), WindowFlags::NO_TITLE_BAR | WindowFlags::NO_BACKGROUND);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(ctx.render().is_empty());

        ctx.new_frame().unwrap();
        place_window(&mut ctx, "Bare", vec2(10, 10), Dimensioni::new(100, 100), WindowFlags::NO_TITLE_BAR);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(!ctx.render().is_empty());
    }

    #[test]
    fn no_scroll_with_mouse_ignores_the_wheel() {
        let mut ctx = Context::new();
        ctx.set_mouse_pos(50, 50);
        for frame in 0..2 {
            if frame == 1 {
                ctx.set_mouse_wheel(-10.0);
            }
            ctx.new_frame().unwrap();
            place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(200, 100), WindowFlags::NO_TITLE_BAR | WindowFlags::NO_SCROLL_WITH_MOUSE);
            for _ in 0..10 {
                ctx.text("line");
            }
            ctx.end().unwrap();
            ctx.end_frame().unwrap();
        }
        let window = ctx.window(ctx.find_window("W").unwrap()).unwrap();
        assert_eq!(window.content_size().height, 166);
        assert_eq!(window.scroll().y, 0);
    }

    #[test]
    fn no_collapse_keeps_the_window_open() {
        let mut ctx = Context::new();
        ctx.new_frame().unwrap();
        place_window(&mut ctx, "W", vec2(0, 0), Dimensioni::new(200, 200), WindowFlags::NO_COLLAPSE);
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        let title = ctx.window(ctx.find_window("W").unwrap()).unwrap().title_bar_rect();
        ctx.set_mouse_pos(title.x + 2, title.y + 2);
        for down in [true, false] {
            ctx.set_mouse_button(MouseButton::LEFT, down);
            ctx.new_frame().unwrap();
            assert!(ctx.begin("W", None, WindowFlags::NO_COLLAPSE));
            ctx.end().unwrap();
            ctx.end_frame().unwrap();
        }
        ctx.new_frame().unwrap();
        assert!(ctx.begin("W", None, WindowFlags::NO_COLLAPSE));
        assert!(ctx.text("still shown"));
        ctx.end().unwrap();
        ctx.end_frame().unwrap();
        assert!(!ctx.window(ctx.find_window("W").unwrap()).unwrap().is_collapsed());
    }

    #[derive(Default)]
    struct Recorder {
        display: Option<(i32, i32)>,
        calls: Vec<(u32, usize, u32)>,
        in_range: bool,
        ended: bool,
    }

    impl Renderer for Recorder {
        fn begin(&mut self, display: Dimensioni) {
            self.display = Some((display.width, display.height));
            self.in_range = true;
        }

        fn draw_elements(&mut self, vertices: &[Vertex], indices: &[DrawIdx], cmd: &DrawCmd) {
            self.in_range &= indices.iter().all(|i| (*i as usize) < vertices.len());
            self.calls.push((cmd.elem_count, indices.len(), cmd.texture_id.raw()));
        }

        fn end(&mut self) { self.ended = true; }
    }

    #[test]
    fn render_to_issues_one_call_per_command() {
        let mut ctx = Context::new();
        ctx.set_display_size(800, 600);
        ctx.new_frame().unwrap();
        ctx.background_draw_list().add_rect_filled(vec2f(1.0, 2.0), vec2f(30.0, 40.0), crate::Color::WHITE, 0.0, Corners::ALL);
        ctx.begin("A", None, WindowFlags::NONE);
        ctx.text("hello");
        ctx.button("OK");
        ctx.end().unwrap();
        ctx.set_next_window_pos(vec2(300, 300), Cond::FirstUseEver);
        ctx.begin("B", None, WindowFlags::NONE);
        ctx.text("world");
        ctx.end().unwrap();
        ctx.end_frame().unwrap();

        let mut recorder = Recorder::default();
        ctx.render_to(&mut recorder);
        assert_eq!(recorder.display, Some((800, 600)));
        assert!(recorder.ended && recorder.in_range);
        assert!(recorder.calls.len() >= 2);
        assert!(recorder.calls.iter().all(|(count, len, _)| *count as usize == *len && *len > 0));

        let data = ctx.draw_data();
        let total: usize = recorder.calls.iter().map(|(_, len, _)| len).sum();
        assert_eq!(total, data.idx_buffer().len());
        assert_eq!(data.idx_buffer().len() % 3, 0);
        // background geometry comes first
        let first = data.vtx_buffer()[0].position();
        assert_eq!((first.x, first.y), (1.0, 2.0));
    }
}
