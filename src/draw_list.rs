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
use crate::{Color, Corners, Recti, TextMeasure, TextureId, Vec2f, same_rect, vec2f};
use std::f32::consts::PI;

/// Index type stored in [`DrawList::idx_buffer`].
pub type DrawIdx = u32;

/// Clip rectangle used when nothing narrower has been pushed.
pub const UNCLIPPED_RECT: Recti = Recti { x: 0, y: 0, width: i32::MAX, height: i32::MAX };

/// Lower bound of the automatic circle segment count.
pub const CIRCLE_SEGMENTS_MIN: usize = 12;
/// Upper bound of the automatic circle segment count.
pub const CIRCLE_SEGMENTS_MAX: usize = 512;
const DEFAULT_BEZIER_SEGMENTS: usize = 20;

// unit circle sampled every 30 degrees, y pointing down
const CIRCLE_VTX12: [[f32; 2]; 12] = [
    [1.0, 0.0],
    [0.866_025_4, 0.5],
    [0.5, 0.866_025_4],
    [0.0, 1.0],
    [-0.5, 0.866_025_4],
    [-0.866_025_4, 0.5],
    [-1.0, 0.0],
    [-0.866_025_4, -0.5],
    [-0.5, -0.866_025_4],
    [0.0, -1.0],
    [0.5, -0.866_025_4],
    [0.866_025_4, -0.5],
];

#[derive(Default, Copy, Clone)]
#[repr(C)]
/// Vertex emitted by the draw list.
pub struct Vertex {
    pos: Vec2f,
    uv: Vec2f,
    color: Color,
}

impl Vertex {
    /// Creates a vertex from its position, texture coordinate and color.
    pub fn new(pos: Vec2f, uv: Vec2f, color: Color) -> Self { Self { pos, uv, color } }

    /// Returns the vertex position.
    pub fn position(&self) -> Vec2f { self.pos }

    /// Returns the texture coordinate.
    pub fn tex_coord(&self) -> Vec2f { self.uv }

    /// Returns the vertex color.
    pub fn color(&self) -> Color { self.color }
}

#[derive(Copy, Clone)]
/// A run of triangles sharing one clip rectangle and one texture.
pub struct DrawCmd {
    /// Number of indices (three per triangle) this command consumes.
    pub elem_count: u32,
    /// Scissor rectangle applied while drawing the run.
    pub clip_rect: Recti,
    /// Texture bound while drawing the run.
    pub texture_id: TextureId,
}

impl DrawCmd {
    fn new(clip_rect: Recti, texture_id: TextureId) -> Self { Self { elem_count: 0, clip_rect, texture_id } }

    fn matches(&self, clip_rect: Recti, texture_id: TextureId) -> bool { same_rect(self.clip_rect, clip_rect) && self.texture_id == texture_id }
}

/// Number of segments used for a circle of `radius` when the caller does not specify one.
pub fn circle_auto_segments(radius: f32) -> usize {
    if !(radius > 0.0) {
        return CIRCLE_SEGMENTS_MIN;
    }
    (radius / 2.5).clamp(CIRCLE_SEGMENTS_MIN as f32, CIRCLE_SEGMENTS_MAX as f32) as usize
}

/// Corner radius actually used for a rectangle spanning `a`..`b`.
/// Never exceeds half of the shorter side, so corner arcs cannot overlap.
pub fn effective_rounding(a: Vec2f, b: Vec2f, rounding: f32) -> f32 {
    let half_w = (b.x - a.x).abs() * 0.5;
    let half_h = (b.y - a.y).abs() * 0.5;
    rounding.min(half_w).min(half_h).max(0.0)
}

/// Renderer-agnostic triangle stream batched by clip rectangle and texture.
pub struct DrawList {
    vtx_buffer: Vec<Vertex>,
    idx_buffer: Vec<DrawIdx>,
    cmd_buffer: Vec<DrawCmd>,
    path: Vec<Vec2f>,
    full_clip: Recti,
    clip_rect: Recti,
    texture_id: TextureId,
    solid_uv: Vec2f,
}

impl Default for DrawList {
    fn default() -> Self { Self::new() }
}

impl DrawList {
    /// Creates an empty list clipped to [`UNCLIPPED_RECT`].
    pub fn new() -> Self {
        let mut list = Self {
            vtx_buffer: Vec::new(),
            idx_buffer: Vec::new(),
            cmd_buffer: Vec::new(),
            path: Vec::new(),
            full_clip: UNCLIPPED_RECT,
            clip_rect: UNCLIPPED_RECT,
            texture_id: TextureId::FONT_ATLAS,
            solid_uv: Vec2f::default(),
        };
        list.clear();
        list
    }

    /// Sets the rectangle `clear` and `pop_clip_rect` reset the clip to.
    pub fn set_full_clip_rect(&mut self, rect: Recti) { self.full_clip = rect; }

    /// Sets the texture coordinate used for untextured geometry (usually a white texel of the font atlas).
    pub fn set_solid_uv(&mut self, uv: Vec2f) { self.solid_uv = uv; }

    /// Resets all buffers and restores the full-screen clip and default texture.
    pub fn clear(&mut self) {
        self.vtx_buffer.clear();
        self.idx_buffer.clear();
        self.cmd_buffer.clear();
        self.path.clear();
        self.clip_rect = self.full_clip;
        self.texture_id = TextureId::FONT_ATLAS;
        self.cmd_buffer.push(DrawCmd::new(self.clip_rect, self.texture_id));
    }

    /// Vertex buffer.
    pub fn vtx_buffer(&self) -> &[Vertex] { &self.vtx_buffer }

    /// Index buffer, three indices per triangle.
    pub fn idx_buffer(&self) -> &[DrawIdx] { &self.idx_buffer }

    /// Draw commands in submission order.
    pub fn commands(&self) -> &[DrawCmd] { &self.cmd_buffer }

    /// Current working path.
    pub fn path_points(&self) -> &[Vec2f] { &self.path }

    /// Returns `true` when no geometry has been emitted.
    pub fn is_empty(&self) -> bool { self.idx_buffer.is_empty() }

    /// Clip rectangle applied to new geometry.
    pub fn clip_rect(&self) -> Recti { self.clip_rect }

    /// Texture applied to new geometry.
    pub fn texture_id(&self) -> TextureId { self.texture_id }

    /// Replaces the clip rectangle. Pushes do not nest: the most recent one wins.
    pub fn push_clip_rect(&mut self, rect: Recti) { self.clip_rect = rect; }

    /// Resets the clip rectangle to full screen (not to the previously pushed value).
    pub fn pop_clip_rect(&mut self) { self.clip_rect = self.full_clip; }

    /// Replaces the bound texture. Pushes do not nest.
    pub fn push_texture_id(&mut self, texture_id: TextureId) { self.texture_id = texture_id; }

    /// Resets the texture to the default one.
    pub fn pop_texture_id(&mut self) { self.texture_id = TextureId::FONT_ATLAS; }

    /// Makes sure the last command accepts geometry under the current clip/texture state
    /// and reserves room for the upcoming primitive. A command that already holds
    /// geometry is never modified; a state change opens a new one.
    pub fn prim_reserve(&mut self, idx_count: usize, vtx_count: usize) {
        let (clip_rect, texture_id) = (self.clip_rect, self.texture_id);
        match self.cmd_buffer.last_mut() {
            Some(cmd) if cmd.matches(clip_rect, texture_id) => (),
            Some(cmd) if cmd.elem_count == 0 => {
                cmd.clip_rect = clip_rect;
                cmd.texture_id = texture_id;
            }
            _ => self.cmd_buffer.push(DrawCmd::new(clip_rect, texture_id)),
        }
        self.vtx_buffer.reserve(vtx_count);
        self.idx_buffer.reserve(idx_count);
    }

    fn commit(&mut self, idx_count: usize) {
        if let Some(cmd) = self.cmd_buffer.last_mut() {
            cmd.elem_count += idx_count as u32;
        }
    }

    fn next_index(&self) -> DrawIdx { self.vtx_buffer.len() as DrawIdx }

    fn push_vtx(&mut self, pos: Vec2f, uv: Vec2f, color: Color) { self.vtx_buffer.push(Vertex { pos, uv, color }); }

    fn push_quad_indices(&mut self, base: DrawIdx) {
        self.idx_buffer.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn prim_rect_uv(&mut self, a: Vec2f, b: Vec2f, uv_a: Vec2f, uv_b: Vec2f, colors: [Color; 4]) {
        self.prim_reserve(6, 4);
        let base = self.next_index();
        self.push_vtx(a, uv_a, colors[0]);
        self.push_vtx(vec2f(b.x, a.y), vec2f(uv_b.x, uv_a.y), colors[1]);
        self.push_vtx(b, uv_b, colors[2]);
        self.push_vtx(vec2f(a.x, b.y), vec2f(uv_a.x, uv_b.y), colors[3]);
        self.push_quad_indices(base);
        self.commit(6);
    }

    /// Empties the working path.
    pub fn path_clear(&mut self) { self.path.clear(); }

    /// Appends a point to the working path.
    pub fn path_line_to(&mut self, p: Vec2f) { self.path.push(p); }

    /// Appends `segments + 1` points of an arc from `a_min` to `a_max` (radians).
    pub fn path_arc_to(&mut self, center: Vec2f, radius: f32, a_min: f32, a_max: f32, segments: usize) {
        if radius <= 0.0 || segments == 0 {
            self.path.push(center);
            return;
        }
        self.path.reserve(segments + 1);
        for i in 0..=segments {
            let a = a_min + (i as f32 / segments as f32) * (a_max - a_min);
            self.path.push(vec2f(center.x + a.cos() * radius, center.y + a.sin() * radius));
        }
    }

    /// Appends an arc using the 12-step unit circle table; `a_min_of_12..=a_max_of_12`
    /// index 30 degree steps (0 = +x, 3 = +y).
    pub fn path_arc_to_fast(&mut self, center: Vec2f, radius: f32, a_min_of_12: usize, a_max_of_12: usize) {
        if radius <= 0.0 || a_min_of_12 > a_max_of_12 {
            self.path.push(center);
            return;
        }
        for a in a_min_of_12..=a_max_of_12 {
            let [cx, cy] = CIRCLE_VTX12[a % 12];
            self.path.push(vec2f(center.x + cx * radius, center.y + cy * radius));
        }
    }

    /// Appends a cubic Bézier from the last path point through `c1`, `c2` to `p`.
    pub fn path_bezier_curve_to(&mut self, c1: Vec2f, c2: Vec2f, p: Vec2f, segments: usize) {
        let p0 = match self.path.last() {
            Some(p0) => *p0,
            None => {
                self.path.push(p);
                return;
            }
        };
        let segments = if segments == 0 { DEFAULT_BEZIER_SEGMENTS } else { segments };
        for i in 1..=segments {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let (w0, w1, w2, w3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            self.path.push(vec2f(
                w0 * p0.x + w1 * c1.x + w2 * c2.x + w3 * p.x,
                w0 * p0.y + w1 * c1.y + w2 * c2.y + w3 * p.y,
            ));
        }
    }

    /// Appends the outline of a rectangle, with rounded `corners` when `rounding > 0`.
    pub fn path_rect(&mut self, a: Vec2f, b: Vec2f, rounding: f32, corners: Corners) {
        let r = effective_rounding(a, b, rounding);
        if r <= 0.0 || corners.is_empty() {
            self.path.push(a);
            self.path.push(vec2f(b.x, a.y));
            self.path.push(b);
            self.path.push(vec2f(a.x, b.y));
            return;
        }
        let pick = |c: Corners| if corners.contains(c) { r } else { 0.0 };
        let (r_tl, r_tr, r_br, r_bl) = (pick(Corners::TOP_LEFT), pick(Corners::TOP_RIGHT), pick(Corners::BOTTOM_RIGHT), pick(Corners::BOTTOM_LEFT));
        self.path_arc_to_fast(vec2f(a.x + r_tl, a.y + r_tl), r_tl, 6, 9);
        self.path_arc_to_fast(vec2f(b.x - r_tr, a.y + r_tr), r_tr, 9, 12);
        self.path_arc_to_fast(vec2f(b.x - r_br, b.y - r_br), r_br, 0, 3);
        self.path_arc_to_fast(vec2f(a.x + r_bl, b.y - r_bl), r_bl, 3, 6);
    }

    /// Fills the working path as a convex polygon (triangle fan from the first point) and clears it.
    /// Non-convex paths produce undefined coverage.
    pub fn path_fill_convex(&mut self, color: Color) {
        let path = std::mem::take(&mut self.path);
        self.fill_convex(&path, color);
        self.path = path;
        self.path.clear();
    }

    /// Strokes the working path with a line of `thickness` pixels and clears it.
    ///
    /// Only non-positive and NaN thickness is rejected. Sub-pixel widths still draw,
    /// so hairlines stay visible on scaled displays.
    pub fn path_stroke(&mut self, color: Color, closed: bool, thickness: f32) {
        let path = std::mem::take(&mut self.path);
        self.stroke(&path, color, closed, thickness);
        self.path = path;
        self.path.clear();
    }

    fn fill_convex(&mut self, points: &[Vec2f], color: Color) {
        let n = points.len();
        if n < 3 || color.is_invisible() {
            return;
        }
        let idx_count = (n - 2) * 3;
        self.prim_reserve(idx_count, n);
        let base = self.next_index();
        for p in points {
            self.push_vtx(*p, self.solid_uv, color);
        }
        for i in 2..n as DrawIdx {
            self.idx_buffer.extend_from_slice(&[base, base + i - 1, base + i]);
        }
        self.commit(idx_count);
    }

    fn stroke(&mut self, points: &[Vec2f], color: Color, closed: bool, thickness: f32) {
        let n = points.len();
        if n < 2 || color.is_invisible() || !(thickness > 0.0) {
            return;
        }
        let seg_count = if closed { n } else { n - 1 };
        let segment = |i: usize| (points[i], points[(i + 1) % n]);
        let drawn = (0..seg_count)
            .filter(|i| {
                let (p1, p2) = segment(*i);
                p1.x != p2.x || p1.y != p2.y
            })
            .count();
        if drawn == 0 {
            return;
        }

        self.prim_reserve(drawn * 6, drawn * 4);
        let half = thickness * 0.5;
        for i in 0..seg_count {
            let (p1, p2) = segment(i);
            let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
            let len = (dx * dx + dy * dy).sqrt();
            if len <= 0.0 {
                continue;
            }
            let (nx, ny) = (-dy / len * half, dx / len * half);
            let base = self.next_index();
            self.push_vtx(vec2f(p1.x + nx, p1.y + ny), self.solid_uv, color);
            self.push_vtx(vec2f(p2.x + nx, p2.y + ny), self.solid_uv, color);
            self.push_vtx(vec2f(p2.x - nx, p2.y - ny), self.solid_uv, color);
            self.push_vtx(vec2f(p1.x - nx, p1.y - ny), self.solid_uv, color);
            self.push_quad_indices(base);
        }
        self.commit(drawn * 6);
    }

    /// Strokes a line segment.
    pub fn add_line(&mut self, a: Vec2f, b: Vec2f, color: Color, thickness: f32) {
        if color.is_invisible() {
            return;
        }
        self.path_line_to(a);
        self.path_line_to(b);
        self.path_stroke(color, false, thickness);
    }

    /// Strokes a rectangle outline.
    pub fn add_rect(&mut self, a: Vec2f, b: Vec2f, color: Color, rounding: f32, corners: Corners, thickness: f32) {
        if color.is_invisible() {
            return;
        }
        self.path_rect(a, b, rounding, corners);
        self.path_stroke(color, true, thickness);
    }

    /// Fills a rectangle, rounded when `rounding > 0`.
    pub fn add_rect_filled(&mut self, a: Vec2f, b: Vec2f, color: Color, rounding: f32, corners: Corners) {
        if color.is_invisible() {
            return;
        }
        if rounding > 0.0 && !corners.is_empty() {
            self.path_rect(a, b, rounding, corners);
            self.path_fill_convex(color);
        } else {
            let uv = self.solid_uv;
            self.prim_rect_uv(a, b, uv, uv, [color; 4]);
        }
    }

    /// Fills a rectangle with one color per corner (top-left, top-right, bottom-right, bottom-left).
    pub fn add_rect_filled_multicolor(&mut self, a: Vec2f, b: Vec2f, colors: [Color; 4]) {
        if colors.iter().all(|c| c.is_invisible()) {
            return;
        }
        let uv = self.solid_uv;
        self.prim_rect_uv(a, b, uv, uv, colors);
    }

    /// Strokes a triangle outline.
    pub fn add_triangle(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, color: Color, thickness: f32) {
        if color.is_invisible() {
            return;
        }
        self.path_line_to(a);
        self.path_line_to(b);
        self.path_line_to(c);
        self.path_stroke(color, true, thickness);
    }

    /// Fills a triangle.
    pub fn add_triangle_filled(&mut self, a: Vec2f, b: Vec2f, c: Vec2f, color: Color) {
        if color.is_invisible() {
            return;
        }
        self.path_line_to(a);
        self.path_line_to(b);
        self.path_line_to(c);
        self.path_fill_convex(color);
    }

    fn path_circle(&mut self, center: Vec2f, radius: f32, segments: usize) {
        let n = if segments == 0 { circle_auto_segments(radius) } else { segments }.max(3);
        let a_max = 2.0 * PI * (n as f32 - 1.0) / n as f32;
        self.path_arc_to(center, radius, 0.0, a_max, n - 1);
    }

    /// Strokes a circle; `segments == 0` picks a count from the radius.
    pub fn add_circle(&mut self, center: Vec2f, radius: f32, color: Color, segments: usize, thickness: f32) {
        if color.is_invisible() || !(radius > 0.0 && radius.is_finite()) {
            return;
        }
        self.path_circle(center, radius, segments);
        self.path_stroke(color, true, thickness);
    }

    /// Fills a circle; `segments == 0` picks a count from the radius.
    pub fn add_circle_filled(&mut self, center: Vec2f, radius: f32, color: Color, segments: usize) {
        if color.is_invisible() || !(radius > 0.0 && radius.is_finite()) {
            return;
        }
        self.path_circle(center, radius, segments);
        self.path_fill_convex(color);
    }

    /// Strokes an arbitrary polyline.
    pub fn add_polyline(&mut self, points: &[Vec2f], color: Color, closed: bool, thickness: f32) { self.stroke(points, color, closed, thickness); }

    /// Fills a convex polygon.
    pub fn add_convex_poly_filled(&mut self, points: &[Vec2f], color: Color) { self.fill_convex(points, color); }

    /// Strokes a cubic Bézier curve.
    pub fn add_bezier_curve(&mut self, p1: Vec2f, c1: Vec2f, c2: Vec2f, p2: Vec2f, color: Color, thickness: f32, segments: usize) {
        if color.is_invisible() {
            return;
        }
        self.path_line_to(p1);
        self.path_bezier_curve_to(c1, c2, p2, segments);
        self.path_stroke(color, false, thickness);
    }

    /// Emits one textured quad per visible glyph of `text`, laid out with the metrics of `font`.
    /// Glyph images come from the font atlas bound by the renderer; `'\n'` starts a new line.
    pub fn add_text(&mut self, font: &dyn TextMeasure, pos: Vec2f, color: Color, text: &str) {
        if text.is_empty() || color.is_invisible() {
            return;
        }
        let glyphs = text.chars().filter(|c| *c != '\n' && font.glyph_uv(*c).is_some()).count();
        if glyphs == 0 {
            return;
        }
        let line_height = font.line_height();
        self.prim_reserve(glyphs * 6, glyphs * 4);
        let (mut x, mut y) = (pos.x, pos.y);
        for c in text.chars() {
            if c == '\n' {
                x = pos.x;
                y += line_height;
                continue;
            }
            let advance = font.char_advance(c);
            if let Some([u0, v0, u1, v1]) = font.glyph_uv(c) {
                let base = self.next_index();
                self.push_vtx(vec2f(x, y), vec2f(u0, v0), color);
                self.push_vtx(vec2f(x + advance, y), vec2f(u1, v0), color);
                self.push_vtx(vec2f(x + advance, y + line_height), vec2f(u1, v1), color);
                self.push_vtx(vec2f(x, y + line_height), vec2f(u0, v1), color);
                self.push_quad_indices(base);
            }
            x += advance;
        }
        self.commit(glyphs * 6);
    }

    /// Draws a textured quad. The texture is bound only for this quad.
    pub fn add_image(&mut self, texture_id: TextureId, a: Vec2f, b: Vec2f, uv_a: Vec2f, uv_b: Vec2f, color: Color) {
        if color.is_invisible() {
            return;
        }
        let prev = self.texture_id;
        self.texture_id = texture_id;
        self.prim_rect_uv(a, b, uv_a, uv_b, [color; 4]);
        self.texture_id = prev;
    }

    /// Appends the geometry of `other`, rebasing its indices. Empty commands are dropped and
    /// runs that continue the current clip/texture state are coalesced.
    pub fn append(&mut self, other: &DrawList) {
        if other.is_empty() {
            return;
        }
        let (saved_clip, saved_texture) = (self.clip_rect, self.texture_id);
        let base = self.next_index();
        self.vtx_buffer.extend_from_slice(&other.vtx_buffer);
        self.idx_buffer.extend(other.idx_buffer.iter().map(|i| i + base));
        for cmd in other.cmd_buffer.iter().filter(|cmd| cmd.elem_count > 0) {
            self.clip_rect = cmd.clip_rect;
            self.texture_id = cmd.texture_id;
            self.prim_reserve(0, 0);
            self.commit(cmd.elem_count as usize);
        }
        self.clip_rect = saved_clip;
        self.texture_id = saved_texture;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedWidthFont, rect};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    fn check_invariants(list: &DrawList) {
        let total: u32 = list.commands().iter().map(|c| c.elem_count).sum();
        assert_eq!(total as usize, list.idx_buffer().len());
        assert_eq!(list.idx_buffer().len() % 3, 0);
        let vtx_len = list.vtx_buffer().len() as DrawIdx;
        assert!(list.idx_buffer().iter().all(|i| *i < vtx_len));
    }

    #[test]
    fn convex_fill_vertex_and_index_counts() {
        let mut list = DrawList::new();
        let pts = [vec2f(0.0, 0.0), vec2f(10.0, 0.0), vec2f(15.0, 5.0), vec2f(10.0, 10.0), vec2f(0.0, 10.0)];
        list.add_convex_poly_filled(&pts, RED);
        assert_eq!(list.vtx_buffer().len(), 5);
        assert_eq!(list.idx_buffer().len(), 3 * (5 - 2));
        assert_eq!(&list.idx_buffer()[0..3], &[0, 1, 2]);
        assert_eq!(&list.idx_buffer()[6..9], &[0, 3, 4]);
        check_invariants(&list);
    }

    #[test]
    fn same_state_rects_share_one_command() {
        let mut list = DrawList::new();
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(10.0, 10.0), RED, 0.0, Corners::ALL);
        list.add_rect_filled(vec2f(20.0, 0.0), vec2f(30.0, 10.0), RED, 0.0, Corners::ALL);
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.commands()[0].elem_count, 12);
        check_invariants(&list);
    }

    #[test]
    fn clip_change_splits_commands() {
        let mut list = DrawList::new();
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(10.0, 10.0), RED, 0.0, Corners::ALL);
        list.push_clip_rect(rect(0, 0, 5, 5));
        list.add_rect_filled(vec2f(20.0, 0.0), vec2f(30.0, 10.0), RED, 0.0, Corners::ALL);
        assert_eq!(list.commands().len(), 2);
        assert!(same_rect(list.commands()[1].clip_rect, rect(0, 0, 5, 5)));
        check_invariants(&list);
    }

    #[test]
    fn state_change_without_geometry_reuses_empty_command() {
        let mut list = DrawList::new();
        list.push_clip_rect(rect(1, 1, 2, 2));
        list.pop_clip_rect();
        list.push_clip_rect(rect(3, 3, 4, 4));
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(1.0, 1.0), RED, 0.0, Corners::ALL);
        assert_eq!(list.commands().len(), 1);
        assert!(same_rect(list.commands()[0].clip_rect, rect(3, 3, 4, 4)));
    }

    #[test]
    fn clip_pop_resets_to_full_screen() {
        let mut list = DrawList::new();
        list.set_full_clip_rect(rect(0, 0, 800, 600));
        list.clear();
        list.push_clip_rect(rect(10, 10, 100, 100));
        list.push_clip_rect(rect(20, 20, 10, 10));
        list.pop_clip_rect();
        assert!(same_rect(list.clip_rect(), rect(0, 0, 800, 600)));
        list.push_texture_id(TextureId::new(7));
        list.pop_texture_id();
        assert_eq!(list.texture_id(), TextureId::FONT_ATLAS);
    }

    #[test]
    fn stroke_skips_degenerate_segments() {
        let mut list = DrawList::new();
        list.add_line(vec2f(5.0, 5.0), vec2f(5.0, 5.0), RED, 1.0);
        assert!(list.is_empty());
        let pts = [vec2f(0.0, 0.0), vec2f(0.0, 0.0), vec2f(10.0, 0.0)];
        list.add_polyline(&pts, RED, false, 2.0);
        assert_eq!(list.vtx_buffer().len(), 4);
        assert_eq!(list.idx_buffer().len(), 6);
        // the quad straddles the line by half the thickness on each side
        let ys: Vec<f32> = list.vtx_buffer().iter().map(|v| v.position().y).collect();
        assert_eq!(ys, vec![1.0, 1.0, -1.0, -1.0]);
        check_invariants(&list);
    }

    #[test]
    fn closed_stroke_bridges_last_to_first() {
        let mut list = DrawList::new();
        list.add_triangle(vec2f(0.0, 0.0), vec2f(10.0, 0.0), vec2f(0.0, 10.0), RED, 1.0);
        assert_eq!(list.vtx_buffer().len(), 12);
        assert_eq!(list.idx_buffer().len(), 18);
        assert!(list.path_points().is_empty());
    }

    #[test]
    fn silent_no_ops() {
        let mut list = DrawList::new();
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(10.0, 10.0), Color::TRANSPARENT, 0.0, Corners::ALL);
        list.add_line(vec2f(0.0, 0.0), vec2f(10.0, 10.0), RED, 0.0);
        list.add_circle(vec2f(0.0, 0.0), 0.0, RED, 0, 1.0);
        list.add_text(&FixedWidthFont::default(), vec2f(0.0, 0.0), RED, "");
        list.add_convex_poly_filled(&[vec2f(0.0, 0.0), vec2f(1.0, 1.0)], RED);
        assert!(list.is_empty());
        assert_eq!(list.commands().len(), 1);
        check_invariants(&list);
    }

    #[test]
    fn non_finite_radius_draws_nothing() {
        let mut list = DrawList::new();
        list.add_circle_filled(vec2f(10.0, 10.0), f32::NAN, RED, 0);
        list.add_circle(vec2f(10.0, 10.0), f32::NAN, RED, 0, 1.0);
        list.add_circle_filled(vec2f(10.0, 10.0), f32::INFINITY, RED, 0);
        list.add_circle(vec2f(10.0, 10.0), f32::NEG_INFINITY, RED, 5, 1.0);
        assert!(list.is_empty());
        assert!(list.path_points().is_empty());
        assert_eq!(circle_auto_segments(f32::NAN), CIRCLE_SEGMENTS_MIN);
    }

    #[test]
    fn sub_pixel_stroke_still_draws() {
        let mut list = DrawList::new();
        list.add_line(vec2f(0.0, 0.0), vec2f(10.0, 0.0), RED, f32::NAN);
        assert!(list.is_empty());
        list.add_line(vec2f(0.0, 0.0), vec2f(10.0, 0.0), RED, 0.5);
        assert_eq!(list.vtx_buffer().len(), 4);
        let ys: Vec<f32> = list.vtx_buffer().iter().map(|v| v.position().y).collect();
        assert_eq!(ys, vec![0.25, 0.25, -0.25, -0.25]);
    }

    #[test]
    fn bezier_and_arc_paths() {
        let mut list = DrawList::new();
        list.path_line_to(vec2f(0.0, 0.0));
        list.path_bezier_curve_to(vec2f(10.0, 0.0), vec2f(20.0, 10.0), vec2f(30.0, 10.0), 6);
        assert_eq!(list.path_points().len(), 7);
        let end = list.path_points()[6];
        assert!((end.x - 30.0).abs() < 1e-4 && (end.y - 10.0).abs() < 1e-4);
        list.path_clear();

        // with no start point the curve degenerates to its end point
        list.path_bezier_curve_to(vec2f(1.0, 1.0), vec2f(2.0, 2.0), vec2f(3.0, 3.0), 4);
        assert_eq!(list.path_points().len(), 1);
        list.path_clear();

        list.path_arc_to(vec2f(0.0, 0.0), 10.0, 0.0, PI, 4);
        let points = list.path_points();
        assert_eq!(points.len(), 5);
        assert!((points[0].x - 10.0).abs() < 1e-4);
        assert!((points[2].y - 10.0).abs() < 1e-4);
        assert!((points[4].x + 10.0).abs() < 1e-4);
        list.path_stroke(RED, false, 1.0);
        assert_eq!(list.idx_buffer().len(), 4 * 6);

        let mut list = DrawList::new();
        list.add_bezier_curve(vec2f(0.0, 0.0), vec2f(0.0, 20.0), vec2f(20.0, 20.0), vec2f(20.0, 0.0), RED, 2.0, 8);
        assert_eq!(list.vtx_buffer().len(), 8 * 4);
        check_invariants(&list);
    }

    #[test]
    fn multicolor_rect_colors_each_corner() {
        let colors = [RED, Color::WHITE, Color { r: 0, g: 0, b: 255, a: 255 }, Color { r: 0, g: 255, b: 0, a: 255 }];
        let mut list = DrawList::new();
        list.add_rect_filled_multicolor(vec2f(0.0, 0.0), vec2f(10.0, 5.0), colors);
        assert_eq!(list.vtx_buffer().len(), 4);
        for (vtx, expected) in list.vtx_buffer().iter().zip(colors.iter()) {
            let c = vtx.color();
            assert_eq!((c.r, c.g, c.b, c.a), (expected.r, expected.g, expected.b, expected.a));
        }
        let br = list.vtx_buffer()[2].position();
        assert_eq!((br.x, br.y), (10.0, 5.0));

        let mut list = DrawList::new();
        list.add_rect_filled_multicolor(vec2f(0.0, 0.0), vec2f(10.0, 5.0), [Color::TRANSPARENT; 4]);
        assert!(list.is_empty());
    }

    #[test]
    fn rounding_is_clamped_to_half_the_short_side() {
        let a = vec2f(0.0, 0.0);
        let b = vec2f(100.0, 20.0);
        assert_eq!(effective_rounding(a, b, 50.0), 10.0);
        assert_eq!(effective_rounding(a, b, 4.0), 4.0);
        assert_eq!(effective_rounding(a, b, -3.0), 0.0);

        let mut list = DrawList::new();
        list.path_rect(a, b, 50.0, Corners::ALL);
        assert_eq!(list.path_points().len(), 16);
        for p in list.path_points() {
            assert!(p.x >= -1e-3 && p.x <= 100.0 + 1e-3);
            assert!(p.y >= -1e-3 && p.y <= 20.0 + 1e-3);
        }
        // the top-left arc ends before the top-right arc starts
        let points = list.path_points();
        assert!(points[3].x <= points[4].x);
    }

    #[test]
    fn rounded_fill_is_a_fan_over_the_corner_arcs() {
        let mut list = DrawList::new();
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(40.0, 40.0), RED, 5.0, Corners::ALL);
        assert_eq!(list.vtx_buffer().len(), 16);
        assert_eq!(list.idx_buffer().len(), 3 * 14);

        let mut list = DrawList::new();
        list.path_rect(vec2f(0.0, 0.0), vec2f(40.0, 40.0), 5.0, Corners::TOP);
        // two rounded corners of four points plus two sharp corners
        assert_eq!(list.path_points().len(), 10);
    }

    #[test]
    fn circle_segment_count_scales_with_radius() {
        assert_eq!(circle_auto_segments(1.0), CIRCLE_SEGMENTS_MIN);
        assert_eq!(circle_auto_segments(100.0), 40);
        assert_eq!(circle_auto_segments(10_000.0), CIRCLE_SEGMENTS_MAX);

        let mut list = DrawList::new();
        list.add_circle_filled(vec2f(0.0, 0.0), 100.0, RED, 0);
        assert_eq!(list.vtx_buffer().len(), 40);
        let mut list = DrawList::new();
        list.add_circle_filled(vec2f(0.0, 0.0), 100.0, RED, 8);
        assert_eq!(list.vtx_buffer().len(), 8);
    }

    #[test]
    fn text_emits_a_quad_per_visible_glyph() {
        let font = FixedWidthFont { advance: 8.0, line_height: 10.0 };
        let mut list = DrawList::new();
        list.add_text(&font, vec2f(2.0, 3.0), RED, "ab c\nd");
        assert_eq!(list.vtx_buffer().len(), 4 * 4);
        assert_eq!(list.idx_buffer().len(), 4 * 6);
        // 'c' sits after the space; 'd' starts the second line
        let c = list.vtx_buffer()[8].position();
        assert_eq!((c.x, c.y), (26.0, 3.0));
        let d = list.vtx_buffer()[12].position();
        assert_eq!((d.x, d.y), (2.0, 13.0));
        check_invariants(&list);
    }

    #[test]
    fn image_binds_its_texture_for_one_quad() {
        let mut list = DrawList::new();
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(1.0, 1.0), RED, 0.0, Corners::ALL);
        list.add_image(TextureId::new(3), vec2f(0.0, 0.0), vec2f(8.0, 8.0), vec2f(0.0, 0.0), vec2f(1.0, 1.0), Color::WHITE);
        list.add_rect_filled(vec2f(0.0, 0.0), vec2f(1.0, 1.0), RED, 0.0, Corners::ALL);
        let textures: Vec<u32> = list.commands().iter().map(|c| c.texture_id.raw()).collect();
        assert_eq!(textures, vec![0, 3, 0]);
        check_invariants(&list);
    }

    #[test]
    fn append_rebases_indices_and_coalesces() {
        let mut a = DrawList::new();
        a.add_rect_filled(vec2f(0.0, 0.0), vec2f(1.0, 1.0), RED, 0.0, Corners::ALL);
        let mut b = DrawList::new();
        b.add_rect_filled(vec2f(5.0, 5.0), vec2f(6.0, 6.0), RED, 0.0, Corners::ALL);
        b.push_clip_rect(rect(0, 0, 3, 3));
        b.add_rect_filled(vec2f(5.0, 5.0), vec2f(6.0, 6.0), RED, 0.0, Corners::ALL);

        a.append(&b);
        assert_eq!(a.vtx_buffer().len(), 12);
        assert_eq!(&a.idx_buffer()[6..12], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(a.commands().len(), 2);
        assert_eq!(a.commands()[0].elem_count, 12);
        check_invariants(&a);
    }

    #[test]
    fn random_primitive_streams_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let font = FixedWidthFont::default();
        for _ in 0..50 {
            let mut list = DrawList::new();
            for _ in 0..40 {
                let p = |rng: &mut StdRng| vec2f(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
                let (a, b, c) = (p(&mut rng), p(&mut rng), p(&mut rng));
                let alpha = if rng.random_bool(0.1) { 0 } else { 255 };
                let col = Color { a: alpha, ..RED };
                let thickness = rng.random_range(0.0..3.0);
                match rng.random_range(0..14) {
                    0 => list.add_line(a, b, col, thickness),
                    1 => list.add_rect(a, b, col, rng.random_range(0.0..20.0), Corners::ALL, thickness),
                    2 => list.add_rect_filled(a, b, col, rng.random_range(0.0..20.0), Corners::ALL),
                    3 => list.add_triangle(a, b, c, col, thickness),
                    4 => list.add_triangle_filled(a, b, c, col),
                    5 => list.add_circle(a, rng.random_range(0.0..80.0), col, 0, thickness),
                    6 => list.add_circle_filled(a, rng.random_range(0.0..80.0), col, rng.random_range(0..16)),
                    7 => list.add_text(&font, a, col, "Hello\nworld"),
                    8 => list.push_clip_rect(rect(0, 0, rng.random_range(1..100), rng.random_range(1..100))),
                    9 => list.add_bezier_curve(a, b, c, p(&mut rng), col, thickness, rng.random_range(0..12)),
                    10 => list.add_rect_filled_multicolor(a, b, [col, RED, Color::TRANSPARENT, col]),
                    11 => {
                        list.path_line_to(a);
                        list.path_bezier_curve_to(b, c, p(&mut rng), 0);
                        list.path_fill_convex(col);
                    }
                    12 => {
                        let a_min = rng.random_range(0.0..PI);
                        list.path_arc_to(a, rng.random_range(-5.0..40.0), a_min, a_min + PI, rng.random_range(0..20));
                        list.path_stroke(col, rng.random_bool(0.5), thickness);
                    }
                    _ => list.pop_clip_rect(),
                }
                check_invariants(&list);
            }
        }
    }
}
