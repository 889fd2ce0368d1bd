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
use crate::Id;

/// Stack of hash seeds scoping widget identity to its structural nesting path.
#[derive(Clone, Default, Debug)]
pub struct IdStack {
    id_stack: Vec<Id>,
    last_id: Option<Id>,
}

impl IdStack {
    /// Creates an empty stack (seed 0).
    pub fn new() -> Self { Self::default() }

    /// Current scope seed, or 0 when nothing is pushed.
    pub fn seed(&self) -> Id {
        match self.id_stack.last() {
            Some(id) => *id,
            None => Id::new(0),
        }
    }

    /// Number of pushed scopes.
    pub fn depth(&self) -> usize { self.id_stack.len() }

    /// Most recently derived ID.
    pub fn last_id(&self) -> Option<Id> { self.last_id }

    fn scoped(&mut self, hash: Id) -> Id {
        let res = hash.seeded(self.seed());
        self.last_id = Some(res);
        res
    }

    /// Derives the ID of a string label in the current scope.
    pub fn get_id_from_str(&mut self, s: &str) -> Id { self.scoped(Id::from_str(s)) }

    /// Derives the ID of an object's address in the current scope.
    pub fn get_id_from_ptr<T: ?Sized>(&mut self, orig_id: &T) -> Id { self.scoped(Id::from_ptr(orig_id)) }

    /// Derives the ID of an integer in the current scope.
    pub fn get_id_from_int(&mut self, orig_id: i64) -> Id { self.scoped(Id::from_int(orig_id)) }

    /// Pushes an already-derived ID as the new scope seed.
    pub fn push(&mut self, id: Id) { self.id_stack.push(id); }

    /// Opens a scope named by a string.
    pub fn push_id_from_str(&mut self, s: &str) {
        let id = self.get_id_from_str(s);
        self.id_stack.push(id);
    }

    /// Opens a scope named by an object's address.
    pub fn push_id_from_ptr<T: ?Sized>(&mut self, orig_id: &T) {
        let id = self.get_id_from_ptr(orig_id);
        self.id_stack.push(id);
    }

    /// Opens a scope named by an integer (e.g. a loop index).
    pub fn push_id_from_int(&mut self, orig_id: i64) {
        let id = self.get_id_from_int(orig_id);
        self.id_stack.push(id);
    }

    /// Closes the innermost scope. Returns `false` if the stack was already empty.
    pub fn pop_id(&mut self) -> bool { self.id_stack.pop().is_some() }

    /// Drops scopes until at most `depth` remain.
    pub fn truncate(&mut self, depth: usize) { self.id_stack.truncate(depth); }

    /// Drops every scope.
    pub fn clear(&mut self) { self.id_stack.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_same_scope_is_stable() {
        let mut ids = IdStack::new();
        let a = ids.get_id_from_str("Button");
        let b = ids.get_id_from_str("Button");
        assert_eq!(a, b);
        assert_eq!(ids.last_id(), Some(a));
    }

    #[test]
    fn empty_stack_uses_plain_hash() {
        let mut ids = IdStack::new();
        assert_eq!(ids.get_id_from_str("W"), Id::from_str("W"));
    }

    #[test]
    fn scopes_disambiguate_repeated_labels() {
        let mut ids = IdStack::new();
        let mut seen = Vec::new();
        for i in 0..3 {
            ids.push_id_from_int(i);
            for axis in ["X", "Y", "Z"] {
                seen.push(ids.get_id_from_str(axis));
            }
            assert!(ids.pop_id());
        }
        for (i, a) in seen.iter().enumerate() {
            for b in &seen[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn nested_scopes_restore_on_pop() {
        let mut ids = IdStack::new();
        let outer = ids.get_id_from_str("item");
        ids.push_id_from_str("panel");
        let inner = ids.get_id_from_str("item");
        assert_ne!(outer, inner);
        ids.pop_id();
        assert_eq!(ids.get_id_from_str("item"), outer);
    }

    #[test]
    fn pop_on_empty_is_reported() {
        let mut ids = IdStack::new();
        assert!(!ids.pop_id());
        assert_eq!(ids.depth(), 0);
    }

    #[test]
    fn pointer_ids_follow_identity() {
        let mut ids = IdStack::new();
        let a = 1u32;
        let b = 2u32;
        assert_eq!(ids.get_id_from_ptr(&a), ids.get_id_from_ptr(&a));
        assert_ne!(ids.get_id_from_ptr(&a), ids.get_id_from_ptr(&b));
    }
}
