//! Overlay geometry
//!
//! Extra triangles toggled by directional input. They reference vertices of
//! the simulated mesh but live outside it: the overlay is appended after the
//! core indices when the index buffer is composed, and never changes the
//! World's own index array.

/// Directional keys that toggle an overlay triangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    Left,
    Right,
    Up,
    Down,
}

impl OverlayKey {
    pub const ALL: [OverlayKey; 4] = [
        OverlayKey::Left,
        OverlayKey::Right,
        OverlayKey::Up,
        OverlayKey::Down,
    ];

    /// Default triangle shown while the key is held
    pub fn triangle(self) -> [u32; 3] {
        match self {
            OverlayKey::Left => [2, 3, 4],
            OverlayKey::Right => [0, 5, 1],
            OverlayKey::Down => [6, 0, 2],
            OverlayKey::Up => [3, 1, 7],
        }
    }
}

/// Active overlay triangles, in press order
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    active: Vec<(OverlayKey, [u32; 3])>,
    dirty: bool,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the key's triangle. Returns false if it was already shown.
    pub fn press(&mut self, key: OverlayKey) -> bool {
        self.press_with(key, key.triangle())
    }

    /// Show a custom triangle for `key`
    pub fn press_with(&mut self, key: OverlayKey, triangle: [u32; 3]) -> bool {
        if self.is_active(key) {
            return false;
        }
        self.active.push((key, triangle));
        self.dirty = true;
        true
    }

    /// Hide the key's triangle. Returns false if it was not shown.
    pub fn release(&mut self, key: OverlayKey) -> bool {
        let before = self.active.len();
        self.active.retain(|(k, _)| *k != key);
        let removed = self.active.len() != before;
        self.dirty |= removed;
        removed
    }

    pub fn is_active(&self, key: OverlayKey) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
    }

    /// Active triangles in press order
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.active.iter().map(|(_, tri)| *tri)
    }

    pub fn index_count(&self) -> usize {
        self.active.len() * 3
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether the set of triangles changed since the last `clear_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Append `core` then every overlay triangle whose vertices exist
    ///
    /// Triangles referencing a vertex at or beyond `vertex_count` are skipped.
    pub fn compose(&self, core: &[u32], vertex_count: usize, out: &mut Vec<u32>) {
        out.clear();
        out.reserve(core.len() + self.index_count());
        out.extend_from_slice(core);

        for tri in self.triangles() {
            if tri.iter().all(|&i| (i as usize) < vertex_count) {
                out.extend_from_slice(&tri);
            } else {
                log::debug!("skipping overlay triangle {:?}: only {} vertices", tri, vertex_count);
            }
        }
    }
}
