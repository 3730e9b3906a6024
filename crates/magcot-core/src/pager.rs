//! Active texture selection.
//!
//! The pager is clamped at both ends: stepping past the first or last
//! texture is a no-op, never a wraparound.

/// Class set on a navigation button that can be used.
pub const NAV_ON_CLASS: &str = "texon";
/// Class set on a navigation button at its boundary.
pub const NAV_OFF_CLASS: &str = "texoff";

/// Which texture is shown. Invariant: `pointer < count` unless `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePager {
    pointer: usize,
    count: usize,
}

impl TexturePager {
    pub fn new(count: usize) -> Self {
        Self { pointer: 0, count }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Step back one texture. Returns `false` at the first texture.
    pub fn prev(&mut self) -> bool {
        if self.pointer == 0 {
            return false;
        }
        self.pointer -= 1;
        log::debug!("texture {} of {}", self.pointer + 1, self.count);
        true
    }

    /// Step forward one texture. Returns `false` at the last texture.
    pub fn next(&mut self) -> bool {
        if self.pointer + 1 >= self.count {
            return false;
        }
        self.pointer += 1;
        log::debug!("texture {} of {}", self.pointer + 1, self.count);
        true
    }

    /// Whether texture `index` is the one on display.
    pub fn is_active(&self, index: usize) -> bool {
        index == self.pointer && index < self.count
    }

    pub fn can_prev(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_next(&self) -> bool {
        self.pointer + 1 < self.count
    }
}

/// Enabled/disabled class for a navigation button.
pub fn nav_class(enabled: bool) -> (&'static str, &'static str) {
    // (class to add, class to remove)
    if enabled {
        (NAV_ON_CLASS, NAV_OFF_CLASS)
    } else {
        (NAV_OFF_CLASS, NAV_ON_CLASS)
    }
}

/// Shorten a texture path for the name label: paths longer than `limit`
/// characters keep their first `limit - 1` characters plus an ellipsis.
pub fn truncate_label(path: &str, limit: usize) -> String {
    if path.chars().count() <= limit {
        return path.to_string();
    }
    let mut out: String = path.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}
