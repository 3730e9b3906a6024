//! Click-to-copy feedback cycle for one copyable region.
//!
//! A press starts a clipboard write. Once the write resolves the region
//! shows a placeholder for the cool-down window, then its original content
//! comes back. Presses arriving before the cycle completes are dropped.

use std::cell::RefCell;
use std::fmt::Debug;

use crate::surface::Surface;

/// Markup shown in a region while it cools down.
pub const COPIED_PLACEHOLDER: &str = "<i>Copied.</i>";

/// Default cool-down window in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u32 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CopyPhase {
    #[default]
    Idle,
    /// Clipboard write in flight.
    Writing,
    /// Placeholder on display; holds the markup to restore.
    CoolingDown { original: String },
}

/// Per-region guard. One instance lives next to each copy listener.
#[derive(Debug, Clone, Default)]
pub struct CopyCycle {
    phase: CopyPhase,
}

impl CopyCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &CopyPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != CopyPhase::Idle
    }

    /// A click on the region. Returns the text to put on the clipboard, or
    /// `None` while a previous cycle is still running.
    pub fn press(&mut self, displayed_text: &str) -> Option<String> {
        if self.is_busy() {
            log::trace!("copy ignored during cool-down");
            return None;
        }
        self.phase = CopyPhase::Writing;
        Some(displayed_text.to_string())
    }

    /// The clipboard accepted the text. Stashes the region's current markup
    /// and returns the placeholder to show instead.
    pub fn written(&mut self, current_html: &str) -> &'static str {
        self.phase = CopyPhase::CoolingDown {
            original: current_html.to_string(),
        };
        COPIED_PLACEHOLDER
    }

    /// The cool-down elapsed. Returns the markup to restore, if any.
    pub fn expire(&mut self) -> Option<String> {
        match std::mem::take(&mut self.phase) {
            CopyPhase::CoolingDown { original } => Some(original),
            _ => None,
        }
    }

    /// The clipboard rejected the write; the region is usable again.
    pub fn failed(&mut self) {
        self.phase = CopyPhase::Idle;
    }
}

// ─── Surface helpers ─────────────────────────────────────────────────────

/// Handle a click on `node`: returns the text to write to the clipboard.
pub fn press_region<S: Surface>(
    surface: &S,
    node: &S::Node,
    cycle: &mut CopyCycle,
) -> Option<String> {
    cycle.press(&surface.text(node))
}

/// Swap the region's content for the placeholder after a successful write.
pub fn show_copied<S: Surface>(surface: &S, node: &S::Node, cycle: &mut CopyCycle) {
    let current = surface.inner_html(node);
    let placeholder = cycle.written(&current);
    surface.set_inner_html(node, placeholder);
}

/// Put the original content back once the cool-down elapsed.
pub fn restore_region<S: Surface>(surface: &S, node: &S::Node, cycle: &mut CopyCycle) {
    if let Some(original) = cycle.expire() {
        surface.set_inner_html(node, &original);
    }
}

/// Drive one press to completion: await the clipboard `write`, show the
/// placeholder, wait `delay(cooldown_ms)`, restore. A rejected write
/// releases the guard without touching the region. Returns whether the
/// text reached the clipboard.
pub async fn finish_copy<S, W, E, D, F>(
    surface: &S,
    node: &S::Node,
    cycle: &RefCell<CopyCycle>,
    cooldown_ms: u32,
    write: W,
    delay: D,
) -> bool
where
    S: Surface,
    W: Future<Output = Result<(), E>>,
    E: Debug,
    D: FnOnce(u32) -> F,
    F: Future<Output = ()>,
{
    if let Err(e) = write.await {
        log::warn!("clipboard write failed: {e:?}");
        cycle.borrow_mut().failed();
        return false;
    }
    show_copied(surface, node, &mut cycle.borrow_mut());
    delay(cooldown_ms).await;
    restore_region(surface, node, &mut cycle.borrow_mut());
    true
}
