//! Confirmation dialog lifecycle
//!
//! The dialog moves through `Hidden -> Visible -> Exiting -> Hidden`. It
//! stays mounted through `Exiting` so the exit animation can play, and only
//! unmounts once the grace period for the *current* exit has elapsed.
//!
//! The machine is pure: every transition returns the side effects the view
//! has to perform (attach/detach the Escape listener, take/release the
//! scroll lock, schedule the unmount). The bookkeeping here guarantees that
//! at most one Escape listener is ever attached and that the scroll lock is
//! held exactly while the dialog is mounted.

/// How long an exiting dialog stays mounted
pub const EXIT_GRACE_MS: u64 = 200;

/// Visual severity of the confirm action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Danger,
    #[default]
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    Hidden,
    Visible,
    /// Closing; unmounts when the grace period for `epoch` elapses
    Exiting { epoch: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogEffect {
    AttachEscape,
    DetachEscape,
    LockScroll,
    UnlockScroll,
    ScheduleUnmount { epoch: u64 },
}

/// Where a pointer click landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed layer behind the content
    Backdrop,
    /// Anywhere inside the dialog panel
    Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogMachine {
    phase: DialogPhase,
    epoch: u64,
    escape_attached: bool,
    scroll_locked: bool,
}

impl Default for DialogMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogMachine {
    pub fn new() -> Self {
        Self {
            phase: DialogPhase::Hidden,
            epoch: 0,
            escape_attached: false,
            scroll_locked: false,
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Whether the dialog is in the render tree
    pub fn is_mounted(&self) -> bool {
        self.phase != DialogPhase::Hidden
    }

    pub fn is_visible(&self) -> bool {
        self.phase == DialogPhase::Visible
    }

    pub fn escape_attached(&self) -> bool {
        self.escape_attached
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Follow the caller's visibility flag
    pub fn set_open(&mut self, open: bool) -> Vec<DialogEffect> {
        let mut effects = Vec::new();
        if open {
            if self.phase == DialogPhase::Visible {
                return effects;
            }
            self.phase = DialogPhase::Visible;
            if !self.scroll_locked {
                self.scroll_locked = true;
                effects.push(DialogEffect::LockScroll);
            }
            if !self.escape_attached {
                self.escape_attached = true;
                effects.push(DialogEffect::AttachEscape);
            }
        } else {
            if self.phase != DialogPhase::Visible {
                return effects;
            }
            self.epoch += 1;
            self.phase = DialogPhase::Exiting { epoch: self.epoch };
            if self.escape_attached {
                self.escape_attached = false;
                effects.push(DialogEffect::DetachEscape);
            }
            effects.push(DialogEffect::ScheduleUnmount { epoch: self.epoch });
        }
        effects
    }

    /// The grace period scheduled for `epoch` has elapsed.
    ///
    /// Ignored unless the dialog is still exiting from that same close; a
    /// re-open in between supersedes the old timer.
    pub fn grace_elapsed(&mut self, epoch: u64) -> Vec<DialogEffect> {
        let mut effects = Vec::new();
        if self.phase != (DialogPhase::Exiting { epoch }) {
            return effects;
        }
        self.phase = DialogPhase::Hidden;
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.push(DialogEffect::UnlockScroll);
        }
        effects
    }

    /// The owning view is going away: release everything still held
    pub fn teardown(&mut self) -> Vec<DialogEffect> {
        let mut effects = Vec::new();
        if self.escape_attached {
            self.escape_attached = false;
            effects.push(DialogEffect::DetachEscape);
        }
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.push(DialogEffect::UnlockScroll);
        }
        self.phase = DialogPhase::Hidden;
        effects
    }

    /// Whether a key press should dismiss the dialog
    pub fn key_dismisses(&self, key: &str) -> bool {
        self.escape_attached && key == "Escape"
    }

    /// Whether a click should dismiss the dialog. The view reports clicks on
    /// both layers here; only the backdrop of a visible dialog dismisses.
    pub fn click_dismisses(&self, target: ClickTarget) -> bool {
        self.is_visible() && target == ClickTarget::Backdrop
    }
}
