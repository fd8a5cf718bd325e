//! Keeps the last good frame on screen while a replacement renders.
//!
//! PDFium rasterizes a page from scratch for every scale, rotation or width
//! change. Without the guard the page area would drop back to a placeholder
//! on every zoom step. Each request gets a token; only the completion that
//! carries the current token may swap the visible frame, so renders that
//! finish late or out of order are discarded.

use crate::models::Scale;

/// Everything that determines the pixels of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderKey {
    /// 1-indexed page number.
    pub page: usize,
    pub scale: Scale,
    /// Orientation in degrees: 0, 90, 180 or 270. Full turns are dropped so
    /// rotating back to a seen orientation reuses its key.
    pub rotation: u16,
    /// Width of the page at scale 1.0, in pixels.
    pub base_width: u32,
}

impl RenderKey {
    /// Pixel width the engine should render at, never zero.
    pub fn target_width(&self) -> u32 {
        let width = (self.base_width as f32 * self.scale.factor()).round() as u32;
        width.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderToken(u64);

#[derive(Debug, Clone)]
pub struct Frame<I> {
    pub key: RenderKey,
    pub image: I,
}

#[derive(Debug, Clone)]
pub enum RenderState<I> {
    /// Nothing has been rendered or requested yet.
    Unrendered,
    /// The visible frame matches the latest request.
    Stable { frame: Frame<I> },
    /// A render for `target` is in flight; `stale` stays visible meanwhile.
    Transitioning {
        stale: Option<Frame<I>>,
        target: RenderKey,
        token: RenderToken,
    },
}

impl<I> Default for RenderState<I> {
    fn default() -> Self {
        Self::Unrendered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The guard moved to a new visible frame.
    Swapped,
    /// The completion belonged to an outdated request and was dropped.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct RenderGuard<I> {
    state: RenderState<I>,
    /// Last token handed out. Tokens are never reused for the lifetime of
    /// the guard.
    issued: u64,
}

impl<I> Default for RenderGuard<I> {
    fn default() -> Self {
        Self {
            state: RenderState::Unrendered,
            issued: 0,
        }
    }
}

impl<I> RenderGuard<I> {
    pub const fn state(&self) -> &RenderState<I> {
        &self.state
    }

    pub const fn is_transitioning(&self) -> bool {
        matches!(self.state, RenderState::Transitioning { .. })
    }

    pub const fn is_stable(&self) -> bool {
        matches!(self.state, RenderState::Stable { .. })
    }

    /// The frame that should be on screen right now.
    pub const fn visible(&self) -> Option<&Frame<I>> {
        match &self.state {
            RenderState::Unrendered => None,
            RenderState::Stable { frame } => Some(frame),
            RenderState::Transitioning { stale, .. } => stale.as_ref(),
        }
    }

    pub fn rendered_scale(&self) -> Option<Scale> {
        self.visible().map(|frame| frame.key.scale)
    }

    pub const fn pending(&self) -> Option<(RenderToken, RenderKey)> {
        match &self.state {
            RenderState::Transitioning { target, token, .. } => Some((*token, *target)),
            _ => None,
        }
    }

    /// Starts a render for `key` unless the visible frame or the render in
    /// flight already covers it. Returns the token the completion must carry.
    ///
    /// Asking for the key of the frame still on screen cancels the render in
    /// flight and settles back on that frame.
    pub fn request(&mut self, key: RenderKey) -> Option<RenderToken> {
        let stale = match std::mem::take(&mut self.state) {
            RenderState::Stable { frame }
            | RenderState::Transitioning {
                stale: Some(frame), ..
            } if frame.key == key => {
                self.state = RenderState::Stable { frame };
                return None;
            }
            state @ RenderState::Transitioning { target, .. } if target == key => {
                self.state = state;
                return None;
            }
            RenderState::Unrendered => None,
            RenderState::Stable { frame } => Some(frame),
            RenderState::Transitioning { stale, .. } => stale,
        };
        self.issued += 1;
        let token = RenderToken(self.issued);
        self.state = RenderState::Transitioning {
            stale,
            target: key,
            token,
        };
        Some(token)
    }

    /// Delivers a finished render. Only the completion for the current
    /// request is accepted.
    pub fn complete(&mut self, token: RenderToken, image: I) -> Completion {
        let key = match &self.state {
            RenderState::Transitioning {
                target,
                token: current,
                ..
            } if *current == token => *target,
            _ => return Completion::Discarded,
        };
        self.state = RenderState::Stable {
            frame: Frame { key, image },
        };
        Completion::Swapped
    }

    /// Abandons the current request after a failed render, falling back to
    /// the stale frame if there is one.
    pub fn fail(&mut self, token: RenderToken) -> Completion {
        if !matches!(&self.state, RenderState::Transitioning { token: current, .. } if *current == token)
        {
            return Completion::Discarded;
        }
        self.state = match std::mem::take(&mut self.state) {
            RenderState::Transitioning {
                stale: Some(frame), ..
            } => RenderState::Stable { frame },
            _ => RenderState::Unrendered,
        };
        Completion::Swapped
    }
}
