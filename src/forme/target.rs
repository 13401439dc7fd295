//! Geometry of the rendered rating controls and resolution of override targets.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde::Serialize;

use crate::state::gag::{GagKind, RatingValue};

/// Point on screen, in CSS pixels from the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPosition {
    /// Distance from the top edge.
    pub top: f32,
    /// Distance from the left edge.
    pub left: f32,
}

impl ScreenPosition {
    /// Position `top`/`left`.
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Position moved by `dx`/`dy`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
        }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            top: (self.top + other.top) / 2.0,
            left: (self.left + other.left) / 2.0,
        }
    }
}

/// Bounding box of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Top edge.
    pub top: f32,
    /// Left edge.
    pub left: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Box at `top`/`left` with the given size.
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> ScreenPosition {
        ScreenPosition::new(self.top, self.left)
    }

    /// Centre of the box; where ripples land.
    pub fn center(&self) -> ScreenPosition {
        ScreenPosition::new(self.top + self.height / 2.0, self.left + self.width / 2.0)
    }
}

/// Size of the visible page area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Everything a gag needs to lay out its animation for one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    /// The value-5 control of the question.
    pub target: Rect,
    /// The card wrapping the question, when the renderer exposes it.
    pub question: Option<Rect>,
    /// Current viewport size.
    pub viewport: Viewport,
}

/// Rating controls registered by the rendering layer.
///
/// Cloning shares the registry so the renderer can keep registering while a
/// session resolves targets.
#[derive(Clone, Default)]
pub struct TargetRegistry {
    options: Arc<DashMap<(GagKind, RatingValue), Rect>>,
    questions: Arc<DashMap<GagKind, Rect>>,
    viewport: Arc<Mutex<Viewport>>,
}

impl TargetRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or clear with `None`) where an option control is rendered.
    pub fn register_option(&self, gag: GagKind, value: RatingValue, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.options.insert((gag, value), rect);
            }
            None => {
                self.options.remove(&(gag, value));
            }
        }
    }

    /// Record (or clear with `None`) where a question card is rendered.
    pub fn register_question(&self, gag: GagKind, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.questions.insert(gag, rect);
            }
            None => {
                self.questions.remove(&gag);
            }
        }
    }

    /// Update the viewport size.
    pub fn set_viewport(&self, viewport: Viewport) {
        *self
            .viewport
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = viewport;
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Viewport {
        *self
            .viewport
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Where an option control is, if it is mounted.
    pub fn resolve(&self, gag: GagKind, value: RatingValue) -> Option<Rect> {
        self.options.get(&(gag, value)).map(|entry| *entry)
    }

    /// Stage for the gag's question, or `None` when its value-5 control is not mounted.
    pub fn stage(&self, gag: GagKind) -> Option<Stage> {
        let target = self.resolve(gag, RatingValue::MAX)?;
        Some(Stage {
            target,
            question: self.questions.get(&gag).map(|entry| *entry),
            viewport: self.viewport(),
        })
    }

    /// Register a plain vertical form layout: one card per question, options side by side.
    pub fn register_column_layout(&self, viewport: Viewport) {
        const CARD_HEIGHT: f32 = 180.0;
        const CARD_WIDTH: f32 = 640.0;
        const OPTION_SIZE: f32 = 20.0;
        const OPTION_GAP: f32 = 96.0;

        self.set_viewport(viewport);
        let card_left = ((viewport.width - CARD_WIDTH) / 2.0).max(0.0);
        for (row, gag) in GagKind::ALL.into_iter().enumerate() {
            let card_top = 240.0 + row as f32 * (CARD_HEIGHT + 12.0);
            self.register_question(
                gag,
                Some(Rect::new(card_top, card_left, CARD_WIDTH, CARD_HEIGHT)),
            );
            for (column, value) in RatingValue::ASCENDING.into_iter().rev().enumerate() {
                let rect = Rect::new(
                    card_top + 96.0,
                    card_left + 48.0 + column as f32 * OPTION_GAP,
                    OPTION_SIZE,
                    OPTION_SIZE,
                );
                self.register_option(gag, value, Some(rect));
            }
        }
    }
}
