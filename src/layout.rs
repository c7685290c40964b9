//! Node and pin geometry.
//!
//! Everything here is a pure function of a node's position and its ordered
//! pin list. Label widths use a monospace estimate, so the same numbers drive
//! rendering and hit-testing without asking the host to measure text.

use crate::hit_test::{Point, Rect};
use crate::pin::{Pin, PinDirection};
use serde::{Deserialize, Serialize};

/// Geometry constants used to lay out nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Estimated width of one label character.
    pub char_width: f32,
    /// Height of a label line (node title and pin labels).
    pub label_height: f32,
    /// Side length of the square pin button.
    pub pin_size: f32,
    /// Width of a node with no labels at all.
    pub base_width: f32,
    /// Height reserved for the node title.
    pub header_height: f32,
    /// Offset from the node top to the pin rows.
    pub pin_vertical_offset: f32,
    /// Gap between consecutive pin rows.
    pub pin_vertical_spacing: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            label_height: 16.0,
            pin_size: 10.0,
            base_width: 60.0,
            header_height: 16.0,
            pin_vertical_offset: 16.0,
            pin_vertical_spacing: 10.0,
        }
    }
}

impl LayoutMetrics {
    /// Monospace width estimate for `text`.
    pub fn estimate_text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    /// Vertical distance between the tops of two consecutive pin rows.
    pub fn row_pitch(&self) -> f32 {
        self.pin_size + self.pin_vertical_spacing
    }
}

/// Derived node geometry. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    pub node_rect: Rect,
    pub pin_size: f32,
    pub input_pin_offset: f32,
    pub output_pin_offset: f32,
    pub pin_vertical_offset: f32,
    pub row_pitch: f32,
}

fn longest_label_width(pins: &[Pin], direction: PinDirection, metrics: &LayoutMetrics) -> f32 {
    pins.iter()
        .filter(|pin| pin.direction() == direction)
        .map(|pin| metrics.estimate_text_width(pin.name()))
        .fold(0.0, f32::max)
}

fn count_pins(pins: &[Pin], direction: PinDirection) -> usize {
    pins.iter().filter(|pin| pin.direction() == direction).count()
}

/// Compute the body rectangle and pin anchors of a node at `position`.
pub fn compute_node_layout(position: Point, pins: &[Pin], metrics: &LayoutMetrics) -> NodeLayout {
    let width = metrics.base_width
        + longest_label_width(pins, PinDirection::Input, metrics)
        + longest_label_width(pins, PinDirection::Output, metrics);
    let rows = count_pins(pins, PinDirection::Input).max(count_pins(pins, PinDirection::Output));
    let height = metrics.header_height + metrics.pin_vertical_offset + metrics.row_pitch() * rows as f32;

    NodeLayout {
        node_rect: Rect::new(position.x, position.y, width, height),
        pin_size: metrics.pin_size,
        input_pin_offset: metrics.pin_size,
        output_pin_offset: width - metrics.pin_size,
        pin_vertical_offset: metrics.pin_vertical_offset,
        row_pitch: metrics.row_pitch(),
    }
}

/// 1-based row of the pin at `index` among pins of the same direction.
///
/// Recomputed by scanning the preceding pins on every call; no per-direction
/// index is stored.
pub fn direction_rank(pins: &[Pin], index: usize) -> Option<usize> {
    let direction = pins.get(index)?.direction();
    let preceding = pins[..index]
        .iter()
        .filter(|pin| pin.direction() == direction)
        .count();
    Some(preceding + 1)
}

/// Rectangle of the pin button at `index`, or `None` if out of range.
pub fn compute_pin_rect(layout: &NodeLayout, pins: &[Pin], index: usize) -> Option<Rect> {
    let row = direction_rank(pins, index)?;
    let origin = layout.node_rect.min();

    let y = origin.y + layout.pin_vertical_offset + row as f32 * layout.row_pitch;
    let x = match pins[index].direction() {
        PinDirection::Input => origin.x + layout.input_pin_offset,
        _ => origin.x + layout.output_pin_offset - layout.pin_size,
    };

    Some(Rect::new(x, y, layout.pin_size, layout.pin_size))
}

/// Rectangle of the label next to the pin at `index`.
///
/// Input labels start one pin size right of the pin; output labels are
/// right-aligned so they end one pin size right of the pin's left edge.
pub fn compute_pin_label_rect(
    layout: &NodeLayout,
    pins: &[Pin],
    index: usize,
    metrics: &LayoutMetrics,
) -> Option<Rect> {
    let pin_rect = compute_pin_rect(layout, pins, index)?;
    let pin = &pins[index];

    let width = (pin.name().chars().count() + 1) as f32 * metrics.char_width;
    let x = match pin.direction() {
        PinDirection::Input => pin_rect.x + layout.pin_size,
        _ => pin_rect.x - (width - layout.pin_size),
    };

    Some(Rect::new(x, pin_rect.y, width, metrics.label_height))
}

/// Rectangle of the node title strip.
pub fn compute_title_rect(layout: &NodeLayout, metrics: &LayoutMetrics) -> Rect {
    let body = layout.node_rect;
    Rect::new(body.x, body.y, body.width, metrics.header_height)
}
