//! Render boundary.
//!
//! [`Scene::build`] snapshots everything a host needs to paint the graph:
//! node bodies, pin buttons with their labels, link endpoints and the
//! drag-to-link preview. [`Scene::draw_commands`] flattens the snapshot
//! into an ordered stream of [`DrawCommand`]s carrying Slint colors and
//! strings, ready to push into a Slint model or any other painter through
//! [`SceneRenderer`].

use crate::config::EditorConfig;
use crate::graph::Graph;
use crate::grid::generate_layered_grid;
use crate::hit_test::{Point, Rect};
use crate::layout::{compute_pin_label_rect, compute_pin_rect, compute_title_rect};
use crate::link::Link;
use crate::path::generate_link_path;
use crate::pin::PinAddress;
use crate::selection::Selection;
use slint::{Color, SharedString};

/// Colors used when flattening a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub selection: Color,
    pub link: Color,
    pub preview: Color,
    pub grid: Color,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            selection: Color::from_rgb_u8(255, 235, 4),
            link: Color::from_rgb_u8(0, 0, 0),
            preview: Color::from_rgb_u8(255, 0, 255),
            grid: Color::from_rgb_u8(128, 128, 128),
        }
    }
}

impl SceneStyle {
    /// Grid color at the given layer opacity.
    pub fn grid_color(&self, opacity: f32) -> Color {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_argb_u8(alpha, self.grid.red(), self.grid.green(), self.grid.blue())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinVisual {
    pub address: PinAddress,
    pub rect: Rect,
    pub label_rect: Rect,
    pub label: SharedString,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub id: i32,
    pub body: Rect,
    pub title_rect: Rect,
    pub title: SharedString,
    pub selected: bool,
    pub pins: Vec<PinVisual>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkVisual {
    pub link: Link,
    pub from: Point,
    pub to: Point,
}

/// Everything visible, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<NodeVisual>,
    pub links: Vec<LinkVisual>,
    /// Line from the selected pin's center to the pointer while linking.
    pub preview: Option<(Point, Point)>,
    pub viewport_offset: Point,
}

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Grid { commands: SharedString, color: Color },
    FillRect { rect: Rect, color: Color },
    NodeBody { node_id: i32, rect: Rect },
    PinButton { address: PinAddress, rect: Rect },
    Label { rect: Rect, text: SharedString },
    Curve { path: SharedString, from: Point, to: Point, color: Color, thickness: f32 },
}

/// Sink for draw commands.
pub trait SceneRenderer {
    fn draw(&mut self, command: &DrawCommand);
}

impl<F: FnMut(&DrawCommand)> SceneRenderer for F {
    fn draw(&mut self, command: &DrawCommand) {
        self(command)
    }
}

impl Scene {
    /// Snapshot `graph`. `pointer` is where the drag-to-link preview ends.
    pub fn build(graph: &Graph, pointer: Point) -> Self {
        let metrics = graph.metrics();
        let selection = graph.selection();

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| {
                let layout = node.compute_layout(metrics);
                let pins = node
                    .pins()
                    .iter()
                    .enumerate()
                    .filter_map(|(index, pin)| {
                        Some(PinVisual {
                            address: pin.address(),
                            rect: compute_pin_rect(&layout, node.pins(), index)?,
                            label_rect: compute_pin_label_rect(&layout, node.pins(), index, metrics)?,
                            label: pin.name().into(),
                        })
                    })
                    .collect();

                NodeVisual {
                    id: node.id(),
                    body: layout.node_rect,
                    title_rect: compute_title_rect(&layout, metrics),
                    title: node.name().into(),
                    selected: selection == Selection::Node(node.id()),
                    pins,
                }
            })
            .collect();

        let links = graph
            .links()
            .iter()
            .filter_map(|link| {
                Some(LinkVisual {
                    link: *link,
                    from: graph.pin_anchor(link.from())?,
                    to: graph.pin_anchor(link.to())?,
                })
            })
            .collect();

        let preview = selection
            .pin()
            .and_then(|address| graph.pin_anchor(address))
            .map(|anchor| (anchor, pointer));

        Scene { nodes, links, preview, viewport_offset: graph.viewport_offset() }
    }

    /// Flatten into paint order: grid layers, then per node the selection
    /// highlight, body, pin buttons, title and pin labels, then links, then
    /// the preview curve.
    pub fn draw_commands(&self, config: &EditorConfig, style: &SceneStyle, canvas: Rect) -> Vec<DrawCommand> {
        let mut commands = Vec::new();

        for (layer, path) in generate_layered_grid(canvas.width, canvas.height, self.viewport_offset, &config.grid_layers) {
            if !path.is_empty() {
                commands.push(DrawCommand::Grid { commands: path.into(), color: style.grid_color(layer.opacity) });
            }
        }

        for node in &self.nodes {
            if node.selected {
                commands.push(DrawCommand::FillRect {
                    rect: node.body.inflate(config.selection_border),
                    color: style.selection,
                });
            }
            commands.push(DrawCommand::NodeBody { node_id: node.id, rect: node.body });
            for pin in &node.pins {
                commands.push(DrawCommand::PinButton { address: pin.address, rect: pin.rect });
            }
            commands.push(DrawCommand::Label { rect: node.title_rect, text: node.title.clone() });
            for pin in &node.pins {
                commands.push(DrawCommand::Label { rect: pin.label_rect, text: pin.label.clone() });
            }
        }

        for link in &self.links {
            commands.push(curve(link.from, link.to, style.link, config.link_thickness));
        }

        if let Some((from, to)) = self.preview {
            commands.push(curve(from, to, style.preview, config.link_thickness));
        }

        commands
    }

    pub fn render(&self, config: &EditorConfig, style: &SceneStyle, canvas: Rect, renderer: &mut dyn SceneRenderer) {
        for command in self.draw_commands(config, style, canvas) {
            renderer.draw(&command);
        }
    }
}

fn curve(from: Point, to: Point, color: Color, thickness: f32) -> DrawCommand {
    DrawCommand::Curve { path: generate_link_path(from, to).into(), from, to, color, thickness }
}
