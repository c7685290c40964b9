use crate::hit_test::Point;
use serde::{Deserialize, Serialize};

/// One layer of the background grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayer {
    /// Distance between lines in pixels.
    pub cell_size: f32,
    /// Line opacity, 0.0 to 1.0.
    pub opacity: f32,
}

impl GridLayer {
    pub const fn new(cell_size: f32, opacity: f32) -> Self {
        Self { cell_size, opacity }
    }
}

/// Fine 20 px grid under a coarse 100 px grid.
pub fn default_grid_layers() -> Vec<GridLayer> {
    vec![GridLayer::new(20.0, 0.2), GridLayer::new(100.0, 0.4)]
}

/// Generate SVG path commands for the lines of one grid layer.
///
/// Lines scroll with `offset` (the viewport offset) modulo `cell_size`, so
/// the grid appears infinite. The first line sits one cell before the
/// visible edge and lines continue past the far edge.
///
/// # Returns
/// SVG path commands string (e.g., "M 0 -20 L 0 100 M 20 -20 L 20 100 ...")
pub fn generate_grid_commands(width: f32, height: f32, offset: Point, cell_size: f32) -> String {
    if cell_size < 1.0 || width <= 0.0 || height <= 0.0 {
        return String::new();
    }

    let offset_x = offset.x.rem_euclid(cell_size);
    let offset_y = offset.y.rem_euclid(cell_size);

    let columns = (width / cell_size).ceil() as usize;
    let rows = (height / cell_size).ceil() as usize;

    let mut commands = String::with_capacity((columns + rows + 2) * 24);

    for i in 0..=columns {
        let x = cell_size * i as f32 + offset_x;
        if !commands.is_empty() {
            commands.push(' ');
        }
        commands.push_str(&format!("M {} {} L {} {}", x, offset_y - cell_size, x, height + offset_y));
    }

    for j in 0..=rows {
        let y = cell_size * j as f32 + offset_y;
        commands.push(' ');
        commands.push_str(&format!("M {} {} L {} {}", offset_x - cell_size, y, width + offset_x, y));
    }

    commands
}

/// Path commands for every layer, in layer order.
pub fn generate_layered_grid(
    width: f32,
    height: f32,
    offset: Point,
    layers: &[GridLayer],
) -> Vec<(GridLayer, String)> {
    layers
        .iter()
        .map(|layer| (*layer, generate_grid_commands(width, height, offset, layer.cell_size)))
        .collect()
}
