use serde::{Deserialize, Serialize};

/// Handle of a lattice bundle inside an [`Engine`](crate::Engine); assigned in registration order.
pub type LatticeId = u32;
pub type ShapeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Point of a shape in parametric space, tagged with the upper-left cell that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub u: f32,
    pub v: f32,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
    /// Pinned points ignore user-point drags and cannot be grabbed directly.
    #[serde(default)]
    pub pinned: bool,
    /// Lattices moved in lockstep when this point is dragged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carries: Vec<LatticeId>,
}

impl ControlPoint {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, ..Default::default() }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }

    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Simplified drag handle sitting on the diagonal midpoint of one lattice quad.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carries: Vec<LatticeId>,
}

impl UserPoint {
    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }

    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    #[serde(rename = "control")]
    Control,
    #[serde(rename = "user")]
    User,
}

/// Fill and stroke colours handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Color,
    pub stroke: Color,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self { fill: Color::rgb(255, 0, 0), stroke: Color::rgb(0x66, 0, 0) }
    }
}

/// A sampled curve bound to one lattice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub name: String,
    pub lattice: LatticeId,
    pub samples: Vec<SamplePoint>,
    pub style: ShapeStyle,
}
