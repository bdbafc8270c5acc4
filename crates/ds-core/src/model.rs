//! Document data model.
//!
//! A document is a fixed-size canvas with a background color and a flat,
//! z-ordered list of objects (first = back, last = front). Every object has a
//! stable interned ID, a position (`left`, `top`), an optional fill and an
//! optional stroke. The whole model is serde-serializable; that encoding is
//! what snapshots carry.

use crate::color::Color;
use crate::id::ObjectId;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::str::FromStr;

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The shapes offered by the "Add Shape" palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Line,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Line,
        ShapeKind::Polygon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Line => "Line",
            ShapeKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    /// Case-insensitive; accepts the palette names and short forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            "line" => Ok(ShapeKind::Line),
            "polygon" => Ok(ShapeKind::Polygon),
            _ => Err(format!("unknown shape `{s}`")),
        }
    }
}

// ─── Objects ─────────────────────────────────────────────────────────────

/// What an object is, with its kind-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Text {
        content: String,
        font_size: f32,
        font_weight: u16,
    },
    Rect {
        width: f32,
        height: f32,
    },
    Circle {
        radius: f32,
    },
    Triangle {
        width: f32,
        height: f32,
    },
    /// Endpoints are relative to the object's `(left, top)`.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    /// Vertices are relative to the object's `(left, top)`.
    Polygon {
        points: SmallVec<[Point; 8]>,
    },
    /// Raster image. `src` is a `data:` URL; `width`/`height` are the
    /// intrinsic pixel size and `scale` the uniform display scale.
    Image {
        src: String,
        width: u32,
        height: u32,
        scale: f32,
    },
}

impl ObjectKind {
    /// Default editable text block.
    pub fn text() -> Self {
        ObjectKind::Text {
            content: "Edit Me".into(),
            font_size: 24.0,
            font_weight: 700,
        }
    }

    /// Default geometry for a palette shape.
    pub fn shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => ObjectKind::Rect {
                width: 120.0,
                height: 80.0,
            },
            ShapeKind::Circle => ObjectKind::Circle { radius: 50.0 },
            ShapeKind::Triangle => ObjectKind::Triangle {
                width: 100.0,
                height: 100.0,
            },
            ShapeKind::Line => ObjectKind::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 150.0,
                y2: 0.0,
            },
            ShapeKind::Polygon => ObjectKind::Polygon {
                points: smallvec![
                    Point::new(50.0, 0.0),
                    Point::new(100.0, 50.0),
                    Point::new(75.0, 100.0),
                    Point::new(25.0, 100.0),
                    Point::new(0.0, 50.0),
                ],
            },
        }
    }

    /// Short lowercase name, also used as the ID prefix.
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Text { .. } => "text",
            ObjectKind::Rect { .. } => "rect",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Triangle { .. } => "triangle",
            ObjectKind::Line { .. } => "line",
            ObjectKind::Polygon { .. } => "polygon",
            ObjectKind::Image { .. } => "image",
        }
    }

    /// Lines have no interior; their color lives on the stroke.
    pub fn is_stroke_only(&self) -> bool {
        matches!(self, ObjectKind::Line { .. })
    }
}

/// A single element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub left: f32,
    pub top: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
}

impl CanvasObject {
    /// New object at `(left, top)` with a fresh prefixed ID and no styling.
    pub fn new(kind: ObjectKind, left: f32, top: f32) -> Self {
        Self {
            id: ObjectId::allocate(kind.type_name()),
            kind,
            left,
            top,
            fill: None,
            stroke: None,
        }
    }

    /// Builder: set the fill.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Builder: set the stroke.
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    /// Apply a palette color: stroke for lines, fill for everything else.
    pub fn paint(&mut self, color: Color) {
        if self.kind.is_stroke_only() {
            let width = self.stroke.map(|s| s.width).unwrap_or(1.0);
            self.stroke = Some(Stroke { color, width });
        } else {
            self.fill = Some(color);
        }
    }

    /// The color a picker should show for this object.
    pub fn display_color(&self) -> Option<Color> {
        if self.kind.is_stroke_only() {
            self.stroke.map(|s| s.color)
        } else {
            self.fill
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete document state: canvas size, background and objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub objects: Vec<CanvasObject>,
}

impl Document {
    #[must_use]
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            objects: Vec::new(),
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Append an object on top. If its ID is already taken it is stored
    /// under a freshly allocated one; the ID actually used is returned.
    pub fn insert(&mut self, mut object: CanvasObject) -> ObjectId {
        if self.contains(object.id) {
            let fresh = ObjectId::allocate(object.kind.type_name());
            log::warn!("object id {} already in use, stored as {fresh}", object.id);
            object.id = fresh;
        }
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Remove an object, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<CanvasObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_names_parse() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>().unwrap(), kind);
        }
        assert_eq!("rect".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert!("hexagon".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn paint_targets_stroke_for_lines() {
        let red = Color::rgb(255, 0, 0);
        let mut line = CanvasObject::new(ObjectKind::shape(ShapeKind::Line), 0.0, 0.0)
            .with_stroke(Color::BLACK, 5.0);
        line.paint(red);
        assert_eq!(line.fill, None);
        assert_eq!(line.stroke, Some(Stroke { color: red, width: 5.0 }));
        assert_eq!(line.display_color(), Some(red));

        let mut rect = CanvasObject::new(ObjectKind::shape(ShapeKind::Rectangle), 0.0, 0.0);
        rect.paint(red);
        assert_eq!(rect.fill, Some(red));
    }

    #[test]
    fn object_json_is_flat_and_tagged() {
        let obj = CanvasObject::new(ObjectKind::Circle { radius: 50.0 }, 150.0, 150.0)
            .with_fill(Color::rgb(0, 255, 0));
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "circle");
        assert_eq!(value["radius"], 50.0);
        assert_eq!(value["fill"], "#00ff00");
        assert!(value.get("stroke").is_none());
    }

    #[test]
    fn document_remove_keeps_order() {
        let mut doc = Document::new(900, 600, Color::WHITE);
        let a = CanvasObject::new(ObjectKind::text(), 0.0, 0.0);
        let b = CanvasObject::new(ObjectKind::shape(ShapeKind::Circle), 0.0, 0.0);
        let c = CanvasObject::new(ObjectKind::shape(ShapeKind::Triangle), 0.0, 0.0);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        doc.objects.extend([a, b, c]);

        assert!(doc.remove(b_id).is_some());
        assert!(doc.remove(b_id).is_none());
        let ids: Vec<_> = doc.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a_id, c_id]);
    }

    #[test]
    fn insert_renames_a_colliding_object() {
        let mut doc = Document::new(900, 600, Color::WHITE);
        let first = CanvasObject::new(ObjectKind::shape(ShapeKind::Rectangle), 0.0, 0.0);
        let mut clash = CanvasObject::new(ObjectKind::shape(ShapeKind::Rectangle), 10.0, 10.0);
        clash.id = first.id;

        let first_id = doc.insert(first);
        let clash_id = doc.insert(clash);
        assert_ne!(first_id, clash_id);
        assert!(clash_id.as_str().starts_with("rect_"));
        assert_eq!(doc.get(clash_id).map(|o| o.left), Some(10.0));
        assert_eq!(doc.objects.iter().filter(|o| o.id == first_id).count(), 1);
    }
}
