//! Element definitions for the whiteboard.

mod list;
mod path;
mod style;

pub use list::{append, find, position_of, remove_in, replace, replace_in};
pub use path::{perpendicular_distance, simplify_path};
pub use style::{
    ColorParseError, DEFAULT_ROUGHNESS, ElementStyle, FONT_FAMILIES, MAX_FONT_SIZE, MAX_OPACITY,
    MAX_STROKE_WIDTH, MIN_FONT_SIZE, MIN_OPACITY, MIN_STROKE_WIDTH, PropertyError, PropertyValue,
    Rgba, ToolProperties, ToolProperty, parse_background,
};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = String;

/// Mint a fresh element id.
pub fn generate_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Pencil,
    Diamond,
    Database,
    Cloud,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Line,
        ElementKind::Arrow,
        ElementKind::Text,
        ElementKind::Pencil,
        ElementKind::Diamond,
        ElementKind::Database,
        ElementKind::Cloud,
    ];

    /// Kinds whose extent is a plain box and gets normalized on release.
    pub fn is_box_like(self) -> bool {
        !self.is_path_like()
    }

    /// Kinds whose extent is directional and never normalized.
    pub fn is_path_like(self) -> bool {
        matches!(
            self,
            ElementKind::Line | ElementKind::Arrow | ElementKind::Pencil
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Line => "line",
            ElementKind::Arrow => "arrow",
            ElementKind::Text => "text",
            ElementKind::Pencil => "pencil",
            ElementKind::Diamond => "diamond",
            ElementKind::Database => "database",
            ElementKind::Cloud => "cloud",
        }
    }
}

/// Text payload carried by text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
}

/// A single drawable element on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    /// Origin of the extent, in world units.
    pub position: Point,
    /// Horizontal extent; negative while dragging left, or for path-like kinds.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    /// World-space samples. Freehand strokes, or the two endpoints of lines.
    #[serde(default)]
    pub points: Vec<Point>,
    pub style: ElementStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl Element {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The corner opposite `position`.
    pub fn end_point(&self) -> Point {
        self.position + self.extent()
    }

    /// Stretch the extent so that `end` becomes the far corner.
    /// Origin and style are left alone.
    pub fn set_extent_to(&mut self, end: Point) {
        self.width = end.x - self.position.x;
        self.height = end.y - self.position.y;
        self.points = vec![self.position, end];
    }

    /// Axis-aligned bounds in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            ElementKind::Pencil if !self.points.is_empty() => points_bounds(&self.points),
            _ => Rect::from_points(self.position, self.end_point()),
        }
    }

    /// True once the extent is non-negative, or always for path-like kinds.
    pub fn is_normalized(&self) -> bool {
        self.kind.is_path_like() || (self.width >= 0.0 && self.height >= 0.0)
    }

    /// Apply one palette change. Font changes only reach text elements.
    pub fn apply_property(&mut self, property: &ToolProperty) {
        match property {
            ToolProperty::StrokeColor(c) => self.style.stroke_color = *c,
            ToolProperty::BackgroundColor(c) => self.style.background_color = *c,
            ToolProperty::StrokeWidth(w) => self.style.stroke_width = *w,
            ToolProperty::Opacity(o) => self.style.opacity = *o,
            ToolProperty::FontFamily(family) => {
                if let Some(text) = &mut self.text {
                    text.font_family.clone_from(family);
                }
            }
            ToolProperty::FontSize(size) => {
                if let Some(text) = &mut self.text {
                    text.font_size = *size;
                }
            }
        }
    }
}

pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Build a new element spanning `start` to `end` with the palette's style.
pub fn create(
    id: impl Into<ElementId>,
    start: Point,
    end: Point,
    kind: ElementKind,
    props: &ToolProperties,
) -> Element {
    let text = (kind == ElementKind::Text).then(|| TextContent {
        content: String::new(),
        font_family: props.font_family.clone(),
        font_size: props.font_size,
    });
    Element {
        id: id.into(),
        kind,
        position: start,
        width: end.x - start.x,
        height: end.y - start.y,
        points: vec![start, end],
        style: ElementStyle::from_properties(props),
        text,
    }
}

/// Move box-like elements to a min-corner origin with non-negative extent.
/// Their two points become the min and max corners. Path-like elements come
/// back unchanged.
pub fn normalize(element: &Element) -> Element {
    if element.kind.is_path_like() {
        return element.clone();
    }
    let rect = Rect::from_points(element.position, element.end_point());
    Element {
        position: rect.origin(),
        width: rect.width(),
        height: rect.height(),
        points: vec![rect.origin(), Point::new(rect.x1, rect.y1)],
        ..element.clone()
    }
}

/// Copy of `element` shifted by `delta`, points included.
pub fn translate(element: &Element, delta: Vec2) -> Element {
    Element {
        position: element.position + delta,
        points: element.points.iter().map(|p| *p + delta).collect(),
        ..element.clone()
    }
}
