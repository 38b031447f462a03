//! Selection handles and resize geometry.

use crate::shapes::{Element, ElementKind, points_bounds};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
    /// First endpoint of a line or arrow. Resizes like `TopLeft`.
    Start,
    /// Second endpoint of a line or arrow. Resizes like `BottomRight`.
    End,
}

impl HandleKind {
    /// Short code used by hosts (`tl`, `br`, `start`, ...).
    pub fn code(self) -> &'static str {
        match self {
            HandleKind::TopLeft => "tl",
            HandleKind::TopRight => "tr",
            HandleKind::BottomLeft => "bl",
            HandleKind::BottomRight => "br",
            HandleKind::Top => "t",
            HandleKind::Right => "r",
            HandleKind::Bottom => "b",
            HandleKind::Left => "l",
            HandleKind::Start => "start",
            HandleKind::End => "end",
        }
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    /// `tolerance` should already be divided by the viewport scale.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance_squared(point) <= tolerance * tolerance
    }
}

/// Get the selection handles for an element.
pub fn handles(element: &Element) -> Vec<Handle> {
    match element.kind() {
        ElementKind::Line | ElementKind::Arrow => vec![
            Handle::new(element.position, HandleKind::Start),
            Handle::new(element.end_point(), HandleKind::End),
        ],
        ElementKind::Pencil => corner_handles(element.bounds()),
        ElementKind::Rectangle
        | ElementKind::Circle
        | ElementKind::Text
        | ElementKind::Diamond
        | ElementKind::Database
        | ElementKind::Cloud => {
            let bounds = element.bounds();
            let mut out = corner_handles(bounds);
            out.extend(edge_handles(bounds));
            out
        }
    }
}

fn corner_handles(bounds: Rect) -> Vec<Handle> {
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::TopLeft),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::TopRight),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::BottomLeft),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::BottomRight),
    ]
}

fn edge_handles(bounds: Rect) -> Vec<Handle> {
    let c = bounds.center();
    vec![
        Handle::new(Point::new(c.x, bounds.y0), HandleKind::Top),
        Handle::new(Point::new(bounds.x1, c.y), HandleKind::Right),
        Handle::new(Point::new(c.x, bounds.y1), HandleKind::Bottom),
        Handle::new(Point::new(bounds.x0, c.y), HandleKind::Left),
    ]
}

/// Find which handle (if any) is hit at the given point.
/// The nearest one wins when handles overlap on tiny elements.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles(element)
        .into_iter()
        .filter(|h| h.hit_test(point, tolerance))
        .min_by(|a, b| {
            a.position
                .distance_squared(point)
                .total_cmp(&b.position.distance_squared(point))
        })
        .map(|h| h.kind)
}

/// A signed box: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ResizeBox {
    pub fn of(element: &Element) -> Self {
        Self {
            x: element.position.x,
            y: element.position.y,
            width: element.width,
            height: element.height,
        }
    }

    fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Move the dragged handle to `pointer`, keeping the opposite side fixed.
///
/// The result is neither clamped nor normalized; dragging past the anchor
/// yields a negative extent.
pub fn resize(pointer: Point, handle: HandleKind, original: ResizeBox) -> ResizeBox {
    let ResizeBox {
        x,
        y,
        width: w,
        height: h,
    } = original;
    let (px, py) = (pointer.x, pointer.y);
    match handle {
        HandleKind::TopLeft | HandleKind::Start => ResizeBox {
            x: px,
            y: py,
            width: w + (x - px),
            height: h + (y - py),
        },
        HandleKind::TopRight => ResizeBox {
            x,
            y: py,
            width: px - x,
            height: h + (y - py),
        },
        HandleKind::BottomLeft => ResizeBox {
            x: px,
            y,
            width: w + (x - px),
            height: py - y,
        },
        HandleKind::BottomRight | HandleKind::End => ResizeBox {
            x,
            y,
            width: px - x,
            height: py - y,
        },
        HandleKind::Top => ResizeBox {
            y: py,
            height: h + (y - py),
            ..original
        },
        HandleKind::Right => ResizeBox {
            width: px - x,
            ..original
        },
        HandleKind::Bottom => ResizeBox {
            height: py - y,
            ..original
        },
        HandleKind::Left => ResizeBox {
            x: px,
            width: w + (x - px),
            ..original
        },
    }
}

/// Resized copy of `original` with `handle` dragged to `pointer`.
///
/// Line endpoints follow the new box; freehand samples are rescaled from
/// their original bounds.
pub fn apply_resize(original: &Element, handle: HandleKind, pointer: Point) -> Element {
    let mut result = original.clone();
    match original.kind() {
        ElementKind::Pencil => {
            if original.points.is_empty() {
                return result;
            }
            let old = points_bounds(&original.points);
            let new = resize(pointer, handle, ResizeBox::from_rect(old));
            let scale_x = axis_scale(new.width, old.width());
            let scale_y = axis_scale(new.height, old.height());
            let map = |p: Point| {
                Point::new(
                    new.x + (p.x - old.x0) * scale_x,
                    new.y + (p.y - old.y0) * scale_y,
                )
            };
            result.points = original.points.iter().map(|p| map(*p)).collect();
            result.position = map(original.position);
            result.width = original.width * scale_x;
            result.height = original.height * scale_y;
        }
        _ => {
            let new = resize(pointer, handle, ResizeBox::of(original));
            result.position = Point::new(new.x, new.y);
            result.set_extent_to(Point::new(new.x + new.width, new.y + new.height));
        }
    }
    result
}

fn axis_scale(new_extent: f64, old_extent: f64) -> f64 {
    // A flat stroke cannot be stretched along that axis
    if old_extent < f64::EPSILON {
        1.0
    } else {
        new_extent / old_extent
    }
}

/// Presentation hint for the pointer cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
    Crosshair,
}

impl CursorHint {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Move => "move",
            CursorHint::NwseResize => "nwse-resize",
            CursorHint::NeswResize => "nesw-resize",
            CursorHint::NsResize => "ns-resize",
            CursorHint::EwResize => "ew-resize",
            CursorHint::Crosshair => "crosshair",
        }
    }
}

/// Cursor for a pointer over `handle`, or over the element body when `None`.
pub fn cursor_for(handle: Option<HandleKind>) -> CursorHint {
    match handle {
        Some(
            HandleKind::TopLeft | HandleKind::BottomRight | HandleKind::Start | HandleKind::End,
        ) => CursorHint::NwseResize,
        Some(HandleKind::TopRight | HandleKind::BottomLeft) => CursorHint::NeswResize,
        Some(HandleKind::Top | HandleKind::Bottom) => CursorHint::NsResize,
        Some(HandleKind::Left | HandleKind::Right) => CursorHint::EwResize,
        None => CursorHint::Move,
    }
}
