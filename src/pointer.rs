//! Geometry behind the pointer-reactive effects: cursor trailer, card glow
//! and parallax. All of it is recomputed from scratch on every pointer move.

/// Distance from a card edge within which its border still glows.
pub const GLOW_MARGIN: f64 = 80.0;
pub const DEFAULT_DEPTH: f64 = 10.0;
pub const TRAILER_SCALE_ACTIVE: f64 = 3.0;
pub const TRAILER_ANIMATION_MS: f64 = 800.0;

/// Axis-aligned box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Euclidean distance to the nearest point of the box; zero inside.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = (self.left - x).max(x - self.right()).max(0.0);
        let dy = (self.top - y).max(y - self.bottom()).max(0.0);
        dx.hypot(dy)
    }
}

/// What the trailer shows when it hovers an interactable element.
///
/// Parsed from the element's `data-type`; unknown values are `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerKind {
    Video,
    Default,
}

impl TrailerKind {
    pub fn from_attr(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("video") => TrailerKind::Video,
            _ => TrailerKind::Default,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            TrailerKind::Video => "fa-solid fa-play",
            TrailerKind::Default => "ri-arrow-right-up-line",
        }
    }
}

/// Trailer placement: centered on the pointer, enlarged over interactables.
pub fn trailer_transform(pointer: (f64, f64), size: (f64, f64), interacting: bool) -> String {
    let x = pointer.0 - size.0 / 2.0;
    let y = pointer.1 - size.1 / 2.0;
    let scale = if interacting { TRAILER_SCALE_ACTIVE } else { 1.0 };
    format!("translate({x}px, {y}px) scale({scale})")
}

/// Glow variables for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Pointer position relative to the card's top-left corner.
    pub local: (f64, f64),
    pub inner: f64,
    pub border: f64,
}

/// Full glow inside the card, linear border falloff across
/// [`GLOW_MARGIN`] outside it, nothing beyond.
pub fn card_glow(card: Rect, pointer: (f64, f64)) -> Glow {
    let (x, y) = pointer;
    let local = (x - card.left, y - card.top);
    if card.contains(x, y) {
        return Glow {
            local,
            inner: 1.0,
            border: 1.0,
        };
    }
    let distance = card.distance_to(x, y);
    let border = if distance < GLOW_MARGIN {
        1.0 - distance / GLOW_MARGIN
    } else {
        0.0
    };
    Glow {
        local,
        inner: 0.0,
        border,
    }
}

/// `data-depth` value; missing, zero or unparsable falls back to
/// [`DEFAULT_DEPTH`].
pub fn parse_depth(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d != 0.0)
        .unwrap_or(DEFAULT_DEPTH)
}

/// Offset of a floating item, opposite to the pointer's offset from the
/// container center and scaled by depth.
pub fn parallax_offset(container: Rect, pointer: (f64, f64), depth: f64) -> (f64, f64) {
    if container.width <= 0.0 || container.height <= 0.0 {
        return (0.0, 0.0);
    }
    let (cx, cy) = container.center();
    let dx = pointer.0 - cx;
    let dy = pointer.1 - cy;
    (-dx / container.width * depth, -dy / container.height * depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailer_kinds() {
        assert_eq!(TrailerKind::from_attr(Some("video")), TrailerKind::Video);
        assert_eq!(TrailerKind::from_attr(Some("link")), TrailerKind::Default);
        assert_eq!(TrailerKind::from_attr(None), TrailerKind::Default);
        assert_eq!(TrailerKind::Video.icon_class(), "fa-solid fa-play");
    }

    #[test]
    fn trailer_is_centered() {
        assert_eq!(
            trailer_transform((100.0, 50.0), (20.0, 20.0), false),
            "translate(90px, 40px) scale(1)"
        );
        assert_eq!(
            trailer_transform((100.0, 50.0), (20.0, 20.0), true),
            "translate(90px, 40px) scale(3)"
        );
    }

    #[test]
    fn glow_inside_edge_and_far() {
        let card = Rect::new(100.0, 100.0, 200.0, 100.0);

        let inside = card_glow(card, (150.0, 120.0));
        assert_eq!((inside.inner, inside.border), (1.0, 1.0));
        assert_eq!(inside.local, (50.0, 20.0));

        // on the edge still counts as inside
        assert_eq!(card_glow(card, (300.0, 200.0)).inner, 1.0);

        let near = card_glow(card, (340.0, 150.0));
        assert_eq!(near.inner, 0.0);
        assert!((near.border - 0.5).abs() < 1e-12);

        // diagonal uses the distance to the corner
        let corner = card_glow(card, (330.0, 240.0));
        assert!((corner.border - (1.0 - 50.0 / 80.0)).abs() < 1e-12);

        let far = card_glow(card, (500.0, 150.0));
        assert_eq!((far.inner, far.border), (0.0, 0.0));
        assert_eq!(card_glow(card, (380.0, 150.0)).border, 0.0);
    }

    #[test]
    fn depth_parsing() {
        assert_eq!(parse_depth(Some("25")), 25.0);
        assert_eq!(parse_depth(Some("-4.5")), -4.5);
        assert_eq!(parse_depth(Some("0")), DEFAULT_DEPTH);
        assert_eq!(parse_depth(Some("deep")), DEFAULT_DEPTH);
        assert_eq!(parse_depth(None), DEFAULT_DEPTH);
    }

    #[test]
    fn parallax_moves_against_pointer() {
        let container = Rect::new(0.0, 0.0, 400.0, 200.0);
        assert_eq!(parallax_offset(container, (200.0, 100.0), 10.0), (0.0, 0.0));
        let (x, y) = parallax_offset(container, (400.0, 0.0), 10.0);
        assert!((x + 5.0).abs() < 1e-12);
        assert!((y - 5.0).abs() < 1e-12);
        assert_eq!(
            parallax_offset(Rect::new(0.0, 0.0, 0.0, 0.0), (5.0, 5.0), 10.0),
            (0.0, 0.0)
        );
    }
}
