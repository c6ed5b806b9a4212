//! Geometric classification of clicks and touches.
//!
//! Outside-click detection works on the last measured boxes rather than on
//! event bubbling, so it does not care which element received the event.

use crate::geometry::{Point, Rect};
use crate::target::TargetId;

/// What a pointer position landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// A target marker.
    Target(TargetId),
    /// The popover body.
    Popover,
    /// Inside the anchor container, but on neither a target nor the popover.
    Container,
    /// Anywhere outside the anchor container.
    Outside,
}

impl Hit {
    /// Whether the hit is outside the anchor-and-popover region.
    pub fn is_outside_engagement(&self) -> bool {
        matches!(self, Self::Container | Self::Outside)
    }
}

/// Last measured viewport boxes of the target map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGeometry {
    pub container: Option<Rect>,
    pub popover: Option<Rect>,
    pub anchors: Vec<(TargetId, Rect)>,
}

impl SceneGeometry {
    /// Classify a viewport point. The popover is checked first because it is
    /// drawn on top of the markers.
    pub fn hit_test(&self, point: Point) -> Hit {
        if self.popover.is_some_and(|rect| rect.contains(point)) {
            return Hit::Popover;
        }
        if let Some((id, _)) = self.anchors.iter().find(|(_, rect)| rect.contains(point)) {
            return Hit::Target(id.clone());
        }
        if self.container.is_some_and(|rect| rect.contains(point)) {
            Hit::Container
        } else {
            Hit::Outside
        }
    }

    /// Record an anchor box, replacing any earlier one for the same target.
    pub fn set_anchor(&mut self, id: TargetId, rect: Rect) {
        if let Some(entry) = self.anchors.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = rect;
        } else {
            self.anchors.push((id, rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneGeometry {
        let mut scene = SceneGeometry {
            container: Some(Rect::new(100.0, 100.0, 400.0, 300.0)),
            popover: Some(Rect::new(210.0, 148.0, 200.0, 100.0)),
            anchors: Vec::new(),
        };
        scene.set_anchor(TargetId::from("t1"), Rect::new(300.0, 260.0, 20.0, 20.0));
        scene
    }

    #[test]
    fn classifies_each_region() {
        let scene = scene();
        assert_eq!(scene.hit_test(Point::new(250.0, 200.0)), Hit::Popover);
        assert_eq!(
            scene.hit_test(Point::new(310.0, 270.0)),
            Hit::Target(TargetId::from("t1"))
        );
        assert_eq!(scene.hit_test(Point::new(120.0, 380.0)), Hit::Container);
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Hit::Outside);
    }

    #[test]
    fn empty_scene_is_outside() {
        assert_eq!(
            SceneGeometry::default().hit_test(Point::new(0.0, 0.0)),
            Hit::Outside
        );
    }

    #[test]
    fn set_anchor_replaces_existing() {
        let mut scene = scene();
        scene.set_anchor(TargetId::from("t1"), Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(scene.anchors.len(), 1);
        assert_eq!(
            scene.hit_test(Point::new(2.0, 2.0)),
            Hit::Target(TargetId::from("t1"))
        );
    }

    #[test]
    fn container_and_outside_are_outside_engagement() {
        assert!(Hit::Container.is_outside_engagement());
        assert!(Hit::Outside.is_outside_engagement());
        assert!(!Hit::Popover.is_outside_engagement());
        assert!(!Hit::Target(TargetId::from("t1")).is_outside_engagement());
    }
}
