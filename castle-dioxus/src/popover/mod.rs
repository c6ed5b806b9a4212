//! Event router between the DOM and the popover state machine.
//!
//! [`PopoverController`] owns the machine and the paint model in signals.
//! Components call [`PopoverController::dispatch`] with an input event; the
//! controller runs the transition and performs the returned effects: painting,
//! placing, hiding, and arming or cancelling the single grace timer.
//!
//! Placement runs after the render that shows the new content has been
//! applied, so the popover can be measured with its final rows and icons.

pub mod dom;

use std::rc::Rc;
use std::sync::Arc;

use castle_core::placement::PlacementInput;
use castle_core::popover::{GraceTimer, SceneGeometry};
use castle_core::render::IconMaterializer;
use castle_core::{Effect, Hit, InputEvent, OpenMode, Point, PopoverMachine, PopoverView};
use castle_core::{TargetId, TargetSet};
use dioxus::core::Task;
use dioxus::prelude::*;

pub use dom::{LucideIcons, WindowScroll};

/// A pending request to place the popover next to `target`.
///
/// The generation distinguishes repeated requests for the same target, and
/// lets an in-flight placement notice it was superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRequest {
    pub target: TargetId,
    pub generation: u64,
}

/// Mounted elements of the target map.
#[derive(Default)]
struct MapElements {
    container: Option<Rc<MountedData>>,
    popover: Option<Rc<MountedData>>,
    anchors: Vec<(TargetId, Rc<MountedData>)>,
}

impl MapElements {
    fn anchor(&self, id: &TargetId) -> Option<Rc<MountedData>> {
        self.anchors
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, element)| element.clone())
    }
}

/// Handle to the popover machinery, shared through context.
#[derive(Clone, Copy)]
pub struct PopoverController {
    machine: Signal<PopoverMachine>,
    view: Signal<PopoverView>,
    targets: Signal<Arc<TargetSet>>,
    elements: Signal<MapElements>,
    timer: Signal<Option<Task>>,
    placement: Signal<Option<PlaceRequest>>,
}

/// Create the popover controller and provide it to descendants.
pub fn use_popover_provider(targets: Arc<TargetSet>) -> PopoverController {
    let machine = use_signal(PopoverMachine::new);
    let view = use_signal(PopoverView::default);
    let targets = use_signal(move || targets);
    let elements = use_signal(MapElements::default);
    let timer = use_signal(|| None);
    let placement = use_signal(|| None);

    use_context_provider(|| PopoverController {
        machine,
        view,
        targets,
        elements,
        timer,
        placement,
    })
}

impl PopoverController {
    /// Feed one input event through the machine and apply its effects.
    pub fn dispatch(mut self, event: InputEvent) {
        log::trace!("Popover event: {event:?}");
        let effects = self.machine.write().handle(event);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(mut self, effect: Effect) {
        match effect {
            Effect::Render(id) => {
                let targets = self.targets.peek().clone();
                match targets.get(&id) {
                    Some(target) => self.view.write().render(target),
                    None => log::warn!("Cannot render unknown target {id}"),
                }
            }
            Effect::Place(target) => self.request_placement(target),
            Effect::Hide => self.view.write().hide(),
            Effect::StartTimer(timer) => self.start_timer(timer),
            Effect::CancelTimer(id) => {
                log::trace!("Cancelling {id}");
                self.cancel_timer();
            }
        }
    }

    fn request_placement(mut self, target: TargetId) {
        let generation = self
            .placement
            .peek()
            .as_ref()
            .map_or(0, |request| request.generation + 1);
        self.placement.set(Some(PlaceRequest { target, generation }));
    }

    fn start_timer(mut self, timer: GraceTimer) {
        self.cancel_timer();
        let mut controller = self;
        let task = spawn(async move {
            tokio::time::sleep(timer.delay).await;
            controller.timer.write().take();
            controller.dispatch(InputEvent::GraceExpired(timer.id));
        });
        self.timer.set(Some(task));
    }

    fn cancel_timer(mut self) {
        let pending = self.timer.write().take();
        if let Some(task) = pending {
            task.cancel();
        }
    }

    /// Current paint model. Subscribes the calling component.
    pub fn view(&self) -> PopoverView {
        self.view.read().clone()
    }

    /// Latest placement request. Subscribes the calling component.
    pub fn placement_request(&self) -> Option<PlaceRequest> {
        self.placement.read().clone()
    }

    pub fn mode(&self) -> OpenMode {
        self.machine.peek().mode()
    }

    pub fn set_container(mut self, element: Rc<MountedData>) {
        self.elements.write().container = Some(element);
    }

    pub fn set_popover(mut self, element: Rc<MountedData>) {
        self.elements.write().popover = Some(element);
    }

    pub fn set_anchor(mut self, id: TargetId, element: Rc<MountedData>) {
        let mut elements = self.elements.write();
        if let Some(entry) = elements.anchors.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = element;
        } else {
            elements.anchors.push((id, element));
        }
    }

    /// Classify a viewport point against freshly measured map boxes.
    pub async fn classify(self, point: Point) -> Hit {
        let (container, popover, anchors) = {
            let elements = self.elements.peek();
            let popover = if self.view.peek().is_hidden() {
                None
            } else {
                elements.popover.clone()
            };
            (elements.container.clone(), popover, elements.anchors.clone())
        };

        let mut scene = SceneGeometry::default();
        if let Some(container) = container {
            scene.container = dom::measure(&container).await;
        }
        if let Some(popover) = popover {
            scene.popover = dom::measure(&popover).await;
        }
        for (id, anchor) in anchors {
            if let Some(rect) = dom::measure(&anchor).await {
                scene.set_anchor(id, rect);
            }
        }
        scene.hit_test(point)
    }

    /// Measure the map and place the popover for `request`, then scroll the
    /// popover and its anchor into view.
    ///
    /// Gives up quietly when a newer request arrived or the popover closed
    /// while measuring.
    pub async fn place(self, request: PlaceRequest) {
        LucideIcons.materialize();

        let (container, anchor, popover) = {
            let elements = self.elements.peek();
            (
                elements.container.clone(),
                elements.anchor(&request.target),
                elements.popover.clone(),
            )
        };
        let (Some(container), Some(anchor), Some(popover)) = (container, anchor, popover) else {
            log::debug!("Map elements not mounted, skipping placement of {}", request.target);
            return;
        };

        let (Some(container), Some(anchor), Some(popover), Some(viewport)) = (
            dom::measure(&container).await,
            dom::measure(&anchor).await,
            dom::measure(&popover).await,
            dom::viewport_size().await,
        ) else {
            log::warn!("Could not measure the map, popover for {} stays unplaced", request.target);
            return;
        };

        if self.is_stale(&request) {
            log::trace!("Dropping stale placement #{}", request.generation);
            return;
        }

        let input = PlacementInput::new(container, anchor, popover.size());
        let mut view = self.view;
        let layout = view.write().layout(&input, viewport);
        log::debug!(
            "Placed popover for {} on {} at ({}, {})",
            request.target,
            layout.placement.side,
            layout.placement.left,
            layout.placement.top
        );
        layout.scroll.request(&WindowScroll);
    }

    fn is_stale(&self, request: &PlaceRequest) -> bool {
        self.placement.peek().as_ref() != Some(request)
            || self.machine.peek().open_for() != Some(&request.target)
    }
}
