//! Render-cycle host: re-attaches gesture handlers on every render.

use crate::props::GestureProps;
use gestura_core::{Attachment, Element, GestureConfig, GestureEngine};

/// Wraps an element and attaches gesture handlers from each render's props.
///
/// Every [`GestureHost::render`] starts a new attachment cycle: the previous
/// cycle's listeners and sessions are torn down and a fresh consumed-event
/// set is used.
#[derive(Debug)]
pub struct GestureHost {
    element: Element,
    engine: GestureEngine,
    attachment: Option<Attachment>,
    renders: u64,
}

impl GestureHost {
    /// Host `element` with `engine`.
    pub fn new(element: Element, engine: GestureEngine) -> Self {
        Self {
            element,
            engine,
            attachment: None,
            renders: 0,
        }
    }

    /// Host a fresh element with an engine built from `config`.
    pub fn with_config(config: GestureConfig) -> Self {
        Self::new(Element::new(), GestureEngine::new(config))
    }

    /// Attach the gesture callbacks in `props` and return the passthrough
    /// props for the wrapped component.
    ///
    /// The previous cycle is always torn down, even when some callbacks are
    /// skipped for naming an unknown phase.
    pub fn render<P>(&mut self, props: GestureProps<P>) -> GestureProps<P> {
        let (registry, passthrough) = props.split();
        if let Some(mut previous) = self.attachment.take() {
            previous.detach();
        }
        self.attachment = Some(self.engine.attach(&self.element, &registry));
        self.renders += 1;
        tracing::debug!(render = self.renders, gestures = registry.len(), "gesture host rendered");
        passthrough
    }

    /// Tear down the current cycle.
    pub fn unmount(&mut self) {
        if let Some(mut attachment) = self.attachment.take() {
            attachment.detach();
            tracing::debug!(render = self.renders, "gesture host unmounted");
        }
    }

    /// Hosted element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Engine driving recognition.
    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Current attachment cycle, if rendered.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Number of successful renders.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}
