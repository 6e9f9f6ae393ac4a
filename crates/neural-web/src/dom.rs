//! Browser wiring: element lookup, input listeners and the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use neural_field::{FieldConfig, InputEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent,
    TouchEvent, Window,
};

use crate::canvas::CanvasSurface;
use crate::error::MountError;
use crate::frame::FrameLoop;
use crate::runner::FieldRunner;

type SharedRunner = Rc<RefCell<FieldRunner<CanvasSurface>>>;

/// A DOM listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, MountError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| MountError::Listener {
                kind,
                message: format!("{:?}", e),
            })?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Everything a mounted canvas owns.
///
/// Dropping it without `stop` also tears the effect down: the pending frame
/// is cancelled and every listener unregisters. The simulation itself is
/// only marked stopped by `stop`.
pub struct Mounted {
    runner: SharedRunner,
    frame: Rc<FrameLoop<Window>>,
    listeners: Vec<Listener>,
}

impl Mounted {
    /// Cancel the frame loop, remove listeners and stop the simulation.
    pub fn stop(self) {
        self.frame.cancel();
        self.runner.borrow_mut().stop();
        drop(self.listeners);
        log::info!("neural canvas unmounted");
    }

    pub fn is_running(&self) -> bool {
        self.runner.borrow().is_running()
    }

    pub fn particle_count(&self) -> u32 {
        self.runner.borrow().particle_count()
    }

    pub fn connection_count(&self) -> u32 {
        self.runner.borrow().connection_count()
    }
}

/// Find the canvas and its container, install listeners and start the loop.
pub fn mount(
    canvas_id: &str,
    container_id: &str,
    config: FieldConfig,
    seed: u64,
) -> Result<Mounted, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| MountError::MissingElement(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::WrongElementType {
            id: canvas_id.to_string(),
            expected: "canvas",
        })?;
    let container: HtmlElement = document
        .get_element_by_id(container_id)
        .ok_or_else(|| MountError::MissingElement(container_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::WrongElementType {
            id: container_id.to_string(),
            expected: "html element",
        })?;

    let surface = CanvasSurface::new(canvas)?;
    let runner: SharedRunner = Rc::new(RefCell::new(FieldRunner::new(config, seed, surface)));

    push(&runner, container_size(&container));
    let listeners = install_listeners(&window, &container, &runner)?;
    let ticking = runner.clone();
    let frame = FrameLoop::start(window, move |now_ms| ticking.borrow_mut().tick(now_ms))?;

    Ok(Mounted {
        runner,
        frame,
        listeners,
    })
}

fn install_listeners(
    window: &Window,
    container: &HtmlElement,
    runner: &SharedRunner,
) -> Result<Vec<Listener>, MountError> {
    let mut listeners = Vec::with_capacity(5);
    let target: &EventTarget = container.as_ref();

    {
        let (runner, container) = (runner.clone(), container.clone());
        listeners.push(Listener::attach(target, "mousemove", true, move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let rect = container.get_bounding_client_rect();
                push(
                    &runner,
                    InputEvent::PointerMove {
                        x: (mouse.client_x() as f64 - rect.left()) as f32,
                        y: (mouse.client_y() as f64 - rect.top()) as f32,
                    },
                );
            }
        })?);
    }

    {
        let (runner, container) = (runner.clone(), container.clone());
        listeners.push(Listener::attach(target, "touchmove", true, move |event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|t| t.touches().get(0))
            else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            push(
                &runner,
                InputEvent::PointerMove {
                    x: (touch.client_x() as f64 - rect.left()) as f32,
                    y: (touch.client_y() as f64 - rect.top()) as f32,
                },
            );
        })?);
    }

    for kind in ["mouseleave", "touchend"] {
        let runner = runner.clone();
        listeners.push(Listener::attach(target, kind, true, move |_| {
            push(&runner, InputEvent::PointerLeave);
        })?);
    }

    {
        let (runner, container) = (runner.clone(), container.clone());
        listeners.push(Listener::attach(window.as_ref(), "resize", true, move |_| {
            push(&runner, container_size(&container));
        })?);
    }

    Ok(listeners)
}

fn push(runner: &SharedRunner, event: InputEvent) {
    // Listeners never fire inside a frame; a busy runner means re-entrancy
    // from the host, and the event is dropped.
    if let Ok(mut runner) = runner.try_borrow_mut() {
        runner.push_input(event);
    }
}

fn container_size(container: &HtmlElement) -> InputEvent {
    InputEvent::Resize {
        width: container.offset_width().max(0) as u32,
        height: container.offset_height().max(0) as u32,
    }
}
