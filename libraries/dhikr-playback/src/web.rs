//! Browser media resource backed by an `HTMLAudioElement`
//!
//! Listeners are registered once at construction and push tagged notices into
//! a shared queue. The `play()` promise is resolved on the local executor and
//! reported as `PlayStarted` / `PlayRejected` with the load tag that was
//! current when the request was made.

use crate::error::{PlaybackError, Result};
use crate::media::{LoadId, MediaErrorReason, MediaEvent, MediaNotice, MediaResource, PlayId};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlAudioElement};

type Listener = Closure<dyn FnMut(Event)>;

#[derive(Default)]
struct Shared {
    load: Option<LoadId>,
    queued: Vec<MediaNotice>,
    released: bool,
}

impl Shared {
    fn push(&mut self, load: Option<LoadId>, event: MediaEvent) {
        if self.released {
            return;
        }
        if let Some(load) = load {
            self.queued.push(MediaNotice::new(load, event));
        }
    }
}

/// Media resource wrapping one `HTMLAudioElement`
pub struct HtmlAudioResource {
    element: HtmlAudioElement,
    shared: Rc<RefCell<Shared>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioResource {
    /// Create a detached audio element and attach listeners
    pub fn new() -> Result<Self> {
        let element = HtmlAudioElement::new()
            .map_err(|e| PlaybackError::Backend(format!("failed to create audio element: {e:?}")))?;
        element.set_preload("auto");

        let mut resource = Self {
            element,
            shared: Rc::new(RefCell::new(Shared::default())),
            listeners: Vec::new(),
        };

        resource.listen("loadedmetadata", |element| MediaEvent::Ready {
            duration: element.duration(),
        })?;
        resource.listen("canplay", |_| MediaEvent::CanPlay)?;
        resource.listen("timeupdate", |element| MediaEvent::TimeUpdate {
            position: element.current_time(),
        })?;
        resource.listen("ended", |_| MediaEvent::Ended)?;
        resource.listen("error", |element| MediaEvent::Error {
            reason: element
                .error()
                .map_or(MediaErrorReason::Unknown, |e| MediaErrorReason::from_code(e.code())),
        })?;

        Ok(resource)
    }

    fn listen<F>(&mut self, name: &'static str, to_event: F) -> Result<()>
    where
        F: Fn(&HtmlAudioElement) -> MediaEvent + 'static,
    {
        let element = self.element.clone();
        let shared = Rc::clone(&self.shared);
        let listener: Listener = Closure::wrap(Box::new(move |_event: Event| {
            let mut shared = shared.borrow_mut();
            let load = shared.load;
            shared.push(load, to_event(&element));
        }) as Box<dyn FnMut(Event)>);

        self.element
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            .map_err(|e| PlaybackError::Backend(format!("failed to attach {name}: {e:?}")))?;
        self.listeners.push((name, listener));
        Ok(())
    }
}

impl MediaResource for HtmlAudioResource {
    fn load(&mut self, url: &str, load: LoadId) {
        debug!(%load, url, "assigning audio source");
        self.shared.borrow_mut().load = Some(load);
        self.element.set_src(url);
        self.element.load();
    }

    fn play(&mut self, play: PlayId) {
        let load = self.shared.borrow().load;
        match self.element.play() {
            Ok(promise) => {
                let shared = Rc::clone(&self.shared);
                spawn_local(async move {
                    let event = settle_play(promise, play).await;
                    shared.borrow_mut().push(load, event);
                });
            }
            Err(e) => {
                warn!(%play, error = ?e, "play threw synchronously");
                self.shared
                    .borrow_mut()
                    .push(load, MediaEvent::PlayRejected { play });
            }
        }
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn seek(&mut self, seconds: f64) {
        if self.duration().is_some() {
            self.element.set_current_time(seconds);
        }
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level.clamp(0.0, 1.0));
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn drain_notices(&mut self) -> Vec<MediaNotice> {
        std::mem::take(&mut self.shared.borrow_mut().queued)
    }

    fn release(&mut self) {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.released {
                return;
            }
            shared.released = true;
            shared.load = None;
            shared.queued.clear();
        }

        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }

        let _ = self.element.pause();
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }
}

async fn settle_play(promise: js_sys::Promise, play: PlayId) -> MediaEvent {
    match JsFuture::from(promise).await {
        Ok(_) => MediaEvent::PlayStarted { play },
        Err(e) => {
            debug!(%play, error = ?e, "play request rejected");
            MediaEvent::PlayRejected { play }
        }
    }
}

impl Drop for HtmlAudioResource {
    fn drop(&mut self) {
        self.release();
    }
}
