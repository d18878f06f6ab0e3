#![forbid(unsafe_code)]

//! Host integration: find the target element and start scrambling it.

use std::collections::HashMap;

use glyphflip_core::clock::Clock;
use rand::Rng;

use crate::config::ScrambleConfig;
use crate::driver::ScrambleRuntime;
use crate::surface::ScrambleSurface;

/// Environment that owns the elements a surface can be attached to.
pub trait Host {
    /// Take the source text of element `id` and clear the element's
    /// displayed content. Returns `None` if no such element exists.
    ///
    /// The element's designated text wins over its displayed text.
    fn take_source(&mut self, id: &str) -> Option<String>;
}

/// A displayable element known to an [`ElementRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Designated source text, preferred when present.
    pub data_text: Option<String>,
    /// Raw displayed text.
    pub text_content: String,
}

impl Element {
    /// An element displaying `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            data_text: None,
            text_content: text.into(),
        }
    }

    /// Set the designated source text (builder).
    #[must_use]
    pub fn data_text(mut self, text: impl Into<String>) -> Self {
        self.data_text = Some(text.into());
        self
    }
}

/// In-memory [`Host`] keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<String, Element>,
}

impl ElementRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) element `id`.
    pub fn insert(&mut self, id: impl Into<String>, element: Element) -> &mut Self {
        self.elements.insert(id.into(), element);
        self
    }

    /// Look up element `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }
}

impl Host for ElementRegistry {
    fn take_source(&mut self, id: &str) -> Option<String> {
        let element = self.elements.get_mut(id)?;
        let displayed = std::mem::take(&mut element.text_content);
        Some(element.data_text.clone().unwrap_or(displayed))
    }
}

/// Segment element `id` of `host` and wire it for scrambling.
///
/// A missing element is not an error: nothing happens and `None` comes back.
pub fn attach<H, C, R>(
    host: &mut H,
    id: &str,
    config: ScrambleConfig,
    clock: C,
    rng: R,
) -> Option<ScrambleRuntime<C, R>>
where
    H: Host + ?Sized,
    C: Clock,
    R: Rng,
{
    let Some(source) = host.take_source(id) else {
        tracing::debug!(element = id, "scramble target not found; skipping");
        return None;
    };
    let surface = ScrambleSurface::from_text(&source, config);
    tracing::debug!(
        element = id,
        cells = surface.len(),
        duration_ms = config.duration_ms,
        tick_ms = config.tick_ms,
        restore_on_leave = config.restore_on_leave,
        "scramble surface attached"
    );
    Some(ScrambleRuntime::new(surface, clock, rng))
}
