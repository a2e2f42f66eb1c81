//! Swappable surface textures: a memoized loader keyed by variant name and a
//! switcher that cycles the first material's color map through the variants.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use futures::future::{join_all, FutureExt, LocalBoxFuture, Shared};
use thiserror::Error;

use crate::constants::ORIGINAL_VARIANT;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TextureError {
    #[error("unknown texture variant {0:?}")]
    UnknownVariant(String),
    #[error("loading {uri} failed: {reason}")]
    Load { uri: String, reason: String },
    #[error("no original texture was captured")]
    MissingOriginal,
    #[error("model has no material to texture")]
    NoMaterial,
}

/// One selectable color map. `uri == None` is the sentinel that means "whatever
/// the model shipped with".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureVariant {
    pub name: String,
    pub uri: Option<String>,
}

impl TextureVariant {
    pub fn original() -> Self {
        Self {
            name: ORIGINAL_VARIANT.to_string(),
            uri: None,
        }
    }

    pub fn new(name: &str, uri: &str) -> Self {
        Self {
            name: name.to_string(),
            uri: Some(uri.to_string()),
        }
    }

    pub fn is_original(&self) -> bool {
        self.uri.is_none()
    }
}

/// Parse `"beige=tex/beige.jpg, grey=tex/grey.jpg"`. The original sentinel is
/// always index 0; malformed and duplicate entries are skipped.
pub fn parse_variant_list(raw: &str) -> Vec<TextureVariant> {
    let mut out = vec![TextureVariant::original()];
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((name, uri)) = item.split_once('=') else {
            log::warn!("[texture] variant {:?} is not name=uri; skipped", item);
            continue;
        };
        let (name, uri) = (name.trim(), uri.trim());
        if name.is_empty() || uri.is_empty() || name == ORIGINAL_VARIANT {
            log::warn!("[texture] variant {:?} skipped", item);
            continue;
        }
        if out.iter().any(|v| v.name == name) {
            log::warn!("[texture] duplicate variant {:?} skipped", name);
            continue;
        }
        out.push(TextureVariant::new(name, uri));
    }
    out
}

/// Creates texture handles from URIs. Implemented over the host element's
/// texture factory in the browser.
pub trait TextureLoader {
    type Texture: Clone + 'static;

    fn load(&self, uri: &str) -> LocalBoxFuture<'static, Result<Self::Texture, TextureError>>;
}

/// The color-texture slot of the model's first material.
pub trait MaterialSurface {
    type Texture;

    fn color_texture(&self) -> Option<Self::Texture>;
    fn set_color_texture(&self, texture: &Self::Texture);
    fn request_render(&self);
}

type PendingLoad<T> = Shared<LocalBoxFuture<'static, Result<T, TextureError>>>;

enum Entry<T> {
    Pending(PendingLoad<T>),
    Ready(T),
}

/// Loaded textures keyed by variant name. Entries are never evicted; failed
/// loads are dropped so a later request retries.
pub struct TextureCache<L: TextureLoader> {
    loader: L,
    variants: Vec<TextureVariant>,
    entries: RefCell<HashMap<String, Entry<L::Texture>>>,
}

impl<L: TextureLoader> TextureCache<L> {
    pub fn new(loader: L, variants: Vec<TextureVariant>) -> Self {
        Self {
            loader,
            variants,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn variants(&self) -> &[TextureVariant] {
        &self.variants
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn is_ready(&self, name: &str) -> bool {
        matches!(self.entries.borrow().get(name), Some(Entry::Ready(_)))
    }

    fn uri_for(&self, name: &str) -> Result<&str, TextureError> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .and_then(|v| v.uri.as_deref())
            .ok_or_else(|| TextureError::UnknownVariant(name.to_string()))
    }

    /// Cached handle for `name`, loading it on first use. Concurrent callers
    /// share one in-flight load.
    pub async fn get(&self, name: &str) -> Result<L::Texture, TextureError> {
        let pending = {
            let mut entries = self.entries.borrow_mut();
            match entries.get(name) {
                Some(Entry::Ready(tex)) => return Ok(tex.clone()),
                Some(Entry::Pending(p)) => p.clone(),
                None => {
                    let uri = self.uri_for(name)?;
                    log::debug!("[texture] loading {} from {}", name, uri);
                    let load = self.loader.load(uri).shared();
                    entries.insert(name.to_string(), Entry::Pending(load.clone()));
                    load
                }
            }
        };

        let result = pending.clone().await;

        let mut entries = self.entries.borrow_mut();
        let still_ours = matches!(entries.get(name), Some(Entry::Pending(p)) if p.ptr_eq(&pending));
        if still_ours {
            match &result {
                Ok(tex) => {
                    entries.insert(name.to_string(), Entry::Ready(tex.clone()));
                }
                Err(e) => {
                    log::warn!("[texture] {} failed: {}", name, e);
                    entries.remove(name);
                }
            }
        }
        result
    }

    /// Start every non-original load. Failures are logged and never block the rest.
    /// Returns how many variants are ready afterwards.
    pub async fn preload_all(&self) -> usize {
        let names: Vec<&str> = self
            .variants
            .iter()
            .filter(|v| !v.is_original())
            .map(|v| v.name.as_str())
            .collect();
        let results = join_all(names.iter().map(|n| self.get(n))).await;
        let ok = results.iter().filter(|r| r.is_ok()).count();
        log::info!("[texture] preloaded {}/{} variants", ok, names.len());
        ok
    }
}

/// Clears the switch-in-flight flag even when the switch future is dropped.
struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Selection state over a `TextureCache`.
pub struct TextureSwitcher<L: TextureLoader> {
    cache: TextureCache<L>,
    original: RefCell<Option<L::Texture>>,
    index: Cell<usize>,
    busy: Cell<bool>,
}

impl<L: TextureLoader> TextureSwitcher<L> {
    pub fn new(cache: TextureCache<L>) -> Self {
        Self {
            cache,
            original: RefCell::new(None),
            index: Cell::new(0),
            busy: Cell::new(false),
        }
    }

    pub fn cache(&self) -> &TextureCache<L> {
        &self.cache
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn current(&self) -> Option<&TextureVariant> {
        self.cache.variants().get(self.index.get())
    }

    pub fn original(&self) -> Option<L::Texture> {
        self.original.borrow().clone()
    }

    /// Remember the texture the model shipped with. Only the first successful
    /// capture counts.
    pub fn capture_original<S>(&self, surface: &S) -> bool
    where
        S: MaterialSurface<Texture = L::Texture>,
    {
        if self.original.borrow().is_some() {
            return true;
        }
        match surface.color_texture() {
            Some(tex) => {
                *self.original.borrow_mut() = Some(tex);
                true
            }
            None => {
                log::warn!("[texture] material has no color texture to keep as original");
                false
            }
        }
    }

    /// Put `variant` on the surface and request a render.
    pub async fn apply_variant<S>(
        &self,
        surface: &S,
        variant: &TextureVariant,
    ) -> Result<(), TextureError>
    where
        S: MaterialSurface<Texture = L::Texture>,
    {
        let tex = if variant.is_original() {
            self.original().ok_or(TextureError::MissingOriginal)?
        } else {
            self.cache.get(&variant.name).await?
        };
        surface.set_color_texture(&tex);
        surface.request_render();
        Ok(())
    }

    /// Apply variant `index`; the selection only moves when that succeeds.
    /// Returns `Ok(None)` when another switch is still loading.
    pub async fn select<S>(
        &self,
        surface: &S,
        index: usize,
    ) -> Result<Option<TextureVariant>, TextureError>
    where
        S: MaterialSurface<Texture = L::Texture>,
    {
        let Some(variant) = self.cache.variants().get(index).cloned() else {
            return Err(TextureError::UnknownVariant(format!("#{}", index)));
        };
        if self.busy.replace(true) {
            log::debug!("[texture] switch in flight; ignoring {}", variant.name);
            return Ok(None);
        }
        let result = {
            let _busy = BusyGuard(&self.busy);
            self.apply_variant(surface, &variant).await
        };
        match result {
            Ok(()) => {
                self.index.set(index);
                log::info!("[texture] now showing {}", variant.name);
                Ok(Some(variant))
            }
            Err(e) => {
                log::warn!(
                    "[texture] {} failed ({}); staying on #{}",
                    variant.name,
                    e,
                    self.index.get()
                );
                Err(e)
            }
        }
    }

    /// Advance to the next variant, wrapping back to the original.
    pub async fn cycle<S>(&self, surface: &S) -> Result<Option<TextureVariant>, TextureError>
    where
        S: MaterialSurface<Texture = L::Texture>,
    {
        let len = self.cache.variants().len().max(1);
        let next = (self.index.get() + 1) % len;
        self.select(surface, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_list_starts_with_original() {
        let v = parse_variant_list(" beige=a.jpg, grey = b.jpg ,bad, beige=c.jpg, original=x.jpg");
        let names: Vec<_> = v.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["original", "beige", "grey"]);
        assert!(v[0].is_original());
        assert_eq!(v[2].uri.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn empty_list_is_just_original() {
        assert_eq!(parse_variant_list(""), vec![TextureVariant::original()]);
    }
}
