//! Class-decoder registry: annotation source text → registered decoder.
//!
//! The registry maps class paths (`mymod.Vec3`) to decoders and memoizes
//! annotation-source lookups, since the same annotation tends to repeat
//! throughout a document. It is `Send + Sync` and meant to be shared
//! across parsers behind an `Arc`.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::OwnedValue;

/// How a registered class decodes its value.
pub enum ClassDecoder {
    /// The type decodes itself from the parsed value as-is.
    Inline(Box<dyn Fn(OwnedValue) -> Result<OwnedValue, String> + Send + Sync>),
    /// Enum-style: the scalar value is the variant's name or discriminant.
    Enum(Box<dyn Fn(OwnedValue) -> Result<OwnedValue, String> + Send + Sync>),
    /// Dataclass-style: object pairs become keyword arguments.
    Dataclass(Box<dyn Fn(Vec<(String, OwnedValue)>) -> Result<OwnedValue, String> + Send + Sync>),
}

/// Thread-safe decoder registry with a memoized lookup cache.
#[derive(Default)]
pub struct ClassRegistry {
    /// Registered decoders, keyed by whitespace-normalized class path.
    entries: RwLock<FxHashMap<String, Arc<ClassDecoder>>>,
    /// Memoized annotation-source → decoder resolutions (misses included).
    cache: RwLock<FxHashMap<String, Option<Arc<ClassDecoder>>>>,
}

/// Strip all whitespace so `list<f32, 8>` and `list< f32 , 8 >` share a key.
fn normalize(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

impl ClassRegistry {
    pub fn new() -> Self {
        ClassRegistry::default()
    }

    /// Register a decoder under a class path. Replaces any previous
    /// registration and invalidates the lookup cache.
    pub fn register(&self, class_path: &str, decoder: ClassDecoder) {
        self.entries
            .write()
            .insert(normalize(class_path), Arc::new(decoder));
        self.cache.write().clear();
    }

    /// Resolve an annotation's source text to a registered decoder.
    pub fn resolve(&self, annotation_source: &str) -> Option<Arc<ClassDecoder>> {
        if let Some(hit) = self.cache.read().get(annotation_source) {
            return hit.clone();
        }
        let resolved = self
            .entries
            .read()
            .get(&normalize(annotation_source))
            .cloned();
        self.cache
            .write()
            .insert(annotation_source.to_string(), resolved.clone());
        resolved
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
