//! Size-bounded memoisation of generated text.
//!
//! The cache is owned by the caller and handed to whatever needs it; there
//! is no process-wide state. Entries are keyed by the whole prompt (text and
//! temperature) and evicted least recently used first.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use super::client::{Generator, PressError, Prompt};

/// Default number of completions kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    temperature_bits: u32,
}

impl From<&Prompt> for CacheKey {
    fn from(prompt: &Prompt) -> Self {
        CacheKey {
            text: prompt.text.clone(),
            temperature_bits: prompt.temperature.to_bits(),
        }
    }
}

/// Least-recently-used cache of completions.
#[derive(Debug)]
pub struct PromptCache {
    capacity: usize,
    entries: HashMap<CacheKey, String>,
    /// Keys from least to most recently used.
    recency: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl Default for PromptCache {
    fn default() -> Self {
        PromptCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PromptCache {
    /// Creates a cache holding at most `capacity` completions. A capacity of
    /// zero disables caching.
    pub fn new(capacity: usize) -> Self {
        PromptCache {
            capacity,
            entries: HashMap::with_capacity(capacity.min(1024)),
            recency: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Returns the cached completion for `prompt`, marking it recently used.
    pub fn get(&mut self, prompt: &Prompt) -> Option<&str> {
        let key = CacheKey::from(prompt);
        if !self.entries.contains_key(&key) {
            return None;
        }
        self.touch(&key);
        self.entries.get(&key).map(String::as_str)
    }

    /// Stores a completion, evicting the least recently used entry when full.
    pub fn insert(&mut self, prompt: &Prompt, completion: String) {
        if self.capacity == 0 {
            return;
        }
        let key = CacheKey::from(prompt);
        if self.entries.insert(key.clone(), completion).is_some() {
            self.touch(&key);
            return;
        }
        self.recency.push_back(key);
        while self.entries.len() > self.capacity {
            match self.recency.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Returns the cached completion or asks `generator` for one.
    ///
    /// Failed generations are not cached, so a retry reaches the generator.
    pub fn get_or_generate<G: Generator + ?Sized>(
        &mut self,
        generator: &mut G,
        prompt: &Prompt,
    ) -> Result<String, PressError> {
        if let Some(hit) = self.get(prompt) {
            let hit = hit.to_string();
            self.hits += 1;
            debug!(chars = prompt.text.len(), "prompt cache hit");
            return Ok(hit);
        }
        self.misses += 1;
        let completion = generator.generate(prompt)?;
        self.insert(prompt, completion.clone());
        Ok(completion)
    }

    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            if let Some(k) = self.recency.remove(pos) {
                self.recency.push_back(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes prompts back and counts calls.
    struct Echo {
        calls: usize,
        fail: bool,
    }

    impl Generator for Echo {
        fn generate(&mut self, prompt: &Prompt) -> Result<String, PressError> {
            self.calls += 1;
            if self.fail {
                return Err(PressError::EmptyResponse);
            }
            Ok(format!("echo: {}", prompt.text))
        }
    }

    #[test]
    fn identical_prompts_generate_once() {
        let mut cache = PromptCache::new(4);
        let mut echo = Echo { calls: 0, fail: false };
        let prompt = Prompt::new("the north sea burns", 1.0);

        let first = cache.get_or_generate(&mut echo, &prompt).unwrap();
        let second = cache.get_or_generate(&mut echo, &prompt).unwrap();
        assert_eq!(first, second);
        assert_eq!(echo.calls, 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn temperature_is_part_of_the_key() {
        let mut cache = PromptCache::new(4);
        let mut echo = Echo { calls: 0, fail: false };
        cache.get_or_generate(&mut echo, &Prompt::new("same", 0.0)).unwrap();
        cache.get_or_generate(&mut echo, &Prompt::new("same", 1.0)).unwrap();
        assert_eq!(echo.calls, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = PromptCache::new(2);
        let a = Prompt::new("a", 0.0);
        let b = Prompt::new("b", 0.0);
        let c = Prompt::new("c", 0.0);

        cache.insert(&a, "A".into());
        cache.insert(&b, "B".into());
        assert_eq!(cache.get(&a), Some("A"));
        cache.insert(&c, "C".into());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&b), None);
        assert_eq!(cache.get(&a), Some("A"));
        assert_eq!(cache.get(&c), Some("C"));
    }

    #[test]
    fn reinsert_replaces_without_growing() {
        let mut cache = PromptCache::new(2);
        let a = Prompt::new("a", 0.0);
        cache.insert(&a, "first".into());
        cache.insert(&a, "second".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&a), Some("second"));
    }

    #[test]
    fn zero_capacity_passes_through() {
        let mut cache = PromptCache::new(0);
        let mut echo = Echo { calls: 0, fail: false };
        let prompt = Prompt::new("x", 0.0);
        cache.get_or_generate(&mut echo, &prompt).unwrap();
        cache.get_or_generate(&mut echo, &prompt).unwrap();
        assert_eq!(echo.calls, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = PromptCache::new(4);
        let mut echo = Echo { calls: 0, fail: true };
        let prompt = Prompt::new("x", 0.0);
        assert!(cache.get_or_generate(&mut echo, &prompt).is_err());
        echo.fail = false;
        assert_eq!(cache.get_or_generate(&mut echo, &prompt).unwrap(), "echo: x");
        assert_eq!(echo.calls, 2);
    }
}
