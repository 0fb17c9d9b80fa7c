//! Transient UI flags
//!
//! Score pulses, gate popups and level banners are short-lived flags the host
//! shows while they are active. Retriggering a flag replaces its deadline, so
//! a burst of hits never leaves a stale countdown behind. Engines drain
//! expired flags once per tick against their own clock.

/// Set of active flags keyed by `K`, each with an expiry time in seconds
#[derive(Debug, Clone)]
pub struct TransientFlags<K> {
    entries: Vec<(K, f32)>,
}

impl<K> Default for TransientFlags<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> TransientFlags<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `key` until `now + duration`, replacing any pending expiry
    pub fn trigger(&mut self, key: K, now: f32, duration: f32) {
        self.cancel(key);
        self.entries.push((key, now + duration));
    }

    /// Drop `key` without waiting for it to expire
    pub fn cancel(&mut self, key: K) {
        self.entries.retain(|(k, _)| *k != key);
    }

    pub fn is_active(&self, key: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Seconds left before `key` expires
    pub fn remaining(&self, key: K, now: f32) -> Option<f32> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, at)| (at - now).max(0.0))
    }

    /// Remove every flag whose deadline has passed, returning their keys
    pub fn expire(&mut self, now: f32) -> Vec<K> {
        let mut expired = Vec::new();
        self.entries.retain(|&(key, at)| {
            if at <= now {
                expired.push(key);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flag {
        Pulse,
        Banner,
    }

    #[test]
    fn test_flag_expires_at_deadline() {
        let mut flags = TransientFlags::new();
        flags.trigger(Flag::Pulse, 0.0, 0.5);
        assert!(flags.is_active(Flag::Pulse));
        assert!(flags.expire(0.49).is_empty());
        assert_eq!(flags.expire(0.5), vec![Flag::Pulse]);
        assert!(!flags.is_active(Flag::Pulse));
    }

    #[test]
    fn test_retrigger_replaces_deadline() {
        let mut flags = TransientFlags::new();
        flags.trigger(Flag::Pulse, 0.0, 0.5);
        flags.trigger(Flag::Pulse, 0.4, 0.5);
        assert_eq!(flags.len(), 1);

        // The first deadline is gone: still active past 0.5
        assert!(flags.expire(0.6).is_empty());
        assert!(flags.is_active(Flag::Pulse));
        assert_eq!(flags.expire(0.9), vec![Flag::Pulse]);
    }

    #[test]
    fn test_independent_keys() {
        let mut flags = TransientFlags::new();
        flags.trigger(Flag::Pulse, 0.0, 1.0);
        flags.trigger(Flag::Banner, 0.0, 2.0);

        assert_eq!(flags.expire(1.5), vec![Flag::Pulse]);
        assert!(flags.is_active(Flag::Banner));
        assert!((flags.remaining(Flag::Banner, 1.5).unwrap() - 0.5).abs() < 1e-6);

        flags.cancel(Flag::Banner);
        assert!(flags.is_empty());
    }
}
