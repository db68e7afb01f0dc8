/*!
A bounded cache of recently seen bundle fingerprints.

A node uses the cache to avoid delivering or forwarding the same bundle
twice. Entries remember the bundle's lifetime and are forgotten by
[`RedundancyCache::sweep`], which the host calls every
[`Config::sweep_interval`] seconds, or which a [`Sweeper`] task calls when the
`tokio` feature is enabled.
*/

use super::*;
use bundle::Bundle;
use core::num::{NonZeroU32, NonZeroUsize};
use field::Field;

mod pool;

#[cfg(feature = "tokio")]
mod sweeper;

#[cfg(feature = "tokio")]
pub use sweeper::Sweeper;


/// Identifies a bundle, or one fragment of it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fingerprint {
    pub source: u32,
    pub sequence: u32,
    pub fragment_offset: u32,
}

impl Fingerprint {
    pub fn of<B: AsRef<[u8]>>(bundle: &Bundle<B>) -> Result<Self, Error> {
        Ok(Self {
            source: bundle.get(Field::SrcNode)?,
            sequence: bundle.get(Field::TimeStampSeqNr)?,
            fragment_offset: bundle.get(Field::FragOffset)?,
        })
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Config {
    /// Maximum number of fingerprints held at once.
    pub capacity: NonZeroUsize,

    /// Seconds between sweeps, also the amount each sweep takes off every
    /// remaining lifetime.
    #[cfg_attr(feature = "serde", serde(alias = "sweep_interval"))]
    pub sweep_interval: NonZeroU32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            sweep_interval: NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl Config {
    pub fn sweep_interval(&self) -> core::time::Duration {
        core::time::Duration::from_secs(self.sweep_interval.get().into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    AlreadyKnown,
}

struct Entry {
    fingerprint: Fingerprint,
    lifetime: u32,
}

pub struct RedundancyCache {
    pool: pool::Pool<Entry>,
    live: Vec<usize>,
    config: Config,
}

impl core::fmt::Debug for RedundancyCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RedundancyCache")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for RedundancyCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl RedundancyCache {
    pub fn new(config: Config) -> Self {
        let capacity = config.capacity.get();
        Self {
            pool: pool::Pool::new(capacity),
            live: Vec::with_capacity(capacity),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Returns true if a bundle with the same fingerprint has been seen.
    pub fn check<B: AsRef<[u8]>>(&self, bundle: &Bundle<B>) -> Result<bool, Error> {
        Ok(self.contains(&Fingerprint::of(bundle)?))
    }

    /// Records the bundle, remembering it for its LIFE_TIME.
    ///
    /// Seeing the same fingerprint again is not an error and does not use
    /// another entry. Fails with [`Error::CacheFull`] when every entry is in
    /// use; the caller decides whether to drop or forward the bundle anyway.
    pub fn set<B: AsRef<[u8]>>(&mut self, bundle: &Bundle<B>) -> Result<SetOutcome, Error> {
        let fingerprint = Fingerprint::of(bundle)?;
        self.insert(fingerprint, bundle.get(Field::LifeTime)?)
    }

    pub fn insert(&mut self, fingerprint: Fingerprint, lifetime: u32) -> Result<SetOutcome, Error> {
        if self.contains(&fingerprint) {
            trace!("Bundle {fingerprint:?} already known");
            return Ok(SetOutcome::AlreadyKnown);
        }

        let idx = self
            .pool
            .alloc(Entry {
                fingerprint,
                lifetime,
            })
            .ok_or(Error::CacheFull(self.pool.capacity()))?;
        self.live.push(idx);

        debug!("Remembering bundle {fingerprint:?} for {lifetime}s");
        Ok(SetOutcome::Inserted)
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries().any(|e| e.fingerprint == *fingerprint)
    }

    /// Ages every entry by one sweep interval and forgets those whose
    /// lifetime has run out. Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let step = self.config.sweep_interval.get();
        let pool = &mut self.pool;
        let before = self.live.len();

        self.live.retain(|&idx| {
            let Some(entry) = pool.get_mut(idx) else {
                return false;
            };
            if entry.lifetime > step {
                entry.lifetime -= step;
                true
            } else {
                trace!("Forgetting bundle {:?}", entry.fingerprint);
                pool.free(idx);
                false
            }
        });

        before - self.live.len()
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.pool.clear();
    }

    /// The fingerprints currently held, with their remaining lifetimes.
    pub fn iter(&self) -> impl Iterator<Item = (Fingerprint, u32)> + '_ {
        self.entries().map(|e| (e.fingerprint, e.lifetime))
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.live.iter().filter_map(|&idx| self.pool.get(idx))
    }
}
