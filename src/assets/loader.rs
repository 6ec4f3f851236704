use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use rayon::prelude::*;

use crate::{
    assets::{
        decode::{DecodedPhoto, decode_photo},
        photo::{MAX_PHOTOS, PhotoFrame, PhotoSource},
    },
    foundation::error::{VitrineError, VitrineResult},
};

/// Proof that a batch was started; only the newest ticket may publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Decodes photo batches and discards batches superseded by a newer [`LoadTicket`].
///
/// Clones share the generation counter, so a ticket issued through any clone
/// invalidates every earlier one.
#[derive(Clone, Debug, Default)]
pub struct PhotoLoader {
    generation: Arc<AtomicU64>,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl PhotoLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode on a dedicated pool of `threads` workers instead of the global one.
    pub fn with_threads(threads: usize) -> VitrineResult<Self> {
        if threads == 0 {
            return Err(VitrineError::validation(
                "photo loader 'threads' must be >= 1",
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| VitrineError::validation(format!("failed to build decode pool: {e}")))?;
        Ok(Self {
            generation: Arc::default(),
            pool: Some(Arc::new(pool)),
        })
    }

    /// Start a new batch, superseding every earlier ticket.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket { generation }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// Decode every source as one batch.
    ///
    /// Returns `Ok(None)` when `ticket` was superseded before or during decoding. Any
    /// single decode failure abandons the whole batch.
    #[tracing::instrument(level = "debug", skip(self, sources), fields(generation = ticket.generation, n = sources.len()))]
    pub fn load_batch(
        &self,
        ticket: LoadTicket,
        sources: Vec<PhotoSource>,
    ) -> VitrineResult<Option<Vec<PhotoFrame>>> {
        if sources.len() > MAX_PHOTOS {
            return Err(VitrineError::validation(format!(
                "at most {MAX_PHOTOS} photos are supported, got {}",
                sources.len()
            )));
        }
        if !self.is_current(ticket) {
            tracing::debug!("batch superseded before decoding");
            return Ok(None);
        }

        let decoded = self.decode_all(&sources);
        self.publish(ticket, sources, decoded)
    }

    fn decode_all(&self, sources: &[PhotoSource]) -> VitrineResult<Vec<DecodedPhoto>> {
        let decode = || {
            sources
                .par_iter()
                .map(|source| {
                    decode_photo(&source.bytes).map_err(|e| {
                        VitrineError::layout_preparation(format!("{}: {e}", source.name))
                    })
                })
                .collect::<VitrineResult<Vec<_>>>()
        };
        match &self.pool {
            Some(pool) => pool.install(decode),
            None => decode(),
        }
    }

    /// Staleness wins over the decode outcome: a superseded batch neither
    /// publishes frames nor reports its failure.
    fn publish(
        &self,
        ticket: LoadTicket,
        sources: Vec<PhotoSource>,
        decoded: VitrineResult<Vec<DecodedPhoto>>,
    ) -> VitrineResult<Option<Vec<PhotoFrame>>> {
        if !self.is_current(ticket) {
            tracing::debug!("batch superseded during decoding");
            return Ok(None);
        }
        let decoded = match decoded {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(error = %err, "photo batch abandoned");
                return Err(err);
            }
        };

        Ok(Some(
            sources
                .into_iter()
                .zip(decoded)
                .enumerate()
                .map(|(ordinal, (source, photo))| PhotoFrame::new(source, ordinal, photo))
                .collect(),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
