use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
};

use interleave_io::Source;

use crate::error::{Failure, InterleaveError};

mod worker;

const WORKER_NAME: &str = "interleave-reader";
const WORKER_STACK: usize = 1_048_576;

/// The position of a reader thread in its state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    /// The thread was spawned but did not acknowledge yet.
    Launching,
    /// The thread waits for the next request.
    AwaitingRequest,
    /// The thread reads one character from its source.
    Reading,
    /// The thread hands the outcome of a read back.
    Reporting,
    /// The thread exited; no further requests are serviced.
    Done,
}

/// State shared between a channel and its reader thread.
///
/// Every field is only ever touched with the lock held.
#[derive(Debug)]
struct Handshake {
    state: ReaderState,
    pending: bool,
    shutdown: bool,
    finished: bool,
    slot: Option<char>,
    failure: Option<Failure>,
}

#[derive(Debug)]
pub(crate) struct Shared {
    handshake: Mutex<Handshake>,
    request: Condvar,
    response: Condvar,
}

impl Shared {
    fn new() -> Self {
        Self {
            handshake: Mutex::new(Handshake {
                state: ReaderState::Launching,
                pending: false,
                shutdown: false,
                finished: false,
                slot: None,
                failure: None,
            }),
            request: Condvar::new(),
            response: Condvar::new(),
        }
    }

    // A poisoned lock means a reader panicked. The worker reports that
    // on its way out, so the state behind the lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Handshake> {
        self.handshake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Like `Condvar::wait_while`, except that poisoning does not cut the
    // wait short; the condition is always checked before returning.
    fn wait_while<'a>(
        &self,
        cond: &Condvar,
        mut hs: MutexGuard<'a, Handshake>,
        mut condition: impl FnMut(&Handshake) -> bool,
    ) -> MutexGuard<'a, Handshake> {
        while condition(&hs) {
            hs = cond.wait(hs).unwrap_or_else(PoisonError::into_inner);
        }

        hs
    }
}

/// A single-slot handshake with a dedicated reader thread.
///
/// The owning side requests one character at a time with
/// [`ReaderChannel::request`], which blocks until the reader thread
/// has finished its attempt. Once the source is exhausted, the
/// channel is finished for good.
///
/// Dropping a channel tears the reader thread down and joins it,
/// even when its source was not exhausted yet.
#[derive(Debug)]
pub struct ReaderChannel {
    name: String,
    shared: Arc<Shared>,
    finished: bool,
    taken: usize,
    handle: Option<JoinHandle<()>>,
}

impl ReaderChannel {
    /// Spawns a reader thread for `source` and waits for it to get
    /// ready for requests.
    ///
    /// The source is opened on the reader thread; failure to do so is
    /// reported from here.
    pub fn launch<S: Source>(source: S) -> Result<Self, InterleaveError> {
        let name = source.name();
        let shared = Arc::new(Shared::new());

        let handle = thread::Builder::new()
            .name(WORKER_NAME.into())
            .stack_size(WORKER_STACK)
            .spawn({
                let shared = shared.clone();
                move || worker::run(source, &shared)
            })
            .map_err(InterleaveError::Spawn)?;

        let mut channel = Self {
            name,
            shared,
            finished: false,
            taken: 0,
            handle: Some(handle),
        };

        let shared = &channel.shared;
        let mut hs = shared.wait_while(&shared.response, shared.lock(), |hs| {
            hs.state == ReaderState::Launching
        });
        let failure = hs.failure.take();
        drop(hs);

        match failure {
            Some(failure) => {
                channel.finished = true;
                Err(failure.into_error(channel.name.clone()))
            }

            None => {
                log::debug!("Launched reader for '{}'", channel.name);
                Ok(channel)
            }
        }
    }

    /// Gets the name of the source this channel reads from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the source was exhausted.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Gets the number of characters this channel produced so far.
    #[inline]
    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Gets the current state of the reader thread.
    pub fn state(&self) -> ReaderState {
        self.shared.lock().state
    }

    /// Requests the next character from the reader thread and blocks
    /// until it was read.
    ///
    /// Returns [`None`] when the source is exhausted, which finishes
    /// the channel.
    ///
    /// # Panics
    ///
    /// Panics when the channel is already finished.
    pub fn request(&mut self) -> Result<Option<char>, InterleaveError> {
        assert!(
            !self.finished,
            "requested a character from finished channel '{}'",
            self.name
        );

        let mut hs = self.shared.lock();
        hs.pending = true;
        self.shared.request.notify_one();

        let mut hs = self
            .shared
            .wait_while(&self.shared.response, hs, |hs| hs.pending);
        let (slot, finished, failure) = (hs.slot.take(), hs.finished, hs.failure.take());
        drop(hs);

        self.finished = finished;
        if let Some(failure) = failure {
            return Err(failure.into_error(self.name.clone()));
        }

        if finished {
            log::debug!(
                "Input '{}' exhausted after {} characters",
                self.name,
                self.taken
            );
            return Ok(None);
        }

        match slot {
            Some(c) => {
                log::trace!("Got '{}' from '{}'", c.escape_debug(), self.name);
                self.taken += 1;
                Ok(Some(c))
            }

            None => unreachable!("reader for '{}' reported an empty slot", self.name),
        }
    }

    /// Waits for the reader thread to terminate.
    ///
    /// A channel which is not finished yet gets shut down first.
    pub fn join(mut self) -> Result<(), InterleaveError> {
        match self.shutdown() {
            Some(Err(_)) => Err(InterleaveError::ReaderPanicked {
                name: self.name.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn shutdown(&mut self) -> Option<thread::Result<()>> {
        let handle = self.handle.take()?;

        self.shared.lock().shutdown = true;
        self.shared.request.notify_one();

        Some(handle.join())
    }
}

impl Drop for ReaderChannel {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
