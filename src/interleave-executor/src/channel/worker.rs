use std::thread;

use interleave_io::{CharReader, Source};

use super::{ReaderState, Shared};
use crate::error::Failure;

/// Makes sure the coordinator hears about a reader that panicked
/// instead of waiting for a response forever.
struct PanicGuard<'a>(&'a Shared);

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            let mut hs = self.0.lock();
            hs.pending = false;
            hs.finished = true;
            hs.failure.get_or_insert(Failure::Panicked);
            hs.state = ReaderState::Done;

            self.0.response.notify_one();
        }
    }
}

/// The body of a reader thread.
pub(super) fn run<S: Source>(source: S, shared: &Shared) {
    let _guard = PanicGuard(shared);

    let opened = source.open();

    let mut hs = shared.lock();
    let mut reader = match opened {
        Ok(r) => CharReader::new(r),
        Err(e) => {
            hs.finished = true;
            hs.failure = Some(Failure::Open(e));
            hs.state = ReaderState::Done;

            shared.response.notify_one();
            return;
        }
    };

    // Acknowledge the launch. From here on, the lock is only given up
    // while waiting for the next request.
    hs.state = ReaderState::AwaitingRequest;
    shared.response.notify_one();

    loop {
        hs = shared.wait_while(&shared.request, hs, |hs| !hs.pending && !hs.shutdown);

        if !hs.pending {
            break;
        }

        hs.state = ReaderState::Reading;
        match reader.read_char() {
            Ok(Some(c)) => hs.slot = Some(c),
            Ok(None) => hs.finished = true,
            Err(e) => {
                hs.finished = true;
                hs.failure = Some(Failure::Read(e));
            }
        }

        hs.state = ReaderState::Reporting;
        hs.pending = false;
        shared.response.notify_one();

        if hs.finished {
            break;
        }
        hs.state = ReaderState::AwaitingRequest;
    }

    hs.state = ReaderState::Done;
}
