/**
    Receives progress updates while an upload body is being streamed.

    Implemented for any `Fn(u64, u64)` closure taking `(current, expected)`.
*/
pub trait ProgressObserver {
    fn on_progress(&self, current: u64, expected: u64);
}

impl<F> ProgressObserver for F
where
    F: Fn(u64, u64),
{
    fn on_progress(&self, current: u64, expected: u64) {
        self(current, expected);
    }
}

/**
    Counts bytes as they are handed to the transport, and
    reports each new total to a [`ProgressObserver`].

    The count never goes past the expected total given at creation.
*/
#[derive(Debug)]
pub struct ProgressCounter<P> {
    expected: u64,
    current: u64,
    observer: P,
}

impl<P: ProgressObserver> ProgressCounter<P> {
    #[must_use]
    pub fn new(expected: u64, observer: P) -> Self {
        Self {
            expected,
            current: 0,
            observer,
        }
    }

    /**
        Records a chunk that was written, returning its length.

        Empty chunks are not reported, so observers only ever see the count increase.
    */
    pub fn write(&mut self, chunk: &[u8]) -> usize {
        if chunk.is_empty() {
            return 0;
        }
        let len = chunk.len() as u64;
        self.current = self.current.saturating_add(len).min(self.expected);
        self.observer.on_progress(self.current, self.expected);
        chunk.len()
    }
}
