//! Recording sinks for asserting what reached the end of a pipeline

use contraflow::Sink;
use std::sync::{Arc, Mutex};

/// Thread-safe log of every value a terminal callback received
pub struct Recorder<T> {
    values: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Callback for `Stage::sink`
    pub fn callback(&self) -> impl FnMut(T) + Clone + Send + 'static {
        let values = self.values.clone();
        move |v| values.lock().unwrap().push(v)
    }

    /// Receiver for `Stage::attach` groups
    pub fn sink(&self) -> Sink<impl FnMut(T) + Clone + Send + 'static, T> {
        Sink::new(self.callback())
    }

    /// Snapshot of everything recorded so far
    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contraflow::Receiver;

    #[test]
    fn test_recorder_sink_and_callback_share_log() {
        let recorder = Recorder::<u8>::new();
        let mut sink = recorder.sink();
        let mut callback = recorder.callback();
        sink.push(1);
        callback(2);
        assert_eq!(recorder.values(), vec![1, 2]);
    }
}
