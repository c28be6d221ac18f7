// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// An unbounded channel with the receiver pre-wrapped as a stream.
pub struct TestChannel<T> {
    pub sender: mpsc::UnboundedSender<T>,
    pub stream: UnboundedReceiverStream<T>,
}

impl<T> TestChannel<T> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            stream: UnboundedReceiverStream::new(receiver),
        }
    }

    /// Send a value through the channel.
    ///
    /// # Panics
    ///
    /// Panics if the receiving stream has been dropped.
    pub fn send(&self, value: T) {
        self.sender.send(value).expect("test stream dropped");
    }

    /// Close the sender side, ending the stream.
    pub fn close(self) -> UnboundedReceiverStream<T> {
        self.stream
    }
}

impl<T> Default for TestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Split constructor for tests that move the stream into an operator.
pub fn test_channel<T>() -> (mpsc::UnboundedSender<T>, UnboundedReceiverStream<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (sender, UnboundedReceiverStream::new(receiver))
}
