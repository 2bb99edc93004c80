//! Lazy record streams.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::decode::ArrayDecoder;
use crate::error::{ClientError, TransportError};

/// A lazy, finite sequence of decoded records.
///
/// Records are decoded incrementally as response bytes arrive; consuming the
/// stream drives a background task that reads from the connection through a
/// bounded channel, so the producer never runs ahead of the consumer by more
/// than the channel capacity. A transport or decode failure mid-stream is
/// yielded as one final `Err` item, after which the stream is exhausted.
///
/// Dropping the stream before it completes stops the background task and
/// releases the underlying connection. The sequence is not restartable;
/// fetching again issues a new request.
#[derive(Debug)]
pub struct RecordStream<T> {
    items: ReceiverStream<Result<T, ClientError>>,
}

impl<T> RecordStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Spawn a pump task decoding `bytes` into records.
    pub(crate) fn spawn<S>(bytes: S, buffer: usize) -> Self
    where
        S: Stream<Item = Result<bytes::Bytes, TransportError>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(buffer);
        tokio::spawn(pump(bytes, tx));
        Self {
            items: ReceiverStream::new(rx),
        }
    }
}

impl<T> Stream for RecordStream<T> {
    type Item = Result<T, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().items).poll_next(cx)
    }
}

/// Read `bytes` to completion, sending each decoded record to `tx`.
///
/// Returns early when the receiver is dropped; the source stream (and the
/// response it holds) is dropped with it.
async fn pump<T, S>(bytes: S, tx: mpsc::Sender<Result<T, ClientError>>)
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = Result<bytes::Bytes, TransportError>> + Send + 'static,
{
    let mut decoder = ArrayDecoder::new();
    futures::pin_mut!(bytes);

    while let Some(chunk) = bytes.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                let _ = tx.send(Err(err.into())).await;
                return;
            }
        };
        match decoder.feed(&chunk) {
            Ok(records) => {
                for record in records {
                    if tx.send(Ok(record)).await.is_err() {
                        // Consumer went away; stop reading.
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = tx.send(Err(err.into())).await;
                return;
            }
        }
    }

    if let Err(err) = decoder.finish() {
        let _ = tx.send(Err(err.into())).await;
    }
}
