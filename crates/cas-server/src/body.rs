use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use cas_types::ObjectRef;
use futures::Stream;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// A blob transfer that could not be completed after the response headers
/// were sent.
#[derive(Debug, thiserror::Error)]
#[error("transfer of {oref} aborted after {sent} of {expected} bytes: {reason}")]
pub struct TransferAborted {
    pub oref: ObjectRef,
    pub sent: u64,
    pub expected: u64,
    pub reason: String,
}

/// Response body that streams a blob and checks it delivers exactly the size
/// reported when the blob was opened.
///
/// On a read failure or a byte count that disagrees with the expected size the
/// stream yields a final [`TransferAborted`] error. By then the status line and
/// headers are already on the wire, so hyper answers the error by severing the
/// connection instead of finishing the response.
pub struct AbortingBody<R> {
    inner: ReaderStream<R>,
    oref: ObjectRef,
    expected: u64,
    sent: u64,
    finished: bool,
}

impl<R: AsyncRead> AbortingBody<R> {
    pub fn new(oref: ObjectRef, reader: R, expected: u64) -> Self {
        Self {
            inner: ReaderStream::new(reader),
            oref,
            expected,
            sent: 0,
            finished: false,
        }
    }

    /// Stop the stream and produce the error that tears down the connection.
    fn abort(&mut self, reason: impl Into<String>) -> io::Error {
        self.finished = true;
        let err = TransferAborted {
            oref: self.oref.clone(),
            sent: self.sent,
            expected: self.expected,
            reason: reason.into(),
        };
        tracing::error!(error = %err, "aborting blob transfer");
        io::Error::other(err)
    }
}

impl<R: AsyncRead + Unpin> Stream for AbortingBody<R> {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.finished {
            return Poll::Ready(None);
        }
        let item = match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
            Some(Ok(chunk)) => {
                this.sent += chunk.len() as u64;
                if this.sent > this.expected {
                    Some(Err(this.abort("blob is larger than when it was opened")))
                } else {
                    Some(Ok(chunk))
                }
            }
            Some(Err(e)) => Some(Err(this.abort(format!("read failed: {e}")))),
            None if this.sent != this.expected => {
                Some(Err(this.abort("blob ended early")))
            }
            None => {
                this.finished = true;
                None
            }
        };
        Poll::Ready(item)
    }
}
