//! Response body types
//!
//! Every handler returns a [`ResponseBody`]: either a single buffer or a
//! [`ChunkedBody`] fed by a transfer task through a bounded channel.

use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::{Body, Bytes, Frame, SizeHint};
use tokio::sync::mpsc;

use crate::assets::AssetError;

pub type ResponseBody = UnsyncBoxBody<Bytes, AssetError>;

/// Item sent by a transfer task: a data chunk, the empty terminal chunk, or
/// the read error that aborted the transfer
pub type ChunkResult = io::Result<Bytes>;

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Streaming body driven by a transfer task
///
/// A zero-length chunk marks the end of the transfer. A read error, or the
/// sender going away before the terminal chunk, fails the body so the client
/// never sees a complete-looking response.
#[derive(Debug)]
pub struct ChunkedBody {
    rx: mpsc::Receiver<ChunkResult>,
    label: String,
    done: bool,
}

impl ChunkedBody {
    pub fn new(rx: mpsc::Receiver<ChunkResult>, label: impl Into<String>) -> Self {
        Self {
            rx,
            label: label.into(),
            done: false,
        }
    }

    pub fn into_response_body(self) -> ResponseBody {
        self.boxed_unsync()
    }

    fn fail(&mut self, source: io::Error) -> AssetError {
        self.done = true;
        AssetError::TransferFailed {
            path: self.label.clone().into(),
            source,
        }
    }
}

impl Body for ChunkedBody {
    type Data = Bytes;
    type Error = AssetError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }

        match ready!(this.rx.poll_recv(cx)) {
            Some(Ok(chunk)) if chunk.is_empty() => {
                this.done = true;
                Poll::Ready(None)
            }
            Some(Ok(chunk)) => Poll::Ready(Some(Ok(Frame::data(chunk)))),
            Some(Err(e)) => Poll::Ready(Some(Err(this.fail(e)))),
            None => {
                let e = io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "transfer ended without terminal chunk",
                );
                Poll::Ready(Some(Err(this.fail(e))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.done
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::default()
    }
}
