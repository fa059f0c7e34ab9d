//! Progressive delivery of committed assistant turns.
//!
//! Content is decomposed into prefix fragments: fragment `k` is the
//! source text up to the end of its `k`-th whitespace-delimited word, and
//! the last fragment is byte-identical to the full source. Every fragment
//! is therefore a byte prefix of the next, which lets renderers print
//! only the suffix each fragment adds. Session state is committed before
//! a stream is created, so dropping a stream midway never loses or
//! corrupts dialogue state.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

/// Iterator over the prefix fragments of a text.
pub struct PrefixFragments {
    source: String,
    word_ends: Vec<usize>,
    next_word: usize,
    done: bool,
}

impl PrefixFragments {
    fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let word_ends = source
            .split_whitespace()
            .map(|word| word.as_ptr() as usize - source.as_ptr() as usize + word.len())
            .collect();
        Self {
            source,
            word_ends,
            next_word: 0,
            done: false,
        }
    }
}

impl Iterator for PrefixFragments {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        // The last fragment is the source verbatim, trailing whitespace
        // included.
        if self.next_word + 1 >= self.word_ends.len() {
            self.done = true;
            return Some(self.source.clone());
        }
        let end = self.word_ends[self.next_word];
        self.next_word += 1;
        Some(self.source[..end].to_string())
    }
}

/// Splits `text` into its prefix-fragment sequence.
///
/// Yields one fragment per word; the final fragment always equals `text`
/// exactly. Empty or whitespace-only text yields a single fragment.
pub fn fragments(text: impl Into<String>) -> PrefixFragments {
    PrefixFragments::new(text)
}

/// Consumer handle over an in-flight fragment stream.
///
/// Fragments arrive over a bounded channel, so a slow consumer paces the
/// producer instead of buffering unboundedly. Dropping the handle cancels
/// production; the full text remains available either way.
#[derive(Debug)]
pub struct StreamHandle {
    receiver: mpsc::Receiver<String>,
    full_text: String,
}

impl StreamHandle {
    /// Spawns a producer task emitting the prefix fragments of `text`.
    pub fn spawn(text: impl Into<String>, buffer: usize) -> Self {
        let full_text = text.into();
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let source = full_text.clone();
        tokio::spawn(async move {
            for fragment in fragments(source) {
                if sender.send(fragment).await.is_err() {
                    break;
                }
            }
        });
        Self {
            receiver,
            full_text,
        }
    }

    /// Receives the next fragment, or `None` once the stream is exhausted.
    pub async fn next_fragment(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Consumes the remaining fragments and returns the last one received.
    pub async fn drain(&mut self) -> Option<String> {
        let mut last = None;
        while let Some(fragment) = self.receiver.recv().await {
            last = Some(fragment);
        }
        last
    }

    /// The complete text this stream delivers.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }
}

impl Stream for StreamHandle {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.receiver.poll_recv(cx)
    }
}
