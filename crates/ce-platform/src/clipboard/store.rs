//! System clipboard as the external store.
//!
//! The content travels as plain text. The label rides along in a private
//! format next to it, so other applications only ever see the text while a
//! second editor instance gets both back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use ce_core::ports::{ExternalChangeHandler, ExternalStorePort, StoreError, SubscriptionId};
use ce_core::{ExternalClip, MimeType, TextPair};
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat};
use tracing::{debug, trace, warn};

/// Clipboard format carrying the label.
pub const LABEL_FORMAT: &str = "application/x-clipeditor-label";

type Subscribers = Vec<(SubscriptionId, Arc<dyn ExternalChangeHandler>)>;

pub struct SystemClipboardStore {
    inner: Arc<Mutex<ClipboardContext>>,
    subscribers: Mutex<Subscribers>,
    next_id: AtomicU64,
}

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T, StoreError> {
    result.map_err(|e| StoreError::Unavailable(e.to_string()))
}

impl SystemClipboardStore {
    pub fn new() -> anyhow::Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("ClipboardContext::new failed: {}", e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("clipboard context lock poisoned".to_string()))
    }

    /// Deliver a change notification to every subscriber.
    ///
    /// Called from the dispatch loop when the watcher reports a change.
    pub fn notify_subscribers(&self) {
        let handlers: Vec<_> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.iter().map(|(_, h)| h.clone()).collect(),
            Err(_) => {
                warn!("subscriber list poisoned; change notification dropped");
                return;
            }
        };
        trace!(count = handlers.len(), "clipboard changed");
        for handler in handlers {
            handler.on_external_change();
        }
    }
}

/// Metadata for the extra-info line, in a fixed order. The label format is
/// ours and never listed.
fn mime_types(ctx: &ClipboardContext) -> Vec<MimeType> {
    let mut mimes = Vec::new();
    if ctx.has(ContentFormat::Text) {
        mimes.push(MimeType::text_plain());
    }
    if ctx.has(ContentFormat::Html) {
        mimes.push(MimeType::text_html());
    }
    if ctx.has(ContentFormat::Rtf) {
        mimes.push(MimeType::from("text/rtf"));
    }
    if ctx.has(ContentFormat::Image) {
        mimes.push(MimeType::from("image/png"));
    }
    if ctx.has(ContentFormat::Files) {
        mimes.push(MimeType::from("text/uri-list"));
    }
    mimes
}

fn item_count(ctx: &ClipboardContext) -> usize {
    if ctx.has(ContentFormat::Files) {
        if let Ok(files) = ctx.get_files() {
            return files.len().max(1);
        }
    }
    1
}

fn read_label(ctx: &ClipboardContext) -> Option<String> {
    if !ctx.has(ContentFormat::Other(LABEL_FORMAT.to_string())) {
        return None;
    }
    match ctx.get_buffer(LABEL_FORMAT) {
        Ok(bytes) => String::from_utf8(bytes).ok(),
        Err(e) => {
            debug!(error = %e, "label format advertised but unreadable");
            None
        }
    }
}

impl ExternalStorePort for SystemClipboardStore {
    fn read(&self) -> Result<Option<ExternalClip>, StoreError> {
        let ctx = self.context()?;

        let available = map_clipboard_err(ctx.available_formats())?;
        if available.is_empty() {
            return Ok(None);
        }

        let label = read_label(&ctx);
        let mimes = mime_types(&ctx);
        let count = item_count(&ctx);

        if !ctx.has(ContentFormat::Text) {
            // present but not text (image, files, ...): empty content, metadata kept
            return Ok(Some(ExternalClip::from_raw(label, None, mimes, count)));
        }

        let text = ctx
            .get_text()
            .map_err(|e| StoreError::MalformedValue(e.to_string()))?;
        Ok(Some(ExternalClip::new(TextPair::new(label.unwrap_or_default(), text), mimes, count)))
    }

    fn write(&self, pair: &TextPair) -> Result<(), StoreError> {
        let ctx = self.context()?;

        let mut contents = vec![ClipboardContent::Text(pair.content.clone())];
        if !pair.label.is_empty() {
            contents.push(ClipboardContent::Other(
                LABEL_FORMAT.to_string(),
                pair.label.clone().into_bytes(),
            ));
        }

        map_clipboard_err(ctx.set(contents))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let ctx = self.context()?;
        map_clipboard_err(ctx.clear())
    }

    fn subscribe(
        &self,
        handler: Arc<dyn ExternalChangeHandler>,
    ) -> Result<SubscriptionId, StoreError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .map_err(|_| StoreError::Unavailable("subscriber list poisoned".to_string()))?
            .push((id, handler));
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|(existing, _)| *existing != id);
        }
    }
}
