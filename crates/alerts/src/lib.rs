//! Webhook alert delivery for low-balance wallets.

pub mod webhook;

pub use webhook::{Attachment, Field, NotifyError, WebhookNotifier, WebhookPayload};
