use crate::domain::account::{Account, AccountId};
use crate::domain::ports::NotificationService;
use crate::error::NotificationError;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Emits one `tracing` event per transfer notice.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotificationService;

impl LoggingNotificationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationService for LoggingNotificationService {
    async fn notify_about_transfer(
        &self,
        account: &Account,
        description: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(account = %account.id(), "{description}");
        Ok(())
    }
}

/// A notice delivered through [`ChannelNotificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub account: AccountId,
    pub message: String,
}

/// Hands notices to a consumer over an unbounded `tokio` channel.
///
/// Sending never waits on the consumer. Once the receiver has been dropped every
/// notice fails with a `NotificationError`.
#[derive(Debug, Clone)]
pub struct ChannelNotificationService {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotificationService {
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationService for ChannelNotificationService {
    async fn notify_about_transfer(
        &self,
        account: &Account,
        description: &str,
    ) -> Result<(), NotificationError> {
        self.sender
            .send(Notification {
                account: account.id().clone(),
                message: description.to_string(),
            })
            .map_err(|e| NotificationError(format!("receiver dropped: {}", e.0.account)))
    }
}
