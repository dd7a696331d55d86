/// A message for the user-facing output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Informational message.
    Info(String),
    /// A failed operation.
    Error(String),
    /// A formatted summary posted to the shared log (chat).
    Summary {
        /// Character the summary is about.
        speaker: String,
        /// Rendered summary body.
        content: String,
    },
}

/// Fire-and-forget output channel. Delivery failures are the host's concern.
pub trait Notifier {
    /// Post a message.
    fn post(&self, notification: Notification);
}
