use crate::model::Severity;
use std::future::Future;

/// Where the controller reports outcomes to the user.
pub trait Notifier {
    /// Shows a short toast-style message.
    fn notify(&self, title: &str, message: &str, severity: Severity);

    /// Asks a yes/no question and resolves once the user has answered.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}
