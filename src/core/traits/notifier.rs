/// Port for transient user notifications (success, info, failure).
///
/// Page controllers report every outcome through this trait and never
/// print directly, so the same controller drives the terminal and tests.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn info(&self, message: &str);

    fn error(&self, message: &str);
}
