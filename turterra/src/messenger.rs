use maybe_sync::{MaybeSend, MaybeSync};

/// Notifies the host application that the map surface changed and should be redrawn.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests a redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that does nothing. Useful for headless maps.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
