use crate::chess::{Square, Status};

/// Receives notifications from a [`Referee`][crate::referee::Referee].
///
/// Notifications are delivered synchronously, before the operation that
/// triggered them returns.
#[cfg_attr(test, mockall::automock)]
pub trait Delegate {
    /// The status of the game changed.
    fn on_status_changed(&mut self, status: Status);

    /// The contents of a square need to be redrawn.
    fn on_square_refresh(&mut self, sq: Square);
}

/// Ignores every notification.
impl Delegate for () {
    fn on_status_changed(&mut self, _: Status) {}

    fn on_square_refresh(&mut self, _: Square) {}
}

impl<D: Delegate + ?Sized> Delegate for &mut D {
    fn on_status_changed(&mut self, status: Status) {
        (**self).on_status_changed(status)
    }

    fn on_square_refresh(&mut self, sq: Square) {
        (**self).on_square_refresh(sq)
    }
}

impl<D: Delegate + ?Sized> Delegate for Box<D> {
    fn on_status_changed(&mut self, status: Status) {
        (**self).on_status_changed(status)
    }

    fn on_square_refresh(&mut self, sq: Square) {
        (**self).on_square_refresh(sq)
    }
}
