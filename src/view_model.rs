//! The [`ViewModel`] trait for the MVVM architecture.

use crate::app::Message;

/// Trait containing methods for `ViewModel` modules in the MVVM architecture.
pub trait ViewModel {
    /// Updates the model behind a [`crate::view::View`].
    ///
    /// Returns a follow-up message for the app when the update has one.
    fn update(&mut self, message: Message) -> Option<Message>;
}
