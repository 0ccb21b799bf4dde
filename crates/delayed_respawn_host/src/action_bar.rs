use bevy_ecs::prelude::*;
use derive_more::Deref;

/// The transient status line shown to a player above their hotbar.
///
/// An empty string means nothing is displayed. The host is responsible for
/// forwarding changes to the client.
#[derive(Component, Clone, PartialEq, Eq, Default, Debug, Deref)]
pub struct ActionBar(String);

impl ActionBar {
    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn is_clear(&self) -> bool {
        self.0.is_empty()
    }
}
