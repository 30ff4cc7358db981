pub(crate) mod categories;
pub(crate) mod error_message_erasure;
pub(crate) mod plugins;
