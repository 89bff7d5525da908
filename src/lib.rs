pub mod ai;
pub mod content;
pub mod i18n;
pub mod markup;
pub mod session;
pub mod types;

#[cfg(feature = "ui")]
pub mod theme;
#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
