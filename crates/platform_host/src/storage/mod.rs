//! Storage capability contracts consumed by the desktop runtime.

pub mod prefs;
