//! rc file used by Kakoune to inject the change-inner commands.

/// Main RC file.
pub fn static_kak() -> &'static str {
  include_str!("../../rc/change-inner.kak")
}
