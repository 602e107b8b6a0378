//! Built-in WCAG 2.1 A/AA evaluators.
//!
//! Every rule is a [`PageCheck`](a11y_rule_registry::PageCheck) or
//! [`SiteCheck`](a11y_rule_registry::SiteCheck) over immutable snapshots; none of them hold
//! state between evaluations. [`builtin_rules`] lists them in registration order.

pub mod aria;
pub mod catalog;
pub mod color;
pub mod consistency;
pub mod contrast;
pub mod denylists;
pub mod duplicate_id;
pub mod focus;
pub mod headings;
pub mod keyboard;
pub mod landmarks;
pub mod language;
pub mod live_region;
pub mod names;
pub mod reflow;
pub mod target_size;

#[cfg(test)]
mod testing;

pub use catalog::{builtin_rules, register_builtin};
pub use color::{contrast_ratio, meets, parse_color, relative_luminance, Rgb, Rgba};
