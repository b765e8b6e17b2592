//! conlog: a console facility with pluggable sinks.
//!
//! [`format`] applies printf-style conversions over [`Value`]s, a
//! [`Console`] formats and writes to an output and an error [`Sink`], and
//! [`module`] models modules that expose one value through an export slot.

pub mod console;
pub mod error;
pub mod format;
pub mod inspect;
pub mod module;
pub mod value;

pub use console::{sinks, Builder, ColorMode, Console, Sink};
pub use error::{ConsoleError, Result};
pub use format::{format, format_values};
pub use inspect::{inspect, InspectOptions};
pub use module::{Export, Module, ModuleScope, Namespace, Registry};
pub use value::Value;
