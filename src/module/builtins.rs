//! Builtin modules.
//!
//! `square` assigns a class to its export slot. `shapes` leaves the slot on
//! its initial namespace and fills it through the `exports` alias.

use super::{Export, Registry};

pub const SQUARE_ID: &str = "square";
pub const SHAPES_ID: &str = "shapes";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub width: f64,
}

impl Square {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn area(&self) -> f64 {
        self.width.powi(2)
    }
}

/// Constructor handed out through the export slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareClass;

impl SquareClass {
    pub fn construct(&self, width: f64) -> Square {
        Square::new(width)
    }
}

pub(crate) fn define(registry: &mut Registry) {
    registry.define(SQUARE_ID, |scope| {
        scope.module.exports = Export::value(SquareClass);
        Ok(())
    });

    registry.define(SHAPES_ID, |scope| {
        let square = scope.require(SQUARE_ID)?.expect_value::<SquareClass>(SQUARE_ID)?;
        if let Some(ns) = scope.exports.namespace() {
            ns.set("Square", *square)?;
        }
        Ok(())
    });
}
