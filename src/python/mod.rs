//! Python bindings for the memory-match engine.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! game = mm.MemoryGame(rows=2, columns=2, seed=7)
//! game.start(2, 2, [0, 0, 1, 1])
//!
//! for event in game.activate(0):
//!     print(event.kind, event.cards)
//! game.on_animation_complete(0)
//! game.advance(200)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// memory_match: tile-matching game engine.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameEvent>()?;
    m.add_class::<PyScoreBoard>()?;
    m.add_class::<PyMemoryGame>()?;
    Ok(())
}
