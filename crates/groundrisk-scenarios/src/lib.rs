//! groundrisk-scenarios
//!
//! Harness on top of the models: the intrinsic Ground Risk Class of a
//! (population density, critical area) pair, a reference pack of five
//! aircraft size classes and the iGRC table generated from it.
//!
//! Scenario packs are plain JSON; see [`load_scenarios_from_path`].

pub mod igrc;
pub mod loader;
pub mod parameters;
pub mod table;

pub use igrc::{igrc, Igrc};
pub use loader::{load_scenarios_from_path, load_scenarios_from_str};
pub use parameters::{ScenarioParameters, SizeClass};
pub use table::{IgrcRow, IgrcTable};
