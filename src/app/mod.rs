//! Application layer: configuration and the factory that wires it up.
//!
//! # Usage
//!
//! ```
//! use bemora::app::{App, EngineConfig, MazeConfig};
//! use bemora::search::Difficulty;
//!
//! let app = App::new();
//! let mut engine = app.create_engine(EngineConfig::new(Difficulty::Hard).with_seed(42));
//! let mut generator = app.create_generator(MazeConfig::default());
//! let grid = generator.generate(0, 15)?;
//! # Ok::<(), bemora::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use bemora::app::App;
//!
//! let app = App::for_testing().with_default_seed(42).build();
//! assert_eq!(app.default_seed(), Some(42));
//! ```

pub mod config;
pub mod container;

pub use config::{EngineConfig, MazeConfig};
pub use container::{App, AppBuilder};
