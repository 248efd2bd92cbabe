//! Run progression: state, content, orchestration and persistence.
//!
//! ## Key Types
//!
//! - `RunSession`: Owns the live run and routes every player action
//! - `RunState`: HP, gold, deck IDs, node index, shop slots
//! - `ContentCatalog`: Cards, pools, oaths, balances and map templates
//! - `MetaProgress`: Unlocks and start bonuses kept across runs
//! - `RunSaveData`: Versioned JSON save record
//! - `KeyValueStore`: Host-provided string storage

pub mod content;
pub mod meta;
pub mod save;
pub mod session;
pub mod state;
pub mod store;

pub use content::{ContentCatalog, OathDefinition};
pub use meta::{MetaProgress, META_KEY, META_VERSION};
pub use save::{RunSaveData, RunStateSave, SaveSummary, SAVE_KEY, SAVE_VERSION};
pub use session::{ContinueFallback, RunSession};
pub use state::{RunOutcome, RunState};
pub use store::{KeyValueStore, MemoryStore};
