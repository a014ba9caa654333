pub mod layout;
pub mod restart;
pub mod store;

pub use layout::{
    init_layout_direction, layout_direction, stored_direction, BootstrapOutcome, LayoutBootstrap,
    LayoutDirection,
};
pub use restart::ProcessRestarter;
pub use store::{JsonFileStore, MemoryStore};
