//! Record store access layer: typed fetch/insert accessors over the
//! operational record tables. No business logic lives here — grouping,
//! joining and classification belong to `crate::analytics`.

pub mod billing;
pub mod consultation;
pub mod facility;
pub mod inventory;
pub mod staff;

pub use billing::*;
pub use consultation::*;
pub use facility::*;
pub use inventory::*;
pub use staff::*;
