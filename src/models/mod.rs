pub mod billing;
pub mod consultation;
pub mod enums;
pub mod facility;
pub mod inventory;
pub mod staff;

pub use billing::*;
pub use consultation::*;
pub use enums::*;
pub use facility::*;
pub use inventory::*;
pub use staff::*;
