//! Value types for the scheduling domain: patients, surgical types, rooms,
//! assignments, and the immutable problem instance.

pub mod assignment;
pub mod instance;
pub mod operating_room;
pub mod patient;
pub mod surgical_type;
pub mod uce_room;

pub use assignment::Assignment;
pub use instance::Instance;
pub use operating_room::OperatingRoom;
pub use patient::Patient;
pub use surgical_type::SurgicalType;
pub use uce_room::{SexLock, UceRoom};
