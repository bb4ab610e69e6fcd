//! # ss-services
//!
//! Record services for SkillSphere.
//!
//! Services sit between the HTTP facade and the record store: they fill in
//! generated ids, defaults and timestamps, run the create contract, and
//! translate store failures into `SsError`.

pub mod profiles;
pub mod records;
pub mod set_attributes;

pub use records::RecordService;
