// Profile Wizard: four-step linear form collecting a student profile.
// State lives in memory for the lifetime of the wizard; submission only logs.

pub mod catalog;
pub mod handlers;
pub mod wizard;

pub use wizard::ProfileWizard;
