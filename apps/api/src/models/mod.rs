pub mod notification;
pub mod payment;
pub mod profile;
pub mod session;
