// Session Gate: authentication screen backed by the external identity provider.
// Credentials are checked by the provider; this module only validates form input,
// reacts to session changes, and maps outcomes to notifications.

pub mod gate;
pub mod handlers;

pub use gate::SessionGate;
