use std::sync::{Mutex, MutexGuard};

/// Locks a std mutex, recovering the data if a previous holder panicked.
/// Guards from this are never held across `.await`.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
