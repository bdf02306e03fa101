use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Visitor, VisitorSettings};
use crate::errors::AppError;
use crate::identity::IdentityProvider;

/// Upper bound on how often idle visitors are swept.
const MAX_REAP_PERIOD: Duration = Duration::from_secs(60);

/// All live visitors, keyed by the id handed out at creation.
#[derive(Clone)]
pub struct VisitorRegistry {
    provider: Arc<dyn IdentityProvider>,
    settings: Arc<VisitorSettings>,
    visitors: Arc<RwLock<HashMap<Uuid, Arc<Visitor>>>>,
}

impl VisitorRegistry {
    pub fn new(provider: Arc<dyn IdentityProvider>, settings: VisitorSettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
            visitors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn create(&self) -> Arc<Visitor> {
        let visitor = Visitor::new(
            Uuid::new_v4(),
            Arc::clone(&self.provider),
            Arc::clone(&self.settings),
        );
        self.visitors
            .write()
            .await
            .insert(visitor.id(), Arc::clone(&visitor));
        info!(visitor = %visitor.id(), "Visitor created");
        visitor
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Visitor>, AppError> {
        self.visitors
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Visitor {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let visitor = self
            .visitors
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Visitor {id} not found")))?;
        visitor.close();
        info!(visitor = %id, "Visitor removed");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.visitors.read().await.len()
    }

    /// Closes and drops every visitor not seen for at least `max_idle`.
    pub async fn reap_idle(&self, max_idle: Duration) -> usize {
        let mut expired = Vec::new();
        self.visitors.write().await.retain(|_, visitor| {
            if visitor.idle_for() >= max_idle {
                expired.push(Arc::clone(visitor));
                false
            } else {
                true
            }
        });

        for visitor in &expired {
            visitor.close();
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "Reaped idle visitors");
        }
        expired.len()
    }

    /// Background task: sweeps idle visitors for the lifetime of the process.
    pub async fn run_reaper(self, max_idle: Duration) {
        let period = max_idle.min(MAX_REAP_PERIOD).max(Duration::from_secs(1));
        info!("Visitor reaper started (idle timeout {}s)", max_idle.as_secs());

        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let reaped = self.reap_idle(max_idle).await;
            debug!(reaped, "Visitor sweep finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::identity::stub::StubProvider;
    use crate::navigation::Route;
    use crate::payment::PaymentSettings;

    fn registry() -> VisitorRegistry {
        VisitorRegistry::new(
            Arc::new(StubProvider::default()),
            VisitorSettings {
                redirect_url: "http://localhost:8080/profile".into(),
                payment: PaymentSettings {
                    amount_ghs: 50,
                    merchant_number: "0201504598".into(),
                    delay: Duration::from_secs(3),
                },
            },
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let r = registry();
        let v = r.create().await;
        assert_eq!(r.get(v.id()).await.unwrap().id(), v.id());
        assert_eq!(r.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown() {
        assert!(matches!(
            registry().get(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_tears_down() {
        let r = registry();
        let v = r.create().await;
        v.open(Route::Auth).await;

        r.remove(v.id()).await.unwrap();

        assert_eq!(v.auth().listener_count(), 0);
        assert!(r.get(v.id()).await.is_err());
        assert!(r.remove(v.id()).await.is_err());
    }

    #[tokio::test]
    async fn test_visitors_are_isolated() {
        let r = registry();
        let a = r.create().await;
        let b = r.create().await;
        a.open(Route::Profile).await;
        assert_eq!(b.current_route(), Route::Landing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_idle_keeps_recently_seen() {
        let r = registry();
        let stale = r.create().await;
        let active = r.create().await;
        stale.open(Route::Auth).await;

        tokio::time::sleep(Duration::from_secs(20 * 60)).await;
        active.touch();
        tokio::time::sleep(Duration::from_secs(15 * 60)).await;

        assert_eq!(r.reap_idle(Duration::from_secs(30 * 60)).await, 1);
        assert!(r.get(stale.id()).await.is_err());
        assert!(r.get(active.id()).await.is_ok());
        assert_eq!(stale.auth().listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_frees_abandoned_visitors() {
        let r = registry();
        for _ in 0..100 {
            r.create().await;
        }
        let reaper = tokio::spawn(r.clone().run_reaper(Duration::from_secs(30 * 60)));

        tokio::time::sleep(Duration::from_secs(29 * 60)).await;
        assert_eq!(r.len().await, 100);

        tokio::time::sleep(Duration::from_secs(2 * 60)).await;
        assert_eq!(r.len().await, 0);
        reaper.abort();
    }
}
