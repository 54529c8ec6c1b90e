//! Backend selection and the dashboard service

use crate::realtime::WebSocketTransport;
use crate::{config, storage};
use dioxus::prelude::*;
use marks_core::config::ProviderConfig;
use marks_core::dashboard::{DashboardController, DashboardModel, ModelHandle};
use marks_core::memory::{demo_user, InMemoryProvider};
use marks_core::supabase::{Session, SupabaseProvider};
use marks_core::BookmarkProvider;
use std::rc::Rc;
use tracing::info;

/// The provider the app talks to, shared through context as a
/// `Signal<Backend>`
#[derive(Clone)]
pub enum Backend {
    /// No backend configured: everything lives in memory for this tab
    Demo(InMemoryProvider),
    Supabase {
        config: ProviderConfig,
        provider: Rc<SupabaseProvider>,
    },
}

impl Backend {
    /// Pick the backend from build-time settings, restoring a stored session
    pub fn from_build_config() -> Self {
        match config::build_config() {
            Some(config) => Self::supabase(config, storage::load_session()),
            None => Self::Demo(InMemoryProvider::demo()),
        }
    }

    pub fn supabase(config: ProviderConfig, session: Option<Session>) -> Self {
        let provider = SupabaseProvider::new(config.clone(), session)
            .with_transport(Rc::new(WebSocketTransport))
            .on_session_change(|session| match session {
                Some(session) => storage::save_session(session),
                None => storage::clear_session(),
            });
        Self::Supabase {
            config,
            provider: Rc::new(provider),
        }
    }

    pub fn provider(&self) -> Rc<dyn BookmarkProvider> {
        match self {
            Backend::Demo(memory) => Rc::new(memory.clone()),
            Backend::Supabase { provider, .. } => provider.clone(),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Backend::Demo(_))
    }

    pub fn is_signed_in(&self) -> bool {
        match self {
            Backend::Demo(memory) => memory.user().is_some(),
            Backend::Supabase { provider, .. } => provider.session().is_some(),
        }
    }

    /// Sign the demo account back in after a sign-out
    pub fn enter_demo(&self) {
        if let Backend::Demo(memory) = self {
            info!("Entering demo mode");
            memory.set_user(Some(demo_user()));
        }
    }
}

/// A dashboard model kept in a signal. Updates become no-ops once the
/// owning component is dropped.
#[derive(Clone, Copy)]
pub struct SignalModel(pub Signal<DashboardModel>);

impl ModelHandle for SignalModel {
    fn update<R>(&self, f: impl FnOnce(&mut DashboardModel) -> R) -> Option<R> {
        let mut signal = self.0;
        let mut model = signal.try_write().ok()?;
        Some(f(&mut model))
    }

    fn read<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> Option<R> {
        let model = self.0.try_peek().ok()?;
        Some(f(&model))
    }
}

pub type DashboardService = DashboardController<SignalModel>;

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn demo_backend_signs_out_and_back_in() {
        let backend = Backend::Demo(InMemoryProvider::demo());
        assert!(backend.is_demo());
        assert!(backend.is_signed_in());

        block_on(backend.provider().sign_out()).unwrap();
        assert!(!backend.is_signed_in());

        backend.enter_demo();
        assert!(backend.is_signed_in());
    }

    #[test]
    fn demo_providers_share_one_store() {
        let backend = Backend::Demo(InMemoryProvider::demo());
        let before = block_on(backend.provider().list_bookmarks()).unwrap();
        let Backend::Demo(memory) = &backend else {
            unreachable!()
        };
        memory.seed("Another", "https://another.example");
        let after = block_on(backend.provider().list_bookmarks()).unwrap();
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    fn supabase_backend_without_session_is_signed_out() {
        let config = ProviderConfig::from_values(Some("https://abc.supabase.co"), Some("key"))
            .unwrap()
            .unwrap();
        let backend = Backend::supabase(config, None);
        assert!(!backend.is_demo());
        assert!(!backend.is_signed_in());
    }
}
