use crate::{
    clock::DynClock,
    di::{DependenciesInject, Storage},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &"Registry")
            .finish()
    }
}

impl AppState {
    pub fn new(storage: Storage, clock: DynClock) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(storage, clock, &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
