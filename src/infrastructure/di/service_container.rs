//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::OrgChartService;
use crate::config::Settings;
use crate::domain::{IdGenerator, UuidGenerator};
use crate::infrastructure::traits::{
    AutoConfirmer, Confirmer, FileSystem, RealFileSystem, TerminalConfirmer,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Delete confirmation
    pub confirmer: Arc<dyn Confirmer>,

    /// Node id source
    pub ids: Arc<dyn IdGenerator>,

    pub org_chart: OrgChartService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Deletions are confirmed on the terminal unless `confirm_deletes` is off.
    pub fn new(settings: Settings) -> Self {
        let confirmer: Arc<dyn Confirmer> = if settings.confirm_deletes {
            Arc::new(TerminalConfirmer)
        } else {
            Arc::new(AutoConfirmer)
        };
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            confirmer,
            Arc::new(UuidGenerator),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        confirmer: Arc<dyn Confirmer>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let settings = Arc::new(settings);
        let org_chart = OrgChartService::new(
            Arc::clone(&fs),
            Arc::clone(&confirmer),
            Arc::clone(&ids),
            settings.editor(),
            settings.data_file.clone(),
        );

        Self {
            settings,
            fs,
            confirmer,
            ids,
            org_chart,
        }
    }
}
