use crate::areas::database::Database;
use crate::areas::lock::RepositoryLock;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::fs_tree::ROOT_MARKER;
use crate::errors::{Result, WitError};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const IMAGES_DIR: &str = "images";
const STAGING_DIR: &str = "staging_area";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    staging_area: Arc<Mutex<StagingArea>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        // only `init` creates a missing root
        let path = if path.exists() {
            path.canonicalize()?
        } else {
            std::path::absolute(path)?
        };
        let control_path = path.join(ROOT_MARKER);

        let staging_area = StagingArea::new(control_path.join(STAGING_DIR).into_boxed_path());
        let database = Database::new(control_path.join(IMAGES_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(control_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging_area: Arc::new(Mutex::new(staging_area)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> PathBuf {
        self.path.join(ROOT_MARKER)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging_area(&self) -> Arc<Mutex<StagingArea>> {
        self.staging_area.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.control_path().is_dir()
    }

    /// Fail unless `init` has created the control directory
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(WitError::UninitializedRepository(format!(
                "'{}' not found in {}, run init first",
                ROOT_MARKER,
                self.path.display()
            )))
        }
    }

    /// Check initialisation and take the repository lock for a mutating command
    pub fn lock(&self) -> Result<RepositoryLock> {
        self.ensure_initialized()?;
        RepositoryLock::acquire(&self.control_path())
    }
}
