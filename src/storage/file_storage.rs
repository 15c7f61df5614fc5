use crate::{
    domain::{Order, OrderId, PhaseRegistry},
    error::{KanbanError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// JSON file storage rooted at `<project>/.kanban`
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const ORDERS_FILE: &'static str = "orders.json";
    const PHASES_FILE: &'static str = "phases.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
        }
    }

    fn orders_file(&self) -> PathBuf {
        self.root_path.join(Self::ORDERS_FILE)
    }

    fn phases_file(&self) -> PathBuf {
        self.root_path.join(Self::PHASES_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.orders_file().exists() {
            self.save_orders(&[]).await?;
        }
        if !self.phases_file().exists() {
            self.save_registry(&PhaseRegistry::default()).await?;
        }

        Ok(())
    }

    async fn load_orders(&self) -> Result<Vec<Order>> {
        let orders_file = self.orders_file();

        if !orders_file.exists() {
            return Err(KanbanError::NotInitialized);
        }

        let contents = fs::read_to_string(&orders_file).await?;
        let orders: Vec<Order> = serde_json::from_str(&contents)?;

        Ok(orders)
    }

    async fn save_orders(&self, orders: &[Order]) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(orders)?;
        fs::write(self.orders_file(), json).await?;

        Ok(())
    }

    async fn delete_order(&self, id: &OrderId) -> Result<()> {
        let mut orders = self.load_orders().await?;
        let before = orders.len();
        orders.retain(|order| &order.id != id);

        if orders.len() == before {
            return Err(KanbanError::OrderNotFound(id.to_string()));
        }

        self.save_orders(&orders).await
    }

    async fn load_registry(&self) -> Result<PhaseRegistry> {
        let phases_file = self.phases_file();

        if !phases_file.exists() {
            return Err(KanbanError::NotInitialized);
        }

        let contents = fs::read_to_string(&phases_file).await?;
        PhaseRegistry::from_json(&contents)
    }

    async fn save_registry(&self, registry: &PhaseRegistry) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(self.phases_file(), registry.to_json()?).await?;
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.orders_file().exists() && self.phases_file().exists()
    }
}
