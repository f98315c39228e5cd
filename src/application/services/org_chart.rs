//! Org chart service
//!
//! Loads the persisted forest, applies one editor operation and writes the
//! result back. The file is only rewritten when an operation is accepted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    flatten, DeletePlan, DomainError, FlatNode, IdGenerator, NodeDraft, NodeId, OrgNode,
    OrgTreeEditor,
};
use crate::infrastructure::traits::{Confirmer, FileSystem};

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(DeletePlan),
    /// The confirmer declined; nothing was written.
    Cancelled(DeletePlan),
}

/// Service for editing a file-backed org chart.
pub struct OrgChartService {
    fs: Arc<dyn FileSystem>,
    confirmer: Arc<dyn Confirmer>,
    ids: Arc<dyn IdGenerator>,
    editor: OrgTreeEditor,
    data_file: PathBuf,
}

impl OrgChartService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        confirmer: Arc<dyn Confirmer>,
        ids: Arc<dyn IdGenerator>,
        editor: OrgTreeEditor,
        data_file: PathBuf,
    ) -> Self {
        Self {
            fs,
            confirmer,
            ids,
            editor,
            data_file,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn editor(&self) -> &OrgTreeEditor {
        &self.editor
    }

    /// Load the forest. A missing file is an empty org chart.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self) -> ApplicationResult<Vec<OrgNode>> {
        if !self.fs.exists(&self.data_file) {
            debug!("load: {} does not exist, empty chart", self.data_file.display());
            return Ok(Vec::new());
        }
        let content = self
            .fs
            .read_to_string(&self.data_file)
            .with_path_context("read org chart", &self.data_file)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.parse(&content)
    }

    /// Each level of nesting costs two JSON containers, so serde_json's default
    /// recursion limit of 128 would reject charts deeper than 64 levels.
    fn parse(&self, content: &str) -> ApplicationResult<Vec<OrgNode>> {
        let storage_err = |e: serde_json::Error| ApplicationError::Storage {
            path: self.data_file.clone(),
            message: e.to_string(),
        };
        let mut json = serde_json::Deserializer::from_str(content);
        json.disable_recursion_limit();
        let forest = Vec::<OrgNode>::deserialize(serde_stacker::Deserializer::new(&mut json))
            .map_err(storage_err)?;
        json.end().map_err(storage_err)?;
        Ok(forest)
    }

    /// Persist the forest, replacing the previous file in one rename.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn save(&self, forest: &[OrgNode]) -> ApplicationResult<()> {
        let json = serde_json::to_string_pretty(forest).map_err(|e| ApplicationError::Storage {
            path: self.data_file.clone(),
            message: e.to_string(),
        })?;
        let tmp = self.temp_path();

        self.fs
            .ensure_parent(&self.data_file)
            .with_path_context("create directory for", &self.data_file)?;
        self.fs
            .write(&tmp, &format!("{}\n", json))
            .with_path_context("write org chart", &tmp)?;
        if let Err(e) = self.fs.rename(&tmp, &self.data_file) {
            let _ = self.fs.remove_file(&tmp);
            return Err(e).with_path_context("replace org chart", &self.data_file);
        }
        debug!("save: wrote {} node(s)", flatten(forest).len());
        Ok(())
    }

    /// Flat, depth-annotated view of the current chart.
    pub fn list(&self) -> ApplicationResult<Vec<FlatNode>> {
        Ok(flatten(&self.load()?))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add(&self, draft: &NodeDraft) -> ApplicationResult<NodeId> {
        let forest = self.load()?;
        let (id, updated) = self.editor.add_node(&forest, draft, self.ids.as_ref())?;
        self.save(&updated)?;
        info!("Added {}", id);
        Ok(id)
    }

    /// Edit name and/or title; omitted fields keep their current value.
    #[instrument(level = "debug", skip(self))]
    pub fn edit(
        &self,
        id: &NodeId,
        name: Option<&str>,
        title: Option<&str>,
    ) -> ApplicationResult<()> {
        let forest = self.load()?;
        let current = flatten(&forest)
            .into_iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound(id.clone()))?;

        let mut draft = NodeDraft::for_edit(&current);
        if let Some(name) = name {
            draft = draft.name(name);
        }
        if let Some(title) = title {
            draft = draft.title(title);
        }

        let updated = self.editor.edit_node(&forest, id, &draft)?;
        self.save(&updated)?;
        info!("Edited {}", id);
        Ok(())
    }

    /// Delete `id` and its reports after confirmation.
    ///
    /// `assume_yes` skips the confirmer.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: &NodeId, assume_yes: bool) -> ApplicationResult<DeleteOutcome> {
        let forest = self.load()?;
        let plan = self.editor.plan_delete(&forest, id)?;
        debug!("delete: {} has {} descendant(s)", id, plan.descendant_count);

        let confirmed = assume_yes
            || self
                .confirmer
                .confirm_delete(&plan)
                .map_err(|e| ApplicationError::OperationFailed {
                    context: format!("confirm deletion of {}", id),
                    source: Box::new(e),
                })?;
        if !confirmed {
            info!("Deletion of {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled(plan));
        }

        let updated = self.editor.apply_delete(&forest, &plan);
        self.save(&updated)?;
        info!("Deleted {} and {} subordinate(s)", id, plan.descendant_count);
        Ok(DeleteOutcome::Deleted(plan))
    }

    /// Reparent `id`; `new_parent` None makes it top level.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&self, id: &NodeId, new_parent: Option<&NodeId>) -> ApplicationResult<()> {
        let forest = self.load()?;
        let updated = self.editor.move_node(&forest, id, new_parent)?;
        self.save(&updated)?;
        info!("Moved {}", id);
        Ok(())
    }

    /// Write the starter chart. Refuses to overwrite unless `force`.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&self, force: bool) -> ApplicationResult<usize> {
        if self.fs.exists(&self.data_file) && !force {
            return Err(ApplicationError::AlreadyExists(self.data_file.clone()));
        }
        let chart = starter_chart();
        self.save(&chart)?;
        Ok(flatten(&chart).len())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .data_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "orgchart.json".into());
        name.push(".tmp");
        self.data_file.with_file_name(name)
    }
}

/// Small example organization used by `init`.
pub fn starter_chart() -> Vec<OrgNode> {
    let ceo = NodeId::from("1");
    let cto = NodeId::from("2");
    let cfo = NodeId::from("3");
    vec![OrgNode::new(ceo.clone(), "John Smith", "CEO", None).with_children(vec![
        OrgNode::new(cto.clone(), "Jane Doe", "CTO", Some(ceo.clone())).with_children(vec![
            OrgNode::new("4", "Bob Wilson", "Lead Developer", Some(cto.clone())),
            OrgNode::new("5", "Alice Brown", "Senior Developer", Some(cto)),
        ]),
        OrgNode::new(cfo.clone(), "Mike Johnson", "CFO", Some(ceo)).with_children(vec![
            OrgNode::new("6", "Sarah Davis", "Accountant", Some(cfo)),
        ]),
    ])]
}
